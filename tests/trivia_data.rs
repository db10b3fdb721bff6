//! Sanity checks over the trivia lists shipped in `data/trivia`.

use std::path::PathBuf;

use crimson::commands::trivia::lists::{available_lists, load_list};
use rstest::rstest;

fn trivia_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/trivia")
}

#[test]
fn shipped_lists_are_discoverable() {
    let names = available_lists(&trivia_dir()).unwrap();
    assert!(names.contains(&"general".to_string()));
    assert!(names.contains(&"capitals".to_string()));
}

#[rstest]
#[case("general", 20)]
#[case("capitals", 15)]
fn shipped_lists_parse_cleanly(#[case] name: &str, #[case] expected: usize) {
    let questions = load_list(&trivia_dir(), name).unwrap();
    assert_eq!(questions.len(), expected);
    for q in &questions {
        assert!(q.question.ends_with('?'), "{:?}", q.question);
        assert!(!q.answers.is_empty());
    }
}
