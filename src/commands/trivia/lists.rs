//! Trivia question lists: plain `.txt` files, one
//! `Question?Answer[?Answer...]` per line. Blank lines and `#` comments
//! are ignored.

use std::fs;
use std::io;
use std::path::Path;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TriviaError {
    #[error("no trivia list named `{0}`")]
    UnknownList(String),

    #[error("trivia list `{0}` contains no questions")]
    EmptyList(String),

    #[error("a session is already running in this channel")]
    SessionRunning,

    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TriviaQuestion {
    pub question: String,
    /// Accepted answers; any of them scores.
    pub answers: Vec<String>,
}

/// Parse a list file. Malformed lines (no `?`, empty question or answer)
/// are skipped rather than failing the whole list.
pub fn parse_list(content: &str) -> Vec<TriviaQuestion> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let mut parts = line.split('?').map(str::trim);
            let question = parts.next().filter(|q| !q.is_empty())?;
            let answers: Vec<String> = parts
                .filter(|a| !a.is_empty())
                .map(str::to_string)
                .collect();
            if answers.is_empty() {
                return None;
            }
            Some(TriviaQuestion {
                question: format!("{question}?"),
                answers,
            })
        })
        .collect()
}

/// Names of the available lists (file stems), sorted.
pub fn available_lists(dir: &Path) -> io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "txt") {
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
    }
    names.sort();
    Ok(names)
}

/// Load a list by name. Names are restricted to simple identifiers so a
/// list name can never escape the trivia directory.
pub fn load_list(dir: &Path, name: &str) -> Result<Vec<TriviaQuestion>, TriviaError> {
    if name.is_empty()
        || !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(TriviaError::UnknownList(name.to_string()));
    }
    let path = dir.join(format!("{name}.txt"));
    let content =
        fs::read_to_string(&path).map_err(|_| TriviaError::UnknownList(name.to_string()))?;
    let questions = parse_list(&content);
    if questions.is_empty() {
        return Err(TriviaError::EmptyList(name.to_string()));
    }
    Ok(questions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_questions_and_alternate_answers() {
        let parsed = parse_list(
            "# capitals\n\
             What is the capital of France?Paris\n\
             \n\
             Largest US state?Alaska?AK\n",
        );
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].question, "What is the capital of France?");
        assert_eq!(parsed[0].answers, vec!["Paris"]);
        assert_eq!(parsed[1].answers, vec!["Alaska", "AK"]);
    }

    #[test]
    fn skips_malformed_lines() {
        let parsed = parse_list("no separator here\n?NoQuestion\nNoAnswer?\nOk?yes\n");
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].question, "Ok?");
    }

    #[test]
    fn rejects_path_traversal_names() {
        let dir = Path::new("data/trivia");
        for name in ["../secrets", "a/b", "a\\b", "", "name.txt"] {
            assert!(matches!(
                load_list(dir, name),
                Err(TriviaError::UnknownList(_))
            ));
        }
    }
}
