use poise::serenity_prelude as serenity;
use rand::RngExt;

use crate::{CommandResult, Context};

/// Flip a coin, or flip a fellow member upside down
#[poise::command(slash_command, prefix_command, category = "General")]
pub async fn flip(
    ctx: Context<'_>,
    #[description = "Member to flip instead of a coin"] user: Option<serenity::User>,
) -> CommandResult {
    let reply = match user {
        Some(user) => {
            let name = user
                .global_name
                .clone()
                .unwrap_or_else(|| user.name.clone());
            format!("(╯°□°）╯︵ {}", flip_text(&name))
        }
        None => format!("*flips a coin and... {}!*", flip_coin()),
    };
    ctx.say(reply).await?;
    Ok(())
}

fn flip_coin() -> &'static str {
    if rand::rng().random_bool(0.5) {
        "HEADS"
    } else {
        "TAILS"
    }
}

/// Turn text upside down: map each letter to its rotated glyph, then
/// reverse the string. Characters without a glyph pass through.
fn flip_text(input: &str) -> String {
    input
        .chars()
        .rev()
        .map(|c| match c.to_ascii_lowercase() {
            'a' => 'ɐ',
            'b' => 'q',
            'c' => 'ɔ',
            'd' => 'p',
            'e' => 'ǝ',
            'f' => 'ɟ',
            'g' => 'ƃ',
            'h' => 'ɥ',
            'i' => 'ᴉ',
            'j' => 'ɾ',
            'k' => 'ʞ',
            'm' => 'ɯ',
            'n' => 'u',
            'p' => 'd',
            'q' => 'b',
            'r' => 'ɹ',
            't' => 'ʇ',
            'u' => 'n',
            'v' => 'ʌ',
            'w' => 'ʍ',
            'y' => 'ʎ',
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn flips_and_reverses() {
        assert_eq!(flip_text("abc"), "ɔqɐ");
        assert_eq!(flip_text("Red"), "pǝɹ");
    }

    #[test]
    fn unknown_characters_pass_through() {
        assert_eq!(flip_text("ok!"), "!ʞo");
    }

    #[test]
    fn coin_lands_on_a_side() {
        for _ in 0..20 {
            assert!(matches!(flip_coin(), "HEADS" | "TAILS"));
        }
    }
}
