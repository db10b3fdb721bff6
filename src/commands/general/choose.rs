use rand::seq::IndexedRandom;

use crate::commands::error_reply;
use crate::{CommandResult, Context};

/// Choose between multiple options, separated by semicolons
#[poise::command(slash_command, prefix_command, category = "General")]
pub async fn choose(
    ctx: Context<'_>,
    #[description = "Options separated by ; (or ,)"]
    #[rest]
    options: String,
) -> CommandResult {
    let choices = parse_choices(&options);
    if choices.len() < 2 {
        ctx.send(error_reply(
            "Give me at least two options, separated by `;` or `,`.",
        ))
        .await?;
        return Ok(());
    }
    let pick = {
        let mut rng = rand::rng();
        choices.choose(&mut rng).copied().unwrap_or_default()
    };
    ctx.say(format!("I choose... **{pick}**")).await?;
    Ok(())
}

/// Split on `;` when present, otherwise `,`; trims and drops empties.
fn parse_choices(input: &str) -> Vec<&str> {
    let sep = if input.contains(';') { ';' } else { ',' };
    input
        .split(sep)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}
