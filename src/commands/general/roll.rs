use rand::RngExt;

use crate::{CommandResult, Context};

/// Roll a die (default 100 sides)
#[poise::command(slash_command, prefix_command, category = "General")]
pub async fn roll(
    ctx: Context<'_>,
    #[description = "Number of sides"]
    #[min = 2]
    #[max = 1000000]
    sides: Option<u32>,
) -> CommandResult {
    let sides = sides.unwrap_or(100).max(2);
    let result = roll_die(sides);
    ctx.say(format!(
        "{} rolled a **{result}** (1-{sides})",
        ctx.author().display_name()
    ))
    .await?;
    Ok(())
}

fn roll_die(sides: u32) -> u32 {
    rand::rng().random_range(1..=sides)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rolls_stay_in_range() {
        for _ in 0..100 {
            let result = roll_die(6);
            assert!((1..=6).contains(&result));
        }
    }
}
