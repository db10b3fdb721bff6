use poise::serenity_prelude as serenity;

use crate::commands::error_reply;
use crate::db::EconomyError;
use crate::utils::format_credits;
use crate::{CommandResult, Context};

/// Check your balance, or someone else's
#[poise::command(slash_command, prefix_command, guild_only, category = "Economy")]
pub async fn balance(
    ctx: Context<'_>,
    #[description = "Member to look up (defaults to you)"] user: Option<serenity::User>,
) -> CommandResult {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.send(error_reply("This command only works in a server."))
            .await?;
        return Ok(());
    };

    let target = user.as_ref().unwrap_or_else(|| ctx.author());
    match ctx.data().db.balance(guild_id, target.id) {
        Ok(amount) => {
            ctx.say(format!(
                "{} has {}.",
                target.display_name(),
                format_credits(amount)
            ))
            .await?;
        }
        Err(EconomyError::NoAccount) if user.is_some() => {
            ctx.send(error_reply("That user doesn't have an account here."))
                .await?;
        }
        Err(EconomyError::NoAccount) => {
            ctx.send(error_reply(
                "You don't have an account yet; use `register` first.",
            ))
            .await?;
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}
