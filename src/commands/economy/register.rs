use tracing::info;

use crate::commands::{error_reply, ok_reply};
use crate::db::EconomyError;
use crate::utils::format_credits;
use crate::{CommandResult, Context};

/// Open a credit account in this server
#[poise::command(slash_command, prefix_command, guild_only, category = "Economy")]
pub async fn register(ctx: Context<'_>) -> CommandResult {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.send(error_reply("This command only works in a server."))
            .await?;
        return Ok(());
    };

    match ctx.data().db.open_account(guild_id, ctx.author().id) {
        Ok(balance) => {
            info!(
                guild = guild_id.get(),
                user = ctx.author().id.get(),
                "economy account opened"
            );
            ctx.send(ok_reply(
                "Account opened",
                format!(
                    "Welcome, {}! Your starting balance is {}.",
                    ctx.author().display_name(),
                    format_credits(balance)
                ),
            ))
            .await?;
        }
        Err(EconomyError::AccountExists) => {
            ctx.send(error_reply("You already have an account here."))
                .await?;
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}
