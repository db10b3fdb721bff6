use chrono::Utc;
use tracing::debug;

use crate::commands::{error_reply, ok_reply};
use crate::db::EconomyError;
use crate::utils::{format_credits, format_duration};
use crate::{CommandResult, Context};

/// Claim your periodic stipend of credits
#[poise::command(slash_command, prefix_command, guild_only, category = "Economy")]
pub async fn payday(ctx: Context<'_>) -> CommandResult {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.send(error_reply("This command only works in a server."))
            .await?;
        return Ok(());
    };

    let data = ctx.data();
    let settings = data.db.guild_settings(guild_id)?;
    let now = Utc::now().timestamp();

    match data.db.payday(
        guild_id,
        ctx.author().id,
        settings.payday_amount,
        settings.payday_cooldown,
        now,
    ) {
        Ok(new_balance) => {
            debug!(
                guild = guild_id.get(),
                user = ctx.author().id.get(),
                amount = settings.payday_amount,
                "payday claimed"
            );
            ctx.send(ok_reply(
                "💵 Payday!",
                format!(
                    "Here's {} for you, {}. You now have {}.",
                    format_credits(settings.payday_amount),
                    ctx.author().display_name(),
                    format_credits(new_balance)
                ),
            ))
            .await?;
        }
        Err(EconomyError::OnCooldown { remaining }) => {
            ctx.send(error_reply(format!(
                "Too soon! Next payday in {}.",
                format_duration(remaining)
            )))
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
