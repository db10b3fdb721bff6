use poise::serenity_prelude as serenity;
use tracing::info;

use crate::commands::{error_reply, ok_reply};
use crate::db::EconomyError;
use crate::utils::format_credits;
use crate::{CommandResult, Context};

/// Give some of your credits to another member
#[poise::command(slash_command, prefix_command, guild_only, category = "Economy")]
pub async fn transfer(
    ctx: Context<'_>,
    #[description = "Recipient"] user: serenity::User,
    #[description = "Amount of credits"]
    #[min = 1]
    amount: i64,
) -> CommandResult {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.send(error_reply("This command only works in a server."))
            .await?;
        return Ok(());
    };

    if user.id == ctx.author().id {
        ctx.send(error_reply("You can't transfer credits to yourself."))
            .await?;
        return Ok(());
    }
    if user.bot {
        ctx.send(error_reply("Bots have no use for credits."))
            .await?;
        return Ok(());
    }

    match ctx
        .data()
        .db
        .transfer(guild_id, ctx.author().id, user.id, amount)
    {
        Ok(remaining) => {
            info!(
                guild = guild_id.get(),
                from = ctx.author().id.get(),
                to = user.id.get(),
                amount,
                "credits transferred"
            );
            ctx.send(ok_reply(
                "Transfer complete",
                format!(
                    "Sent {} to {}. You have {} left.",
                    format_credits(amount),
                    user.display_name(),
                    format_credits(remaining)
                ),
            ))
            .await?;
        }
        Err(
            e @ (EconomyError::NoAccount
            | EconomyError::NoRecipientAccount
            | EconomyError::InsufficientFunds
            | EconomyError::InvalidAmount),
        ) => {
            ctx.send(error_reply(e.to_string())).await?;
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}
