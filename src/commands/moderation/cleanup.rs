use poise::serenity_prelude::{GetMessages, MessageId};
use tracing::info;

use crate::commands::error_reply;
use crate::{CommandResult, Context};

/// Delete the most recent messages in this channel
#[poise::command(
    slash_command,
    prefix_command,
    guild_only,
    required_permissions = "MANAGE_MESSAGES",
    category = "Mod"
)]
pub async fn cleanup(
    ctx: Context<'_>,
    #[description = "How many messages to delete (max 100)"]
    #[min = 1]
    #[max = 100]
    count: u8,
) -> CommandResult {
    let Some(guild_id) = ctx.guild_id() else {
        return Ok(());
    };

    ctx.defer_ephemeral().await?;

    let http = &ctx.serenity_context().http;
    let channel_id = ctx.channel_id();
    let messages = channel_id
        .messages(http, GetMessages::new().limit(count))
        .await?;
    let ids: Vec<MessageId> = messages.iter().map(|m| m.id).collect();
    let deleted = ids.len();

    let result = match deleted {
        0 => Ok(()),
        1 => channel_id.delete_message(http, ids[0]).await,
        _ => channel_id.delete_messages(http, ids).await,
    };

    match result {
        Ok(()) => {
            info!(
                guild = guild_id.get(),
                channel = channel_id.get(),
                count = deleted,
                "cleanup deleted messages"
            );
            ctx.say(format!("🧹 Deleted {deleted} message(s).")).await?;
        }
        Err(e) => {
            ctx.send(error_reply(format!(
                "Couldn't delete messages (older than two weeks, or missing permission?): {e}"
            )))
            .await?;
        }
    }
    Ok(())
}
