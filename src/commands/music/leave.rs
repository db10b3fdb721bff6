use tracing::info;

use super::utils::music_manager::MusicManager;
use super::utils::queue_manager::QUEUE_METADATA;
use crate::commands::error_reply;
use crate::{CommandResult, Context};

/// Leave the voice channel
#[poise::command(slash_command, prefix_command, guild_only, category = "Music")]
pub async fn leave(ctx: Context<'_>) -> CommandResult {
    let Some(guild_id) = ctx.guild_id() else {
        return Ok(());
    };
    match MusicManager::leave(ctx.serenity_context(), guild_id).await {
        Ok(()) => {
            QUEUE_METADATA.lock().await.clear(guild_id);
            info!(guild = guild_id.get(), "left voice channel");
            ctx.say("👋 Left the voice channel.").await?;
        }
        Err(err) => {
            ctx.send(error_reply(err.to_string())).await?;
        }
    }
    Ok(())
}
