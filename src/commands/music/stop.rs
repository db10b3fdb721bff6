use tracing::info;

use super::utils::music_manager::MusicManager;
use super::utils::queue_manager::QUEUE_METADATA;
use crate::commands::error_reply;
use crate::{CommandResult, Context};

/// Stop playback and clear the queue
#[poise::command(slash_command, prefix_command, guild_only, category = "Music")]
pub async fn stop(ctx: Context<'_>) -> CommandResult {
    let Some(guild_id) = ctx.guild_id() else {
        return Ok(());
    };
    let call = match MusicManager::get_call(ctx.serenity_context(), guild_id).await {
        Ok(call) => call,
        Err(err) => {
            ctx.send(error_reply(err.to_string())).await?;
            return Ok(());
        }
    };
    {
        let handler = call.lock().await;
        handler.queue().stop();
    }
    QUEUE_METADATA.lock().await.clear(guild_id);
    info!(guild = guild_id.get(), "playback stopped, queue cleared");
    ctx.say("⏹️ Stopped playback and cleared the queue.").await?;
    Ok(())
}
