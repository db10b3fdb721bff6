use tracing::info;

use super::utils::music_manager::{MusicError, MusicManager};
use super::utils::queue_manager::QUEUE_METADATA;
use crate::commands::error_reply;
use crate::{CommandResult, Context};

/// Skip the current track
#[poise::command(slash_command, prefix_command, guild_only, category = "Music")]
pub async fn skip(ctx: Context<'_>) -> CommandResult {
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

    let skipped = QUEUE_METADATA
        .lock()
        .await
        .current(guild_id)
        .map(|track| track.title.clone());
    let handler = call.lock().await;
    if handler.queue().is_empty() {
        drop(handler);
        ctx.send(error_reply(MusicError::NothingPlaying.to_string()))
            .await?;
        return Ok(());
    }
    // The metadata mirror advances via the track-end event.
    handler.queue().skip()?;
    drop(handler);

    info!(guild = guild_id.get(), "track skipped");
    match skipped {
        Some(title) => ctx.say(format!("⏭️ Skipped **{title}**.")).await?,
        None => ctx.say("⏭️ Skipped.").await?,
    };
    Ok(())
}
