use super::utils::music_manager::{MusicError, MusicManager};
use crate::commands::error_reply;
use crate::{CommandResult, Context};

/// Pause playback
#[poise::command(slash_command, prefix_command, guild_only, category = "Music")]
pub async fn pause(ctx: Context<'_>) -> CommandResult {
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
    let handler = call.lock().await;
    match handler.queue().current() {
        Some(track) => {
            track.pause()?;
            drop(handler);
            ctx.say("⏸️ Paused.").await?;
        }
        None => {
            drop(handler);
            ctx.send(error_reply(MusicError::NothingPlaying.to_string()))
                .await?;
        }
    }
    Ok(())
}

/// Resume playback
#[poise::command(slash_command, prefix_command, guild_only, category = "Music")]
pub async fn resume(ctx: Context<'_>) -> CommandResult {
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
    let handler = call.lock().await;
    match handler.queue().current() {
        Some(track) => {
            track.play()?;
            drop(handler);
            ctx.say("▶️ Resumed.").await?;
        }
        None => {
            drop(handler);
            ctx.send(error_reply(MusicError::NothingPlaying.to_string()))
                .await?;
        }
    }
    Ok(())
}
