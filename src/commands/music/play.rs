use songbird::input::{Compose, YoutubeDl};
use tracing::{error, info};

use super::utils::music_manager::{MusicError, MusicManager};
use super::utils::queue_manager::{QUEUE_METADATA, SongEndNotifier, TrackMetadata};
use crate::commands::{error_reply, ok_reply};
use crate::utils::format_timestamp;
use crate::{CommandResult, Context, HTTP_CLIENT};

/// Play a track from a URL or a YouTube search
#[poise::command(slash_command, prefix_command, guild_only, category = "Music")]
pub async fn play(
    ctx: Context<'_>,
    #[description = "URL or search query"]
    #[rest]
    query: String,
) -> CommandResult {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.send(error_reply(MusicError::NotInGuild.to_string()))
            .await?;
        return Ok(());
    };

    // The author must be in a voice channel before we resolve anything.
    let channel_id = match MusicManager::get_user_voice_channel(
        ctx.serenity_context(),
        guild_id,
        ctx.author().id,
    ) {
        Ok(channel_id) => channel_id,
        Err(err) => {
            ctx.send(error_reply(err.to_string())).await?;
            return Ok(());
        }
    };

    // Resolving metadata shells out to yt-dlp; this can take a moment.
    ctx.defer().await?;

    let call = match MusicManager::get_call(ctx.serenity_context(), guild_id).await {
        Ok(call) => call,
        Err(_) => {
            match MusicManager::join_channel(ctx.serenity_context(), guild_id, channel_id).await {
                Ok(call) => call,
                Err(err) => {
                    ctx.send(error_reply(err.to_string())).await?;
                    return Ok(());
                }
            }
        }
    };

    let mut source = if is_url(&query) {
        YoutubeDl::new(HTTP_CLIENT.clone(), query.clone())
    } else {
        YoutubeDl::new_search(HTTP_CLIENT.clone(), query.clone())
    };

    let metadata = match source.aux_metadata().await {
        Ok(aux) => TrackMetadata::from_aux(aux, ctx.author().display_name().to_string()),
        Err(err) => {
            error!("failed to resolve audio source for {query:?}: {err}");
            ctx.send(error_reply(
                MusicError::AudioSourceError(err.to_string()).to_string(),
            ))
            .await?;
            return Ok(());
        }
    };

    let track_handle = {
        let mut handler = call.lock().await;
        handler.enqueue_input(source.into()).await
    };
    let _ = track_handle.add_event(
        songbird::Event::Track(songbird::TrackEvent::End),
        SongEndNotifier { guild_id },
    );

    let position = QUEUE_METADATA.lock().await.push(guild_id, metadata.clone());
    info!(
        guild = guild_id.get(),
        title = %metadata.title,
        position,
        "track enqueued"
    );

    let duration = metadata
        .duration
        .map(|d| format!(" ({})", format_timestamp(d)))
        .unwrap_or_default();
    let reply = if position == 0 {
        ok_reply(
            "🎶 Now playing",
            format!("**{}**{duration}", metadata.title),
        )
    } else {
        ok_reply(
            "Added to queue",
            format!("**{}**{duration} — position {position}", metadata.title),
        )
    };
    ctx.send(reply).await?;
    Ok(())
}

/// Direct URLs go straight to yt-dlp; everything else becomes a search.
fn is_url(query: &str) -> bool {
    url::Url::parse(query)
        .map(|u| matches!(u.scheme(), "http" | "https"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_are_detected() {
        assert!(is_url("https://youtube.com/watch?v=abc"));
        assert!(is_url("http://example.com/track.mp3"));
    }

    #[test]
    fn search_terms_are_not_urls() {
        assert!(!is_url("never gonna give you up"));
        assert!(!is_url("ftp://example.com/file"));
        assert!(!is_url("youtube.com/watch?v=abc")); // no scheme
    }
}
