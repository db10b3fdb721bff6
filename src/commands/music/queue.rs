use poise::CreateReply;
use poise::serenity_prelude::CreateEmbed;

use super::utils::queue_manager::QUEUE_METADATA;
use crate::utils::format_timestamp;
use crate::{CommandResult, Context};

/// Show the current playback queue
#[poise::command(slash_command, prefix_command, guild_only, category = "Music")]
pub async fn queue(ctx: Context<'_>) -> CommandResult {
    let Some(guild_id) = ctx.guild_id() else {
        return Ok(());
    };

    let tracks = QUEUE_METADATA.lock().await.snapshot(guild_id);
    if tracks.is_empty() {
        ctx.say("The queue is empty.").await?;
        return Ok(());
    }

    let mut lines = Vec::new();
    for (i, track) in tracks.iter().take(11).enumerate() {
        let duration = track
            .duration
            .map(|d| format!(" `{}`", format_timestamp(d)))
            .unwrap_or_default();
        if i == 0 {
            lines.push(format!(
                "▶️ **{}**{duration} (requested by {})",
                track.title, track.requested_by
            ));
        } else {
            lines.push(format!("**{i}.** {}{duration}", track.title));
        }
    }
    let remaining = tracks.len().saturating_sub(11);
    if remaining > 0 {
        lines.push(format!("...and {remaining} more"));
    }

    ctx.send(
        CreateReply::default().embed(
            CreateEmbed::new()
                .title("🎵 Queue")
                .description(lines.join("\n"))
                .color(0x3498db),
        ),
    )
    .await?;
    Ok(())
}
