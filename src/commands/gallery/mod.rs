//! The gallery cog. A gallery channel keeps images and pinned posts;
//! everything else expires after a per-channel lifetime, enforced by a
//! background sweep.

pub mod sweep;

use crate::commands::{error_reply, ok_reply};
use crate::utils::{format_duration, parse_duration};
use crate::{CommandResult, Context, Data, Error};

/// Non-image posts live this long unless the channel says otherwise.
pub const DEFAULT_EXPIRY: i64 = 60 * 60 * 24 * 2;
/// Shortest accepted lifetime.
pub const MIN_EXPIRY: i64 = 60;
/// Longest accepted lifetime. Bulk deletion only reaches back two weeks,
/// so older posts would be left behind.
pub const MAX_EXPIRY: i64 = 60 * 60 * 24 * 13;

pub fn commands() -> Vec<poise::Command<Data, Error>> {
    vec![gallery()]
}

/// Manage gallery channels, where non-image posts expire
#[poise::command(
    slash_command,
    prefix_command,
    guild_only,
    subcommands("enable", "disable", "list"),
    required_permissions = "MANAGE_MESSAGES",
    category = "Gallery"
)]
pub async fn gallery(_: Context<'_>) -> CommandResult {
    Ok(())
}

/// Turn this channel into a gallery
#[poise::command(slash_command, prefix_command, guild_only)]
async fn enable(
    ctx: Context<'_>,
    #[description = "Lifetime of non-image posts, e.g. 12h or 2d (default 2d)"]
    expiry: Option<String>,
) -> CommandResult {
    let Some(guild_id) = ctx.guild_id() else {
        return Ok(());
    };
    let expiry_secs = match expiry {
        None => DEFAULT_EXPIRY,
        Some(raw) => match parse_duration(&raw) {
            Some(secs) if (MIN_EXPIRY..=MAX_EXPIRY).contains(&secs) => secs,
            Some(_) => {
                ctx.send(error_reply(format!(
                    "Lifetime must be between {} and {}.",
                    format_duration(MIN_EXPIRY),
                    format_duration(MAX_EXPIRY)
                )))
                .await?;
                return Ok(());
            }
            None => {
                ctx.send(error_reply(
                    "I couldn't read that lifetime. Try something like `12h` or `2d`.",
                ))
                .await?;
                return Ok(());
            }
        },
    };

    ctx.data()
        .db
        .set_gallery_channel(guild_id, ctx.channel_id(), expiry_secs)?;
    ctx.send(ok_reply(
        "🖼️ Gallery enabled",
        format!(
            "Posts here without an image or a pin will be removed after {}.",
            format_duration(expiry_secs)
        ),
    ))
    .await?;
    Ok(())
}

/// Stop treating this channel as a gallery
#[poise::command(slash_command, prefix_command, guild_only)]
async fn disable(ctx: Context<'_>) -> CommandResult {
    if ctx.data().db.remove_gallery_channel(ctx.channel_id())? {
        ctx.send(ok_reply(
            "Gallery disabled",
            "Posts in this channel no longer expire.",
        ))
        .await?;
    } else {
        ctx.send(error_reply("This channel isn't a gallery."))
            .await?;
    }
    Ok(())
}

/// List this server's gallery channels
#[poise::command(slash_command, prefix_command, guild_only)]
async fn list(ctx: Context<'_>) -> CommandResult {
    let Some(guild_id) = ctx.guild_id() else {
        return Ok(());
    };
    let channels = ctx.data().db.gallery_channels_for_guild(guild_id)?;
    if channels.is_empty() {
        ctx.say("No gallery channels in this server.").await?;
    } else {
        let lines: Vec<String> = channels
            .iter()
            .map(|g| format!("<#{}> — {}", g.channel_id, format_duration(g.expiry_secs)))
            .collect();
        ctx.say(format!("Gallery channels:\n{}", lines.join("\n")))
            .await?;
    }
    Ok(())
}
