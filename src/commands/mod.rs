//! This module aggregates all the command cogs for the bot.

/// User-defined trigger/response commands.
pub mod custom;
/// Credits, payday, transfers, and the slot machine.
pub mod economy;
/// Auto-expiring gallery channels.
pub mod gallery;
/// Small diversions: coin flips, dice, the eight ball.
pub mod general;
/// Word filter and message cleanup.
pub mod moderation;
/// Cog management, guild settings, shutdown.
pub mod owner;
/// Twitch go-live alerts.
pub mod streams;
/// Trivia game sessions.
pub mod trivia;

/// Voice-channel music playback (requires the `music` feature).
#[cfg(feature = "music")]
pub mod music;

use poise::CreateReply;
use poise::serenity_prelude::CreateEmbed;

/// Standard red error embed, ephemeral so failures don't clutter channels.
pub fn error_reply(message: impl Into<String>) -> CreateReply {
    CreateReply::default()
        .embed(
            CreateEmbed::new()
                .title("❌ Error")
                .description(message.into())
                .color(0xff0000),
        )
        .ephemeral(true)
}

/// Standard green success embed.
pub fn ok_reply(title: impl Into<String>, message: impl Into<String>) -> CreateReply {
    CreateReply::default().embed(
        CreateEmbed::new()
            .title(title.into())
            .description(message.into())
            .color(0x2ecc71),
    )
}
