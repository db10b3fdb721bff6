//! The streams cog: Twitch go-live alerts bound to the invoking channel.

pub mod poller;
pub mod twitch;

use crate::commands::{error_reply, ok_reply};
use crate::{CommandResult, Context, Data, Error};

pub fn commands() -> Vec<poise::Command<Data, Error>> {
    vec![stream()]
}

/// Manage Twitch go-live alerts for this channel
#[poise::command(
    slash_command,
    prefix_command,
    guild_only,
    subcommands("add", "remove", "list"),
    required_permissions = "MANAGE_GUILD",
    category = "Streams"
)]
pub async fn stream(_: Context<'_>) -> CommandResult {
    Ok(())
}

/// Announce in this channel when a Twitch stream goes live
#[poise::command(slash_command, prefix_command, guild_only)]
async fn add(
    ctx: Context<'_>,
    #[description = "Twitch login name (twitch.tv/<login>)"] login: String,
) -> CommandResult {
    let Some(guild_id) = ctx.guild_id() else {
        return Ok(());
    };
    let data = ctx.data();
    if data.twitch.is_none() {
        ctx.send(error_reply(
            "Stream alerts are not configured; the bot owner must set \
             `TWITCH_CLIENT_ID` and `TWITCH_CLIENT_SECRET`.",
        ))
        .await?;
        return Ok(());
    }
    if !valid_login(&login) {
        ctx.send(error_reply("That doesn't look like a Twitch login name."))
            .await?;
        return Ok(());
    }

    if data.db.add_stream_alert(guild_id, ctx.channel_id(), &login)? {
        ctx.send(ok_reply(
            "Stream alert added",
            format!(
                "I'll announce here when **{}** goes live.",
                login.to_lowercase()
            ),
        ))
        .await?;
    } else {
        ctx.send(error_reply(
            "This channel already watches that stream.",
        ))
        .await?;
    }
    Ok(())
}

/// Stop announcing a stream in this channel
#[poise::command(slash_command, prefix_command, guild_only)]
async fn remove(
    ctx: Context<'_>,
    #[description = "Twitch login name"] login: String,
) -> CommandResult {
    let Some(guild_id) = ctx.guild_id() else {
        return Ok(());
    };
    if ctx
        .data()
        .db
        .remove_stream_alert(guild_id, ctx.channel_id(), &login)?
    {
        ctx.send(ok_reply(
            "Stream alert removed",
            format!("No more alerts for **{}** here.", login.to_lowercase()),
        ))
        .await?;
    } else {
        ctx.send(error_reply("This channel doesn't watch that stream."))
            .await?;
    }
    Ok(())
}

/// List the streams watched in this server
#[poise::command(slash_command, prefix_command, guild_only)]
async fn list(ctx: Context<'_>) -> CommandResult {
    let Some(guild_id) = ctx.guild_id() else {
        return Ok(());
    };
    let subs = ctx.data().db.stream_alerts_for_guild(guild_id)?;
    if subs.is_empty() {
        ctx.say("No stream alerts are set up in this server.").await?;
    } else {
        let lines: Vec<String> = subs
            .iter()
            .map(|sub| format!("**{}** → <#{}>", sub.login, sub.channel_id))
            .collect();
        ctx.say(format!("Watched streams:\n{}", lines.join("\n")))
            .await?;
    }
    Ok(())
}

/// Twitch logins: 1-25 characters, alphanumeric or underscore.
fn valid_login(login: &str) -> bool {
    !login.is_empty()
        && login.len() <= 25
        && login
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_validation() {
        assert!(valid_login("streamer_one"));
        assert!(valid_login("A1"));
        assert!(!valid_login(""));
        assert!(!valid_login("has space"));
        assert!(!valid_login("twitch.tv/name"));
        assert!(!valid_login(&"x".repeat(26)));
    }
}
