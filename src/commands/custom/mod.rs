//! The customcom cog: per-guild trigger/response commands. Mutations go
//! through `addcom`/`editcom`/`delcom`; dispatch happens from the message
//! event hook so triggers behave like prefix commands.

use poise::serenity_prelude as serenity;
use serenity::all::Message;
use tracing::debug;

use crate::commands::{error_reply, ok_reply};
use crate::db::CustomCommandError;
use crate::{CommandResult, Context, Data, Error};

pub fn commands() -> Vec<poise::Command<Data, Error>> {
    vec![addcom(), editcom(), delcom(), listcom()]
}

/// Add a custom command to this server
#[poise::command(
    slash_command,
    prefix_command,
    guild_only,
    required_permissions = "MANAGE_GUILD",
    category = "CustomCom"
)]
pub async fn addcom(
    ctx: Context<'_>,
    #[description = "Trigger word"] trigger: String,
    #[description = "Response text"]
    #[rest]
    response: String,
) -> CommandResult {
    let Some(guild_id) = ctx.guild_id() else {
        return Ok(());
    };

    // Built-in commands can't be shadowed.
    if is_reserved(&ctx.framework().options().commands, &trigger) {
        ctx.send(error_reply(CustomCommandError::ReservedName.to_string()))
            .await?;
        return Ok(());
    }

    match ctx.data().db.add_custom_command(guild_id, &trigger, &response) {
        Ok(()) => {
            debug!(guild = guild_id.get(), %trigger, "custom command added");
            ctx.send(ok_reply(
                "Custom command added",
                format!("`{}{}` is ready to use.", ctx.prefix(), trigger.to_lowercase()),
            ))
            .await?;
        }
        Err(e @ CustomCommandError::AlreadyExists) => {
            ctx.send(error_reply(e.to_string())).await?;
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

/// Change the response of an existing custom command
#[poise::command(
    slash_command,
    prefix_command,
    guild_only,
    required_permissions = "MANAGE_GUILD",
    category = "CustomCom"
)]
pub async fn editcom(
    ctx: Context<'_>,
    #[description = "Trigger word"] trigger: String,
    #[description = "New response text"]
    #[rest]
    response: String,
) -> CommandResult {
    let Some(guild_id) = ctx.guild_id() else {
        return Ok(());
    };
    match ctx.data().db.edit_custom_command(guild_id, &trigger, &response) {
        Ok(()) => {
            ctx.send(ok_reply(
                "Custom command updated",
                format!("`{}` now has a new response.", trigger.to_lowercase()),
            ))
            .await?;
        }
        Err(e @ CustomCommandError::NotFound) => {
            ctx.send(error_reply(e.to_string())).await?;
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

/// Delete a custom command
#[poise::command(
    slash_command,
    prefix_command,
    guild_only,
    required_permissions = "MANAGE_GUILD",
    category = "CustomCom"
)]
pub async fn delcom(
    ctx: Context<'_>,
    #[description = "Trigger word"] trigger: String,
) -> CommandResult {
    let Some(guild_id) = ctx.guild_id() else {
        return Ok(());
    };
    match ctx.data().db.remove_custom_command(guild_id, &trigger) {
        Ok(()) => {
            ctx.send(ok_reply(
                "Custom command removed",
                format!("`{}` is gone.", trigger.to_lowercase()),
            ))
            .await?;
        }
        Err(e @ CustomCommandError::NotFound) => {
            ctx.send(error_reply(e.to_string())).await?;
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

/// List this server's custom commands
#[poise::command(slash_command, prefix_command, guild_only, category = "CustomCom")]
pub async fn listcom(ctx: Context<'_>) -> CommandResult {
    let Some(guild_id) = ctx.guild_id() else {
        return Ok(());
    };
    let triggers = ctx.data().db.list_custom_commands(guild_id)?;
    if triggers.is_empty() {
        ctx.say("No custom commands here yet. Add one with `addcom`.")
            .await?;
    } else {
        ctx.say(format!("Custom commands: {}", triggers.join(", ")))
            .await?;
    }
    Ok(())
}

/// Answer a message that invokes a custom command. Returns `true` when a
/// response was sent.
pub async fn dispatch(
    ctx: &serenity::Context,
    data: &Data,
    msg: &Message,
) -> Result<bool, Error> {
    let Some(guild_id) = msg.guild_id else {
        return Ok(false);
    };
    let prefix = data
        .db
        .guild_prefix(guild_id)?
        .unwrap_or_else(|| data.config.prefix.clone());
    let Some(trigger) = extract_trigger(&msg.content, &prefix) else {
        return Ok(false);
    };
    let Some(response) = data.db.custom_command_response(guild_id, trigger)? else {
        return Ok(false);
    };
    debug!(guild = guild_id.get(), trigger, "custom command dispatched");
    msg.channel_id.say(&ctx.http, response).await?;
    Ok(true)
}

/// Whether a trigger matches a registered command name or alias. The
/// message hook answers triggers after built-in dispatch, so a shadowed
/// name would respond twice.
fn is_reserved(commands: &[poise::Command<Data, Error>], trigger: &str) -> bool {
    commands.iter().any(|c| {
        c.name.eq_ignore_ascii_case(trigger)
            || c.aliases.iter().any(|a| a.eq_ignore_ascii_case(trigger))
    })
}

/// First token of a prefixed message, or `None` if the prefix is absent.
fn extract_trigger<'a>(content: &'a str, prefix: &str) -> Option<&'a str> {
    let stripped = content.strip_prefix(prefix)?;
    let trigger = stripped.split_whitespace().next()?;
    Some(trigger)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn extracts_first_token() {
        assert_eq!(extract_trigger("!hello there", "!"), Some("hello"));
        assert_eq!(extract_trigger("!hello", "!"), Some("hello"));
    }

    #[test]
    fn requires_the_prefix() {
        assert_eq!(extract_trigger("hello", "!"), None);
        assert_eq!(extract_trigger("?hello", "!"), None);
    }

    #[test]
    fn bare_prefix_is_not_a_trigger() {
        assert_eq!(extract_trigger("!", "!"), None);
        assert_eq!(extract_trigger("!   ", "!"), None);
    }

    #[test]
    fn multichar_prefixes_work() {
        assert_eq!(extract_trigger("red!roll 6", "red!"), Some("roll"));
    }

    #[test]
    fn aliases_are_reserved_too() {
        let commands: Vec<_> = crate::cogs::registry()
            .into_iter()
            .flat_map(|cog| (cog.commands)())
            .collect();
        assert!(is_reserved(&commands, "eightball"));
        assert!(is_reserved(&commands, "8ball")); // alias
        assert!(is_reserved(&commands, "PING"));
        assert!(!is_reserved(&commands, "greet"));
    }
}
