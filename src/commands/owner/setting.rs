use poise::CreateReply;
use poise::serenity_prelude::CreateEmbed;
use tracing::info;

use crate::commands::{error_reply, ok_reply};
use crate::db::GuildSettings;
use crate::db::settings::SETTING_KEYS;
use crate::{CommandResult, Context};

/// Show or change this server's settings
#[poise::command(
    slash_command,
    prefix_command,
    guild_only,
    required_permissions = "MANAGE_GUILD",
    category = "Owner"
)]
pub async fn setting(
    ctx: Context<'_>,
    #[description = "Setting name"] name: Option<String>,
    #[description = "New value"]
    #[rest]
    value: Option<String>,
) -> CommandResult {
    let Some(guild_id) = ctx.guild_id() else {
        return Ok(());
    };
    let data = ctx.data();
    let current = data.db.guild_settings(guild_id)?;

    let Some(name) = name else {
        // No arguments: show everything.
        let prefix = current
            .prefix
            .clone()
            .unwrap_or_else(|| data.config.prefix.clone());
        let body = format!(
            "**prefix** — `{prefix}`\n\
             **payday_amount** — {}\n\
             **payday_cooldown** — {}s\n\
             **slot_min** — {}\n\
             **slot_max** — {}",
            current.payday_amount, current.payday_cooldown, current.slot_min, current.slot_max
        );
        ctx.send(
            CreateReply::default().embed(
                CreateEmbed::new()
                    .title("Server settings")
                    .description(body)
                    .color(0x3498db),
            ),
        )
        .await?;
        return Ok(());
    };

    let name = name.to_lowercase();
    if !SETTING_KEYS.contains(&name.as_str()) {
        ctx.send(error_reply(format!(
            "Unknown setting `{name}`. Known settings: {}.",
            SETTING_KEYS.join(", ")
        )))
        .await?;
        return Ok(());
    }

    let Some(value) = value else {
        let shown = data
            .db
            .guild_setting(guild_id, &name)?
            .unwrap_or_else(|| "(default)".to_string());
        ctx.say(format!("`{name}` is currently `{shown}`.")).await?;
        return Ok(());
    };

    match validate_setting(&name, &value, &current) {
        Ok(normalized) => {
            data.db.set_guild_setting(guild_id, &name, &normalized)?;
            info!(guild = guild_id.get(), setting = %name, value = %normalized, "setting changed");
            ctx.send(ok_reply(
                "Setting changed",
                format!("`{name}` is now `{normalized}`."),
            ))
            .await?;
        }
        Err(reason) => {
            ctx.send(error_reply(reason)).await?;
        }
    }
    Ok(())
}

/// Validate and normalize a setting value. Returns the string to store,
/// or a user-facing rejection reason.
fn validate_setting(
    name: &str,
    value: &str,
    current: &GuildSettings,
) -> Result<String, String> {
    let value = value.trim();
    match name {
        "prefix" => {
            if value.is_empty() || value.len() > 5 {
                return Err("Prefix must be 1-5 characters.".to_string());
            }
            if value.chars().any(char::is_whitespace) {
                return Err("Prefix can't contain whitespace.".to_string());
            }
            Ok(value.to_string())
        }
        "payday_amount" => parse_range(value, 1, 1_000_000),
        "payday_cooldown" => parse_range(value, 0, 604_800),
        "slot_min" => {
            let parsed = parse_range(value, 1, 1_000_000)?;
            if parsed.parse::<i64>().unwrap_or(0) > current.slot_max {
                return Err(format!(
                    "slot_min can't exceed slot_max ({}).",
                    current.slot_max
                ));
            }
            Ok(parsed)
        }
        "slot_max" => {
            let parsed = parse_range(value, 1, 1_000_000)?;
            if parsed.parse::<i64>().unwrap_or(0) < current.slot_min {
                return Err(format!(
                    "slot_max can't be below slot_min ({}).",
                    current.slot_min
                ));
            }
            Ok(parsed)
        }
        _ => Err(format!("Unknown setting `{name}`.")),
    }
}

fn parse_range(value: &str, min: i64, max: i64) -> Result<String, String> {
    match value.parse::<i64>() {
        Ok(n) if (min..=max).contains(&n) => Ok(n.to_string()),
        Ok(_) => Err(format!("Value must be between {min} and {max}.")),
        Err(_) => Err("Value must be a whole number.".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn current() -> GuildSettings {
        GuildSettings::default()
    }

    #[test]
    fn prefix_rules() {
        assert_eq!(validate_setting("prefix", "?", &current()), Ok("?".to_string()));
        assert_eq!(
            validate_setting("prefix", "red!", &current()),
            Ok("red!".to_string())
        );
        assert!(validate_setting("prefix", "", &current()).is_err());
        assert!(validate_setting("prefix", "toolong", &current()).is_err());
        assert!(validate_setting("prefix", "a b", &current()).is_err());
    }

    #[test]
    fn numeric_ranges() {
        assert_eq!(
            validate_setting("payday_amount", "250", &current()),
            Ok("250".to_string())
        );
        assert!(validate_setting("payday_amount", "0", &current()).is_err());
        assert!(validate_setting("payday_amount", "lots", &current()).is_err());
        assert_eq!(
            validate_setting("payday_cooldown", "0", &current()),
            Ok("0".to_string())
        );
    }

    #[test]
    fn slot_bounds_stay_ordered() {
        // Defaults: min 5, max 100.
        assert!(validate_setting("slot_min", "101", &current()).is_err());
        assert!(validate_setting("slot_max", "4", &current()).is_err());
        assert_eq!(
            validate_setting("slot_min", "10", &current()),
            Ok("10".to_string())
        );
    }

    #[test]
    fn slot_bounds_are_capped() {
        // A bid at the cap times the top payout multiplier must fit in i64.
        assert!(validate_setting("slot_max", &i64::MAX.to_string(), &current()).is_err());
        assert!(validate_setting("slot_max", "1000001", &current()).is_err());
        let mut wide = current();
        wide.slot_min = 1;
        assert_eq!(
            validate_setting("slot_max", "1000000", &wide),
            Ok("1000000".to_string())
        );
    }
}
