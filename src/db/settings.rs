//! Per-guild settings stored as a key/value table, with typed accessors
//! and compiled-in defaults.

use rusqlite::{OptionalExtension, Result as SqlResult, params};
use serenity::model::id::GuildId;

use super::Database;

pub const DEFAULT_PAYDAY_AMOUNT: i64 = 120;
pub const DEFAULT_PAYDAY_COOLDOWN: i64 = 300;
pub const DEFAULT_SLOT_MIN: i64 = 5;
pub const DEFAULT_SLOT_MAX: i64 = 100;

/// Setting keys the `setting` command accepts.
pub const SETTING_KEYS: &[&str] = &[
    "prefix",
    "payday_amount",
    "payday_cooldown",
    "slot_min",
    "slot_max",
];

/// Typed view of a guild's settings, with defaults filled in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GuildSettings {
    /// Per-guild prefix override; `None` means the global default applies.
    pub prefix: Option<String>,
    pub payday_amount: i64,
    pub payday_cooldown: i64,
    pub slot_min: i64,
    pub slot_max: i64,
}

impl Default for GuildSettings {
    fn default() -> Self {
        Self {
            prefix: None,
            payday_amount: DEFAULT_PAYDAY_AMOUNT,
            payday_cooldown: DEFAULT_PAYDAY_COOLDOWN,
            slot_min: DEFAULT_SLOT_MIN,
            slot_max: DEFAULT_SLOT_MAX,
        }
    }
}

impl Database {
    pub fn guild_setting(&self, guild_id: GuildId, key: &str) -> SqlResult<Option<String>> {
        let conn = self.lock();
        conn.query_row(
            "SELECT value FROM guild_settings WHERE guild_id = ?1 AND key = ?2",
            params![guild_id.get() as i64, key],
            |row| row.get(0),
        )
        .optional()
    }

    pub fn set_guild_setting(&self, guild_id: GuildId, key: &str, value: &str) -> SqlResult<()> {
        let conn = self.lock();
        conn.execute(
            "INSERT OR REPLACE INTO guild_settings (guild_id, key, value) VALUES (?1, ?2, ?3)",
            params![guild_id.get() as i64, key, value],
        )?;
        Ok(())
    }

    /// The guild's prefix override, if any. Consulted by the dynamic
    /// prefix hook on every prefix-command message.
    pub fn guild_prefix(&self, guild_id: GuildId) -> SqlResult<Option<String>> {
        self.guild_setting(guild_id, "prefix")
    }

    /// All settings for a guild, defaults applied for missing or
    /// unparseable values.
    pub fn guild_settings(&self, guild_id: GuildId) -> SqlResult<GuildSettings> {
        let mut settings = GuildSettings::default();
        let conn = self.lock();
        let mut stmt =
            conn.prepare("SELECT key, value FROM guild_settings WHERE guild_id = ?1")?;
        let rows = stmt.query_map(params![guild_id.get() as i64], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;
        for row in rows {
            let (key, value) = row?;
            match key.as_str() {
                "prefix" => settings.prefix = Some(value),
                "payday_amount" => {
                    settings.payday_amount = value.parse().unwrap_or(DEFAULT_PAYDAY_AMOUNT)
                }
                "payday_cooldown" => {
                    settings.payday_cooldown = value.parse().unwrap_or(DEFAULT_PAYDAY_COOLDOWN)
                }
                "slot_min" => settings.slot_min = value.parse().unwrap_or(DEFAULT_SLOT_MIN),
                "slot_max" => settings.slot_max = value.parse().unwrap_or(DEFAULT_SLOT_MAX),
                _ => {}
            }
        }
        Ok(settings)
    }
}
