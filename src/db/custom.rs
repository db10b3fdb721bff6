//! Per-guild custom commands: user-defined trigger/response pairs.
//! Triggers are stored lowercase so dispatch is case-insensitive.

use rusqlite::{OptionalExtension, params};
use serenity::model::id::GuildId;
use thiserror::Error;

use super::Database;

#[derive(Error, Debug)]
pub enum CustomCommandError {
    #[error("that custom command already exists; use `editcom` to change it")]
    AlreadyExists,

    #[error("no custom command with that name exists")]
    NotFound,

    #[error("that name is reserved by a built-in command")]
    ReservedName,

    #[error("database error: {0}")]
    Db(#[from] rusqlite::Error),
}

impl Database {
    pub fn add_custom_command(
        &self,
        guild_id: GuildId,
        trigger: &str,
        response: &str,
    ) -> Result<(), CustomCommandError> {
        let conn = self.lock();
        let inserted = conn.execute(
            "INSERT OR IGNORE INTO custom_commands (guild_id, trigger, response) VALUES (?1, ?2, ?3)",
            params![guild_id.get() as i64, trigger.to_lowercase(), response],
        )?;
        if inserted == 0 {
            return Err(CustomCommandError::AlreadyExists);
        }
        Ok(())
    }

    pub fn edit_custom_command(
        &self,
        guild_id: GuildId,
        trigger: &str,
        response: &str,
    ) -> Result<(), CustomCommandError> {
        let conn = self.lock();
        let updated = conn.execute(
            "UPDATE custom_commands SET response = ?3 WHERE guild_id = ?1 AND trigger = ?2",
            params![guild_id.get() as i64, trigger.to_lowercase(), response],
        )?;
        if updated == 0 {
            return Err(CustomCommandError::NotFound);
        }
        Ok(())
    }

    pub fn remove_custom_command(
        &self,
        guild_id: GuildId,
        trigger: &str,
    ) -> Result<(), CustomCommandError> {
        let conn = self.lock();
        let deleted = conn.execute(
            "DELETE FROM custom_commands WHERE guild_id = ?1 AND trigger = ?2",
            params![guild_id.get() as i64, trigger.to_lowercase()],
        )?;
        if deleted == 0 {
            return Err(CustomCommandError::NotFound);
        }
        Ok(())
    }

    /// Trigger names defined in the guild, alphabetical.
    pub fn list_custom_commands(
        &self,
        guild_id: GuildId,
    ) -> Result<Vec<String>, CustomCommandError> {
        let conn = self.lock();
        let mut stmt = conn.prepare(
            "SELECT trigger FROM custom_commands WHERE guild_id = ?1 ORDER BY trigger ASC",
        )?;
        let rows = stmt.query_map(params![guild_id.get() as i64], |row| row.get(0))?;
        Ok(rows.collect::<Result<_, _>>()?)
    }

    /// Response for a trigger, if defined. Lookup is case-insensitive.
    pub fn custom_command_response(
        &self,
        guild_id: GuildId,
        trigger: &str,
    ) -> Result<Option<String>, CustomCommandError> {
        let conn = self.lock();
        Ok(conn
            .query_row(
                "SELECT response FROM custom_commands WHERE guild_id = ?1 AND trigger = ?2",
                params![guild_id.get() as i64, trigger.to_lowercase()],
                |row| row.get(0),
            )
            .optional()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const GUILD: GuildId = GuildId::new(1);

    #[test]
    fn add_and_dispatch_case_insensitively() {
        let db = Database::open_in_memory().unwrap();
        db.add_custom_command(GUILD, "Hello", "world").unwrap();
        assert_eq!(
            db.custom_command_response(GUILD, "HELLO").unwrap(),
            Some("world".to_string())
        );
    }

    #[test]
    fn duplicate_add_is_rejected() {
        let db = Database::open_in_memory().unwrap();
        db.add_custom_command(GUILD, "hi", "one").unwrap();
        assert!(matches!(
            db.add_custom_command(GUILD, "HI", "two"),
            Err(CustomCommandError::AlreadyExists)
        ));
    }

    #[test]
    fn edit_replaces_response() {
        let db = Database::open_in_memory().unwrap();
        db.add_custom_command(GUILD, "hi", "one").unwrap();
        db.edit_custom_command(GUILD, "hi", "two").unwrap();
        assert_eq!(
            db.custom_command_response(GUILD, "hi").unwrap(),
            Some("two".to_string())
        );
    }

    #[test]
    fn edit_and_remove_require_existing_trigger() {
        let db = Database::open_in_memory().unwrap();
        assert!(matches!(
            db.edit_custom_command(GUILD, "ghost", "x"),
            Err(CustomCommandError::NotFound)
        ));
        assert!(matches!(
            db.remove_custom_command(GUILD, "ghost"),
            Err(CustomCommandError::NotFound)
        ));
    }

    #[test]
    fn list_is_sorted_and_per_guild() {
        let db = Database::open_in_memory().unwrap();
        db.add_custom_command(GUILD, "zeta", "z").unwrap();
        db.add_custom_command(GUILD, "alpha", "a").unwrap();
        db.add_custom_command(GuildId::new(2), "other", "o").unwrap();
        assert_eq!(db.list_custom_commands(GUILD).unwrap(), vec!["alpha", "zeta"]);
    }

    #[test]
    fn remove_deletes_the_trigger() {
        let db = Database::open_in_memory().unwrap();
        db.add_custom_command(GUILD, "hi", "one").unwrap();
        db.remove_custom_command(GUILD, "hi").unwrap();
        assert_eq!(db.custom_command_response(GUILD, "hi").unwrap(), None);
    }
}
