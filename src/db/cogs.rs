//! Persisted per-guild cog state. Only disabled cogs are stored; absence
//! means enabled.

use rusqlite::{Result as SqlResult, params};
use serenity::model::id::GuildId;

use super::Database;

impl Database {
    pub fn set_cog_disabled(
        &self,
        guild_id: GuildId,
        cog: &str,
        disabled: bool,
    ) -> SqlResult<()> {
        let conn = self.lock();
        if disabled {
            conn.execute(
                "INSERT OR IGNORE INTO disabled_cogs (guild_id, cog) VALUES (?1, ?2)",
                params![guild_id.get() as i64, cog],
            )?;
        } else {
            conn.execute(
                "DELETE FROM disabled_cogs WHERE guild_id = ?1 AND cog = ?2",
                params![guild_id.get() as i64, cog],
            )?;
        }
        Ok(())
    }

    /// Every (guild, cog) pair currently disabled, for warming the
    /// in-memory cache at startup.
    pub fn disabled_cogs(&self) -> SqlResult<Vec<(u64, String)>> {
        let conn = self.lock();
        let mut stmt = conn.prepare("SELECT guild_id, cog FROM disabled_cogs")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, i64>(0)? as u64, row.get::<_, String>(1)?))
        })?;
        rows.collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const GUILD: GuildId = GuildId::new(1);

    #[test]
    fn disable_then_reenable() {
        let db = Database::open_in_memory().unwrap();
        db.set_cog_disabled(GUILD, "economy", true).unwrap();
        assert_eq!(
            db.disabled_cogs().unwrap(),
            vec![(GUILD.get(), "economy".to_string())]
        );
        db.set_cog_disabled(GUILD, "economy", false).unwrap();
        assert!(db.disabled_cogs().unwrap().is_empty());
    }

    #[test]
    fn disabling_twice_keeps_one_row() {
        let db = Database::open_in_memory().unwrap();
        db.set_cog_disabled(GUILD, "trivia", true).unwrap();
        db.set_cog_disabled(GUILD, "trivia", true).unwrap();
        assert_eq!(db.disabled_cogs().unwrap().len(), 1);
    }
}
