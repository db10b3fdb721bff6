//! Storage for the per-guild moderation word filter. Words are kept
//! lowercase; compilation into regexes happens in the moderation cog.

use rusqlite::{Result as SqlResult, params};
use serenity::model::id::GuildId;

use super::Database;

impl Database {
    /// Returns `false` if the word was already filtered.
    pub fn add_filter_word(&self, guild_id: GuildId, word: &str) -> SqlResult<bool> {
        let conn = self.lock();
        let inserted = conn.execute(
            "INSERT OR IGNORE INTO filter_words (guild_id, word) VALUES (?1, ?2)",
            params![guild_id.get() as i64, word.to_lowercase()],
        )?;
        Ok(inserted > 0)
    }

    /// Returns `false` if the word was not in the filter.
    pub fn remove_filter_word(&self, guild_id: GuildId, word: &str) -> SqlResult<bool> {
        let conn = self.lock();
        let deleted = conn.execute(
            "DELETE FROM filter_words WHERE guild_id = ?1 AND word = ?2",
            params![guild_id.get() as i64, word.to_lowercase()],
        )?;
        Ok(deleted > 0)
    }

    pub fn filter_words(&self, guild_id: GuildId) -> SqlResult<Vec<String>> {
        let conn = self.lock();
        let mut stmt =
            conn.prepare("SELECT word FROM filter_words WHERE guild_id = ?1 ORDER BY word ASC")?;
        let rows = stmt.query_map(params![guild_id.get() as i64], |row| row.get(0))?;
        rows.collect()
    }

    /// Drop every filtered word for the guild; returns how many were removed.
    pub fn clear_filter(&self, guild_id: GuildId) -> SqlResult<usize> {
        let conn = self.lock();
        conn.execute(
            "DELETE FROM filter_words WHERE guild_id = ?1",
            params![guild_id.get() as i64],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const GUILD: GuildId = GuildId::new(1);

    #[test]
    fn add_is_idempotent_and_lowercased() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.add_filter_word(GUILD, "Spam").unwrap());
        assert!(!db.add_filter_word(GUILD, "spam").unwrap());
        assert_eq!(db.filter_words(GUILD).unwrap(), vec!["spam"]);
    }

    #[test]
    fn remove_reports_absence() {
        let db = Database::open_in_memory().unwrap();
        db.add_filter_word(GUILD, "spam").unwrap();
        assert!(db.remove_filter_word(GUILD, "SPAM").unwrap());
        assert!(!db.remove_filter_word(GUILD, "spam").unwrap());
    }

    #[test]
    fn clear_empties_only_this_guild() {
        let db = Database::open_in_memory().unwrap();
        db.add_filter_word(GUILD, "a").unwrap();
        db.add_filter_word(GUILD, "b").unwrap();
        db.add_filter_word(GuildId::new(2), "c").unwrap();
        assert_eq!(db.clear_filter(GUILD).unwrap(), 2);
        assert!(db.filter_words(GUILD).unwrap().is_empty());
        assert_eq!(db.filter_words(GuildId::new(2)).unwrap(), vec!["c"]);
    }
}
