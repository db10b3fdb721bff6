//! Storage for Twitch stream-alert subscriptions: which logins announce
//! into which channels. Logins are kept lowercase to match Helix.

use rusqlite::{Result as SqlResult, params};
use serenity::model::id::{ChannelId, GuildId};

use super::Database;

/// One stream-alert subscription row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StreamSub {
    pub guild_id: u64,
    pub channel_id: u64,
    pub login: String,
}

impl Database {
    /// Returns `false` if the channel was already subscribed to the login.
    pub fn add_stream_alert(
        &self,
        guild_id: GuildId,
        channel_id: ChannelId,
        login: &str,
    ) -> SqlResult<bool> {
        let conn = self.lock();
        let inserted = conn.execute(
            "INSERT OR IGNORE INTO stream_alerts (guild_id, channel_id, login) VALUES (?1, ?2, ?3)",
            params![
                guild_id.get() as i64,
                channel_id.get() as i64,
                login.to_lowercase()
            ],
        )?;
        Ok(inserted > 0)
    }

    /// Returns `false` if no such subscription existed.
    pub fn remove_stream_alert(
        &self,
        guild_id: GuildId,
        channel_id: ChannelId,
        login: &str,
    ) -> SqlResult<bool> {
        let conn = self.lock();
        let deleted = conn.execute(
            "DELETE FROM stream_alerts WHERE guild_id = ?1 AND channel_id = ?2 AND login = ?3",
            params![
                guild_id.get() as i64,
                channel_id.get() as i64,
                login.to_lowercase()
            ],
        )?;
        Ok(deleted > 0)
    }

    /// Subscriptions in a guild, for `stream list`.
    pub fn stream_alerts_for_guild(&self, guild_id: GuildId) -> SqlResult<Vec<StreamSub>> {
        let conn = self.lock();
        let mut stmt = conn.prepare(
            "SELECT guild_id, channel_id, login FROM stream_alerts
             WHERE guild_id = ?1 ORDER BY login ASC",
        )?;
        let rows = stmt.query_map(params![guild_id.get() as i64], row_to_sub)?;
        rows.collect()
    }

    /// Every subscription in the database, for the poller.
    pub fn all_stream_alerts(&self) -> SqlResult<Vec<StreamSub>> {
        let conn = self.lock();
        let mut stmt =
            conn.prepare("SELECT guild_id, channel_id, login FROM stream_alerts")?;
        let rows = stmt.query_map([], row_to_sub)?;
        rows.collect()
    }
}

fn row_to_sub(row: &rusqlite::Row<'_>) -> SqlResult<StreamSub> {
    Ok(StreamSub {
        guild_id: row.get::<_, i64>(0)? as u64,
        channel_id: row.get::<_, i64>(1)? as u64,
        login: row.get(2)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const GUILD: GuildId = GuildId::new(1);
    const CHANNEL: ChannelId = ChannelId::new(100);

    #[test]
    fn add_lowercases_and_deduplicates() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.add_stream_alert(GUILD, CHANNEL, "StreamerOne").unwrap());
        assert!(!db.add_stream_alert(GUILD, CHANNEL, "streamerone").unwrap());
        let subs = db.stream_alerts_for_guild(GUILD).unwrap();
        assert_eq!(subs.len(), 1);
        assert_eq!(subs[0].login, "streamerone");
    }

    #[test]
    fn same_login_in_two_channels() {
        let db = Database::open_in_memory().unwrap();
        db.add_stream_alert(GUILD, CHANNEL, "one").unwrap();
        db.add_stream_alert(GUILD, ChannelId::new(200), "one").unwrap();
        assert_eq!(db.all_stream_alerts().unwrap().len(), 2);
    }

    #[test]
    fn remove_is_scoped_to_channel() {
        let db = Database::open_in_memory().unwrap();
        db.add_stream_alert(GUILD, CHANNEL, "one").unwrap();
        assert!(!db
            .remove_stream_alert(GUILD, ChannelId::new(200), "one")
            .unwrap());
        assert!(db.remove_stream_alert(GUILD, CHANNEL, "ONE").unwrap());
        assert!(db.stream_alerts_for_guild(GUILD).unwrap().is_empty());
    }
}
