//! Storage for gallery channels: channels whose non-image, non-pinned
//! posts expire after a per-channel lifetime.

use rusqlite::{Result as SqlResult, params};
use serenity::model::id::{ChannelId, GuildId};

use super::Database;

/// One configured gallery channel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GalleryChannel {
    pub guild_id: u64,
    pub channel_id: u64,
    /// Lifetime of non-image posts, in seconds.
    pub expiry_secs: i64,
}

impl Database {
    /// Configure (or reconfigure) a channel as a gallery.
    pub fn set_gallery_channel(
        &self,
        guild_id: GuildId,
        channel_id: ChannelId,
        expiry_secs: i64,
    ) -> SqlResult<()> {
        let conn = self.lock();
        conn.execute(
            "INSERT OR REPLACE INTO gallery_channels (guild_id, channel_id, expiry_secs)
             VALUES (?1, ?2, ?3)",
            params![guild_id.get() as i64, channel_id.get() as i64, expiry_secs],
        )?;
        Ok(())
    }

    /// Returns `false` if the channel was not a gallery.
    pub fn remove_gallery_channel(&self, channel_id: ChannelId) -> SqlResult<bool> {
        let conn = self.lock();
        let deleted = conn.execute(
            "DELETE FROM gallery_channels WHERE channel_id = ?1",
            params![channel_id.get() as i64],
        )?;
        Ok(deleted > 0)
    }

    /// Gallery channels in a guild, for `gallery list`.
    pub fn gallery_channels_for_guild(&self, guild_id: GuildId) -> SqlResult<Vec<GalleryChannel>> {
        let conn = self.lock();
        let mut stmt = conn.prepare(
            "SELECT guild_id, channel_id, expiry_secs FROM gallery_channels
             WHERE guild_id = ?1 ORDER BY channel_id ASC",
        )?;
        let rows = stmt.query_map(params![guild_id.get() as i64], row_to_gallery)?;
        rows.collect()
    }

    /// Every gallery channel, for the sweeper.
    pub fn gallery_channels(&self) -> SqlResult<Vec<GalleryChannel>> {
        let conn = self.lock();
        let mut stmt =
            conn.prepare("SELECT guild_id, channel_id, expiry_secs FROM gallery_channels")?;
        let rows = stmt.query_map([], row_to_gallery)?;
        rows.collect()
    }
}

fn row_to_gallery(row: &rusqlite::Row<'_>) -> SqlResult<GalleryChannel> {
    Ok(GalleryChannel {
        guild_id: row.get::<_, i64>(0)? as u64,
        channel_id: row.get::<_, i64>(1)? as u64,
        expiry_secs: row.get(2)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const GUILD: GuildId = GuildId::new(1);
    const CHANNEL: ChannelId = ChannelId::new(100);

    #[test]
    fn configure_and_list() {
        let db = Database::open_in_memory().unwrap();
        db.set_gallery_channel(GUILD, CHANNEL, 3600).unwrap();
        db.set_gallery_channel(GuildId::new(2), ChannelId::new(200), 60)
            .unwrap();
        assert_eq!(
            db.gallery_channels_for_guild(GUILD).unwrap(),
            vec![GalleryChannel {
                guild_id: GUILD.get(),
                channel_id: CHANNEL.get(),
                expiry_secs: 3600,
            }]
        );
        assert_eq!(db.gallery_channels().unwrap().len(), 2);
    }

    #[test]
    fn reconfigure_replaces_expiry() {
        let db = Database::open_in_memory().unwrap();
        db.set_gallery_channel(GUILD, CHANNEL, 3600).unwrap();
        db.set_gallery_channel(GUILD, CHANNEL, 7200).unwrap();
        let channels = db.gallery_channels_for_guild(GUILD).unwrap();
        assert_eq!(channels.len(), 1);
        assert_eq!(channels[0].expiry_secs, 7200);
    }

    #[test]
    fn remove_reports_absence() {
        let db = Database::open_in_memory().unwrap();
        db.set_gallery_channel(GUILD, CHANNEL, 3600).unwrap();
        assert!(db.remove_gallery_channel(CHANNEL).unwrap());
        assert!(!db.remove_gallery_channel(CHANNEL).unwrap());
        assert!(db.gallery_channels().unwrap().is_empty());
    }
}
