//! SQLite persistence for the bot. A single [`Database`] handle is shared
//! through the command data; each domain (economy, settings, custom
//! commands, filter, stream alerts, gallery channels, cog state) keeps its
//! queries in its own submodule.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{Connection, Result as SqlResult};

pub mod cogs;
pub mod custom;
pub mod economy;
pub mod filter;
pub mod gallery;
pub mod settings;
pub mod streams;

pub use custom::CustomCommandError;
pub use economy::EconomyError;
pub use gallery::GalleryChannel;
pub use settings::GuildSettings;
pub use streams::StreamSub;

/// Handle to the bot's SQLite database. The connection is guarded by a
/// mutex; every query helper is synchronous and never held across an await.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open (or create) the database file and run migrations.
    pub fn open<P: AsRef<Path>>(path: P) -> SqlResult<Self> {
        let conn = Connection::open(path)?;
        Self::migrate(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// In-memory database, used by tests.
    pub fn open_in_memory() -> SqlResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::migrate(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn migrate(conn: &Connection) -> SqlResult<()> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS guild_settings (
                guild_id INTEGER NOT NULL,
                key      TEXT NOT NULL,
                value    TEXT NOT NULL,
                PRIMARY KEY (guild_id, key)
            );
            CREATE TABLE IF NOT EXISTS disabled_cogs (
                guild_id INTEGER NOT NULL,
                cog      TEXT NOT NULL,
                PRIMARY KEY (guild_id, cog)
            );
            CREATE TABLE IF NOT EXISTS economy_accounts (
                guild_id    INTEGER NOT NULL,
                user_id     INTEGER NOT NULL,
                balance     INTEGER NOT NULL,
                last_payday INTEGER NOT NULL DEFAULT 0,
                PRIMARY KEY (guild_id, user_id)
            );
            CREATE TABLE IF NOT EXISTS custom_commands (
                guild_id INTEGER NOT NULL,
                trigger  TEXT NOT NULL,
                response TEXT NOT NULL,
                PRIMARY KEY (guild_id, trigger)
            );
            CREATE TABLE IF NOT EXISTS filter_words (
                guild_id INTEGER NOT NULL,
                word     TEXT NOT NULL,
                PRIMARY KEY (guild_id, word)
            );
            CREATE TABLE IF NOT EXISTS stream_alerts (
                guild_id   INTEGER NOT NULL,
                channel_id INTEGER NOT NULL,
                login      TEXT NOT NULL,
                PRIMARY KEY (channel_id, login)
            );
            CREATE TABLE IF NOT EXISTS gallery_channels (
                guild_id    INTEGER NOT NULL,
                channel_id  INTEGER NOT NULL,
                expiry_secs INTEGER NOT NULL,
                PRIMARY KEY (channel_id)
            );",
        )
    }

    /// Lock the connection. A poisoned mutex is recovered rather than
    /// propagated; SQLite state is consistent per statement.
    pub(crate) fn lock(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_idempotent() {
        let db = Database::open_in_memory().expect("open in-memory db");
        let conn = db.lock();
        Database::migrate(&conn).expect("second migration run");
    }

    #[test]
    fn tables_exist_after_open() {
        let db = Database::open_in_memory().expect("open in-memory db");
        let conn = db.lock();
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table'",
                [],
                |row| row.get(0),
            )
            .expect("count tables");
        assert_eq!(count, 7);
    }
}
