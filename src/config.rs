//! Bot configuration, assembled once at startup from the environment
//! (plus a `.env` file loaded by `main`).

use std::env;
use std::path::PathBuf;

use thiserror::Error;

/// Default command prefix when neither the environment nor a guild
/// setting overrides it.
pub const DEFAULT_PREFIX: &str = "!";
/// Default path of the SQLite database file.
pub const DEFAULT_DB_PATH: &str = "crimson.db";
/// Default directory holding trivia question lists.
pub const DEFAULT_TRIVIA_DIR: &str = "data/trivia";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing DISCORD_TOKEN in environment")]
    MissingToken,
}

/// Twitch application credentials for the stream-alert poller.
#[derive(Clone, Debug)]
pub struct TwitchCredentials {
    pub client_id: String,
    pub client_secret: String,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub token: String,
    pub db_path: PathBuf,
    pub prefix: String,
    pub trivia_dir: PathBuf,
    pub twitch: Option<TwitchCredentials>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let token = env::var("DISCORD_TOKEN").map_err(|_| ConfigError::MissingToken)?;

        let twitch = match (env::var("TWITCH_CLIENT_ID"), env::var("TWITCH_CLIENT_SECRET")) {
            (Ok(client_id), Ok(client_secret)) => Some(TwitchCredentials {
                client_id,
                client_secret,
            }),
            _ => None,
        };

        Ok(Self {
            token,
            db_path: env::var("CRIMSON_DB")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_DB_PATH)),
            prefix: env::var("CRIMSON_PREFIX").unwrap_or_else(|_| DEFAULT_PREFIX.to_string()),
            trivia_dir: env::var("CRIMSON_TRIVIA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_TRIVIA_DIR)),
            twitch,
        })
    }
}
