//! Crimson is a self-hosted, plugin-extensible Discord bot. Feature modules
//! ("cogs") contribute chat commands for moderation, trivia, music playback,
//! an economy with a slot machine, per-guild custom commands, auto-expiring
//! gallery channels, and Twitch stream alerts.

use std::sync::{Arc, LazyLock};

pub mod cogs;
pub mod commands;
pub mod config;
pub mod db;
pub mod events;
pub mod utils;

use cogs::CogHost;
use commands::moderation::FilterCache;
use commands::streams::twitch::TwitchClient;
use commands::trivia::session::TriviaHost;
use config::Config;
use db::Database;

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;
pub type CommandResult = Result<(), Error>;

/// Process-wide HTTP client, shared by the stream-alert poller and the
/// music audio sources.
pub static HTTP_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(reqwest::Client::new);

/// Shared state available to every command invocation and event hook.
pub struct Data {
    pub config: Config,
    pub db: Arc<Database>,
    pub cogs: CogHost,
    pub filters: FilterCache,
    pub trivia: Arc<TriviaHost>,
    pub twitch: Option<Arc<TwitchClient>>,
}
