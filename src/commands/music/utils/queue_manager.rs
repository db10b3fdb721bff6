//! Per-guild metadata mirror of songbird's built-in track queue. Songbird
//! owns playback order; this mirror holds the titles and durations the
//! `queue` command displays. Front of the deque is the playing track.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, LazyLock};
use std::time::Duration;

use serenity::async_trait;
use serenity::model::id::GuildId;
use songbird::input::AuxMetadata;
use tokio::sync::Mutex;

/// Display metadata for one queued track.
#[derive(Clone, Debug)]
pub struct TrackMetadata {
    pub title: String,
    pub url: Option<String>,
    pub duration: Option<Duration>,
    pub requested_by: String,
}

impl TrackMetadata {
    pub fn from_aux(aux: AuxMetadata, requested_by: String) -> Self {
        Self {
            title: aux.title.unwrap_or_else(|| "Unknown title".to_string()),
            url: aux.source_url,
            duration: aux.duration,
            requested_by,
        }
    }
}

/// Manages the queue metadata for each guild.
pub struct QueueManager {
    queues: HashMap<GuildId, VecDeque<TrackMetadata>>,
}

impl QueueManager {
    pub fn new() -> Self {
        Self {
            queues: HashMap::new(),
        }
    }

    /// Append a track; returns its position (0 = now playing).
    pub fn push(&mut self, guild_id: GuildId, metadata: TrackMetadata) -> usize {
        let queue = self.queues.entry(guild_id).or_default();
        queue.push_back(metadata);
        queue.len() - 1
    }

    /// A track finished or was skipped; drop the front entry.
    pub fn advance(&mut self, guild_id: GuildId) -> Option<TrackMetadata> {
        self.queues.get_mut(&guild_id)?.pop_front()
    }

    /// The currently playing track, if any.
    pub fn current(&self, guild_id: GuildId) -> Option<&TrackMetadata> {
        self.queues.get(&guild_id)?.front()
    }

    pub fn clear(&mut self, guild_id: GuildId) {
        self.queues.remove(&guild_id);
    }

    pub fn len(&self, guild_id: GuildId) -> usize {
        self.queues.get(&guild_id).map_or(0, VecDeque::len)
    }

    pub fn is_empty(&self, guild_id: GuildId) -> bool {
        self.len(guild_id) == 0
    }

    /// Clone of the guild's queue, playing track first.
    pub fn snapshot(&self, guild_id: GuildId) -> Vec<TrackMetadata> {
        self.queues
            .get(&guild_id)
            .map(|queue| queue.iter().cloned().collect())
            .unwrap_or_default()
    }
}

impl Default for QueueManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Global queue-metadata mirror, shared by commands and track-end events.
pub static QUEUE_METADATA: LazyLock<Arc<Mutex<QueueManager>>> =
    LazyLock::new(|| Arc::new(Mutex::new(QueueManager::new())));

/// Keeps the mirror in sync when a track ends (naturally or skipped).
pub struct SongEndNotifier {
    pub guild_id: GuildId,
}

#[async_trait]
impl songbird::EventHandler for SongEndNotifier {
    async fn act(&self, _ctx: &songbird::EventContext<'_>) -> Option<songbird::Event> {
        QUEUE_METADATA.lock().await.advance(self.guild_id);
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const GUILD: GuildId = GuildId::new(1);

    fn meta(title: &str) -> TrackMetadata {
        TrackMetadata {
            title: title.to_string(),
            url: None,
            duration: None,
            requested_by: "tester".to_string(),
        }
    }

    #[test]
    fn push_reports_position() {
        let mut qm = QueueManager::new();
        assert_eq!(qm.push(GUILD, meta("a")), 0);
        assert_eq!(qm.push(GUILD, meta("b")), 1);
        assert_eq!(qm.current(GUILD).unwrap().title, "a");
    }

    #[test]
    fn advance_moves_to_next_track() {
        let mut qm = QueueManager::new();
        qm.push(GUILD, meta("a"));
        qm.push(GUILD, meta("b"));
        assert_eq!(qm.advance(GUILD).unwrap().title, "a");
        assert_eq!(qm.current(GUILD).unwrap().title, "b");
        assert_eq!(qm.len(GUILD), 1);
    }

    #[test]
    fn advance_on_empty_is_none() {
        let mut qm = QueueManager::new();
        assert!(qm.advance(GUILD).is_none());
        qm.clear(GUILD); // also a no-op
        assert!(qm.is_empty(GUILD));
    }

    #[test]
    fn snapshot_preserves_order_and_guild_isolation() {
        let mut qm = QueueManager::new();
        qm.push(GUILD, meta("a"));
        qm.push(GUILD, meta("b"));
        qm.push(GuildId::new(2), meta("other"));
        let snapshot = qm.snapshot(GUILD);
        let titles: Vec<&str> = snapshot.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b"]);
    }
}
