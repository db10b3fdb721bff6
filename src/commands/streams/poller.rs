//! Background task announcing Twitch go-live transitions. The live set
//! only changes after a successful poll, so a transient Helix failure
//! never causes a re-announce.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use poise::serenity_prelude as serenity;
use serenity::all::{ChannelId, CreateEmbed, CreateMessage};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use super::twitch::{LiveStream, TwitchClient};
use crate::Error;
use crate::db::Database;

pub const POLL_INTERVAL: Duration = Duration::from_secs(60);

pub fn spawn(ctx: serenity::Context, db: Arc<Database>, twitch: Arc<TwitchClient>) {
    tokio::spawn(async move {
        info!("stream alert poller started");
        let mut live: HashSet<String> = HashSet::new();
        let mut interval = tokio::time::interval(POLL_INTERVAL);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            if let Err(e) = poll_once(&ctx, &db, &twitch, &mut live).await {
                warn!("stream poll failed: {e}");
            }
        }
    });
}

async fn poll_once(
    ctx: &serenity::Context,
    db: &Database,
    twitch: &TwitchClient,
    live: &mut HashSet<String>,
) -> Result<(), Error> {
    let subs = db.all_stream_alerts()?;
    if subs.is_empty() {
        live.clear();
        return Ok(());
    }

    let logins: Vec<String> = subs
        .iter()
        .map(|sub| sub.login.clone())
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    let streams = twitch.live_streams(&logins).await?;
    let now_live: HashSet<String> = streams
        .iter()
        .map(|s| s.user_login.to_lowercase())
        .collect();

    for login in went_live(live, &now_live) {
        let Some(stream) = streams
            .iter()
            .find(|s| s.user_login.eq_ignore_ascii_case(&login))
        else {
            continue;
        };
        for sub in subs.iter().filter(|sub| sub.login == login) {
            announce(ctx, ChannelId::new(sub.channel_id), stream).await;
        }
    }

    debug!(tracked = logins.len(), live = now_live.len(), "stream poll complete");
    *live = now_live;
    Ok(())
}

/// Logins present now but not in the previous poll.
fn went_live(previous: &HashSet<String>, current: &HashSet<String>) -> Vec<String> {
    current.difference(previous).cloned().collect()
}

async fn announce(ctx: &serenity::Context, channel_id: ChannelId, stream: &LiveStream) {
    let mut embed = CreateEmbed::new()
        .title(format!("🔴 {} is live!", stream.user_name))
        .url(format!("https://twitch.tv/{}", stream.user_login))
        .color(0x9146ff);
    if !stream.title.is_empty() {
        embed = embed.description(stream.title.clone());
    }
    if !stream.game_name.is_empty() {
        embed = embed.field("Playing", stream.game_name.clone(), true);
    }
    if let Err(e) = channel_id
        .send_message(&ctx.http, CreateMessage::new().embed(embed))
        .await
    {
        warn!(channel = channel_id.get(), "failed to send stream alert: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> HashSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn only_new_logins_are_announced() {
        let previous = set(&["alpha", "beta"]);
        let current = set(&["beta", "gamma"]);
        let mut diff = went_live(&previous, &current);
        diff.sort();
        assert_eq!(diff, vec!["gamma"]);
    }

    #[test]
    fn nothing_new_means_no_announcements() {
        let live = set(&["alpha"]);
        assert!(went_live(&live, &live).is_empty());
        assert!(went_live(&live, &HashSet::new()).is_empty());
    }
}
