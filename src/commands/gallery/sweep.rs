//! Background sweep for gallery channels. Every pass fetches the posts
//! older than the channel's lifetime and deletes the ones that carry no
//! image and no pin. Pinned posts and anything past the two-week bulk
//! deletion window are left alone.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use poise::serenity_prelude as serenity;
use serenity::all::{ChannelId, GetMessages, Message, MessageId};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::Error;
use crate::db::{Database, GalleryChannel};

pub const SWEEP_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Discord epoch offset of snowflake timestamps, in milliseconds.
const DISCORD_EPOCH_MS: u64 = 1_420_070_400_000;
/// Bulk deletion refuses messages older than this many seconds.
const BULK_DELETE_WINDOW: i64 = 60 * 60 * 24 * 14;

pub fn spawn(ctx: serenity::Context, db: Arc<Database>) {
    tokio::spawn(async move {
        info!("gallery sweeper started");
        let mut interval = tokio::time::interval(SWEEP_INTERVAL);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            if let Err(e) = sweep_once(&ctx, &db).await {
                warn!("gallery sweep failed: {e}");
            }
        }
    });
}

async fn sweep_once(ctx: &serenity::Context, db: &Database) -> Result<(), Error> {
    let disabled: HashSet<u64> = db
        .disabled_cogs()?
        .into_iter()
        .filter(|(_, cog)| cog == "gallery")
        .map(|(guild_id, _)| guild_id)
        .collect();

    for channel in db.gallery_channels()? {
        if disabled.contains(&channel.guild_id) {
            continue;
        }
        if let Err(e) = sweep_channel(ctx, &channel).await {
            warn!(channel = channel.channel_id, "gallery sweep failed: {e}");
        }
    }
    Ok(())
}

async fn sweep_channel(
    ctx: &serenity::Context,
    gallery: &GalleryChannel,
) -> Result<(), serenity::Error> {
    let channel_id = ChannelId::new(gallery.channel_id);
    let now = SystemTime::now();
    let cutoff = snowflake_before(now, gallery.expiry_secs);
    let messages = channel_id
        .messages(&ctx.http, GetMessages::new().before(cutoff).limit(100))
        .await?;

    let now_secs = now
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64;
    let floor = now_secs - BULK_DELETE_WINDOW + 60;
    let ids: Vec<MessageId> = messages
        .iter()
        .filter(|msg| !keep_message(msg))
        .filter(|msg| msg.timestamp.unix_timestamp() > floor)
        .map(|msg| msg.id)
        .collect();
    let expired = ids.len();

    match expired {
        0 => {}
        1 => channel_id.delete_message(&ctx.http, ids[0]).await?,
        _ => channel_id.delete_messages(&ctx.http, ids).await?,
    }
    if expired > 0 {
        debug!(
            channel = gallery.channel_id,
            count = expired,
            "expired gallery posts removed"
        );
    }
    Ok(())
}

/// Galleries keep pinned posts and anything carrying an image.
fn keep_message(msg: &Message) -> bool {
    msg.pinned || !msg.attachments.is_empty() || !msg.embeds.is_empty()
}

/// A synthetic snowflake marking `expiry_secs` before `now`; messages
/// with smaller ids are older than the lifetime.
fn snowflake_before(now: SystemTime, expiry_secs: i64) -> MessageId {
    let now_ms = now
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64;
    let cutoff_ms = now_ms
        .saturating_sub(expiry_secs.max(0) as u64 * 1000)
        .saturating_sub(DISCORD_EPOCH_MS);
    MessageId::new((cutoff_ms << 22).max(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn at(unix_secs: u64) -> SystemTime {
        UNIX_EPOCH + Duration::from_secs(unix_secs)
    }

    #[test]
    fn cutoff_encodes_the_expiry() {
        // 2015-02-01T00:00:00Z is 1422748800, well past the Discord epoch.
        let cutoff = snowflake_before(at(1_422_748_800), 3600);
        let expected_ms = (1_422_748_800_000u64 - 3_600_000) - DISCORD_EPOCH_MS;
        assert_eq!(cutoff.get() >> 22, expected_ms);
    }

    #[test]
    fn older_messages_sort_below_the_cutoff() {
        let newer = snowflake_before(at(1_422_748_800), 60);
        let older = snowflake_before(at(1_422_748_800), 7200);
        assert!(older.get() < newer.get());
    }

    #[test]
    fn pre_epoch_times_clamp_to_the_smallest_id() {
        assert_eq!(snowflake_before(at(0), 60).get(), 1);
    }
}
