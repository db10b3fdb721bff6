//! The mod cog: word-list message screening plus bulk cleanup.
//!
//! Screening runs from the message event hook. Filter words are stored in
//! the database; compiled regexes are cached per guild and invalidated
//! whenever the word list changes.

pub mod cleanup;
pub mod filter;

use std::sync::Arc;

use dashmap::DashMap;
use poise::serenity_prelude as serenity;
use regex::RegexSet;
use serenity::all::Message;
use serenity::model::id::{GuildId, UserId};
use tracing::{info, warn};

use crate::db::Database;
use crate::{Data, Error};

pub fn commands() -> Vec<poise::Command<Data, Error>> {
    vec![filter::filter(), cleanup::cleanup()]
}

/// Per-guild cache of compiled filter regexes.
pub struct FilterCache {
    sets: DashMap<GuildId, Arc<RegexSet>>,
}

impl FilterCache {
    pub fn new() -> Self {
        Self {
            sets: DashMap::new(),
        }
    }

    /// Drop the cached set for a guild; the next lookup rebuilds it.
    pub fn invalidate(&self, guild_id: GuildId) {
        self.sets.remove(&guild_id);
    }

    /// Compiled filter for the guild, building it from the database on a
    /// cache miss. An empty word list compiles to a set matching nothing.
    pub fn get(&self, db: &Database, guild_id: GuildId) -> Result<Arc<RegexSet>, Error> {
        if let Some(set) = self.sets.get(&guild_id) {
            return Ok(set.clone());
        }
        let words = db.filter_words(guild_id)?;
        let set = Arc::new(compile_filter(&words)?);
        self.sets.insert(guild_id, set.clone());
        Ok(set)
    }
}

impl Default for FilterCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Compile filter words into a case-insensitive, word-boundary regex set.
/// Words are escaped, so they match literally.
pub fn compile_filter(words: &[String]) -> Result<RegexSet, regex::Error> {
    let patterns: Vec<String> = words
        .iter()
        .map(|word| format!(r"(?i)\b{}\b", regex::escape(word)))
        .collect();
    RegexSet::new(patterns)
}

/// Screen an incoming guild message against the filter. Returns `true`
/// when the message was deleted (callers then skip further dispatch).
pub async fn screen_message(
    ctx: &serenity::Context,
    data: &Data,
    msg: &Message,
) -> Result<bool, Error> {
    let Some(guild_id) = msg.guild_id else {
        return Ok(false);
    };
    let set = data.filters.get(&data.db, guild_id)?;
    if set.is_empty() || !set.is_match(&msg.content) {
        return Ok(false);
    }
    // Admins are exempt; only check once a word actually matched.
    if member_is_admin(ctx, guild_id, msg.author.id).await {
        return Ok(false);
    }
    match msg.delete(&ctx.http).await {
        Ok(()) => {
            info!(
                guild = guild_id.get(),
                author = msg.author.id.get(),
                "deleted filtered message"
            );
            Ok(true)
        }
        Err(e) => {
            warn!(
                guild = guild_id.get(),
                "failed to delete filtered message: {e}"
            );
            Ok(false)
        }
    }
}

/// Whether the member owns the guild or carries a role with the
/// administrator permission.
pub async fn member_is_admin(
    ctx: &serenity::Context,
    guild_id: GuildId,
    user_id: UserId,
) -> bool {
    let is_owner = guild_id
        .to_guild_cached(&ctx.cache)
        .is_some_and(|guild| guild.owner_id == user_id);
    if is_owner {
        return true;
    }
    let Ok(member) = guild_id.member(ctx, user_id).await else {
        return false;
    };
    // One cache access for the whole role set; the guard never crosses
    // an await.
    let Some(guild) = guild_id.to_guild_cached(&ctx.cache) else {
        return false;
    };
    member.roles.iter().any(|role_id| {
        guild
            .roles
            .get(role_id)
            .is_some_and(|role| role.has_permission(serenity::Permissions::ADMINISTRATOR))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn matches_on_word_boundaries_only() {
        let set = compile_filter(&words(&["spam"])).unwrap();
        assert!(set.is_match("free SPAM here"));
        assert!(set.is_match("spam"));
        assert!(!set.is_match("spammer")); // substring, not a word
    }

    #[test]
    fn words_match_literally() {
        let set = compile_filter(&words(&["a.b"])).unwrap();
        assert!(set.is_match("say a.b now"));
        assert!(!set.is_match("say axb now"));
    }

    #[test]
    fn empty_filter_matches_nothing() {
        let set = compile_filter(&[]).unwrap();
        assert!(set.is_empty());
        assert!(!set.is_match("anything at all"));
    }

    #[test]
    fn cache_invalidation_picks_up_new_words() {
        let db = Database::open_in_memory().unwrap();
        let cache = FilterCache::new();
        let guild = GuildId::new(1);

        assert!(!cache.get(&db, guild).unwrap().is_match("spam"));

        db.add_filter_word(guild, "spam").unwrap();
        // Stale until invalidated.
        assert!(!cache.get(&db, guild).unwrap().is_match("spam"));
        cache.invalidate(guild);
        assert!(cache.get(&db, guild).unwrap().is_match("spam"));
    }
}
