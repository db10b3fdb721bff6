//! The cog host. Each feature module ("cog") contributes a set of
//! commands; the host tracks which cogs a guild has disabled and gates
//! command dispatch accordingly. Slash commands stay registered with
//! Discord either way, so re-enabling a cog is instant.

use std::collections::HashMap;

use dashmap::DashSet;
use rusqlite::Result as SqlResult;
use serenity::model::id::GuildId;
use tracing::info;

use crate::db::Database;
use crate::{Data, Error};

/// The cog that can never be disabled; it holds `cog` itself and the
/// settings commands, so a guild cannot lock itself out.
pub const PROTECTED_COG: &str = "owner";

/// A loadable feature module contributing commands to the bot.
pub struct Cog {
    pub name: &'static str,
    pub description: &'static str,
    /// Constructor for the cog's top-level commands.
    pub commands: fn() -> Vec<poise::Command<Data, Error>>,
}

/// Every cog compiled into this build.
pub fn registry() -> Vec<Cog> {
    let mut cogs = vec![
        Cog {
            name: "general",
            description: "Dice, coin flips, choices, and the magic eight ball",
            commands: crate::commands::general::commands,
        },
        Cog {
            name: "economy",
            description: "Credits, payday, transfers, and the slot machine",
            commands: crate::commands::economy::commands,
        },
        Cog {
            name: "mod",
            description: "Word filter and message cleanup",
            commands: crate::commands::moderation::commands,
        },
        Cog {
            name: "customcom",
            description: "Per-server custom trigger/response commands",
            commands: crate::commands::custom::commands,
        },
        Cog {
            name: "gallery",
            description: "Channels where non-image posts auto-expire",
            commands: crate::commands::gallery::commands,
        },
        Cog {
            name: "trivia",
            description: "Question-and-answer game sessions",
            commands: crate::commands::trivia::commands,
        },
        Cog {
            name: "streams",
            description: "Twitch go-live alerts",
            commands: crate::commands::streams::commands,
        },
        Cog {
            name: PROTECTED_COG,
            description: "Cog management, settings, and shutdown",
            commands: crate::commands::owner::commands,
        },
    ];

    #[cfg(feature = "music")]
    cogs.push(Cog {
        name: "music",
        description: "Voice-channel music playback",
        commands: crate::commands::music::commands,
    });

    cogs
}

/// Runtime registry mapping commands to their cogs plus the per-guild
/// disabled set, mirrored to the database.
pub struct CogHost {
    cogs: Vec<(&'static str, &'static str)>,
    command_cogs: HashMap<String, &'static str>,
    disabled: DashSet<(GuildId, String)>,
}

impl CogHost {
    pub fn new() -> Self {
        Self {
            cogs: Vec::new(),
            command_cogs: HashMap::new(),
            disabled: DashSet::new(),
        }
    }

    /// Record a cog and the root names of its commands.
    pub fn add_cog(&mut self, cog: &Cog, commands: &[poise::Command<Data, Error>]) {
        self.cogs.push((cog.name, cog.description));
        for command in commands {
            self.command_cogs.insert(command.name.clone(), cog.name);
        }
    }

    /// Warm the disabled-cog cache from the database at startup.
    pub fn load_disabled(&self, db: &Database) -> SqlResult<()> {
        for (guild_id, cog) in db.disabled_cogs()? {
            self.disabled.insert((GuildId::new(guild_id), cog));
        }
        Ok(())
    }

    /// `(name, description)` of every registered cog, registration order.
    pub fn cogs(&self) -> &[(&'static str, &'static str)] {
        &self.cogs
    }

    /// Canonical name of a cog, matched case-insensitively.
    pub fn resolve(&self, name: &str) -> Option<&'static str> {
        self.cogs
            .iter()
            .map(|(cog, _)| *cog)
            .find(|cog| cog.eq_ignore_ascii_case(name))
    }

    pub fn is_enabled(&self, guild_id: GuildId, cog: &str) -> bool {
        !self.disabled.contains(&(guild_id, cog.to_string()))
    }

    /// Toggle a cog for a guild, persisting the change.
    pub fn set_enabled(
        &self,
        db: &Database,
        guild_id: GuildId,
        cog: &str,
        enabled: bool,
    ) -> SqlResult<()> {
        db.set_cog_disabled(guild_id, cog, !enabled)?;
        if enabled {
            self.disabled.remove(&(guild_id, cog.to_string()));
        } else {
            self.disabled.insert((guild_id, cog.to_string()));
        }
        info!(guild = guild_id.get(), cog, enabled, "cog toggled");
        Ok(())
    }

    /// Whether the cog owning `root_command` is enabled in the guild.
    /// Commands the host doesn't know about (help, register) pass.
    pub fn command_enabled(&self, guild_id: GuildId, root_command: &str) -> bool {
        match self.command_cogs.get(root_command) {
            Some(cog) => self.is_enabled(guild_id, cog),
            None => true,
        }
    }
}

impl Default for CogHost {
    fn default() -> Self {
        Self::new()
    }
}
