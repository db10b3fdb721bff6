//! The owner cog: cog management, guild settings, shutdown. This cog is
//! protected; the host refuses to disable it.

pub mod cog;
pub mod setting;
pub mod shutdown;

use crate::{Data, Error};

pub fn commands() -> Vec<poise::Command<Data, Error>> {
    vec![cog::cog(), setting::setting(), shutdown::shutdown()]
}
