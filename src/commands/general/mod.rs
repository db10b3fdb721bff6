//! The general cog: small chat diversions.

pub mod choose;
pub mod eightball;
pub mod flip;
pub mod ping;
pub mod roll;

use crate::{Data, Error};

pub fn commands() -> Vec<poise::Command<Data, Error>> {
    vec![
        ping::ping(),
        flip::flip(),
        roll::roll(),
        choose::choose(),
        eightball::eightball(),
    ]
}
