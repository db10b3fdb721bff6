//! The economy cog: per-guild credit accounts backed by the economy
//! ledger in the database.

pub mod balance;
pub mod leaderboard;
pub mod payday;
pub mod register;
pub mod slot;
pub mod transfer;

use crate::{Data, Error};

pub fn commands() -> Vec<poise::Command<Data, Error>> {
    vec![
        register::register(),
        balance::balance(),
        payday::payday(),
        transfer::transfer(),
        slot::slot(),
        leaderboard::leaderboard(),
    ]
}
