//! The music cog: per-guild playback queues over songbird voice sessions.
//! Requires the `music` feature.

pub mod leave;
pub mod pause;
pub mod play;
pub mod queue;
pub mod skip;
pub mod stop;
pub mod utils;

use crate::{Data, Error};

pub fn commands() -> Vec<poise::Command<Data, Error>> {
    vec![
        play::play(),
        queue::queue(),
        skip::skip(),
        pause::pause(),
        pause::resume(),
        stop::stop(),
        leave::leave(),
    ]
}
