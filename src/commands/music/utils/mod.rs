//! Support types for the music cog.

pub mod music_manager;
pub mod queue_manager;
