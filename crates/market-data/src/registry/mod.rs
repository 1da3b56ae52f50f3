//! Request pacing for live providers.

mod cooldown;

pub use cooldown::Cooldown;
