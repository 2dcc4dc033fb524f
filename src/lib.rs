//! The Looker - a top-down dungeon game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, movement, collisions, level state)
//! - `settings`: Data-driven movement tuning
//! - `audio`: Sound cues derived from simulation events

pub mod audio;
pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Frame-rate ceiling (ticks per second)
    pub const TICK_RATE: u32 = 60;

    /// Avatar speed is the level size divided by this
    pub const SPEED_DIVISOR: f32 = 10.0;
    /// Pursuer speed as a multiple of the avatar's (must stay above 1)
    pub const PURSUER_SPEED_FACTOR: f32 = 1.5;

    /// Squared length below which a segment is treated as a point
    pub const DEGENERATE_SEGMENT_EPSILON: f32 = 1e-4;
    /// Displacement below which an axis move counts as no move at all
    pub const MOVE_EPSILON: f32 = 1e-5;
}
