//! Movement tuning
//!
//! Loaded once before the first level is built. Any field missing from a
//! JSON override falls back to its default.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{PURSUER_SPEED_FACTOR, SPEED_DIVISOR, TICK_RATE};

/// Rejected settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("speed divisor must be positive, got {0}")]
    SpeedDivisor(f32),
    #[error("pursuers must outpace the avatar: speed factor {0} is not above 1")]
    PursuerTooSlow(f32),
    #[error("tick rate must be at least 1")]
    TickRate,
    #[error("malformed settings: {0}")]
    Json(#[from] serde_json::Error),
}

/// Game tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Avatar speed per tick is the level size divided by this
    pub speed_divisor: f32,
    /// Pursuer speed as a multiple of the avatar's
    pub pursuer_speed_factor: f32,
    /// Frame-rate ceiling (ticks per second)
    pub tick_rate: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            speed_divisor: SPEED_DIVISOR,
            pursuer_speed_factor: PURSUER_SPEED_FACTOR,
            tick_rate: TICK_RATE,
        }
    }
}

impl Settings {
    /// Parse and validate a JSON override
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        log::info!("Loaded settings: {settings:?}");
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.speed_divisor > 0.0) {
            return Err(SettingsError::SpeedDivisor(self.speed_divisor));
        }
        if !(self.pursuer_speed_factor > 1.0) {
            return Err(SettingsError::PursuerTooSlow(self.pursuer_speed_factor));
        }
        if self.tick_rate == 0 {
            return Err(SettingsError::TickRate);
        }
        Ok(())
    }

    /// Avatar speed for a level of the given size
    pub fn avatar_speed(&self, size: f32) -> f32 {
        size / self.speed_divisor
    }

    /// Pursuer speed for a level of the given size
    pub fn pursuer_speed(&self, size: f32) -> f32 {
        self.avatar_speed(size) * self.pursuer_speed_factor
    }

    /// Seconds covered by one tick
    pub fn tick_dt(&self) -> f32 {
        1.0 / self.tick_rate as f32
    }
}
