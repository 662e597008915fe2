//! Data-driven game balance
//!
//! Defaults reproduce the stock game. A host page may ship a JSON override;
//! missing fields keep their defaults and an unreadable document is ignored.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Gameplay balance knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Ball displacement per tick at a multiplier of 1.0
    pub ball_speed: f32,
    /// Horizontal gain for paddle hits (edge hits reach +/- this value)
    pub paddle_deflection: f32,
    /// Lives granted on every fresh board
    pub starting_lives: u8,
    /// Frame multipliers above this are clamped
    pub max_tick_multiplier: f32,
    /// Particles spawned per confetti burst
    pub confetti_burst: usize,
    /// A new burst spawns once the population drops below this
    pub confetti_floor: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            ball_speed: BALL_SPEED,
            paddle_deflection: PADDLE_DEFLECTION,
            starting_lives: STARTING_LIVES,
            max_tick_multiplier: MAX_TICK_MULTIPLIER,
            confetti_burst: 100,
            confetti_floor: 50,
        }
    }
}

impl Tuning {
    /// Parse a JSON override, falling back to defaults when unreadable
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Tuning>(json) {
            Ok(mut tuning) => {
                tuning.starting_lives = tuning.starting_lives.max(1);
                // NaN also lands on 0
                tuning.max_tick_multiplier = tuning.max_tick_multiplier.max(0.0);
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning override: {}", e);
                Self::default()
            }
        }
    }
}
