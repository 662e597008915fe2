//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of platform and
//! rendering dependencies:
//! - Randomness only through a caller-supplied RNG
//! - Stable iteration order (bricks are row-major)
//! - One step per frame, inputs applied at the start of the step

pub mod collision;
pub mod confetti;
pub mod state;
pub mod tick;

pub use collision::{
    WallHit, ball_lost, brick_deflection, overlaps_rect, paddle_deflection, reflect_off_walls,
    wall_hit,
};
pub use state::{
    Ball, Brick, ConfettiParticle, GameEvent, GameState, Paddle, Rect, SessionPhase,
};
pub use tick::{TickInput, tick};
