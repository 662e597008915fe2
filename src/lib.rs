//! Brick Breaker - a single-screen paddle-and-ball arcade game
//!
//! Core modules:
//! - `sim`: Simulation (entities, collisions, per-frame tick)
//! - `engine`: Session lifecycle wired to storage and the host page
//! - `layout`: Viewport-driven paddle/ball/brick sizing
//! - `persistence`: Local snapshot of lives and brick visibility
//! - `platform`: Host messaging and pointer/touch input mapping
//! - `renderer`: Projection of the model into drawing primitives
//! - `tuning`: Data-driven game balance

pub mod engine;
pub mod layout;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod stats;
pub mod tuning;

pub use engine::Engine;
pub use layout::Layout;
pub use stats::SessionStats;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Canvas width the base paddle/ball sizes were authored for
    pub const REFERENCE_WIDTH: f32 = 756.0;
    /// Canvas height (fixed; only the width follows the host window)
    pub const VIEWPORT_HEIGHT: f32 = 324.0;

    /// Paddle defaults (width scales with the viewport)
    pub const BASE_PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 20.0;
    /// Distance from the bottom edge to the paddle's top edge
    pub const PADDLE_BOTTOM_OFFSET: f32 = 40.0;

    /// Ball defaults (radius scales with the viewport)
    pub const BASE_BALL_RADIUS: f32 = 8.0;
    /// Distance from the bottom edge to a resting ball's center
    pub const BALL_REST_OFFSET: f32 = 60.0;
    /// Displacement per tick at a multiplier of 1.0
    pub const BALL_SPEED: f32 = 5.0;
    /// Horizontal gain applied to the normalized paddle hit point
    pub const PADDLE_DEFLECTION: f32 = 1.5;

    /// Brick grid
    pub const BRICK_ROWS: usize = 4;
    pub const BRICK_HEIGHT: f32 = 15.0;
    /// Space reserved above the grid for the HUD
    pub const BRICK_TOP_OFFSET: f32 = 50.0;
    /// Smallest brick width a degenerate layout may produce
    pub const MIN_BRICK_WIDTH: f32 = 1.0;

    /// Lives at the start of every session
    pub const STARTING_LIVES: u8 = 3;

    /// Upper bound on the per-frame elapsed-time multiplier (tab stalls)
    pub const MAX_TICK_MULTIPLIER: f32 = 4.0;
    /// Nominal frame duration the multiplier is measured against (ms)
    pub const FRAME_MS: f64 = 1000.0 / 60.0;
}
