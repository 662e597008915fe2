//! Collision detection and response
//!
//! The ball is approximated by its bounding square (center +/- radius) against
//! axis-aligned rectangles and the viewport edges. All functions are pure.

use glam::Vec2;

use super::state::{Paddle, Rect};

/// Which walls the ball is touching
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallHit {
    pub left: bool,
    pub right: bool,
    pub top: bool,
}

impl WallHit {
    /// True if the horizontal component must reflect
    pub fn reflects_x(&self) -> bool {
        self.left || self.right
    }

    /// True if the vertical component must reflect
    pub fn reflects_y(&self) -> bool {
        self.top
    }
}

/// Test the ball against the side and top walls.
///
/// There is no bottom wall; see [`ball_lost`].
pub fn wall_hit(pos: Vec2, radius: f32, viewport_width: f32) -> WallHit {
    WallHit {
        left: pos.x <= radius,
        right: pos.x >= viewport_width - radius,
        top: pos.y <= radius,
    }
}

/// Reflect a direction off the walls in `hit`, always pointing back inside
pub fn reflect_off_walls(dir: Vec2, hit: WallHit) -> Vec2 {
    let mut out = dir;
    if hit.left {
        out.x = dir.x.abs();
    } else if hit.right {
        out.x = -dir.x.abs();
    }
    if hit.top {
        out.y = dir.y.abs();
    }
    out
}

/// Ball has crossed the bottom edge
#[inline]
pub fn ball_lost(pos: Vec2, viewport_height: f32) -> bool {
    pos.y >= viewport_height
}

/// Ball bounds (center +/- radius) intersect the rectangle on both axes
pub fn overlaps_rect(pos: Vec2, radius: f32, rect: &Rect) -> bool {
    pos.x + radius >= rect.x
        && pos.x - radius <= rect.x + rect.w
        && pos.y + radius >= rect.y
        && pos.y - radius <= rect.y + rect.h
}

/// Direction after a paddle hit.
///
/// Vertical is always -1; horizontal grows linearly with the distance from
/// the paddle center, reaching `+/- gain` at the edges.
pub fn paddle_deflection(ball_x: f32, paddle: &Paddle, gain: f32) -> Vec2 {
    let half = paddle.width / 2.0;
    let hit_point = if half > 0.0 {
        (ball_x - paddle.center_x()) / half
    } else {
        0.0
    };
    Vec2::new(hit_point * gain, -1.0)
}

/// Direction after a brick hit: vertical inverts, horizontal is kept
#[inline]
pub fn brick_deflection(dir: Vec2) -> Vec2 {
    Vec2::new(dir.x, -dir.y)
}
