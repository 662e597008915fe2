//! Game state and entity model
//!
//! Entities carry semantic state only (position, direction, visibility).
//! Renderers read from here; nothing here is owned by a renderer.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::layout::Layout;
use crate::persistence::{BrickState, Snapshot};
use crate::tuning::Tuning;

/// Axis-aligned rectangle (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.w
            && point.y >= self.y
            && point.y <= self.y + self.h
    }
}

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Ball rests on the paddle until the first press
    NotStarted,
    /// Physics integrates
    Running,
    /// Every brick cleared; confetti only
    Won,
    /// Lives exhausted; board frozen
    Lost,
}

/// Things that happened during a tick, consumed by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Launched,
    BrickCleared { row: usize, col: usize },
    LifeLost { lives: u8 },
    Won,
    Lost,
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Left edge
    pub x: f32,
    /// Top edge (fixed)
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Paddle {
    /// Paddle centered horizontally near the bottom of the viewport
    pub fn new(layout: &Layout) -> Self {
        Self {
            x: layout.viewport_width / 2.0 - layout.paddle_width / 2.0,
            y: layout.paddle_y(),
            width: layout.paddle_width,
            height: crate::consts::PADDLE_HEIGHT,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Center the paddle on `target_x`, keeping it inside [0, viewport_width]
    pub fn move_to(&mut self, target_x: f32, viewport_width: f32) {
        let max_x = (viewport_width - self.width).max(0.0);
        self.x = (target_x - self.width / 2.0).min(max_x).max(0.0);
    }
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Zero while resting on the paddle
    pub dir: Vec2,
    pub speed: f32,
    pub radius: f32,
}

impl Ball {
    pub fn new(radius: f32, speed: f32) -> Self {
        Self {
            pos: Vec2::ZERO,
            dir: Vec2::ZERO,
            speed,
            radius,
        }
    }

    pub fn is_launched(&self) -> bool {
        self.dir != Vec2::ZERO
    }

    /// Park the ball above the paddle center and stop it
    pub fn rest_on(&mut self, paddle: &Paddle, rest_y: f32) {
        self.pos = Vec2::new(paddle.center_x(), rest_y);
        self.dir = Vec2::ZERO;
    }

    /// Start moving upward; no-op if already in flight
    pub fn launch(&mut self, dir_x: f32) -> bool {
        if self.is_launched() {
            return false;
        }
        self.dir = Vec2::new(dir_x, -1.0);
        true
    }
}

/// A brick in the grid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    pub row: usize,
    pub col: usize,
    pub rect: Rect,
    pub visible: bool,
}

/// A confetti particle on the win screen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfettiParticle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub rotation: f32,
    pub rotation_speed: f32,
    pub color: u32,
}

/// Complete game state for one board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub layout: Layout,
    pub phase: SessionPhase,
    pub lives: u8,
    pub paddle: Paddle,
    pub ball: Ball,
    /// Row-major order
    pub bricks: Vec<Brick>,
    /// Win-screen particles (not gameplay-affecting)
    #[serde(skip)]
    pub confetti: Vec<ConfettiParticle>,
    starting_lives: u8,
}

impl GameState {
    /// Fresh board: full lives, every brick visible, ball on the paddle
    pub fn new(layout: Layout, tuning: &Tuning) -> Self {
        let paddle = Paddle::new(&layout);
        let mut ball = Ball::new(layout.ball_radius, tuning.ball_speed);
        ball.rest_on(&paddle, layout.ball_rest_y());

        let mut bricks = Vec::with_capacity(layout.brick_count());
        for row in 0..layout.rows {
            for col in 0..layout.columns {
                bricks.push(Brick {
                    row,
                    col,
                    rect: layout.brick_rect(row, col),
                    visible: true,
                });
            }
        }

        Self {
            layout,
            phase: SessionPhase::NotStarted,
            lives: tuning.starting_lives,
            paddle,
            ball,
            bricks,
            confetti: Vec::new(),
            starting_lives: tuning.starting_lives,
        }
    }

    pub fn starting_lives(&self) -> u8 {
        self.starting_lives
    }

    pub fn brick(&self, row: usize, col: usize) -> Option<&Brick> {
        if row >= self.layout.rows || col >= self.layout.columns {
            return None;
        }
        self.bricks.get(row * self.layout.columns + col)
    }

    pub fn bricks_remaining(&self) -> usize {
        self.bricks.iter().filter(|b| b.visible).count()
    }

    pub fn all_cleared(&self) -> bool {
        self.bricks.iter().all(|b| !b.visible)
    }

    /// Capture lives and brick visibility
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            lives: self.lives,
            bricks: self
                .bricks
                .iter()
                .map(|b| BrickState {
                    row: b.row,
                    col: b.col,
                    visible: b.visible,
                })
                .collect(),
        }
    }

    /// Apply a snapshot keyed by grid indices.
    ///
    /// Returns false (leaving the board untouched) when the snapshot does not
    /// fit this board: lives out of range, an entry outside the grid, or no
    /// visible brick left.
    pub fn restore(&mut self, snapshot: &Snapshot) -> bool {
        if snapshot.lives == 0 || snapshot.lives > self.starting_lives {
            return false;
        }
        let in_grid = snapshot
            .bricks
            .iter()
            .all(|b| b.row < self.layout.rows && b.col < self.layout.columns);
        if !in_grid {
            return false;
        }

        let mut visible = vec![true; self.bricks.len()];
        for saved in &snapshot.bricks {
            visible[saved.row * self.layout.columns + saved.col] = saved.visible;
        }
        if !visible.iter().any(|v| *v) {
            return false;
        }

        for (brick, visible) in self.bricks.iter_mut().zip(visible) {
            brick.visible = visible;
        }
        self.lives = snapshot.lives;
        true
    }
}
