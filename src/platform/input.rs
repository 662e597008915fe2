//! Pointer/touch input mapping
//!
//! Raw events are reduced to the `TickInput` command consumed by the next
//! simulation step. Touch and pointer handling are mutually exclusive; the
//! mode is picked once when the engine is built.

use crate::sim::TickInput;

/// How the player steers the paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Drag to steer, touch-start launches
    Touch,
    /// Hover to steer, press launches
    Pointer,
}

impl InputMode {
    pub fn detect(touch_capable: bool) -> Self {
        if touch_capable {
            InputMode::Touch
        } else {
            InputMode::Pointer
        }
    }
}

/// Convert a client-space x to game space using the surface's left edge
#[inline]
pub fn relative_x(client_x: f64, surface_left: f64) -> f32 {
    (client_x - surface_left) as f32
}

/// Collects input between ticks
#[derive(Debug, Clone)]
pub struct InputAdapter {
    mode: InputMode,
    dragging: bool,
    pending: TickInput,
}

impl InputAdapter {
    pub fn new(mode: InputMode) -> Self {
        Self {
            mode,
            dragging: false,
            pending: TickInput::default(),
        }
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn touch_start(&mut self, x: f32) {
        if self.mode != InputMode::Touch {
            return;
        }
        self.dragging = true;
        self.pending.merge(TickInput {
            paddle_x: Some(x),
            launch: true,
        });
    }

    pub fn touch_move(&mut self, x: f32) {
        if self.mode == InputMode::Touch && self.dragging {
            self.pending.paddle_x = Some(x);
        }
    }

    /// Paddle stays where it was released
    pub fn touch_end(&mut self) {
        self.dragging = false;
    }

    pub fn pointer_move(&mut self, x: f32) {
        if self.mode == InputMode::Pointer {
            self.pending.paddle_x = Some(x);
        }
    }

    pub fn pointer_down(&mut self) {
        if self.mode == InputMode::Pointer {
            self.pending.launch = true;
        }
    }

    /// Hand over everything collected since the last tick
    pub fn take(&mut self) -> TickInput {
        std::mem::take(&mut self.pending)
    }

    /// Drop pending commands (board rebuilt)
    pub fn reset(&mut self) {
        self.dragging = false;
        self.pending = TickInput::default();
    }
}
