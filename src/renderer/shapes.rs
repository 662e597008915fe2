//! Drawing primitives and the model-to-primitive projection
//!
//! The projection is recomputed every frame from `GameState`; nothing
//! produced here is ever read back by the simulation.

use glam::Vec2;

use crate::sim::confetti::CONFETTI_SIZE;
use crate::sim::{GameState, Rect, SessionPhase};
use crate::stats::SessionStats;

/// Brick colors by row (red, orange, yellow, green)
pub const BRICK_PALETTE: [u32; 4] = [0xFF0000, 0xFF7F00, 0xFFFF00, 0x00FF00];

pub const BACKGROUND: u32 = 0x000000;
const WHITE: u32 = 0xFFFFFF;
const GOLD: u32 = 0xFFD700;
const BUTTON_GREEN: u32 = 0x4CAF50;
const OVERLAY_ALPHA: f32 = 0.8;
const CONFETTI_ALPHA: f32 = 0.8;
const HUD_FONT_SIZE: f32 = 16.0;

/// Where a text's position sits relative to the rendered string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    TopLeft,
    TopCenter,
    Center,
}

/// A single drawing primitive
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rect {
        rect: Rect,
        color: u32,
        alpha: f32,
    },
    RoundRect {
        rect: Rect,
        radius: f32,
        color: u32,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: u32,
    },
    /// Square rotated about its center
    Square {
        center: Vec2,
        size: f32,
        rotation: f32,
        color: u32,
        alpha: f32,
    },
    Text {
        text: String,
        pos: Vec2,
        size: f32,
        color: u32,
        bold: bool,
        anchor: TextAnchor,
    },
}

/// CSS color string for a 0xRRGGBB value
pub fn css_color(color: u32, alpha: f32) -> String {
    let r = (color >> 16) & 0xFF;
    let g = (color >> 8) & 0xFF;
    let b = color & 0xFF;
    format!("rgba({}, {}, {}, {})", r, g, b, alpha)
}

/// Overlay content for a finished round
struct Overlay {
    title: &'static str,
    title_size: f32,
    title_color: u32,
    bold: bool,
    button_label: &'static str,
    button_width: f32,
    button_offset: f32,
}

fn overlay_for(phase: SessionPhase) -> Option<Overlay> {
    match phase {
        SessionPhase::Lost => Some(Overlay {
            title: "Game Over",
            title_size: 32.0,
            title_color: WHITE,
            bold: false,
            button_label: "Retry",
            button_width: 120.0,
            button_offset: 10.0,
        }),
        SessionPhase::Won => Some(Overlay {
            title: "YOU WON!",
            title_size: 48.0,
            title_color: GOLD,
            bold: true,
            button_label: "Play Again",
            button_width: 160.0,
            button_offset: 20.0,
        }),
        SessionPhase::NotStarted | SessionPhase::Running => None,
    }
}

/// Clickable area of the overlay control, if one is showing
pub fn overlay_button(state: &GameState) -> Option<Rect> {
    let overlay = overlay_for(state.phase)?;
    let w = state.layout.viewport_width;
    let h = state.layout.viewport_height;
    Some(Rect::new(
        w / 2.0 - overlay.button_width / 2.0,
        h / 2.0 + overlay.button_offset,
        overlay.button_width,
        40.0,
    ))
}

/// Build the draw list for one frame
pub fn project(state: &GameState, stats: &SessionStats) -> Vec<Shape> {
    let w = state.layout.viewport_width;
    let h = state.layout.viewport_height;
    let mut shapes = Vec::with_capacity(state.bricks.len() + state.confetti.len() + 8);

    let Some(overlay) = overlay_for(state.phase) else {
        board(state, stats, &mut shapes);
        return shapes;
    };

    shapes.push(Shape::Rect {
        rect: Rect::new(0.0, 0.0, w, h),
        color: BACKGROUND,
        alpha: OVERLAY_ALPHA,
    });

    for p in &state.confetti {
        shapes.push(Shape::Square {
            center: p.pos,
            size: CONFETTI_SIZE,
            rotation: p.rotation,
            color: p.color,
            alpha: CONFETTI_ALPHA,
        });
    }

    shapes.push(Shape::Text {
        text: overlay.title.to_string(),
        pos: Vec2::new(w / 2.0, h / 2.0 - 50.0),
        size: overlay.title_size,
        color: overlay.title_color,
        bold: overlay.bold,
        anchor: TextAnchor::TopCenter,
    });

    if let Some(button) = overlay_button(state) {
        shapes.push(Shape::RoundRect {
            rect: button,
            radius: 8.0,
            color: BUTTON_GREEN,
        });
        shapes.push(Shape::Text {
            text: overlay.button_label.to_string(),
            pos: Vec2::new(button.x + button.w / 2.0, button.y + button.h / 2.0),
            size: 20.0,
            color: WHITE,
            bold: false,
            anchor: TextAnchor::Center,
        });
    }

    shapes
}

/// Bricks, paddle, ball and HUD
fn board(state: &GameState, stats: &SessionStats, shapes: &mut Vec<Shape>) {
    for brick in state.bricks.iter().filter(|b| b.visible) {
        shapes.push(Shape::Rect {
            rect: brick.rect,
            color: BRICK_PALETTE[brick.row % BRICK_PALETTE.len()],
            alpha: 1.0,
        });
    }

    shapes.push(Shape::Rect {
        rect: state.paddle.rect(),
        color: WHITE,
        alpha: 1.0,
    });
    shapes.push(Shape::Circle {
        center: state.ball.pos,
        radius: state.ball.radius,
        color: WHITE,
    });

    shapes.push(Shape::Text {
        text: format!("Lives: {}", state.lives),
        pos: Vec2::new(10.0, 10.0),
        size: HUD_FONT_SIZE,
        color: WHITE,
        bold: false,
        anchor: TextAnchor::TopLeft,
    });
    shapes.push(Shape::Text {
        text: stats.summary(),
        pos: Vec2::new(state.layout.viewport_width - 150.0, 10.0),
        size: HUD_FONT_SIZE,
        color: WHITE,
        bold: false,
        anchor: TextAnchor::TopLeft,
    });
}
