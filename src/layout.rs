//! Viewport-driven sizing
//!
//! Everything that depends on the canvas width is derived here in one pass.
//! A width change means a new `Layout` and a fully rebuilt board; nothing is
//! relaid out incrementally.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::state::Rect;

/// Dimensions derived from the viewport width
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub paddle_width: f32,
    pub ball_radius: f32,
    pub rows: usize,
    pub columns: usize,
    pub padding: f32,
    /// Fractional; not rounded
    pub brick_width: f32,
}

impl Layout {
    /// Derive the layout for a canvas `width` pixels wide
    pub fn for_width(width: u32) -> Self {
        let w = width as f32;
        let scale = w / REFERENCE_WIDTH;

        let (columns, padding) = breakpoint(width);
        let columns = columns.max(1);

        let brick_width =
            ((w - padding * (columns as f32 + 1.0)) / columns as f32).max(MIN_BRICK_WIDTH);

        Self {
            viewport_width: w,
            viewport_height: VIEWPORT_HEIGHT,
            paddle_width: (BASE_PADDLE_WIDTH * scale).round(),
            ball_radius: (BASE_BALL_RADIUS * scale).round(),
            rows: BRICK_ROWS,
            columns,
            padding,
            brick_width,
        }
    }

    /// Rectangle occupied by the brick at (`row`, `col`)
    pub fn brick_rect(&self, row: usize, col: usize) -> Rect {
        Rect {
            x: col as f32 * (self.brick_width + self.padding) + self.padding,
            y: row as f32 * (BRICK_HEIGHT + self.padding) + self.padding + BRICK_TOP_OFFSET,
            w: self.brick_width,
            h: BRICK_HEIGHT,
        }
    }

    /// Total number of bricks in the grid
    pub fn brick_count(&self) -> usize {
        self.rows * self.columns
    }

    /// Top edge of the paddle (fixed near the bottom)
    pub fn paddle_y(&self) -> f32 {
        self.viewport_height - PADDLE_BOTTOM_OFFSET
    }

    /// Center height of a ball resting above the paddle
    pub fn ball_rest_y(&self) -> f32 {
        self.viewport_height - BALL_REST_OFFSET
    }
}

/// Column count and padding for a width (inclusive lower bounds)
fn breakpoint(width: u32) -> (usize, f32) {
    if width >= 756 {
        (10, 10.0)
    } else if width >= 400 {
        (7, 8.0)
    } else if width >= 343 {
        (6, 6.0)
    } else {
        (5, 5.0)
    }
}

/// Snap the host window width to one of the four supported canvas widths
pub fn snap_viewport_width(window_width: u32) -> u32 {
    match window_width {
        w if w >= 756 => 756,
        w if w >= 400 => 400,
        w if w >= 343 => 343,
        _ => 288,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_reference_width_layout() {
        let layout = Layout::for_width(756);
        assert_eq!(layout.columns, 10);
        assert_eq!(layout.padding, 10.0);
        assert_eq!(layout.paddle_width, 100.0);
        assert_eq!(layout.ball_radius, 8.0);
        assert_eq!(layout.rows, 4);
        // (756 - 10 * 11) / 10
        assert!((layout.brick_width - 64.6).abs() < 1e-4);
    }

    #[test]
    fn test_breakpoint_edges() {
        assert_eq!(Layout::for_width(755).columns, 7);
        assert_eq!(Layout::for_width(400).columns, 7);
        assert_eq!(Layout::for_width(399).columns, 6);
        assert_eq!(Layout::for_width(343).columns, 6);
        assert_eq!(Layout::for_width(342).columns, 5);
        assert_eq!(Layout::for_width(288).padding, 5.0);
    }

    #[test]
    fn test_scaled_sizes_round() {
        let layout = Layout::for_width(400);
        // 100 * 400/756 = 52.9..
        assert_eq!(layout.paddle_width, 53.0);
        // 8 * 400/756 = 4.23..
        assert_eq!(layout.ball_radius, 4.0);
    }

    #[test]
    fn test_degenerate_width_keeps_positive_bricks() {
        let layout = Layout::for_width(10);
        assert!(layout.columns >= 1);
        assert!(layout.brick_width >= MIN_BRICK_WIDTH);
    }

    #[test]
    fn test_brick_rect_positions() {
        let layout = Layout::for_width(756);
        let first = layout.brick_rect(0, 0);
        assert_eq!((first.x, first.y), (10.0, 60.0));
        let r = layout.brick_rect(1, 2);
        assert!((r.x - (2.0 * 74.6 + 10.0)).abs() < 1e-3);
        assert_eq!(r.y, 25.0 + 10.0 + 50.0);
    }

    #[test]
    fn test_snap_viewport_width() {
        assert_eq!(snap_viewport_width(1920), 756);
        assert_eq!(snap_viewport_width(500), 400);
        assert_eq!(snap_viewport_width(360), 343);
        assert_eq!(snap_viewport_width(320), 288);
    }

    proptest! {
        #[test]
        fn breakpoints_hold(width in 1u32..4000) {
            let layout = Layout::for_width(width);
            let expected = match width {
                w if w >= 756 => (10, 10.0),
                w if w >= 400 => (7, 8.0),
                w if w >= 343 => (6, 6.0),
                _ => (5, 5.0),
            };
            prop_assert_eq!((layout.columns, layout.padding), expected);
        }

        #[test]
        fn grid_fits_viewport(width in 288u32..4000) {
            let layout = Layout::for_width(width);
            let last = layout.brick_rect(layout.rows - 1, layout.columns - 1);
            prop_assert!(last.x + last.w <= layout.viewport_width + 1e-2);
        }
    }
}
