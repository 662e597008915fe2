//! Canvas 2D painter (WASM only)

use std::f64::consts::TAU;

use web_sys::CanvasRenderingContext2d;

use super::shapes::{BACKGROUND, Shape, TextAnchor, css_color};
use crate::sim::Rect;

/// Clear the surface and paint `shapes` in order
pub fn paint(ctx: &CanvasRenderingContext2d, width: f64, height: f64, shapes: &[Shape]) {
    ctx.set_fill_style_str(&css_color(BACKGROUND, 1.0));
    ctx.fill_rect(0.0, 0.0, width, height);

    for shape in shapes {
        match shape {
            Shape::Rect { rect, color, alpha } => {
                ctx.set_fill_style_str(&css_color(*color, *alpha));
                ctx.fill_rect(rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
            }
            Shape::RoundRect {
                rect,
                radius,
                color,
            } => {
                ctx.set_fill_style_str(&css_color(*color, 1.0));
                round_rect_path(ctx, rect, *radius as f64);
                ctx.fill();
            }
            Shape::Circle {
                center,
                radius,
                color,
            } => {
                ctx.set_fill_style_str(&css_color(*color, 1.0));
                ctx.begin_path();
                if ctx
                    .arc(center.x as f64, center.y as f64, *radius as f64, 0.0, TAU)
                    .is_ok()
                {
                    ctx.fill();
                }
            }
            Shape::Square {
                center,
                size,
                rotation,
                color,
                alpha,
            } => {
                let half = *size as f64 / 2.0;
                ctx.save();
                let _ = ctx.translate(center.x as f64, center.y as f64);
                let _ = ctx.rotate(*rotation as f64);
                ctx.set_fill_style_str(&css_color(*color, *alpha));
                ctx.fill_rect(-half, -half, *size as f64, *size as f64);
                ctx.restore();
            }
            Shape::Text {
                text,
                pos,
                size,
                color,
                bold,
                anchor,
            } => {
                let weight = if *bold { "bold " } else { "" };
                ctx.set_font(&format!("{}{}px Arial", weight, size));
                ctx.set_fill_style_str(&css_color(*color, 1.0));
                let (align, baseline) = match anchor {
                    TextAnchor::TopLeft => ("left", "top"),
                    TextAnchor::TopCenter => ("center", "top"),
                    TextAnchor::Center => ("center", "middle"),
                };
                ctx.set_text_align(align);
                ctx.set_text_baseline(baseline);
                let _ = ctx.fill_text(text, pos.x as f64, pos.y as f64);
            }
        }
    }
}

fn round_rect_path(ctx: &CanvasRenderingContext2d, rect: &Rect, radius: f64) {
    let (x, y, w, h) = (rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
    let r = radius.min(w / 2.0).min(h / 2.0);
    ctx.begin_path();
    ctx.move_to(x + r, y);
    let _ = ctx.arc_to(x + w, y, x + w, y + h, r);
    let _ = ctx.arc_to(x + w, y + h, x, y + h, r);
    let _ = ctx.arc_to(x, y + h, x, y, r);
    let _ = ctx.arc_to(x, y, x + w, y, r);
    ctx.close_path();
}
