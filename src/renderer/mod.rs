//! Rendering module
//!
//! `shapes` turns the game model into a flat list of primitives each frame;
//! `canvas` (web only) paints that list with the 2D canvas API.

pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use shapes::{BRICK_PALETTE, Shape, TextAnchor, css_color, overlay_button, project};
