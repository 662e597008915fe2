//! Platform abstraction layer
//!
//! Handles the edges between the engine and the embedding page:
//! - Host messaging (stats in, stats out)
//! - Pointer/touch input mapping

pub mod host;
pub mod input;

pub use host::{HostChannel, HostMessage, OutboundMessage, RecordingHost, parse_host_message};
pub use input::{InputAdapter, InputMode, relative_x};

#[cfg(target_arch = "wasm32")]
pub use host::ParentWindowHost;
