//! Persisted board snapshot
//!
//! Stored as a JSON string: `{"lives": 2, "bricks": [{"row": 0, "col": 3,
//! "visible": false}, ...]}`. Bricks are keyed by grid indices, never by
//! pixel position.

use serde::{Deserialize, Serialize};

/// Visibility of one brick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrickState {
    pub row: usize,
    pub col: usize,
    pub visible: bool,
}

/// Lives plus brick visibility, written on every life lost
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub lives: u8,
    pub bricks: Vec<BrickState>,
}

impl Snapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Number of bricks already cleared
    pub fn cleared(&self) -> usize {
        self.bricks.iter().filter(|b| !b.visible).count()
    }
}
