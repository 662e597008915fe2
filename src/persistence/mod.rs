//! Snapshot persistence
//!
//! A single best-effort snapshot of lives and brick visibility, written on
//! each life lost and cleared when a round ends. Read once when a board is
//! built. Anything unreadable is logged and treated as "no snapshot".

pub mod snapshot;

pub use snapshot::{BrickState, Snapshot};

/// Local storage key
pub const STORAGE_KEY: &str = "brickBreakerState";

/// Key-value backend for the snapshot
pub trait SnapshotStore {
    /// Raw stored string, if any
    fn read(&self) -> Option<String>;
    fn write(&mut self, value: &str);
    fn remove(&mut self);

    /// Decode the stored snapshot; malformed data reads as `None`
    fn load(&self) -> Option<Snapshot> {
        let json = self.read()?;
        match Snapshot::from_json(&json) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                log::warn!("Discarding unreadable snapshot: {}", e);
                None
            }
        }
    }

    fn save(&mut self, snapshot: &Snapshot) {
        match snapshot.to_json() {
            Ok(json) => {
                self.write(&json);
                log::info!("Snapshot saved ({} lives)", snapshot.lives);
            }
            Err(e) => log::warn!("Snapshot not saved: {}", e),
        }
    }

    fn clear(&mut self) {
        self.remove();
        log::info!("Snapshot cleared");
    }
}

/// In-memory store for tests and native runs
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Option<String>,
    /// Number of writes performed
    pub writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a raw value
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            writes: 0,
        }
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

impl SnapshotStore for MemoryStore {
    fn read(&self) -> Option<String> {
        self.value.clone()
    }

    fn write(&mut self, value: &str) {
        self.value = Some(value.to_string());
        self.writes += 1;
    }

    fn remove(&mut self) {
        self.value = None;
    }
}

/// Browser LocalStorage backend (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl SnapshotStore for LocalStorageStore {
    fn read(&self) -> Option<String> {
        Self::storage()?.get_item(STORAGE_KEY).ok()?
    }

    fn write(&mut self, value: &str) {
        if let Some(storage) = Self::storage() {
            if storage.set_item(STORAGE_KEY, value).is_err() {
                log::warn!("LocalStorage write failed");
            }
        }
    }

    fn remove(&mut self) {
        if let Some(storage) = Self::storage() {
            if storage.remove_item(STORAGE_KEY).is_err() {
                log::warn!("LocalStorage remove failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert!(store.load().is_none());

        let snapshot = Snapshot {
            lives: 1,
            bricks: vec![BrickState {
                row: 0,
                col: 0,
                visible: false,
            }],
        };
        store.save(&snapshot);
        assert_eq!(store.writes, 1);
        assert_eq!(store.load(), Some(snapshot));

        store.clear();
        assert!(store.value().is_none());
    }

    #[test]
    fn test_garbage_reads_as_missing() {
        let store = MemoryStore::with_value("{not json");
        assert!(store.load().is_none());
    }
}
