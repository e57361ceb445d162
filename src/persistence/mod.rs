//! Save/load persistence
//!
//! Features:
//! - String-keyed store trait (file-backed on native, in-memory for tests)
//! - JSON values per key
//! - Atomic writes (tmp → rename)
//! - Corrupt or missing data falls back to defaults
//!
//! Writes are best-effort: a failed write is logged and the game carries on
//! with its in-memory values. During play they are staged in [`PendingWrites`]
//! and reach the store only when the host flushes between frames.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use std::collections::BTreeMap;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::stats::LifetimeStats;

/// Storage key for the best score
pub const BEST_SCORE_KEY: &str = "hold_game_best_score";
/// Storage key for lifetime statistics
pub const STATS_KEY: &str = "hold_game_stats";
/// Storage key for player settings
pub const SETTINGS_KEY: &str = "hold_game_settings";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Minimal string key-value storage (LocalStorage semantics)
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Read and decode a value, substituting the default when it is missing,
/// unreadable or malformed
pub fn load_or_default<T: DeserializeOwned + Default>(store: &dyn KeyValueStore, key: &str) -> T {
    match store.get(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Ignoring malformed {}: {}", key, e);
                T::default()
            }
        },
        Ok(None) => T::default(),
        Err(e) => {
            log::warn!("Failed to read {}: {}", key, e);
            T::default()
        }
    }
}

/// Encode and write a value
pub fn save<T: Serialize + ?Sized>(store: &mut dyn KeyValueStore, key: &str, value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    store.set(key, &json)
}

/// Encode and write a value, logging instead of failing
pub fn save_best_effort<T: Serialize + ?Sized>(store: &mut dyn KeyValueStore, key: &str, value: &T) {
    if let Err(e) = save(store, key, value) {
        log::warn!("Failed to save {}: {}", key, e);
    }
}

pub fn load_best_score(store: &dyn KeyValueStore) -> u64 {
    load_or_default(store, BEST_SCORE_KEY)
}

pub fn save_best_score(store: &mut dyn KeyValueStore, best: u64) {
    save_best_effort(store, BEST_SCORE_KEY, &best);
}

pub fn load_stats(store: &dyn KeyValueStore) -> LifetimeStats {
    load_or_default(store, STATS_KEY)
}

pub fn save_stats(store: &mut dyn KeyValueStore, stats: &LifetimeStats) {
    save_best_effort(store, STATS_KEY, stats);
}

/// Encoded values waiting to be written, newest per key
#[derive(Debug, Default)]
pub struct PendingWrites {
    values: BTreeMap<&'static str, String>,
}

impl PendingWrites {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a value, replacing any older unwritten one for the same key
    pub fn stage<T: Serialize + ?Sized>(&mut self, key: &'static str, value: &T) {
        match serde_json::to_string(value) {
            Ok(json) => {
                self.values.insert(key, json);
            }
            Err(e) => log::warn!("Failed to encode {}: {}", key, e),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Write everything staged. Failed writes are logged and dropped.
    /// Returns the number of values written.
    pub fn flush(&mut self, store: &mut dyn KeyValueStore) -> usize {
        let mut written = 0;
        for (key, json) in std::mem::take(&mut self.values) {
            match store.set(key, &json) {
                Ok(()) => written += 1,
                Err(e) => log::warn!("Failed to save {}: {}", key, e),
            }
        }
        written
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// A store whose writes always fail
    #[derive(Default)]
    pub(crate) struct BrokenStore {
        pub inner: MemoryStore,
    }

    impl KeyValueStore for BrokenStore {
        fn get(&self, key: &str) -> Result<Option<String>> {
            self.inner.get(key)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(std::io::Error::other("disk full").into())
        }

        fn remove(&mut self, _key: &str) -> Result<()> {
            Err(std::io::Error::other("disk full").into())
        }
    }

    #[test]
    fn test_missing_values_default() {
        let store = MemoryStore::new();
        assert_eq!(load_best_score(&store), 0);
        assert_eq!(load_stats(&store), LifetimeStats::default());
    }

    #[test]
    fn test_malformed_values_default() {
        let mut store = MemoryStore::new();
        store.set(BEST_SCORE_KEY, "not a number").unwrap();
        store.set(STATS_KEY, "{\"totalGames\": ").unwrap();
        assert_eq!(load_best_score(&store), 0);
        assert_eq!(load_stats(&store), LifetimeStats::default());
    }

    #[test]
    fn test_best_score_round_trip() {
        let mut store = MemoryStore::new();
        save_best_score(&mut store, 1234);
        assert_eq!(store.get(BEST_SCORE_KEY).unwrap().as_deref(), Some("1234"));
        assert_eq!(load_best_score(&store), 1234);
    }

    #[test]
    fn test_failed_write_is_swallowed() {
        let mut store = BrokenStore::default();
        save_best_score(&mut store, 50);
        save_stats(&mut store, &LifetimeStats::default());
        assert!(save(&mut store, BEST_SCORE_KEY, &50u64).is_err());
        assert_eq!(load_best_score(&store), 0);
    }

    #[test]
    fn test_pending_keeps_newest_value() {
        let mut pending = PendingWrites::new();
        pending.stage(BEST_SCORE_KEY, &10u64);
        pending.stage(BEST_SCORE_KEY, &25u64);
        pending.stage(STATS_KEY, &LifetimeStats::default());
        assert_eq!(pending.len(), 2);

        let mut store = MemoryStore::new();
        assert_eq!(pending.flush(&mut store), 2);
        assert!(pending.is_empty());
        assert_eq!(load_best_score(&store), 25);
        assert_eq!(pending.flush(&mut store), 0);
    }

    #[test]
    fn test_pending_flush_failure_is_dropped() {
        let mut pending = PendingWrites::new();
        pending.stage(BEST_SCORE_KEY, &10u64);
        let mut store = BrokenStore::default();
        assert_eq!(pending.flush(&mut store), 0);
        assert!(pending.is_empty());
    }
}
