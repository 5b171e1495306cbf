use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use encore_core::Coordinate;

/// Process-lifetime coordinate cache keyed by normalized location.
///
/// Many readers may hold the lock at once; writers take it briefly. Entries
/// are never evicted. The lock is never held across an `.await`.
#[derive(Debug, Default)]
pub struct GeocodeCache {
    entries: RwLock<HashMap<String, Coordinate>>,
}

impl GeocodeCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<Coordinate> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .copied()
    }

    /// Stores `coordinate` under `key`, replacing any earlier value.
    pub fn put(&self, key: impl Into<String>, coordinate: Coordinate) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.into(), coordinate);
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
