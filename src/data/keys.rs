//! Key assignment strategies for staged inserts.

use std::sync::atomic::{AtomicU64, Ordering};

/// Produces keys for newly inserted entities.
pub trait KeyGenerator<K>: Send + Sync {
    /// Returns a key not handed out before.
    fn next_key(&self) -> K;

    /// Records a key that already exists, so it is never generated again.
    fn observe(&self, _key: &K) {}
}

/// Monotonic integer keys starting at 1.
#[derive(Debug, Default)]
pub struct Sequential {
    last: AtomicU64,
}

impl Sequential {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyGenerator<u64> for Sequential {
    fn next_key(&self) -> u64 {
        self.last.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn observe(&self, key: &u64) {
        self.last.fetch_max(*key, Ordering::SeqCst);
    }
}

/// Lexicographically sortable ULID string keys.
#[derive(Debug, Default, Clone, Copy)]
pub struct UlidKeys;

impl KeyGenerator<String> for UlidKeys {
    fn next_key(&self) -> String {
        ulid::Ulid::new().to_string()
    }
}
