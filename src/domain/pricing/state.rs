//! Explicit TTL cache — owned by the client, never a module-level singleton.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::hash::Hash;
use std::time::Duration;

/// A keyed cache whose entries expire `ttl` after they were stored.
///
/// Each entry is `(value, fetched_at)`. The `*_at` methods take the current
/// time explicitly; the plain methods read `Utc::now()`, which also works on
/// `wasm32-unknown-unknown`. A zero TTL disables caching. A clock that steps
/// backwards counts as zero elapsed time.
#[derive(Debug, Clone)]
pub struct TtlCache<K, V> {
    ttl: Duration,
    entries: HashMap<K, (V, DateTime<Utc>)>,
}

impl<K: Eq + Hash, V: Clone> TtlCache<K, V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// The cached value if it is still fresh at `now`.
    pub fn get_at(&self, key: &K, now: DateTime<Utc>) -> Option<V> {
        let (value, fetched_at) = self.entries.get(key)?;
        if elapsed(*fetched_at, now) < self.ttl {
            Some(value.clone())
        } else {
            None
        }
    }

    pub fn get(&self, key: &K) -> Option<V> {
        self.get_at(key, Utc::now())
    }

    pub fn insert_at(&mut self, key: K, value: V, now: DateTime<Utc>) {
        self.entries.insert(key, (value, now));
    }

    pub fn insert(&mut self, key: K, value: V) {
        self.insert_at(key, value, Utc::now());
    }

    pub fn invalidate(&mut self, key: &K) {
        self.entries.remove(key);
    }

    /// Drop every entry that is stale at `now`.
    pub fn purge_expired_at(&mut self, now: DateTime<Utc>) {
        let ttl = self.ttl;
        self.entries
            .retain(|_, (_, fetched_at)| elapsed(*fetched_at, now) < ttl);
    }

    pub fn purge_expired(&mut self) {
        self.purge_expired_at(Utc::now());
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of stored entries, fresh or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn elapsed(since: DateTime<Utc>, now: DateTime<Utc>) -> Duration {
    now.signed_duration_since(since)
        .to_std()
        .unwrap_or(Duration::ZERO)
}
