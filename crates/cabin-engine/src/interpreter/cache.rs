//! Bounded intent cache shared across sessions.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::intent::Intent;

/// Default number of cached intents.
pub const DEFAULT_CAPACITY: usize = 50;

#[derive(Debug)]
struct CacheInner {
    entries: HashMap<String, Intent>,
    order: VecDeque<String>,
    capacity: usize,
}

/// Insertion-ordered cache of remote interpretations; the oldest entry is
/// evicted on overflow.
///
/// Cloning shares the same storage. Entries are never mutated after insert.
#[derive(Debug, Clone)]
pub struct IntentCache {
    inner: Arc<Mutex<CacheInner>>,
}

impl Default for IntentCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl IntentCache {
    /// A cache holding at most `capacity` intents (minimum 1).
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(CacheInner {
                entries: HashMap::new(),
                order: VecDeque::new(),
                capacity: capacity.max(1),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, CacheInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Look up a cached intent.
    pub fn get(&self, key: &str) -> Option<Intent> {
        self.lock().entries.get(key).cloned()
    }

    /// Store an intent. Re-inserting a key replaces the value but keeps its age.
    pub fn insert(&self, key: String, intent: Intent) {
        let mut inner = self.lock();
        if inner.entries.insert(key.clone(), intent).is_none() {
            inner.order.push_back(key);
        }
        while inner.order.len() > inner.capacity {
            if let Some(oldest) = inner.order.pop_front() {
                inner.entries.remove(&oldest);
            }
        }
    }

    /// Number of cached intents.
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of cached intents.
    pub fn capacity(&self) -> usize {
        self.lock().capacity
    }

    /// Drop every entry.
    pub fn clear(&self) {
        let mut inner = self.lock();
        inner.entries.clear();
        inner.order.clear();
    }
}
