//! The orphan buffer: events waiting for a missing parent.

use shared_types::{Event, Hash};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::debug;

/// Bounded holding area for events whose parent has not arrived yet.
///
/// An orphan is indexed under every declared parent hash, so whichever
/// parent arrives first triggers a release attempt; the caller re-checks
/// readiness on release and re-inserts if the other parent is still
/// missing. When full, the oldest-generation orphan is evicted: it is the
/// one most likely to be waiting on an already-expired ancestry that will
/// never arrive.
pub struct OrphanBuffer {
    capacity: usize,
    by_parent: HashMap<Hash, Vec<Arc<Event>>>,
    buffered: HashSet<Hash>,
    evicted_total: u64,
}

impl OrphanBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            by_parent: HashMap::new(),
            buffered: HashSet::new(),
            evicted_total: 0,
        }
    }

    /// Number of distinct buffered events.
    pub fn len(&self) -> usize {
        self.buffered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffered.is_empty()
    }

    pub fn evicted_total(&self) -> u64 {
        self.evicted_total
    }

    pub fn contains(&self, hash: &Hash) -> bool {
        self.buffered.contains(hash)
    }

    /// Buffer an event. Returns false for an already-buffered duplicate,
    /// or when the event was immediately evicted as the oldest.
    pub fn insert(&mut self, event: Arc<Event>) -> bool {
        if self.buffered.contains(&event.hash) {
            return false;
        }
        for parent in [event.self_parent_hash(), event.other_parent_hash()]
            .into_iter()
            .flatten()
        {
            self.by_parent.entry(parent).or_default().push(event.clone());
        }
        self.buffered.insert(event.hash);
        while self.buffered.len() > self.capacity {
            self.evict_oldest();
        }
        self.buffered.contains(&event.hash)
    }

    /// Remove and return the events waiting on `parent`. Entries already
    /// released through their other parent are skipped.
    pub fn take_children(&mut self, parent: &Hash) -> Vec<Arc<Event>> {
        let Some(waiting) = self.by_parent.remove(parent) else {
            return Vec::new();
        };
        let mut released = Vec::new();
        for event in waiting {
            if self.buffered.remove(&event.hash) {
                released.push(event);
            }
        }
        released
    }

    fn evict_oldest(&mut self) {
        let victim = self
            .by_parent
            .values()
            .flatten()
            .filter(|e| self.buffered.contains(&e.hash))
            .min_by_key(|e| (e.generation(), e.hash))
            .map(|e| e.hash);
        if let Some(hash) = victim {
            self.buffered.remove(&hash);
            self.evicted_total += 1;
            debug!(event = %hex_prefix(&hash), "orphan buffer full, evicted oldest");
        }
    }
}

fn hex_prefix(hash: &Hash) -> String {
    hash[..4].iter().map(|b| format!("{b:02x}")).collect()
}
