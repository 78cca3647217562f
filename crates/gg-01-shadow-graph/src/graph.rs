//! The shadow graph arena.

use crate::descendant_view::GraphDescendants;
use crate::error::{GraphError, GraphResult};
use crate::reservation::{GenerationReservation, ReservationLedger};
use crate::shadow_event::{ShadowEvent, ShadowIndex};
use shared_types::{Event, Hash, InsertError};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, error};

/// The bidirectional DAG view over received events.
///
/// Thread-unaware: all mutation must be serialized by the owner. See the
/// crate docs for the storage and expiration model.
pub struct ShadowGraph {
    /// Arena slots; `None` marks a freed slot awaiting reuse.
    slots: Vec<Option<ShadowEvent>>,
    /// Freed slot indices available for reuse.
    free: Vec<u32>,
    /// Content hash to arena slot.
    by_hash: HashMap<Hash, ShadowIndex>,
    /// Events with no self-child: the latest known event of each creator
    /// (plus every branch of a fork).
    tips: BTreeSet<ShadowIndex>,
    /// Generations strictly below this are expired. Monotone.
    expired_below: u64,
    reservations: Arc<ReservationLedger>,
    inserted_total: u64,
    duplicates_rejected: u64,
    expired_rejected: u64,
}

impl ShadowGraph {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            by_hash: HashMap::new(),
            tips: BTreeSet::new(),
            expired_below: 0,
            reservations: Arc::new(ReservationLedger::default()),
            inserted_total: 0,
            duplicates_rejected: 0,
            expired_rejected: 0,
        }
    }

    /// Reset to the empty state. The expiration threshold and counters
    /// survive, matching a restart-from-reconnect.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.by_hash.clear();
        self.tips.clear();
    }

    /// Number of live shadow events.
    pub fn num_shadow_events(&self) -> usize {
        self.by_hash.len()
    }

    /// Current expiration threshold: generations strictly below are expired.
    pub fn expired_below(&self) -> u64 {
        self.expired_below
    }

    /// Total successful insertions.
    pub fn inserted_total(&self) -> u64 {
        self.inserted_total
    }

    /// Insertions rejected as duplicates.
    pub fn duplicates_rejected(&self) -> u64 {
        self.duplicates_rejected
    }

    /// Insertions rejected as expired.
    pub fn expired_rejected(&self) -> u64 {
        self.expired_rejected
    }

    /// O(1) lookup by content hash.
    pub fn shadow(&self, hash: &Hash) -> Option<&ShadowEvent> {
        self.by_hash.get(hash).and_then(|&idx| self.get(idx))
    }

    /// Arena index for a content hash.
    pub fn shadow_index(&self, hash: &Hash) -> Option<ShadowIndex> {
        self.by_hash.get(hash).copied()
    }

    /// Resolve an arena index.
    pub fn get(&self, index: ShadowIndex) -> Option<&ShadowEvent> {
        self.slots.get(index.slot()).and_then(|s| s.as_ref())
    }

    /// Iterate all live shadow events in arena order.
    pub fn iter(&self) -> impl Iterator<Item = (ShadowIndex, &ShadowEvent)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|ev| (ShadowIndex(i as u32), ev)))
    }

    /// Current tip set, one entry per creator chain branch.
    pub fn tips(&self) -> impl Iterator<Item = ShadowIndex> + '_ {
        self.tips.iter().copied()
    }

    /// Pin the current expiration threshold for the duration of a sync.
    pub fn reserve(&self) -> GenerationReservation {
        ReservationLedger::reserve(&self.reservations, self.expired_below)
    }

    /// Insert an event, linking it to its parents' shadows.
    ///
    /// A missing parent is tolerated only when that parent's generation is
    /// already expired; otherwise the event belongs in the orphan buffer
    /// and an `UnknownSelfParent`/`UnknownOtherParent` reject is returned.
    pub fn insert(&mut self, event: Arc<Event>) -> Result<ShadowIndex, InsertError> {
        if self.by_hash.contains_key(&event.hash) {
            self.duplicates_rejected += 1;
            return Err(InsertError::Duplicate(event.hash));
        }
        if event.generation() < self.expired_below {
            self.expired_rejected += 1;
            return Err(InsertError::Expired {
                generation: event.generation(),
                expired_below: self.expired_below,
            });
        }

        let self_parent = match event.core.self_parent {
            Some(p) => match self.by_hash.get(&p.hash) {
                Some(&idx) => Some(idx),
                None if p.generation < self.expired_below => None,
                None => return Err(InsertError::UnknownSelfParent(p.hash)),
            },
            None => None,
        };
        let other_parent = match event.core.other_parent {
            Some(p) => match self.by_hash.get(&p.hash) {
                Some(&idx) => Some(idx),
                None if p.generation < self.expired_below => None,
                None => return Err(InsertError::UnknownOtherParent(p.hash)),
            },
            None => None,
        };

        let hash = event.hash;
        let shadow = ShadowEvent::new(event, self_parent, other_parent);
        let index = self.allocate(shadow);

        if let Some(sp) = self_parent {
            self.slot_mut(sp).self_children.insert(index);
            self.tips.remove(&sp);
        }
        if let Some(op) = other_parent {
            self.slot_mut(op).other_children.insert(index);
        }
        self.tips.insert(index);

        self.by_hash.insert(hash, index);
        self.inserted_total += 1;
        Ok(index)
    }

    /// Remove every ancestor of `start` (including `start` itself) for
    /// which `predicate` holds. Removal proceeds oldest to newest; returns
    /// the number of events removed.
    ///
    /// Removing an event that still has a live child outside the batch is a
    /// consistency violation unless the event's generation is already below
    /// the expiration threshold; the whole batch is rejected before any
    /// mutation in that case.
    pub fn remove_ancestry<P>(&mut self, start: ShadowIndex, predicate: P) -> GraphResult<usize>
    where
        P: Fn(&ShadowEvent) -> bool,
    {
        let mut batch = BTreeSet::new();
        let mut stack = vec![start];
        let mut seen = HashSet::new();
        while let Some(index) = stack.pop() {
            if !seen.insert(index) {
                continue;
            }
            let Some(node) = self.get(index) else {
                return Err(GraphError::DanglingIndex { index: index.0 });
            };
            stack.extend(node.parents());
            if predicate(node) {
                batch.insert(index);
            }
        }
        self.remove_batch(&batch)?;
        Ok(batch.len())
    }

    /// Raise the expiration threshold and remove everything underneath it.
    ///
    /// The requested threshold is clamped to the oldest live reservation,
    /// and never lowered. Returns the number of events expired.
    pub fn expire_below(&mut self, threshold: u64) -> GraphResult<usize> {
        let effective = match self.reservations.oldest_pinned() {
            Some(pinned) => threshold.min(pinned),
            None => threshold,
        };
        if effective <= self.expired_below {
            return Ok(0);
        }
        self.expired_below = effective;

        let batch: BTreeSet<ShadowIndex> = self
            .iter()
            .filter(|(_, ev)| ev.generation() < effective)
            .map(|(idx, _)| idx)
            .collect();
        self.remove_batch(&batch)?;
        debug!(
            expired = batch.len(),
            threshold = effective,
            "expired shadow events below generation threshold"
        );
        Ok(batch.len())
    }

    /// Verify the bidirectional link invariant over the whole graph.
    pub fn check_invariants(&self) -> GraphResult<()> {
        for (index, node) in self.iter() {
            if let Some(sp) = node.self_parent() {
                let parent = self
                    .get(sp)
                    .ok_or(GraphError::DanglingIndex { index: sp.0 })?;
                if !parent.self_children().contains(&index) {
                    return Err(self.asymmetric(sp, index));
                }
            }
            if let Some(op) = node.other_parent() {
                let parent = self
                    .get(op)
                    .ok_or(GraphError::DanglingIndex { index: op.0 })?;
                if !parent.other_children().contains(&index) {
                    return Err(self.asymmetric(op, index));
                }
            }
            for child in node.self_children() {
                let c = self
                    .get(*child)
                    .ok_or(GraphError::DanglingIndex { index: child.0 })?;
                if c.self_parent() != Some(index) {
                    return Err(self.asymmetric(index, *child));
                }
            }
            for child in node.other_children() {
                let c = self
                    .get(*child)
                    .ok_or(GraphError::DanglingIndex { index: child.0 })?;
                if c.other_parent() != Some(index) {
                    return Err(self.asymmetric(index, *child));
                }
            }
        }
        Ok(())
    }

    /// Bounded DFS over descendants of `start`, for computing what a peer
    /// is missing. Does not descend past the peer's `frontier` hashes, nor
    /// past `max_tip_generations[creator]`; follows other-children only
    /// when `include_other_children` is set.
    pub fn graph_descendants<'a>(
        &'a self,
        start: ShadowIndex,
        frontier: &'a HashSet<Hash>,
        visited: &'a mut HashSet<ShadowIndex>,
        max_tip_generations: &'a [u64],
        include_other_children: bool,
    ) -> GraphDescendants<'a> {
        GraphDescendants::new(
            self,
            start,
            frontier,
            visited,
            max_tip_generations,
            include_other_children,
        )
    }

    fn allocate(&mut self, shadow: ShadowEvent) -> ShadowIndex {
        match self.free.pop() {
            Some(slot) => {
                self.slots[slot as usize] = Some(shadow);
                ShadowIndex(slot)
            }
            None => {
                self.slots.push(Some(shadow));
                ShadowIndex((self.slots.len() - 1) as u32)
            }
        }
    }

    fn slot_mut(&mut self, index: ShadowIndex) -> &mut ShadowEvent {
        self.slots[index.slot()]
            .as_mut()
            .expect("index points at freed arena slot")
    }

    fn asymmetric(&self, parent: ShadowIndex, child: ShadowIndex) -> GraphError {
        GraphError::AsymmetricLink {
            parent: self.describe(parent),
            child: self.describe(child),
        }
    }

    fn describe(&self, index: ShadowIndex) -> String {
        match self.get(index) {
            Some(node) => format!("{index}:{}", node.event().short_id()),
            None => format!("{index}:<freed>"),
        }
    }

    /// Validate then remove a batch, oldest generation first. Validation
    /// runs before any mutation so a violation leaves the graph untouched.
    fn remove_batch(&mut self, batch: &BTreeSet<ShadowIndex>) -> GraphResult<()> {
        for &index in batch {
            let node = self
                .get(index)
                .ok_or(GraphError::DanglingIndex { index: index.0 })?;
            if node.generation() >= self.expired_below {
                if let Some(child) = node.children().find(|c| !batch.contains(c)) {
                    let err = GraphError::LiveChildRemoval {
                        event: self.describe(index),
                        generation: node.generation(),
                        expired_below: self.expired_below,
                        child: self.describe(child),
                    };
                    error!(%err, "refusing shadow graph removal");
                    return Err(err);
                }
            }
        }

        let mut ordered: Vec<ShadowIndex> = batch.iter().copied().collect();
        ordered.sort_by_key(|&idx| {
            self.get(idx)
                .map(|n| (n.generation(), idx.0))
                .unwrap_or((u64::MAX, idx.0))
        });
        for index in ordered {
            self.remove_one(index);
        }
        Ok(())
    }

    /// Disconnect and free a single slot. Callers have already validated
    /// the batch.
    fn remove_one(&mut self, index: ShadowIndex) {
        let Some(node) = self.slots[index.slot()].take() else {
            return;
        };

        if let Some(sp) = node.self_parent {
            if let Some(parent) = self.slots[sp.slot()].as_mut() {
                parent.self_children.remove(&index);
            }
        }
        if let Some(op) = node.other_parent {
            if let Some(parent) = self.slots[op.slot()].as_mut() {
                parent.other_children.remove(&index);
            }
        }
        for child in node.self_children.iter() {
            if let Some(c) = self.slots[child.slot()].as_mut() {
                c.self_parent = None;
            }
        }
        for child in node.other_children.iter() {
            if let Some(c) = self.slots[child.slot()].as_mut() {
                c.other_parent = None;
            }
        }

        self.by_hash.remove(&node.hash());
        self.tips.remove(&index);
        self.free.push(index.0);
    }
}

impl Default for ShadowGraph {
    fn default() -> Self {
        Self::new()
    }
}
