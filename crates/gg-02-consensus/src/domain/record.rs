//! Per-event engine metadata.
//!
//! The engine keeps its own arena of records, separate from the shadow
//! graph: the graph serves gossip and may expire slots independently, while
//! these records carry everything virtual voting derives about an event.
//! All fields are written by the single engine writer only.

use shared_types::{CreatorId, Event, Timestamp};
use std::sync::Arc;

/// Engine-side event identifier: a monotonically increasing insertion
/// sequence number. Never reused, so a dangling id (pointing below the
/// pruned base) is detectable and simply resolves to `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EventId(pub u64);

/// Tri-state fame of a witness. Decided exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Fame {
    #[default]
    Undecided,
    Famous,
    NotFamous,
}

impl Fame {
    pub fn is_decided(self) -> bool {
        !matches!(self, Fame::Undecided)
    }
}

/// Everything the engine knows about one event.
#[derive(Debug, Clone)]
pub struct EventRecord {
    pub event: Arc<Event>,
    pub self_parent: Option<EventId>,
    pub other_parent: Option<EventId>,
    /// Position in the creator's self-parent chain (count of self-ancestors).
    pub seq: u64,
    /// Round this event was created in. Write-once, assigned at insertion.
    pub round_created: u64,
    /// First event of its creator in `round_created`.
    pub witness: bool,
    /// Fame, meaningful only for witnesses.
    pub fame: Fame,
    /// Parents were expired before insertion: excluded from voting and
    /// ordering, retained only so descendants can link.
    pub stale: bool,
    /// Whether a second self-child of this event has been observed (the
    /// local end of fork detection).
    pub has_self_child: bool,
    /// Per creator: the highest-seq event of that creator in this event's
    /// ancestry (including itself). The basis of all seeing queries.
    pub last_seen: Vec<Option<EventId>>,
    /// Per creator: whether this event's ancestry contains two events of
    /// that creator on diverging self-parent branches. An observer that
    /// sees a fork by `c` sees no event of `c` at all.
    pub forks_seen: Vec<bool>,
    /// Round in which the event reached consensus. Write-once.
    pub round_received: Option<u64>,
    pub consensus_timestamp: Option<Timestamp>,
    pub consensus_order: Option<u64>,
}

impl EventRecord {
    pub fn creator(&self) -> CreatorId {
        self.event.creator()
    }

    pub fn generation(&self) -> u64 {
        self.event.generation()
    }

    pub fn timestamp(&self) -> Timestamp {
        self.event.core.timestamp
    }

    pub fn is_finalized(&self) -> bool {
        self.round_received.is_some()
    }

    /// The deterministic coin bit for coin rounds: the middle bit of the
    /// creator's signature over this event.
    pub fn coin_bit(&self) -> bool {
        let sig = &self.event.signature;
        sig[sig.len() / 2] & 1 == 1
    }
}
