//! # Core Domain Entities
//!
//! Defines the event DAG entities shared across subsystems.
//!
//! ## Clusters
//!
//! - **Identity**: `Hash`, `Signature`, `CreatorId`, `Timestamp`
//! - **Gossip**: `Transaction`, `ParentRef`, `EventCore`, `Event`
//! - **Consensus output**: `FinalizedEvent`

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};
use sha3::{Digest, Sha3_256};
use std::fmt;
use std::sync::Arc;

/// A 32-byte content hash (SHA3-256).
pub type Hash = [u8; 32];

/// A 64-byte signature over an event's content hash.
///
/// Signatures are produced and verified by the (out-of-scope) crypto layer
/// before events reach the consensus core; here they are opaque bytes. The
/// consensus engine reads a single deterministic bit out of them during coin
/// rounds.
pub type Signature = [u8; 64];

/// Milliseconds since the Unix epoch, as reported by the creator's clock.
///
/// Creator clocks are never trusted for ordering; the only consumer is the
/// median consensus-timestamp computation.
pub type Timestamp = u64;

/// Identifier of an event creator: a dense index into the address book.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct CreatorId(pub u64);

impl CreatorId {
    /// The creator's position in per-creator vectors.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for CreatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

/// An opaque application transaction carried by an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Application payload bytes; the consensus core never inspects them.
    pub payload: Vec<u8>,
}

impl Transaction {
    pub fn new(payload: Vec<u8>) -> Self {
        Self { payload }
    }
}

/// A reference to a parent event: its hash plus its generation.
///
/// Carrying the parent generation lets a receiver decide locally whether a
/// missing parent is already expired (tolerated) or genuinely unknown (the
/// event must wait in the orphan buffer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentRef {
    pub hash: Hash,
    pub generation: u64,
}

/// The immutable, signed portion of an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventCore {
    /// The member that created this event.
    pub creator: CreatorId,
    /// The creator's own previous event. `None` only for a creator's first
    /// event.
    pub self_parent: Option<ParentRef>,
    /// The event received from a peer during the sync that triggered this
    /// event's creation. `None` only for a creator's first event.
    pub other_parent: Option<ParentRef>,
    /// max(parent generations) + 1, or 0 with no parents.
    pub generation: u64,
    /// Creation wall-clock time claimed by the creator.
    pub timestamp: Timestamp,
    /// Transactions batched into this event, in creator order.
    pub transactions: Vec<Transaction>,
}

impl EventCore {
    /// Compute the content hash over the canonical byte encoding.
    ///
    /// The encoding is fixed-order and length-prefixed, so the hash is
    /// identical on every node regardless of serialization framework.
    pub fn content_hash(&self) -> Hash {
        let mut hasher = Sha3_256::new();
        hasher.update(self.creator.0.to_le_bytes());
        for parent in [&self.self_parent, &self.other_parent] {
            match parent {
                Some(p) => {
                    hasher.update([1u8]);
                    hasher.update(p.hash);
                    hasher.update(p.generation.to_le_bytes());
                }
                None => hasher.update([0u8]),
            }
        }
        hasher.update(self.generation.to_le_bytes());
        hasher.update(self.timestamp.to_le_bytes());
        hasher.update((self.transactions.len() as u64).to_le_bytes());
        for tx in &self.transactions {
            hasher.update((tx.payload.len() as u64).to_le_bytes());
            hasher.update(&tx.payload);
        }
        hasher.finalize().into()
    }
}

/// An immutable DAG event as received from gossip or created locally.
///
/// Events reaching the consensus core have already had their signature and
/// structural well-formedness verified by the transport layer. The content
/// hash is computed once at construction and is the event's identity
/// everywhere in the system.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub core: EventCore,
    /// Signature by the creator over the content hash.
    #[serde_as(as = "Bytes")]
    pub signature: Signature,
    /// Content hash of `core`.
    pub hash: Hash,
}

impl Event {
    /// Build an event, computing its content hash.
    pub fn new(core: EventCore, signature: Signature) -> Self {
        let hash = core.content_hash();
        Self {
            core,
            signature,
            hash,
        }
    }

    pub fn creator(&self) -> CreatorId {
        self.core.creator
    }

    pub fn generation(&self) -> u64 {
        self.core.generation
    }

    pub fn self_parent_hash(&self) -> Option<Hash> {
        self.core.self_parent.map(|p| p.hash)
    }

    pub fn other_parent_hash(&self) -> Option<Hash> {
        self.core.other_parent.map(|p| p.hash)
    }

    /// Short hex prefix of the hash, for log lines.
    pub fn short_id(&self) -> String {
        hex::encode(&self.hash[..4])
    }
}

/// A finalized event as published to downstream consumers.
///
/// `round_received`, `consensus_timestamp` and `consensus_order` are
/// write-once: they are assigned when the event's round is decided and never
/// change afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinalizedEvent {
    /// The underlying immutable event.
    pub event: Arc<Event>,
    /// The round in which a supermajority of famous witnesses saw the event.
    pub round_received: u64,
    /// Median of the timestamps at which the famous witnesses first saw the
    /// event.
    pub consensus_timestamp: Timestamp,
    /// Global, strictly increasing position in the consensus order.
    pub consensus_order: u64,
}
