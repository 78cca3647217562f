//! # Shared Error Types
//!
//! The insertion taxonomy is shared between the shadow graph and the event
//! intake so that rejection reasons route identically everywhere: duplicates
//! and expired events are absorbed with a counter, unknown-parent events go
//! to the orphan buffer.

use crate::entities::Hash;
use thiserror::Error;

/// Short hex prefix of a hash, for error messages and log lines.
fn short(hash: &Hash) -> String {
    hex::encode(&hash[..4])
}

/// Why an event could not be inserted into the shadow graph.
///
/// All variants are recoverable at the intake layer; none is fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InsertError {
    /// The event's hash is already present. Ignored, counted.
    #[error("duplicate event: {}", short(.0))]
    Duplicate(Hash),

    /// The event's generation is below the expiration threshold. Rejected,
    /// counted.
    #[error("expired event: generation {generation} below threshold {expired_below}")]
    Expired { generation: u64, expired_below: u64 },

    /// The self-parent is not in the graph and its generation is not
    /// expired. The event must wait in the orphan buffer.
    #[error("unknown self-parent: {}", short(.0))]
    UnknownSelfParent(Hash),

    /// The other-parent is not in the graph and its generation is not
    /// expired. The event must wait in the orphan buffer.
    #[error("unknown other-parent: {}", short(.0))]
    UnknownOtherParent(Hash),
}

impl InsertError {
    /// Whether the caller should buffer the event and retry once the named
    /// parent arrives.
    pub fn is_unknown_parent(&self) -> bool {
        matches!(
            self,
            InsertError::UnknownSelfParent(_) | InsertError::UnknownOtherParent(_)
        )
    }

    /// The missing parent hash, when buffering applies.
    pub fn missing_parent(&self) -> Option<Hash> {
        match self {
            InsertError::UnknownSelfParent(h) | InsertError::UnknownOtherParent(h) => Some(*h),
            _ => None,
        }
    }
}
