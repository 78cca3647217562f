//! Error types for the shadow graph.
//!
//! Everything here is a consistency violation: shared graph state can no
//! longer be reasoned about, so these are fatal for the consensus process.
//! Recoverable insertion rejects use the shared [`shared_types::InsertError`]
//! taxonomy instead.

use thiserror::Error;

/// Internal invariant failures. Never absorbed, never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A removal would orphan a live child: the removed event's generation
    /// is at or above the expiration threshold, so the child's dangling
    /// parent link could not be explained as "expired".
    #[error(
        "consistency violation: removing live event {event} (generation {generation}, \
         threshold {expired_below}) still referenced by child {child}"
    )]
    LiveChildRemoval {
        event: String,
        generation: u64,
        expired_below: u64,
        child: String,
    },

    /// A parent/child link exists in one direction only.
    #[error("consistency violation: asymmetric link between {parent} and {child}")]
    AsymmetricLink { parent: String, child: String },

    /// An index resolved to an empty arena slot.
    #[error("consistency violation: dangling shadow index {index}")]
    DanglingIndex { index: u32 },
}

pub type GraphResult<T> = Result<T, GraphError>;
