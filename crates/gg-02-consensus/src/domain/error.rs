//! Error types for the consensus engine.

use gg_01_shadow_graph::GraphError;
use thiserror::Error;

/// Consensus engine errors.
///
/// Recoverable intake conditions (duplicates, expired events, unknown
/// parents) never reach this enum; they are absorbed upstream with
/// counters. Everything here either terminates the engine (graph
/// corruption) or signals caller misuse.
#[derive(Debug, Error)]
pub enum ConsensusError {
    /// Shadow graph invariant failure. Fatal: shared state can no longer
    /// be trusted, and continuing risks diverging from other nodes.
    #[error("shadow graph error: {0}")]
    Graph(#[from] GraphError),

    /// The address book has no members or no stake.
    #[error("address book is empty")]
    EmptyAddressBook,

    /// A query asked about a round whose fame is not yet fully decided.
    #[error("round {0} is not decided")]
    RoundNotDecided(u64),

    /// The outbound sink rejected a decided-round publication.
    #[error("finalized sink error: {0}")]
    Sink(String),

    /// The stake table provider failed.
    #[error("stake table error: {0}")]
    StakeTable(String),
}

pub type ConsensusResult<T> = Result<T, ConsensusError>;
