//! # gg-02-consensus
//!
//! The virtual-voting consensus engine: consumes events from the intake,
//! assigns rounds, detects witnesses, decides fame by stake-weighted
//! virtual voting, and emits the strict total order every honest node
//! computes identically.
//!
//! ## Architecture
//!
//! Hexagonal: the algorithm lives in `domain`, the async API seams in
//! `ports`, test doubles in `adapters`. [`ConsensusService`] owns the
//! single-writer lock over the engine plus the shadow graph and implements
//! the inbound [`ports::ConsensusApi`].
//!
//! ## Determinism contract
//!
//! `add_event` output depends only on the set of events inserted, never on
//! arrival order, wall-clock time, or thread timing. Fame decisions use a
//! strict stake supermajority; persistent ties fall back to a coin round
//! whose bit comes from the voter's own signature, so even the fallback is
//! deterministic given the same events.
//!
//! ## Failure semantics
//!
//! Duplicate, expired, and unknown-parent events are recoverable intake
//! conditions, absorbed with counters. A shadow-graph consistency
//! violation is fatal: it propagates out of the service untouched, since
//! continuing after corrupted shared state risks diverging from the rest
//! of the network.

pub mod adapters;
pub mod domain;
pub mod events;
pub mod metrics;
pub mod ports;
pub mod service;

pub use adapters::{InMemorySink, StaticStakeTable};
pub use domain::{
    ConsensusConfig, ConsensusEngine, ConsensusError, ConsensusResult, EventId, Fame,
    GenerationsTracker, WitnessHashes,
};
pub use events::RoundDecidedEvent;
pub use ports::{ConsensusApi, FinalizedSink, StakeTableProvider};
pub use service::ConsensusService;
