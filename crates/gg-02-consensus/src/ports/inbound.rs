//! Driving ports (inbound API).

use crate::domain::{ConsensusResult, WitnessHashes};
use async_trait::async_trait;
use shared_types::{Event, FinalizedEvent};
use std::sync::Arc;

/// Primary consensus API, consumed by the event intake and by the sync
/// layer's query path.
///
/// `add_event` is the single mutating entry point; everything else is a
/// read. Implementations serialize mutation internally (single-writer
/// discipline), so callers may invoke these concurrently.
#[async_trait]
pub trait ConsensusApi: Send + Sync {
    /// Feed one validated event into the engine. Returns the events newly
    /// finalized by this call, in consensus order; empty when no round was
    /// newly decided.
    ///
    /// Events must arrive parents-first; the orphan buffer upstream
    /// guarantees this for gossip traffic.
    async fn add_event(&self, event: Arc<Event>) -> ConsensusResult<Vec<FinalizedEvent>>;

    /// The three generations of witness hashes for a decided round, for
    /// the lightweight state-proof exchange.
    async fn witness_hashes(&self, round: u64) -> ConsensusResult<WitnessHashes>;

    /// Highest round any known event was created in.
    async fn max_round(&self) -> u64;

    /// Rounds strictly below this have fully decided fame.
    async fn fame_decided_below(&self) -> u64;

    /// Generations strictly below this are expired.
    async fn min_generation_non_expired(&self) -> u64;

    /// Downstream consumers confirm they no longer need rounds below
    /// `new_min_round`; expires old events and returns the new generation
    /// threshold.
    async fn advance_min_round(&self, new_min_round: u64) -> ConsensusResult<u64>;

    /// Whether each of the event's declared parents is already inserted or
    /// expired. The intake routes events between `add_event` and the
    /// orphan buffer with this.
    async fn parents_satisfied(&self, event: &Event) -> bool;
}
