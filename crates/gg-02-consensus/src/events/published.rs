//! Events published to downstream consumers.

use serde::{Deserialize, Serialize};
use shared_types::FinalizedEvent;

/// Published after a round's fame is fully decided.
///
/// `events` is the complete ordered batch received in this round; state
/// application replays it in order, signature collection keys its state
/// hashes by `round`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundDecidedEvent {
    /// The decided round.
    pub round: u64,
    /// Events received in this round, in consensus order.
    pub events: Vec<FinalizedEvent>,
    /// Minimum generation among the round's famous witnesses; the
    /// expiration boundary candidate once this round is released.
    pub min_judge_generation: Option<u64>,
}

impl RoundDecidedEvent {
    pub fn new(
        round: u64,
        events: Vec<FinalizedEvent>,
        min_judge_generation: Option<u64>,
    ) -> Self {
        Self {
            round,
            events,
            min_judge_generation,
        }
    }
}
