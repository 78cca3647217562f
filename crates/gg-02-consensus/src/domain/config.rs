//! Consensus policy constants.

use serde::{Deserialize, Serialize};
use shared_types::Stake;

/// Tunable policy for the virtual-voting algorithm.
///
/// These are configuration, not correctness assumptions: the algorithm is
/// proven for any strict supermajority fraction above 2/3 and any coin
/// round cadence, as long as every node runs the same values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusConfig {
    /// Every `coin_round_period`-th voting round past a witness's own round
    /// is a coin round: an undecided voter takes the middle bit of its own
    /// signature instead of the majority. Breaks persistent vote deadlock
    /// without shared randomness.
    pub coin_round_period: u64,
    /// Supermajority fraction numerator; fame and round advance require
    /// strictly more than `numerator/denominator` of total stake.
    pub supermajority_numerator: u64,
    /// Supermajority fraction denominator.
    pub supermajority_denominator: u64,
}

impl ConsensusConfig {
    /// Strict supermajority test under the configured fraction:
    /// `observed / total > numerator / denominator`.
    pub fn is_supermajority(&self, observed: Stake, total: Stake) -> bool {
        observed.saturating_mul(self.supermajority_denominator as Stake)
            > total.saturating_mul(self.supermajority_numerator as Stake)
    }
}

impl Default for ConsensusConfig {
    fn default() -> Self {
        Self {
            coin_round_period: 10,
            supermajority_numerator: 2,
            supermajority_denominator: 3,
        }
    }
}
