//! The generations tracker: expiration boundaries derived from decided
//! rounds.
//!
//! Downstream consumers (state application, signature collection) confirm
//! via `advance` that they no longer need rounds below a boundary; the
//! tracker converts that round boundary into the generation threshold the
//! shadow graph and the engine arena expire against. The threshold is the
//! minimum generation among the famous witnesses of the new minimum round:
//! nothing below it can influence any future fame decision or ordering.

use std::collections::BTreeMap;

/// Tracks round and generation boundaries for safe expiration.
#[derive(Debug, Clone, Default)]
pub struct GenerationsTracker {
    /// Lowest round whose events are still retained.
    min_round_non_expired: u64,
    /// Highest round any event has been created in.
    max_round_created: u64,
    /// Generations strictly below this are expired. Monotone.
    min_generation_non_expired: u64,
    /// Minimum famous-witness generation per decided round.
    judge_generations: BTreeMap<u64, u64>,
}

impl GenerationsTracker {
    pub fn min_round_non_expired(&self) -> u64 {
        self.min_round_non_expired
    }

    pub fn max_round_created(&self) -> u64 {
        self.max_round_created
    }

    pub fn min_generation_non_expired(&self) -> u64 {
        self.min_generation_non_expired
    }

    pub fn observe_round_created(&mut self, round: u64) {
        self.max_round_created = self.max_round_created.max(round);
    }

    /// Record the minimum judge generation of a freshly decided round.
    pub fn record_decided_round(&mut self, round: u64, min_judge_generation: u64) {
        self.judge_generations.insert(round, min_judge_generation);
    }

    /// Advance the retained window so `new_min_round` is the oldest round
    /// kept. Returns the new generation threshold.
    ///
    /// The threshold never decreases; advancing past rounds that are not
    /// decided yet clamps to the last decided boundary.
    pub fn advance(&mut self, new_min_round: u64) -> u64 {
        if new_min_round <= self.min_round_non_expired {
            return self.min_generation_non_expired;
        }
        self.min_round_non_expired = new_min_round;

        // The boundary generation comes from the judges of the newest
        // decided round at or below the new minimum; everything strictly
        // below it is unreachable by any future vote or ordering decision.
        if let Some((_, generation)) = self.judge_generations.range(..=new_min_round).next_back() {
            self.min_generation_non_expired = self.min_generation_non_expired.max(*generation);
        }
        self.judge_generations.retain(|r, _| *r >= new_min_round);
        self.min_generation_non_expired
    }
}
