//! Round bookkeeping: witness lists and decision state per round.

use crate::domain::record::EventId;
use std::collections::BTreeMap;

/// Per-round state, kept until the expiration boundary passes the round.
#[derive(Debug, Clone, Default)]
pub struct RoundInfo {
    /// Witnesses detected for this round, in insertion order.
    pub witnesses: Vec<EventId>,
    /// All witnesses have decided fame.
    pub decided: bool,
    /// The famous witnesses ("judges"), filled when the round decides.
    pub judges: Vec<EventId>,
    /// Minimum generation among the judges, filled when the round decides;
    /// drives the expiration boundary.
    pub min_judge_generation: Option<u64>,
}

/// Ordered table of known rounds.
#[derive(Debug, Clone, Default)]
pub struct RoundTable {
    rounds: BTreeMap<u64, RoundInfo>,
}

impl RoundTable {
    pub fn get(&self, round: u64) -> Option<&RoundInfo> {
        self.rounds.get(&round)
    }

    pub fn get_mut(&mut self, round: u64) -> Option<&mut RoundInfo> {
        self.rounds.get_mut(&round)
    }

    pub fn entry(&mut self, round: u64) -> &mut RoundInfo {
        self.rounds.entry(round).or_default()
    }

    /// Witnesses of a round, or empty when the round is unknown.
    pub fn witnesses(&self, round: u64) -> &[EventId] {
        self.rounds
            .get(&round)
            .map(|info| info.witnesses.as_slice())
            .unwrap_or(&[])
    }

    pub fn add_witness(&mut self, round: u64, id: EventId) {
        self.entry(round).witnesses.push(id);
    }

    /// Highest round with at least one known event.
    pub fn max_round(&self) -> Option<u64> {
        self.rounds.keys().next_back().copied()
    }

    /// Rounds at or above `round`, ascending.
    pub fn rounds_from(&self, round: u64) -> impl Iterator<Item = (u64, &RoundInfo)> {
        self.rounds.range(round..).map(|(r, info)| (*r, info))
    }

    /// Drop state for rounds strictly below `round`.
    pub fn prune_below(&mut self, round: u64) {
        self.rounds = self.rounds.split_off(&round);
    }
}
