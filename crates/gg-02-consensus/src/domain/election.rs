//! Fame election state.
//!
//! One election runs per fame-undecided witness. Voters are the witnesses
//! of later rounds; a vote, once computed from the DAG, never changes,
//! because a voter's ancestry is fixed at creation. The engine owns the
//! traversal; this module owns the bookkeeping and stake arithmetic.

use crate::domain::record::EventId;
use shared_types::Stake;
use std::collections::HashMap;

/// Stake-weighted vote totals for one voting round of one election.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub yes: Stake,
    pub no: Stake,
}

impl Tally {
    pub fn add(&mut self, vote: bool, stake: Stake) {
        if vote {
            self.yes = self.yes.saturating_add(stake);
        } else {
            self.no = self.no.saturating_add(stake);
        }
    }

    /// The majority side; ties vote yes.
    pub fn majority(&self) -> bool {
        self.yes >= self.no
    }

    /// Stake of the majority side.
    pub fn winning_stake(&self) -> Stake {
        self.yes.max(self.no)
    }
}

/// The running election for one witness's fame.
#[derive(Debug, Clone)]
pub struct Election {
    pub candidate: EventId,
    pub candidate_round: u64,
    /// Vote of every witness that has voted so far, keyed by voter.
    votes: HashMap<EventId, bool>,
}

impl Election {
    pub fn new(candidate: EventId, candidate_round: u64) -> Self {
        Self {
            candidate,
            candidate_round,
            votes: HashMap::new(),
        }
    }

    pub fn record_vote(&mut self, voter: EventId, vote: bool) {
        self.votes.insert(voter, vote);
    }

    pub fn vote_of(&self, voter: EventId) -> Option<bool> {
        self.votes.get(&voter).copied()
    }

    pub fn has_voted(&self, voter: EventId) -> bool {
        self.votes.contains_key(&voter)
    }

    /// Tally the recorded votes of the given voters with their stakes.
    /// Voters without a recorded vote are skipped: a voter that never
    /// voted is one the tallying witness cannot strongly see, so its
    /// absence is correct, not an error.
    pub fn tally<I>(&self, voters: I) -> Tally
    where
        I: IntoIterator<Item = (EventId, Stake)>,
    {
        let mut tally = Tally::default();
        for (voter, stake) in voters {
            if let Some(vote) = self.vote_of(voter) {
                tally.add(vote, stake);
            }
        }
        tally
    }
}
