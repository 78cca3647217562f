//! The virtual-voting consensus engine.
//!
//! `add_event` is the only mutating entry point. For each event it:
//!
//! 1. links the event into the engine arena and computes its seeing
//!    vectors from its parents,
//! 2. assigns its round (max parent round, plus one if the event strongly
//!    sees a stake supermajority of that round's witnesses) and detects
//!    whether it is a witness,
//! 3. runs the fame elections the new event participates in, and
//! 4. finalizes every round whose witnesses all have decided fame,
//!    returning the newly ordered events.
//!
//! Every query here is a pure function of DAG ancestry, so the output is
//! identical for any arrival order of the same event set.

use crate::domain::config::ConsensusConfig;
use crate::domain::election::Election;
use crate::domain::error::{ConsensusError, ConsensusResult};
use crate::domain::generations::GenerationsTracker;
use crate::domain::record::{EventId, EventRecord, Fame};
use crate::domain::rounds::RoundTable;
use shared_types::{AddressBook, CreatorId, Event, FinalizedEvent, Hash, Stake};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;
use tracing::{debug, info};

/// Rounds start here; a parentless event is a witness in round 0. Genesis
/// witnesses have no ancestry, so the first round that can receive events
/// is round 1.
pub(crate) const FIRST_ROUND: u64 = 0;

/// The three generations of witness hashes associated with a decided
/// round: the famous witnesses, and the witnesses of the two preceding
/// rounds that are ancestors of those famous witnesses. Used by the
/// lightweight state-proof exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WitnessHashes {
    pub round: u64,
    /// Famous witnesses of `round`, sorted by hash.
    pub famous: Vec<Hash>,
    /// Witnesses of `round - 1` that are ancestors of the famous set.
    pub previous: Vec<Hash>,
    /// Witnesses of `round - 2` that are ancestors of the famous set.
    pub earlier: Vec<Hash>,
}

/// The consensus state machine. Single-writer: all mutation flows through
/// [`ConsensusEngine::add_event`] and
/// [`ConsensusEngine::advance_min_round`].
pub struct ConsensusEngine {
    config: ConsensusConfig,
    /// Arena of engine records. Ids are insertion sequence numbers and are
    /// never reused; `base` is the id of the front slot.
    records: VecDeque<Option<EventRecord>>,
    base: u64,
    by_hash: HashMap<Hash, EventId>,
    pub(crate) rounds: RoundTable,
    /// Open fame elections, keyed by candidate witness.
    elections: HashMap<EventId, Election>,
    /// Rounds strictly below this have fully decided fame.
    fame_decided_below: u64,
    /// Creators with an observed fork anywhere in the graph. Membership
    /// only widens the self-ancestry check from O(1) to a chain walk.
    forked_creators: HashSet<CreatorId>,
    /// Creators whose parentless first event has been seen; a second
    /// parentless event by the same creator is a fork with no shared
    /// parent to betray it.
    creators_with_genesis: HashSet<CreatorId>,
    tracker: GenerationsTracker,
    pub(crate) next_consensus_order: u64,
    duplicate_events: u64,
    stale_events: u64,
    forks_detected: u64,
}

impl ConsensusEngine {
    pub fn new(config: ConsensusConfig) -> Self {
        Self {
            config,
            records: VecDeque::new(),
            base: 0,
            by_hash: HashMap::new(),
            rounds: RoundTable::default(),
            elections: HashMap::new(),
            fame_decided_below: FIRST_ROUND,
            forked_creators: HashSet::new(),
            creators_with_genesis: HashSet::new(),
            tracker: GenerationsTracker::default(),
            next_consensus_order: 0,
            duplicate_events: 0,
            stale_events: 0,
            forks_detected: 0,
        }
    }

    pub fn config(&self) -> &ConsensusConfig {
        &self.config
    }

    pub fn tracker(&self) -> &GenerationsTracker {
        &self.tracker
    }

    /// Rounds strictly below this have fully decided fame.
    pub fn fame_decided_below(&self) -> u64 {
        self.fame_decided_below
    }

    pub fn max_round(&self) -> u64 {
        self.rounds.max_round().unwrap_or(0)
    }

    pub fn num_events(&self) -> usize {
        self.by_hash.len()
    }

    pub fn duplicate_events(&self) -> u64 {
        self.duplicate_events
    }

    pub fn stale_events(&self) -> u64 {
        self.stale_events
    }

    pub fn forks_detected(&self) -> u64 {
        self.forks_detected
    }

    /// Engine id for a content hash.
    pub fn event_id(&self, hash: &Hash) -> Option<EventId> {
        self.by_hash.get(hash).copied()
    }

    /// Engine record for a content hash.
    pub fn record_by_hash(&self, hash: &Hash) -> Option<&EventRecord> {
        self.event_id(hash).and_then(|id| self.resolve(id))
    }

    pub(crate) fn resolve(&self, id: EventId) -> Option<&EventRecord> {
        let offset = id.0.checked_sub(self.base)?;
        self.records.get(offset as usize)?.as_ref()
    }

    pub(crate) fn resolve_mut(&mut self, id: EventId) -> Option<&mut EventRecord> {
        let offset = id.0.checked_sub(self.base)?;
        self.records.get_mut(offset as usize)?.as_mut()
    }

    /// Ids of all live records, ascending (insertion order).
    pub(crate) fn live_ids(&self) -> impl Iterator<Item = EventId> + '_ {
        let base = self.base;
        self.records
            .iter()
            .enumerate()
            .filter_map(move |(offset, slot)| {
                slot.as_ref().map(|_| EventId(base + offset as u64))
            })
    }

    /// Feed one event through the state machine. Returns the events newly
    /// finalized by this call, in consensus order; empty when no round was
    /// newly decided.
    pub fn add_event(
        &mut self,
        event: Arc<Event>,
        book: &AddressBook,
    ) -> ConsensusResult<Vec<FinalizedEvent>> {
        if book.is_empty() || book.total_stake() == 0 {
            return Err(ConsensusError::EmptyAddressBook);
        }
        if self.by_hash.contains_key(&event.hash) {
            self.duplicate_events += 1;
            return Ok(Vec::new());
        }

        let self_parent = self.resolve_parent(event.core.self_parent.map(|p| p.hash));
        let other_parent = self.resolve_parent(event.core.other_parent.map(|p| p.hash));

        // A declared parent that cannot be resolved was expired before this
        // event arrived (the shadow graph rejects genuinely unknown
        // parents). Such an event, and anything built on a stale event,
        // cannot be voted on deterministically: keep it linkable, exclude
        // it from consensus.
        let stale = matches!(self_parent, Parent::Stale)
            || matches!(other_parent, Parent::Stale)
            || event.generation() < self.tracker.min_generation_non_expired();

        let sp_id = self_parent.id();
        let op_id = other_parent.id();
        let id = EventId(self.base + self.records.len() as u64);

        if stale {
            self.insert_stale(id, event, sp_id, op_id, book.len());
            return Ok(Vec::new());
        }

        let seq = sp_id
            .and_then(|sp| self.resolve(sp))
            .map_or(0, |sp| sp.seq + 1);
        self.detect_self_fork(sp_id, event.creator());
        let (last_seen, forks_seen) = self.merge_parent_vectors(
            id,
            event.creator(),
            sp_id,
            op_id,
            book.len(),
        );

        let record = EventRecord {
            event,
            self_parent: sp_id,
            other_parent: op_id,
            seq,
            round_created: 0,
            witness: false,
            fame: Fame::Undecided,
            stale: false,
            has_self_child: false,
            last_seen,
            forks_seen,
            round_received: None,
            consensus_timestamp: None,
            consensus_order: None,
        };
        let hash = record.event.hash;
        self.records.push_back(Some(record));
        self.by_hash.insert(hash, id);
        if let Some(sp) = sp_id {
            if let Some(parent) = self.resolve_mut(sp) {
                parent.has_self_child = true;
            }
        }

        let (round, witness) = self.assign_round(id, sp_id, op_id, book);
        {
            let record = self.resolve_mut(id).expect("freshly inserted record");
            record.round_created = round;
            record.witness = witness;
        }
        self.tracker.observe_round_created(round);
        if witness {
            self.rounds.add_witness(round, id);
            self.run_elections_for(id, round, book);
        }

        self.decide_rounds(book)
    }

    /// Fame election entry: a new witness opens its own election (voted on
    /// by every later-round witness already present) and votes in every
    /// election for earlier-round candidates.
    fn run_elections_for(&mut self, id: EventId, round: u64, book: &AddressBook) {
        if round >= self.fame_decided_below {
            let mut election = Election::new(id, round);
            let voters: Vec<EventId> = self
                .rounds
                .rounds_from(round + 1)
                .flat_map(|(_, info)| info.witnesses.iter().copied())
                .collect();
            let mut decided = None;
            for voter in voters {
                if let Some(famous) = self.apply_vote(&mut election, voter, book) {
                    decided = Some(famous);
                    break;
                }
            }
            match decided {
                Some(famous) => self.conclude_election(id, famous),
                None => {
                    self.elections.insert(id, election);
                }
            }
        }

        let candidates: Vec<EventId> = self
            .elections
            .values()
            .filter(|e| e.candidate_round < round)
            .map(|e| e.candidate)
            .collect();
        for candidate in candidates {
            let mut election = self
                .elections
                .remove(&candidate)
                .expect("candidate collected from live elections");
            match self.apply_vote(&mut election, id, book) {
                Some(famous) => self.conclude_election(candidate, famous),
                None => {
                    self.elections.insert(candidate, election);
                }
            }
        }
    }

    /// Compute and record one voter's vote. Returns the decided fame when
    /// the voter observes a supermajority in a normal round.
    fn apply_vote(
        &self,
        election: &mut Election,
        voter: EventId,
        book: &AddressBook,
    ) -> Option<bool> {
        if election.has_voted(voter) {
            return None;
        }
        let voter_record = self.resolve(voter)?;
        let voter_round = voter_record.round_created;
        if voter_round <= election.candidate_round {
            return None;
        }
        let diff = voter_round - election.candidate_round;

        if diff == 1 {
            // First voting round: vote whether the voter sees the
            // candidate at all.
            election.record_vote(voter, self.sees(voter, election.candidate));
            return None;
        }

        // Later rounds: tally the previous round's voters this witness
        // strongly sees, weighted by stake.
        let prev_voters: Vec<(EventId, Stake)> = self
            .rounds
            .witnesses(voter_round - 1)
            .iter()
            .copied()
            .filter(|w| self.strongly_sees(voter, *w, book))
            .map(|w| {
                let stake = self
                    .resolve(w)
                    .map_or(0, |rec| book.stake(rec.creator()));
                (w, stake)
            })
            .collect();
        let tally = election.tally(prev_voters);
        let supermajority = self
            .config
            .is_supermajority(tally.winning_stake(), book.total_stake());

        if diff % self.config.coin_round_period == 0 {
            // Coin round: never decides. An undecided voter flips its own
            // deterministic signature bit.
            let vote = if supermajority {
                tally.majority()
            } else {
                voter_record.coin_bit()
            };
            election.record_vote(voter, vote);
            None
        } else {
            let vote = tally.majority();
            election.record_vote(voter, vote);
            if supermajority {
                Some(vote)
            } else {
                None
            }
        }
    }

    fn conclude_election(&mut self, candidate: EventId, famous: bool) {
        if let Some(record) = self.resolve_mut(candidate) {
            record.fame = if famous { Fame::Famous } else { Fame::NotFamous };
            debug!(
                witness = %record.event.short_id(),
                round = record.round_created,
                famous,
                "witness fame decided"
            );
        }
        self.elections.remove(&candidate);
    }

    /// Decide rounds in order while every known witness of the oldest
    /// undecided round has decided fame, finalizing each decided round's
    /// events.
    fn decide_rounds(&mut self, book: &AddressBook) -> ConsensusResult<Vec<FinalizedEvent>> {
        let mut finalized = Vec::new();
        loop {
            let round = self.fame_decided_below;
            let Some(info) = self.rounds.get(round) else {
                break;
            };
            if info.witnesses.is_empty()
                || !info
                    .witnesses
                    .iter()
                    .all(|w| self.resolve(*w).is_some_and(|r| r.fame.is_decided()))
            {
                break;
            }

            let mut judges: Vec<EventId> = info
                .witnesses
                .iter()
                .copied()
                .filter(|w| {
                    self.resolve(*w)
                        .is_some_and(|r| r.fame == Fame::Famous)
                })
                .collect();
            judges.sort_by_key(|j| self.resolve(*j).map(|r| r.event.hash));

            let min_judge_generation = judges
                .iter()
                .filter_map(|j| self.resolve(*j))
                .map(|r| r.generation())
                .min();
            if let Some(generation) = min_judge_generation {
                self.tracker.record_decided_round(round, generation);
            }
            {
                let info = self.rounds.get_mut(round).expect("round exists");
                info.decided = true;
                info.judges = judges.clone();
                info.min_judge_generation = min_judge_generation;
            }
            self.fame_decided_below = round + 1;

            let batch = self.finalize_round(round, &judges, book);
            info!(
                round,
                judges = judges.len(),
                finalized = batch.len(),
                "round decided"
            );
            finalized.extend(batch);
        }
        Ok(finalized)
    }

    /// Minimum famous-witness generation of a decided round.
    pub fn min_judge_generation(&self, round: u64) -> Option<u64> {
        self.rounds
            .get(round)
            .and_then(|info| info.min_judge_generation)
    }

    /// Witness hash triple for a decided round.
    pub fn witness_hashes(&self, round: u64) -> ConsensusResult<WitnessHashes> {
        let info = self
            .rounds
            .get(round)
            .filter(|info| info.decided)
            .ok_or(ConsensusError::RoundNotDecided(round))?;

        let famous: Vec<Hash> = info
            .judges
            .iter()
            .filter_map(|j| self.resolve(*j))
            .map(|r| r.event.hash)
            .collect();

        let ancestors_of_judges = |r: u64| -> Vec<Hash> {
            let mut hashes: Vec<Hash> = self
                .rounds
                .witnesses(r)
                .iter()
                .copied()
                .filter(|w| {
                    info.judges
                        .iter()
                        .any(|j| self.has_ancestor(*j, *w))
                })
                .filter_map(|w| self.resolve(w))
                .map(|rec| rec.event.hash)
                .collect();
            hashes.sort_unstable();
            hashes
        };

        Ok(WitnessHashes {
            round,
            famous,
            previous: round
                .checked_sub(1)
                .map(ancestors_of_judges)
                .unwrap_or_default(),
            earlier: round
                .checked_sub(2)
                .map(ancestors_of_judges)
                .unwrap_or_default(),
        })
    }

    /// Advance the retained window; prunes engine records below the new
    /// generation threshold and returns it for the shadow graph to apply.
    pub fn advance_min_round(&mut self, new_min_round: u64) -> u64 {
        let threshold = self.tracker.advance(new_min_round);
        for offset in 0..self.records.len() {
            let id = EventId(self.base + offset as u64);
            let prune = match &self.records[offset] {
                Some(record) => {
                    record.generation() < threshold && !self.elections.contains_key(&id)
                }
                None => false,
            };
            if prune {
                if let Some(record) = self.records[offset].take() {
                    self.by_hash.remove(&record.event.hash);
                }
            }
        }
        while matches!(self.records.front(), Some(None)) {
            self.records.pop_front();
            self.base += 1;
        }
        self.rounds
            .prune_below(self.tracker.min_round_non_expired());
        threshold
    }

    // === SEEING QUERIES ===

    /// Fork-aware seeing: `x` sees `y` iff `y` is an ancestor of `x` and
    /// `x` has no fork by `y`'s creator in its ancestry.
    pub fn sees(&self, x: EventId, y: EventId) -> bool {
        let Some(xr) = self.resolve(x) else {
            return false;
        };
        self.sees_from(&xr.last_seen, &xr.forks_seen, y)
    }

    /// Plain ancestry, ignoring forks. Used for witness-hash queries and
    /// first-receiver timestamps where fork punishment is irrelevant.
    pub fn has_ancestor(&self, x: EventId, y: EventId) -> bool {
        if x == y {
            return true;
        }
        let Some(xr) = self.resolve(x) else {
            return false;
        };
        self.chain_reaches(&xr.last_seen, y)
    }

    /// Strongly seeing: `x` descends from events of a stake supermajority
    /// of creators that each see `y`.
    pub fn strongly_sees(&self, x: EventId, y: EventId, book: &AddressBook) -> bool {
        let Some(xr) = self.resolve(x) else {
            return false;
        };
        self.strongly_sees_from(&xr.last_seen, y, book)
    }

    fn sees_from(&self, last_seen: &[Option<EventId>], forks_seen: &[bool], y: EventId) -> bool {
        let Some(yr) = self.resolve(y) else {
            return false;
        };
        let c = yr.creator().index();
        if forks_seen.get(c).copied().unwrap_or(false) {
            return false;
        }
        self.chain_reaches(last_seen, y)
    }

    fn chain_reaches(&self, last_seen: &[Option<EventId>], y: EventId) -> bool {
        let Some(yr) = self.resolve(y) else {
            return false;
        };
        let c = yr.creator().index();
        let Some(m) = last_seen.get(c).copied().flatten() else {
            return false;
        };
        if m == y {
            return true;
        }
        let Some(mr) = self.resolve(m) else {
            return false;
        };
        yr.seq <= mr.seq && self.on_self_chain(y, m)
    }

    fn strongly_sees_from(
        &self,
        last_seen: &[Option<EventId>],
        y: EventId,
        book: &AddressBook,
    ) -> bool {
        let mut stake: Stake = 0;
        for (c, seen) in last_seen.iter().enumerate() {
            if let Some(m) = seen {
                if self.sees(*m, y) {
                    stake = stake.saturating_add(book.stake(CreatorId(c as u64)));
                }
            }
        }
        self.config.is_supermajority(stake, book.total_stake())
    }

    /// Whether `anc` lies on `desc`'s self-parent chain. O(1) for an
    /// unforked creator (the chain is unique, so the caller's seq
    /// comparison suffices); walks the chain otherwise.
    fn on_self_chain(&self, anc: EventId, desc: EventId) -> bool {
        let (Some(ar), Some(dr)) = (self.resolve(anc), self.resolve(desc)) else {
            return false;
        };
        if ar.creator() != dr.creator() {
            return false;
        }
        if !self.forked_creators.contains(&ar.creator()) {
            return ar.seq <= dr.seq;
        }
        let mut current = desc;
        loop {
            if current == anc {
                return true;
            }
            let Some(rec) = self.resolve(current) else {
                return false;
            };
            if rec.seq <= ar.seq {
                return false;
            }
            match rec.self_parent {
                Some(sp) => current = sp,
                None => return false,
            }
        }
    }

    // === INSERTION HELPERS ===

    fn resolve_parent(&self, declared: Option<Hash>) -> Parent {
        let Some(hash) = declared else {
            return Parent::None;
        };
        match self.by_hash.get(&hash) {
            Some(&id) if self.resolve(id).is_some_and(|r| !r.stale) => Parent::Known(id),
            _ => Parent::Stale,
        }
    }

    fn insert_stale(
        &mut self,
        id: EventId,
        event: Arc<Event>,
        self_parent: Option<EventId>,
        other_parent: Option<EventId>,
        creators: usize,
    ) {
        self.stale_events += 1;
        debug!(event = %event.short_id(), "stale event excluded from consensus");
        let hash = event.hash;
        self.records.push_back(Some(EventRecord {
            event,
            self_parent,
            other_parent,
            seq: 0,
            round_created: 0,
            witness: false,
            fame: Fame::Undecided,
            stale: true,
            has_self_child: false,
            last_seen: vec![None; creators],
            forks_seen: vec![false; creators],
            round_received: None,
            consensus_timestamp: None,
            consensus_order: None,
        }));
        self.by_hash.insert(hash, id);
    }

    /// A second self-child on the same parent, or a second parentless
    /// first event, is a fork by that creator.
    fn detect_self_fork(&mut self, self_parent: Option<EventId>, creator: CreatorId) {
        let forked = match self_parent {
            Some(sp) => self
                .resolve(sp)
                .is_some_and(|parent| parent.has_self_child),
            None => !self.creators_with_genesis.insert(creator),
        };
        if forked && self.forked_creators.insert(creator) {
            self.forks_detected += 1;
            info!(%creator, "fork detected: creator branched its self-parent chain");
        }
    }

    /// Merge the parents' seeing vectors into the new event's, detecting
    /// forks made visible by the merge.
    fn merge_parent_vectors(
        &mut self,
        id: EventId,
        creator: CreatorId,
        self_parent: Option<EventId>,
        other_parent: Option<EventId>,
        creators: usize,
    ) -> (Vec<Option<EventId>>, Vec<bool>) {
        let mut last_seen: Vec<Option<EventId>> = vec![None; creators];
        let mut forks_seen: Vec<bool> = vec![false; creators];
        let mut newly_forked: Vec<CreatorId> = Vec::new();

        for c in 0..creators {
            let mut sp_seen = None;
            let mut op_seen = None;
            if let Some(sp) = self_parent.and_then(|p| self.resolve(p)) {
                forks_seen[c] = forks_seen[c] || sp.forks_seen.get(c).copied().unwrap_or(false);
                sp_seen = sp.last_seen.get(c).copied().flatten();
            }
            if let Some(op) = other_parent.and_then(|p| self.resolve(p)) {
                forks_seen[c] = forks_seen[c] || op.forks_seen.get(c).copied().unwrap_or(false);
                op_seen = op.last_seen.get(c).copied().flatten();
            }
            last_seen[c] = self.merge_seen(sp_seen, op_seen, &mut forks_seen[c]);
            if forks_seen[c] {
                newly_forked.push(CreatorId(c as u64));
            }
        }

        // The event's own creator entry is the event itself. A merged
        // ancestor of the same creator that is not the self-parent means
        // the creator's chain branched somewhere in this event's ancestry.
        let own = creator.index();
        if own < creators {
            if last_seen[own] != self_parent && last_seen[own].is_some() {
                forks_seen[own] = true;
                newly_forked.push(creator);
            }
            last_seen[own] = Some(id);
        }

        for c in newly_forked {
            if self.forked_creators.insert(c) {
                self.forks_detected += 1;
                info!(creator = %c, "fork detected in merged ancestry");
            }
        }
        (last_seen, forks_seen)
    }

    /// Pick the later of two seen events of one creator; divergent (not
    /// self-ancestor-related) candidates flag a fork.
    fn merge_seen(
        &self,
        a: Option<EventId>,
        b: Option<EventId>,
        fork: &mut bool,
    ) -> Option<EventId> {
        match (a, b) {
            (None, other) | (other, None) => other,
            (Some(a), Some(b)) if a == b => Some(a),
            (Some(a), Some(b)) => {
                let (ar, br) = match (self.resolve(a), self.resolve(b)) {
                    (Some(ar), Some(br)) => (ar, br),
                    // A pruned candidate is an expired ancestor; keep the
                    // live one.
                    (Some(_), None) => return Some(a),
                    (None, Some(_)) => return Some(b),
                    (None, None) => return None,
                };
                let (lo, hi) = if (ar.seq, ar.event.hash) <= (br.seq, br.event.hash) {
                    (a, b)
                } else {
                    (b, a)
                };
                if ar.seq == br.seq || !self.on_self_chain(lo, hi) {
                    *fork = true;
                }
                Some(hi)
            }
        }
    }

    /// Round assignment: max parent round, advanced by one when the event
    /// strongly sees a stake supermajority of that round's witnesses.
    /// Also decides witness-ness (first event of its creator in its round).
    fn assign_round(
        &self,
        id: EventId,
        self_parent: Option<EventId>,
        other_parent: Option<EventId>,
        book: &AddressBook,
    ) -> (u64, bool) {
        let parent_round = self_parent
            .iter()
            .chain(other_parent.iter())
            .filter_map(|p| self.resolve(*p))
            .map(|r| r.round_created)
            .max();

        let Some(parent_round) = parent_round else {
            return (FIRST_ROUND, true);
        };

        let witnesses = self.rounds.witnesses(parent_round);
        let mut seen_stake: Stake = 0;
        for w in witnesses {
            if self.strongly_sees(id, *w, book) {
                let stake = self
                    .resolve(*w)
                    .map_or(0, |rec| book.stake(rec.creator()));
                seen_stake = seen_stake.saturating_add(stake);
            }
        }
        let round = if self
            .config
            .is_supermajority(seen_stake, book.total_stake())
        {
            parent_round + 1
        } else {
            parent_round
        };

        let self_parent_round = self_parent
            .and_then(|p| self.resolve(p))
            .map(|r| r.round_created);
        let witness = match self_parent_round {
            Some(sp_round) => round > sp_round,
            None => true,
        };
        (round, witness)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Parent {
    /// No parent declared (a creator's first event).
    None,
    /// Parent resolved to a live engine record.
    Known(EventId),
    /// Parent declared but expired or itself stale.
    Stale,
}

impl Parent {
    fn id(self) -> Option<EventId> {
        match self {
            Parent::Known(id) => Some(id),
            _ => None,
        }
    }
}
