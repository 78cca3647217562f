//! Round-received assignment and total ordering of decided rounds.
//!
//! When a round's fame is fully decided, every not-yet-finalized event
//! seen by a stake supermajority of that round's famous witnesses is
//! finalized: it gets the round as `round_received`, the median of the
//! famous witnesses' first-receipt timestamps as its consensus timestamp,
//! and a globally increasing consensus order index. Within the batch the
//! order is (consensus timestamp, event hash) ascending; batches of
//! consecutive rounds concatenate in round order.

use crate::domain::engine::ConsensusEngine;
use crate::domain::record::EventId;
use shared_types::{AddressBook, FinalizedEvent, Hash, Stake, Timestamp};

impl ConsensusEngine {
    /// Finalize all events received in `round`, given the round's famous
    /// witnesses. Returns the newly ordered batch.
    pub(crate) fn finalize_round(
        &mut self,
        round: u64,
        judges: &[EventId],
        book: &AddressBook,
    ) -> Vec<FinalizedEvent> {
        if judges.is_empty() {
            return Vec::new();
        }
        let judge_total: Stake = judges
            .iter()
            .filter_map(|j| self.resolve(*j))
            .map(|r| book.stake(r.creator()))
            .sum();
        if judge_total == 0 {
            return Vec::new();
        }

        let candidates: Vec<EventId> = self
            .live_ids()
            .filter(|id| {
                self.resolve(*id).is_some_and(|r| {
                    !r.stale && r.round_received.is_none() && r.round_created <= round
                })
            })
            .collect();

        let mut received: Vec<(Timestamp, Hash, EventId)> = Vec::new();
        for id in candidates {
            let seeing_judges: Vec<EventId> = judges
                .iter()
                .copied()
                .filter(|j| self.sees(*j, id))
                .collect();
            let seen_stake: Stake = seeing_judges
                .iter()
                .filter_map(|j| self.resolve(*j))
                .map(|r| book.stake(r.creator()))
                .sum();
            if !self
                .config()
                .is_supermajority(seen_stake, judge_total)
            {
                continue;
            }

            let timestamp = self.consensus_timestamp(&seeing_judges, id);
            let hash = self
                .resolve(id)
                .map(|r| r.event.hash)
                .unwrap_or_default();
            received.push((timestamp, hash, id));
        }

        received.sort_unstable_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));

        let mut batch = Vec::with_capacity(received.len());
        for (timestamp, _, id) in received {
            let order = self.next_consensus_order;
            self.next_consensus_order += 1;
            let Some(record) = self.resolve_mut(id) else {
                continue;
            };
            record.round_received = Some(round);
            record.consensus_timestamp = Some(timestamp);
            record.consensus_order = Some(order);
            batch.push(FinalizedEvent {
                event: record.event.clone(),
                round_received: round,
                consensus_timestamp: timestamp,
                consensus_order: order,
            });
        }
        batch
    }

    /// Median (lower median for even counts) of the timestamps at which
    /// each seeing judge's lineage first learned of the event.
    fn consensus_timestamp(&self, seeing_judges: &[EventId], target: EventId) -> Timestamp {
        let mut times: Vec<Timestamp> = seeing_judges
            .iter()
            .filter_map(|j| self.first_receiver_timestamp(*j, target))
            .collect();
        times.sort_unstable();
        if times.is_empty() {
            return 0;
        }
        times[(times.len() - 1) / 2]
    }

    /// Timestamp of the earliest self-ancestor of `judge` that already has
    /// `target` as an ancestor: the moment the judge's creator first
    /// learned of the event.
    fn first_receiver_timestamp(&self, judge: EventId, target: EventId) -> Option<Timestamp> {
        let mut current = judge;
        loop {
            let record = self.resolve(current)?;
            match record.self_parent {
                Some(sp) if self.has_ancestor(sp, target) => current = sp,
                _ => return Some(record.timestamp()),
            }
        }
    }
}
