//! Shared fixtures: event construction and a deterministic gossip
//! simulator.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use shared_types::{AddressBook, CreatorId, Event, EventCore, Hash, ParentRef, Transaction};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Build a signed event on the given parents. Generation and parent
/// descriptors are derived; the signature is synthetic but deterministic.
pub fn make_event(
    creator: u64,
    timestamp: u64,
    self_parent: Option<&Arc<Event>>,
    other_parent: Option<&Arc<Event>>,
) -> Arc<Event> {
    let generation = self_parent
        .iter()
        .chain(other_parent.iter())
        .map(|p| p.generation() + 1)
        .max()
        .unwrap_or(0);
    let core = EventCore {
        creator: CreatorId(creator),
        self_parent: self_parent.map(|p| ParentRef {
            hash: p.hash,
            generation: p.generation(),
        }),
        other_parent: other_parent.map(|p| ParentRef {
            hash: p.hash,
            generation: p.generation(),
        }),
        generation,
        timestamp,
        transactions: vec![Transaction::new(timestamp.to_le_bytes().to_vec())],
    };
    Arc::new(Event::new(core, [(creator * 31 + timestamp) as u8; 64]))
}

/// A deterministic gossip network: each step every member creates one
/// event on its own latest and a peer's latest from the previous step.
pub struct GossipSim {
    pub book: AddressBook,
    pub events: Vec<Arc<Event>>,
    latest: Vec<Arc<Event>>,
    clock: u64,
}

impl GossipSim {
    pub fn new(stakes: &[u128]) -> Self {
        let book = AddressBook::from_stakes(stakes.iter().copied());
        let latest: Vec<Arc<Event>> = (0..stakes.len())
            .map(|i| make_event(i as u64, 1000 + i as u64, None, None))
            .collect();
        Self {
            book,
            events: latest.clone(),
            latest,
            clock: 2000,
        }
    }

    /// One gossip step with a seeded random peer choice per member.
    pub fn step(&mut self, rng: &mut StdRng) {
        let snapshot = self.latest.clone();
        let n = self.latest.len();
        for i in 0..n {
            let mut peer = rng.gen_range(0..n - 1);
            if peer >= i {
                peer += 1;
            }
            let event = make_event(
                i as u64,
                self.clock,
                Some(&snapshot[i]),
                Some(&snapshot[peer]),
            );
            self.clock += 1;
            self.latest[i] = event.clone();
            self.events.push(event);
        }
    }

    /// Override the per-creator tips (index = creator id), e.g. after
    /// hand-crafting a fork.
    pub fn set_latest(&mut self, latest: &[Arc<Event>]) {
        self.latest = latest.to_vec();
    }

    pub fn run(stakes: &[u128], steps: usize, seed: u64) -> Self {
        let mut sim = Self::new(stakes);
        let mut rng = StdRng::seed_from_u64(seed);
        for _ in 0..steps {
            sim.step(&mut rng);
        }
        sim
    }
}

/// A random topological permutation of `events`: every event still comes
/// after both of its parents.
pub fn topological_shuffle(events: &[Arc<Event>], seed: u64) -> Vec<Arc<Event>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let by_hash: HashMap<Hash, &Arc<Event>> =
        events.iter().map(|e| (e.hash, e)).collect();
    let mut emitted: HashSet<Hash> = HashSet::new();
    let mut pending: Vec<&Arc<Event>> = events.iter().collect();
    let mut out = Vec::with_capacity(events.len());

    while !pending.is_empty() {
        let mut ready: Vec<usize> = pending
            .iter()
            .enumerate()
            .filter(|(_, e)| {
                [e.self_parent_hash(), e.other_parent_hash()]
                    .into_iter()
                    .flatten()
                    .all(|p| emitted.contains(&p) || !by_hash.contains_key(&p))
            })
            .map(|(i, _)| i)
            .collect();
        ready.shuffle(&mut rng);
        let pick = ready[0];
        let event = pending.remove(pick);
        emitted.insert(event.hash);
        out.push(event.clone());
    }
    out
}
