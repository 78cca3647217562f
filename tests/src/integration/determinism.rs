//! The core correctness property: the finalized order is a pure function
//! of the event set, independent of arrival order.

#[cfg(test)]
mod tests {
    use crate::common::{topological_shuffle, GossipSim};
    use gg_02_consensus::{ConsensusConfig, ConsensusEngine};
    use shared_types::FinalizedEvent;

    fn feed_all(sim: &GossipSim, order_seed: Option<u64>) -> Vec<FinalizedEvent> {
        let events = match order_seed {
            Some(seed) => topological_shuffle(&sim.events, seed),
            None => sim.events.clone(),
        };
        let mut engine = ConsensusEngine::new(ConsensusConfig::default());
        let mut finalized = Vec::new();
        for event in events {
            finalized.extend(engine.add_event(event, &sim.book).unwrap());
        }
        finalized
    }

    #[test]
    fn test_permutations_yield_byte_identical_output() {
        let sim = GossipSim::run(&[1, 1, 1, 1], 28, 7);
        let reference = feed_all(&sim, None);
        assert!(!reference.is_empty(), "scenario finalized nothing");
        let reference_bytes = bincode::serialize(&reference).unwrap();

        for seed in 0..8u64 {
            let permuted = feed_all(&sim, Some(seed));
            let bytes = bincode::serialize(&permuted).unwrap();
            assert_eq!(
                reference_bytes, bytes,
                "permutation {seed} diverged from reference order"
            );
        }
    }

    #[test]
    fn test_unequal_stake_permutations_agree() {
        let sim = GossipSim::run(&[10, 20, 30, 40], 28, 11);
        let reference = feed_all(&sim, None);
        assert!(!reference.is_empty());

        for seed in 20..24u64 {
            let permuted = feed_all(&sim, Some(seed));
            assert_eq!(
                bincode::serialize(&reference).unwrap(),
                bincode::serialize(&permuted).unwrap()
            );
        }
    }

    #[test]
    fn test_partial_feed_prefix_is_stable() {
        // Assignments made while only half the events have arrived never
        // change once the rest arrive.
        let sim = GossipSim::run(&[1, 1, 1, 1], 28, 3);
        let mut engine = ConsensusEngine::new(ConsensusConfig::default());

        let half = sim.events.len() / 2;
        let mut early = Vec::new();
        for event in &sim.events[..half] {
            early.extend(engine.add_event(event.clone(), &sim.book).unwrap());
        }
        let early_snapshot: Vec<_> = early
            .iter()
            .map(|f| (f.event.hash, f.round_received, f.consensus_order))
            .collect();

        for event in &sim.events[half..] {
            engine.add_event(event.clone(), &sim.book).unwrap();
        }
        for (hash, round, order) in early_snapshot {
            let record = engine.record_by_hash(&hash).unwrap();
            assert_eq!(record.round_received, Some(round));
            assert_eq!(record.consensus_order, Some(order));
        }
    }
}
