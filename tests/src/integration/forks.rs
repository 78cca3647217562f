//! Equivocation tolerance: a creator that forks its chain cannot get two
//! sibling events finalized.

#[cfg(test)]
mod tests {
    use crate::common::{make_event, topological_shuffle, GossipSim};
    use gg_02_consensus::{ConsensusConfig, ConsensusEngine};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use shared_types::Hash;

    /// A network where creator 0 equivocates right after genesis: two
    /// events on the same self-parent, each branch gossiped to a
    /// different peer before normal gossip resumes on branch A.
    fn forked_sim() -> (GossipSim, Hash, Hash) {
        let mut sim = GossipSim::new(&[1, 1, 1, 1]);
        let genesis0 = sim.events[0].clone();
        let genesis1 = sim.events[1].clone();
        let genesis2 = sim.events[2].clone();

        let branch_a = make_event(0, 1500, Some(&genesis0), Some(&genesis1));
        let branch_b = make_event(0, 1501, Some(&genesis0), Some(&genesis2));
        sim.events.push(branch_a.clone());
        sim.events.push(branch_b.clone());
        // Peers 1 and 2 each build on a different branch once.
        let on_a = make_event(1, 1502, Some(&genesis1), Some(&branch_a));
        let on_b = make_event(2, 1503, Some(&genesis2), Some(&branch_b));
        sim.events.push(on_a.clone());
        sim.events.push(on_b.clone());
        sim.set_latest(&[branch_a.clone(), on_a, on_b, sim.events[3].clone()]);

        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..30 {
            sim.step(&mut rng);
        }
        (sim, branch_a.hash, branch_b.hash)
    }

    #[test]
    fn test_at_most_one_branch_finalizes() {
        let (sim, branch_a, branch_b) = forked_sim();
        let mut engine = ConsensusEngine::new(ConsensusConfig::default());
        let mut finalized_hashes: Vec<Hash> = Vec::new();
        for event in &sim.events {
            for f in engine.add_event(event.clone(), &sim.book).unwrap() {
                finalized_hashes.push(f.event.hash);
            }
        }

        assert!(engine.forks_detected() >= 1);
        let a_in = finalized_hashes.contains(&branch_a);
        let b_in = finalized_hashes.contains(&branch_b);
        assert!(
            !(a_in && b_in),
            "both fork branches reached the finalized order"
        );
    }

    #[test]
    fn test_fork_outcome_is_arrival_order_independent() {
        let (sim, branch_a, branch_b) = forked_sim();

        let mut outcomes = Vec::new();
        for seed in 0..4u64 {
            let mut engine = ConsensusEngine::new(ConsensusConfig::default());
            let mut hashes: Vec<Hash> = Vec::new();
            for event in topological_shuffle(&sim.events, seed) {
                for f in engine.add_event(event, &sim.book).unwrap() {
                    hashes.push(f.event.hash);
                }
            }
            outcomes.push((
                hashes.contains(&branch_a),
                hashes.contains(&branch_b),
                hashes,
            ));
        }
        for outcome in &outcomes[1..] {
            assert_eq!(outcome.2, outcomes[0].2);
        }
    }
}
