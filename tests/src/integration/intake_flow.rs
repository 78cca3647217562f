//! Orphan buffering: out-of-order delivery converges to the same
//! consensus history as in-order delivery.

#[cfg(test)]
mod tests {
    use crate::common::GossipSim;
    use gg_02_consensus::{
        ConsensusConfig, ConsensusService, InMemorySink, StaticStakeTable,
    };
    use gg_03_event_intake::{EventIntake, IntakeConfig};
    use shared_types::FinalizedEvent;
    use std::sync::Arc;

    fn intake(sim: &GossipSim) -> EventIntake<ConsensusService<InMemorySink, StaticStakeTable>> {
        let service = Arc::new(ConsensusService::new(
            Arc::new(InMemorySink::new()),
            Arc::new(StaticStakeTable::new(sim.book.clone())),
            ConsensusConfig::default(),
            sim.book.clone(),
        ));
        EventIntake::new(service, &IntakeConfig::default())
    }

    #[tokio::test]
    async fn test_reversed_delivery_converges_to_same_order() {
        let sim = GossipSim::run(&[1, 1, 1, 1], 24, 17);

        let forward = intake(&sim);
        let mut forward_out: Vec<FinalizedEvent> = Vec::new();
        for event in &sim.events {
            forward_out.extend(forward.submit(event.clone()).await.unwrap());
        }
        assert!(!forward_out.is_empty());
        assert_eq!(forward.buffered(), 0);

        // Worst case: children always arrive before parents.
        let backward = intake(&sim);
        let mut backward_out: Vec<FinalizedEvent> = Vec::new();
        for event in sim.events.iter().rev() {
            backward_out.extend(backward.submit(event.clone()).await.unwrap());
        }
        assert_eq!(backward.buffered(), 0);
        assert!(backward.buffered_total() > 0, "nothing was ever buffered");

        assert_eq!(
            bincode::serialize(&forward_out).unwrap(),
            bincode::serialize(&backward_out).unwrap()
        );
    }

    #[tokio::test]
    async fn test_buffer_drains_as_parents_arrive() {
        let sim = GossipSim::run(&[1, 1, 1, 1], 6, 23);
        let intake = intake(&sim);

        // Deliver everything except the four founding events.
        for event in &sim.events[4..] {
            intake.submit(event.clone()).await.unwrap();
        }
        assert!(intake.buffered() > 0);

        for event in &sim.events[..4] {
            intake.submit(event.clone()).await.unwrap();
        }
        assert_eq!(intake.buffered(), 0);
    }
}
