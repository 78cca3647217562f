//! Expiration safety across the engine and the shadow graph.

#[cfg(test)]
mod tests {
    use crate::common::{make_event, GossipSim};
    use gg_01_shadow_graph::{GraphError, ShadowGraph};
    use gg_02_consensus::{
        ConsensusApi, ConsensusConfig, ConsensusService, InMemorySink, StaticStakeTable,
    };
    use std::sync::Arc;

    fn service(sim: &GossipSim) -> ConsensusService<InMemorySink, StaticStakeTable> {
        ConsensusService::new(
            Arc::new(InMemorySink::new()),
            Arc::new(StaticStakeTable::new(sim.book.clone())),
            ConsensusConfig::default(),
            sim.book.clone(),
        )
    }

    #[tokio::test]
    async fn test_advance_expires_and_preserves_link_invariants() {
        let sim = GossipSim::run(&[1, 1, 1, 1], 30, 21);
        let svc = service(&sim);
        for event in &sim.events {
            svc.add_event(event.clone()).await.unwrap();
        }

        let decided = svc.fame_decided_below().await;
        assert!(decided >= 3);
        let before = svc.graph().num_shadow_events();

        let threshold = svc.advance_min_round(decided - 1).await.unwrap();
        assert!(threshold > 0);

        let graph = svc.graph();
        assert!(graph.num_shadow_events() < before);
        assert_eq!(graph.expired_below(), threshold);
        graph.check_invariants().unwrap();
    }

    #[tokio::test]
    async fn test_reservation_defers_graph_expiration() {
        let sim = GossipSim::run(&[1, 1, 1, 1], 30, 22);
        let svc = service(&sim);
        for event in &sim.events {
            svc.add_event(event.clone()).await.unwrap();
        }
        let decided = svc.fame_decided_below().await;
        let before = svc.graph().num_shadow_events();

        // A sync in progress pins the expiration threshold.
        let reservation = svc.graph().reserve();
        svc.advance_min_round(decided - 1).await.unwrap();
        assert_eq!(svc.graph().num_shadow_events(), before);

        // Released: the next advance applies the same boundary.
        drop(reservation);
        svc.advance_min_round(decided - 1).await.unwrap();
        assert!(svc.graph().num_shadow_events() < before);
    }

    #[test]
    fn test_removing_live_ancestry_reports_violation() {
        // Three generations; expiring generation 0 while generation 1 is
        // still live (threshold unmoved) must fail loudly, not corrupt.
        let mut graph = ShadowGraph::new();
        let g0 = make_event(0, 100, None, None);
        let g1 = make_event(0, 101, Some(&g0), None);
        let g2 = make_event(0, 102, Some(&g1), None);
        graph.insert(g0).unwrap();
        graph.insert(g1).unwrap();
        let top = graph.insert(g2).unwrap();

        let err = graph
            .remove_ancestry(top, |ev| ev.generation() == 0)
            .unwrap_err();
        assert!(matches!(err, GraphError::LiveChildRemoval { .. }));
        assert_eq!(graph.num_shadow_events(), 3);
        graph.check_invariants().unwrap();
    }
}
