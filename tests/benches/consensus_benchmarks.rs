//! Consensus engine benchmarks.
//!
//! Run with: cargo bench -p gg-tests

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gg_02_consensus::{ConsensusConfig, ConsensusEngine};
use gg_tests::common::GossipSim;

/// Feed a pre-built gossip history through a fresh engine.
fn bench_add_event_throughput(c: &mut Criterion) {
    let sim = GossipSim::run(&[1, 1, 1, 1], 50, 1);

    c.bench_function("engine_add_event_4_nodes_50_steps", |b| {
        b.iter(|| {
            let mut engine = ConsensusEngine::new(ConsensusConfig::default());
            let mut finalized = 0usize;
            for event in &sim.events {
                finalized += engine
                    .add_event(event.clone(), &sim.book)
                    .unwrap()
                    .len();
            }
            black_box(finalized)
        })
    });
}

/// Larger membership: ten members, stake spread unevenly.
fn bench_add_event_ten_members(c: &mut Criterion) {
    let stakes: Vec<u128> = (1..=10).collect();
    let sim = GossipSim::run(&stakes, 40, 2);

    c.bench_function("engine_add_event_10_nodes_40_steps", |b| {
        b.iter(|| {
            let mut engine = ConsensusEngine::new(ConsensusConfig::default());
            for event in &sim.events {
                engine.add_event(event.clone(), &sim.book).unwrap();
            }
            black_box(engine.fame_decided_below())
        })
    });
}

criterion_group!(
    benches,
    bench_add_event_throughput,
    bench_add_event_ten_members
);
criterion_main!(benches);
