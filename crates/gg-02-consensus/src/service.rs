//! Consensus service: the single-writer owner of the engine and the
//! shadow graph.
//!
//! All structural mutation (insertion, expiration) flows through one
//! write lock; gossip-side readers take the read lock to walk the graph.
//! Sink publications happen outside the lock so a slow consumer never
//! stalls intake.

use crate::domain::{
    ConsensusConfig, ConsensusEngine, ConsensusError, ConsensusResult, WitnessHashes,
};
use crate::events::RoundDecidedEvent;
use crate::ports::{ConsensusApi, FinalizedSink, StakeTableProvider};
use async_trait::async_trait;
use gg_01_shadow_graph::ShadowGraph;
use parking_lot::{MappedRwLockReadGuard, RwLock, RwLockReadGuard};
use shared_types::{AddressBook, Event, FinalizedEvent, ParentRef};
use std::sync::Arc;
use tracing::warn;

/// Everything behind the single writer lock.
struct CoreState {
    graph: ShadowGraph,
    engine: ConsensusEngine,
    book: AddressBook,
}

/// The consensus service.
pub struct ConsensusService<S, P>
where
    S: FinalizedSink,
    P: StakeTableProvider,
{
    sink: Arc<S>,
    stake_provider: Arc<P>,
    state: RwLock<CoreState>,
}

impl<S, P> ConsensusService<S, P>
where
    S: FinalizedSink,
    P: StakeTableProvider,
{
    /// Create a service with an initial stake table. The provider is
    /// re-read after every round decision so membership changes land on
    /// round boundaries.
    pub fn new(
        sink: Arc<S>,
        stake_provider: Arc<P>,
        config: ConsensusConfig,
        initial_book: AddressBook,
    ) -> Self {
        Self {
            sink,
            stake_provider,
            state: RwLock::new(CoreState {
                graph: ShadowGraph::new(),
                engine: ConsensusEngine::new(config),
                book: initial_book,
            }),
        }
    }

    /// Read access to the shadow graph for the gossip layer's frontier
    /// and descendant queries. Mutation stays behind `add_event`.
    pub fn graph(&self) -> MappedRwLockReadGuard<'_, ShadowGraph> {
        RwLockReadGuard::map(self.state.read(), |s| &s.graph)
    }

    async fn refresh_address_book(&self) {
        match self.stake_provider.address_book().await {
            Ok(book) => {
                self.state.write().book = book;
            }
            Err(err) => {
                warn!(%err, "stake table refresh failed, keeping current address book");
            }
        }
    }
}

#[async_trait]
impl<S, P> ConsensusApi for ConsensusService<S, P>
where
    S: FinalizedSink,
    P: StakeTableProvider,
{
    async fn add_event(&self, event: Arc<Event>) -> ConsensusResult<Vec<FinalizedEvent>> {
        #[cfg(feature = "metrics")]
        let started = std::time::Instant::now();

        let (finalized, decided_rounds) = {
            let mut state = self.state.write();
            match state.graph.insert(event.clone()) {
                Ok(_) => {}
                Err(err) => {
                    // Duplicates and expired events are absorbed; unknown
                    // parents should have been buffered upstream.
                    if err.is_unknown_parent() {
                        warn!(%err, "event with unbuffered unknown parent dropped");
                    }
                    return Ok(Vec::new());
                }
            }

            let book = state.book.clone();
            let finalized = state.engine.add_event(event, &book)?;

            let mut decided_rounds = Vec::new();
            if !finalized.is_empty() {
                let mut by_round: Vec<(u64, Vec<FinalizedEvent>)> = Vec::new();
                for f in &finalized {
                    match by_round.last_mut() {
                        Some((round, batch)) if *round == f.round_received => {
                            batch.push(f.clone())
                        }
                        _ => by_round.push((f.round_received, vec![f.clone()])),
                    }
                }
                for (round, batch) in by_round {
                    let min_judge_generation = state.engine.min_judge_generation(round);
                    decided_rounds.push(RoundDecidedEvent::new(
                        round,
                        batch,
                        min_judge_generation,
                    ));
                }
            }
            (finalized, decided_rounds)
        };

        #[cfg(feature = "metrics")]
        {
            crate::metrics::record_event_added();
            crate::metrics::record_events_finalized(finalized.len() as u64);
            crate::metrics::record_add_event_latency(started.elapsed().as_secs_f64());
        }

        if !decided_rounds.is_empty() {
            for round_event in decided_rounds {
                #[cfg(feature = "metrics")]
                crate::metrics::record_round_decided();
                self.sink
                    .publish_round_decided(round_event)
                    .await
                    .map_err(ConsensusError::Sink)?;
            }
            // A round boundary: pick up any administrative stake change.
            self.refresh_address_book().await;
        }

        Ok(finalized)
    }

    async fn witness_hashes(&self, round: u64) -> ConsensusResult<WitnessHashes> {
        self.state.read().engine.witness_hashes(round)
    }

    async fn max_round(&self) -> u64 {
        self.state.read().engine.max_round()
    }

    async fn fame_decided_below(&self) -> u64 {
        self.state.read().engine.fame_decided_below()
    }

    async fn min_generation_non_expired(&self) -> u64 {
        self.state
            .read()
            .engine
            .tracker()
            .min_generation_non_expired()
    }

    async fn advance_min_round(&self, new_min_round: u64) -> ConsensusResult<u64> {
        let mut state = self.state.write();
        let threshold = state.engine.advance_min_round(new_min_round);
        state.graph.expire_below(threshold)?;
        Ok(threshold)
    }

    async fn parents_satisfied(&self, event: &Event) -> bool {
        let state = self.state.read();
        let check = |parent: Option<ParentRef>| match parent {
            None => true,
            Some(p) => {
                state.graph.shadow(&p.hash).is_some()
                    || p.generation < state.graph.expired_below()
            }
        };
        check(event.core.self_parent) && check(event.core.other_parent)
    }
}
