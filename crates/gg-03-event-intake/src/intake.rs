//! The intake pipeline feeding the consensus engine.

use crate::buffer::OrphanBuffer;
use crate::config::IntakeConfig;
use gg_02_consensus::{ConsensusApi, ConsensusResult};
use parking_lot::Mutex;
use shared_types::{Event, FinalizedEvent};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;

/// Routes incoming events between the engine and the orphan buffer, and
/// cascades buffered releases when a missing parent arrives.
pub struct EventIntake<C: ConsensusApi> {
    consensus: Arc<C>,
    buffer: Mutex<OrphanBuffer>,
    buffered_total: Mutex<u64>,
}

impl<C: ConsensusApi> EventIntake<C> {
    pub fn new(consensus: Arc<C>, config: &IntakeConfig) -> Self {
        Self {
            consensus,
            buffer: Mutex::new(OrphanBuffer::new(config.max_buffered_events)),
            buffered_total: Mutex::new(0),
        }
    }

    pub fn buffered(&self) -> usize {
        self.buffer.lock().len()
    }

    pub fn buffered_total(&self) -> u64 {
        *self.buffered_total.lock()
    }

    /// Submit one event. Orphans are buffered and an empty batch
    /// returned; otherwise the event and every orphan it unblocks are fed
    /// to the engine, and all newly finalized events come back in
    /// consensus order.
    pub async fn submit(&self, event: Arc<Event>) -> ConsensusResult<Vec<FinalizedEvent>> {
        if !self.consensus.parents_satisfied(&event).await {
            if self.buffer.lock().insert(event.clone()) {
                *self.buffered_total.lock() += 1;
                debug!(event = %event.short_id(), "buffered orphan event");
            }
            return Ok(Vec::new());
        }

        let mut finalized = self.consensus.add_event(event.clone()).await?;
        let mut arrived = vec![event.hash];
        while let Some(parent) = arrived.pop() {
            let waiting = self.buffer.lock().take_children(&parent);
            for child in waiting {
                if self.consensus.parents_satisfied(&child).await {
                    finalized.extend(self.consensus.add_event(child.clone()).await?);
                    arrived.push(child.hash);
                } else {
                    // The other parent is still missing; wait again.
                    self.buffer.lock().insert(child);
                }
            }
        }
        Ok(finalized)
    }
}

/// The single-writer funnel: drains events from any number of gossip
/// producers and forwards finalized batches downstream. Returns when the
/// inbound channel closes or the engine fails.
pub async fn intake_loop<C: ConsensusApi>(
    intake: Arc<EventIntake<C>>,
    mut inbound: mpsc::Receiver<Arc<Event>>,
    outbound: mpsc::Sender<FinalizedEvent>,
) -> ConsensusResult<()> {
    while let Some(event) = inbound.recv().await {
        for finalized in intake.submit(event).await? {
            if outbound.send(finalized).await.is_err() {
                return Ok(());
            }
        }
    }
    Ok(())
}
