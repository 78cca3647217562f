//! Finalized sink adapter.

use crate::events::RoundDecidedEvent;
use crate::ports::FinalizedSink;
use async_trait::async_trait;

/// In-memory sink adapter for testing.
pub struct InMemorySink {
    published: parking_lot::RwLock<Vec<RoundDecidedEvent>>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self {
            published: parking_lot::RwLock::new(Vec::new()),
        }
    }

    pub fn published(&self) -> Vec<RoundDecidedEvent> {
        self.published.read().clone()
    }

    pub fn round_count(&self) -> usize {
        self.published.read().len()
    }
}

impl Default for InMemorySink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FinalizedSink for InMemorySink {
    async fn publish_round_decided(&self, event: RoundDecidedEvent) -> Result<(), String> {
        self.published.write().push(event);
        Ok(())
    }
}
