//! Intake policy constants.

/// Tunables for the intake pipeline.
#[derive(Debug, Clone)]
pub struct IntakeConfig {
    /// Maximum events held in the orphan buffer; the oldest-generation
    /// orphan is evicted when full.
    pub max_buffered_events: usize,
    /// Capacity of the mpsc funnel between gossip producers and the
    /// engine writer.
    pub queue_depth: usize,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            max_buffered_events: 4096,
            queue_depth: 1024,
        }
    }
}
