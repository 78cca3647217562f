//! # Consensus Metrics
//!
//! Prometheus metrics for monitoring consensus progress.
//!
//! ## Usage
//!
//! Enable with the `metrics` feature:
//! ```toml
//! gg-02-consensus = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `consensus_events_added_total` - Counter of events fed to the engine
//! - `consensus_events_finalized_total` - Counter of events reaching consensus
//! - `consensus_rounds_decided_total` - Counter of decided rounds
//! - `consensus_stale_events_total` - Counter of events excluded as stale
//! - `consensus_forks_detected_total` - Counter of creator forks observed
//! - `consensus_add_event_latency_seconds` - Histogram of add_event times

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{register_histogram, register_int_counter, Histogram, IntCounter};

#[cfg(feature = "metrics")]
lazy_static! {
    /// Total events fed to the engine
    pub static ref EVENTS_ADDED: IntCounter = register_int_counter!(
        "consensus_events_added_total",
        "Total number of events fed to the consensus engine"
    )
    .expect("Failed to create EVENTS_ADDED metric");

    /// Total events that reached consensus
    pub static ref EVENTS_FINALIZED: IntCounter = register_int_counter!(
        "consensus_events_finalized_total",
        "Total number of events assigned a consensus order"
    )
    .expect("Failed to create EVENTS_FINALIZED metric");

    /// Total rounds whose fame is fully decided
    pub static ref ROUNDS_DECIDED: IntCounter = register_int_counter!(
        "consensus_rounds_decided_total",
        "Total number of decided rounds"
    )
    .expect("Failed to create ROUNDS_DECIDED metric");

    /// Total events excluded as stale
    pub static ref STALE_EVENTS: IntCounter = register_int_counter!(
        "consensus_stale_events_total",
        "Total number of events excluded from consensus as stale"
    )
    .expect("Failed to create STALE_EVENTS metric");

    /// Total creator forks observed
    pub static ref FORKS_DETECTED: IntCounter = register_int_counter!(
        "consensus_forks_detected_total",
        "Total number of creators observed equivocating"
    )
    .expect("Failed to create FORKS_DETECTED metric");

    /// Histogram of add_event latency
    pub static ref ADD_EVENT_LATENCY: Histogram = register_histogram!(
        "consensus_add_event_latency_seconds",
        "Time taken to process one event in seconds",
        vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5]
    )
    .expect("Failed to create ADD_EVENT_LATENCY metric");
}

/// Record an event fed to the engine
#[cfg(feature = "metrics")]
pub fn record_event_added() {
    EVENTS_ADDED.inc();
}

/// Record finalized events
#[cfg(feature = "metrics")]
pub fn record_events_finalized(count: u64) {
    EVENTS_FINALIZED.inc_by(count);
}

/// Record a decided round
#[cfg(feature = "metrics")]
pub fn record_round_decided() {
    ROUNDS_DECIDED.inc();
}

/// Record add_event latency
#[cfg(feature = "metrics")]
pub fn record_add_event_latency(seconds: f64) {
    ADD_EVENT_LATENCY.observe(seconds);
}
