//! # gg-03-event-intake
//!
//! The intake pipeline between gossip and the consensus engine. Gossip
//! threads deliver validated events in whatever order the network
//! produced them; this crate restores the parents-first discipline the
//! engine requires:
//!
//! - events whose parents are all present (or expired) go straight to
//!   [`gg_02_consensus::ConsensusApi::add_event`];
//! - events with an unknown, non-expired parent wait in the
//!   [`OrphanBuffer`] and are released the moment the parent arrives;
//! - any number of producers feed the single engine writer through the
//!   [`intake_loop`] mpsc funnel.
//!
//! Duplicates and expired events need no handling here: the shadow graph
//! absorbs them with counters.

mod buffer;
mod config;
mod intake;

pub use buffer::OrphanBuffer;
pub use config::IntakeConfig;
pub use intake::{intake_loop, EventIntake};
