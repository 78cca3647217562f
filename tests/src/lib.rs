//! # GossipGraph Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── common/           # Shared fixtures: event builders, gossip simulator
//! └── integration/      # Cross-subsystem scenarios
//!     ├── determinism.rs    # Identical order under arrival permutations
//!     ├── end_to_end.rs     # Multi-node consensus scenario
//!     ├── expiration.rs     # Expiration safety and reservations
//!     ├── forks.rs          # Equivocation tolerance
//!     └── intake_flow.rs    # Orphan buffering and release cascade
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p gg-tests
//!
//! # By category
//! cargo test -p gg-tests integration::
//!
//! # Benchmarks
//! cargo bench -p gg-tests
//! ```

pub mod common;
pub mod integration;
