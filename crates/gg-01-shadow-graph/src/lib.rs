//! # gg-01-shadow-graph
//!
//! The shadow graph: an auxiliary view over received events that keeps child
//! links in addition to parent links. The extra links make it cheap to
//! answer the two questions the rest of the platform keeps asking:
//!
//! - the gossip layer: "which of my events is this peer missing?"
//!   ([`ShadowGraph::graph_descendants`], [`ShadowGraph::tips`])
//! - the consensus engine: "is this event's ancestry intact?"
//!   ([`ShadowGraph::shadow`], parent/child traversal)
//!
//! ## Storage model
//!
//! Events live in an arena addressed by small [`ShadowIndex`] values;
//! parent and child links are index sets, never object references, so there
//! are no reference cycles and read snapshots are cheap.
//!
//! ## Expiration
//!
//! Events are expired by generation: the graph carries a monotonically
//! non-decreasing `expired_below` threshold, and [`ShadowGraph::expire_below`]
//! removes everything underneath it, oldest first. A sync in progress can
//! pin the threshold with a [`GenerationReservation`] so events are not
//! expired out from under it.
//!
//! ## Thread safety
//!
//! The shadow graph is thread-unaware and provides no synchronization; all
//! structural mutation must be serialized by the owner (in this platform,
//! the consensus service's single writer).

mod descendant_view;
mod error;
mod graph;
mod reservation;
mod shadow_event;

pub use descendant_view::GraphDescendants;
pub use error::{GraphError, GraphResult};
pub use graph::ShadowGraph;
pub use reservation::GenerationReservation;
pub use shadow_event::{ShadowEvent, ShadowIndex};
