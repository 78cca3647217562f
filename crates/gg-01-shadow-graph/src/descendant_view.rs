//! Bounded DFS over the descendants of a shadow event.
//!
//! The gossip layer uses this view to answer "what is this peer missing":
//! starting from an event the peer is known to have, it walks child links
//! without descending past the peer's reported tips or past the per-creator
//! generation bound, and follows other-child links only on request (the
//! first pass sends each creator's own chain, biasing the exchange toward
//! self-parent continuity).

use crate::graph::ShadowGraph;
use crate::shadow_event::ShadowIndex;
use shared_types::Hash;
use std::collections::HashSet;

/// Lazy DFS iterator returned by [`ShadowGraph::graph_descendants`].
///
/// The `visited` set is caller-owned so one set can span several starting
/// points within a single sync exchange.
pub struct GraphDescendants<'a> {
    graph: &'a ShadowGraph,
    frontier: &'a HashSet<Hash>,
    visited: &'a mut HashSet<ShadowIndex>,
    max_tip_generations: &'a [u64],
    include_other_children: bool,
    stack: Vec<ShadowIndex>,
}

impl<'a> GraphDescendants<'a> {
    pub(crate) fn new(
        graph: &'a ShadowGraph,
        start: ShadowIndex,
        frontier: &'a HashSet<Hash>,
        visited: &'a mut HashSet<ShadowIndex>,
        max_tip_generations: &'a [u64],
        include_other_children: bool,
    ) -> Self {
        Self {
            graph,
            frontier,
            visited,
            max_tip_generations,
            include_other_children,
            stack: vec![start],
        }
    }

    /// Generation bound for a creator; unknown creators are unbounded.
    fn bound_for(&self, creator: usize) -> u64 {
        self.max_tip_generations
            .get(creator)
            .copied()
            .unwrap_or(u64::MAX)
    }
}

impl Iterator for GraphDescendants<'_> {
    type Item = ShadowIndex;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let index = self.stack.pop()?;
            if !self.visited.insert(index) {
                continue;
            }
            let Some(node) = self.graph.get(index) else {
                continue;
            };

            // The peer already has everything at and below its tips; do
            // not descend past them.
            if !self.frontier.contains(&node.hash()) {
                let children: Vec<ShadowIndex> = if self.include_other_children {
                    node.children().collect()
                } else {
                    node.self_children().iter().copied().collect()
                };
                for child in children {
                    if let Some(c) = self.graph.get(child) {
                        if c.generation() <= self.bound_for(c.creator().index()) {
                            self.stack.push(child);
                        }
                    }
                }
            }

            return Some(index);
        }
    }
}
