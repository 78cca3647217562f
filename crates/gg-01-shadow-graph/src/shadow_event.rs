//! Shadow events: arena records wrapping an immutable event with
//! bidirectional links.

use shared_types::{CreatorId, Event, Hash};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// Address of a shadow event's slot in the graph arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShadowIndex(pub u32);

impl ShadowIndex {
    pub fn slot(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ShadowIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An event's slot in the shadow graph: the event itself plus parent and
/// child links as index sets.
///
/// A parent link of `None` means the parent either never existed (first
/// event of a creator) or has been expired out of the graph; the graph's
/// `expired_below` threshold distinguishes the two.
#[derive(Debug, Clone)]
pub struct ShadowEvent {
    event: Arc<Event>,
    pub(crate) self_parent: Option<ShadowIndex>,
    pub(crate) other_parent: Option<ShadowIndex>,
    pub(crate) self_children: BTreeSet<ShadowIndex>,
    pub(crate) other_children: BTreeSet<ShadowIndex>,
}

impl ShadowEvent {
    pub(crate) fn new(
        event: Arc<Event>,
        self_parent: Option<ShadowIndex>,
        other_parent: Option<ShadowIndex>,
    ) -> Self {
        Self {
            event,
            self_parent,
            other_parent,
            self_children: BTreeSet::new(),
            other_children: BTreeSet::new(),
        }
    }

    pub fn event(&self) -> &Arc<Event> {
        &self.event
    }

    pub fn hash(&self) -> Hash {
        self.event.hash
    }

    pub fn creator(&self) -> CreatorId {
        self.event.creator()
    }

    pub fn generation(&self) -> u64 {
        self.event.generation()
    }

    pub fn self_parent(&self) -> Option<ShadowIndex> {
        self.self_parent
    }

    pub fn other_parent(&self) -> Option<ShadowIndex> {
        self.other_parent
    }

    pub fn self_children(&self) -> &BTreeSet<ShadowIndex> {
        &self.self_children
    }

    pub fn other_children(&self) -> &BTreeSet<ShadowIndex> {
        &self.other_children
    }

    /// Whether this event is the latest known event of its creator.
    pub fn is_tip(&self) -> bool {
        self.self_children.is_empty()
    }

    /// Both parent links, self-parent first.
    pub fn parents(&self) -> impl Iterator<Item = ShadowIndex> {
        self.self_parent.into_iter().chain(self.other_parent)
    }

    /// All child links, self-children first.
    pub fn children(&self) -> impl Iterator<Item = ShadowIndex> + '_ {
        self.self_children
            .iter()
            .copied()
            .chain(self.other_children.iter().copied())
    }
}
