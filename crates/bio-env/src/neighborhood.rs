//! Borrowed view of one node's neighborhood.

use std::collections::BTreeSet;

use bio_core::NodeId;

/// The neighbors of `center` at the moment the view was taken.
///
/// Iteration is in ascending `NodeId` order.
#[derive(Clone, Copy, Debug)]
pub struct Neighborhood<'a> {
    center: NodeId,
    neighbors: &'a BTreeSet<NodeId>,
}

impl<'a> Neighborhood<'a> {
    pub(crate) fn new(center: NodeId, neighbors: &'a BTreeSet<NodeId>) -> Self {
        Self { center, neighbors }
    }

    pub fn center(&self) -> NodeId {
        self.center
    }

    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        self.neighbors.contains(&node)
    }

    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }

    pub fn iter(self) -> impl Iterator<Item = NodeId> + 'a {
        self.neighbors.iter().copied()
    }

    /// The `i`-th neighbor in ascending order.
    pub fn nth(&self, i: usize) -> Option<NodeId> {
        self.neighbors.iter().nth(i).copied()
    }
}
