//! Node storage and the symmetric neighborhood relation.
//!
//! # Layout
//!
//! Nodes live in a `Vec<Node>` indexed by `NodeId`, and the neighborhood
//! relation is an adjacency `Vec<BTreeSet<NodeId>>` of the same length:
//!
//! ```ignore
//! let node = &env.nodes[id.index()];       // O(1)
//! let adj  = &env.links[id.index()];       // ascending NodeId order
//! ```
//!
//! `BTreeSet` keeps every neighborhood enumeration in ascending id order,
//! so anything derived from it (candidate maps, weighted draws) is
//! reproducible across runs.
//!
//! Nodes are never removed: ids stay valid for the whole run.  Links can be
//! added and removed at any time by topology-changing code driven from the
//! event loop.

use std::collections::BTreeSet;

use bio_core::NodeId;
use tracing::debug;

use crate::{EnvError, EnvResult, Neighborhood, Node};

/// Owner of every node and of the neighborhood relation between them.
#[derive(Clone, Debug, Default)]
pub struct Environment {
    nodes: Vec<Node>,
    links: Vec<BTreeSet<NodeId>>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterator over all `NodeId`s in ascending index order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len() as u32).map(NodeId)
    }

    /// `true` if `id` refers to a node of this environment.
    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        id.index() < self.nodes.len()
    }

    // ── Nodes ─────────────────────────────────────────────────────────────

    /// Append `node` and return its id.
    pub fn add_node(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        self.links.push(BTreeSet::new());
        id
    }

    pub fn node(&self, id: NodeId) -> EnvResult<&Node> {
        self.nodes.get(id.index()).ok_or(EnvError::NodeNotFound(id))
    }

    pub fn node_mut(&mut self, id: NodeId) -> EnvResult<&mut Node> {
        self.nodes.get_mut(id.index()).ok_or(EnvError::NodeNotFound(id))
    }

    // ── Neighborhood relation ─────────────────────────────────────────────

    /// Link `a` and `b` as neighbors of each other.
    ///
    /// Returns `false` if they were already linked.
    pub fn add_link(&mut self, a: NodeId, b: NodeId) -> EnvResult<bool> {
        self.check_pair(a, b)?;
        let added = self.links[a.index()].insert(b);
        self.links[b.index()].insert(a);
        if added {
            debug!(%a, %b, "link added");
        }
        Ok(added)
    }

    /// Break the link between `a` and `b`.
    ///
    /// Returns `false` if they were not linked.
    pub fn remove_link(&mut self, a: NodeId, b: NodeId) -> EnvResult<bool> {
        self.check_pair(a, b)?;
        let removed = self.links[a.index()].remove(&b);
        self.links[b.index()].remove(&a);
        if removed {
            debug!(%a, %b, "link removed");
        }
        Ok(removed)
    }

    /// `true` if `a` and `b` are currently neighbors.  Unknown ids are never neighbors.
    pub fn are_neighbors(&self, a: NodeId, b: NodeId) -> bool {
        self.links
            .get(a.index())
            .is_some_and(|adj| adj.contains(&b))
    }

    /// Current neighborhood of `center`.
    ///
    /// The view borrows the environment, so it always reflects the relation
    /// as it is *now*; callers must re-query after any topology change.
    pub fn neighborhood(&self, center: NodeId) -> EnvResult<Neighborhood<'_>> {
        let neighbors = self
            .links
            .get(center.index())
            .ok_or(EnvError::NodeNotFound(center))?;
        Ok(Neighborhood::new(center, neighbors))
    }

    /// Total number of (undirected) links.
    pub fn link_count(&self) -> usize {
        self.links.iter().map(BTreeSet::len).sum::<usize>() / 2
    }

    fn check_pair(&self, a: NodeId, b: NodeId) -> EnvResult<()> {
        if !self.contains(a) {
            return Err(EnvError::NodeNotFound(a));
        }
        if !self.contains(b) {
            return Err(EnvError::NodeNotFound(b));
        }
        if a == b {
            return Err(EnvError::SelfLink(a));
        }
        Ok(())
    }
}
