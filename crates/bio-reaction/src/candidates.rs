//! `CandidateMap`: the ordered node → propensity map a neighbor-aware
//! reaction draws its target from.

use bio_core::NodeId;

/// Ordered mapping from candidate neighbor to its combined propensity.
///
/// Insertion order is preserved and is the order weighted selection samples
/// over.  Maps built from a [`Neighborhood`][bio_env::Neighborhood] are
/// therefore in ascending `NodeId` order.
///
/// Neighborhoods are small, so entries live in a `Vec` and lookups are linear.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CandidateMap {
    entries: Vec<(NodeId, f64)>,
}

impl CandidateMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the propensity of `node`.
    ///
    /// A new node is appended; an existing node keeps its position.
    pub fn insert(&mut self, node: NodeId, propensity: f64) {
        match self.entries.iter_mut().find(|(n, _)| *n == node) {
            Some(entry) => entry.1 = propensity,
            None => self.entries.push((node, propensity)),
        }
    }

    pub fn get(&self, node: NodeId) -> Option<f64> {
        self.entries
            .iter()
            .find(|(n, _)| *n == node)
            .map(|(_, p)| *p)
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.get(node).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(node, propensity)` pairs in map order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, f64)> + '_ {
        self.entries.iter().copied()
    }

    /// Candidate nodes in map order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.entries.iter().map(|(n, _)| *n)
    }

    /// The `i`-th entry in map order.
    pub fn nth(&self, i: usize) -> Option<(NodeId, f64)> {
        self.entries.get(i).copied()
    }

    /// Sum of all propensities.
    pub fn total_propensity(&self) -> f64 {
        self.entries.iter().map(|(_, p)| p).sum()
    }

    /// Entity-wise intersection with `other`, multiplying propensities.
    ///
    /// Keys missing from either side are dropped, even if the other side
    /// weighs them positively.  The result keeps `self`'s order.
    pub fn intersect(&self, other: &CandidateMap) -> CandidateMap {
        self.entries
            .iter()
            .filter_map(|&(node, p1)| other.get(node).map(|p2| (node, p1 * p2)))
            .collect()
    }

    /// Reduce a list of per-condition maps by pairwise [`intersect`](Self::intersect).
    ///
    /// Returns `None` for an empty list: there is nothing to reduce.
    pub fn combine<I>(maps: I) -> Option<CandidateMap>
    where
        I: IntoIterator<Item = CandidateMap>,
    {
        maps.into_iter().reduce(|acc, next| acc.intersect(&next))
    }
}

impl FromIterator<(NodeId, f64)> for CandidateMap {
    fn from_iter<T: IntoIterator<Item = (NodeId, f64)>>(iter: T) -> Self {
        let mut map = CandidateMap::new();
        for (node, propensity) in iter {
            map.insert(node, propensity);
        }
        map
    }
}
