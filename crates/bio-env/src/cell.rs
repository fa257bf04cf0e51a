//! The `CellProperty` capability and its junction bookkeeping.

use std::collections::BTreeMap;

use bio_core::NodeId;

/// Marks a node as a biological cell.
///
/// Neighbor-scoped biochemical conditions only ever consider nodes carrying
/// this capability.  A cell also tracks *junctions*: named links towards
/// neighboring nodes.  Several identical junctions towards the same neighbor
/// may coexist, so each `(name, neighbor)` pair carries a multiplicity.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CellProperty {
    /// Cell diameter, in environment units.  Purely descriptive here.
    pub diameter: f64,
    junctions: BTreeMap<String, BTreeMap<NodeId, u32>>,
}

impl CellProperty {
    pub fn new(diameter: f64) -> Self {
        Self { diameter, junctions: BTreeMap::new() }
    }

    /// Add one junction named `name` towards `neighbor`.
    pub fn add_junction(&mut self, name: &str, neighbor: NodeId) {
        *self
            .junctions
            .entry(name.to_owned())
            .or_default()
            .entry(neighbor)
            .or_insert(0) += 1;
    }

    /// Remove one junction named `name` towards `neighbor`.
    ///
    /// Returns `false` (and changes nothing) if no such junction exists.
    pub fn remove_junction(&mut self, name: &str, neighbor: NodeId) -> bool {
        let Some(by_neighbor) = self.junctions.get_mut(name) else {
            return false;
        };
        let Some(count) = by_neighbor.get_mut(&neighbor) else {
            return false;
        };
        *count -= 1;
        if *count == 0 {
            by_neighbor.remove(&neighbor);
            if by_neighbor.is_empty() {
                self.junctions.remove(name);
            }
        }
        true
    }

    /// `true` if at least one junction named `name` exists, towards any neighbor.
    pub fn contains_junction(&self, name: &str) -> bool {
        self.junctions.contains_key(name)
    }

    /// Number of junctions named `name`, summed over all neighbors.
    pub fn junction_count(&self, name: &str) -> u32 {
        self.junctions
            .get(name)
            .map_or(0, |by_neighbor| by_neighbor.values().sum())
    }

    /// Total number of junctions of any name.
    pub fn junctions_count(&self) -> u32 {
        self.junctions
            .values()
            .flat_map(|by_neighbor| by_neighbor.values())
            .sum()
    }

    /// Neighbors linked by at least one junction, ascending.
    pub fn junction_neighbors(&self) -> Vec<NodeId> {
        let mut out: Vec<NodeId> = self
            .junctions
            .values()
            .flat_map(|by_neighbor| by_neighbor.keys().copied())
            .collect();
        out.sort_unstable();
        out.dedup();
        out
    }
}
