//! Simulation entities: molecule concentrations plus attached capabilities.

use bio_core::Molecule;

use crate::{CapabilityMap, CellProperty};

#[cfg(feature = "fx-hash")]
pub(crate) type ConcentrationMap = rustc_hash::FxHashMap<Molecule, f64>;
#[cfg(not(feature = "fx-hash"))]
pub(crate) type ConcentrationMap = std::collections::HashMap<Molecule, f64>;

/// One addressable participant of the simulation.
///
/// A node is owned by the [`Environment`][crate::Environment]; everything
/// else refers to it by `NodeId`.  Its capability set is fixed once the node
/// is built (see [`NodeBuilder`][crate::NodeBuilder]); capability *values*
/// may still be mutated, e.g. junctions added to a [`CellProperty`].
#[derive(Clone, Debug, Default)]
pub struct Node {
    concentrations: ConcentrationMap,
    capabilities: CapabilityMap,
}

impl Node {
    pub(crate) fn from_parts(concentrations: ConcentrationMap, capabilities: CapabilityMap) -> Self {
        Self { concentrations, capabilities }
    }

    // ── Concentrations ────────────────────────────────────────────────────

    /// Current concentration of `molecule`; `0.0` when absent.
    #[inline]
    pub fn concentration(&self, molecule: &Molecule) -> f64 {
        self.concentrations.get(molecule).copied().unwrap_or(0.0)
    }

    /// Overwrite the concentration of `molecule`.
    ///
    /// Non-positive values remove the molecule entirely.
    pub fn set_concentration(&mut self, molecule: &Molecule, value: f64) {
        if value > 0.0 {
            self.concentrations.insert(molecule.clone(), value);
        } else {
            self.concentrations.remove(molecule);
        }
    }

    /// Add `delta` to the concentration of `molecule`, clamping at zero.
    ///
    /// Returns the new concentration.
    pub fn change_concentration(&mut self, molecule: &Molecule, delta: f64) -> f64 {
        let updated = (self.concentration(molecule) + delta).max(0.0);
        self.set_concentration(molecule, updated);
        updated
    }

    /// Number of molecule species currently present.
    pub fn molecule_count(&self) -> usize {
        self.concentrations.len()
    }

    /// All present molecules, sorted by name.
    pub fn molecules(&self) -> Vec<(&Molecule, f64)> {
        let mut out: Vec<_> = self.concentrations.iter().map(|(m, c)| (m, *c)).collect();
        out.sort_unstable_by(|a, b| a.0.cmp(b.0));
        out
    }

    // ── Capabilities ──────────────────────────────────────────────────────

    /// Typed view of capability `T`, or `None` if this node lacks it.
    #[inline]
    pub fn capability<T: Clone + Send + Sync + 'static>(&self) -> Option<&T> {
        self.capabilities.get::<T>()
    }

    /// Mutable typed view of capability `T`.
    pub fn capability_mut<T: Clone + Send + Sync + 'static>(&mut self) -> Option<&mut T> {
        self.capabilities.get_mut::<T>()
    }

    /// Shorthand for `capability::<CellProperty>()`.
    #[inline]
    pub fn as_cell(&self) -> Option<&CellProperty> {
        self.capability::<CellProperty>()
    }

    pub fn as_cell_mut(&mut self) -> Option<&mut CellProperty> {
        self.capability_mut::<CellProperty>()
    }
}
