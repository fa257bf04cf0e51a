//! Fluent builder for constructing a [`Node`].
//!
//! # Usage
//!
//! ```rust
//! use bio_core::Molecule;
//! use bio_env::{CellProperty, NodeBuilder};
//!
//! let a = Molecule::new("A").unwrap();
//! let node = NodeBuilder::new()
//!     .concentration(&a, 5.0)
//!     .capability(CellProperty::new(1.0))
//!     .build();
//!
//! assert_eq!(node.concentration(&a), 5.0);
//! assert!(node.as_cell().is_some());
//! ```

use bio_core::Molecule;

use crate::node::ConcentrationMap;
use crate::{CapabilityMap, CellProperty, Node};

/// Fluent builder for [`Node`].
///
/// Capabilities can only be attached here: once built, a node's capability
/// set is fixed.
#[derive(Default)]
pub struct NodeBuilder {
    concentrations: ConcentrationMap,
    capabilities: CapabilityMap,
}

impl NodeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for `NodeBuilder::new().capability(CellProperty::default())`.
    pub fn cell() -> Self {
        Self::new().capability(CellProperty::default())
    }

    /// Set the initial concentration of `molecule`.  Non-positive values are ignored.
    pub fn concentration(mut self, molecule: &Molecule, value: f64) -> Self {
        if value > 0.0 {
            self.concentrations.insert(molecule.clone(), value);
        }
        self
    }

    /// Attach capability `T`.  Attaching the same type twice keeps the last value.
    pub fn capability<T: Clone + Send + Sync + 'static>(mut self, value: T) -> Self {
        self.capabilities.insert(value);
        self
    }

    pub fn build(self) -> Node {
        Node::from_parts(self.concentrations, self.capabilities)
    }
}
