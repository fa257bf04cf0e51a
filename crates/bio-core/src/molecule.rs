//! Named chemical species.

use std::fmt;
use std::sync::Arc;

use crate::{BioError, BioResult};

/// A biomolecule, identified by name.
///
/// Cloning is cheap (the name is reference-counted), so molecules can be
/// stored freely in conditions, actions and concentration maps.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Molecule(Arc<str>);

impl Molecule {
    /// Build a molecule from a non-empty name without surrounding whitespace.
    pub fn new(name: &str) -> BioResult<Self> {
        if name.is_empty() || name.trim() != name {
            return Err(BioError::InvalidMolecule(name.to_owned()));
        }
        Ok(Molecule(Arc::from(name)))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Molecule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Molecule {
    type Err = BioError;

    fn from_str(s: &str) -> BioResult<Self> {
        Molecule::new(s)
    }
}
