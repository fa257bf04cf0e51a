//! Reaction preconditions, split by the entity they are evaluated against.
//!
//! | Variant                                | Valid when                               | Contribution                |
//! |----------------------------------------|------------------------------------------|-----------------------------|
//! | `LocalCondition::BiomolPresent`        | own concentration ≥ threshold            | combinatorial weight        |
//! | `LocalCondition::JunctionPresent`      | own cell holds ≥ 1 junction of that name | junction instance count     |
//! | `NeighborCondition::BiomolPresent`     | some neighbor cell has ≥ threshold       | Σ neighbor propensities     |
//! | `NeighborCondition::NeighborhoodPresent` | some neighbor is a cell                | number of neighbor cells    |

use std::fmt;

use bio_core::{Molecule, NodeId, concentration_propensity};
use bio_env::{EnvResult, Environment, Node};

use crate::CandidateMap;

// ── LocalCondition ────────────────────────────────────────────────────────────

/// A precondition evaluated against the reaction's own node.
#[derive(Clone, Debug, PartialEq)]
pub enum LocalCondition {
    BiomolPresent { molecule: Molecule, threshold: f64 },
    JunctionPresent { junction: String },
}

impl LocalCondition {
    pub fn biomol_present(molecule: Molecule, threshold: f64) -> Self {
        LocalCondition::BiomolPresent { molecule, threshold }
    }

    pub fn junction_present(junction: impl Into<String>) -> Self {
        LocalCondition::JunctionPresent { junction: junction.into() }
    }

    pub fn is_valid(&self, node: &Node) -> bool {
        match self {
            LocalCondition::BiomolPresent { molecule, threshold } => {
                node.concentration(molecule) >= *threshold
            }
            LocalCondition::JunctionPresent { junction } => node
                .as_cell()
                .is_some_and(|cell| cell.contains_junction(junction)),
        }
    }

    /// Factor this condition contributes to the reaction propensity.
    pub fn propensity_contribution(&self, node: &Node) -> f64 {
        match self {
            LocalCondition::BiomolPresent { molecule, threshold } => {
                concentration_propensity(node.concentration(molecule), *threshold)
            }
            LocalCondition::JunctionPresent { junction } => node
                .as_cell()
                .map_or(0.0, |cell| f64::from(cell.junction_count(junction))),
        }
    }
}

impl fmt::Display for LocalCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocalCondition::BiomolPresent { molecule, threshold } => {
                write!(f, "{molecule} >= {threshold}")
            }
            LocalCondition::JunctionPresent { junction } => write!(f, "junction {junction}"),
        }
    }
}

// ── NeighborCondition ─────────────────────────────────────────────────────────

/// A precondition evaluated against each neighbor of the reaction's node.
#[derive(Clone, Debug, PartialEq)]
pub enum NeighborCondition {
    BiomolPresent { molecule: Molecule, threshold: f64 },
    NeighborhoodPresent,
}

impl NeighborCondition {
    pub fn biomol_present(molecule: Molecule, threshold: f64) -> Self {
        NeighborCondition::BiomolPresent { molecule, threshold }
    }

    /// Weight of `candidate` as a target for this condition.
    ///
    /// Always `0.0` for nodes without a [`CellProperty`][bio_env::CellProperty].
    pub fn propensity(&self, candidate: &Node) -> f64 {
        if candidate.as_cell().is_none() {
            return 0.0;
        }
        match self {
            NeighborCondition::BiomolPresent { molecule, threshold } => {
                concentration_propensity(candidate.concentration(molecule), *threshold)
            }
            NeighborCondition::NeighborhoodPresent => 1.0,
        }
    }

    /// Every current neighbor of `node` with a strictly positive propensity.
    ///
    /// The neighborhood is re-read from `env` on each call, so neighbors
    /// unlinked since the previous call are never reported.
    pub fn valid_neighbors(&self, env: &Environment, node: NodeId) -> EnvResult<CandidateMap> {
        let mut valid = CandidateMap::new();
        for neighbor in env.neighborhood(node)?.iter() {
            let propensity = self.propensity(env.node(neighbor)?);
            if propensity > 0.0 {
                valid.insert(neighbor, propensity);
            }
        }
        Ok(valid)
    }
}

impl fmt::Display for NeighborCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NeighborCondition::BiomolPresent { molecule, threshold } => {
                write!(f, "{molecule} >= {threshold} in neighbor")
            }
            NeighborCondition::NeighborhoodPresent => f.write_str("neighbor cell present"),
        }
    }
}

// ── Condition ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub enum Condition {
    Local(LocalCondition),
    Neighbor(NeighborCondition),
}

impl Condition {
    pub fn is_neighbor_scoped(&self) -> bool {
        matches!(self, Condition::Neighbor(_))
    }

    /// `true` if the condition currently holds for the reaction on `node`.
    pub fn is_valid(&self, env: &Environment, node: NodeId) -> EnvResult<bool> {
        Ok(match self {
            Condition::Local(c) => c.is_valid(env.node(node)?),
            Condition::Neighbor(c) => !c.valid_neighbors(env, node)?.is_empty(),
        })
    }

    pub fn propensity_contribution(&self, env: &Environment, node: NodeId) -> EnvResult<f64> {
        Ok(match self {
            Condition::Local(c) => c.propensity_contribution(env.node(node)?),
            Condition::Neighbor(c) => c.valid_neighbors(env, node)?.total_propensity(),
        })
    }
}

impl From<LocalCondition> for Condition {
    fn from(c: LocalCondition) -> Self {
        Condition::Local(c)
    }
}

impl From<NeighborCondition> for Condition {
    fn from(c: NeighborCondition) -> Self {
        Condition::Neighbor(c)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Local(c) => c.fmt(f),
            Condition::Neighbor(c) => c.fmt(f),
        }
    }
}
