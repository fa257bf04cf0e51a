//! Reaction effects, split by the entity they are applied to.

use std::fmt;

use bio_core::{Molecule, NodeId};
use bio_env::{EnvResult, Environment};
use tracing::{debug, warn};

// ── LocalAction ───────────────────────────────────────────────────────────────

/// An effect applied to the reaction's own node.
#[derive(Clone, Debug, PartialEq)]
pub enum LocalAction {
    ChangeConcentration { molecule: Molecule, delta: f64 },
}

impl LocalAction {
    pub fn change_concentration(molecule: Molecule, delta: f64) -> Self {
        LocalAction::ChangeConcentration { molecule, delta }
    }

    pub fn execute(&self, env: &mut Environment, node: NodeId) -> EnvResult<()> {
        match self {
            LocalAction::ChangeConcentration { molecule, delta } => {
                change_concentration(env, node, molecule, *delta)
            }
        }
    }
}

// ── NeighborAction ────────────────────────────────────────────────────────────

/// An effect applied to a target neighbor chosen at firing time.
#[derive(Clone, Debug, PartialEq)]
pub enum NeighborAction {
    ChangeConcentration { molecule: Molecule, delta: f64 },
    /// Add a junction named `junction` between the own cell and the target
    /// cell, on both sides.
    CreateJunction { junction: String },
}

impl NeighborAction {
    pub fn change_concentration(molecule: Molecule, delta: f64) -> Self {
        NeighborAction::ChangeConcentration { molecule, delta }
    }

    pub fn create_junction(junction: impl Into<String>) -> Self {
        NeighborAction::CreateJunction { junction: junction.into() }
    }

    pub fn execute(&self, env: &mut Environment, node: NodeId, target: NodeId) -> EnvResult<()> {
        match self {
            NeighborAction::ChangeConcentration { molecule, delta } => {
                change_concentration(env, target, molecule, *delta)
            }
            NeighborAction::CreateJunction { junction } => {
                let both_cells =
                    env.node(node)?.as_cell().is_some() && env.node(target)?.as_cell().is_some();
                if !both_cells {
                    debug!(%node, %target, junction = %junction, "junction skipped: not a cell pair");
                    return Ok(());
                }
                if let Some(cell) = env.node_mut(node)?.as_cell_mut() {
                    cell.add_junction(junction, target);
                }
                if let Some(cell) = env.node_mut(target)?.as_cell_mut() {
                    cell.add_junction(junction, node);
                }
                Ok(())
            }
        }
    }
}

// ── Action ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    Local(LocalAction),
    Neighbor(NeighborAction),
}

impl Action {
    pub fn is_neighbor_scoped(&self) -> bool {
        matches!(self, Action::Neighbor(_))
    }
}

impl From<LocalAction> for Action {
    fn from(a: LocalAction) -> Self {
        Action::Local(a)
    }
}

impl From<NeighborAction> for Action {
    fn from(a: NeighborAction) -> Self {
        Action::Neighbor(a)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Local(LocalAction::ChangeConcentration { molecule, delta }) => {
                write!(f, "{molecule} {delta:+}")
            }
            Action::Neighbor(NeighborAction::ChangeConcentration { molecule, delta }) => {
                write!(f, "{molecule} {delta:+} in neighbor")
            }
            Action::Neighbor(NeighborAction::CreateJunction { junction }) => {
                write!(f, "create junction {junction}")
            }
        }
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn change_concentration(
    env:      &mut Environment,
    node:     NodeId,
    molecule: &Molecule,
    delta:    f64,
) -> EnvResult<()> {
    let target = env.node_mut(node)?;
    let before = target.concentration(molecule);
    let after = target.change_concentration(molecule, delta);
    if before + delta < 0.0 {
        warn!(%node, %molecule, before, delta, "concentration clamped at zero");
    }
    debug!(%node, %molecule, before, after, "concentration changed");
    Ok(())
}
