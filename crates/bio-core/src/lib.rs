//! `bio-core`: foundational types for the biochemical reaction engine.
//!
//! This crate is a dependency of every other `bio-*` crate.  It has no
//! `bio-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `NodeId`, `ReactionId`                                |
//! | [`molecule`]    | `Molecule` (named chemical species)                   |
//! | [`time`]        | `Time`, `SimClock`, `SimConfig`                       |
//! | [`rng`]         | `SimRng` (owned), `SharedRng` (shared handle)         |
//! | [`math`]        | `binomial_coefficient`, `concentration_propensity`    |
//! | [`error`]       | `BioError`, `BioResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids, `Molecule`, `Time`  |
//! |         | and `SimConfig`.                                           |

pub mod error;
pub mod ids;
pub mod math;
pub mod molecule;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{BioError, BioResult};
pub use ids::{NodeId, ReactionId};
pub use math::{binomial_coefficient, concentration_propensity};
pub use molecule::Molecule;
pub use rng::{SharedRng, SimRng};
pub use time::{SimClock, SimConfig, Time};
