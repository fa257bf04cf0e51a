//! `bio-reaction`: conditions, actions, firing times, and the neighbor-aware
//! reaction coordinator.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                          |
//! |-----------------|-------------------------------------------------------------------|
//! | [`condition`]   | `Condition`, `LocalCondition`, `NeighborCondition`                |
//! | [`action`]      | `Action`, `LocalAction`, `NeighborAction`                         |
//! | [`candidates`]  | `CandidateMap` (ordered node → propensity, intersect-multiply)    |
//! | [`selector`]    | `select_target` (weighted draw over a `CandidateMap`)             |
//! | [`time_dist`]   | `TimeDistribution` trait, `ExponentialTime`, `DiracComb`, `Trigger` |
//! | [`reaction`]    | `BiochemicalReaction`, `ReactionMode`                             |
//! | [`error`]       | `ReactionError`, `ReactionResult<T>`                              |
//!
//! # Update / execute cycle
//!
//! ```text
//! update_internal_status(now, executed, env)
//!   ├─ per neighbor condition: valid_neighbors(env, node)   (live neighborhood)
//!   ├─ candidates = combine(maps)                            (intersect, multiply)
//!   ├─ propensity = rate × Π contributions                   (0 if any invalid)
//!   └─ time_distribution.update(now, executed, propensity, rng)
//!
//! execute(env)
//!   ├─ target = select_target(candidates, rng)               (None if empty)
//!   ├─ local actions     → own node, always
//!   └─ neighbor actions  → target, skipped when None
//! ```
//!
//! Everything runs on one thread.  A reaction and its clones share one
//! [`SharedRng`][bio_core::SharedRng], so the draw order is the firing order.

pub mod action;
pub mod candidates;
pub mod condition;
pub mod error;
pub mod reaction;
pub mod selector;
pub mod time_dist;

#[cfg(test)]
mod tests;

pub use action::{Action, LocalAction, NeighborAction};
pub use candidates::CandidateMap;
pub use condition::{Condition, LocalCondition, NeighborCondition};
pub use error::{ReactionError, ReactionResult};
pub use reaction::{BiochemicalReaction, ReactionMode};
pub use selector::select_target;
pub use time_dist::{DiracComb, ExponentialTime, TimeDistribution, Trigger};
