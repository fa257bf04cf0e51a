//! `bio-env`: nodes, capabilities, and the neighborhood relation.
//!
//! # Crate layout
//!
//! | Module            | Contents                                                   |
//! |-------------------|------------------------------------------------------------|
//! | [`capability`]    | `CapabilitySlot` trait, `TypedCapability<T>`, `CapabilityMap` |
//! | [`cell`]          | `CellProperty` (cell marker + junction bookkeeping)        |
//! | [`node`]          | `Node` (concentrations + capabilities)                     |
//! | [`builder`]       | `NodeBuilder` (fluent construction)                        |
//! | [`environment`]   | `Environment` (node storage + symmetric links)             |
//! | [`neighborhood`]  | `Neighborhood<'a>` (borrowed adjacency view)               |
//! | [`error`]         | `EnvError`, `EnvResult<T>`                                 |
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                     |
//! |-----------|------------------------------------------------------------|
//! | `fx-hash` | Concentration maps use `FxHashMap` instead of SipHash.     |
//! | `serde`   | Propagates serde derives to `bio-core` types.              |

pub mod builder;
pub mod capability;
pub mod cell;
pub mod environment;
pub mod error;
pub mod neighborhood;
pub mod node;


pub use builder::NodeBuilder;
pub use capability::{CapabilityMap, CapabilitySlot, TypedCapability};
pub use cell::CellProperty;
pub use environment::Environment;
pub use error::{EnvError, EnvResult};
pub use neighborhood::Neighborhood;
pub use node::Node;
