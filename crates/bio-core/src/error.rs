//! Framework error type.
//!
//! Sub-crates define their own error enums (`EnvError`, `ReactionError`,
//! `SimError`) and wrap lower layers via `#[from]`.  `BioError` covers the
//! few failure modes that belong to the core vocabulary itself.

use thiserror::Error;

/// The top-level error type for `bio-core`.
#[derive(Debug, Error)]
pub enum BioError {
    #[error("invalid molecule name: {0:?}")]
    InvalidMolecule(String),
}

/// Shorthand result type for `bio-core`.
pub type BioResult<T> = Result<T, BioError>;
