use bio_core::NodeId;
use bio_env::EnvError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReactionError {
    /// A reaction declared neighbor conditions but reducing their candidate
    /// maps produced nothing to reduce.  This is a bookkeeping bug in the
    /// reaction's condition list, not a simulation outcome.
    #[error("reaction on {node} has neighbor conditions, but no candidate map was produced")]
    EmptyNeighborReduction { node: NodeId },

    #[error("invalid candidate weights: {0}")]
    InvalidWeights(String),

    #[error(transparent)]
    Env(#[from] EnvError),
}

impl ReactionError {
    /// `true` for errors that signal a broken engine invariant.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, ReactionError::EmptyNeighborReduction { .. })
    }
}

pub type ReactionResult<T> = Result<T, ReactionError>;
