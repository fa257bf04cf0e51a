use bio_core::{NodeId, ReactionId};
use bio_env::EnvError;
use bio_reaction::ReactionError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("reaction references missing node {0}")]
    NodeNotFound(NodeId),

    #[error("reaction {0} not found")]
    ReactionNotFound(ReactionId),

    #[error("reaction error: {0}")]
    Reaction(#[from] ReactionError),

    #[error("environment error: {0}")]
    Env(#[from] EnvError),
}

pub type SimResult<T> = Result<T, SimError>;
