use bio_core::NodeId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnvError {
    #[error("node {0} not found")]
    NodeNotFound(NodeId),

    #[error("node {0} cannot be linked to itself")]
    SelfLink(NodeId),
}

pub type EnvResult<T> = Result<T, EnvError>;
