use rb_core::{ErrorKind, NodeId};
use rb_mobility::MobilityError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum RegistryError {
    #[error("{0} is not registered")]
    UnknownNode(NodeId),

    #[error("{0} is described more than once")]
    DuplicateNode(NodeId),

    #[error("{node}: {source}")]
    Model {
        node:   NodeId,
        #[source]
        source: MobilityError,
    },

    #[error(transparent)]
    Mobility(#[from] MobilityError),
}

impl RegistryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RegistryError::UnknownNode(_)          => ErrorKind::UnknownNode,
            RegistryError::DuplicateNode(_)        => ErrorKind::DuplicateNode,
            RegistryError::Model { source, .. }    => source.kind(),
            RegistryError::Mobility(e)             => e.kind(),
        }
    }
}

pub type RegistryResult<T> = Result<T, RegistryError>;
