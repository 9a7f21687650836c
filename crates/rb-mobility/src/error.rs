use rb_core::{ErrorKind, NodeId, SimTime};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum MobilityError {
    #[error("{node}: update at {attempted} is earlier than its last update at {last}")]
    StaleUpdate {
        node:      NodeId,
        last:      SimTime,
        attempted: SimTime,
    },

    #[error("{node}: no kinematic sample recorded at {time}")]
    HistoryMiss { node: NodeId, time: SimTime },

    #[error("unknown {what} family {name:?}")]
    UnknownFamily { what: &'static str, name: String },

    #[error("invalid {what} parameters: {reason}")]
    InvalidParameter { what: &'static str, reason: String },
}

impl MobilityError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MobilityError::StaleUpdate { .. }      => ErrorKind::StaleUpdate,
            MobilityError::HistoryMiss { .. }      => ErrorKind::HistoryMiss,
            MobilityError::UnknownFamily { .. }    => ErrorKind::UnknownFamily,
            MobilityError::InvalidParameter { .. } => ErrorKind::InvalidParameter,
        }
    }

    pub(crate) fn invalid(what: &'static str, reason: impl Into<String>) -> Self {
        MobilityError::InvalidParameter { what, reason: reason.into() }
    }
}

pub type MobilityResult<T> = Result<T, MobilityError>;
