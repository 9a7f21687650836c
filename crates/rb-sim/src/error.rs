use std::path::PathBuf;

use rb_channel::ChannelError;
use rb_core::ErrorKind;
use rb_mobility::MobilityError;
use rb_registry::RegistryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("cannot read {}: {source}", path.display())]
    Io {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed init document: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Mobility(#[from] MobilityError),

    #[error(transparent)]
    Channel(#[from] ChannelError),
}

impl BridgeError {
    /// Taxonomy category; `None` for failures reading the init document.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            BridgeError::Config(_)              => Some(ErrorKind::InvalidParameter),
            BridgeError::Io { .. }              => None,
            BridgeError::Json(_)                => None,
            BridgeError::Registry(e)            => Some(e.kind()),
            BridgeError::Mobility(e)            => Some(e.kind()),
            BridgeError::Channel(e)             => Some(e.kind()),
        }
    }
}

pub type BridgeResult<T> = Result<T, BridgeError>;
