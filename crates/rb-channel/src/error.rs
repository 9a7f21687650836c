use rb_coherence::CoherenceError;
use rb_core::ErrorKind;
use rb_registry::RegistryError;
use thiserror::Error;

use crate::{EvaluatorError, PairKey};

#[derive(Debug, Error, PartialEq)]
pub enum ChannelError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Coherence(#[from] CoherenceError),

    #[error("channel evaluation for {pair} failed: {source}")]
    Evaluator {
        pair:   PairKey,
        #[source]
        source: EvaluatorError,
    },

    /// A look-ahead evaluation failed; reported when its result is consumed.
    #[error("speculative channel evaluation for {pair} failed: {source}")]
    Speculative {
        pair:   PairKey,
        #[source]
        source: EvaluatorError,
    },
}

impl ChannelError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ChannelError::Registry(e)        => e.kind(),
            ChannelError::Coherence(e)       => e.kind(),
            ChannelError::Evaluator { .. }   => ErrorKind::EvaluatorFailure,
            ChannelError::Speculative { .. } => ErrorKind::EvaluatorFailure,
        }
    }
}

pub type ChannelResult<T> = Result<T, ChannelError>;
