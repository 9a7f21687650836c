use rb_core::ErrorKind;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CoherenceError {
    #[error("{what} {value} outside valid range {range}")]
    OutOfRange {
        what:  &'static str,
        value: f64,
        range: &'static str,
    },

    #[error("invalid geometry: {0}")]
    InvalidGeometry(&'static str),

    #[error("{weights} power weights supplied for {paths} paths")]
    MismatchedWeights { weights: usize, paths: usize },
}

impl CoherenceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoherenceError::OutOfRange { .. }        => ErrorKind::OutOfRangeParameter,
            CoherenceError::InvalidGeometry(_)       => ErrorKind::InvalidGeometry,
            CoherenceError::MismatchedWeights { .. } => ErrorKind::MismatchedWeights,
        }
    }
}

pub type CoherenceResult<T> = Result<T, CoherenceError>;
