//! Error taxonomy shared across the workspace.
//!
//! Each crate keeps its own `thiserror` enum; every one of them reports the
//! category it belongs to through a `kind()` method returning [`ErrorKind`],
//! so the enclosing simulation loop can decide on retry policy without
//! matching on crate-specific variants.  No crate retries internally.

use thiserror::Error;

/// The category of a failure surfaced by any `rb-*` crate.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Error)]
pub enum ErrorKind {
    /// Speed, frequency or weight outside its valid bounds.
    #[error("out-of-range parameter")]
    OutOfRangeParameter,

    /// Zero-length path direction or coincident tx/rx positions.
    #[error("invalid geometry")]
    InvalidGeometry,

    /// Power-weight count differs from the path count.
    #[error("mismatched weights")]
    MismatchedWeights,

    /// Node id not present in the registry.
    #[error("unknown node")]
    UnknownNode,

    /// Node id appears twice in the init descriptor list.
    #[error("duplicate node")]
    DuplicateNode,

    /// A mobility update earlier than the node's last update.
    #[error("stale update")]
    StaleUpdate,

    /// Query for a timestamp that was never recorded.
    #[error("history miss")]
    HistoryMiss,

    /// The external channel evaluator failed.
    #[error("evaluator failure")]
    EvaluatorFailure,

    /// Unrecognised mobility mode or distribution family.
    #[error("unknown model family")]
    UnknownFamily,

    /// Malformed model or distribution parameters.
    #[error("invalid parameter")]
    InvalidParameter,
}
