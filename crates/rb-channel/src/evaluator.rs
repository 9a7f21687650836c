//! The external channel evaluator.
//!
//! The scheduler treats the evaluator (a ray tracer in production, a mock in
//! tests) as a black box: it is handed the kinematic state of both ends and
//! the window start, and returns an opaque description.  Look-ahead mode
//! calls it from rayon worker threads, hence the `Send + Sync` bound.

use rb_core::{KinematicSample, NodeId, SimTime};
use thiserror::Error;

use crate::CoherenceWindow;

/// One channel evaluation request.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ChannelRequest {
    pub tx:             NodeId,
    pub rx:             NodeId,
    pub tx_state:       KinematicSample,
    pub rx_state:       KinematicSample,
    /// Start of the validity window being computed.
    pub window_start:   SimTime,
    /// The scheduler's own coherence estimate for the pair, ns.
    pub coherence_hint: u64,
    /// `true` when the states are straight-line predictions rather than
    /// observed samples.
    pub speculative:    bool,
}

/// A successful evaluation.
#[derive(Clone, Debug, PartialEq)]
pub struct Evaluation<D> {
    pub description: D,
    /// The window the evaluator computed for, if it refined the estimate.
    pub window:      Option<CoherenceWindow>,
}

impl<D> Evaluation<D> {
    pub fn new(description: D) -> Self {
        Self { description, window: None }
    }

    pub fn with_window(mut self, window: CoherenceWindow) -> Self {
        self.window = Some(window);
        self
    }
}

/// Failure reported by the evaluator.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct EvaluatorError(pub String);

impl EvaluatorError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// The channel computation collaborator.
pub trait ChannelEvaluator: Send + Sync + 'static {
    /// Opaque channel description (path loss, delays, ...).
    type Description: Clone + Send + 'static;

    fn evaluate(&self, request: &ChannelRequest) -> Result<Evaluation<Self::Description>, EvaluatorError>;

    /// Evaluate several requests sharing a transmitter in one pass.
    ///
    /// Results are positional.  The default evaluates each request in turn.
    fn evaluate_batch(
        &self,
        requests: &[ChannelRequest],
    ) -> Vec<Result<Evaluation<Self::Description>, EvaluatorError>> {
        requests.iter().map(|r| self.evaluate(r)).collect()
    }
}
