//! Non-blocking look-ahead evaluation.
//!
//! A speculation is a request for the window that follows the one just
//! installed, built from straight-line predicted kinematics.  It runs on the
//! rayon pool and reports through a one-slot crossbeam channel; the
//! scheduler keeps only the receiving end.  Dropping a [`Speculation`]
//! abandons it: the worker's send then fails and its result is discarded.

use std::sync::Arc;

use crossbeam_channel::Receiver;

use crate::{ChannelEvaluator, ChannelRequest, CoherenceWindow, Evaluation, EvaluatorError};

type Outcome<D> = Result<Evaluation<D>, EvaluatorError>;

/// An in-flight look-ahead evaluation for one pair.
#[derive(Debug)]
pub(crate) struct Speculation<D> {
    pub(crate) request: ChannelRequest,
    /// The predicted window the request was issued for.
    pub(crate) window:  CoherenceWindow,
    done:               Receiver<Outcome<D>>,
}

impl<D: Send + 'static> Speculation<D> {
    pub(crate) fn dispatch<E>(evaluator: Arc<E>, request: ChannelRequest) -> Self
    where
        E: ChannelEvaluator<Description = D>,
    {
        let window = CoherenceWindow::anchored(request.window_start, request.coherence_hint);
        let (tx, done) = crossbeam_channel::bounded(1);
        rayon::spawn(move || {
            // The receiver is gone if the speculation was discarded.
            let _ = tx.send(evaluator.evaluate(&request));
        });
        Self { request, window, done }
    }

    /// `true` once the worker has reported.
    pub(crate) fn is_ready(&self) -> bool {
        !self.done.is_empty()
    }

    /// Block until the worker reports.
    pub(crate) fn wait(self) -> Outcome<D> {
        self.done
            .recv()
            .unwrap_or_else(|_| Err(EvaluatorError::new("speculative evaluation ended without a result")))
    }
}
