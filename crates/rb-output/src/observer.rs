//! `BridgeOutputObserver<W>` bridges `BridgeObserver` to an `OutputWriter`.

use rb_channel::{CoherenceWindow, Freshness, PairKey, QueryStats};
use rb_core::SimTime;
use rb_registry::NodeRegistry;
use rb_sim::BridgeObserver;

use crate::row::{WindowRow, history_rows};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`BridgeObserver`] that records every channel query and, at the end of
/// the run, the full mobility history.
///
/// Window rows are buffered and written in batches of `batch` rows.  Errors
/// from the writer are stored because observer callbacks cannot return
/// them; check [`take_error`][Self::take_error] after the run.
pub struct BridgeOutputObserver<W: OutputWriter> {
    writer:     W,
    pending:    Vec<WindowRow>,
    batch:      usize,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> BridgeOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self::with_batch(writer, 1024)
    }

    pub fn with_batch(writer: W, batch: usize) -> Self {
        Self { writer, pending: Vec::new(), batch: batch.max(1), last_error: None }
    }

    /// Take the stored write error (if any) after the run.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn flush_windows(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let rows = std::mem::take(&mut self.pending);
        let result = self.writer.write_windows(&rows);
        self.store_err(result);
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> BridgeObserver for BridgeOutputObserver<W> {
    fn on_query(&mut self, pair: PairKey, time: SimTime, window: CoherenceWindow, freshness: Freshness) {
        self.pending.push(WindowRow::new(pair, time, window, freshness));
        if self.pending.len() >= self.batch {
            self.flush_windows();
        }
    }

    fn on_run_end(&mut self, registry: &NodeRegistry, _stats: &QueryStats) {
        self.flush_windows();
        let result = self.writer.write_samples(&history_rows(registry));
        self.store_err(result);
        let result = self.writer.finish();
        self.store_err(result);
    }
}
