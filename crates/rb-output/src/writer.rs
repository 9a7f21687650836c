//! The `OutputWriter` trait implemented by all backend writers.

use crate::{OutputResult, SampleRow, WindowRow};

pub trait OutputWriter {
    /// Write a batch of kinematic samples.
    fn write_samples(&mut self, rows: &[SampleRow]) -> OutputResult<()>;

    /// Write a batch of channel-window records.
    fn write_windows(&mut self, rows: &[WindowRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent; safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
