//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `mobility_history.csv`
//! - `channel_windows.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{OutputResult, SampleRow, WindowRow};

pub const HISTORY_FILE: &str = "mobility_history.csv";
pub const WINDOWS_FILE: &str = "channel_windows.csv";

/// Writes diagnostics to two CSV files.
pub struct CsvWriter {
    samples:  Writer<File>,
    windows:  Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Create the two CSV files in `dir` (creating `dir` if needed) and
    /// write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut samples = Writer::from_path(dir.join(HISTORY_FILE))?;
        samples.write_record(["node_id", "time_ns", "x", "y", "z", "vx", "vy", "vz"])?;

        let mut windows = Writer::from_path(dir.join(WINDOWS_FILE))?;
        windows.write_record(["tx", "rx", "query_ns", "start_ns", "end_ns", "freshness"])?;

        Ok(Self { samples, windows, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_samples(&mut self, rows: &[SampleRow]) -> OutputResult<()> {
        for row in rows {
            let [x, y, z] = row.position;
            let [vx, vy, vz] = row.velocity;
            self.samples.write_record(&[
                row.node_id.to_string(),
                row.time_ns.to_string(),
                x.to_string(),
                y.to_string(),
                z.to_string(),
                vx.to_string(),
                vy.to_string(),
                vz.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_windows(&mut self, rows: &[WindowRow]) -> OutputResult<()> {
        for row in rows {
            self.windows.write_record(&[
                row.tx.to_string(),
                row.rx.to_string(),
                row.query_ns.to_string(),
                row.start_ns.to_string(),
                row.end_ns.to_string(),
                row.freshness.as_str().to_owned(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.samples.flush()?;
        self.windows.flush()?;
        Ok(())
    }
}
