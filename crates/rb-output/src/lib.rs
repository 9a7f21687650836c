//! `rb-output` — diagnostic dumps of mobility history and channel windows.
//!
//! | Backend | Files created                                     |
//! |---------|---------------------------------------------------|
//! | CSV     | `mobility_history.csv`, `channel_windows.csv`     |
//!
//! Writers implement [`OutputWriter`]; [`BridgeOutputObserver`] drives one
//! from `rb_sim::Bridge::run`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use rb_output::{BridgeOutputObserver, CsvWriter};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = BridgeOutputObserver::new(writer);
//! bridge.run(&plan, &mut stepper, &mut obs)?;
//! if let Some(e) = obs.take_error() { eprintln!("output error: {e}"); }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::BridgeOutputObserver;
pub use row::{SampleRow, WindowRow, history_rows};
pub use writer::OutputWriter;
