//! Single-path coherence time from a scalar speed.

use std::f64::consts::PI;
use std::str::FromStr;

use crate::{
    COHERENCE_FACTOR, CoherenceError, CoherenceResult, MAX_SPEED, MIN_CARRIER_FREQUENCY,
    SPEED_OF_LIGHT,
};

/// Which closed-form approximation [`coherence_time`] applies.
///
/// Both assume maximal Doppler spread on a single path, i.e. a worst case.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CoherenceModel {
    /// `9c / (16π·2·v·f_c)`.
    Rappaport,
    /// `0.423c / (v·f_c)`.
    #[default]
    Rappaport2,
}

impl CoherenceModel {
    pub fn as_str(self) -> &'static str {
        match self {
            CoherenceModel::Rappaport  => "rappaport",
            CoherenceModel::Rappaport2 => "rappaport2",
        }
    }
}

impl FromStr for CoherenceModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "rappaport"  => Ok(CoherenceModel::Rappaport),
            "rappaport2" => Ok(CoherenceModel::Rappaport2),
            other => Err(format!(
                "unknown coherence model {other:?}: expected \"rappaport\" or \"rappaport2\""
            )),
        }
    }
}

impl std::fmt::Display for CoherenceModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coherence time in nanoseconds for a node moving at `speed` m/s on a
/// carrier of `carrier_frequency` Hz, rounded up to the next nanosecond.
///
/// Requires `0 ≤ speed ≤ 100` and `carrier_frequency ≥ 1 MHz`.  A speed of
/// exactly zero has no Doppler and yields `u64::MAX` (unbounded).
pub fn coherence_time(
    speed:             f64,
    carrier_frequency: f64,
    model:             CoherenceModel,
) -> CoherenceResult<u64> {
    if !(0.0..=MAX_SPEED).contains(&speed) {
        return Err(CoherenceError::OutOfRange { what: "speed", value: speed, range: "[0, 100] m/s" });
    }
    if !(carrier_frequency >= MIN_CARRIER_FREQUENCY) || !carrier_frequency.is_finite() {
        return Err(CoherenceError::OutOfRange {
            what:  "carrier frequency",
            value: carrier_frequency,
            range: ">= 1 MHz",
        });
    }
    if speed == 0.0 {
        return Ok(u64::MAX);
    }

    let ns = match model {
        CoherenceModel::Rappaport => {
            9.0 * SPEED_OF_LIGHT * 1e9 / (16.0 * PI * 2.0 * speed * carrier_frequency)
        }
        CoherenceModel::Rappaport2 => {
            COHERENCE_FACTOR * SPEED_OF_LIGHT * 1e9 / (speed * carrier_frequency)
        }
    };
    // `as` saturates, so an enormous bound at tiny speeds stays representable.
    Ok(ns.ceil() as u64)
}
