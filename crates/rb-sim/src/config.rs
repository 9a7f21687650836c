//! Init-time configuration.
//!
//! The JSON init document is flat: bridge settings at the top level next to
//! the `nodes` array.
//!
//! ```json
//! {
//!   "seed": 42,
//!   "carrier_frequency_hz": 5.21e9,
//!   "mode": "look_ahead",
//!   "min_coherence_time_ms": 5.0,
//!   "nodes": [ { "model": "static", "id": 0, "position": [3, 2, 2] } ]
//! }
//! ```

use std::path::Path;

use rb_channel::{SchedulerConfig, SchedulerMode};
use rb_core::MILLISECOND;
use rb_registry::NodeDescriptor;
use serde::{Deserialize, Serialize};

use crate::{BridgeError, BridgeResult};

/// Bridge settings.  Every field has a default.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Seed for every node's RNG.
    pub seed:                  u64,
    pub carrier_frequency_hz:  f64,
    pub mode:                  SchedulerMode,
    /// Floor on estimated coherence windows, milliseconds.
    pub min_coherence_time_ms: Option<f64>,
    /// Keep the full kinematic history of random-walk nodes.
    pub collect_history:       bool,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            seed:                  0,
            carrier_frequency_hz:  5.21e9,
            mode:                  SchedulerMode::PointToPoint,
            min_coherence_time_ms: None,
            collect_history:       true,
        }
    }
}

impl BridgeConfig {
    /// Scheduler settings derived from this config.
    ///
    /// # Errors
    ///
    /// [`BridgeError::Config`] if `min_coherence_time_ms` is negative or not
    /// finite.
    pub fn scheduler_config(&self) -> BridgeResult<SchedulerConfig> {
        let mut cfg = SchedulerConfig::new(self.mode, self.carrier_frequency_hz);
        if let Some(ms) = self.min_coherence_time_ms {
            if !(ms.is_finite() && ms >= 0.0) {
                return Err(BridgeError::Config(format!(
                    "min_coherence_time_ms must be a non-negative number, got {ms}"
                )));
            }
            cfg = cfg.with_min_coherence_time((ms * MILLISECOND as f64).round() as u64);
        }
        Ok(cfg)
    }
}

/// A complete init document: settings plus node descriptors.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimInit {
    #[serde(flatten)]
    pub config: BridgeConfig,
    pub nodes:  Vec<NodeDescriptor>,
}

impl SimInit {
    pub fn from_json_str(json: &str) -> BridgeResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> BridgeResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|source| BridgeError::Io { path: path.to_path_buf(), source })?;
        Self::from_json_str(&json)
    }
}
