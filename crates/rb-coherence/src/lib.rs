//! `rb-coherence` — coherence-time bounds for cache validity.
//!
//! Pure, stateless functions mapping the kinematic state of a transmitter and
//! a receiver to an upper bound on how long a computed channel stays valid.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                        |
//! |--------------|-----------------------------------------------------------------|
//! | [`model`]    | `coherence_time`: speed/frequency closed forms                 |
//! | [`doppler`]  | `doppler_profile`, `coherence_from_relative_motion`             |
//! | [`error`]    | `CoherenceError`, `CoherenceResult<T>`                          |
//!
//! All results are integer nanoseconds so they can be added directly to a
//! [`SimTime`][rb_core::SimTime].

pub mod doppler;
pub mod error;
pub mod model;

#[cfg(test)]
mod tests;

pub use doppler::{DopplerProfile, PathGeometry, coherence_from_relative_motion, doppler_profile};
pub use error::{CoherenceError, CoherenceResult};
pub use model::{CoherenceModel, coherence_time};

use rb_core::SECOND;

/// Speed of light in vacuum, m/s.
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;

/// Coherence bound for a channel that is, for practical purposes, static.
pub const MAX_COHERENCE_TIME: u64 = 10 * SECOND;

/// Upper bound on node speed accepted by [`coherence_time`], m/s.
pub const MAX_SPEED: f64 = 100.0;

/// Lower bound on the carrier frequency, Hz.
pub const MIN_CARRIER_FREQUENCY: f64 = 1e6;

/// Numerator of the 50 %-correlation coherence approximation `0.423 / f_D`.
pub const COHERENCE_FACTOR: f64 = 0.423;
