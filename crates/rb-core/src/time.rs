//! Simulation time model.
//!
//! # Design
//!
//! Time is an absolute `SimTime` counter of integer nanoseconds, the unit the
//! discrete-event simulator on the other side of the bridge uses natively.
//! All window arithmetic is exact; floating point only appears when a
//! duration is fed into a kinematic formula (`as_secs_f64`).

use std::fmt;

/// One microsecond, in nanoseconds.
pub const MICROSECOND: u64 = 1_000;
/// One millisecond, in nanoseconds.
pub const MILLISECOND: u64 = 1_000_000;
/// One second, in nanoseconds.
pub const SECOND: u64 = 1_000_000_000;

// ── SimTime ───────────────────────────────────────────────────────────────────

/// An absolute simulation timestamp in nanoseconds.
///
/// `u64` nanoseconds last ~584 years of simulated time.  Offsets saturate
/// rather than wrap so an unbounded coherence time (`u64::MAX`) produces a
/// window that simply never expires.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SimTime(pub u64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0);

    #[inline]
    pub fn from_millis(ms: u64) -> SimTime {
        SimTime(ms.saturating_mul(MILLISECOND))
    }

    /// Convert fractional seconds, rounding to the nearest nanosecond.
    /// Negative inputs clamp to zero.
    #[inline]
    pub fn from_secs_f64(secs: f64) -> SimTime {
        SimTime((secs.max(0.0) * SECOND as f64).round() as u64)
    }

    /// Return the timestamp `ns` nanoseconds after `self` (saturating).
    #[inline]
    pub fn offset(self, ns: u64) -> SimTime {
        SimTime(self.0.saturating_add(ns))
    }

    /// Nanoseconds elapsed from `earlier` to `self`; zero if `earlier` is later.
    #[inline]
    pub fn since(self, earlier: SimTime) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    #[inline]
    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / SECOND as f64
    }
}

impl std::ops::Add<u64> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: u64) -> SimTime {
        self.offset(rhs)
    }
}

impl std::ops::Sub for SimTime {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: SimTime) -> u64 {
        self.since(rhs)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:09}s", self.0 / SECOND, self.0 % SECOND)
    }
}
