//! Velocity re-sampling triggers.

use rb_core::SimTime;

use crate::{MobilityError, MobilityResult};

/// When a random-walk node draws a new speed and heading.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ResamplePolicy {
    /// Keep the velocity until the stepper reports a wall collision; the
    /// stepper reflects the heading itself.
    WallCollision,
    /// Re-draw once `period_ns` has elapsed since the last draw.
    TimeInterval { period_ns: u64 },
    /// Re-draw once `period_m` metres have been travelled since the last draw.
    DistanceInterval { period_m: f64 },
}

type Resolver = fn(f64) -> MobilityResult<ResamplePolicy>;

const MODES: &[(&str, Resolver)] = &[
    ("wall",     resolve_wall),
    ("time",     resolve_time),
    ("distance", resolve_distance),
];

impl ResamplePolicy {
    /// Resolve a descriptor's mode name and mode value (nanoseconds for
    /// `time`, metres for `distance`, ignored for `wall`).
    pub fn resolve(mode: &str, value: f64) -> MobilityResult<ResamplePolicy> {
        let mode = mode.trim().to_ascii_lowercase();
        let (_, resolver) = MODES
            .iter()
            .find(|(name, _)| *name == mode)
            .ok_or_else(|| MobilityError::UnknownFamily { what: "mobility mode", name: mode.clone() })?;
        resolver(value)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ResamplePolicy::WallCollision          => "wall",
            ResamplePolicy::TimeInterval { .. }     => "time",
            ResamplePolicy::DistanceInterval { .. } => "distance",
        }
    }
}

fn resolve_wall(_: f64) -> MobilityResult<ResamplePolicy> {
    Ok(ResamplePolicy::WallCollision)
}

fn resolve_time(v: f64) -> MobilityResult<ResamplePolicy> {
    let period_ns = positive("time", v)?.round() as u64;
    Ok(ResamplePolicy::TimeInterval { period_ns: period_ns.max(1) })
}

fn resolve_distance(v: f64) -> MobilityResult<ResamplePolicy> {
    Ok(ResamplePolicy::DistanceInterval { period_m: positive("distance", v)? })
}

fn positive(mode: &'static str, v: f64) -> MobilityResult<f64> {
    if v.is_finite() && v > 0.0 {
        Ok(v)
    } else {
        Err(MobilityError::invalid("mobility mode", format!("{mode} period must be positive, got {v}")))
    }
}

// ── Trigger state ─────────────────────────────────────────────────────────────

/// Per-instance trigger bookkeeping for the active [`ResamplePolicy`].
#[derive(Clone, Debug)]
pub(crate) enum Trigger {
    Wall,
    Time { period: u64, last_resample: SimTime },
    Distance { period: f64, accumulated: f64 },
}

impl Trigger {
    pub(crate) fn new(policy: ResamplePolicy, now: SimTime) -> Self {
        match policy {
            ResamplePolicy::WallCollision => Trigger::Wall,
            ResamplePolicy::TimeInterval { period_ns } => {
                Trigger::Time { period: period_ns, last_resample: now }
            }
            ResamplePolicy::DistanceInterval { period_m } => {
                Trigger::Distance { period: period_m, accumulated: 0.0 }
            }
        }
    }

    /// Feed one observation; `true` when a re-draw is due.
    pub(crate) fn observe(&mut self, now: SimTime, distance: f64) -> bool {
        match self {
            Trigger::Wall => false,
            Trigger::Time { period, last_resample } => now.since(*last_resample) >= *period,
            Trigger::Distance { period, accumulated } => {
                *accumulated += distance;
                *accumulated >= *period
            }
        }
    }

    pub(crate) fn reset(&mut self, now: SimTime) {
        match self {
            Trigger::Wall => {}
            Trigger::Time { last_resample, .. } => *last_resample = now,
            Trigger::Distance { accumulated, .. } => *accumulated = 0.0,
        }
    }
}
