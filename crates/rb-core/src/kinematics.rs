//! Kinematic state shared by the mobility models and the channel scheduler.

use nalgebra::Vector3;

use crate::SimTime;

/// A 3-vector in metres (positions) or metres per second (velocities).
pub type Vec3 = Vector3<f64>;

/// Position and velocity of one node at one timestamp.
///
/// Samples are values: once recorded in a history they are never mutated.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KinematicSample {
    pub position: Vec3,
    pub velocity: Vec3,
    pub time:     SimTime,
}

impl KinematicSample {
    #[inline]
    pub fn new(position: Vec3, velocity: Vec3, time: SimTime) -> Self {
        Self { position, velocity, time }
    }

    /// A sample with zero velocity.
    #[inline]
    pub fn at_rest(position: Vec3, time: SimTime) -> Self {
        Self::new(position, Vec3::zeros(), time)
    }

    /// Magnitude of the velocity in m/s.
    #[inline]
    pub fn speed(&self) -> f64 {
        self.velocity.norm()
    }

    /// Heading in the x/y plane in radians, `atan2(vy, vx)`.
    ///
    /// Zero for a node at rest.
    pub fn heading(&self) -> f64 {
        if self.velocity.x == 0.0 && self.velocity.y == 0.0 {
            0.0
        } else {
            self.velocity.y.atan2(self.velocity.x)
        }
    }

    /// Straight-line prediction of this sample at `to`, velocity unchanged.
    ///
    /// `to` earlier than `self.time` returns the sample re-stamped without
    /// moving it.
    pub fn extrapolate(&self, to: SimTime) -> KinematicSample {
        let dt = SimTime(to.since(self.time)).as_secs_f64();
        KinematicSample {
            position: self.position + self.velocity * dt,
            velocity: self.velocity,
            time:     to.max(self.time),
        }
    }
}
