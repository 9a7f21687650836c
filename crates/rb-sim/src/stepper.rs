//! Kinematics steppers.
//!
//! Mobility models only record state; a stepper computes where each
//! random-walk node is at the next tick.

use rb_core::{KinematicSample, NodeId, SimTime, Vec3};

/// The stepper's answer for one node.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StepOutcome {
    pub position: Vec3,
    pub velocity: Vec3,
    pub hit_wall: bool,
}

/// Computes a node's next kinematic state from its current one.
pub trait KinematicsStepper {
    fn step(&mut self, node: NodeId, current: &KinematicSample, to: SimTime) -> StepOutcome;
}

impl<F> KinematicsStepper for F
where
    F: FnMut(NodeId, &KinematicSample, SimTime) -> StepOutcome,
{
    fn step(&mut self, node: NodeId, current: &KinematicSample, to: SimTime) -> StepOutcome {
        self(node, current, to)
    }
}

/// Straight-line motion inside an axis-aligned box.
///
/// A node crossing a face is mirrored back inside and the velocity component
/// normal to that face is negated; the outcome then reports `hit_wall`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoxStepper {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoxStepper {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min: min.inf(&max), max: min.sup(&max) }
    }

    /// A room `[0, x] × [0, y] × [0, z]`.
    pub fn room(x: f64, y: f64, z: f64) -> Self {
        Self::new(Vec3::zeros(), Vec3::new(x, y, z))
    }

    pub fn contains(&self, p: &Vec3) -> bool {
        (0..3).all(|i| self.min[i] <= p[i] && p[i] <= self.max[i])
    }
}

impl KinematicsStepper for BoxStepper {
    fn step(&mut self, _node: NodeId, current: &KinematicSample, to: SimTime) -> StepOutcome {
        let dt = SimTime(to.since(current.time)).as_secs_f64();
        let mut position = current.position + current.velocity * dt;
        let mut velocity = current.velocity;
        let mut hit_wall = false;

        for i in 0..3 {
            let (lo, hi) = (self.min[i], self.max[i]);
            if position[i] < lo {
                position[i] = (2.0 * lo - position[i]).min(hi);
                velocity[i] = -velocity[i];
                hit_wall = true;
            } else if position[i] > hi {
                position[i] = (2.0 * hi - position[i]).max(lo);
                velocity[i] = -velocity[i];
                hit_wall = true;
            }
        }
        StepOutcome { position, velocity, hit_wall }
    }
}
