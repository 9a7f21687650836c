//! The two mobility variants and their common capability set.

use rb_core::{KinematicSample, NodeId, NodeRng, SimTime, Vec3};
use tracing::debug;

use crate::trigger::Trigger;
use crate::{History, MobilityError, MobilityResult, ResamplePolicy, Sampler};

// ── StaticMobility ────────────────────────────────────────────────────────────

/// A node fixed at its constructed position.
#[derive(Clone, Debug)]
pub struct StaticMobility {
    node:   NodeId,
    sample: KinematicSample,
}

impl StaticMobility {
    pub fn new(node: NodeId, position: Vec3) -> Self {
        Self { node, sample: KinematicSample::at_rest(position, SimTime::ZERO) }
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.sample.position
    }
}

// ── RandomWalkMobility ────────────────────────────────────────────────────────

/// Validated random-walk configuration.
#[derive(Clone, Debug)]
pub struct RandomWalkParams {
    pub policy:    ResamplePolicy,
    pub speed:     Sampler,
    pub direction: Sampler,
}

/// A node whose speed and heading are re-drawn according to a
/// [`ResamplePolicy`].
///
/// The velocity drawn at construction is recorded as the sample at
/// `SimTime::ZERO`, so the node is queryable before its first advance.
/// A re-draw changes only the live state handed to the stepper; the last
/// recorded sample keeps the velocity it was recorded with.
#[derive(Debug)]
pub struct RandomWalkMobility {
    node:      NodeId,
    current:   KinematicSample,
    recorded:  KinematicSample,
    hit_wall:  bool,
    heading:   f64,
    speed:     Sampler,
    direction: Sampler,
    trigger:   Trigger,
    history:   Option<History>,
    rng:       NodeRng,
}

impl RandomWalkMobility {
    pub fn new(
        node:            NodeId,
        position:        Vec3,
        params:          RandomWalkParams,
        rng:             NodeRng,
        collect_history: bool,
    ) -> Self {
        let mut walk = Self {
            node,
            current:   KinematicSample::at_rest(position, SimTime::ZERO),
            recorded:  KinematicSample::at_rest(position, SimTime::ZERO),
            hit_wall:  false,
            heading:   0.0,
            speed:     params.speed,
            direction: params.direction,
            trigger:   Trigger::new(params.policy, SimTime::ZERO),
            history:   collect_history.then(History::new),
            rng,
        };
        walk.resample(SimTime::ZERO);
        walk.record();
        walk
    }

    /// Record the stepper's new state for `time`.
    ///
    /// # Errors
    ///
    /// [`MobilityError::StaleUpdate`] if `time` precedes the last update.
    pub fn advance(
        &mut self,
        time:     SimTime,
        position: Vec3,
        velocity: Vec3,
        hit_wall: bool,
    ) -> MobilityResult<()> {
        if time < self.current.time {
            return Err(MobilityError::StaleUpdate {
                node:      self.node,
                last:      self.current.time,
                attempted: time,
            });
        }
        self.current = KinematicSample::new(position, velocity, time);
        self.hit_wall = hit_wall;
        if velocity.x != 0.0 || velocity.y != 0.0 {
            self.heading = self.current.heading();
        }
        self.record();
        Ok(())
    }

    fn record(&mut self) {
        self.recorded = self.current;
        if let Some(h) = self.history.as_mut() {
            h.record(self.current);
        }
    }

    /// Apply the time or distance trigger; returns `true` if a new velocity
    /// was drawn.  Under [`ResamplePolicy::WallCollision`] this never fires.
    pub fn check_and_resample(&mut self, time: SimTime, distance: f64) -> bool {
        if !self.trigger.observe(time, distance) {
            return false;
        }
        self.resample(time);
        true
    }

    /// Exact lookup of the sample recorded at `time`.
    pub fn sample_at(&self, time: SimTime) -> MobilityResult<KinematicSample> {
        let found = match &self.history {
            Some(h) => h.at(time).copied(),
            None => (self.recorded.time == time).then_some(self.recorded),
        };
        found.ok_or(MobilityError::HistoryMiss { node: self.node, time })
    }

    fn resample(&mut self, now: SimTime) {
        let speed = self.speed.sample(&mut self.rng);
        let heading = self.direction.sample(&mut self.rng);
        self.current.velocity = Vec3::new(heading.cos() * speed, heading.sin() * speed, 0.0);
        self.heading = heading;
        self.trigger.reset(now);
        debug!(node = %self.node, time = %now, speed, heading, "re-sampled velocity");
    }

    /// Whether the last advance reported a wall collision.
    pub fn hit_wall(&self) -> bool {
        self.hit_wall
    }

    /// Distance accumulated towards the next re-draw (distance policy only).
    pub fn segment_distance(&self) -> Option<f64> {
        match self.trigger {
            Trigger::Distance { accumulated, .. } => Some(accumulated),
            _ => None,
        }
    }

    /// Timestamp of the last re-draw (time policy only).
    pub fn last_resample(&self) -> Option<SimTime> {
        match self.trigger {
            Trigger::Time { last_resample, .. } => Some(last_resample),
            _ => None,
        }
    }
}

// ── MobilityModel ─────────────────────────────────────────────────────────────

/// One node's mobility model.
///
/// Both variants answer the same capability set; only two exist, so this is
/// a closed enum rather than a trait object.
#[derive(Debug)]
pub enum MobilityModel {
    Static(StaticMobility),
    RandomWalk(RandomWalkMobility),
}

impl MobilityModel {
    pub fn node(&self) -> NodeId {
        match self {
            MobilityModel::Static(s)     => s.node,
            MobilityModel::RandomWalk(w) => w.node,
        }
    }

    /// `true` for models that must be advanced every tick.
    pub fn is_mobile(&self) -> bool {
        matches!(self, MobilityModel::RandomWalk(_))
    }

    /// Position and velocity at `time`.  Static nodes ignore `time`.
    pub fn sample_at(&self, time: SimTime) -> MobilityResult<KinematicSample> {
        match self {
            MobilityModel::Static(s) => Ok(KinematicSample { time, ..s.sample }),
            MobilityModel::RandomWalk(w) => w.sample_at(time),
        }
    }

    pub fn position_at(&self, time: SimTime) -> MobilityResult<Vec3> {
        self.sample_at(time).map(|s| s.position)
    }

    pub fn velocity_at(&self, time: SimTime) -> MobilityResult<Vec3> {
        self.sample_at(time).map(|s| s.velocity)
    }

    /// Record a new kinematic state.  A no-op for static nodes.
    pub fn advance(
        &mut self,
        time:     SimTime,
        position: Vec3,
        velocity: Vec3,
        hit_wall: bool,
    ) -> MobilityResult<()> {
        match self {
            MobilityModel::Static(_) => Ok(()),
            MobilityModel::RandomWalk(w) => w.advance(time, position, velocity, hit_wall),
        }
    }

    pub fn check_and_resample(&mut self, time: SimTime, distance: f64) -> bool {
        match self {
            MobilityModel::Static(_) => false,
            MobilityModel::RandomWalk(w) => w.check_and_resample(time, distance),
        }
    }

    /// Current heading in radians; always zero for static nodes.
    pub fn heading(&self) -> f64 {
        match self {
            MobilityModel::Static(_)     => 0.0,
            MobilityModel::RandomWalk(w) => w.heading,
        }
    }

    pub fn current(&self) -> &KinematicSample {
        match self {
            MobilityModel::Static(s)     => &s.sample,
            MobilityModel::RandomWalk(w) => &w.current,
        }
    }

    pub fn last_update(&self) -> SimTime {
        self.current().time
    }

    /// Recorded history, if this model collects one.
    pub fn history(&self) -> Option<&History> {
        match self {
            MobilityModel::Static(_)     => None,
            MobilityModel::RandomWalk(w) => w.history.as_ref(),
        }
    }
}
