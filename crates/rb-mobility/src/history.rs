//! Append-only kinematic history.

use rb_core::{KinematicSample, SimTime, Vec3};

/// Timestamped samples in strictly increasing time order.
///
/// Inserts are appends (the simulator only moves forward), so an exact
/// lookup is a binary search over the log.
#[derive(Clone, Debug, Default)]
pub struct History {
    samples: Vec<KinematicSample>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `sample`.  A sample at the same timestamp as the last one
    /// replaces it so timestamps stay unique.
    ///
    /// Callers guarantee `sample.time >= last().time`.
    pub(crate) fn record(&mut self, sample: KinematicSample) {
        match self.samples.last_mut() {
            Some(last) if last.time == sample.time => *last = sample,
            _ => {
                debug_assert!(self.samples.last().is_none_or(|l| l.time < sample.time));
                self.samples.push(sample);
            }
        }
    }

    /// The sample recorded at exactly `time`, if any.
    pub fn at(&self, time: SimTime) -> Option<&KinematicSample> {
        self.samples
            .binary_search_by_key(&time, |s| s.time)
            .ok()
            .map(|i| &self.samples[i])
    }

    pub fn samples(&self) -> &[KinematicSample] {
        &self.samples
    }

    pub fn last(&self) -> Option<&KinematicSample> {
        self.samples.last()
    }

    /// `(timestamp, position)` pairs in time order.
    pub fn positions(&self) -> impl Iterator<Item = (SimTime, Vec3)> + '_ {
        self.samples.iter().map(|s| (s.time, s.position))
    }

    /// `(timestamp, velocity)` pairs in time order.
    pub fn velocities(&self) -> impl Iterator<Item = (SimTime, Vec3)> + '_ {
        self.samples.iter().map(|s| (s.time, s.velocity))
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
