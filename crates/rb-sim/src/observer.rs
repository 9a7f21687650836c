//! Observer trait for [`Bridge::run`][crate::Bridge::run].

use rb_channel::{CoherenceWindow, Freshness, PairKey, QueryStats};
use rb_core::SimTime;
use rb_registry::NodeRegistry;

/// Callbacks invoked while a [`RunPlan`][crate::RunPlan] executes.
///
/// Every method defaults to a no-op.
pub trait BridgeObserver {
    /// After every node has been advanced to `time`.
    fn on_advance(&mut self, _time: SimTime, _registry: &NodeRegistry, _resampled: usize) {}

    /// After each channel query of the plan.
    fn on_query(&mut self, _pair: PairKey, _time: SimTime, _window: CoherenceWindow, _freshness: Freshness) {}

    /// Once the last tick has been processed.
    fn on_run_end(&mut self, _registry: &NodeRegistry, _stats: &QueryStats) {}
}

/// A [`BridgeObserver`] that does nothing.
pub struct NoopObserver;

impl BridgeObserver for NoopObserver {}
