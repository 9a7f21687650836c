//! The [`Bridge`] facade.

use std::sync::Arc;

use rb_channel::{ChannelEvaluator, ChannelReply, ChannelScheduler, PairKey, QueryStats};
use rb_core::{NodeId, SimTime, Vec3};
use rb_registry::{NodeDescriptor, NodeRegistry};
use tracing::{debug, info, info_span};

use crate::{BridgeConfig, BridgeObserver, BridgeResult, KinematicsStepper, SimInit};

/// A fixed tick grid and the channel queries to issue on every tick.
#[derive(Clone, Debug, PartialEq)]
pub struct RunPlan {
    /// First tick; defaults to zero.
    pub start: SimTime,
    /// Last tick, inclusive.
    pub end:   SimTime,
    /// Tick spacing, ns.  Must be non-zero.
    pub step:  u64,
    pub pairs: Vec<(NodeId, NodeId)>,
}

impl RunPlan {
    /// The tick times of the plan, in order.
    pub fn ticks(&self) -> impl Iterator<Item = SimTime> + '_ {
        let step = self.step.max(1);
        std::iter::successors(Some(self.start), move |t| {
            let next = t.offset(step);
            (next > *t).then_some(next)
        })
        .take_while(|t| *t <= self.end)
    }
}

/// Mobility state plus channel scheduler for one simulation instance.
pub struct Bridge<E: ChannelEvaluator> {
    config:    BridgeConfig,
    registry:  NodeRegistry,
    scheduler: ChannelScheduler<E>,
    now:       SimTime,
}

impl<E: ChannelEvaluator> Bridge<E> {
    /// Validate `config`, build every node from `nodes` and set up the
    /// scheduler.
    ///
    /// # Errors
    ///
    /// Duplicate ids, unknown mobility modes or distribution families,
    /// invalid parameters, and an out-of-range carrier frequency.  The
    /// error's `Display` names the offending node or field.
    pub fn init(config: BridgeConfig, nodes: &[NodeDescriptor], evaluator: Arc<E>) -> BridgeResult<Self> {
        let _span = info_span!("init", nodes = nodes.len(), seed = config.seed).entered();
        let scheduler_config = config.scheduler_config()?;
        let registry = NodeRegistry::build(nodes, config.seed, config.collect_history)?;
        let scheduler = ChannelScheduler::new(scheduler_config, evaluator)?;
        let mobile = registry.iter().filter(|(_, m)| m.is_mobile()).count();
        info!(
            nodes = registry.len(),
            mobile,
            mode = %config.mode,
            carrier_frequency_hz = config.carrier_frequency_hz,
            "bridge initialised"
        );
        Ok(Self { config, registry, scheduler, now: SimTime::ZERO })
    }

    pub fn from_init(init: &SimInit, evaluator: Arc<E>) -> BridgeResult<Self> {
        Self::init(init.config.clone(), &init.nodes, evaluator)
    }

    /// Step every random-walk node to `t` and apply its re-sample trigger
    /// with the distance travelled.  Returns how many nodes drew a new
    /// velocity.
    ///
    /// # Errors
    ///
    /// `StaleUpdate` if `t` is earlier than a node's last update.
    pub fn advance_all<S>(&mut self, t: SimTime, stepper: &mut S) -> BridgeResult<usize>
    where
        S: KinematicsStepper + ?Sized,
    {
        let mut resampled = 0;
        for (id, model) in self.registry.iter_mut().filter(|(_, m)| m.is_mobile()) {
            let current = *model.current();
            let out = stepper.step(id, &current, t);
            model.advance(t, out.position, out.velocity, out.hit_wall)?;
            // Path length, not displacement: a wall reflection folds the path.
            let distance = current.speed() * SimTime(t.since(current.time)).as_secs_f64();
            if model.check_and_resample(t, distance) {
                resampled += 1;
            }
        }
        self.now = self.now.max(t);
        debug!(time = %t, resampled, "advanced nodes");
        Ok(resampled)
    }

    pub fn query_channel(&mut self, tx: NodeId, rx: NodeId, t: SimTime) -> BridgeResult<ChannelReply<E::Description>> {
        Ok(self.scheduler.query(&self.registry, tx, rx, t)?)
    }

    /// Execute `plan`: on each tick advance every node, then issue each
    /// query.  The first error stops the run.
    pub fn run<S, O>(&mut self, plan: &RunPlan, stepper: &mut S, observer: &mut O) -> BridgeResult<QueryStats>
    where
        S: KinematicsStepper + ?Sized,
        O: BridgeObserver + ?Sized,
    {
        let _span = info_span!("run", start = %plan.start, end = %plan.end, pairs = plan.pairs.len()).entered();
        for t in plan.ticks() {
            let resampled = self.advance_all(t, stepper)?;
            observer.on_advance(t, &self.registry, resampled);
            for &(tx, rx) in &plan.pairs {
                let reply = self.query_channel(tx, rx, t)?;
                observer.on_query(PairKey::new(tx, rx), t, reply.window, reply.freshness);
            }
        }
        let stats = self.scheduler.stats();
        observer.on_run_end(&self.registry, &stats);
        Ok(stats)
    }

    pub fn position_history(&self, id: NodeId) -> BridgeResult<Vec<(SimTime, Vec3)>> {
        Ok(self.registry.position_history(id)?)
    }

    pub fn velocity_history(&self, id: NodeId) -> BridgeResult<Vec<(SimTime, Vec3)>> {
        Ok(self.registry.velocity_history(id)?)
    }

    pub fn registry(&self) -> &NodeRegistry {
        &self.registry
    }

    pub fn scheduler(&self) -> &ChannelScheduler<E> {
        &self.scheduler
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Latest time passed to [`Self::advance_all`].
    pub fn now(&self) -> SimTime {
        self.now
    }

    pub fn stats(&self) -> QueryStats {
        self.scheduler.stats()
    }

    /// Discard in-flight speculations and return the final counters.
    pub fn teardown(mut self) -> QueryStats {
        let dropped = self.scheduler.shutdown();
        let stats = self.scheduler.stats();
        info!(
            queries = stats.queries,
            hits = stats.hits,
            recomputations = stats.recomputations,
            evaluator_calls = stats.evaluator_calls,
            dropped_speculations = dropped,
            "bridge torn down"
        );
        stats
    }
}
