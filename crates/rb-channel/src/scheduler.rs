//! The channel-freshness scheduler.
//!
//! One [`ChannelScheduler`] serves every channel query of a simulation
//! instance.  It owns the pair cache and, in look-ahead mode, the set of
//! in-flight speculations; node state is read from the [`NodeRegistry`]
//! passed to each query.

use std::fmt;
use std::sync::Arc;

use rb_coherence::{CoherenceError, MIN_CARRIER_FREQUENCY, PathGeometry, coherence_from_relative_motion};
use rb_core::{KinematicSample, NodeId, SimTime};
use rb_registry::NodeRegistry;
use tracing::{debug, info, trace, warn};

use crate::cache::PairMap;
use crate::speculative::Speculation;
use crate::{
    CachedChannel, ChannelCache, ChannelError, ChannelEvaluator, ChannelRequest, ChannelResult,
    CoherenceWindow, Evaluation, EvaluatorError, Freshness, PairKey,
};

// ── Configuration ─────────────────────────────────────────────────────────────

/// How many pairs a recomputation refreshes.  Fixed per instance.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SchedulerMode {
    /// Only the queried pair.
    #[default]
    PointToPoint,
    /// The queried transmitter against every other registered node, in one
    /// batch evaluation.
    PointToMultipoint,
    /// Point-to-point, plus a speculative evaluation of the next window
    /// after each recomputation.
    LookAhead,
}

impl SchedulerMode {
    /// Map the numeric mode codes used by simulator init messages
    /// (`1` = P2P, `2` = P2MP, `3` = look-ahead).
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(SchedulerMode::PointToPoint),
            2 => Some(SchedulerMode::PointToMultipoint),
            3 => Some(SchedulerMode::LookAhead),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SchedulerMode::PointToPoint      => "point_to_point",
            SchedulerMode::PointToMultipoint => "point_to_multipoint",
            SchedulerMode::LookAhead         => "look_ahead",
        }
    }
}

impl fmt::Display for SchedulerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SchedulerConfig {
    pub mode:                 SchedulerMode,
    pub carrier_frequency_hz: f64,
    /// Lower bound on every estimated window, ns.
    pub min_coherence_time:   Option<u64>,
}

impl SchedulerConfig {
    pub fn new(mode: SchedulerMode, carrier_frequency_hz: f64) -> Self {
        Self { mode, carrier_frequency_hz, min_coherence_time: None }
    }

    pub fn with_min_coherence_time(mut self, ns: u64) -> Self {
        self.min_coherence_time = Some(ns);
        self
    }
}

/// Running counters over the lifetime of a scheduler.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueryStats {
    pub queries:              u64,
    /// Queries answered from a valid cache entry.
    pub hits:                 u64,
    /// Queries that found the pair uncached or stale.
    pub recomputations:       u64,
    /// Evaluator invocations, counting a batch and a speculation as one each.
    pub evaluator_calls:      u64,
    pub speculative_hits:     u64,
    pub speculative_discards: u64,
}

impl QueryStats {
    pub fn hit_rate(&self) -> f64 {
        if self.queries == 0 { 0.0 } else { self.hits as f64 / self.queries as f64 }
    }
}

/// Answer to one channel query.
#[derive(Clone, Debug, PartialEq)]
pub struct ChannelReply<D> {
    pub description: D,
    pub window:      CoherenceWindow,
    /// State of the pair when the query arrived.
    pub freshness:   Freshness,
}

// ── ChannelScheduler ──────────────────────────────────────────────────────────

pub struct ChannelScheduler<E: ChannelEvaluator> {
    config:    SchedulerConfig,
    evaluator: Arc<E>,
    cache:     ChannelCache<E::Description>,
    pending:   PairMap<Speculation<E::Description>>,
    stats:     QueryStats,
}

impl<E: ChannelEvaluator> ChannelScheduler<E> {
    /// # Errors
    ///
    /// [`ChannelError::Coherence`] if the carrier frequency is below 1 MHz or
    /// not finite.
    pub fn new(config: SchedulerConfig, evaluator: Arc<E>) -> ChannelResult<Self> {
        let fc = config.carrier_frequency_hz;
        if !(fc.is_finite() && fc >= MIN_CARRIER_FREQUENCY) {
            return Err(CoherenceError::OutOfRange {
                what:  "carrier frequency",
                value: fc,
                range: ">= 1 MHz",
            }
            .into());
        }
        info!(mode = %config.mode, carrier_frequency_hz = fc, "channel scheduler ready");
        Ok(Self {
            config,
            evaluator,
            cache: ChannelCache::new(),
            pending: PairMap::default(),
            stats: QueryStats::default(),
        })
    }

    /// The channel from `tx` to `rx` at time `t`, from cache when the cached
    /// window contains `t`, recomputed otherwise.
    ///
    /// # Errors
    ///
    /// - [`ChannelError::Registry`] with `UnknownNode` if either id is not
    ///   registered, or `HistoryMiss` if a node was never advanced to `t`.
    /// - [`ChannelError::Evaluator`] if the evaluator fails for this pair.
    /// - [`ChannelError::Speculative`] if a consumed look-ahead failed.
    pub fn query(
        &mut self,
        registry: &NodeRegistry,
        tx:       NodeId,
        rx:       NodeId,
        t:        SimTime,
    ) -> ChannelResult<ChannelReply<E::Description>> {
        self.stats.queries += 1;
        registry.get(tx)?;
        registry.get(rx)?;
        let key = PairKey::new(tx, rx);

        let freshness = self.cache.freshness(key, t);
        if let Some(hit) = self.cache.get_valid(key, t) {
            self.stats.hits += 1;
            trace!(pair = %key, time = %t, window = %hit.window, "channel cache hit");
            return Ok(ChannelReply { description: hit.description.clone(), window: hit.window, freshness });
        }
        self.stats.recomputations += 1;

        if let Some(reply) = self.consume_speculation(registry, key, t, freshness)? {
            return Ok(reply);
        }

        let tx_state = registry.sample_at(tx, t)?;
        let rx_state = registry.sample_at(rx, t)?;
        let request = self.request(key, tx_state, rx_state, t, false)?;
        let entry = match self.config.mode {
            SchedulerMode::PointToMultipoint => self.refresh_transmitter(registry, request, t)?,
            SchedulerMode::PointToPoint | SchedulerMode::LookAhead => self.evaluate_one(request)?,
        };
        debug!(pair = %key, time = %t, %freshness, window = %entry.window, "recomputed channel");

        if self.config.mode == SchedulerMode::LookAhead {
            self.speculate(key, tx_state, rx_state, entry.window);
        }
        Ok(self.install(key, entry, freshness))
    }

    /// Coherence estimate for a pair in the given states, ns.
    ///
    /// Uses the line-of-sight direction, or the worst-case direction when the
    /// two positions coincide, and applies the configured floor.
    pub fn estimate(&self, tx: &KinematicSample, rx: &KinematicSample) -> ChannelResult<u64> {
        let geometry = if tx.position == rx.position {
            PathGeometry::Unknown
        } else {
            PathGeometry::LineOfSight { tx: tx.position, rx: rx.position }
        };
        let tc = coherence_from_relative_motion(
            tx.velocity,
            rx.velocity,
            self.config.carrier_frequency_hz,
            geometry,
            None,
        )?;
        Ok(tc.max(self.config.min_coherence_time.unwrap_or(0)))
    }

    /// Discard every in-flight speculation without waiting for it.  Returns
    /// how many were dropped.
    pub fn shutdown(&mut self) -> usize {
        let dropped = self.pending.len();
        self.pending.clear();
        if dropped > 0 {
            info!(dropped, "discarded in-flight speculations");
        }
        dropped
    }

    pub fn stats(&self) -> QueryStats {
        self.stats
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    pub fn mode(&self) -> SchedulerMode {
        self.config.mode
    }

    pub fn cache(&self) -> &ChannelCache<E::Description> {
        &self.cache
    }

    pub fn cached(&self, tx: NodeId, rx: NodeId) -> Option<&CachedChannel<E::Description>> {
        self.cache.get(PairKey::new(tx, rx))
    }

    pub fn pending_speculations(&self) -> usize {
        self.pending.len()
    }

    // ── Internals ─────────────────────────────────────────────────────────────

    fn request(
        &self,
        key:         PairKey,
        tx_state:    KinematicSample,
        rx_state:    KinematicSample,
        start:       SimTime,
        speculative: bool,
    ) -> ChannelResult<ChannelRequest> {
        Ok(ChannelRequest {
            tx: key.tx,
            rx: key.rx,
            tx_state,
            rx_state,
            window_start: start,
            coherence_hint: self.estimate(&tx_state, &rx_state)?,
            speculative,
        })
    }

    fn install(
        &mut self,
        key:       PairKey,
        entry:     CachedChannel<E::Description>,
        freshness: Freshness,
    ) -> ChannelReply<E::Description> {
        let reply = ChannelReply { description: entry.description.clone(), window: entry.window, freshness };
        self.cache.insert(key, entry);
        reply
    }

    fn evaluate_one(&mut self, request: ChannelRequest) -> ChannelResult<CachedChannel<E::Description>> {
        self.stats.evaluator_calls += 1;
        let eval = self.evaluator.evaluate(&request).map_err(|source| ChannelError::Evaluator {
            pair: PairKey::new(request.tx, request.rx),
            source,
        })?;
        Ok(settle(&request, eval))
    }

    /// Point-to-multipoint refresh: the queried pair plus every other pair
    /// from the same transmitter that is not valid at `t`, in one batch.
    ///
    /// Piggybacked pairs that cannot be sampled or fail to evaluate are
    /// skipped and left as they were; only the queried pair's failure is
    /// returned.
    fn refresh_transmitter(
        &mut self,
        registry: &NodeRegistry,
        request:  ChannelRequest,
        t:        SimTime,
    ) -> ChannelResult<CachedChannel<E::Description>> {
        let mut batch = vec![request];
        for r in registry.ids() {
            if r == request.tx || r == request.rx {
                continue;
            }
            let key = PairKey::new(request.tx, r);
            if self.cache.get_valid(key, t).is_some() {
                continue;
            }
            let piggyback = registry
                .sample_at(r, t)
                .map_err(ChannelError::from)
                .and_then(|rx_state| self.request(key, request.tx_state, rx_state, t, false));
            match piggyback {
                Ok(req) => batch.push(req),
                Err(e) => debug!(pair = %key, error = %e, "skipping piggybacked pair"),
            }
        }

        self.stats.evaluator_calls += 1;
        let mut results = self.evaluator.evaluate_batch(&batch).into_iter();
        let primary = results
            .next()
            .unwrap_or_else(|| Err(EvaluatorError::new("batch evaluation returned no results")));

        let mut piggybacked = 0usize;
        for (req, outcome) in batch[1..].iter().zip(results) {
            let pair = PairKey::new(req.tx, req.rx);
            match outcome {
                Ok(eval) => {
                    self.cache.insert(pair, settle(req, eval));
                    piggybacked += 1;
                }
                Err(e) => warn!(pair = %pair, error = %e, "piggybacked evaluation failed"),
            }
        }
        trace!(tx = %request.tx, batch = batch.len(), piggybacked, "point-to-multipoint refresh");

        let eval = primary.map_err(|source| ChannelError::Evaluator {
            pair: PairKey::new(request.tx, request.rx),
            source,
        })?;
        Ok(settle(&batch[0], eval))
    }

    /// Dispatch a look-ahead request for the window following `window`,
    /// using straight-line predictions of both nodes at `window.end`.
    fn speculate(&mut self, key: PairKey, tx_state: KinematicSample, rx_state: KinematicSample, window: CoherenceWindow) {
        let start = window.end;
        let request = match self.request(key, tx_state.extrapolate(start), rx_state.extrapolate(start), start, true) {
            Ok(r) => r,
            Err(e) => {
                debug!(pair = %key, error = %e, "no speculation for pair");
                return;
            }
        };
        self.stats.evaluator_calls += 1;
        let spec = Speculation::dispatch(Arc::clone(&self.evaluator), request);
        trace!(pair = %key, window = %spec.window, "dispatched speculation");
        self.pending.insert(key, spec);
    }

    /// Serve a recomputation from a pending speculation if its window covers
    /// `t`.  Blocks until the speculation completes.
    fn consume_speculation(
        &mut self,
        registry:  &NodeRegistry,
        key:       PairKey,
        t:         SimTime,
        freshness: Freshness,
    ) -> ChannelResult<Option<ChannelReply<E::Description>>> {
        let Some(spec) = self.pending.remove(&key) else {
            return Ok(None);
        };
        if !spec.window.contains(t) {
            self.stats.speculative_discards += 1;
            debug!(pair = %key, time = %t, window = %spec.window, "speculation does not cover query");
            return Ok(None);
        }
        if !spec.is_ready() {
            debug!(pair = %key, time = %t, "waiting on speculative evaluation");
        }

        let request = spec.request;
        let eval = spec.wait().map_err(|source| ChannelError::Speculative { pair: key, source })?;
        let entry = settle(&request, eval);
        if !entry.window.contains(t) {
            self.stats.speculative_discards += 1;
            debug!(pair = %key, time = %t, window = %entry.window, "refined speculative window excludes query");
            return Ok(None);
        }
        self.stats.speculative_hits += 1;
        debug!(pair = %key, time = %t, window = %entry.window, "served from speculation");

        // Chain from observed state where the registry has it.
        let (tx_state, rx_state) = match (registry.sample_at(key.tx, t), registry.sample_at(key.rx, t)) {
            (Ok(a), Ok(b)) => (a, b),
            _ => (request.tx_state, request.rx_state),
        };
        self.speculate(key, tx_state, rx_state, entry.window);
        Ok(Some(self.install(key, entry, freshness)))
    }
}

/// Pick the window for a completed evaluation.
///
/// An evaluator-returned window is authoritative when it covers the
/// request's window start; otherwise the scheduler's estimate is used.
fn settle<D>(request: &ChannelRequest, eval: Evaluation<D>) -> CachedChannel<D> {
    let estimate = CoherenceWindow::anchored(request.window_start, request.coherence_hint);
    let window = match eval.window {
        Some(w) if w.contains(request.window_start) => w,
        Some(w) => {
            warn!(
                tx = %request.tx,
                rx = %request.rx,
                returned = %w,
                estimate = %estimate,
                "evaluator window does not cover the request; using the estimate"
            );
            estimate
        }
        None => estimate,
    };
    CachedChannel { description: eval.description, window }
}
