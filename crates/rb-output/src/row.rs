//! Plain data row types written by output backends.

use rb_channel::{CoherenceWindow, Freshness, PairKey};
use rb_core::{KinematicSample, NodeId, SimTime};
use rb_registry::NodeRegistry;

/// One recorded kinematic sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleRow {
    pub node_id: u32,
    pub time_ns: u64,
    pub position: [f64; 3],
    pub velocity: [f64; 3],
}

impl SampleRow {
    pub fn new(node: NodeId, s: &KinematicSample) -> Self {
        Self {
            node_id:  node.0,
            time_ns:  s.time.0,
            position: s.position.into(),
            velocity: s.velocity.into(),
        }
    }
}

/// One channel query and the window that answered it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowRow {
    pub tx:        u32,
    pub rx:        u32,
    pub query_ns:  u64,
    pub start_ns:  u64,
    pub end_ns:    u64,
    pub freshness: Freshness,
}

impl WindowRow {
    pub fn new(pair: PairKey, time: SimTime, window: CoherenceWindow, freshness: Freshness) -> Self {
        Self {
            tx: pair.tx.0,
            rx: pair.rx.0,
            query_ns: time.0,
            start_ns: window.start.0,
            end_ns: window.end.0,
            freshness,
        }
    }
}

/// Every node's recorded samples, in ascending node then time order.
///
/// Static nodes contribute their single fixed sample.
pub fn history_rows(registry: &NodeRegistry) -> Vec<SampleRow> {
    let mut rows = Vec::new();
    for (id, model) in registry.iter() {
        match model.history() {
            Some(h) => rows.extend(h.samples().iter().map(|s| SampleRow::new(id, s))),
            None => rows.push(SampleRow::new(id, model.current())),
        }
    }
    rows
}
