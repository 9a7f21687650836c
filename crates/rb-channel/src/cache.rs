//! Directed-pair channel cache.

use std::fmt;

use rb_core::{NodeId, SimTime};

use crate::{CoherenceWindow, Freshness};

#[cfg(feature = "fx-hash")]
pub(crate) type PairMap<V> = rustc_hash::FxHashMap<PairKey, V>;
#[cfg(not(feature = "fx-hash"))]
pub(crate) type PairMap<V> = std::collections::HashMap<PairKey, V>;

/// Cache key for a directed node pair.  `(a, b)` and `(b, a)` are distinct.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PairKey {
    pub tx: NodeId,
    pub rx: NodeId,
}

impl PairKey {
    #[inline]
    pub fn new(tx: NodeId, rx: NodeId) -> Self {
        Self { tx, rx }
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.tx, self.rx)
    }
}

/// A channel description together with the window it is valid for.
#[derive(Clone, Debug, PartialEq)]
pub struct CachedChannel<D> {
    pub description: D,
    pub window:      CoherenceWindow,
}

/// At most one entry per directed pair; a refresh replaces the entry
/// outright.
#[derive(Debug)]
pub struct ChannelCache<D> {
    entries: PairMap<CachedChannel<D>>,
}

impl<D> Default for ChannelCache<D> {
    fn default() -> Self {
        Self { entries: PairMap::default() }
    }
}

impl<D> ChannelCache<D> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn freshness(&self, key: PairKey, t: SimTime) -> Freshness {
        self.entries
            .get(&key)
            .map_or(Freshness::Uncached, |e| e.window.freshness(t))
    }

    pub fn get(&self, key: PairKey) -> Option<&CachedChannel<D>> {
        self.entries.get(&key)
    }

    /// The entry for `key` only if its window contains `t`.
    pub fn get_valid(&self, key: PairKey, t: SimTime) -> Option<&CachedChannel<D>> {
        self.entries.get(&key).filter(|e| e.window.contains(t))
    }

    /// Install `entry`, returning the entry it replaced.
    pub fn insert(&mut self, key: PairKey, entry: CachedChannel<D>) -> Option<CachedChannel<D>> {
        self.entries.insert(key, entry)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
