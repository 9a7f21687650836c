//! Validity windows.

use std::fmt;

use rb_core::SimTime;

/// The half-open interval `[start, end)` during which a cached channel
/// description is considered valid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoherenceWindow {
    pub start: SimTime,
    pub end:   SimTime,
}

impl CoherenceWindow {
    /// `[start, start + duration_ns)`.  Durations are at least one
    /// nanosecond so a fresh window always contains its own start.
    pub fn anchored(start: SimTime, duration_ns: u64) -> Self {
        Self { start, end: start.offset(duration_ns.max(1)) }
    }

    #[inline]
    pub fn contains(&self, t: SimTime) -> bool {
        self.start <= t && t < self.end
    }

    pub fn duration(&self) -> u64 {
        self.end.since(self.start)
    }

    /// `Valid` inside the window, `Stale` otherwise (including before it).
    pub fn freshness(&self, t: SimTime) -> Freshness {
        if self.contains(t) { Freshness::Valid } else { Freshness::Stale }
    }
}

impl fmt::Display for CoherenceWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// State of one directed pair relative to a query time.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Freshness {
    Uncached,
    Valid,
    Stale,
}

impl Freshness {
    pub fn as_str(self) -> &'static str {
        match self {
            Freshness::Uncached => "uncached",
            Freshness::Valid    => "valid",
            Freshness::Stale    => "stale",
        }
    }
}

impl fmt::Display for Freshness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
