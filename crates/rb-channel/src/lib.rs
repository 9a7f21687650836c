//! `rb-channel` — cached channel descriptions and when to refresh them.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                     |
//! |-----------------|--------------------------------------------------------------|
//! | [`window`]      | `CoherenceWindow` (half-open), `Freshness`                   |
//! | [`cache`]       | `PairKey`, `ChannelCache`, one entry per directed pair       |
//! | [`evaluator`]   | `ChannelEvaluator` trait, `ChannelRequest`, `Evaluation`     |
//! | [`scheduler`]   | `ChannelScheduler`, `SchedulerMode`, `QueryStats`            |
//! | [`speculative`] | look-ahead dispatch on the rayon pool                        |
//! | [`error`]       | `ChannelError`, `ChannelResult<T>`                           |
//!
//! # Freshness
//!
//! Each directed pair `(tx, rx)` is `Uncached`, `Valid` or `Stale` relative
//! to a query time `t`.  A cached window `[start, end)` is valid for
//! `start <= t < end`; `t == end` is stale.  Recomputation anchors the new
//! window at the query time that triggered it.
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                    |
//! |-----------|-----------------------------------------------------------|
//! | `fx-hash` | Use `FxHashMap` for the pair cache.                       |
//! | `serde`   | Serde derives on `SchedulerMode`, `CoherenceWindow`, ...  |

pub mod cache;
pub mod error;
pub mod evaluator;
pub mod scheduler;
pub mod speculative;
pub mod window;


pub use cache::{CachedChannel, ChannelCache, PairKey};
pub use error::{ChannelError, ChannelResult};
pub use evaluator::{ChannelEvaluator, ChannelRequest, Evaluation, EvaluatorError};
pub use scheduler::{ChannelReply, ChannelScheduler, QueryStats, SchedulerConfig, SchedulerMode};
pub use window::{CoherenceWindow, Freshness};
