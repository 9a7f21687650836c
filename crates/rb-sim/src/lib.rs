//! `rb-sim` — the facade the network simulator talks to.
//!
//! # Lifecycle
//!
//! ```text
//! Bridge::init(config, nodes, evaluator)    build registry + scheduler
//! loop over simulator events:
//!   advance_all(t, stepper)                 step every random-walk node to t,
//!                                           record it, apply re-sample triggers
//!   query_channel(tx, rx, t)                cached or recomputed channel
//! teardown()                                drop speculations, final stats
//! ```
//!
//! [`Bridge::run`] drives the same loop on a fixed tick grid and reports to a
//! [`BridgeObserver`].
//!
//! # Cargo features
//!
//! | Feature   | Effect                                          |
//! |-----------|-------------------------------------------------|
//! | `fx-hash` | FxHash for the scheduler's pair cache.          |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! let init = SimInit::from_path("scenario.json")?;
//! let mut bridge = Bridge::from_init(&init, Arc::new(MyEvaluator::new()))?;
//! let mut stepper = BoxStepper::room(6.0, 4.0, 3.0);
//! bridge.advance_all(SimTime::from_millis(50), &mut stepper)?;
//! let reply = bridge.query_channel(NodeId(0), NodeId(1), SimTime::from_millis(50))?;
//! let stats = bridge.teardown();
//! ```

pub mod bridge;
pub mod config;
pub mod error;
pub mod observer;
pub mod stepper;


pub use bridge::{Bridge, RunPlan};
pub use config::{BridgeConfig, SimInit};
pub use error::{BridgeError, BridgeResult};
pub use observer::{BridgeObserver, NoopObserver};
pub use stepper::{BoxStepper, KinematicsStepper, StepOutcome};
