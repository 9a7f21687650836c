//! `rb-mobility` — per-node kinematic state machines.
//!
//! # Crate layout
//!
//! | Module           | Contents                                                      |
//! |------------------|---------------------------------------------------------------|
//! | [`distribution`] | `DistributionSpec` → `Sampler` (uniform / constant / normal)  |
//! | [`trigger`]      | `ResamplePolicy`: wall, time-interval, distance-interval     |
//! | [`history`]      | `History`: append-only log of `KinematicSample`s             |
//! | [`model`]        | `MobilityModel` = `Static` \| `RandomWalk`                     |
//! | [`error`]        | `MobilityError`, `MobilityResult<T>`                          |
//!
//! # Movement model
//!
//! Models do not integrate motion themselves.  An external kinematics stepper
//! computes each new position/velocity and hands it to
//! [`MobilityModel::advance`]; the model records it and, through
//! [`MobilityModel::check_and_resample`], decides when to draw a fresh speed
//! and heading.  Queries are exact lookups: a random-walk node only answers
//! for timestamps it was advanced to.

pub mod distribution;
pub mod error;
pub mod history;
pub mod model;
pub mod trigger;


pub use distribution::{DistributionSpec, Sampler};
pub use error::{MobilityError, MobilityResult};
pub use history::History;
pub use model::{MobilityModel, RandomWalkMobility, RandomWalkParams, StaticMobility};
pub use trigger::ResamplePolicy;
