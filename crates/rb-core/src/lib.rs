//! `rb-core` — foundational types for the `raybridge` workspace.
//!
//! This crate is a dependency of every other `rb-*` crate.  It has no `rb-*`
//! dependencies and few external ones (`rand`, `nalgebra`, `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `NodeId`                                              |
//! | [`time`]        | `SimTime` (integer nanoseconds), unit constants       |
//! | [`kinematics`]  | `Vec3`, `KinematicSample`                             |
//! | [`rng`]         | `NodeRng` (per-node, seeded once at init)             |
//! | [`error`]       | `ErrorKind` taxonomy shared by all crate errors       |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod ids;
pub mod kinematics;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::ErrorKind;
pub use ids::NodeId;
pub use kinematics::{KinematicSample, Vec3};
pub use rng::NodeRng;
pub use time::{MICROSECOND, MILLISECOND, SECOND, SimTime};
