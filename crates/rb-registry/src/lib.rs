//! `rb-registry` — the set of simulated nodes, keyed by [`NodeId`].
//!
//! | Module         | Contents                                               |
//! |----------------|--------------------------------------------------------|
//! | [`descriptor`] | `NodeDescriptor`: one node as given at initialisation |
//! | [`registry`]   | `NodeRegistry`: `NodeId` → `MobilityModel`            |
//! | [`error`]      | `RegistryError`, `RegistryResult<T>`                   |
//!
//! The registry is built once from the descriptor list and then owned by the
//! simulation loop for the lifetime of the instance.  Iteration is always in
//! ascending id order.
//!
//! [`NodeId`]: rb_core::NodeId

pub mod descriptor;
pub mod error;
pub mod registry;

#[cfg(test)]
mod tests;

pub use descriptor::NodeDescriptor;
pub use error::{RegistryError, RegistryResult};
pub use registry::NodeRegistry;
