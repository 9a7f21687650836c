use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use rb_core::{KinematicSample, NodeId, SimTime, Vec3};
use rb_mobility::MobilityModel;
use tracing::debug;

use crate::{NodeDescriptor, RegistryError, RegistryResult};

/// Mapping from [`NodeId`] to the node's mobility model.
///
/// A `BTreeMap` keeps iteration (and so stepping and output) in ascending id
/// order regardless of descriptor order.
#[derive(Debug, Default)]
pub struct NodeRegistry {
    nodes: BTreeMap<NodeId, MobilityModel>,
}

impl NodeRegistry {
    /// Build every node from `descriptors`.
    ///
    /// Each random-walk node gets its own RNG derived from `global_seed` and
    /// its id, so the result does not depend on descriptor order.
    ///
    /// # Errors
    ///
    /// [`RegistryError::DuplicateNode`] on a repeated id, or
    /// [`RegistryError::Model`] for the first descriptor that fails to build.
    pub fn build(
        descriptors:     &[NodeDescriptor],
        global_seed:     u64,
        collect_history: bool,
    ) -> RegistryResult<Self> {
        let mut nodes = BTreeMap::new();
        for desc in descriptors {
            let id = desc.id();
            let Entry::Vacant(slot) = nodes.entry(id) else {
                return Err(RegistryError::DuplicateNode(id));
            };
            let model = desc
                .build(global_seed, collect_history)
                .map_err(|source| RegistryError::Model { node: id, source })?;
            debug!(node = %id, mobile = model.is_mobile(), "registered node");
            slot.insert(model);
        }
        Ok(Self { nodes })
    }

    pub fn get(&self, id: NodeId) -> RegistryResult<&MobilityModel> {
        self.nodes.get(&id).ok_or(RegistryError::UnknownNode(id))
    }

    pub fn get_mut(&mut self, id: NodeId) -> RegistryResult<&mut MobilityModel> {
        self.nodes.get_mut(&id).ok_or(RegistryError::UnknownNode(id))
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Position and velocity of `id` at `time`.
    pub fn sample_at(&self, id: NodeId, time: SimTime) -> RegistryResult<KinematicSample> {
        Ok(self.get(id)?.sample_at(time)?)
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &MobilityModel)> {
        self.nodes.iter().map(|(id, m)| (*id, m))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (NodeId, &mut MobilityModel)> {
        self.nodes.iter_mut().map(|(id, m)| (*id, m))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Recorded `(time, position)` pairs for `id`.
    ///
    /// Static nodes report their single fixed sample; random-walk nodes
    /// without history report only their current sample.
    pub fn position_history(&self, id: NodeId) -> RegistryResult<Vec<(SimTime, Vec3)>> {
        Ok(self.samples(id)?.into_iter().map(|s| (s.time, s.position)).collect())
    }

    /// Recorded `(time, velocity)` pairs for `id`.  See [`Self::position_history`].
    pub fn velocity_history(&self, id: NodeId) -> RegistryResult<Vec<(SimTime, Vec3)>> {
        Ok(self.samples(id)?.into_iter().map(|s| (s.time, s.velocity)).collect())
    }

    /// Every recorded sample for `id`, in time order.
    pub fn samples(&self, id: NodeId) -> RegistryResult<Vec<KinematicSample>> {
        let model = self.get(id)?;
        Ok(match model.history() {
            Some(h) => h.samples().to_vec(),
            None => vec![*model.current()],
        })
    }
}
