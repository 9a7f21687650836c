//! Initialisation-time node descriptions.

use rb_core::{NodeId, NodeRng, Vec3};
use rb_mobility::{
    DistributionSpec, MobilityModel, MobilityResult, RandomWalkMobility, RandomWalkParams,
    ResamplePolicy, Sampler, StaticMobility,
};

/// One node as supplied by the network simulator at init.
///
/// With the `serde` feature the JSON form is internally tagged by `model`:
///
/// ```json
/// { "model": "random_walk", "id": 1, "position": [0, 0, 1.5],
///   "mode": "distance", "mode_value": 2.0,
///   "speed": { "family": "constant", "params": [1.0] },
///   "direction": { "family": "uniform", "params": [-3.14, 3.14] } }
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "model", rename_all = "snake_case"))]
pub enum NodeDescriptor {
    Static {
        id:       NodeId,
        position: Vec3,
    },
    RandomWalk {
        id:         NodeId,
        position:   Vec3,
        /// `wall`, `time` or `distance`.
        mode:       String,
        /// Nanoseconds for `time`, metres for `distance`; ignored for `wall`.
        #[cfg_attr(feature = "serde", serde(default))]
        mode_value: f64,
        speed:      DistributionSpec,
        direction:  DistributionSpec,
    },
}

impl NodeDescriptor {
    pub fn id(&self) -> NodeId {
        match self {
            NodeDescriptor::Static { id, .. } | NodeDescriptor::RandomWalk { id, .. } => *id,
        }
    }

    pub fn position(&self) -> Vec3 {
        match self {
            NodeDescriptor::Static { position, .. }
            | NodeDescriptor::RandomWalk { position, .. } => *position,
        }
    }

    /// Validate the descriptor and construct its mobility model.
    pub(crate) fn build(&self, global_seed: u64, collect_history: bool) -> MobilityResult<MobilityModel> {
        match self {
            NodeDescriptor::Static { id, position } => {
                Ok(MobilityModel::Static(StaticMobility::new(*id, *position)))
            }
            NodeDescriptor::RandomWalk { id, position, mode, mode_value, speed, direction } => {
                let params = RandomWalkParams {
                    policy:    ResamplePolicy::resolve(mode, *mode_value)?,
                    speed:     Sampler::resolve("speed", speed)?,
                    direction: Sampler::resolve("direction", direction)?,
                };
                Ok(MobilityModel::RandomWalk(RandomWalkMobility::new(
                    *id,
                    *position,
                    params,
                    NodeRng::new(global_seed, *id),
                    collect_history,
                )))
            }
        }
    }
}
