//! Unit tests for rb-registry.

use rb_core::{ErrorKind, NodeId, SimTime, Vec3};
use rb_mobility::DistributionSpec;

use crate::{NodeDescriptor, NodeRegistry, RegistryError};

fn fixed(id: u32, x: f64) -> NodeDescriptor {
    NodeDescriptor::Static { id: NodeId(id), position: Vec3::new(x, 0.0, 0.0) }
}

fn walker(id: u32, mode: &str, mode_value: f64) -> NodeDescriptor {
    NodeDescriptor::RandomWalk {
        id: NodeId(id),
        position: Vec3::new(1.0, 1.0, 1.0),
        mode: mode.into(),
        mode_value,
        speed: DistributionSpec::uniform(0.5, 2.0),
        direction: DistributionSpec::uniform(-3.0, 3.0),
    }
}

#[cfg(test)]
mod build {
    use super::*;

    #[test]
    fn iterates_in_id_order() {
        let reg = NodeRegistry::build(&[fixed(5, 0.0), walker(1, "wall", 0.0), fixed(3, 1.0)], 0, true)
            .unwrap();
        let ids: Vec<NodeId> = reg.ids().collect();
        assert_eq!(ids, vec![NodeId(1), NodeId(3), NodeId(5)]);
        assert_eq!(reg.len(), 3);
        assert!(reg.get(NodeId(1)).unwrap().is_mobile());
        assert!(!reg.get(NodeId(3)).unwrap().is_mobile());
    }

    #[test]
    fn empty_descriptor_list() {
        let reg = NodeRegistry::build(&[], 0, false).unwrap();
        assert!(reg.is_empty());
    }

    #[test]
    fn duplicate_id_rejected() {
        let err = NodeRegistry::build(&[fixed(2, 0.0), walker(2, "wall", 0.0)], 0, true).unwrap_err();
        assert_eq!(err, RegistryError::DuplicateNode(NodeId(2)));
        assert_eq!(err.kind(), ErrorKind::DuplicateNode);
    }

    #[test]
    fn model_failures_carry_the_node() {
        let err = NodeRegistry::build(&[fixed(0, 0.0), walker(4, "levy", 1.0)], 0, true).unwrap_err();
        assert!(matches!(err, RegistryError::Model { node: NodeId(4), .. }));
        assert_eq!(err.kind(), ErrorKind::UnknownFamily);
        assert!(err.to_string().starts_with("NodeId(4): "), "{err}");

        let err = NodeRegistry::build(&[walker(1, "time", -5.0)], 0, true).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParameter);
    }

    #[test]
    fn construction_is_order_independent() {
        let a = NodeRegistry::build(&[walker(1, "wall", 0.0), walker(2, "wall", 0.0)], 11, true).unwrap();
        let b = NodeRegistry::build(&[walker(2, "wall", 0.0), walker(1, "wall", 0.0)], 11, true).unwrap();
        for id in [NodeId(1), NodeId(2)] {
            assert_eq!(a.sample_at(id, SimTime::ZERO).unwrap(), b.sample_at(id, SimTime::ZERO).unwrap());
        }
    }
}

#[cfg(test)]
mod lookup {
    use super::*;

    #[test]
    fn unknown_node() {
        let mut reg = NodeRegistry::build(&[fixed(0, 0.0)], 0, true).unwrap();
        assert_eq!(reg.get(NodeId(9)).unwrap_err(), RegistryError::UnknownNode(NodeId(9)));
        assert_eq!(reg.get_mut(NodeId(9)).unwrap_err().kind(), ErrorKind::UnknownNode);
        assert_eq!(reg.sample_at(NodeId(9), SimTime::ZERO).unwrap_err().kind(), ErrorKind::UnknownNode);
        assert!(!reg.contains(NodeId(9)));
    }

    #[test]
    fn static_sample_at_any_time() {
        let reg = NodeRegistry::build(&[fixed(0, 4.0)], 0, true).unwrap();
        let s = reg.sample_at(NodeId(0), SimTime::from_secs_f64(12.5)).unwrap();
        assert_eq!(s.position, Vec3::new(4.0, 0.0, 0.0));
        assert_eq!(s.velocity, Vec3::zeros());
    }

    #[test]
    fn history_miss_surfaces_through_registry() {
        let reg = NodeRegistry::build(&[walker(1, "wall", 0.0)], 0, true).unwrap();
        let err = reg.sample_at(NodeId(1), SimTime(500)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::HistoryMiss);
    }

    #[test]
    fn iter_mut_advances_mobile_nodes() {
        let mut reg = NodeRegistry::build(&[fixed(0, 0.0), walker(1, "wall", 0.0)], 0, true).unwrap();
        for (_, model) in reg.iter_mut().filter(|(_, m)| m.is_mobile()) {
            model
                .advance(SimTime(10), Vec3::new(2.0, 1.0, 1.0), Vec3::new(1.0, 0.0, 0.0), false)
                .unwrap();
        }
        assert_eq!(reg.get(NodeId(1)).unwrap().last_update(), SimTime(10));
        assert_eq!(reg.iter().count(), 2);
    }
}

#[cfg(test)]
mod history {
    use super::*;

    #[test]
    fn random_walk_history_in_time_order() {
        let mut reg = NodeRegistry::build(&[walker(1, "wall", 0.0)], 0, true).unwrap();
        let m = reg.get_mut(NodeId(1)).unwrap();
        m.advance(SimTime(10), Vec3::new(2.0, 1.0, 1.0), Vec3::new(1.0, 0.0, 0.0), false).unwrap();
        m.advance(SimTime(20), Vec3::new(3.0, 1.0, 1.0), Vec3::new(1.0, 0.0, 0.0), false).unwrap();

        let pos = reg.position_history(NodeId(1)).unwrap();
        assert_eq!(pos.iter().map(|(t, _)| *t).collect::<Vec<_>>(), vec![SimTime::ZERO, SimTime(10), SimTime(20)]);
        assert_eq!(pos[0].1, Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(pos[2].1, Vec3::new(3.0, 1.0, 1.0));

        let vel = reg.velocity_history(NodeId(1)).unwrap();
        assert_eq!(vel[1].1, Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn static_history_is_single_sample() {
        let reg = NodeRegistry::build(&[fixed(0, 2.0)], 0, true).unwrap();
        assert_eq!(reg.position_history(NodeId(0)).unwrap(), vec![(SimTime::ZERO, Vec3::new(2.0, 0.0, 0.0))]);
        assert_eq!(reg.velocity_history(NodeId(0)).unwrap(), vec![(SimTime::ZERO, Vec3::zeros())]);
    }

    #[test]
    fn disabled_history_reports_current_only() {
        let mut reg = NodeRegistry::build(&[walker(1, "wall", 0.0)], 0, false).unwrap();
        let m = reg.get_mut(NodeId(1)).unwrap();
        m.advance(SimTime(10), Vec3::new(2.0, 1.0, 1.0), Vec3::new(1.0, 0.0, 0.0), false).unwrap();
        assert_eq!(reg.position_history(NodeId(1)).unwrap(), vec![(SimTime(10), Vec3::new(2.0, 1.0, 1.0))]);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_descriptor {
    use super::*;

    #[test]
    fn parses_tagged_descriptors() {
        let json = r#"[
            { "model": "static", "id": 0, "position": [3.0, 2.0, 2.0] },
            { "model": "random_walk", "id": 1, "position": [1.0, 1.0, 1.5],
              "mode": "distance", "mode_value": 2.0,
              "speed": { "family": "constant", "params": [1.0] },
              "direction": { "family": "uniform", "params": [-3.14, 3.14] } }
        ]"#;
        let nodes: Vec<NodeDescriptor> = serde_json::from_str(json).unwrap();
        assert_eq!(nodes[0], fixed_at(0, Vec3::new(3.0, 2.0, 2.0)));
        assert!(matches!(&nodes[1], NodeDescriptor::RandomWalk { id: NodeId(1), mode, .. } if mode == "distance"));
        assert_eq!(nodes[1].position(), Vec3::new(1.0, 1.0, 1.5));
    }

    #[test]
    fn mode_value_defaults_for_wall() {
        let json = r#"{ "model": "random_walk", "id": 7, "position": [0, 0, 0], "mode": "wall",
                        "speed": { "family": "constant", "params": [1.0] },
                        "direction": { "family": "constant", "params": [0.0] } }"#;
        let node: NodeDescriptor = serde_json::from_str(json).unwrap();
        assert!(matches!(node, NodeDescriptor::RandomWalk { mode_value, .. } if mode_value == 0.0));
    }

    fn fixed_at(id: u32, position: Vec3) -> NodeDescriptor {
        NodeDescriptor::Static { id: NodeId(id), position }
    }
}
