//! Unit tests for rb-core primitives.

#[cfg(test)]
mod ids {
    use crate::NodeId;

    #[test]
    fn index_and_ordering() {
        assert_eq!(NodeId(42).index(), 42);
        assert_eq!(NodeId::try_from(42usize).unwrap(), NodeId(42));
        assert!(NodeId(0) < NodeId(1));
    }

    #[test]
    fn display() {
        assert_eq!(NodeId(7).to_string(), "NodeId(7)");
    }
}

#[cfg(test)]
mod time {
    use crate::{MILLISECOND, SECOND, SimTime};

    #[test]
    fn arithmetic() {
        let t = SimTime(10);
        assert_eq!(t + 5, SimTime(15));
        assert_eq!(t.offset(3), SimTime(13));
        assert_eq!(SimTime(15) - SimTime(10), 5);
        assert_eq!(SimTime(10) - SimTime(15), 0, "since saturates");
    }

    #[test]
    fn offset_saturates() {
        assert_eq!(SimTime(5).offset(u64::MAX), SimTime(u64::MAX));
    }

    #[test]
    fn conversions() {
        assert_eq!(SimTime::from_millis(50), SimTime(50 * MILLISECOND));
        assert_eq!(SimTime::from_secs_f64(1.5), SimTime(SECOND + 500 * MILLISECOND));
        assert_eq!(SimTime::from_secs_f64(-2.0), SimTime::ZERO);
        assert!((SimTime(2 * SECOND).as_secs_f64() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn display_has_nanosecond_precision() {
        assert_eq!(SimTime(1_250_000_000).to_string(), "1.250000000s");
        assert_eq!(SimTime(7).to_string(), "0.000000007s");
    }
}

#[cfg(test)]
mod kinematics {
    use crate::{KinematicSample, SECOND, SimTime, Vec3};

    #[test]
    fn at_rest_has_zero_speed_and_heading() {
        let s = KinematicSample::at_rest(Vec3::new(1.0, 2.0, 3.0), SimTime::ZERO);
        assert_eq!(s.speed(), 0.0);
        assert_eq!(s.heading(), 0.0);
    }

    #[test]
    fn heading_follows_velocity() {
        let s = KinematicSample::new(Vec3::zeros(), Vec3::new(0.0, 2.0, 0.0), SimTime::ZERO);
        assert!((s.heading() - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn extrapolate_moves_along_velocity() {
        let s = KinematicSample::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(2.0, -1.0, 0.0), SimTime(SECOND));
        let p = s.extrapolate(SimTime(3 * SECOND));
        assert_eq!(p.time, SimTime(3 * SECOND));
        assert!((p.position - Vec3::new(5.0, -2.0, 0.0)).norm() < 1e-12);
        assert_eq!(p.velocity, s.velocity);
    }

    #[test]
    fn extrapolate_backwards_does_not_move() {
        let s = KinematicSample::new(Vec3::zeros(), Vec3::new(1.0, 0.0, 0.0), SimTime(SECOND));
        let p = s.extrapolate(SimTime::ZERO);
        assert_eq!(p.position, s.position);
        assert_eq!(p.time, SimTime(SECOND));
    }
}

#[cfg(test)]
mod rng {
    use rand::distributions::{Standard, Uniform};

    use crate::{NodeId, NodeRng};

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = NodeRng::new(12345, NodeId(0));
        let mut r2 = NodeRng::new(12345, NodeId(0));
        for _ in 0..100 {
            let unit = Uniform::new(0.0, 1.0);
            let a: f64 = r1.sample(&unit);
            let b: f64 = r2.sample(&unit);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn different_nodes_differ() {
        let mut r0 = NodeRng::new(1, NodeId(0));
        let mut r1 = NodeRng::new(1, NodeId(1));
        let a: u64 = r0.sample(&Standard);
        let b: u64 = r1.sample(&Standard);
        assert_ne!(a, b, "seeds for adjacent nodes should diverge");
    }
}

#[cfg(test)]
mod error {
    use crate::ErrorKind;

    #[test]
    fn display_is_human_readable() {
        assert_eq!(ErrorKind::StaleUpdate.to_string(), "stale update");
        assert_eq!(ErrorKind::UnknownFamily.to_string(), "unknown model family");
    }
}
