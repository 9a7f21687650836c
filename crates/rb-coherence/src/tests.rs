//! Unit tests for rb-coherence.

use approx::assert_relative_eq;
use rb_core::Vec3;

use crate::{
    CoherenceError, CoherenceModel, MAX_COHERENCE_TIME, PathGeometry, SPEED_OF_LIGHT,
    coherence_from_relative_motion, coherence_time, doppler_profile,
};

const FC: f64 = 5.21e9;

// ── coherence_time ────────────────────────────────────────────────────────────

#[cfg(test)]
mod closed_form {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn rappaport2_matches_closed_form_exactly() {
        let expected = (0.423 * 299792458.0 * 1e9 / (1.0 * 5.21e9_f64)).ceil() as u64;
        assert_eq!(coherence_time(1.0, 5.21e9, CoherenceModel::Rappaport2).unwrap(), expected);
    }

    #[test]
    fn rappaport_matches_closed_form() {
        let expected =
            (9.0 * SPEED_OF_LIGHT * 1e9 / (16.0 * std::f64::consts::PI * 2.0 * 1.0 * FC)).ceil() as u64;
        assert_eq!(coherence_time(1.0, FC, CoherenceModel::Rappaport).unwrap(), expected);
    }

    #[test]
    fn zero_speed_is_unbounded() {
        assert_eq!(coherence_time(0.0, FC, CoherenceModel::Rappaport2).unwrap(), u64::MAX);
    }

    #[test]
    fn speed_out_of_range() {
        for v in [-0.1, 100.1, f64::NAN] {
            let err = coherence_time(v, FC, CoherenceModel::Rappaport2).unwrap_err();
            assert_eq!(err.kind(), rb_core::ErrorKind::OutOfRangeParameter, "speed {v}");
        }
        assert!(coherence_time(100.0, FC, CoherenceModel::Rappaport2).is_ok());
    }

    #[test]
    fn frequency_below_one_megahertz_rejected() {
        let err = coherence_time(1.0, 999_999.0, CoherenceModel::Rappaport).unwrap_err();
        assert!(matches!(err, CoherenceError::OutOfRange { what: "carrier frequency", .. }));
        assert!(coherence_time(1.0, 1e6, CoherenceModel::Rappaport).is_ok());
    }

    #[test]
    fn model_parses_from_name() {
        assert_eq!("rappaport".parse::<CoherenceModel>().unwrap(), CoherenceModel::Rappaport);
        assert_eq!("rappaport2".parse::<CoherenceModel>().unwrap(), CoherenceModel::Rappaport2);
        assert!("clarke".parse::<CoherenceModel>().is_err());
    }

    proptest! {
        #[test]
        fn positive_and_decreasing_in_speed(v in 0.01f64..99.0, fc in 1e6f64..1e11) {
            let slow = coherence_time(v, fc, CoherenceModel::Rappaport2).unwrap();
            let fast = coherence_time((v * 1.01).min(100.0), fc, CoherenceModel::Rappaport2).unwrap();
            prop_assert!(fast > 0);
            prop_assert!(fast < slow);
        }

        #[test]
        fn decreasing_in_frequency(v in 0.01f64..100.0, fc in 1e6f64..1e11) {
            let low = coherence_time(v, fc, CoherenceModel::Rappaport).unwrap();
            let high = coherence_time(v, fc * 1.01, CoherenceModel::Rappaport).unwrap();
            prop_assert!(high > 0);
            prop_assert!(high < low);
        }
    }
}

// ── coherence_from_relative_motion ────────────────────────────────────────────

#[cfg(test)]
mod relative_motion {
    use super::*;

    fn expected_ns(radial: f64) -> u64 {
        (0.423 / (radial / SPEED_OF_LIGHT * FC) * 1e9) as u64
    }

    #[test]
    fn zero_relative_velocity_is_max_regardless_of_geometry() {
        let v = Vec3::new(1.5, -2.0, 0.0);
        let zero_dirs = [Vec3::zeros()];
        let coincident = PathGeometry::LineOfSight { tx: Vec3::zeros(), rx: Vec3::zeros() };
        for geometry in [PathGeometry::Unknown, coincident, PathGeometry::Paths(&zero_dirs)] {
            let tc = coherence_from_relative_motion(v, v, FC, geometry, Some(&[1.0, 2.0])).unwrap();
            assert_eq!(tc, MAX_COHERENCE_TIME);
        }
    }

    #[test]
    fn line_of_sight_uses_radial_component() {
        // Closing at 8 m/s along the x axis.
        let tc = coherence_from_relative_motion(
            Vec3::new(-3.0, 0.0, 0.0),
            Vec3::new(5.0, 0.0, 0.0),
            FC,
            PathGeometry::LineOfSight { tx: Vec3::zeros(), rx: Vec3::new(100.0, 0.0, 0.0) },
            None,
        )
        .unwrap();
        assert_eq!(tc, expected_ns(8.0));
    }

    #[test]
    fn unknown_geometry_is_worst_case() {
        let v_rx = Vec3::new(3.0, 4.0, 0.0);
        let worst = coherence_from_relative_motion(Vec3::zeros(), v_rx, FC, PathGeometry::Unknown, None).unwrap();
        // Normalising v_rel can cost an ulp, which may move the truncation by 1 ns.
        assert!(worst.abs_diff(expected_ns(5.0)) <= 1, "got {worst}");

        // Any real LOS can only see part of |v_rel|.
        let los = PathGeometry::LineOfSight { tx: Vec3::zeros(), rx: Vec3::new(1.0, 0.0, 0.0) };
        let partial = coherence_from_relative_motion(Vec3::zeros(), v_rx, FC, los, None).unwrap();
        assert!(partial > worst);
    }

    #[test]
    fn perpendicular_motion_is_capped_at_max() {
        let los = PathGeometry::LineOfSight { tx: Vec3::zeros(), rx: Vec3::new(0.0, 10.0, 0.0) };
        let tc = coherence_from_relative_motion(Vec3::zeros(), Vec3::new(2.0, 0.0, 0.0), FC, los, None).unwrap();
        assert_eq!(tc, MAX_COHERENCE_TIME);
    }

    #[test]
    fn slow_motion_is_capped_at_max() {
        let tc = coherence_from_relative_motion(
            Vec3::zeros(), Vec3::new(1e-6, 0.0, 0.0), FC, PathGeometry::Unknown, None,
        )
        .unwrap();
        assert_eq!(tc, MAX_COHERENCE_TIME);
    }

    #[test]
    fn explicit_paths_take_the_fastest() {
        let dirs = [Vec3::new(0.0, 2.0, 0.0), Vec3::new(-4.0, 0.0, 0.0)];
        let tc = coherence_from_relative_motion(
            Vec3::zeros(), Vec3::new(6.0, 1.0, 0.0), FC, PathGeometry::Paths(&dirs), None,
        )
        .unwrap();
        assert_eq!(tc, expected_ns(6.0));
    }

    #[test]
    fn zero_length_direction_rejected() {
        let dirs = [Vec3::new(1.0, 0.0, 0.0), Vec3::zeros()];
        let err = coherence_from_relative_motion(
            Vec3::zeros(), Vec3::new(1.0, 0.0, 0.0), FC, PathGeometry::Paths(&dirs), None,
        )
        .unwrap_err();
        assert_eq!(err.kind(), rb_core::ErrorKind::InvalidGeometry);
    }

    #[test]
    fn coincident_positions_rejected() {
        let p = Vec3::new(1.0, 1.0, 1.0);
        let err = coherence_from_relative_motion(
            Vec3::zeros(), Vec3::new(1.0, 0.0, 0.0), FC, PathGeometry::LineOfSight { tx: p, rx: p }, None,
        )
        .unwrap_err();
        assert_eq!(err, CoherenceError::InvalidGeometry("tx and rx positions coincide"));
    }

    #[test]
    fn weight_count_must_match_paths() {
        let dirs = [Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0)];
        let err = coherence_from_relative_motion(
            Vec3::zeros(), Vec3::new(1.0, 1.0, 0.0), FC, PathGeometry::Paths(&dirs), Some(&[1.0]),
        )
        .unwrap_err();
        assert_eq!(err, CoherenceError::MismatchedWeights { weights: 1, paths: 2 });
    }
}

// ── doppler_profile aggregates ────────────────────────────────────────────────

#[cfg(test)]
mod profile {
    use super::*;

    #[test]
    fn static_pair_has_no_profile() {
        let v = Vec3::new(1.0, 0.0, 0.0);
        assert!(doppler_profile(v, v, FC, PathGeometry::Unknown, None).unwrap().is_none());
    }

    #[test]
    fn aggregates_over_two_paths() {
        let dirs = [Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0)];
        let p = doppler_profile(
            Vec3::zeros(), Vec3::new(4.0, -3.0, 0.0), FC, PathGeometry::Paths(&dirs), Some(&[3.0, 1.0]),
        )
        .unwrap()
        .unwrap();

        assert_relative_eq!(p.radial_speed[0], 4.0);
        assert_relative_eq!(p.radial_speed[1], -3.0);

        let f4 = 4.0 * FC / SPEED_OF_LIGHT;
        let f3 = 3.0 * FC / SPEED_OF_LIGHT;
        assert_relative_eq!(p.max_doppler, f4, max_relative = 1e-12);
        assert_relative_eq!(p.rms_doppler, ((f4 * f4 + f3 * f3) / 2.0).sqrt(), max_relative = 1e-12);
        assert_relative_eq!(
            p.weighted_rms_doppler.unwrap(),
            (0.75 * f4 * f4 + 0.25 * f3 * f3).sqrt(),
            max_relative = 1e-12
        );

        let per_path = p.per_path_coherence();
        assert_relative_eq!(p.worst_case_secs(), per_path[0]);
        assert!(p.rms_secs() > p.worst_case_secs());
    }

    #[test]
    fn perpendicular_path_has_infinite_coherence() {
        let dirs = [Vec3::new(0.0, 0.0, 1.0)];
        let p = doppler_profile(Vec3::zeros(), Vec3::new(1.0, 0.0, 0.0), FC, PathGeometry::Paths(&dirs), None)
            .unwrap()
            .unwrap();
        assert!(p.per_path_coherence()[0].is_infinite());
        assert!(p.worst_case_secs().is_infinite());
        assert!(p.weighted_rms_secs().is_none());
    }

    #[test]
    fn zero_weight_sum_rejected() {
        let err = doppler_profile(
            Vec3::zeros(), Vec3::new(1.0, 0.0, 0.0), FC, PathGeometry::Unknown, Some(&[0.0]),
        )
        .unwrap_err();
        assert_eq!(err.kind(), rb_core::ErrorKind::OutOfRangeParameter);
    }
}
