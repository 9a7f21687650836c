//! Multi-path Doppler analysis from the relative velocity of a node pair.

use rb_core::Vec3;

use crate::{
    COHERENCE_FACTOR, CoherenceError, CoherenceResult, MAX_COHERENCE_TIME, MIN_CARRIER_FREQUENCY,
    SPEED_OF_LIGHT,
};

/// Geometric information available for deriving propagation directions.
#[derive(Copy, Clone, Debug)]
pub enum PathGeometry<'a> {
    /// Nothing known: assume a path parallel to the relative velocity, which
    /// maximises the radial speed.
    Unknown,
    /// Use the straight line from `tx` to `rx`.
    LineOfSight { tx: Vec3, rx: Vec3 },
    /// Explicit path direction vectors, not necessarily unit length.
    Paths(&'a [Vec3]),
}

/// Per-path Doppler shifts for one relative-motion state and their aggregates.
#[derive(Clone, Debug, PartialEq)]
pub struct DopplerProfile {
    /// Signed radial speed along each unit path direction, m/s.
    pub radial_speed:  Vec<f64>,
    /// `|v_rad| · f_c / c` per path, Hz.
    pub doppler:       Vec<f64>,
    /// Largest per-path Doppler, Hz.
    pub max_doppler:   f64,
    /// Unweighted RMS of the per-path Doppler, Hz.
    pub rms_doppler:   f64,
    /// Power-weighted RMS, present only when weights were supplied.
    pub weighted_rms_doppler: Option<f64>,
}

impl DopplerProfile {
    /// Coherence time of each path in seconds (`inf` at zero Doppler).
    pub fn per_path_coherence(&self) -> Vec<f64> {
        self.doppler.iter().map(|&f| coherence_secs(f)).collect()
    }

    /// Worst-case (minimum) coherence time in seconds.
    pub fn worst_case_secs(&self) -> f64 {
        coherence_secs(self.max_doppler)
    }

    pub fn rms_secs(&self) -> f64 {
        coherence_secs(self.rms_doppler)
    }

    pub fn weighted_rms_secs(&self) -> Option<f64> {
        self.weighted_rms_doppler.map(coherence_secs)
    }
}

fn coherence_secs(doppler: f64) -> f64 {
    if doppler > 0.0 { COHERENCE_FACTOR / doppler } else { f64::INFINITY }
}

/// Analyse the Doppler spread of the pair.
///
/// Returns `Ok(None)` when the relative velocity `v_rx - v_tx` is numerically
/// zero: the channel is static and no geometry is inspected.
pub fn doppler_profile(
    v_tx:              Vec3,
    v_rx:              Vec3,
    carrier_frequency: f64,
    geometry:          PathGeometry<'_>,
    powers:            Option<&[f64]>,
) -> CoherenceResult<Option<DopplerProfile>> {
    let v_rel = v_rx - v_tx;
    let v_rel_norm = v_rel.norm();
    if v_rel_norm <= f64::EPSILON {
        return Ok(None);
    }
    if !(carrier_frequency >= MIN_CARRIER_FREQUENCY) || !carrier_frequency.is_finite() {
        return Err(CoherenceError::OutOfRange {
            what:  "carrier frequency",
            value: carrier_frequency,
            range: ">= 1 MHz",
        });
    }

    let directions = unit_directions(v_rel / v_rel_norm, geometry)?;

    let radial_speed: Vec<f64> = directions.iter().map(|u| u.dot(&v_rel)).collect();
    let doppler: Vec<f64> = radial_speed
        .iter()
        .map(|v| v.abs() / SPEED_OF_LIGHT * carrier_frequency)
        .collect();

    let max_doppler = doppler.iter().copied().fold(0.0, f64::max);
    let rms_doppler = (doppler.iter().map(|f| f * f).sum::<f64>() / doppler.len() as f64).sqrt();

    let weighted_rms_doppler = match powers {
        None => None,
        Some(p) => {
            if p.len() != doppler.len() {
                return Err(CoherenceError::MismatchedWeights { weights: p.len(), paths: doppler.len() });
            }
            let total: f64 = p.iter().sum();
            if p.iter().any(|w| !(*w >= 0.0)) || !(total > 0.0) {
                return Err(CoherenceError::OutOfRange {
                    what:  "power weight sum",
                    value: total,
                    range: "> 0 with non-negative weights",
                });
            }
            let mean_sq: f64 = p.iter().zip(&doppler).map(|(w, f)| w / total * f * f).sum();
            Some(mean_sq.sqrt())
        }
    };

    Ok(Some(DopplerProfile { radial_speed, doppler, max_doppler, rms_doppler, weighted_rms_doppler }))
}

/// Worst-case coherence time, in integer nanoseconds, for the node pair.
///
/// A static pair (zero relative velocity) always yields
/// [`MAX_COHERENCE_TIME`], whatever geometry is passed.  Otherwise the
/// minimum per-path coherence time is truncated to whole nanoseconds and
/// capped at [`MAX_COHERENCE_TIME`].
pub fn coherence_from_relative_motion(
    v_tx:              Vec3,
    v_rx:              Vec3,
    carrier_frequency: f64,
    geometry:          PathGeometry<'_>,
    powers:            Option<&[f64]>,
) -> CoherenceResult<u64> {
    let Some(profile) = doppler_profile(v_tx, v_rx, carrier_frequency, geometry, powers)? else {
        return Ok(MAX_COHERENCE_TIME);
    };
    let ns = profile.worst_case_secs() * 1e9;
    if ns.is_finite() {
        Ok((ns as u64).min(MAX_COHERENCE_TIME))
    } else {
        Ok(MAX_COHERENCE_TIME)
    }
}

fn unit_directions(v_rel_unit: Vec3, geometry: PathGeometry<'_>) -> CoherenceResult<Vec<Vec3>> {
    match geometry {
        PathGeometry::Paths(dirs) if !dirs.is_empty() => dirs
            .iter()
            .map(|d| {
                let n = d.norm();
                if n == 0.0 || !n.is_finite() {
                    Err(CoherenceError::InvalidGeometry("zero-length path direction"))
                } else {
                    Ok(d / n)
                }
            })
            .collect(),
        PathGeometry::Paths(_) => Err(CoherenceError::InvalidGeometry("empty path direction list")),
        PathGeometry::LineOfSight { tx, rx } => {
            let los = rx - tx;
            let n = los.norm();
            if n == 0.0 {
                Err(CoherenceError::InvalidGeometry("tx and rx positions coincide"))
            } else {
                Ok(vec![los / n])
            }
        }
        PathGeometry::Unknown => Ok(vec![v_rel_unit]),
    }
}
