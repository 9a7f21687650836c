//! Speed and heading distributions.
//!
//! Descriptors name a family and carry raw parameters; [`Sampler::resolve`]
//! validates them once, at model construction, through a small dispatch table
//! so draws never re-inspect the family.
//!
//! | Family     | Parameters         |
//! |------------|--------------------|
//! | `uniform`  | `[min, max]`       |
//! | `constant` | `[value]`          |
//! | `normal`   | `[mean, variance]` |

use rand::distributions::Uniform;
use rand_distr::Normal;
use rb_core::NodeRng;

use crate::{MobilityError, MobilityResult};

/// A distribution as named in a node descriptor, before validation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DistributionSpec {
    pub family: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub params: Vec<f64>,
}

impl DistributionSpec {
    pub fn uniform(min: f64, max: f64) -> Self {
        Self { family: "uniform".into(), params: vec![min, max] }
    }

    pub fn constant(value: f64) -> Self {
        Self { family: "constant".into(), params: vec![value] }
    }

    pub fn normal(mean: f64, variance: f64) -> Self {
        Self { family: "normal".into(), params: vec![mean, variance] }
    }
}

/// A validated distribution ready to draw from.
#[derive(Clone, Debug)]
pub enum Sampler {
    Uniform(Uniform<f64>),
    Constant(f64),
    Normal(Normal<f64>),
}

type Resolver = fn(&'static str, &[f64]) -> MobilityResult<Sampler>;

const FAMILIES: &[(&str, Resolver)] = &[
    ("uniform",  resolve_uniform),
    ("constant", resolve_constant),
    ("normal",   resolve_normal),
];

impl Sampler {
    /// Validate `spec` and build the sampler.  `what` names the quantity
    /// (`"speed"`, `"direction"`) in error messages.
    pub fn resolve(what: &'static str, spec: &DistributionSpec) -> MobilityResult<Sampler> {
        let family = spec.family.trim().to_ascii_lowercase();
        let (_, resolver) = FAMILIES
            .iter()
            .find(|(name, _)| *name == family)
            .ok_or_else(|| MobilityError::UnknownFamily { what, name: spec.family.clone() })?;
        if let Some(bad) = spec.params.iter().find(|p| !p.is_finite()) {
            return Err(MobilityError::invalid(what, format!("non-finite parameter {bad}")));
        }
        resolver(what, &spec.params)
    }

    #[inline]
    pub fn sample(&self, rng: &mut NodeRng) -> f64 {
        match self {
            Sampler::Uniform(u)  => rng.sample(u),
            Sampler::Constant(v) => *v,
            Sampler::Normal(n)   => rng.sample(n),
        }
    }
}

fn params<const N: usize>(what: &'static str, family: &str, p: &[f64]) -> MobilityResult<[f64; N]> {
    p.get(..N)
        .and_then(|s| <[f64; N]>::try_from(s).ok())
        .ok_or_else(|| MobilityError::invalid(what, format!("{family} needs {N} parameter(s), got {}", p.len())))
}

fn resolve_uniform(what: &'static str, p: &[f64]) -> MobilityResult<Sampler> {
    let [min, max] = params::<2>(what, "uniform", p)?;
    if min > max {
        return Err(MobilityError::invalid(what, format!("uniform min {min} exceeds max {max}")));
    }
    Ok(Sampler::Uniform(Uniform::new_inclusive(min, max)))
}

fn resolve_constant(what: &'static str, p: &[f64]) -> MobilityResult<Sampler> {
    let [value] = params::<1>(what, "constant", p)?;
    Ok(Sampler::Constant(value))
}

fn resolve_normal(what: &'static str, p: &[f64]) -> MobilityResult<Sampler> {
    let [mean, variance] = params::<2>(what, "normal", p)?;
    if variance < 0.0 {
        return Err(MobilityError::invalid(what, format!("normal variance {variance} is negative")));
    }
    Normal::new(mean, variance.sqrt())
        .map(Sampler::Normal)
        .map_err(|e| MobilityError::invalid(what, e.to_string()))
}
