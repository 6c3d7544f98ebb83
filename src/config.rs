use crate::error::{FuzzyError, Result};
use crate::ops::{AndOp, ImplicationOp, OrOp};

/// Tunables for rule evaluation and defuzzification.
///
/// The defaults reproduce plain Mamdani inference: minimum for AND, maximum
/// for OR, minimum implication, and a sampling step of 0.01.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Absolute distance between defuzzification samples
    pub resolution: f64,
    /// Samples within this distance of the maximum count as maxima (MOM)
    pub tolerance: f64,
    /// Upper bound on the samples a single defuzzification may take
    pub max_samples: usize,
    pub and_op: AndOp,
    pub or_op: OrOp,
    pub imp_op: ImplicationOp,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            resolution: 0.01,
            tolerance: 1e-9,
            max_samples: 10_000_000,
            and_op: AndOp::Min,
            or_op: OrOp::Max,
            imp_op: ImplicationOp::Mamdani,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resolution(mut self, resolution: f64) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_max_samples(mut self, max_samples: usize) -> Self {
        self.max_samples = max_samples;
        self
    }

    pub fn with_and_op(mut self, and_op: AndOp) -> Self {
        self.and_op = and_op;
        self
    }

    pub fn with_or_op(mut self, or_op: OrOp) -> Self {
        self.or_op = or_op;
        self
    }

    pub fn with_imp_op(mut self, imp_op: ImplicationOp) -> Self {
        self.imp_op = imp_op;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.resolution.is_finite() && self.resolution > 0.) {
            return Err(FuzzyError::InvalidConfig(format!(
                "resolution must be positive and finite, got {}",
                self.resolution
            )));
        }
        if !(self.tolerance.is_finite() && self.tolerance >= 0.) {
            return Err(FuzzyError::InvalidConfig(format!(
                "tolerance must be non-negative and finite, got {}",
                self.tolerance
            )));
        }
        if self.max_samples == 0 {
            return Err(FuzzyError::InvalidConfig("max_samples must be at least 1".into()));
        }

        Ok(())
    }

    /// Fails when sampling `[min, max)` every `resolution` would exceed
    /// `max_samples`.
    pub fn check_samples(&self, min: f64, max: f64) -> Result<()> {
        let samples = ((max - min) / self.resolution).floor();

        if samples > self.max_samples as f64 {
            return Err(FuzzyError::InvalidConfig(format!(
                "sampling [{min}, {max}] every {} takes {samples} samples, more than max_samples {}",
                self.resolution, self.max_samples
            )));
        }

        Ok(())
    }
}

#[test]
fn test_validate() {
    assert_eq!(Config::default().validate(), Ok(()));
    assert!(Config::new().with_resolution(0.).validate().is_err());
    assert!(Config::new().with_resolution(f64::NAN).validate().is_err());
    assert!(Config::new().with_tolerance(-1.).validate().is_err());
    assert!(Config::new().with_max_samples(0).validate().is_err());

    let config = Config::new().with_and_op(AndOp::Prod).with_imp_op(ImplicationOp::Larsen);

    assert_eq!(config.and_op, AndOp::Prod);
    assert_eq!(config.or_op, OrOp::Max);
    assert_eq!(config.imp_op, ImplicationOp::Larsen);
}

#[cfg(feature = "serde")]
#[test]
fn test_deserialize_partial() {
    let config: Config = serde_json::from_str(r#"{"resolution": 0.5, "and_op": "Prod"}"#).unwrap();

    assert_eq!(config.resolution, 0.5);
    assert_eq!(config.and_op, AndOp::Prod);
    assert_eq!(config.imp_op, ImplicationOp::Mamdani);
}

#[test]
fn test_check_samples() {
    let config = Config::default();

    assert_eq!(config.check_samples(0., 100.), Ok(()));
    assert!(matches!(config.check_samples(0., 1e12), Err(FuzzyError::InvalidConfig(_))));
    assert_eq!(config.with_resolution(1e9).check_samples(0., 1e12), Ok(()));
    assert!(config.with_max_samples(100).check_samples(0., 2.).is_err());
    assert_eq!(config.with_max_samples(100).check_samples(0., 1.), Ok(()));
}
