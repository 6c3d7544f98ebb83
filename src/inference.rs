use tracing::{debug, trace};

use crate::config::Config;
use crate::error::{FuzzyError, Result};
use crate::linspace::Linspace;
use crate::ops::DefuzzificationOp;
use crate::rules::RuleBase;
use crate::set::FuzzySet;

/// Reduces `set` to a crisp value with the default [`Config`].
pub fn defuzzify(set: &FuzzySet, op: DefuzzificationOp) -> Result<f64> {
    defuzzify_with(set, op, &Config::default())
}

/// Reduces `set` to a crisp value by sampling its universe every
/// `config.resolution`, starting at the universe minimum.
///
/// Fails with [`FuzzyError::InvalidConfig`] when the universe would need
/// more than `config.max_samples` samples. A set without any membership
/// yields 0 under `Cog`. A plain point mass
/// yields its center under both methods.
pub fn defuzzify_with(set: &FuzzySet, op: DefuzzificationOp, config: &Config) -> Result<f64> {
    config.validate()?;

    if let FuzzySet::Singleton(s) = set {
        if s.base() == 0. && s.degree() > 0. {
            return Ok(s.center());
        }
    }

    let universe = set.universe();

    config.check_samples(universe.min(), universe.max())?;

    let samples = Linspace::stepped(universe.min(), universe.max(), config.resolution).map(|x| (x, set.degree_at(x)));

    trace!(universe = universe.name(), samples = samples.len(), ?op, "defuzzificating");

    if op == DefuzzificationOp::Cog && set.max_degree() <= 0. {
        debug!(universe = universe.name(), "set has no membership, center of gravity is 0");
    }

    op.call(samples, config.tolerance).ok_or(FuzzyError::EmptySet)
}

impl RuleBase {
    /// Executes the rule base and defuzzificates the aggregate with the rule
    /// base's own configuration.
    pub fn infer(&self, op: DefuzzificationOp) -> Result<f64> {
        let aggregate = self.exec()?;

        defuzzify_with(&aggregate, op, self.config())
    }
}
