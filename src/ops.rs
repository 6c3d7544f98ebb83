use std::str::FromStr;

use num::Float;

use crate::error::FuzzyError;

/// And operator (t-norm) for combining the degrees of propositions
/// in a fuzzy rule premise.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AndOp {
    #[default]
    Min,
    Prod,
    BoundedProd,
}

impl AndOp {
    pub fn call<F: Float>(self, u: F, v: F) -> F {
        match self {
            Self::Min => F::min(u, v),
            Self::Prod => u * v,
            Self::BoundedProd => F::max(F::zero(), u + v - F::one()),
        }
    }
}

/// Or operator (s-norm) for combining the degrees of propositions
/// in a fuzzy rule premise.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OrOp {
    #[default]
    Max,
    ProbOr,
    BoundedSum,
}

impl OrOp {
    pub fn call<F: Float>(self, u: F, v: F) -> F {
        match self {
            Self::Max => F::max(u, v),
            Self::ProbOr => u + v - u * v,
            Self::BoundedSum => F::min(F::one(), u + v),
        }
    }
}

/// Implication operator mapping a rule's firing strength `u` and the
/// consequent degree `v` to the inferred degree.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ImplicationOp {
    /// min(u, v): clips the consequent at the firing strength
    #[default]
    Mamdani,
    /// u * v: scales the consequent by the firing strength
    Larsen,
    /// max(1 - u, v)
    KleeneDienes,
    /// min(1, 1 - u + v)
    Lukasiewicz,
    /// max(min(u, v), 1 - u)
    Zadeh,
}

impl ImplicationOp {
    pub fn call<F: Float>(self, u: F, v: F) -> F {
        match self {
            Self::Mamdani => F::min(u, v),
            Self::Larsen => u * v,
            Self::KleeneDienes => F::max(F::one() - u, v),
            Self::Lukasiewicz => F::min(F::one(), F::one() - u + v),
            Self::Zadeh => F::max(F::min(u, v), F::one() - u),
        }
    }
}

/// Method for defuzzificating the resulting membership function.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DefuzzificationOp {
    /// Center of Gravity
    Cog,
    /// Mean of the values for which the membership function is maximum
    Mom,
}

impl DefuzzificationOp {
    /// Reduces `(x, membership)` samples to a crisp value.
    ///
    /// `Cog` yields zero when the total membership is zero. `Mom` treats every
    /// sample within `tolerance` of the maximum as a maximum and returns `None`
    /// only when there are no samples at all.
    pub fn call<F: Float>(self, samples: impl Iterator<Item = (F, F)> + Clone, tolerance: F) -> Option<F> {
        match self {
            Self::Cog => {
                let (num, den) = samples.fold((F::zero(), F::zero()), |(num, den), (x, m)| (num + x * m, den + m));

                if den == F::zero() {
                    Some(F::zero())
                } else {
                    Some(num / den)
                }
            },
            Self::Mom => {
                let maximum = samples.clone().map(|(_, m)| m).reduce(F::max)?;
                let (len, sum) = samples
                    .filter_map(|(x, m)| if maximum - m <= tolerance { Some(x) } else { None })
                    .fold((0usize, F::zero()), |(len, accum), next| (len + 1, accum + next));

                Some(sum / F::from(len)?)
            },
        }
    }
}

impl FromStr for DefuzzificationOp {
    type Err = FuzzyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "COG" => Ok(Self::Cog),
            "MOM" => Ok(Self::Mom),
            _ => Err(FuzzyError::UnsupportedMethod(s.to_owned())),
        }
    }
}

#[test]
fn test_norms() {
    assert_eq!(AndOp::Min.call(0.3, 0.8), 0.3);
    assert_eq!(AndOp::Prod.call(0.5, 0.5), 0.25);
    assert_eq!(AndOp::BoundedProd.call(0.3, 0.5), 0.);
    assert_eq!(OrOp::Max.call(0.3, 0.8), 0.8);
    assert_eq!(OrOp::ProbOr.call(0.5, 0.5), 0.75);
    assert_eq!(OrOp::BoundedSum.call(0.7, 0.5), 1.);
}

#[test]
fn test_implications() {
    assert_eq!(ImplicationOp::Mamdani.call(0.4, 0.9), 0.4);
    assert_eq!(ImplicationOp::Larsen.call(0.5, 0.5), 0.25);
    assert_eq!(ImplicationOp::KleeneDienes.call(0.75, 0.1), 0.25);
    assert_eq!(ImplicationOp::Lukasiewicz.call(0.5, 0.25), 0.75);
    assert_eq!(ImplicationOp::Zadeh.call(0.25, 0.5), 0.75);
}

#[test]
fn test_defuzzification_ops() {
    let universe = [0., 1., 2., 3., 4.];
    let membership = [0., 0.5, 1., 1., 0.];
    let samples = universe.iter().copied().zip(membership.iter().copied());

    assert_eq!(DefuzzificationOp::Cog.call(samples.clone(), 0.), Some(5.5 / 2.5));
    assert_eq!(DefuzzificationOp::Mom.call(samples, 0.), Some(2.5));

    let zero = universe.iter().map(|x| (*x, 0.));

    assert_eq!(DefuzzificationOp::Cog.call(zero.clone(), 0.), Some(0.));
    assert_eq!(DefuzzificationOp::Mom.call(zero, 0.), Some(2.));
    assert_eq!(DefuzzificationOp::Mom.call(std::iter::empty::<(f64, f64)>(), 0.), None);
}

#[test]
fn test_parse_method() {
    assert_eq!("COG".parse::<DefuzzificationOp>(), Ok(DefuzzificationOp::Cog));
    assert_eq!("mom".parse::<DefuzzificationOp>(), Ok(DefuzzificationOp::Mom));
    assert_eq!(
        "BOA".parse::<DefuzzificationOp>(),
        Err(FuzzyError::UnsupportedMethod("BOA".into()))
    );
}
