use tracing::debug;

use crate::error::{FuzzyError, Result};
use crate::math::{combine, interp, simplify};
use crate::universe::Universe;

/// A knot of a piecewise-linear membership function.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub degree: f64,
}

impl Point {
    pub const fn new(x: f64, degree: f64) -> Self {
        Point { x, degree }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, degree): (f64, f64)) -> Self {
        Point { x, degree }
    }
}

/// A point mass at `center`.
///
/// `degree` starts at 1 and drops as the singleton is intersected with other
/// sets. `base` is the degree everywhere else; it is 0 unless the singleton
/// was complemented.
#[derive(Clone, Debug, PartialEq)]
pub struct Singleton {
    universe: Universe,
    center: f64,
    degree: f64,
    base: f64,
}

impl Singleton {
    pub(crate) fn new(universe: Universe, center: f64) -> Self {
        Singleton {
            universe,
            center,
            degree: 1.,
            base: 0.,
        }
    }

    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    pub fn center(&self) -> f64 {
        self.center
    }

    pub fn degree(&self) -> f64 {
        self.degree
    }

    pub fn base(&self) -> f64 {
        self.base
    }

    fn degree_at(&self, x: f64) -> f64 {
        if x == self.center {
            self.degree
        } else {
            self.base
        }
    }

    /// Applies `f` to the degree at the center and to the base degree.
    pub(crate) fn map_degrees(&self, f: impl Fn(f64) -> f64) -> Self {
        Singleton {
            universe: self.universe.clone(),
            center: self.center,
            degree: f(self.degree),
            base: f(self.base),
        }
    }
}

/// A piecewise-linear membership function through strictly increasing knots,
/// flat towards both infinities.
#[derive(Clone, Debug, PartialEq)]
pub struct MultiPointSet {
    universe: Universe,
    knots: Vec<Point>,
}

impl MultiPointSet {
    pub(crate) fn new(universe: Universe, knots: Vec<Point>) -> Result<Self> {
        if knots.len() < 2 {
            return Err(FuzzyError::InsufficientPoints(knots.len()));
        }

        for (index, knot) in knots.iter().enumerate() {
            if !knot.x.is_finite() {
                return Err(FuzzyError::InvalidPoints {
                    index,
                    reason: "x must be finite",
                });
            }
            if knot.degree.is_nan() {
                return Err(FuzzyError::InvalidPoints {
                    index,
                    reason: "degree is NaN",
                });
            }
            if index > 0 && knots[index - 1].x >= knot.x {
                return Err(FuzzyError::InvalidPoints {
                    index,
                    reason: "x must be strictly increasing",
                });
            }
        }

        Ok(MultiPointSet { universe, knots })
    }

    pub(crate) fn flat(universe: Universe, degree: f64) -> Self {
        let knots = vec![Point::new(universe.min(), degree)];

        MultiPointSet { universe, knots }
    }

    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    /// The finite knots; the function is flat before the first and after the last.
    pub fn knots(&self) -> &[Point] {
        &self.knots
    }

    fn degree_at(&self, x: f64) -> f64 {
        interp(&self.knots, x)
    }

    fn min_degree(&self) -> f64 {
        self.knots.iter().map(|p| p.degree).fold(f64::INFINITY, f64::min)
    }

    fn max_degree(&self) -> f64 {
        self.knots.iter().map(|p| p.degree).fold(f64::NEG_INFINITY, f64::max)
    }

    /// Pointwise `op` of both functions; `op` must select one of its operands.
    pub(crate) fn combine(&self, other: &MultiPointSet, op: impl Fn(f64, f64) -> f64) -> Self {
        MultiPointSet {
            universe: self.universe.clone(),
            knots: combine(&self.knots, &other.knots, op),
        }
    }

    /// Pointwise `op` against the constant `level`.
    pub(crate) fn combine_level(&self, level: f64, op: impl Fn(f64, f64) -> f64) -> Self {
        self.combine(&MultiPointSet::flat(self.universe.clone(), level), op)
    }

    /// Applies `f` to every knot. Exact for affine `f`.
    pub(crate) fn map_degrees(&self, f: impl Fn(f64) -> f64) -> Self {
        let knots = self.knots.iter().map(|p| Point::new(p.x, f(p.degree))).collect();

        MultiPointSet {
            universe: self.universe.clone(),
            knots: simplify(knots),
        }
    }
}

/// A fuzzy set over a [`Universe`]: either a single point mass or a
/// piecewise-linear profile.
#[derive(Clone, Debug, PartialEq)]
pub enum FuzzySet {
    Singleton(Singleton),
    MultiPoint(MultiPointSet),
}

impl FuzzySet {
    pub fn universe(&self) -> &Universe {
        match self {
            Self::Singleton(s) => s.universe(),
            Self::MultiPoint(m) => m.universe(),
        }
    }

    /// Degree of membership of `x`.
    ///
    /// Fails with [`FuzzyError::OutOfBounds`] outside the universe. The two
    /// infinities are always accepted: `-inf` yields the lowest degree the set
    /// attains and `+inf` the highest.
    pub fn membership_degree(&self, x: f64) -> Result<f64> {
        if x == f64::NEG_INFINITY {
            return Ok(self.min_degree());
        }
        if x == f64::INFINITY {
            return Ok(self.max_degree());
        }

        self.universe().check(x)?;

        Ok(self.degree_at(x))
    }

    pub fn min_degree(&self) -> f64 {
        match self {
            Self::Singleton(s) => f64::min(s.degree, s.base),
            Self::MultiPoint(m) => m.min_degree(),
        }
    }

    pub fn max_degree(&self) -> f64 {
        match self {
            Self::Singleton(s) => f64::max(s.degree, s.base),
            Self::MultiPoint(m) => m.max_degree(),
        }
    }

    pub fn as_singleton(&self) -> Option<&Singleton> {
        match self {
            Self::Singleton(s) => Some(s),
            Self::MultiPoint(_) => None,
        }
    }

    pub fn is_singleton(&self) -> bool {
        self.as_singleton().is_some()
    }

    /// Pointwise minimum.
    ///
    /// Two singletons at the same center intersect exactly: degree and base
    /// are the minimum of both sides. When only one side is a singleton (or
    /// the centers differ) the result is a singleton at that center whose
    /// degree is the minimum of both sides there, with base 0.
    pub fn intersect(&self, other: &FuzzySet) -> Result<FuzzySet> {
        self.universe().ensure_same(other.universe())?;

        let set = match (self, other) {
            (Self::Singleton(a), Self::Singleton(b)) if a.center == b.center => Self::Singleton(Singleton {
                universe: a.universe.clone(),
                center: a.center,
                degree: f64::min(a.degree, b.degree),
                base: f64::min(a.base, b.base),
            }),
            (Self::Singleton(s), rest) | (rest, Self::Singleton(s)) => Self::Singleton(Singleton {
                universe: s.universe.clone(),
                center: s.center,
                degree: f64::min(s.degree, rest.degree_at(s.center)),
                base: 0.,
            }),
            (Self::MultiPoint(a), Self::MultiPoint(b)) => Self::MultiPoint(a.combine(b, f64::min)),
        };

        Ok(set)
    }

    /// Pointwise maximum.
    ///
    /// Two singletons at the same center unite exactly: degree and base are
    /// the maximum of both sides. Otherwise a singleton's point mass is
    /// dropped and it contributes only its base degree, so the result equals
    /// the pointwise maximum everywhere except possibly at the singleton's
    /// center.
    pub fn union(&self, other: &FuzzySet) -> Result<FuzzySet> {
        self.universe().ensure_same(other.universe())?;

        let set = match (self, other) {
            (Self::Singleton(a), Self::Singleton(b)) if a.center == b.center => Self::Singleton(Singleton {
                universe: a.universe.clone(),
                center: a.center,
                degree: f64::max(a.degree, b.degree),
                base: f64::max(a.base, b.base),
            }),
            (Self::Singleton(a), Self::Singleton(b)) => {
                debug!(left = a.center, right = b.center, "union drops the point masses of two singletons");

                self.universe().flat(f64::max(a.base, b.base))
            },
            (Self::Singleton(s), Self::MultiPoint(m)) | (Self::MultiPoint(m), Self::Singleton(s)) => {
                if s.degree > f64::max(s.base, m.degree_at(s.center)) {
                    debug!(center = s.center, degree = s.degree, "union drops a singleton point mass");
                }

                Self::MultiPoint(m.combine_level(s.base, f64::max))
            },
            (Self::MultiPoint(a), Self::MultiPoint(b)) => Self::MultiPoint(a.combine(b, f64::max)),
        };

        Ok(set)
    }

    /// Pointwise `1 - degree`.
    pub fn complement(&self) -> FuzzySet {
        match self {
            Self::Singleton(s) => Self::Singleton(s.map_degrees(|y| 1. - y)),
            Self::MultiPoint(m) => Self::MultiPoint(m.map_degrees(|y| 1. - y)),
        }
    }

    /// Membership of `x` without the bounds check.
    pub(crate) fn degree_at(&self, x: f64) -> f64 {
        match self {
            Self::Singleton(s) => s.degree_at(x),
            Self::MultiPoint(m) => m.degree_at(x),
        }
    }
}
