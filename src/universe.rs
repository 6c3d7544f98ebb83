use std::fmt;
use std::sync::Arc;

use crate::error::{FuzzyError, Result};
use crate::set::{FuzzySet, MultiPointSet, Point, Singleton};

#[derive(Debug)]
struct UniverseData {
    name: String,
    min: f64,
    max: f64,
}

/// A named, bounded real interval that sets and variables are defined over.
///
/// Cloning is cheap and shares the same underlying universe. Two handles
/// compare equal only if they share it, so sets built from separately created
/// universes never mix, even when names and bounds coincide.
#[derive(Clone)]
pub struct Universe(Arc<UniverseData>);

impl Universe {
    pub fn new(name: impl Into<String>, min: f64, max: f64) -> Result<Self> {
        let name = name.into();

        if !(min.is_finite() && max.is_finite() && min <= max) {
            return Err(FuzzyError::InvalidUniverse { name, min, max });
        }

        Ok(Universe(Arc::new(UniverseData { name, min, max })))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn min(&self) -> f64 {
        self.0.min
    }

    pub fn max(&self) -> f64 {
        self.0.max
    }

    pub fn contains(&self, x: f64) -> bool {
        self.0.min <= x && x <= self.0.max
    }

    /// A crisp value lifted into a fuzzy set: degree 1 at `x`, 0 elsewhere.
    pub fn singleton(&self, x: f64) -> Result<FuzzySet> {
        self.check(x)?;

        Ok(FuzzySet::Singleton(Singleton::new(self.clone(), x)))
    }

    /// A piecewise-linear set through `points`, which must be at least two
    /// and strictly increasing in `x`. The set stays flat beyond the first
    /// and last point.
    pub fn multipoint<P: Into<Point>>(&self, points: impl IntoIterator<Item = P>) -> Result<FuzzySet> {
        let knots = points.into_iter().map(Into::into).collect();

        MultiPointSet::new(self.clone(), knots).map(FuzzySet::MultiPoint)
    }

    /// Triangle peaking at `center` whose base spans `base`.
    pub fn triangular(&self, center: f64, base: f64) -> Result<FuzzySet> {
        self.multipoint([
            (center - base / 2., 0.),
            (center, 1.),
            (center + base / 2., 0.),
        ])
    }

    /// Trapezoid centered on `center`, `major_base` wide at degree 0 and
    /// `minor_base` wide at degree 1.
    pub fn trapezoid(&self, center: f64, major_base: f64, minor_base: f64) -> Result<FuzzySet> {
        self.multipoint([
            (center - major_base / 2., 0.),
            (center - minor_base / 2., 1.),
            (center + minor_base / 2., 1.),
            (center + major_base / 2., 0.),
        ])
    }

    /// Constant `degree` over the whole line.
    pub(crate) fn flat(&self, degree: f64) -> FuzzySet {
        FuzzySet::MultiPoint(MultiPointSet::flat(self.clone(), degree))
    }

    pub(crate) fn check(&self, x: f64) -> Result<()> {
        if self.contains(x) {
            Ok(())
        } else {
            Err(FuzzyError::OutOfBounds {
                universe: self.0.name.clone(),
                value: x,
                min: self.0.min,
                max: self.0.max,
            })
        }
    }

    pub(crate) fn ensure_same(&self, other: &Universe) -> Result<()> {
        if self == other {
            Ok(())
        } else {
            Err(FuzzyError::UniverseMismatch {
                left: self.0.name.clone(),
                right: other.0.name.clone(),
            })
        }
    }
}

impl PartialEq for Universe {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Universe {}

impl fmt::Debug for Universe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Universe({} [{}, {}])", self.0.name, self.0.min, self.0.max)
    }
}

#[test]
fn test_universe_bounds() {
    let temperature = Universe::new("temperature", 0., 50.).unwrap();

    assert_eq!(temperature.name(), "temperature");
    assert_eq!(temperature.min(), 0.);
    assert_eq!(temperature.max(), 50.);
    assert!(temperature.contains(50.));
    assert!(!temperature.contains(f64::NAN));
    assert!(Universe::new("point", 3., 3.).is_ok());
    assert!(matches!(
        Universe::new("inverted", 10., 0.),
        Err(FuzzyError::InvalidUniverse { .. })
    ));
    assert!(Universe::new("open", 0., f64::INFINITY).is_err());
}

#[test]
fn test_universe_identity() {
    fn assert_send_sync<T: Send + Sync>() {}

    assert_send_sync::<Universe>();
    assert_send_sync::<FuzzySet>();

    let a = Universe::new("sunshine", 0., 100.).unwrap();
    let b = Universe::new("sunshine", 0., 100.).unwrap();

    assert_eq!(a, a.clone());
    assert_ne!(a, b);
    assert_eq!(
        a.ensure_same(&b),
        Err(FuzzyError::UniverseMismatch {
            left: "sunshine".into(),
            right: "sunshine".into(),
        })
    );
}

#[test]
fn test_factories() {
    let tourists = Universe::new("tourists", 0., 100.).unwrap();

    assert!(matches!(
        tourists.singleton(101.),
        Err(FuzzyError::OutOfBounds { value, .. }) if value == 101.
    ));
    assert!(matches!(tourists.singleton(-0.5), Err(FuzzyError::OutOfBounds { .. })));
    assert_eq!(
        tourists.multipoint([(10., 1.)]),
        Err(FuzzyError::InsufficientPoints(1))
    );
    assert_eq!(
        tourists.multipoint(Vec::<(f64, f64)>::new()),
        Err(FuzzyError::InsufficientPoints(0))
    );

    let medium = tourists.triangular(50., 100.).unwrap();

    assert_eq!(medium.membership_degree(25.), Ok(0.5));
    assert_eq!(medium.membership_degree(50.), Ok(1.));

    let plateau = tourists.trapezoid(50., 40., 20.).unwrap();

    assert_eq!(plateau.membership_degree(35.), Ok(0.5));
    assert_eq!(plateau.membership_degree(55.), Ok(1.));
    assert_eq!(plateau.membership_degree(90.), Ok(0.));
    assert!(tourists.triangular(50., 0.).is_err());
}
