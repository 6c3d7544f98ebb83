use crate::error::Result;
use crate::set::{FuzzySet, Point};
use crate::terms::{Term, Terms};
use crate::universe::Universe;

/// A universe together with its named terms, e.g. `temperature` with
/// `Cold`, `Warm` and `Hot`.
pub struct LinguisticVariable<K: Term> {
    universe: Universe,
    terms: Terms<K>,
}

impl<K: Term> LinguisticVariable<K> {
    pub fn new(universe: Universe) -> Self {
        Self {
            universe,
            terms: Terms::new(),
        }
    }

    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    pub fn terms(&self) -> &Terms<K> {
        &self.terms
    }

    /// Defines (or redefines) `key` as the multipoint set through `points`.
    pub fn add_term<P: Into<Point>>(&mut self, key: K, points: impl IntoIterator<Item = P>) -> Result<()> {
        let set = self.universe.multipoint(points)?;

        self.insert_term(key, set)
    }

    /// Defines `key` as an existing set, which must live in this universe.
    pub fn insert_term(&mut self, key: K, set: FuzzySet) -> Result<()> {
        self.universe.ensure_same(set.universe())?;
        self.terms.insert(key, set);

        Ok(())
    }

    pub fn term(&self, key: K) -> Option<&FuzzySet> {
        self.terms.get(key)
    }

    /// A crisp input for this variable.
    pub fn crisp(&self, x: f64) -> Result<FuzzySet> {
        self.universe.singleton(x)
    }

    /// How much `x` belongs to each defined term.
    pub fn degrees(&self, x: f64) -> Result<Vec<(K, f64)>> {
        self.terms
            .iter()
            .map(|(key, set)| Ok((key, set.membership_degree(x)?)))
            .collect()
    }
}
