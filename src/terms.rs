pub use fixed_map::Key as Term;
pub use fixed_map::Key;
use fixed_map::Map as FixedMap;

use crate::set::FuzzySet;

/// Fuzzy sets keyed by an enum of term names.
pub struct Terms<K: Term>(pub(crate) FixedMap<K, FuzzySet>);

impl<K: Term> Terms<K> {
    pub fn new() -> Self {
        Self(FixedMap::new())
    }

    pub fn insert(&mut self, key: K, value: FuzzySet) -> Option<FuzzySet> {
        self.0.insert(key, value)
    }

    pub fn get(&self, key: K) -> Option<&FuzzySet> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (K, &FuzzySet)> + '_ {
        self.0.iter()
    }
}

impl<K: Term> Default for Terms<K> {
    fn default() -> Self {
        Self::new()
    }
}
