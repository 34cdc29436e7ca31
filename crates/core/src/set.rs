//! Case-insensitive string set.
//!
//! `InvariantSet` stores each value once under its case-folded key while
//! keeping the casing of the first insertion for enumeration. Membership,
//! equality and enumeration all use the same folding rule, so a set never
//! holds two values that differ only in case.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use hashbrown::HashMap;

/// Value rendered for a true membership test.
pub const TRUE_VALUE: &str = "True";

/// Value rendered for a false membership test.
pub const FALSE_VALUE: &str = "False";

/// Returns the case-folded form used for comparisons.
#[inline]
pub fn fold_case(value: &str) -> String {
    value.to_lowercase()
}

/// A set of strings compared case-insensitively.
#[derive(Clone, Default)]
pub struct InvariantSet {
    /// Folded key -> value as first inserted
    entries: HashMap<String, String>,
}

impl InvariantSet {
    /// Creates an empty set.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty set with room for `capacity` values.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
        }
    }

    /// Creates the set of boolean literals, `{"True", "False"}`.
    pub fn boolean() -> Self {
        [TRUE_VALUE, FALSE_VALUE].into_iter().collect()
    }

    /// Adds a value. Returns false if an equivalent value was already present,
    /// in which case the stored casing is kept.
    pub fn insert(&mut self, value: impl Into<String>) -> bool {
        let value = value.into();
        let key = fold_case(&value);
        if self.entries.contains_key(&key) {
            return false;
        }
        self.entries.insert(key, value);
        true
    }

    /// Returns true if the set contains a value equal to `value` ignoring case.
    #[inline]
    pub fn contains(&self, value: &str) -> bool {
        self.entries.contains_key(&fold_case(value))
    }

    /// Returns the stored form of `value`, if present.
    pub fn get(&self, value: &str) -> Option<&str> {
        self.entries.get(&fold_case(value)).map(String::as_str)
    }

    /// Removes a value. Returns true if it was present.
    pub fn remove(&mut self, value: &str) -> bool {
        self.entries.remove(&fold_case(value)).is_some()
    }

    /// Returns the number of values.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the set has no values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes all values.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterates over the stored values.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.entries.values(),
        }
    }

    /// Copies the values into an owned vector.
    pub fn to_vec(&self) -> Vec<String> {
        self.entries.values().cloned().collect()
    }

    /// Copies the values into a vector sorted by folded key.
    pub fn to_sorted_vec(&self) -> Vec<String> {
        let mut keys: Vec<&String> = self.entries.keys().collect();
        keys.sort_unstable();
        keys.into_iter().map(|k| self.entries[k].clone()).collect()
    }

    /// Iterates over values in `self` that are not in `other`.
    pub fn difference<'a>(&'a self, other: &'a InvariantSet) -> impl Iterator<Item = &'a str> + 'a {
        self.entries
            .iter()
            .filter(move |(key, _)| !other.entries.contains_key(*key))
            .map(|(_, value)| value.as_str())
    }

    /// Returns true if every value in `self` is also in `other`.
    pub fn is_subset(&self, other: &InvariantSet) -> bool {
        self.len() <= other.len() && self.entries.keys().all(|k| other.entries.contains_key(k))
    }
}

impl PartialEq for InvariantSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.is_subset(other)
    }
}

impl Eq for InvariantSet {}

impl fmt::Debug for InvariantSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<S: Into<String>> FromIterator<S> for InvariantSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = InvariantSet::new();
        set.extend(iter);
        set
    }
}

impl<S: Into<String>> Extend<S> for InvariantSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a> IntoIterator for &'a InvariantSet {
    type Item = &'a str;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the values of an [`InvariantSet`].
pub struct Iter<'a> {
    inner: hashbrown::hash_map::Values<'a, String, String>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a str;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(String::as_str)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}
