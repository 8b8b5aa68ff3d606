use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;

use derivative::Derivative;

const DEFAULT_SET_CAPACITY: usize = 64;

/// An unordered set of identifiers.
#[derive(Derivative)]
#[derivative(Debug(bound = "T: fmt::Debug"), Clone(bound = "T: Clone"))]
pub struct Set<T> {
    items: HashSet<T>,
}

impl<T: Eq + Hash> Set<T> {
    pub fn new() -> Self {
        Self {
            items: HashSet::with_capacity(DEFAULT_SET_CAPACITY),
        }
    }

    /// Inserts `id`, returning false if it was already present.
    pub fn add(&mut self, id: T) -> bool {
        self.items.insert(id)
    }

    pub fn has(&self, id: &T) -> bool {
        self.items.contains(id)
    }

    /// Removes `id`, returning whether it was present.
    pub fn remove(&mut self, id: &T) -> bool {
        self.items.remove(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Lists all members in an unspecified order.
    pub fn list(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.items.iter().cloned().collect()
    }
}

impl<T: Eq + Hash> Default for Set<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Eq + Hash> FromIterator<T> for Set<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T: fmt::Display> fmt::Display for Set<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Set size={} data=", self.items.len())?;
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{item}")?;
        }
        f.write_str(" />")
    }
}
