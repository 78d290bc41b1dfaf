//! Identity-keyed containers
//!
//! Schema nodes are shared through `Arc`s and compared by object identity:
//! two navigation properties that happen to have equal names on different
//! types are distinct keys. A structural-equality map would merge them, so
//! the resolution caches key on the allocation address instead.

use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Hash map / set key comparing by `Arc` pointer identity
pub struct IdentityKey<T>(Arc<T>);

impl<T> IdentityKey<T> {
    /// Create a key for the given shared value
    pub fn new(value: &Arc<T>) -> Self {
        Self(Arc::clone(value))
    }

    /// The keyed value
    pub fn get(&self) -> &Arc<T> {
        &self.0
    }
}

impl<T> Clone for IdentityKey<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T> PartialEq for IdentityKey<T> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Eq for IdentityKey<T> {}

impl<T> Hash for IdentityKey<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (Arc::as_ptr(&self.0) as usize).hash(state);
    }
}

impl<T> fmt::Debug for IdentityKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IdentityKey({:p})", Arc::as_ptr(&self.0))
    }
}

/// Unique-membership container keyed by object identity
///
/// Used for "visited" bookkeeping during resolution walks. Iteration order
/// is unspecified.
#[derive(Debug)]
pub struct IdentitySet<T> {
    entries: HashSet<IdentityKey<T>>,
}

impl<T> IdentitySet<T> {
    /// Create an empty set
    pub fn new() -> Self {
        Self {
            entries: HashSet::new(),
        }
    }

    /// Insert a value; returns whether it was newly added
    pub fn insert(&mut self, value: &Arc<T>) -> bool {
        self.entries.insert(IdentityKey::new(value))
    }

    /// Check membership
    pub fn contains(&self, value: &Arc<T>) -> bool {
        self.entries.contains(&IdentityKey::new(value))
    }

    /// Remove a value; removing an absent value is a no-op
    pub fn remove(&mut self, value: &Arc<T>) -> bool {
        self.entries.remove(&IdentityKey::new(value))
    }

    /// Number of distinct values
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the set is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the values in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<T>> {
        self.entries.iter().map(IdentityKey::get)
    }
}

impl<T> Default for IdentitySet<T> {
    fn default() -> Self {
        Self::new()
    }
}
