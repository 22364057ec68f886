//! Item classification and group key derivation.
//!
//! Items are routed to buckets by an injected [`Classifier`], which maps an
//! item to an ordered list of provider identifiers. The [`GroupKey`] is the
//! concatenation of those identifiers in the returned order, so two items
//! share a bucket exactly when their classified provider sequences match.

use std::fmt;

/// Derived classification key identifying which bucket an item belongs to.
///
/// The key is the in-order concatenation of provider identifiers, so provider
/// ordering is part of the key: two items classified to the same provider
/// *set* but in a different *order* get different keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupKey(String);

impl GroupKey {
    /// Build a key by concatenating provider identifiers in the given order.
    pub fn from_providers<I, S>(providers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut key = String::new();
        for provider in providers {
            key.push_str(provider.as_ref());
        }
        GroupKey(key)
    }

    /// The concatenated key text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GroupKey {
    fn from(s: &str) -> Self {
        GroupKey(s.to_owned())
    }
}

/// Maps an item to its ordered provider identifiers.
///
/// Implementations must be deterministic for a given item across calls, and
/// side-effect-free from the index's viewpoint. Non-determinism would
/// retroactively break the contiguity of already-placed items, so a classifier
/// that consults mutable global state is not a valid implementation.
///
/// The classifier is injected into [`crate::index::BucketIndex`] at
/// construction rather than looked up through any process-wide registry, so
/// indexes are testable with fixed classifiers.
pub trait Classifier<T> {
    /// Ordered provider identifiers for `item`.
    fn providers(&self, item: &T) -> Vec<String>;

    /// Derived group key for `item`.
    ///
    /// Provided method; implementors only supply [`Classifier::providers`].
    fn group_key(&self, item: &T) -> GroupKey {
        GroupKey::from_providers(self.providers(item))
    }
}

/// Closures work as classifiers, which keeps tests and small callers terse.
impl<T, F> Classifier<T> for F
where
    F: Fn(&T) -> Vec<String>,
{
    fn providers(&self, item: &T) -> Vec<String> {
        self(item)
    }
}
