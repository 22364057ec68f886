//! Capacity-bounded, insertion-ordered item container.
//!
//! One bucket holds the items of a single group key, capped at a capacity
//! fixed when the bucket is created. Buckets are append-only: there is no
//! removal, so a bucket's length never decreases.

use thiserror::Error;

/// Errors specific to the bucket layer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BucketError {
    /// Bucket capacity must be greater than zero.
    #[error("invalid bucket capacity {0}: must be greater than 0")]
    InvalidCapacity(usize),
}

/// Ordered container for one group's items, capped at a fixed capacity.
///
/// Capacity is immutable after creation. A full bucket refuses further items
/// instead of evicting or erroring; refusal is signalled through the boolean
/// result of [`BoundedBucket::push`].
#[derive(Debug, Clone)]
pub struct BoundedBucket<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T> BoundedBucket<T> {
    /// Create an empty bucket with the given capacity.
    ///
    /// Capacity validation is owned by the index constructor, which rejects a
    /// zero capacity before any bucket exists.
    pub fn new(capacity: usize) -> Self {
        Self {
            items: Vec::new(),
            capacity,
        }
    }

    /// Append an item, preserving insertion order.
    ///
    /// # Returns
    /// `true` if the item was accepted, `false` if the bucket is already at
    /// capacity (in which case the bucket is unchanged).
    pub fn push(&mut self, item: T) -> bool {
        if self.items.len() == self.capacity {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Current item count, monotonically non-decreasing.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the bucket holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The fixed capacity this bucket was created with.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether the bucket has reached capacity.
    pub fn is_full(&self) -> bool {
        self.items.len() == self.capacity
    }

    /// Item at local position `index`, in insertion order.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Iterate items in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_within_capacity() {
        let mut bucket = BoundedBucket::new(3);
        assert!(bucket.push("a"));
        assert!(bucket.push("b"));
        assert_eq!(bucket.len(), 2);
        assert!(!bucket.is_full());
    }

    #[test]
    fn test_push_refused_at_capacity() {
        let mut bucket = BoundedBucket::new(2);
        assert!(bucket.push(1));
        assert!(bucket.push(2));
        assert!(bucket.is_full());

        // Refusal leaves the bucket unchanged.
        assert!(!bucket.push(3));
        assert_eq!(bucket.len(), 2);
        assert_eq!(bucket.get(0), Some(&1));
        assert_eq!(bucket.get(1), Some(&2));
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut bucket = BoundedBucket::new(4);
        for item in ["w", "x", "y"] {
            assert!(bucket.push(item));
        }
        let collected: Vec<_> = bucket.iter().copied().collect();
        assert_eq!(collected, vec!["w", "x", "y"]);
    }

    #[test]
    fn test_capacity_one() {
        let mut bucket = BoundedBucket::new(1);
        assert!(bucket.push(42));
        assert!(!bucket.push(43));
        assert_eq!(bucket.len(), 1);
    }
}
