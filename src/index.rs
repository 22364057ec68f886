//! Partitioned, order-preserving bucket index.
//!
//! [`BucketIndex`] groups items into capacity-bounded buckets keyed by their
//! classification, while maintaining a flat virtual ordering equivalent to the
//! concatenation of all buckets in first-appearance order. Callers get the
//! per-group bounded lists and the flat view from the same structure without
//! re-scanning all groups on every insert.
//!
//! Layout after seven accepted items across three keys (capacity 4):
//!
//! ```text
//!          -----------------
//! "A" =>   | 0 | 1 | 2 | 3 |
//!          -----------------
//! "B" =>   | 4 |
//!          ---------
//! "C" =>   | 5 | 6 |
//!          ---------
//!
//! flat:    | A | A | A | A | B | C | C |
//! bases:   ("A", 0) ("B", 4) ("C", 5)
//! ```

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::bucket::{BoundedBucket, BucketError};
use crate::classify::{Classifier, GroupKey};
use crate::error::Result;

/// The three coupled structures behind one lock.
///
/// `add` updates all three together, so they live in a single guarded state:
/// readers never observe a flat entry without its base-offset adjustment, and
/// two writers racing on a brand-new key cannot both create its bucket.
struct IndexState<T> {
    /// Registry: one bucket per group key, created lazily, never removed.
    buckets: HashMap<GroupKey, BoundedBucket<T>>,

    /// Flat sequence: entry at flat position `i` names the group owning the
    /// item that logically occupies position `i`.
    flat: Vec<GroupKey>,

    /// Base-offset table in first-appearance order: `(key, base)` where
    /// `base` is the flat position of that group's first item.
    base_offsets: Vec<(GroupKey, usize)>,

    /// Group key to its slot in `base_offsets`, fixed for life once assigned.
    base_slots: HashMap<GroupKey, usize>,
}

impl<T> IndexState<T> {
    fn empty() -> Self {
        Self {
            buckets: HashMap::new(),
            flat: Vec::new(),
            base_offsets: Vec::new(),
            base_slots: HashMap::new(),
        }
    }
}

/// Partitioned index over capacity-bounded buckets with a flat view.
///
/// Items are routed by the injected classifier into one bucket per derived
/// [`GroupKey`], every bucket sharing the `max_bucket_size` fixed at
/// construction. Alongside the buckets the index maintains the flat sequence
/// and the per-group base offsets incrementally, so flat-position lookups and
/// base-offset lookups stay O(1) on the read side.
///
/// The structure is append-only: no removal, re-ordering, or merging of
/// groups. A full bucket refuses further items, signalled by `add` returning
/// `false`.
///
/// All methods take `&self`; the whole `add` path runs under one write lock,
/// so concurrent callers see each add as a unit.
pub struct BucketIndex<T, C> {
    classifier: C,
    max_bucket_size: usize,
    state: RwLock<IndexState<T>>,
}

impl<T, C: Classifier<T>> BucketIndex<T, C> {
    /// Create an index whose buckets all hold at most `max_bucket_size` items.
    ///
    /// # Arguments
    /// * `max_bucket_size` - Capacity shared by every bucket (must be > 0)
    /// * `classifier` - Deterministic item-to-providers mapping
    ///
    /// # Returns
    /// The index, or [`BucketError::InvalidCapacity`] for a zero capacity.
    pub fn new(max_bucket_size: usize, classifier: C) -> Result<Self> {
        if max_bucket_size == 0 {
            return Err(BucketError::InvalidCapacity(max_bucket_size).into());
        }

        Ok(Self {
            classifier,
            max_bucket_size,
            state: RwLock::new(IndexState::empty()),
        })
    }

    /// Classify `item` and append it to its group's bucket.
    ///
    /// A new key's bucket and base-table entry are created on first add. When
    /// an existing group grows, every group that first appeared after it has
    /// its base offset pushed forward by one; the growing group's own base
    /// never moves. The flat sequence gains one entry at the end of the
    /// group's contiguous run.
    ///
    /// # Returns
    /// `true` if accepted, `false` if the destination bucket was already at
    /// capacity. A refused add mutates nothing.
    pub fn add(&self, item: T) -> bool {
        let key = self.classifier.group_key(&item);

        let mut state = self.state.write();

        let before;
        let after;
        {
            let bucket = state
                .buckets
                .entry(key.clone())
                .or_insert_with(|| BoundedBucket::new(self.max_bucket_size));

            before = bucket.len();
            if !bucket.push(item) {
                return false;
            }
            after = bucket.len();
        }

        // A bucket only ever grows, and only by the item just pushed.
        debug_assert_eq!(after, before + 1, "bucket for {key} grew by != 1");

        let base = match state.base_slots.get(&key).copied() {
            None => {
                // First appearance: base = previous key's base + its current
                // size. No key between two consecutive first-appearances can
                // still be open for growth below this point, so the formula
                // is evaluated once, with sizes as of this instant.
                let slot = state.base_offsets.len();
                let base = match state.base_offsets.last() {
                    None => 0,
                    Some((prev_key, prev_base)) => {
                        let prev_size = state
                            .buckets
                            .get(prev_key)
                            .map(BoundedBucket::len)
                            .unwrap_or(0);
                        prev_base + prev_size
                    }
                };
                state.base_slots.insert(key.clone(), slot);
                state.base_offsets.push((key.clone(), base));
                base
            }
            Some(slot) => {
                // Existing group grew by one: every later group's virtual
                // start moves forward by one. Entries at or before `slot`
                // are untouched.
                let base = state.base_offsets[slot].1;
                for entry in state.base_offsets.iter_mut().skip(slot + 1) {
                    entry.1 += 1;
                }
                base
            }
        };

        // The group's run currently spans [base, base + after - 1); the new
        // item lands at its end, keeping the run contiguous.
        state.flat.insert(base + after - 1, key);

        true
    }

    /// Total accepted items, equal to the flat sequence length.
    pub fn len(&self) -> usize {
        self.state.read().flat.len()
    }

    /// Whether no item has been accepted yet.
    pub fn is_empty(&self) -> bool {
        self.state.read().flat.is_empty()
    }

    /// Group key owning the item at flat position `flat_pos`.
    pub fn group_at(&self, flat_pos: usize) -> Option<GroupKey> {
        self.state.read().flat.get(flat_pos).cloned()
    }

    /// Flat position at which `key`'s contiguous run begins.
    ///
    /// `None` if no item has ever been accepted for `key`.
    pub fn base_offset(&self, key: &GroupKey) -> Option<usize> {
        let state = self.state.read();
        let slot = state.base_slots.get(key)?;
        Some(state.base_offsets[*slot].1)
    }

    /// Current item count for `key`, 0 for keys never seen.
    pub fn group_size(&self, key: &GroupKey) -> usize {
        self.state
            .read()
            .buckets
            .get(key)
            .map(BoundedBucket::len)
            .unwrap_or(0)
    }

    /// Number of distinct group keys seen so far.
    pub fn group_count(&self) -> usize {
        self.state.read().base_offsets.len()
    }

    /// Group keys in first-appearance order.
    pub fn groups(&self) -> Vec<GroupKey> {
        self.state
            .read()
            .base_offsets
            .iter()
            .map(|(key, _)| key.clone())
            .collect()
    }

    /// Snapshot of the flat sequence.
    pub fn flat_keys(&self) -> Vec<GroupKey> {
        self.state.read().flat.clone()
    }

    /// Capacity shared by every bucket.
    pub fn max_bucket_size(&self) -> usize {
        self.max_bucket_size
    }
}

impl<T: Clone, C: Classifier<T>> BucketIndex<T, C> {
    /// Items currently in `key`'s bucket, in insertion order.
    ///
    /// Empty for keys never seen.
    pub fn group_items(&self, key: &GroupKey) -> Vec<T> {
        self.state
            .read()
            .buckets
            .get(key)
            .map(|bucket| bucket.iter().cloned().collect())
            .unwrap_or_default()
    }
}
