//! Property tests checking the index against a naive model.
//!
//! The model keeps one capped `Vec` per group and rebuilds the flat view by
//! concatenating groups in first-appearance order after every step; the index
//! must agree with it after arbitrary add sequences.

use std::collections::HashMap;

use proptest::prelude::*;

use flat_buckets::{BucketIndex, GroupKey};

/// Naive reference: capped per-group lists, flat view rebuilt from scratch.
#[derive(Default)]
struct NaiveModel {
    capacity: usize,
    order: Vec<u8>,
    groups: HashMap<u8, Vec<u8>>,
}

impl NaiveModel {
    fn new(capacity: usize) -> Self {
        Self {
            capacity,
            ..Default::default()
        }
    }

    fn add(&mut self, group: u8) -> bool {
        let items = self.groups.entry(group).or_default();
        if items.len() == self.capacity {
            return false;
        }
        if items.is_empty() {
            self.order.push(group);
        }
        items.push(group);
        true
    }

    fn flat(&self) -> Vec<u8> {
        self.order
            .iter()
            .flat_map(|g| self.groups[g].iter().copied())
            .collect()
    }

    fn base_offset(&self, group: u8) -> Option<usize> {
        let mut base = 0;
        for g in &self.order {
            if *g == group {
                return Some(base);
            }
            base += self.groups[g].len();
        }
        None
    }
}

fn key_of(group: u8) -> GroupKey {
    GroupKey::from(format!("G{group}").as_str())
}

fn classify(item: &u8) -> Vec<String> {
    vec![format!("G{item}")]
}

proptest! {
    #[test]
    fn index_matches_naive_model(
        capacity in 1usize..6,
        adds in proptest::collection::vec(0u8..5, 0..80),
    ) {
        let index = BucketIndex::new(capacity, classify as fn(&u8) -> Vec<String>).unwrap();
        let mut model = NaiveModel::new(capacity);

        for group in adds {
            let expected = model.add(group);
            prop_assert_eq!(index.add(group), expected);
        }

        // Flat view agrees entry by entry.
        let flat: Vec<GroupKey> = model.flat().into_iter().map(key_of).collect();
        prop_assert_eq!(index.flat_keys(), flat);

        // First-appearance order and base offsets agree.
        let order: Vec<GroupKey> = model.order.iter().copied().map(key_of).collect();
        prop_assert_eq!(index.groups(), order);

        for group in 0u8..5 {
            let key = key_of(group);
            prop_assert_eq!(index.base_offset(&key), model.base_offset(group));
            prop_assert_eq!(
                index.group_size(&key),
                model.groups.get(&group).map(|v| v.len()).unwrap_or(0)
            );
        }
    }

    #[test]
    fn exactly_capacity_items_accepted_per_group(
        capacity in 1usize..8,
        extra in 0usize..8,
    ) {
        let index = BucketIndex::new(capacity, classify as fn(&u8) -> Vec<String>).unwrap();

        for i in 0..capacity + extra {
            let accepted = index.add(7u8);
            prop_assert_eq!(accepted, i < capacity);
        }

        prop_assert_eq!(index.group_size(&key_of(7)), capacity);
        prop_assert_eq!(index.len(), capacity);
    }

    #[test]
    fn base_offsets_partition_the_flat_view(
        adds in proptest::collection::vec(0u8..6, 1..100),
    ) {
        let index = BucketIndex::new(4, classify as fn(&u8) -> Vec<String>).unwrap();
        for group in adds {
            index.add(group);
        }

        let flat = index.flat_keys();
        let mut expected_base = 0;
        for key in index.groups() {
            let size = index.group_size(&key);
            let base = index.base_offset(&key).unwrap();
            prop_assert_eq!(base, expected_base);

            // Contiguous run of exactly `size` entries.
            for pos in base..base + size {
                prop_assert_eq!(&flat[pos], &key);
            }
            expected_base += size;
        }
        prop_assert_eq!(flat.len(), expected_base);
    }
}
