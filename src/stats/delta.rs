//! Item Delta Module
//!
//! Computes the set of added, removed and modified items between two
//! catalog snapshots, compared by id.

use std::collections::{HashMap, HashSet};

use crate::models::Item;

// == Item Delta ==
/// Difference between a previous and a current item collection.
///
/// Removed entries carry the item as recorded in the previous snapshot, so
/// the price subtracted from the running totals is the one that was added.
#[derive(Debug, Clone, Default)]
pub struct ItemDelta {
    /// Items present only in the current collection
    pub added: Vec<Item>,
    /// Items present only in the previous collection
    pub removed: Vec<Item>,
    /// (previous, current) pairs whose price differs
    pub modified: Vec<(Item, Item)>,
}

impl ItemDelta {
    // == Diff ==
    /// Diffs two snapshots by item id.
    ///
    /// Items present in both with an unchanged price contribute nothing.
    pub fn between(previous: &[Item], current: &[Item]) -> Self {
        let previous_by_id: HashMap<u64, &Item> =
            previous.iter().map(|item| (item.id, item)).collect();
        let current_ids: HashSet<u64> = current.iter().map(|item| item.id).collect();

        let removed = previous
            .iter()
            .filter(|item| !current_ids.contains(&item.id))
            .cloned()
            .collect();

        let mut added = Vec::new();
        let mut modified = Vec::new();
        for item in current {
            match previous_by_id.get(&item.id) {
                None => added.push(item.clone()),
                Some(prev) if prev.price != item.price => {
                    modified.push(((*prev).clone(), item.clone()));
                }
                Some(_) => {}
            }
        }

        Self {
            added,
            removed,
            modified,
        }
    }

    // == Size ==
    /// Total number of changed items.
    pub fn len(&self) -> usize {
        self.added.len() + self.removed.len() + self.modified.len()
    }

    /// True when the snapshots are identical by id and price.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn items(pairs: &[(u64, f64)]) -> Vec<Item> {
        pairs
            .iter()
            .map(|(id, price)| Item::new(*id, format!("item-{id}"), *price))
            .collect()
    }

    #[test]
    fn test_identical_snapshots_empty_delta() {
        let a = items(&[(1, 100.0), (2, 200.0)]);
        let delta = ItemDelta::between(&a, &a);
        assert!(delta.is_empty());
    }

    #[test]
    fn test_detects_addition() {
        let prev = items(&[(1, 100.0)]);
        let curr = items(&[(1, 100.0), (2, 200.0)]);
        let delta = ItemDelta::between(&prev, &curr);

        assert_eq!(delta.added.len(), 1);
        assert_eq!(delta.added[0].id, 2);
        assert!(delta.removed.is_empty());
        assert!(delta.modified.is_empty());
    }

    #[test]
    fn test_detects_removal_with_old_price() {
        let prev = items(&[(1, 100.0), (2, 200.0)]);
        let curr = items(&[(2, 200.0)]);
        let delta = ItemDelta::between(&prev, &curr);

        assert_eq!(delta.removed.len(), 1);
        assert_eq!(delta.removed[0].id, 1);
        assert_eq!(delta.removed[0].price, 100.0);
    }

    #[test]
    fn test_detects_price_modification() {
        let prev = items(&[(1, 100.0)]);
        let curr = items(&[(1, 150.0)]);
        let delta = ItemDelta::between(&prev, &curr);

        assert_eq!(delta.modified.len(), 1);
        let (old, new) = &delta.modified[0];
        assert_eq!(old.price, 100.0);
        assert_eq!(new.price, 150.0);
    }

    #[test]
    fn test_rename_without_price_change_is_ignored() {
        // Only price feeds the aggregate, so a renamed item is not a change
        let prev = items(&[(1, 100.0)]);
        let mut curr = items(&[(1, 100.0)]);
        curr[0].name = "renamed".to_string();

        let delta = ItemDelta::between(&prev, &curr);
        assert!(delta.is_empty());
    }

    #[test]
    fn test_mixed_delta_len() {
        let prev = items(&[(1, 100.0), (2, 200.0), (3, 300.0)]);
        let curr = items(&[(2, 250.0), (3, 300.0), (4, 400.0), (5, 500.0)]);
        let delta = ItemDelta::between(&prev, &curr);

        assert_eq!(delta.removed.len(), 1); // id 1
        assert_eq!(delta.added.len(), 2); // ids 4, 5
        assert_eq!(delta.modified.len(), 1); // id 2
        assert_eq!(delta.len(), 4);
    }
}
