//! Property-Based Tests for the Stats Module
//!
//! Uses proptest to verify that the incremental path always lands on the
//! same totals a full rescan would produce.

use proptest::prelude::*;

use crate::models::Item;
use crate::stats::{ItemDelta, RunningTotals};

// == Strategies ==
/// Generates a collection with unique ids and whole-dollar prices.
///
/// Integer prices keep the f64 arithmetic exact, so the comparison below
/// needs no epsilon.
fn collection_strategy() -> impl Strategy<Value = Vec<Item>> {
    prop::collection::hash_map(0u64..40, 0u32..10_000, 0..30).prop_map(|by_id| {
        by_id
            .into_iter()
            .map(|(id, dollars)| Item::new(id, format!("item-{id}"), f64::from(dollars)))
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // For any previous and current collection, totals seeded from the
    // previous one plus the applied diff equal totals rescanned from the
    // current one, regardless of how the two collections overlap.
    #[test]
    fn prop_incremental_apply_matches_rescan(
        previous in collection_strategy(),
        current in collection_strategy(),
    ) {
        let mut totals = RunningTotals::from_items(&previous);
        let delta = ItemDelta::between(&previous, &current);

        for item in &delta.removed {
            totals.remove(item);
        }
        for item in &delta.added {
            totals.add(item);
        }
        for (old, new) in &delta.modified {
            totals.modify(old, new);
        }

        let rescanned = RunningTotals::from_items(&current);
        prop_assert_eq!(totals.count, rescanned.count);
        prop_assert_eq!(totals.price_sum, rescanned.price_sum);
    }

    // The derived average is always sum/count, with an empty collection
    // pinned to zero rather than NaN.
    #[test]
    fn prop_aggregate_average_is_consistent(collection in collection_strategy()) {
        let totals = RunningTotals::from_items(&collection);
        let stats = totals.aggregate();

        prop_assert_eq!(stats.total, collection.len() as u64);
        if collection.is_empty() {
            prop_assert_eq!(stats.average_price, 0.0);
        } else {
            prop_assert_eq!(stats.average_price, totals.price_sum / totals.count as f64);
        }
    }

    // Diffing a collection against itself is always empty.
    #[test]
    fn prop_delta_self_is_empty(collection in collection_strategy()) {
        let delta = ItemDelta::between(&collection, &collection);
        prop_assert!(delta.is_empty());
    }
}
