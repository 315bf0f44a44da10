//! Property: listing a gate returns exactly its conditions, in insertion order.

use std::sync::Arc;

use proptest::prelude::*;
use qgate_core::traits::storage::{IConditionStorage, IQualityGateStorage};
use qgate_core::types::NewCondition;
use qgate_core::ManualClock;
use qgate_storage::QGateStorageEngine;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn listing_matches_inserts(
        // Each entry picks one of three gates; step 0 forces timestamp ties.
        gates in prop::collection::vec(0usize..3, 0..40),
        step in 0i64..3,
    ) {
        let engine = QGateStorageEngine::open_in_memory()
            .unwrap()
            .with_clock(Arc::new(ManualClock::new(0, step)));
        let gate_ids: Vec<i64> = ["a", "b", "c"]
            .iter()
            .map(|name| engine.insert_quality_gate(name, false).unwrap().id)
            .collect();

        let mut expected: Vec<Vec<String>> = vec![Vec::new(); 3];
        for (i, &g) in gates.iter().enumerate() {
            let inserted = engine
                .insert(
                    NewCondition::new()
                        .quality_gate_id(gate_ids[g])
                        .legacy_metric_id(1)
                        .operator("GT")
                        .error_threshold(i.to_string()),
                )
                .unwrap();
            expected[g].push(inserted.uuid);
        }

        for (g, &gate_id) in gate_ids.iter().enumerate() {
            let listed = engine.select_for_quality_gate(gate_id).unwrap();
            prop_assert!(listed.windows(2).all(|w| w[0].created_at <= w[1].created_at));
            let uuids: Vec<String> = listed.into_iter().map(|c| c.uuid).collect();
            prop_assert_eq!(&uuids, &expected[g]);
            prop_assert_eq!(engine.count_for_quality_gate(gate_id).unwrap(), expected[g].len());
        }
    }
}
