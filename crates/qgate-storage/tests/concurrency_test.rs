//! Concurrent access through a shared engine: last writer wins, nothing is lost.

use std::sync::{Arc, Barrier};
use std::thread;

use qgate_core::traits::storage::{IConditionStorage, IMetricStorage, IQualityGateStorage};
use qgate_core::types::{MetricType, NewCondition, NewMetric};
use qgate_storage::QGateStorageEngine;
use tempfile::TempDir;

const THREADS: usize = 8;

fn seeded(path: &std::path::Path) -> (Arc<QGateStorageEngine>, NewCondition) {
    let engine = QGateStorageEngine::open(path).unwrap();
    let gate = engine.insert_quality_gate("Concurrent", false).unwrap();
    let metric = engine
        .insert_metric(NewMetric::new("coverage", MetricType::Percent))
        .unwrap();
    let template = NewCondition::new()
        .quality_gate_id(gate.id)
        .metric_uuid(metric.uuid)
        .operator("LT")
        .error_threshold("50");
    (Arc::new(engine), template)
}

#[test]
fn concurrent_inserts_are_all_persisted() {
    let dir = TempDir::new().unwrap();
    let (engine, template) = seeded(&dir.path().join("inserts.db"));
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|i| {
            let engine = Arc::clone(&engine);
            let barrier = Arc::clone(&barrier);
            let new = template.clone().error_threshold(i.to_string());
            thread::spawn(move || {
                barrier.wait();
                engine.insert(new).unwrap().uuid
            })
        })
        .collect();

    let mut uuids: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    uuids.sort();
    uuids.dedup();
    assert_eq!(uuids.len(), THREADS);

    let gate_id = template.quality_gate_id.unwrap();
    assert_eq!(engine.count_for_quality_gate(gate_id).unwrap(), THREADS);
}

#[test]
fn concurrent_updates_leave_one_complete_write() {
    let dir = TempDir::new().unwrap();
    let (engine, template) = seeded(&dir.path().join("updates.db"));
    let original = engine.insert(template).unwrap();
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|i| {
            let engine = Arc::clone(&engine);
            let barrier = Arc::clone(&barrier);
            let mut changed = original.clone();
            changed.error_threshold = i.to_string();
            changed.description = Some(format!("writer {i}"));
            thread::spawn(move || {
                barrier.wait();
                engine.update(&changed).unwrap();
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let stored = engine.select_by_uuid(&original.uuid).unwrap().unwrap();
    let winner: usize = stored.error_threshold.parse().unwrap();
    assert!(winner < THREADS);
    assert_eq!(stored.description, Some(format!("writer {winner}")));
    assert_eq!(stored.created_at, original.created_at);
}

#[test]
fn readers_see_committed_writes() {
    let dir = TempDir::new().unwrap();
    let (engine, template) = seeded(&dir.path().join("readers.db"));
    let inserted = engine.insert(template).unwrap();

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let engine = Arc::clone(&engine);
            let uuid = inserted.uuid.clone();
            thread::spawn(move || engine.select_by_uuid(&uuid).unwrap())
        })
        .collect();
    for h in handles {
        assert_eq!(h.join().unwrap().as_ref(), Some(&inserted));
    }
}
