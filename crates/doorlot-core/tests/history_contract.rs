//! Contract tests for HistoryRecorder: both logs move together.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use doorlot_core::{
    AssignmentResult, DoorlotError, FixedClock, HistoryRecorder, SystemClock,
};
use doorlot_state::fakes::MemoryKvStore;
use doorlot_state::{keys, FsKvStore, KvStore};

fn results() -> Vec<AssignmentResult> {
    ["Alice", "Bob", "Carol"]
        .iter()
        .enumerate()
        .map(|(i, name)| AssignmentResult {
            participant_id: format!("p{i}"),
            name: name.to_string(),
            slot: (i as i64) + 1,
        })
        .collect()
}

#[test]
fn record_on_empty_logs_creates_one_entry_in_each() {
    let recorder = HistoryRecorder::new(Arc::new(MemoryKvStore::new()));

    recorder.record("alice", &results(), &SystemClock).unwrap();

    let actor_log = recorder.actor_log("alice").unwrap();
    let global_log = recorder.global_log().unwrap();
    assert_eq!(actor_log.len(), 1);
    assert_eq!(global_log.len(), 1);
    assert_eq!(actor_log[0].results, results());
    assert_eq!(global_log[0].results, results());
}

#[test]
fn new_entry_is_last_with_timestamp_inside_call() {
    let recorder = HistoryRecorder::new(Arc::new(MemoryKvStore::new()));
    recorder.record("alice", &[], &SystemClock).unwrap();
    recorder.record("bob", &[], &SystemClock).unwrap();

    let start = Utc::now();
    let entry = recorder.record("alice", &results(), &SystemClock).unwrap();
    let end = Utc::now();

    assert!(entry.timestamp >= start && entry.timestamp <= end);

    let actor_log = recorder.actor_log("alice").unwrap();
    let global_log = recorder.global_log().unwrap();
    assert_eq!(actor_log.len(), 2);
    assert_eq!(global_log.len(), 3);
    assert_eq!(actor_log.last(), Some(&entry));
    assert_eq!(global_log.last(), Some(&entry));
}

#[test]
fn earlier_entries_are_never_rewritten() {
    let recorder = HistoryRecorder::new(Arc::new(MemoryKvStore::new()));
    let first = recorder
        .record("alice", &results(), &FixedClock(Utc::now()))
        .unwrap();
    recorder.record("alice", &[], &SystemClock).unwrap();

    assert_eq!(recorder.actor_log("alice").unwrap()[0], first);
    assert_eq!(recorder.global_log().unwrap()[0], first);
}

#[test]
fn full_store_fails_without_touching_either_log() {
    // Room for one empty batch, not a second one with three results.
    let store = Arc::new(MemoryKvStore::with_quota(300));
    let recorder = HistoryRecorder::new(store.clone());
    let clock = FixedClock(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    recorder.record("alice", &[], &clock).unwrap();
    let actor_before = store.get(&keys::actor_history("alice")).unwrap();
    let global_before = store.get(keys::GLOBAL_HISTORY).unwrap();

    let err = recorder
        .record("alice", &results(), &clock)
        .unwrap_err();

    assert!(matches!(err, DoorlotError::StorageUnavailable(_)));
    assert_eq!(store.get(&keys::actor_history("alice")).unwrap(), actor_before);
    assert_eq!(store.get(keys::GLOBAL_HISTORY).unwrap(), global_before);
}

#[test]
fn file_store_history_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");

    {
        let store = Arc::new(FsKvStore::open(&path).unwrap());
        HistoryRecorder::new(store)
            .record("alice", &results(), &SystemClock)
            .unwrap();
    }

    let reopened = HistoryRecorder::new(Arc::new(FsKvStore::open(&path).unwrap()));
    assert_eq!(reopened.actor_log("alice").unwrap().len(), 1);
    assert_eq!(reopened.global_log().unwrap().len(), 1);
    assert_eq!(reopened.global_log().unwrap()[0].results, results());
}
