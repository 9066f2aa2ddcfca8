//! Draw history: append-only actor and global logs in a [`KvStore`].

use std::sync::Arc;

use doorlot_state::{encode_json, keys, read_json, KvStore};

use crate::clock::Clock;
use crate::domain::{AssignmentResult, HistoryEntry, Result};

/// Records completed draws into the per-actor log and the global log.
///
/// Both logs are rewritten by a single `set_many` call, so a reader sees
/// either neither append or both. Entries are never edited or removed.
pub struct HistoryRecorder {
    store: Arc<dyn KvStore>,
}

impl HistoryRecorder {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    /// Append a batch for `actor`, stamped with `clock.now()`.
    ///
    /// On a storage failure nothing is written and the caller still holds
    /// `results`; the error is returned as-is and never retried.
    pub fn record(
        &self,
        actor: &str,
        results: &[AssignmentResult],
        clock: &dyn Clock,
    ) -> Result<HistoryEntry> {
        let actor_key = keys::actor_history(actor);
        let mut actor_log = self.read_log(&actor_key)?;
        let mut global_log = self.read_log(keys::GLOBAL_HISTORY)?;

        let entry = HistoryEntry {
            actor: actor.to_string(),
            timestamp: clock.now(),
            results: results.to_vec(),
        };
        actor_log.push(entry.clone());
        global_log.push(entry.clone());

        let batch = vec![
            (actor_key, encode_json(&actor_log)?),
            (keys::GLOBAL_HISTORY.to_string(), encode_json(&global_log)?),
        ];
        if let Err(e) = self.store.set_many(batch) {
            crate::obs::emit_history_record_failed(actor, &e);
            return Err(e.into());
        }

        crate::obs::emit_history_recorded(actor, actor_log.len(), global_log.len());
        Ok(entry)
    }

    /// Every draw by `actor`, oldest first.
    pub fn actor_log(&self, actor: &str) -> Result<Vec<HistoryEntry>> {
        self.read_log(&keys::actor_history(actor))
    }

    /// Every draw by anyone, oldest first.
    pub fn global_log(&self) -> Result<Vec<HistoryEntry>> {
        self.read_log(keys::GLOBAL_HISTORY)
    }

    fn read_log(&self, key: &str) -> Result<Vec<HistoryEntry>> {
        Ok(read_json(self.store.as_ref(), key)?.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::TimeZone;
    use doorlot_state::fakes::MemoryKvStore;

    fn batch() -> Vec<AssignmentResult> {
        vec![AssignmentResult {
            participant_id: "p0".to_string(),
            name: "Alice".to_string(),
            slot: 2,
        }]
    }

    #[test]
    fn test_record_uses_clock() {
        let store = Arc::new(MemoryKvStore::new());
        let recorder = HistoryRecorder::new(store);
        let at = chrono::Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap();

        let entry = recorder.record("alice", &batch(), &FixedClock(at)).unwrap();
        assert_eq!(entry.timestamp, at);
        assert_eq!(entry.actor, "alice");
    }

    #[test]
    fn test_actor_logs_are_separate() {
        let store = Arc::new(MemoryKvStore::new());
        let recorder = HistoryRecorder::new(store);
        let clock = FixedClock(chrono::Utc::now());

        recorder.record("alice", &batch(), &clock).unwrap();
        recorder.record("bob", &batch(), &clock).unwrap();

        assert_eq!(recorder.actor_log("alice").unwrap().len(), 1);
        assert_eq!(recorder.actor_log("bob").unwrap().len(), 1);
        assert_eq!(recorder.global_log().unwrap().len(), 2);
    }

    #[test]
    fn test_corrupt_log_is_not_reset() {
        let store = Arc::new(MemoryKvStore::new());
        store
            .set(keys::GLOBAL_HISTORY, "garbage".to_string())
            .unwrap();
        let recorder = HistoryRecorder::new(store.clone());

        let err = recorder
            .record("alice", &batch(), &FixedClock(chrono::Utc::now()))
            .unwrap_err();
        assert!(matches!(err, crate::DoorlotError::CorruptData(_)));
        assert_eq!(
            store.get(keys::GLOBAL_HISTORY).unwrap().as_deref(),
            Some("garbage")
        );
    }
}
