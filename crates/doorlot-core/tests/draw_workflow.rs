//! End-to-end draw workflow over real and fake stores.

use std::sync::Arc;

use doorlot_core::{
    AccountRegistry, AssignError, AssignmentRange, DoorlotError, DrawService, ExportDocument,
    ExportSettings, FsKvStore, KvStore, Selection, SystemClock,
};
use doorlot_state::fakes::MemoryKvStore;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn draw_records_for_logged_in_actor() {
    let dir = tempfile::tempdir().unwrap();
    let store: Arc<dyn KvStore> = Arc::new(FsKvStore::open(dir.path().join("store.json")).unwrap());

    let accounts = AccountRegistry::new(store.clone());
    accounts.add_user("alice", "pw", false).unwrap();
    let session = accounts.login("alice", "pw").unwrap();

    let service = DrawService::new(store.clone());
    for name in ["Alice", "Bob", "Carol"] {
        service.roster().add(name).unwrap();
    }
    let people = service.roster().list().unwrap();
    let selection = Selection::all(&people);

    let mut rng = StdRng::seed_from_u64(5);
    let outcome = service
        .draw(
            session.actor(),
            &selection,
            AssignmentRange::new(1, 3).unwrap(),
            &mut rng,
            &SystemClock,
        )
        .unwrap();
    let entry = outcome.recorded.unwrap();

    assert_eq!(entry.actor, "alice");
    assert_eq!(entry.results, outcome.results);
    assert_eq!(service.recorder().actor_log("alice").unwrap().len(), 1);
    assert_eq!(service.recorder().actor_log("anonymous").unwrap().len(), 0);
    assert_eq!(service.recorder().global_log().unwrap().len(), 1);
}

#[test]
fn rejected_draw_writes_nothing() {
    let store: Arc<dyn KvStore> = Arc::new(MemoryKvStore::new());
    let service = DrawService::new(store);
    for name in ["Alice", "Bob", "Carol"] {
        service.roster().add(name).unwrap();
    }
    let selection = Selection::all(&service.roster().list().unwrap());
    let mut rng = StdRng::seed_from_u64(5);

    let err = service
        .draw(
            "alice",
            &selection,
            AssignmentRange::new(1, 2).unwrap(),
            &mut rng,
            &SystemClock,
        )
        .unwrap_err();

    assert!(matches!(
        err,
        DoorlotError::Assign(AssignError::RangeInsufficient { .. })
    ));
    assert!(service.recorder().global_log().unwrap().is_empty());
}

#[test]
fn removed_participant_in_selection_is_unknown() {
    let store: Arc<dyn KvStore> = Arc::new(MemoryKvStore::new());
    let service = DrawService::new(store);
    let alice = service.roster().add("Alice").unwrap();
    let bob = service.roster().add("Bob").unwrap();
    let mut selection = Selection::all(&service.roster().list().unwrap());
    service.roster().remove(&bob.id).unwrap();
    let mut rng = StdRng::seed_from_u64(5);

    let err = service
        .draw(
            "alice",
            &selection,
            AssignmentRange::default(),
            &mut rng,
            &SystemClock,
        )
        .unwrap_err();
    assert!(matches!(
        err,
        DoorlotError::Assign(AssignError::UnknownParticipant(ref id)) if *id == bob.id
    ));

    // Pruning the selection makes the draw valid again.
    selection.retain_known(&service.roster().list().unwrap());
    let outcome = service
        .draw(
            "alice",
            &selection,
            AssignmentRange::default(),
            &mut rng,
            &SystemClock,
        )
        .unwrap();
    assert_eq!(outcome.results.len(), 1);
    assert_eq!(outcome.results[0].participant_id, alice.id);
}

#[test]
fn storage_failure_keeps_results_for_caller() {
    let seed: Arc<dyn KvStore> = Arc::new(MemoryKvStore::new());
    let service = DrawService::new(seed.clone());
    service.roster().add("Alice").unwrap();
    let roster_json = seed.get("people").unwrap().unwrap();

    // Same roster, but nothing else fits.
    let full = Arc::new(MemoryKvStore::with_quota("people".len() + roster_json.len()));
    full.set("people", roster_json).unwrap();
    let service = DrawService::new(full);
    let selection = Selection::all(&service.roster().list().unwrap());
    let mut rng = StdRng::seed_from_u64(5);

    let outcome = service
        .draw(
            "alice",
            &selection,
            AssignmentRange::new(1, 10).unwrap(),
            &mut rng,
            &SystemClock,
        )
        .unwrap();

    assert_eq!(outcome.results.len(), 1);
    assert!(matches!(
        outcome.recorded,
        Err(DoorlotError::StorageUnavailable(_))
    ));

    // The batch can still be exported.
    let doc = ExportDocument::from_results(
        &ExportSettings::default(),
        chrono::Utc::now(),
        &outcome.results,
    );
    assert_eq!(doc.rows[0].name, "Alice");
}
