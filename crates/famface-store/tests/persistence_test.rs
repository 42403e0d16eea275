//! Load and save behaviour against the storage backends.

use std::sync::Arc;

use famface_core::seed::seed_state;
use famface_core::{AppState, Error, Person, Result, SequentialIds};
use famface_store::{
    CreatePersonRequest, FamilyStore, FileBackend, MemoryBackend, StateBackend, StoreConfig,
};

const KEY: &str = "familyFacesAppState";

/// Backend whose writes always fail.
struct ReadOnlyBackend {
    blob: Option<String>,
}

impl StateBackend for ReadOnlyBackend {
    fn read(&self, _key: &str) -> Result<Option<String>> {
        Ok(self.blob.clone())
    }

    fn write(&self, _key: &str, _blob: &str) -> Result<()> {
        Err(Error::Storage("disk full".to_string()))
    }
}

/// Backend whose reads always fail.
struct UnreadableBackend;

impl StateBackend for UnreadableBackend {
    fn read(&self, _key: &str) -> Result<Option<String>> {
        Err(Error::Storage("permission denied".to_string()))
    }

    fn write(&self, _key: &str, _blob: &str) -> Result<()> {
        Ok(())
    }
}

fn persisted(backend: &MemoryBackend) -> AppState {
    let blob = backend.read(KEY).unwrap().expect("state was not persisted");
    serde_json::from_str(&blob).unwrap()
}

#[test]
fn test_missing_state_falls_back_to_seed_and_is_persisted() {
    let backend = Arc::new(MemoryBackend::new());
    let store = FamilyStore::open(backend.clone(), &StoreConfig::default());

    assert_eq!(store.state(), &seed_state());
    assert_eq!(persisted(&backend), seed_state());
}

#[test]
fn test_corrupt_state_falls_back_to_seed() {
    let backend = Arc::new(MemoryBackend::with_blob(KEY, "{ not json"));
    let store = FamilyStore::open(backend.clone(), &StoreConfig::default());

    assert_eq!(store.state(), &seed_state());
    // The corrupt blob is overwritten.
    assert_eq!(persisted(&backend), seed_state());
}

#[test]
fn test_corrupt_state_without_seeding_starts_empty() {
    let config = StoreConfig {
        seed_on_missing: false,
        ..Default::default()
    };
    let store = FamilyStore::open(MemoryBackend::with_blob(KEY, "[1, 2, 3]"), &config);
    assert!(store.state().is_empty());
}

#[test]
fn test_unreadable_backend_falls_back_to_seed() {
    let store = FamilyStore::open(UnreadableBackend, &StoreConfig::default());
    assert_eq!(store.state(), &seed_state());
}

#[test]
fn test_valid_state_is_loaded_as_is() {
    let state = AppState {
        people: vec![Person::new("x1", "Only Person")],
        ..Default::default()
    };
    let blob = serde_json::to_string(&state).unwrap();
    let store = FamilyStore::open(MemoryBackend::with_blob(KEY, blob), &StoreConfig::default());
    assert_eq!(store.state(), &state);
}

#[test]
fn test_every_mutation_is_persisted() {
    let backend = Arc::new(MemoryBackend::new());
    let mut store = FamilyStore::open_with_ids(
        backend.clone(),
        SequentialIds::new("n"),
        &StoreConfig::default(),
    );

    let person = store.add_person(CreatePersonRequest::new("Dadi")).unwrap();
    assert!(persisted(&backend).person(&person.id).is_some());

    store.delete_person("p1").unwrap();
    assert!(persisted(&backend).person("p1").is_none());
    assert_eq!(&persisted(&backend), store.state());
}

#[test]
fn test_save_failure_does_not_fail_mutation() {
    let mut store = FamilyStore::open(ReadOnlyBackend { blob: None }, &StoreConfig::default());

    let person = store.add_person(CreatePersonRequest::new("Nani")).unwrap();

    assert!(store.state().person(&person.id).is_some());
}

#[test]
fn test_file_backend_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let config = StoreConfig {
        data_dir: dir.path().to_path_buf(),
        ..Default::default()
    };

    let added = {
        let mut store = FamilyStore::open_file(&config).unwrap();
        store.delete_person("p4").unwrap();
        store.add_person(CreatePersonRequest::new("Chacha")).unwrap()
    };
    assert!(dir.path().join(format!("{}.json", KEY)).exists());

    let reopened = FamilyStore::open_file(&config).unwrap();
    let state = reopened.state();
    assert!(state.person("p4").is_none());
    assert_eq!(state.person(&added.id).map(|p| p.name.as_str()), Some("Chacha"));
    assert!(state.relationships.iter().all(|r| !r.involves("p4")));
}

#[test]
fn test_persisted_layout_uses_camel_case_keys() {
    let backend = Arc::new(MemoryBackend::new());
    let _store = FamilyStore::open(backend.clone(), &StoreConfig::default());

    let blob = backend.read(KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&blob).unwrap();
    let first_edge = &value["relationships"][0];
    assert_eq!(first_edge["person1Id"], "p1");
    assert_eq!(first_edge["relationshipType"], "child");
    assert!(value["photos"][0]["tags"][0]["photoId"].is_string());
    assert!(value["people"][0]["profileImage"].is_string());
}
