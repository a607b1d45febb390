use super::*;

fn ravi() -> StudentRecord {
    StudentRecord {
        id: StudentId::from("id_ravi"),
        name: "Ravi".into(),
        age: 19,
        email: "ravi@x.com".into(),
    }
}

fn fields(name: &str, age: u32, email: &str) -> StudentFields {
    StudentFields {
        name: name.into(),
        age,
        email: email.into(),
    }
}

fn fresh_store() -> RecordStore<MemoryStorage> {
    RecordStore::load(MemoryStorage::new(), DEFAULT_STORAGE_KEY)
}

#[test]
fn missing_slot_loads_seed_records() {
    let store = fresh_store();
    assert_eq!(store.records(), seed_records().as_slice());
    assert_eq!(store.source(), LoadSource::SeedMissing);
}

#[test]
fn malformed_slot_loads_exactly_the_seeds() {
    for raw in ["{not json", "null", "{\"id\":1}", "[{\"id\":\"x\"}]"] {
        let backend = MemoryStorage::with_item(DEFAULT_STORAGE_KEY, raw);
        let store = RecordStore::load(backend, DEFAULT_STORAGE_KEY);
        assert_eq!(store.records(), seed_records().as_slice(), "{raw}");
        assert_eq!(store.source(), LoadSource::SeedRecovered);
    }
}

#[test]
fn duplicate_or_invalid_persisted_records_are_malformed() {
    let dup = r#"[{"id":"a","name":"A","age":1,"email":"a@x.com"},{"id":"a","name":"B","age":2,"email":"b@x.com"}]"#;
    let err = read_records(&MemoryStorage::with_item("k", dup), "k").expect_err("duplicate");
    assert!(matches!(err, StorageError::MalformedRecords { ref key, .. } if key == "k"));

    let blank = r#"[{"id":"a","name":"  ","age":1,"email":"a@x.com"}]"#;
    assert!(read_records(&MemoryStorage::with_item("k", blank), "k").is_err());

    let negative = r#"[{"id":"a","name":"A","age":-1,"email":"a@x.com"}]"#;
    assert!(read_records(&MemoryStorage::with_item("k", negative), "k").is_err());
}

#[test]
fn persisted_empty_roster_stays_empty() {
    let backend = MemoryStorage::with_item(DEFAULT_STORAGE_KEY, "[]");
    let store = RecordStore::load(backend, DEFAULT_STORAGE_KEY);
    assert!(store.is_empty());
    assert_eq!(store.source(), LoadSource::Persisted);
}

#[test]
fn persist_then_load_round_trips() {
    let mut store = fresh_store();
    assert!(store.add(ravi()));
    store.sort(SortMode::Age);
    store.persist();

    let expected = store.records().to_vec();
    let reloaded = RecordStore::load(store.backend().clone(), DEFAULT_STORAGE_KEY);
    assert_eq!(reloaded.records(), expected.as_slice());
    assert_eq!(reloaded.source(), LoadSource::Persisted);
}

#[test]
fn persisted_layout_is_array_of_plain_objects() {
    let mut store = fresh_store();
    store.persist();
    let raw = store
        .backend()
        .get_item(DEFAULT_STORAGE_KEY)
        .expect("get")
        .expect("present");
    let value: serde_json::Value = serde_json::from_str(&raw).expect("json");
    assert_eq!(
        value[0],
        serde_json::json!({
            "id": "id_seed_dinesh",
            "name": "Dinesh",
            "age": 20,
            "email": "dinesh@example.com"
        })
    );
}

#[test]
fn add_rejects_duplicate_ids() {
    let mut store = fresh_store();
    assert!(store.add(ravi()));
    assert!(!store.add(ravi()));
    assert_eq!(store.len(), 3);
}

#[test]
fn update_replaces_fields_but_not_id() {
    let mut store = fresh_store();
    let id = StudentId::from("id_seed_dinesh");
    assert!(store.update(&id, fields("Dinesh K", 25, "dk@example.com")));

    let record = store.get(&id).expect("record");
    assert_eq!(record.id, id);
    assert_eq!(record.age, 25);
    assert_eq!(record.email, "dk@example.com");
}

#[test]
fn unknown_ids_are_silent_no_ops() {
    let mut store = fresh_store();
    let before = store.records().to_vec();
    let ghost = StudentId::from("missing");

    assert!(!store.update(&ghost, fields("X", 1, "x@x.com")));
    assert!(!store.remove(&ghost));
    assert_eq!(store.records(), before.as_slice());
}

#[test]
fn remove_drops_matching_record() {
    let mut store = fresh_store();
    assert!(store.remove(&StudentId::from("id_seed_kumar")));
    assert_eq!(store.len(), 1);
    assert_eq!(store.records()[0].name, "Dinesh");
}

#[test]
fn unchanged_update_is_idempotent() {
    let mut store = fresh_store();
    store.sort(SortMode::Name);
    let before = store.records().to_vec();
    let id = before[0].id.clone();

    store.update(&id, before[0].fields());
    store.sort(SortMode::Name);
    assert_eq!(store.records(), before.as_slice());
}

struct FailingWrites;

impl KeyValueStore for FailingWrites {
    fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn set_item(&mut self, key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Write {
            path: key.into(),
            source: std::io::Error::other("quota exceeded"),
        })
    }

    fn remove_item(&mut self, _key: &str) -> Result<(), StorageError> {
        Ok(())
    }
}

#[test]
fn persist_failure_keeps_memory_state() {
    let mut store = RecordStore::load(FailingWrites, DEFAULT_STORAGE_KEY);
    assert!(store.add(ravi()));
    store.persist();
    assert_eq!(store.len(), 3);
    assert!(store.try_persist().is_err());
}
