use std::collections::HashSet;

use shared::{
    domain::{SortMode, StudentFields, StudentId, StudentRecord},
    sort::sort_records,
    validation::check_fields,
};

mod kv;

pub use kv::{FileStorage, KeyValueStore, MemoryStorage, StorageError};

/// Slot key the roster page has always written to.
pub const DEFAULT_STORAGE_KEY: &str = "students_demo_v1";

/// The two records a fresh (or unreadable) roster starts with.
pub fn seed_records() -> Vec<StudentRecord> {
    vec![
        StudentRecord {
            id: StudentId::from("id_seed_dinesh"),
            name: "Dinesh".into(),
            age: 20,
            email: "dinesh@example.com".into(),
        },
        StudentRecord {
            id: StudentId::from("id_seed_kumar"),
            name: "Kumar".into(),
            age: 22,
            email: "kumar@example.com".into(),
        },
    ]
}

/// Where the records of a freshly loaded store came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    Persisted,
    SeedMissing,
    SeedRecovered,
}

/// Ordered, in-memory roster backed by one key of a [`KeyValueStore`].
///
/// The store owns every record. Mutations only touch memory; [`RecordStore::persist`]
/// writes the whole sequence back to the slot.
pub struct RecordStore<S> {
    backend: S,
    key: String,
    records: Vec<StudentRecord>,
    source: LoadSource,
}

impl<S: KeyValueStore> RecordStore<S> {
    /// Loads the slot, falling back to [`seed_records`] when it is absent or malformed.
    pub fn load(backend: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let (records, source) = match read_records(&backend, &key) {
            Ok(Some(records)) => (records, LoadSource::Persisted),
            Ok(None) => {
                tracing::debug!(%key, "no persisted roster; using seed records");
                (seed_records(), LoadSource::SeedMissing)
            }
            Err(error) => {
                tracing::warn!(%key, %error, "persisted roster unreadable; using seed records");
                (seed_records(), LoadSource::SeedRecovered)
            }
        };

        Self {
            backend,
            key,
            records,
            source,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn source(&self) -> LoadSource {
        self.source
    }

    pub fn records(&self) -> &[StudentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &StudentId) -> Option<&StudentRecord> {
        self.records.iter().find(|r| &r.id == id)
    }

    pub fn contains(&self, id: &StudentId) -> bool {
        self.get(id).is_some()
    }

    /// Appends `record`. Returns `false` and leaves the store untouched if the id is taken.
    pub fn add(&mut self, record: StudentRecord) -> bool {
        if self.contains(&record.id) {
            tracing::warn!(id = %record.id, "refusing to add record with duplicate id");
            return false;
        }
        tracing::debug!(id = %record.id, "record added");
        self.records.push(record);
        true
    }

    /// Replaces the non-id fields of `id`. Unknown ids are a silent no-op.
    pub fn update(&mut self, id: &StudentId, fields: StudentFields) -> bool {
        let Some(record) = self.records.iter_mut().find(|r| &r.id == id) else {
            tracing::debug!(%id, "update ignored for unknown id");
            return false;
        };
        record.apply(fields);
        tracing::debug!(%id, "record updated");
        true
    }

    /// Removes `id`. Unknown ids are a silent no-op.
    pub fn remove(&mut self, id: &StudentId) -> bool {
        let before = self.records.len();
        self.records.retain(|r| &r.id != id);
        let removed = self.records.len() != before;
        if removed {
            tracing::debug!(%id, "record removed");
        }
        removed
    }

    pub fn sort(&mut self, mode: SortMode) {
        sort_records(&mut self.records, mode);
    }

    pub fn try_persist(&mut self) -> Result<(), StorageError> {
        let payload = serde_json::to_string(&self.records)?;
        self.backend.set_item(&self.key, &payload)
    }

    /// Best-effort write of the full sequence. Failures are logged, never returned.
    pub fn persist(&mut self) {
        match self.try_persist() {
            Ok(()) => tracing::debug!(key = %self.key, count = self.records.len(), "roster persisted"),
            Err(error) => tracing::warn!(key = %self.key, %error, "failed to persist roster"),
        }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }
}

/// Reads and checks the slot. `Ok(None)` means the key is absent.
pub fn read_records<S: KeyValueStore + ?Sized>(
    backend: &S,
    key: &str,
) -> Result<Option<Vec<StudentRecord>>, StorageError> {
    let Some(raw) = backend.get_item(key)?.filter(|raw| !raw.is_empty()) else {
        return Ok(None);
    };

    let malformed = |reason: String| StorageError::MalformedRecords {
        key: key.to_string(),
        reason,
    };

    let records: Vec<StudentRecord> =
        serde_json::from_str(&raw).map_err(|err| malformed(err.to_string()))?;

    let mut seen = HashSet::with_capacity(records.len());
    for record in &records {
        if !seen.insert(&record.id) {
            return Err(malformed(format!("duplicate id {}", record.id)));
        }
        check_fields(&record.fields())
            .map_err(|err| malformed(format!("record {}: {err}", record.id)))?;
    }

    Ok(Some(records))
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
