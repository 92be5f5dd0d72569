//! Mock key-value medium with scripted failures.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::storage::{KeyValueMedium, MediumError};

/// Shared-state medium for tests.
///
/// Clones share the same underlying map, so a test can keep a handle
/// to inspect or mutate entries after boxing a clone into an adapter
/// (the "external writer in another tab" scenario). Failures are
/// scripted per direction and persist until cleared.
#[derive(Debug, Clone, Default)]
pub struct MockMedium {
    entries: Arc<Mutex<HashMap<String, String>>>,
    read_failure: Arc<Mutex<Option<MediumError>>>,
    write_failure: Arc<Mutex<Option<MediumError>>>,
}

impl MockMedium {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place an entry directly, bypassing the adapter.
    pub fn insert(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    /// Inspect an entry directly.
    pub fn entry(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    /// Delete an entry directly.
    pub fn delete(&self, key: &str) {
        self.entries.lock().unwrap().remove(key);
    }

    /// All stored keys, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.lock().unwrap().keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Make every read fail with `err` until cleared.
    pub fn fail_reads(&self, err: MediumError) {
        *self.read_failure.lock().unwrap() = Some(err);
    }

    /// Make every write (and remove) fail with `err` until cleared.
    pub fn fail_writes(&self, err: MediumError) {
        *self.write_failure.lock().unwrap() = Some(err);
    }

    pub fn clear_failures(&self) {
        *self.read_failure.lock().unwrap() = None;
        *self.write_failure.lock().unwrap() = None;
    }
}

impl KeyValueMedium for MockMedium {
    fn get(&self, key: &str) -> Result<Option<String>, MediumError> {
        if let Some(err) = self.read_failure.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), MediumError> {
        if let Some(err) = self.write_failure.lock().unwrap().clone() {
            return Err(err);
        }
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), MediumError> {
        if let Some(err) = self.write_failure.lock().unwrap().clone() {
            return Err(err);
        }
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}
