use crate::{FileStore, StoreError};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

#[derive(Debug, Default)]
struct MemoryStoreState {
    files: BTreeMap<String, String>,
    gates: HashMap<String, Arc<Notify>>,
    fetch_counts: HashMap<String, usize>,
    delete_count: usize,
    failing_fetches: HashMap<String, StoreError>,
    failing_deletes: HashSet<String>,
    failing_list: Option<StoreError>,
}

/// An in-memory [`FileStore`] with hooks to control the outcome of requests.
///
/// A fetch of an id that is put on hold with [`MemoryStore::hold`] does not
/// resolve before [`MemoryStore::release`] is called for that id. This allows
/// tests to interleave other registry operations with an in-flight load.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<MemoryStoreState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    pub fn with_file(self, id: &str, content: &str) -> Self {
        self.insert(id, content);
        self
    }

    pub fn insert(&self, id: &str, content: &str) {
        self.lock().files.insert(id.to_string(), content.to_string());
    }

    pub fn contains(&self, id: &str) -> bool {
        self.lock().files.contains_key(id)
    }

    /// Holds every following fetch of `id` until [`MemoryStore::release`] is called.
    pub fn hold(&self, id: &str) {
        self.lock()
            .gates
            .insert(id.to_string(), Arc::new(Notify::new()));
    }

    /// Lets a held fetch of `id` resolve.
    pub fn release(&self, id: &str) {
        if let Some(gate) = self.lock().gates.remove(id) {
            gate.notify_one();
        }
    }

    pub fn fail_fetch(&self, id: &str, error: StoreError) {
        self.lock().failing_fetches.insert(id.to_string(), error);
    }

    /// Lets every following list request fail with `error`.
    pub fn fail_list(&self, error: StoreError) {
        self.lock().failing_list = Some(error);
    }

    pub fn fail_delete(&self, id: &str) {
        self.lock().failing_deletes.insert(id.to_string());
    }

    /// Number of fetches that were started for `id`.
    pub fn fetch_count(&self, id: &str) -> usize {
        self.lock().fetch_counts.get(id).copied().unwrap_or(0)
    }

    pub fn delete_count(&self) -> usize {
        self.lock().delete_count
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryStoreState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl FileStore for MemoryStore {
    async fn list(&self) -> Result<Vec<String>, StoreError> {
        let state = self.lock();
        if let Some(error) = &state.failing_list {
            return Err(error.clone());
        }
        Ok(state.files.keys().cloned().collect())
    }

    async fn upload(&self, bytes: &[u8], filename: &str) -> Result<String, StoreError> {
        if !filename.to_lowercase().ends_with(".gpx") {
            return Err(StoreError::InvalidName(filename.to_string()));
        }
        let content =
            String::from_utf8(bytes.to_vec()).map_err(|e| StoreError::InvalidData(e.to_string()))?;
        self.insert(filename, &content);
        Ok(filename.to_string())
    }

    async fn fetch(&self, id: &str) -> Result<String, StoreError> {
        let gate = {
            let mut state = self.lock();
            *state.fetch_counts.entry(id.to_string()).or_default() += 1;
            state.gates.get(id).cloned()
        };
        if let Some(gate) = gate {
            gate.notified().await;
        }
        let state = self.lock();
        if let Some(error) = state.failing_fetches.get(id) {
            return Err(error.clone());
        }
        state
            .files
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut state = self.lock();
        state.delete_count += 1;
        if state.failing_deletes.contains(id) {
            return Err(StoreError::Http {
                status: Some(500),
                message: format!("Error deleting file: {id}"),
            });
        }
        match state.files.remove(id) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound(id.to_string())),
        }
    }
}
