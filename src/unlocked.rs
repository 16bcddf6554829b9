//! Species the player has caught, persisted across sessions.

use crate::errors::StoreResult;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Storage key holding the unlocked ids.
pub const UNLOCKED_KEY: &str = "unlockedPokemon";

/// Insertion-ordered set of species ids. Serializes as a plain JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnlockedSet {
    ids: Vec<u32>,
}

impl UnlockedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from ids in order, keeping the first occurrence of duplicates.
    pub fn from_ids(ids: impl IntoIterator<Item = u32>) -> Self {
        let mut set = Self::new();
        for id in ids {
            set.insert(id);
        }
        set
    }

    /// Returns true when `id` was not already present.
    pub fn insert(&mut self, id: u32) -> bool {
        if self.contains(id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    pub fn contains(&self, id: u32) -> bool {
        self.ids.contains(&id)
    }

    pub fn ids(&self) -> &[u32] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Named-key JSON storage.
pub trait UnlockedStore: Send {
    fn read(&self, key: &str) -> StoreResult<Option<Value>>;
    fn write(&mut self, key: &str, value: Value) -> StoreResult<()>;
}

/// In-memory store, mostly for tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: Value) -> Self {
        let mut store = Self::new();
        store.values.insert(key.to_string(), value);
        store
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }
}

impl UnlockedStore for MemoryStore {
    fn read(&self, key: &str) -> StoreResult<Option<Value>> {
        Ok(self.values.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: Value) -> StoreResult<()> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

/// A JSON object on disk, one entry per key.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_object(&self) -> StoreResult<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let raw = fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(Map::new());
        }
        Ok(serde_json::from_str(&raw)?)
    }
}

impl UnlockedStore for JsonFileStore {
    fn read(&self, key: &str) -> StoreResult<Option<Value>> {
        Ok(self.read_object()?.remove(key))
    }

    fn write(&mut self, key: &str, value: Value) -> StoreResult<()> {
        // An unreadable file is replaced rather than blocking the save.
        let mut object = self.read_object().unwrap_or_else(|err| {
            tracing::warn!(path = %self.path.display(), error = %err, "discarding unreadable save file");
            Map::new()
        });
        object.insert(key.to_string(), value);
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&Value::Object(object))?)?;
        Ok(())
    }
}

/// The unlocked set together with the store it is saved to.
pub struct UnlockedRegistry {
    store: Box<dyn UnlockedStore>,
    set: UnlockedSet,
}

impl UnlockedRegistry {
    /// Read the set from `store`. A missing or non-array value loads as empty;
    /// entries that are not valid ids are dropped.
    pub fn load(store: Box<dyn UnlockedStore>) -> Self {
        let set = match store.read(UNLOCKED_KEY) {
            Ok(Some(Value::Array(items))) => {
                let total = items.len();
                let ids: Vec<u32> = items
                    .iter()
                    .filter_map(|item| item.as_u64().and_then(|id| u32::try_from(id).ok()))
                    .collect();
                if ids.len() < total {
                    tracing::warn!(skipped = total - ids.len(), "ignoring invalid ids in unlocked set");
                }
                UnlockedSet::from_ids(ids)
            }
            Ok(Some(other)) => {
                tracing::warn!(value = %other, "corrupt unlocked set, starting empty");
                UnlockedSet::new()
            }
            Ok(None) => UnlockedSet::new(),
            Err(err) => {
                tracing::warn!(error = %err, "could not read unlocked set, starting empty");
                UnlockedSet::new()
            }
        };
        tracing::info!(count = set.len(), "loaded unlocked set");
        Self { store, set }
    }

    pub fn unlocked(&self) -> &UnlockedSet {
        &self.set
    }

    pub fn contains(&self, id: u32) -> bool {
        self.set.contains(id)
    }

    /// Record a catch and save. Returns whether `id` is new.
    ///
    /// The in-memory set keeps the id even when the save fails.
    pub fn unlock(&mut self, id: u32) -> StoreResult<bool> {
        let inserted = self.set.insert(id);
        self.store
            .write(UNLOCKED_KEY, serde_json::to_value(&self.set)?)?;
        tracing::info!(id, inserted, "unlocked set saved");
        Ok(inserted)
    }
}
