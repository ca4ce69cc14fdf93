//! Key-value persistence port.
//!
//! Both stores are written purely against [`KeyValueStore`]; the durable
//! backend lives in [`crate::lmdb_store`], and [`MemoryStore`] serves tests
//! and hosts that bring their own persistence.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::map_search_error::{MapSearchError, Result};

/// Text key-value store scoped to one named namespace.
pub trait KeyValueStore: Send + Sync {
    fn namespace(&self) -> &str;

    fn get(&self, key: &str) -> Result<Option<String>>;

    fn put(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;

    fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }

    /// Writes several pairs as one logical write.
    ///
    /// The default writes pair by pair; transactional backends override it.
    fn put_all(&self, pairs: &[(&str, &str)]) -> Result<()> {
        for (key, value) in pairs {
            self.put(key, value)?;
        }
        Ok(())
    }
}

type Entries = HashMap<(String, String), String>;

/// In-process backend. Clones share the same entries, so a clone behaves
/// like the same store reopened after a restart.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    namespace: String,
    entries: Arc<RwLock<Entries>>,
}

impl MemoryStore {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Another namespace over the same shared entries.
    pub fn namespace_view(&self, namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            entries: Arc::clone(&self.entries),
        }
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .map(|entries| entries.keys().filter(|(ns, _)| *ns == self.namespace).count())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn entry_key(&self, key: &str) -> (String, String) {
        (self.namespace.clone(), key.to_string())
    }
}

fn poisoned<T>(_: T) -> MapSearchError {
    MapSearchError::StorageFailure("memory store lock poisoned".to_string())
}

impl KeyValueStore for MemoryStore {
    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.read().map_err(poisoned)?;
        Ok(entries.get(&self.entry_key(key)).cloned())
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        entries.insert(self.entry_key(key), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        entries.remove(&self.entry_key(key));
        Ok(())
    }

    fn contains(&self, key: &str) -> Result<bool> {
        let entries = self.entries.read().map_err(poisoned)?;
        Ok(entries.contains_key(&self.entry_key(key)))
    }

    // Single lock acquisition so readers never observe half of the pairs.
    fn put_all(&self, pairs: &[(&str, &str)]) -> Result<()> {
        let mut entries = self.entries.write().map_err(poisoned)?;
        for (key, value) in pairs {
            entries.insert(self.entry_key(key), value.to_string());
        }
        Ok(())
    }
}
