//! LMDB backend for the [`KeyValueStore`] port.
//!
//! One LMDB environment (a directory on disk) holds one named database per
//! namespace. Values are UTF-8 text.
//!
//! ```no_run
//! use map_search_core::kv_port::KeyValueStore;
//! use map_search_core::lmdb_store::LmdbEnvironment;
//! use map_search_core::store_config::StoreConfig;
//!
//! let env = LmdbEnvironment::open(&StoreConfig::default())?;
//! let prefs = env.namespace("LastMarkerPrefs")?;
//! prefs.put("lastPlaceName", "Cafe")?;
//! assert!(prefs.contains("lastPlaceName")?);
//! # Ok::<(), map_search_core::map_search_error::MapSearchError>(())
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use lmdb::{Database, DatabaseFlags, Environment, Transaction, WriteFlags};
use log::{debug, info};

use crate::kv_port::KeyValueStore;
use crate::map_search_error::{MapSearchError, Result};
use crate::store_config::StoreConfig;

pub struct LmdbEnvironment {
    env: Arc<Environment>,
    path: PathBuf,
}

impl LmdbEnvironment {
    /// Opens (or creates) the environment described by `config`.
    pub fn open(config: &StoreConfig) -> Result<Self> {
        config.validate()?;
        std::fs::create_dir_all(&config.path)?;

        info!("Opening LMDB environment at: {}", config.path.display());

        let env = Environment::new()
            .set_map_size(config.map_size)
            .set_max_dbs(config.max_dbs)
            .open(&config.path)?;

        Ok(Self {
            env: Arc::new(env),
            path: config.path.clone(),
        })
    }

    /// Opens the named database for `name`, creating it on first use.
    pub fn namespace(&self, name: &str) -> Result<LmdbStore> {
        if name.is_empty() {
            return Err(MapSearchError::InvalidArgument("namespace name is empty".to_string()));
        }
        let db = self.env.create_db(Some(name), DatabaseFlags::empty())?;
        debug!("Opened LMDB namespace '{name}'");

        Ok(LmdbStore {
            env: Arc::clone(&self.env),
            db,
            namespace: name.to_string(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// A single LMDB named database. Cheap to clone; clones share the environment.
#[derive(Clone)]
pub struct LmdbStore {
    env: Arc<Environment>,
    db: Database,
    namespace: String,
}

impl KeyValueStore for LmdbStore {
    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        let txn = self.env.begin_ro_txn()?;
        let value = match txn.get(self.db, &key) {
            Ok(bytes) => Some(String::from_utf8(bytes.to_vec()).map_err(|e| {
                MapSearchError::StorageFailure(format!("non UTF-8 value under '{key}': {e}"))
            })?),
            Err(lmdb::Error::NotFound) => None,
            Err(e) => return Err(e.into()),
        };
        txn.abort();
        Ok(value)
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        let mut txn = self.env.begin_rw_txn()?;
        txn.put(self.db, &key, &value, WriteFlags::empty())?;
        txn.commit()?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut txn = self.env.begin_rw_txn()?;
        match txn.del(self.db, &key, None) {
            Ok(()) => txn.commit()?,
            Err(lmdb::Error::NotFound) => txn.abort(),
            Err(e) => return Err(e.into()),
        }
        Ok(())
    }

    fn put_all(&self, pairs: &[(&str, &str)]) -> Result<()> {
        let mut txn = self.env.begin_rw_txn()?;
        for (key, value) in pairs {
            txn.put(self.db, key, value, WriteFlags::empty())?;
        }
        txn.commit()?;
        Ok(())
    }
}
