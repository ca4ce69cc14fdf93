//! Handle owned by the FFI host: an LMDB-backed [`SearchSession`] behind a mutex.

use std::sync::{Mutex, MutexGuard};

use log::info;

use crate::keyword_history::KeywordHistoryStore;
use crate::last_position::LastPositionStore;
use crate::lmdb_store::{LmdbEnvironment, LmdbStore};
use crate::map_search_error::{MapSearchError, Result};
use crate::search_session::SearchSession;
use crate::store_config::StoreConfig;

pub struct MapStoreState {
    config: StoreConfig,
    // Keeps the environment alive for the lifetime of the handle.
    _env: LmdbEnvironment,
    session: Mutex<SearchSession<LmdbStore>>,
}

impl MapStoreState {
    pub fn open(config: StoreConfig) -> Result<Self> {
        let env = LmdbEnvironment::open(&config)?;
        let keywords = env.namespace(&config.keyword_namespace)?;
        let position = env.namespace(&config.position_namespace)?;

        let session = SearchSession::new(
            KeywordHistoryStore::with_capacity_limit(keywords, config.max_keywords)?,
            LastPositionStore::new(position),
        );

        info!("Map store ready at: {}", env.path().display());

        Ok(Self {
            config,
            _env: env,
            session: Mutex::new(session),
        })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Locks the session; all writes go through this single writer.
    pub fn session(&self) -> Result<MutexGuard<'_, SearchSession<LmdbStore>>> {
        self.session
            .lock()
            .map_err(|_| MapSearchError::StorageFailure("map store lock poisoned".to_string()))
    }
}
