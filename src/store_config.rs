//! Configuration for opening a map search store.
//!
//! The host application usually passes the configuration as JSON through
//! [`crate::create_map_store`]. Every field has a default, so `{}` is a valid
//! configuration.
//!
//! ```rust
//! use map_search_core::store_config::StoreConfig;
//!
//! let config = StoreConfig::from_json(r#"{"path":"maps.lmdb","max_keywords":20}"#)?;
//! assert_eq!(config.max_keywords, Some(20));
//! assert_eq!(config.position_namespace, "LastMarkerPrefs");
//! # Ok::<(), map_search_core::map_search_error::MapSearchError>(())
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::map_search_error::{MapSearchError, Result};

pub const DEFAULT_PATH: &str = "map_search.lmdb";
pub const DEFAULT_MAP_SIZE: usize = 10 * 1024 * 1024;
pub const DEFAULT_MAX_DBS: u32 = 4;
pub const DEFAULT_KEYWORD_NAMESPACE: &str = "KeywordHistory";
pub const DEFAULT_POSITION_NAMESPACE: &str = "LastMarkerPrefs";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory holding the LMDB environment. Created if missing.
    pub path: PathBuf,

    /// LMDB map size in bytes.
    pub map_size: usize,

    /// Maximum number of named LMDB databases (one per namespace).
    pub max_dbs: u32,

    /// Maximum retained keywords; `None` keeps the full history.
    pub max_keywords: Option<usize>,

    pub keyword_namespace: String,
    pub position_namespace: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_PATH),
            map_size: DEFAULT_MAP_SIZE,
            max_dbs: DEFAULT_MAX_DBS,
            max_keywords: None,
            keyword_namespace: DEFAULT_KEYWORD_NAMESPACE.to_string(),
            position_namespace: DEFAULT_POSITION_NAMESPACE.to_string(),
        }
    }
}

impl StoreConfig {
    /// Parses and validates a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: StoreConfig = serde_json::from_str(json)
            .map_err(|e| MapSearchError::InvalidArgument(format!("invalid store config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_max_keywords(mut self, max_keywords: Option<usize>) -> Self {
        self.max_keywords = max_keywords;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.path.as_os_str().is_empty() {
            return Err(MapSearchError::InvalidArgument("store path is empty".to_string()));
        }
        if self.map_size == 0 {
            return Err(MapSearchError::InvalidArgument("map_size must be positive".to_string()));
        }
        if self.max_dbs < 2 {
            return Err(MapSearchError::InvalidArgument(
                "max_dbs must allow both namespaces".to_string(),
            ));
        }
        if self.max_keywords == Some(0) {
            return Err(MapSearchError::InvalidArgument(
                "max_keywords must be positive or absent".to_string(),
            ));
        }
        if self.keyword_namespace.is_empty() || self.position_namespace.is_empty() {
            return Err(MapSearchError::InvalidArgument("namespace names must not be empty".to_string()));
        }
        if self.keyword_namespace == self.position_namespace {
            return Err(MapSearchError::InvalidArgument(
                "keyword and position namespaces must differ".to_string(),
            ));
        }
        Ok(())
    }
}
