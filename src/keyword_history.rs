//! Recent search keywords, most-recent-first.
//!
//! The whole history lives under one key as a JSON array. Saving a keyword
//! that is already present moves it to the front instead of duplicating it.
//!
//! ```rust
//! use map_search_core::keyword_history::KeywordHistoryStore;
//! use map_search_core::kv_port::MemoryStore;
//!
//! let history = KeywordHistoryStore::new(MemoryStore::new("KeywordHistory"));
//! history.save("카페")?;
//! history.save("카페")?;
//! history.save("베이커리")?;
//! assert_eq!(history.read()?, vec!["베이커리", "카페"]);
//!
//! history.delete("카페")?;
//! assert_eq!(history.read()?, vec!["베이커리"]);
//! # Ok::<(), map_search_core::map_search_error::MapSearchError>(())
//! ```

use log::debug;

use crate::kv_port::KeyValueStore;
use crate::map_search_error::{MapSearchError, Result};

pub const KEYWORDS_KEY: &str = "keywords";

pub struct KeywordHistoryStore<S> {
    store: S,
    max_keywords: Option<usize>,
}

impl<S: KeyValueStore> KeywordHistoryStore<S> {
    /// History without a size cap.
    pub fn new(store: S) -> Self {
        Self { store, max_keywords: None }
    }

    /// History keeping at most `max_keywords` entries; the oldest are dropped.
    ///
    /// A limit of zero is rejected: every save would be discarded.
    pub fn with_capacity_limit(store: S, max_keywords: Option<usize>) -> Result<Self> {
        if max_keywords == Some(0) {
            return Err(MapSearchError::InvalidArgument(
                "max_keywords must be positive or absent".to_string(),
            ));
        }
        Ok(Self { store, max_keywords })
    }

    pub fn max_keywords(&self) -> Option<usize> {
        self.max_keywords
    }

    pub fn read(&self) -> Result<Vec<String>> {
        match self.store.get(KEYWORDS_KEY)? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }

    /// Inserts `text` at the front, removing any earlier occurrence.
    pub fn save(&self, text: &str) -> Result<()> {
        if text.trim().is_empty() {
            return Err(MapSearchError::InvalidArgument("keyword must not be empty".to_string()));
        }

        let mut keywords = self.read()?;
        keywords.retain(|existing| existing != text);
        keywords.insert(0, text.to_string());

        if let Some(max) = self.max_keywords {
            if keywords.len() > max {
                debug!("Keyword history over {max} entries; dropping {}", keywords.len() - max);
                keywords.truncate(max);
            }
        }

        self.write(&keywords)
    }

    /// Removes `text` if present. Deleting a missing keyword is a no-op.
    pub fn delete(&self, text: &str) -> Result<()> {
        let mut keywords = self.read()?;
        let before = keywords.len();
        keywords.retain(|existing| existing != text);

        if keywords.len() == before {
            debug!("Keyword '{text}' not in history; nothing to delete");
            return Ok(());
        }

        if keywords.is_empty() {
            self.store.remove(KEYWORDS_KEY)
        } else {
            self.write(&keywords)
        }
    }

    fn write(&self, keywords: &[String]) -> Result<()> {
        let json = serde_json::to_string(keywords)?;
        self.store.put(KEYWORDS_KEY, &json)
    }
}
