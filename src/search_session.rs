//! Coordinates the keyword history, the saved marker and the current result
//! list for a presentation layer.
//!
//! Every mutation re-reads the affected store and pushes the fresh value to
//! the registered observers. Nothing here knows about UI types; observers are
//! plain closures.

use log::{debug, info};

use crate::keyword_history::KeywordHistoryStore;
use crate::kv_port::KeyValueStore;
use crate::last_position::LastPositionStore;
use crate::map_search_error::Result;
use crate::search_model::{LastMarkerPosition, SearchResultItem, SessionSnapshot};

/// Place-search collaborator, e.g. an HTTP client owned by the host.
pub trait PlaceSearcher {
    fn search(&self, query: &str) -> Result<Vec<SearchResultItem>>;
}

impl<F> PlaceSearcher for F
where
    F: Fn(&str) -> Result<Vec<SearchResultItem>>,
{
    fn search(&self, query: &str) -> Result<Vec<SearchResultItem>> {
        self(query)
    }
}

type Observer<T> = Box<dyn FnMut(&T) + Send>;

pub struct SearchSession<S> {
    history: KeywordHistoryStore<S>,
    position: LastPositionStore<S>,
    results: Vec<SearchResultItem>,
    keyword_observers: Vec<Observer<Vec<String>>>,
    result_observers: Vec<Observer<Vec<SearchResultItem>>>,
    marker_observers: Vec<Observer<LastMarkerPosition>>,
}

impl<S: KeyValueStore> SearchSession<S> {
    pub fn new(history: KeywordHistoryStore<S>, position: LastPositionStore<S>) -> Self {
        Self {
            history,
            position,
            results: Vec::new(),
            keyword_observers: Vec::new(),
            result_observers: Vec::new(),
            marker_observers: Vec::new(),
        }
    }

    pub fn history(&self) -> &KeywordHistoryStore<S> {
        &self.history
    }

    pub fn position(&self) -> &LastPositionStore<S> {
        &self.position
    }

    pub fn results(&self) -> &[SearchResultItem] {
        &self.results
    }

    pub fn on_keywords_changed(&mut self, observer: impl FnMut(&Vec<String>) + Send + 'static) {
        self.keyword_observers.push(Box::new(observer));
    }

    pub fn on_results_changed(
        &mut self,
        observer: impl FnMut(&Vec<SearchResultItem>) + Send + 'static,
    ) {
        self.result_observers.push(Box::new(observer));
    }

    pub fn on_marker_changed(&mut self, observer: impl FnMut(&LastMarkerPosition) + Send + 'static) {
        self.marker_observers.push(Box::new(observer));
    }

    /// Runs `query` through `searcher`. A blank query clears the results
    /// without calling the searcher.
    pub fn search<P: PlaceSearcher + ?Sized>(
        &mut self,
        searcher: &P,
        query: &str,
    ) -> Result<&[SearchResultItem]> {
        let items = if query.trim().is_empty() {
            Vec::new()
        } else {
            searcher.search(query)?
        };
        debug!("Search '{query}' returned {} results", items.len());
        Ok(self.show_results(items))
    }

    /// Publishes results fetched outside the session.
    pub fn show_results(&mut self, items: Vec<SearchResultItem>) -> &[SearchResultItem] {
        self.results = items;
        for observer in &mut self.result_observers {
            observer(&self.results);
        }
        &self.results
    }

    /// A history keyword was tapped: search for it again. History order is
    /// left untouched until a result is selected.
    pub fn select_keyword<P: PlaceSearcher + ?Sized>(
        &mut self,
        searcher: &P,
        keyword: &str,
    ) -> Result<&[SearchResultItem]> {
        self.search(searcher, keyword)
    }

    /// Records a typed keyword and returns the refreshed history.
    pub fn save_keyword(&mut self, keyword: &str) -> Result<Vec<String>> {
        self.history.save(keyword)?;
        self.refresh_keywords()
    }

    pub fn delete_keyword(&mut self, keyword: &str) -> Result<Vec<String>> {
        self.history.delete(keyword)?;
        self.refresh_keywords()
    }

    /// Confirms `item`: its place name is recorded as a keyword and it
    /// becomes the saved marker.
    pub fn select_result(&mut self, item: &SearchResultItem) -> Result<SessionSnapshot> {
        // Validate up front so a rejected item leaves both stores untouched.
        item.validate()?;

        self.history.save(&item.place_name)?;
        self.position.save(item)?;
        info!("Selected '{}' at ({}, {})", item.place_name, item.latitude, item.longitude);

        let keywords = self.refresh_keywords()?;
        let last_position = self.refresh_marker()?;

        Ok(SessionSnapshot { keywords, last_position })
    }

    /// Overwrites the saved marker without touching the keyword history.
    pub fn save_position(&mut self, item: &SearchResultItem) -> Result<Option<LastMarkerPosition>> {
        self.position.save(item)?;
        self.refresh_marker()
    }

    /// Startup restore of the saved marker.
    pub fn restore_last_position(&mut self) -> Result<Option<LastMarkerPosition>> {
        let marker = self.position.load()?;
        match &marker {
            Some(marker) => {
                info!("Restored last marker '{}'", marker.place_name);
                for observer in &mut self.marker_observers {
                    observer(marker);
                }
            }
            None => debug!("No last marker to restore"),
        }
        Ok(marker)
    }

    pub fn snapshot(&self) -> Result<SessionSnapshot> {
        Ok(SessionSnapshot {
            keywords: self.history.read()?,
            last_position: self.position.load()?,
        })
    }

    fn refresh_marker(&mut self) -> Result<Option<LastMarkerPosition>> {
        let marker = self.position.load()?;
        if let Some(marker) = &marker {
            for observer in &mut self.marker_observers {
                observer(marker);
            }
        }
        Ok(marker)
    }

    fn refresh_keywords(&mut self) -> Result<Vec<String>> {
        let keywords = self.history.read()?;
        for observer in &mut self.keyword_observers {
            observer(&keywords);
        }
        Ok(keywords)
    }
}
