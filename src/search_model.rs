//! Data model for search results, the saved marker and session snapshots.

use serde::{Deserialize, Serialize};

use crate::map_search_error::{MapSearchError, Result};

/// A place returned by the place-search collaborator.
///
/// # JSON
///
/// ```json
/// {
///   "place_name": "Cafe Onion",
///   "address": "8 Achasan-ro 9-gil, Seongdong-gu",
///   "category": "Cafe",
///   "latitude": 37.5447,
///   "longitude": 127.0583
/// }
/// ```
///
/// `category` may be omitted and defaults to the empty string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResultItem {
    pub place_name: String,
    pub address: String,
    #[serde(default)]
    pub category: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl SearchResultItem {
    pub fn new(
        place_name: impl Into<String>,
        address: impl Into<String>,
        category: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            place_name: place_name.into(),
            address: address.into(),
            category: category.into(),
            latitude,
            longitude,
        }
    }

    /// Checks that the item can be persisted or shown as a marker: place
    /// name and address non-empty, both coordinates finite.
    pub fn validate(&self) -> Result<()> {
        if self.place_name.is_empty() {
            return Err(MapSearchError::InvalidArgument("place name must not be empty".to_string()));
        }
        if self.address.is_empty() {
            return Err(MapSearchError::InvalidArgument("address must not be empty".to_string()));
        }
        if !self.latitude.is_finite() || !self.longitude.is_finite() {
            return Err(MapSearchError::InvalidArgument(format!(
                "coordinates must be finite, got ({}, {})",
                self.latitude, self.longitude
            )));
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

/// The single most recently confirmed marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LastMarkerPosition {
    pub place_name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl LastMarkerPosition {
    /// Restores the marker as a search item. Category is not persisted.
    pub fn into_item(self) -> SearchResultItem {
        SearchResultItem {
            place_name: self.place_name,
            address: self.address,
            category: String::new(),
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

impl From<&SearchResultItem> for LastMarkerPosition {
    fn from(item: &SearchResultItem) -> Self {
        Self {
            place_name: item.place_name.clone(),
            address: item.address.clone(),
            latitude: item.latitude,
            longitude: item.longitude,
        }
    }
}

/// Fresh read of both stores, returned after each mutation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub keywords: Vec<String>,
    pub last_position: Option<LastMarkerPosition>,
}
