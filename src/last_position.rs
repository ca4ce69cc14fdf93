//! The last confirmed map marker.
//!
//! Stored as four keys so the layout matches what the Android app kept in
//! its `LastMarkerPrefs` preferences. A record is only returned when every
//! field is present and valid; anything partial reads as "no marker".

use log::{debug, warn};

use crate::kv_port::KeyValueStore;
use crate::map_search_error::Result;
use crate::search_model::{LastMarkerPosition, SearchResultItem};

pub const LATITUDE_KEY: &str = "lastLatitude";
pub const LONGITUDE_KEY: &str = "lastLongitude";
pub const PLACE_NAME_KEY: &str = "lastPlaceName";
pub const ADDRESS_KEY: &str = "lastRoadAddressName";

pub struct LastPositionStore<S> {
    store: S,
}

impl<S: KeyValueStore> LastPositionStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn load(&self) -> Result<Option<LastMarkerPosition>> {
        if !self.store.contains(LATITUDE_KEY)? || !self.store.contains(LONGITUDE_KEY)? {
            debug!("No last marker position stored");
            return Ok(None);
        }

        let (latitude, longitude) = match (
            self.read_coordinate(LATITUDE_KEY)?,
            self.read_coordinate(LONGITUDE_KEY)?,
        ) {
            (Some(lat), Some(lon)) => (lat, lon),
            _ => return Ok(None),
        };

        let place_name = self.store.get(PLACE_NAME_KEY)?.unwrap_or_default();
        let address = self.store.get(ADDRESS_KEY)?.unwrap_or_default();

        if place_name.is_empty() || address.is_empty() {
            debug!("Stored marker has no place name or address; ignoring it");
            return Ok(None);
        }

        Ok(Some(LastMarkerPosition {
            place_name,
            address,
            latitude,
            longitude,
        }))
    }

    /// Overwrites the stored marker with `item` in a single write.
    pub fn save(&self, item: &SearchResultItem) -> Result<()> {
        item.validate()?;

        let latitude = item.latitude.to_string();
        let longitude = item.longitude.to_string();

        self.store.put_all(&[
            (LATITUDE_KEY, latitude.as_str()),
            (LONGITUDE_KEY, longitude.as_str()),
            (PLACE_NAME_KEY, item.place_name.as_str()),
            (ADDRESS_KEY, item.address.as_str()),
        ])?;

        debug!(
            "Saved last marker position: lat={}, lon={}, place_name={}",
            item.latitude, item.longitude, item.place_name
        );
        Ok(())
    }

    fn read_coordinate(&self, key: &str) -> Result<Option<f64>> {
        let Some(raw) = self.store.get(key)? else {
            return Ok(None);
        };
        match raw.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(Some(value)),
            _ => {
                warn!("Unreadable coordinate under '{key}': {raw:?}");
                Ok(None)
            }
        }
    }
}
