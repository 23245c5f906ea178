mod google;
mod pacer;

pub use google::GooglePlaces;
pub use pacer::Pacer;

use crate::config::{GeoBias, LatLng};
use crate::error::{FetchError, PlacesError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A location name plus the configured geographic bias
#[derive(Debug, Clone)]
pub struct PlaceQuery {
    pub name: String,
    pub region: Option<String>,
    pub center: Option<LatLng>,
    pub radius_m: Option<u32>,
}

impl PlaceQuery {
    pub fn new(name: &str, bias: &GeoBias) -> Self {
        Self {
            name: name.to_string(),
            region: bias.region.clone(),
            center: bias.center,
            radius_m: bias.radius_m,
        }
    }

    /// Free text sent to the search, e.g. "Muir Woods California"
    pub fn text(&self) -> String {
        match self.region.as_deref().map(str::trim) {
            Some(region) if !region.is_empty() => format!("{} {}", self.name.trim(), region),
            _ => self.name.trim().to_string(),
        }
    }
}

/// One search hit, before photo references are looked up
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceMatch {
    pub place_id: String,
    pub name: String,
    pub address: String,
    pub location: Option<LatLng>,
}

/// A resolved place with its photo references
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceRecord {
    pub place_id: String,
    pub name: String,
    pub address: String,
    pub photo_refs: Vec<String>,
    pub location: Option<LatLng>,
}

impl PlaceRecord {
    /// Record without photos, used when the details lookup fails
    pub fn from_match(place: &PlaceMatch) -> Self {
        Self {
            place_id: place.place_id.clone(),
            name: place.name.clone(),
            address: place.address.clone(),
            photo_refs: Vec::new(),
            location: place.location,
        }
    }
}

#[async_trait]
pub trait PlaceSearch: Send + Sync {
    /// Ranked matches; an empty list means nothing matched
    async fn search(&self, query: &PlaceQuery) -> Result<Vec<PlaceMatch>, PlacesError>;

    async fn details(&self, place: &PlaceMatch) -> Result<PlaceRecord, PlacesError>;
}

#[async_trait]
pub trait PhotoFetch: Send + Sync {
    async fn fetch(&self, photo_ref: &str, max_dimension: u32) -> Result<Vec<u8>, FetchError>;
}
