//! Google Places client: text search, place details and photo download

use super::{Pacer, PhotoFetch, PlaceMatch, PlaceQuery, PlaceRecord, PlaceSearch};
use crate::config::{LatLng, PlacesConfig};
use crate::error::{FetchError, PlacesError};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = concat!("location-curator/", env!("CARGO_PKG_VERSION"));
const DETAIL_FIELDS: &str = "name,formatted_address,geometry,photos";

pub struct GooglePlaces {
    http_client: reqwest::Client,
    endpoint: String,
    api_key: String,
    photo_timeout: Duration,
    pacer: Arc<Pacer>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    status: String,
    #[serde(default)]
    results: Vec<SearchResult>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    place_id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    formatted_address: String,
    #[serde(default)]
    geometry: Option<Geometry>,
}

#[derive(Debug, Deserialize)]
struct DetailsResponse {
    status: String,
    #[serde(default)]
    result: Option<DetailsResult>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DetailsResult {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    formatted_address: Option<String>,
    #[serde(default)]
    geometry: Option<Geometry>,
    #[serde(default)]
    photos: Vec<PhotoEntry>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct PhotoEntry {
    #[serde(default)]
    photo_reference: Option<String>,
}

impl GooglePlaces {
    pub fn new(config: &PlacesConfig, api_key: String, pacer: Arc<Pacer>) -> Result<Self, PlacesError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_sec))
            .build()
            .map_err(|e| PlacesError::Network(e.without_url().to_string()))?;

        Ok(Self {
            http_client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key,
            photo_timeout: Duration::from_secs(config.photo_timeout_sec),
            pacer,
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, PlacesError> {
        self.pacer.wait().await;

        let url = format!("{}/{}", self.endpoint, path);
        debug!(url = %url, "Querying Google Places");

        let response = self
            .http_client
            .get(&url)
            .query(&[("key", self.api_key.as_str())])
            .query(params)
            .send()
            .await
            .map_err(|e| PlacesError::Network(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PlacesError::Api {
                status: format!("HTTP {}", status.as_u16()),
                message: body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| PlacesError::Parse(e.without_url().to_string()))
    }
}

fn search_params(query: &PlaceQuery) -> Vec<(&'static str, String)> {
    let mut params = vec![("query", query.text())];
    if let Some(center) = query.center {
        params.push(("location", format!("{},{}", center.lat, center.lng)));
        if let Some(radius) = query.radius_m {
            params.push(("radius", radius.to_string()));
        }
    }
    params
}

fn parse_search(response: SearchResponse) -> Result<Vec<PlaceMatch>, PlacesError> {
    match response.status.as_str() {
        "OK" => Ok(response
            .results
            .into_iter()
            .map(|r| PlaceMatch {
                place_id: r.place_id,
                name: r.name,
                address: r.formatted_address,
                location: r.geometry.map(|g| g.location),
            })
            .collect()),
        "ZERO_RESULTS" => Ok(Vec::new()),
        other => Err(PlacesError::Api {
            status: other.to_string(),
            message: response.error_message.unwrap_or_default(),
        }),
    }
}

fn parse_details(place: &PlaceMatch, response: DetailsResponse) -> Result<PlaceRecord, PlacesError> {
    if response.status != "OK" {
        return Err(PlacesError::Api {
            status: response.status,
            message: response.error_message.unwrap_or_default(),
        });
    }
    let result = response
        .result
        .ok_or_else(|| PlacesError::Parse("details response has no result".to_string()))?;

    Ok(PlaceRecord {
        place_id: place.place_id.clone(),
        name: result.name.unwrap_or_else(|| place.name.clone()),
        address: result
            .formatted_address
            .unwrap_or_else(|| place.address.clone()),
        // One slot per listed photo, even without a reference, so candidate
        // numbers match the provider's photo order
        photo_refs: result
            .photos
            .into_iter()
            .map(|p| p.photo_reference.unwrap_or_default())
            .collect(),
        location: result.geometry.map(|g| g.location).or(place.location),
    })
}

#[async_trait]
impl PlaceSearch for GooglePlaces {
    async fn search(&self, query: &PlaceQuery) -> Result<Vec<PlaceMatch>, PlacesError> {
        let response: SearchResponse = self
            .get_json("textsearch/json", &search_params(query))
            .await?;
        parse_search(response)
    }

    async fn details(&self, place: &PlaceMatch) -> Result<PlaceRecord, PlacesError> {
        let params = [
            ("place_id", place.place_id.clone()),
            ("fields", DETAIL_FIELDS.to_string()),
        ];
        let response: DetailsResponse = self.get_json("details/json", &params).await?;
        parse_details(place, response)
    }
}

#[async_trait]
impl PhotoFetch for GooglePlaces {
    async fn fetch(&self, photo_ref: &str, max_dimension: u32) -> Result<Vec<u8>, FetchError> {
        self.pacer.wait().await;

        let url = format!("{}/photo", self.endpoint);
        let maxwidth = max_dimension.to_string();
        let response = self
            .http_client
            .get(&url)
            .timeout(self.photo_timeout)
            .query(&[
                ("key", self.api_key.as_str()),
                ("photo_reference", photo_ref),
                ("maxwidth", maxwidth.as_str()),
            ])
            .send()
            .await
            .map_err(|e| FetchError::Network(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::Network(e.without_url().to_string()))?;
        Ok(bytes.to_vec())
    }
}
