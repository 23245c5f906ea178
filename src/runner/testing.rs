//! Scripted collaborators for pipeline and orchestrator tests

use crate::error::{FetchError, ModelError, PlacesError};
use crate::imaging::sample_image;
use crate::places::{PhotoFetch, PlaceMatch, PlaceQuery, PlaceRecord, PlaceSearch};
use crate::provider::VisionModel;
use async_trait::async_trait;
use image::ImageFormat;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// Replays canned replies in order; an exhausted script means the server is gone
pub struct ScriptedModel {
    replies: Mutex<VecDeque<Result<String, ModelError>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedModel {
    pub fn new(replies: Vec<Result<String, ModelError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl VisionModel for ScriptedModel {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, prompt: &str, _image: &[u8]) -> Result<String, ModelError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ModelError::Unreachable("script exhausted".to_string())))
    }
}

pub fn reply(score: u8, category: &str, represents_place: bool) -> Result<String, ModelError> {
    Ok(format!(
        r#"{{"quality_score": {}, "category": "{}", "description": "a {} shot",
            "represents_place": {}, "reasoning": "test"}}"#,
        score, category, category, represents_place
    ))
}

/// In-memory places service keyed by location name
#[derive(Default)]
pub struct FakePlaces {
    places: HashMap<String, Result<Vec<String>, String>>,
    search_errors: HashMap<String, PlacesError>,
    broken_photos: HashMap<String, u16>,
    photo_bytes: HashMap<String, Vec<u8>>,
    searches: Mutex<Vec<String>>,
}

impl FakePlaces {
    pub fn new() -> Self {
        Self::default()
    }

    /// A place whose photo refs are `<name>-1..=<name>-n`
    pub fn with_place(mut self, name: &str, photos: usize) -> Self {
        let refs = (1..=photos).map(|i| format!("{}-{}", name, i)).collect();
        self.places.insert(name.to_string(), Ok(refs));
        self
    }

    /// A place with explicit photo refs; an empty string is a photo entry
    /// the provider listed without a reference
    pub fn with_refs(mut self, name: &str, refs: &[&str]) -> Self {
        let refs = refs.iter().map(|r| r.to_string()).collect();
        self.places.insert(name.to_string(), Ok(refs));
        self
    }

    pub fn with_failing_details(mut self, name: &str, message: &str) -> Self {
        self.places
            .insert(name.to_string(), Err(message.to_string()));
        self
    }

    pub fn with_search_error(mut self, name: &str, error: PlacesError) -> Self {
        self.search_errors.insert(name.to_string(), error);
        self
    }

    pub fn with_broken_photo(mut self, photo_ref: &str, status: u16) -> Self {
        self.broken_photos.insert(photo_ref.to_string(), status);
        self
    }

    pub fn with_photo_bytes(mut self, photo_ref: &str, bytes: Vec<u8>) -> Self {
        self.photo_bytes.insert(photo_ref.to_string(), bytes);
        self
    }

    pub fn searches(&self) -> Vec<String> {
        self.searches.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlaceSearch for FakePlaces {
    async fn search(&self, query: &PlaceQuery) -> Result<Vec<PlaceMatch>, PlacesError> {
        self.searches.lock().unwrap().push(query.text());
        if let Some(error) = self.search_errors.get(&query.name) {
            return Err(match error {
                PlacesError::Network(m) => PlacesError::Network(m.clone()),
                PlacesError::Api { status, message } => PlacesError::Api {
                    status: status.clone(),
                    message: message.clone(),
                },
                PlacesError::Parse(m) => PlacesError::Parse(m.clone()),
            });
        }
        if !self.places.contains_key(&query.name) {
            return Ok(Vec::new());
        }
        Ok(vec![
            PlaceMatch {
                place_id: format!("id-{}", query.name),
                name: format!("{} (matched)", query.name),
                address: "1 Test Way".to_string(),
                location: None,
            },
            PlaceMatch {
                place_id: format!("id-{}-second", query.name),
                name: "Runner-up".to_string(),
                address: String::new(),
                location: None,
            },
        ])
    }

    async fn details(&self, place: &PlaceMatch) -> Result<PlaceRecord, PlacesError> {
        let name = place
            .place_id
            .strip_prefix("id-")
            .unwrap_or(&place.place_id);
        match self.places.get(name) {
            Some(Ok(refs)) => Ok(PlaceRecord {
                place_id: place.place_id.clone(),
                name: place.name.clone(),
                address: place.address.clone(),
                photo_refs: refs.clone(),
                location: None,
            }),
            Some(Err(message)) => Err(PlacesError::Api {
                status: "INVALID_REQUEST".to_string(),
                message: message.clone(),
            }),
            None => Err(PlacesError::Api {
                status: "NOT_FOUND".to_string(),
                message: String::new(),
            }),
        }
    }
}

#[async_trait]
impl PhotoFetch for FakePlaces {
    async fn fetch(&self, photo_ref: &str, _max_dimension: u32) -> Result<Vec<u8>, FetchError> {
        if let Some(status) = self.broken_photos.get(photo_ref) {
            return Err(FetchError::Status(*status));
        }
        if let Some(bytes) = self.photo_bytes.get(photo_ref) {
            return Ok(bytes.clone());
        }
        // Lossless PNG with a per-reference color keeps downloads distinct
        let hash = photo_ref
            .bytes()
            .fold(0x811c_9dc5u32, |h, b| (h ^ u32::from(b)).wrapping_mul(0x0100_0193));
        let color = [hash as u8, (hash >> 8) as u8, (hash >> 16) as u8];
        Ok(sample_image(24, 16, color, ImageFormat::Png))
    }
}
