use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use super::defaults::*;

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct Config {
    /// Config format version; only `1` is understood
    #[serde(default = "default_version")]
    pub version: u32,

    /// Photo references to download per location
    #[serde(default = "default_max_candidates")]
    pub max_candidates: usize,

    /// Winners kept per location
    #[serde(default = "default_select_count")]
    pub select_count: usize,

    /// Longest edge (pixels) of every stored candidate
    #[serde(default = "default_max_dimension")]
    pub max_dimension: u32,

    /// Minimum gap between calls to the places service
    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,

    /// Category profile used for prompting and diversity
    #[serde(default = "default_profile")]
    pub profile: String,

    /// User-defined profiles; a name shadows the built-in of the same name
    #[serde(default)]
    pub profiles: BTreeMap<String, ProfileConfig>,

    #[serde(default)]
    pub bias: GeoBias,

    #[serde(default)]
    pub places: PlacesConfig,

    #[serde(default)]
    pub model: ModelConfig,

    /// Backoff for place search transport errors
    #[serde(default)]
    pub retry: RetryConfig,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
pub struct ProfileConfig {
    pub categories: Vec<String>,

    /// Extra scoring guidance appended to the prompt
    #[serde(default)]
    pub guidance: String,

    /// Replaces the built-in prompt template
    #[serde(default)]
    pub prompt_file: Option<PathBuf>,
}

/// Geographic bias applied to every place search
#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema)]
pub struct GeoBias {
    /// Appended to the query text, e.g. "California"
    #[serde(default)]
    pub region: Option<String>,

    #[serde(default)]
    pub center: Option<LatLng>,

    #[serde(default)]
    pub radius_m: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize, JsonSchema)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct PlacesConfig {
    #[serde(default = "default_places_endpoint")]
    pub endpoint: String,

    /// Usually supplied through GOOGLE_PLACES_API_KEY instead
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_places_timeout_sec")]
    pub timeout_sec: u64,

    #[serde(default = "default_photo_timeout_sec")]
    pub photo_timeout_sec: u64,
}

impl Default for PlacesConfig {
    fn default() -> Self {
        Self {
            endpoint: default_places_endpoint(),
            api_key: None,
            timeout_sec: default_places_timeout_sec(),
            photo_timeout_sec: default_photo_timeout_sec(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct ModelConfig {
    /// Base URL of the Ollama server
    #[serde(default = "default_model_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_model_name")]
    pub name: String,

    #[serde(default = "default_model_timeout_sec")]
    pub timeout_sec: u64,

    /// Re-prompts allowed after a reply that is not valid JSON
    #[serde(default = "default_malformed_retries")]
    pub malformed_retries: u32,

    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            endpoint: default_model_endpoint(),
            name: default_model_name(),
            timeout_sec: default_model_timeout_sec(),
            malformed_retries: default_malformed_retries(),
            temperature: default_temperature(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct RetryConfig {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    #[serde(default = "default_backoff_base_ms")]
    pub backoff_base_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            backoff_base_ms: default_backoff_base_ms(),
        }
    }
}
