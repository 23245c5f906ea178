use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Unknown category profile '{0}'")]
    UnknownProfile(String),

    #[error("Profile '{0}' defines no categories")]
    EmptyCategories(String),

    #[error("Failed to read prompt template '{path}': {source}")]
    PromptFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid setting '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Error, Debug)]
pub enum InputError {
    #[error("Failed to read locations from '{path}': {source}")]
    Read { path: PathBuf, source: csv::Error },

    #[error("Column '{column}' not found in '{path}'")]
    MissingColumn { path: PathBuf, column: String },
}

#[derive(Error, Debug)]
pub enum PlacesError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Places API returned {status}: {message}")]
    Api { status: String, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl PlacesError {
    /// Worth retrying: transport trouble, server errors, or throttling
    pub fn is_transient(&self) -> bool {
        match self {
            PlacesError::Network(_) => true,
            PlacesError::Api { status, .. } => {
                status.starts_with("HTTP 5")
                    || status == "OVER_QUERY_LIMIT"
                    || status == "UNKNOWN_ERROR"
            }
            PlacesError::Parse(_) => false,
        }
    }
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Photo request returned HTTP {0}")]
    Status(u16),

    #[error("Not a decodable image: {0}")]
    Decode(String),
}

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Model service unreachable: {0}")]
    Unreachable(String),

    #[error("Model request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Model service returned HTTP {code}: {body}")]
    Status { code: u16, body: String },

    #[error("Model '{0}' is not installed on the server")]
    ModelMissing(String),

    #[error("Unexpected model response: {0}")]
    Parse(String),
}

/// Raised by the analysis contract when no JSON object can be recovered.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Model reply was empty")]
    Empty,

    #[error("No JSON object found in model reply")]
    NoObject,
}

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Malformed model response after {attempts} attempts: {last}")]
    MalformedResponse {
        attempts: u32,
        last: ValidationError,
    },

    #[error("Vision model unavailable: {0}")]
    ModelUnavailable(ModelError),

    #[error("Model rejected the photo: {0}")]
    Rejected(ModelError),
}

impl AnalysisError {
    /// Fatal errors stop the whole batch, not just the current photo.
    pub fn is_fatal(&self) -> bool {
        matches!(self, AnalysisError::ModelUnavailable(_))
    }
}

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to create output directory: {0}")]
    CreateDir(std::io::Error),

    #[error("Failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
