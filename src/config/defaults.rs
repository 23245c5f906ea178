pub const SUPPORTED_VERSION: u32 = 1;

pub fn default_version() -> u32 {
    SUPPORTED_VERSION
}

pub fn default_max_candidates() -> usize {
    10
}

pub fn default_select_count() -> usize {
    3
}

pub fn default_max_dimension() -> u32 {
    1200
}

pub fn default_request_delay_ms() -> u64 {
    250
}

pub fn default_profile() -> String {
    "general".to_string()
}

pub fn default_places_endpoint() -> String {
    "https://maps.googleapis.com/maps/api/place".to_string()
}

pub fn default_places_timeout_sec() -> u64 {
    30
}

pub fn default_photo_timeout_sec() -> u64 {
    60
}

pub fn default_model_endpoint() -> String {
    "http://localhost:11434".to_string()
}

pub fn default_model_name() -> String {
    "llava:13b".to_string()
}

pub fn default_model_timeout_sec() -> u64 {
    120
}

pub fn default_malformed_retries() -> u32 {
    1 // one re-prompt fixes most stray-prose replies
}

pub fn default_temperature() -> f32 {
    0.0
}

pub fn default_max_attempts() -> u32 {
    3
}

pub fn default_backoff_base_ms() -> u64 {
    1000
}
