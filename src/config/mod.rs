mod defaults;
mod profiles;
mod types;

pub use profiles::{builtin, BUILTIN_PROFILES};
pub use types::*;

use crate::contract::{PromptConfig, DEFAULT_TEMPLATE};
use crate::error::ConfigError;
use defaults::*;
use std::collections::BTreeMap;
use std::path::Path;

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            max_candidates: default_max_candidates(),
            select_count: default_select_count(),
            max_dimension: default_max_dimension(),
            request_delay_ms: default_request_delay_ms(),
            profile: default_profile(),
            profiles: BTreeMap::new(),
            bias: GeoBias::default(),
            places: PlacesConfig::default(),
            model: ModelConfig::default(),
            retry: RetryConfig::default(),
        }
    }
}

impl Config {
    /// Load config from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load the file if it exists, otherwise fall back to defaults
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version != SUPPORTED_VERSION {
            return Err(ConfigError::Invalid {
                field: "version",
                reason: format!(
                    "unsupported config version {} (expected {})",
                    self.version, SUPPORTED_VERSION
                ),
            });
        }
        if self.max_candidates == 0 {
            return Err(ConfigError::Invalid {
                field: "max_candidates",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.select_count == 0 {
            return Err(ConfigError::Invalid {
                field: "select_count",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.max_dimension < 16 {
            return Err(ConfigError::Invalid {
                field: "max_dimension",
                reason: format!("{} px is too small to judge a photo", self.max_dimension),
            });
        }
        if self.retry.max_attempts == 0 {
            return Err(ConfigError::Invalid {
                field: "retry.max_attempts",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.bias.radius_m.is_some() && self.bias.center.is_none() {
            return Err(ConfigError::Invalid {
                field: "bias.radius_m",
                reason: "requires bias.center".to_string(),
            });
        }

        let profile = self.active_profile()?;
        if profile.categories.iter().all(|c| c.trim().is_empty()) {
            return Err(ConfigError::EmptyCategories(self.profile.clone()));
        }

        Ok(())
    }

    /// The active profile: user-defined first, then built-in
    pub fn active_profile(&self) -> Result<ProfileConfig, ConfigError> {
        if let Some(profile) = self.profiles.get(&self.profile) {
            return Ok(profile.clone());
        }
        builtin(&self.profile)
            .map(ProfileConfig::from)
            .ok_or_else(|| ConfigError::UnknownProfile(self.profile.clone()))
    }

    /// Resolve the active profile into the prompt configuration used for analysis
    pub fn prompt_config(&self) -> Result<PromptConfig, ConfigError> {
        let profile = self.active_profile()?;

        let template = match &profile.prompt_file {
            Some(path) => std::fs::read_to_string(path).map_err(|e| ConfigError::PromptFile {
                path: path.clone(),
                source: e,
            })?,
            None => DEFAULT_TEMPLATE.to_string(),
        };

        Ok(PromptConfig::new(
            &self.profile,
            profile.categories,
            profile.guidance,
            template,
        ))
    }
}
