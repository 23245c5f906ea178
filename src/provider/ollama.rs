use super::VisionModel;
use crate::config::ModelConfig;
use crate::error::ModelError;
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Vision model served by a local Ollama instance
pub struct OllamaVision {
    http_client: reqwest::Client,
    endpoint: String,
    model: String,
    temperature: f32,
    timeout: Duration,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    images: Vec<String>,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<TagEntry>,
}

#[derive(Debug, Deserialize)]
struct TagEntry {
    name: String,
}

impl OllamaVision {
    pub fn new(config: &ModelConfig) -> Result<Self, ModelError> {
        let timeout = Duration::from_secs(config.timeout_sec);
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ModelError::Unreachable(e.to_string()))?;

        Ok(Self {
            http_client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.name.clone(),
            temperature: config.temperature,
            timeout,
        })
    }

    fn map_transport(&self, e: reqwest::Error) -> ModelError {
        if e.is_timeout() {
            ModelError::Timeout(self.timeout)
        } else {
            ModelError::Unreachable(e.to_string())
        }
    }

    /// List installed models and confirm the configured one is among them
    pub async fn preflight(&self) -> Result<Vec<String>, ModelError> {
        let url = format!("{}/api/tags", self.endpoint);
        debug!(url = %url, "Checking Ollama model list");

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.map_transport(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ModelError::Status {
                code: status.as_u16(),
                body,
            });
        }

        let tags: TagsResponse = response
            .json()
            .await
            .map_err(|e| ModelError::Parse(e.to_string()))?;
        let installed: Vec<String> = tags.models.into_iter().map(|m| m.name).collect();

        if !model_listed(&installed, &self.model) {
            return Err(ModelError::ModelMissing(self.model.clone()));
        }
        Ok(installed)
    }
}

#[async_trait]
impl VisionModel for OllamaVision {
    fn name(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str, image: &[u8]) -> Result<String, ModelError> {
        let url = format!("{}/api/generate", self.endpoint);
        let body = GenerateRequest {
            model: &self.model,
            prompt,
            images: vec![general_purpose::STANDARD.encode(image)],
            stream: false,
            options: GenerateOptions {
                temperature: self.temperature,
            },
        };

        let start = std::time::Instant::now();
        let response = self
            .http_client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_transport(e))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ModelError::ModelMissing(self.model.clone()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ModelError::Status {
                code: status.as_u16(),
                body,
            });
        }

        let reply: GenerateResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                ModelError::Timeout(self.timeout)
            } else {
                ModelError::Parse(e.to_string())
            }
        })?;

        debug!(
            model = %self.model,
            elapsed = ?start.elapsed(),
            chars = reply.response.len(),
            "Model replied"
        );
        Ok(reply.response)
    }
}

/// `llava` matches an installed `llava:latest`; tagged names must match exactly
fn model_listed(installed: &[String], wanted: &str) -> bool {
    let wanted_full = if wanted.contains(':') {
        wanted.to_string()
    } else {
        format!("{}:latest", wanted)
    };
    installed.iter().any(|name| *name == wanted_full || name == wanted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_listed() {
        let installed = vec!["llava:13b".to_string(), "moondream:latest".to_string()];
        assert!(model_listed(&installed, "llava:13b"));
        assert!(model_listed(&installed, "moondream"));
        assert!(!model_listed(&installed, "llava"));
        assert!(!model_listed(&installed, "llava:7b"));
    }

    #[test]
    fn test_request_body_shape() {
        let body = GenerateRequest {
            model: "llava:13b",
            prompt: "rate this",
            images: vec![general_purpose::STANDARD.encode(b"abc")],
            stream: false,
            options: GenerateOptions { temperature: 0.0 },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "llava:13b");
        assert_eq!(json["images"][0], "YWJj");
        assert_eq!(json["stream"], false);
        assert_eq!(json["options"]["temperature"], 0.0);
    }

    #[test]
    fn test_parse_tags() {
        let raw = r#"{"models": [{"name": "llava:13b", "size": 8000000000}]}"#;
        let tags: TagsResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(tags.models[0].name, "llava:13b");
    }

    #[tokio::test]
    async fn test_unreachable_server() {
        let config = ModelConfig {
            endpoint: "http://127.0.0.1:1".to_string(),
            timeout_sec: 5,
            ..ModelConfig::default()
        };
        let model = OllamaVision::new(&config).unwrap();

        let err = model.generate("prompt", b"bytes").await.unwrap_err();
        assert!(matches!(
            err,
            ModelError::Unreachable(_) | ModelError::Timeout(_)
        ));
    }
}
