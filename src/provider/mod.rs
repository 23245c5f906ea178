mod ollama;

pub use ollama::OllamaVision;

use crate::error::ModelError;
use async_trait::async_trait;

#[async_trait]
pub trait VisionModel: Send + Sync {
    fn name(&self) -> &str;

    /// Send one image with a prompt; returns the model's raw text reply
    async fn generate(&self, prompt: &str, image: &[u8]) -> Result<String, ModelError>;
}
