use crate::contract::{validate, AnalysisRecord, PromptConfig};
use crate::error::{AnalysisError, ModelError};
use crate::provider::VisionModel;
use std::sync::Arc;
use tracing::{debug, warn};

/// Judges one photo at a time with the vision model.
///
/// Replies that fail validation are retried with a "JSON only" reminder;
/// transport failures are never retried here since they mean the model
/// service itself is gone.
pub struct PhotoAnalyzer {
    model: Arc<dyn VisionModel>,
    prompt: PromptConfig,
    malformed_retries: u32,
}

impl PhotoAnalyzer {
    pub fn new(model: Arc<dyn VisionModel>, prompt: PromptConfig, malformed_retries: u32) -> Self {
        Self {
            model,
            prompt,
            malformed_retries,
        }
    }

    pub fn prompt(&self) -> &PromptConfig {
        &self.prompt
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    pub async fn analyze(
        &self,
        image: &[u8],
        location: &str,
    ) -> Result<AnalysisRecord, AnalysisError> {
        let max_attempts = self.malformed_retries.saturating_add(1);
        let mut attempts = 0;

        loop {
            attempts += 1;
            let prompt = if attempts == 1 {
                self.prompt.render(location)
            } else {
                self.prompt.render_with_reminder(location)
            };

            let reply = self
                .model
                .generate(&prompt, image)
                .await
                .map_err(classify)?;

            match validate(&reply, &self.prompt) {
                Ok(record) => {
                    debug!(
                        location,
                        attempts,
                        score = record.quality_score,
                        category = %record.category,
                        "Photo analyzed"
                    );
                    return Ok(record);
                }
                Err(e) if attempts >= max_attempts => {
                    return Err(AnalysisError::MalformedResponse { attempts, last: e });
                }
                Err(e) => {
                    warn!(
                        location,
                        attempt = attempts,
                        "Unusable model reply ({}); re-prompting for JSON only",
                        e
                    );
                }
            }
        }
    }
}

fn classify(error: ModelError) -> AnalysisError {
    match error {
        ModelError::Unreachable(_) | ModelError::Timeout(_) | ModelError::ModelMissing(_) => {
            AnalysisError::ModelUnavailable(error)
        }
        ModelError::Status { .. } | ModelError::Parse(_) => AnalysisError::Rejected(error),
    }
}
