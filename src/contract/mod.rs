//! The judgment schema exchanged with the vision model
//!
//! All leniency towards the model's output lives here: extraction of the
//! JSON object from surrounding prose, score clamping, category coercion
//! and field defaults.

mod extract;
mod prompt;
mod record;

pub use prompt::{PromptConfig, DEFAULT_TEMPLATE};
pub use record::{validate, AnalysisRecord};

/// Category assigned when the model names one outside the active set
pub const FALLBACK_CATEGORY: &str = "other";
