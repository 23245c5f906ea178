use super::FALLBACK_CATEGORY;

pub const DEFAULT_TEMPLATE: &str = include_str!("../../prompts/analyze.md");

const JSON_REMINDER: &str = "IMPORTANT: your previous reply could not be parsed. \
    Respond with JSON only: a single object with the fields above and no other text.";

/// Category set and prompt text for one curation domain
#[derive(Debug, Clone)]
pub struct PromptConfig {
    profile: String,
    categories: Vec<String>,
    guidance: String,
    template: String,
}

impl PromptConfig {
    /// Categories are normalized and de-duplicated in order; the fallback
    /// category is always present and always last.
    pub fn new(
        profile: &str,
        categories: impl IntoIterator<Item = String>,
        guidance: impl Into<String>,
        template: impl Into<String>,
    ) -> Self {
        let mut normalized: Vec<String> = Vec::new();
        for category in categories {
            let category = normalize_category(&category);
            if category.is_empty() || category == FALLBACK_CATEGORY {
                continue;
            }
            if !normalized.contains(&category) {
                normalized.push(category);
            }
        }
        normalized.push(FALLBACK_CATEGORY.to_string());

        Self {
            profile: profile.to_string(),
            categories: normalized,
            guidance: guidance.into(),
            template: template.into(),
        }
    }

    pub fn profile(&self) -> &str {
        &self.profile
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn recognizes(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }

    /// Render the prompt for one location. Identical inputs give identical text.
    pub fn render(&self, location: &str) -> String {
        self.template
            .replace("{categories}", &self.categories.join(", "))
            .replace("{guidance}", self.guidance.trim())
            .replace("{location}", location)
            .trim_end()
            .to_string()
    }

    /// Prompt used after a reply that failed validation
    pub fn render_with_reminder(&self, location: &str) -> String {
        format!("{}\n\n{}", self.render(location), JSON_REMINDER)
    }
}

/// Lowercase and fold every run of non-alphanumeric characters into one
/// underscore, so a category is always safe inside a file name
pub fn normalize_category(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}
