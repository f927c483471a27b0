//! Model configuration from TOML (`[model]` section)

use scout_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Raw `[model]` configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelConfig {
    /// Preferred Gemini model
    pub name: String,
    /// Model retried once on quota or availability failures.
    /// Empty or equal to `name` disables the retry.
    pub fallback: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// API key given directly (takes precedence over `api_key_env`)
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout_seconds: u64,
}

impl Default for FileModelConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_MODEL.to_string(),
            fallback: DEFAULT_MODEL.to_string(),
            api_key_env: "GOOGLE_API_KEY".to_string(),
            api_key: None,
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            timeout_seconds: 60,
        }
    }
}

impl FileModelConfig {
    /// Fallback model, if it differs from the preferred one.
    pub fn fallback_model(&self) -> Option<&str> {
        let fallback = self.fallback.trim();
        (!fallback.is_empty() && fallback != self.name.trim()).then_some(fallback)
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.name.trim().is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyValue {
                    field: "model.name".to_string(),
                },
                "model.name: empty model name",
            ));
        }
        if self.api_key.is_none() && self.api_key_env.trim().is_empty() {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::EmptyValue {
                    field: "model.api_key_env".to_string(),
                },
                "model.api_key_env: empty, no API key will be sent",
            ));
        }
        let base = self.base_url.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::InvalidUrl {
                    field: "model.base_url".to_string(),
                    value: self.base_url.clone(),
                },
                format!("model.base_url: '{}' is not an http(s) URL", self.base_url),
            ));
        }

        issues
    }
}
