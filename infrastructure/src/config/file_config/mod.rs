//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod agent;
mod logging;
mod model;
mod output;
mod research;
mod server;

pub use agent::FileAgentConfig;
pub use logging::FileLoggingConfig;
pub use model::{DEFAULT_GEMINI_BASE_URL, DEFAULT_MODEL, FileModelConfig};
pub use output::FileOutputConfig;
pub use research::FileResearchConfig;
pub use server::{DEFAULT_SERVER_URL, FileServerConfig};

use scout_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// MCP tool server
    pub server: FileServerConfig,
    /// Text generation model
    pub model: FileModelConfig,
    /// Single-turn agent budgets
    pub agent: FileAgentConfig,
    /// Research report budgets
    pub research: FileResearchConfig,
    /// Output settings
    pub output: FileOutputConfig,
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        issues.extend(self.server.validate());
        issues.extend(self.model.validate());
        issues.extend(self.agent.validate());
        issues.extend(self.research.validate());
        issues
    }
}

/// Budget fields that are zero make every run degrade; reported as errors.
fn zero_budget(field: &str, value: usize) -> Option<ConfigIssue> {
    (value == 0).then(|| {
        ConfigIssue::error(
            ConfigIssueCode::ZeroBudget {
                field: field.to_string(),
            },
            format!("{field}: must be greater than 0"),
        )
    })
}
