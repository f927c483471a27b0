//! Agent configuration from TOML (`[agent]` section)

use super::zero_budget;
use scout_application::AgentParams;
use scout_domain::ConfigIssue;
use serde::{Deserialize, Serialize};

/// Raw `[agent]` configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAgentConfig {
    pub search_max_results: u32,
    pub fetch_max_chars: usize,
    /// Characters of page text passed to each page summary
    pub preview_chars: usize,
    pub max_grounding_results: usize,
    /// Skip certificate verification on the first fetch attempt
    pub insecure_ssl: bool,
}

impl Default for FileAgentConfig {
    fn default() -> Self {
        let params = AgentParams::default();
        Self {
            search_max_results: params.search_max_results,
            fetch_max_chars: params.fetch_max_chars,
            preview_chars: params.preview_chars,
            max_grounding_results: params.max_grounding_results,
            insecure_ssl: params.insecure_ssl,
        }
    }
}

impl FileAgentConfig {
    pub fn to_params(&self) -> AgentParams {
        AgentParams::default()
            .with_search_max_results(self.search_max_results)
            .with_fetch_max_chars(self.fetch_max_chars)
            .with_preview_chars(self.preview_chars)
            .with_max_grounding_results(self.max_grounding_results)
            .with_insecure_ssl(self.insecure_ssl)
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        [
            ("agent.search_max_results", self.search_max_results as usize),
            ("agent.fetch_max_chars", self.fetch_max_chars),
            ("agent.preview_chars", self.preview_chars),
            ("agent.max_grounding_results", self.max_grounding_results),
        ]
        .into_iter()
        .filter_map(|(field, value)| zero_budget(field, value))
        .collect()
    }
}
