//! Research configuration from TOML (`[research]` section)

use super::zero_budget;
use scout_application::ResearchParams;
use scout_domain::ConfigIssue;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw `[research]` configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileResearchConfig {
    pub max_results: u32,
    pub max_pages: usize,
    pub page_max_chars: usize,
    /// Where the Markdown report is written
    pub out: PathBuf,
}

impl Default for FileResearchConfig {
    fn default() -> Self {
        let params = ResearchParams::default();
        Self {
            max_results: params.max_results,
            max_pages: params.max_pages,
            page_max_chars: params.page_max_chars,
            out: PathBuf::from("research_report.md"),
        }
    }
}

impl FileResearchConfig {
    pub fn to_params(&self, insecure_ssl: bool) -> ResearchParams {
        ResearchParams::default()
            .with_max_results(self.max_results)
            .with_max_pages(self.max_pages)
            .with_page_max_chars(self.page_max_chars)
            .with_insecure_ssl(insecure_ssl)
    }

    pub fn validate(&self) -> Vec<ConfigIssue> {
        [
            ("research.max_results", self.max_results as usize),
            ("research.page_max_chars", self.page_max_chars),
        ]
        .into_iter()
        .filter_map(|(field, value)| zero_budget(field, value))
        .collect()
    }
}
