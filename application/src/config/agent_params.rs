//! Run parameters for the agent and research use cases.
//!
//! These are application-layer budgets, injected by the binary after the
//! configuration file has been loaded.

use scout_domain::ActionDefaults;
use serde::{Deserialize, Serialize};

/// Budgets for a single agent run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentParams {
    /// `max_results` used when the planner omits it.
    pub search_max_results: u32,
    /// `max_chars` used for page fetches when the planner omits it.
    pub fetch_max_chars: usize,
    /// Characters of page text handed to each page summary.
    pub preview_chars: usize,
    /// Search results used as grounding for synthesis.
    pub max_grounding_results: usize,
    /// First fetch attempt skips certificate verification.
    pub insecure_ssl: bool,
}

impl Default for AgentParams {
    fn default() -> Self {
        Self {
            search_max_results: 5,
            fetch_max_chars: 4000,
            preview_chars: 1500,
            max_grounding_results: 8,
            insecure_ssl: false,
        }
    }
}

impl AgentParams {
    // ==================== Builder Methods ====================

    pub fn with_search_max_results(mut self, max: u32) -> Self {
        self.search_max_results = max;
        self
    }

    pub fn with_fetch_max_chars(mut self, max: usize) -> Self {
        self.fetch_max_chars = max;
        self
    }

    pub fn with_preview_chars(mut self, max: usize) -> Self {
        self.preview_chars = max;
        self
    }

    pub fn with_max_grounding_results(mut self, max: usize) -> Self {
        self.max_grounding_results = max;
        self
    }

    pub fn with_insecure_ssl(mut self, insecure: bool) -> Self {
        self.insecure_ssl = insecure;
        self
    }

    /// Defaults applied by the action parser.
    pub fn action_defaults(&self) -> ActionDefaults {
        ActionDefaults {
            max_results: self.search_max_results,
            max_chars: self.fetch_max_chars,
        }
    }
}

/// Budgets for a research report run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchParams {
    pub max_results: u32,
    /// Top results whose pages are fetched.
    pub max_pages: usize,
    pub page_max_chars: usize,
    pub insecure_ssl: bool,
}

impl Default for ResearchParams {
    fn default() -> Self {
        Self {
            max_results: 6,
            max_pages: 5,
            page_max_chars: 8000,
            insecure_ssl: false,
        }
    }
}

impl ResearchParams {
    pub fn with_max_results(mut self, max: u32) -> Self {
        self.max_results = max;
        self
    }

    pub fn with_max_pages(mut self, max: usize) -> Self {
        self.max_pages = max;
        self
    }

    pub fn with_page_max_chars(mut self, max: usize) -> Self {
        self.page_max_chars = max;
        self
    }

    pub fn with_insecure_ssl(mut self, insecure: bool) -> Self {
        self.insecure_ssl = insecure;
        self
    }
}
