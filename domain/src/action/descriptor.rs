//! Action descriptor entities

use serde::{Deserialize, Serialize};

/// Tool name of the web search action.
pub const SEARCH_WEB: &str = "search_web";

/// Tool name of the page fetch action.
pub const FETCH_URL: &str = "fetch_url";

/// Defaults applied when the planner omits optional arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionDefaults {
    /// `max_results` for `search_web`
    pub max_results: u32,
    /// `max_chars` for `fetch_url`
    pub max_chars: usize,
}

impl Default for ActionDefaults {
    fn default() -> Self {
        Self {
            max_results: 5,
            max_chars: 4000,
        }
    }
}

/// One page the planner asked to fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchTarget {
    pub url: String,
    pub max_chars: usize,
}

impl FetchTarget {
    pub fn new(url: impl Into<String>, max_chars: usize) -> Self {
        Self {
            url: url.into(),
            max_chars,
        }
    }
}

/// The planner's decision for one run.
///
/// Built only by [`parse_action`](super::parse_action) and consumed once by
/// the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActionDescriptor {
    /// Search the web and ground the answer on the snippets.
    SearchWeb { query: String, max_results: u32 },
    /// Fetch one or more pages and summarize each.
    ///
    /// `skipped` counts argument entries that carried no usable URL.
    FetchUrl {
        targets: Vec<FetchTarget>,
        skipped: usize,
    },
    /// No tool: `text` is the planner's own answer.
    None { text: String },
}

impl ActionDescriptor {
    pub fn kind(&self) -> &'static str {
        match self {
            ActionDescriptor::SearchWeb { .. } => SEARCH_WEB,
            ActionDescriptor::FetchUrl { .. } => FETCH_URL,
            ActionDescriptor::None { .. } => "none",
        }
    }

    pub fn uses_tool(&self) -> bool {
        !matches!(self, ActionDescriptor::None { .. })
    }
}
