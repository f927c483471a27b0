//! Type definitions for the RunAgent use case.

use crate::ports::text_generator::GenerationError;
use scout_domain::{ActionDescriptor, AgentPhase};
use serde::Serialize;
use thiserror::Error;

/// Errors that end an agent run
#[derive(Error, Debug)]
pub enum RunAgentError {
    /// Text generation failed in a phase with no local fallback.
    /// `query` is the original user query, kept so the caller can retry.
    #[error("Text generation unavailable during {stage} for query '{query}': {source}")]
    GenerationUnavailable {
        query: String,
        stage: AgentPhase,
        #[source]
        source: GenerationError,
    },
}

impl RunAgentError {
    /// The query to resubmit.
    pub fn query(&self) -> &str {
        match self {
            RunAgentError::GenerationUnavailable { query, .. } => query,
        }
    }
}

/// How the final answer was produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnswerSource {
    /// The planner answered directly
    Planner,
    /// Explained without tool context
    Direct,
    /// Synthesized from search results
    Search { grounding_results: usize },
    /// Concatenated page summaries
    Pages { summarized: usize, skipped: usize },
}

/// Output from the RunAgent use case
#[derive(Debug, Clone, Serialize)]
pub struct RunAgentOutput {
    pub query: String,
    /// Action chosen by the planner
    pub action: ActionDescriptor,
    pub source: AnswerSource,
    pub answer: String,
}
