//! Run Agent use case
//!
//! One run is one pass through the agent state machine:
//!
//! | Phase         | Action        | Generation calls              |
//! |---------------|---------------|-------------------------------|
//! | Planning      | all           | 1 (planner)                   |
//! | Dispatching   | all           | 0                             |
//! | ToolCalling   | search / fetch| 0                             |
//! | Synthesizing  | search        | 1 (grounded or direct)        |
//! | Summarizing   | fetch         | 1 per fetched page            |
//! | Done          | all           | 0                             |
//!
//! A `none` action returns the planner's own text without a second call.
//! Generation failures are terminal and carry the original query; tool
//! failures only degrade the answer.

mod grounding;
mod planning;
mod types;

pub use types::{AnswerSource, RunAgentError, RunAgentOutput};

use crate::config::AgentParams;
use crate::ports::agent_progress::{AgentProgressNotifier, NoAgentProgress};
use crate::ports::run_logger::{NoRunLogger, RunEvent, RunLogger};
use crate::ports::text_generator::TextGenerator;
use crate::ports::tool_caller::ToolCaller;
use crate::services::ToolInvoker;
use scout_domain::{ActionDescriptor, AgentPhase, Query};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Use case for answering one query with optional web grounding
#[derive(Clone)]
pub struct RunAgentUseCase {
    pub(super) generator: Arc<dyn TextGenerator>,
    pub(super) invoker: ToolInvoker,
    pub(super) params: AgentParams,
    pub(super) run_logger: Arc<dyn RunLogger>,
}

impl RunAgentUseCase {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        tool_caller: Arc<dyn ToolCaller>,
        params: AgentParams,
    ) -> Self {
        Self {
            generator,
            invoker: ToolInvoker::new(tool_caller),
            params,
            run_logger: Arc::new(NoRunLogger),
        }
    }

    /// Record the run transcript through `logger`.
    pub fn with_run_logger(mut self, logger: Arc<dyn RunLogger>) -> Self {
        self.invoker = self.invoker.with_run_logger(logger.clone());
        self.run_logger = logger;
        self
    }

    pub fn params(&self) -> &AgentParams {
        &self.params
    }

    /// Answer `query` and return only the final text.
    pub async fn run(&self, query: &str) -> Result<String, RunAgentError> {
        self.execute(query, &NoAgentProgress)
            .await
            .map(|output| output.answer)
    }

    /// Answer `query` with progress callbacks.
    pub async fn execute(
        &self,
        query: &str,
        progress: &dyn AgentProgressNotifier,
    ) -> Result<RunAgentOutput, RunAgentError> {
        let query = Query::new(query);
        if query.is_blank() {
            debug!("Blank query, planning anyway");
        }
        info!(
            model = self.generator.model_name(),
            "Starting agent run: {}",
            query
        );

        progress.on_phase_change(AgentPhase::Planning);
        let action = self.plan(&query).await?;

        progress.on_phase_change(AgentPhase::Dispatching);
        let (answer, source) = match &action {
            ActionDescriptor::None { text } if !text.trim().is_empty() => {
                (text.clone(), AnswerSource::Planner)
            }
            ActionDescriptor::None { .. } => {
                progress.on_fallback("planner returned nothing, answering directly");
                self.answer_directly(&query, progress).await?
            }
            ActionDescriptor::SearchWeb {
                query: search_query,
                max_results,
            } => {
                self.answer_from_search(&query, search_query, *max_results, progress)
                    .await?
            }
            ActionDescriptor::FetchUrl { targets, skipped } => {
                self.answer_from_pages(&query, targets, *skipped, progress)
                    .await?
            }
        };

        progress.on_phase_change(AgentPhase::Done);
        self.run_logger.log(RunEvent::new(
            "final_answer",
            json!({ "query": query.content(), "source": &source, "answer": &answer }),
        ));

        Ok(RunAgentOutput {
            query: query.into_content(),
            action,
            source,
            answer,
        })
    }

    pub(super) async fn generate(
        &self,
        query: &Query,
        stage: AgentPhase,
        prompt: &str,
        system_instruction: Option<&str>,
    ) -> Result<String, RunAgentError> {
        self.generator
            .generate(prompt, system_instruction)
            .await
            .map_err(|source| {
                warn!(stage = %stage, error = %source, "Text generation failed");
                RunAgentError::GenerationUnavailable {
                    query: query.content().to_string(),
                    stage,
                    source,
                }
            })
    }
}
