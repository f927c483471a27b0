//! Run Research use case.
//!
//! Builds a Markdown research report for a topic:
//! 1. Search the web
//! 2. Fetch the top result pages (certificate fallback per page)
//! 3. Ask the writer model for a report grounded on the findings
//! 4. Fall back to a locally assembled brief when generation fails
//!
//! Unlike [`RunAgentUseCase`](super::run_agent::RunAgentUseCase) there is no
//! planning step, and a generation failure is not fatal.

use crate::config::ResearchParams;
use crate::ports::agent_progress::AgentProgressNotifier;
use crate::ports::run_logger::{NoRunLogger, RunEvent, RunLogger};
use crate::ports::text_generator::TextGenerator;
use crate::ports::tool_caller::{ToolCallError, ToolCaller};
use crate::services::ToolInvoker;
use scout_domain::{
    AgentPhase, FETCH_URL, PageExtract, ResearchPromptTemplate, ResearchReport, SEARCH_WEB,
    SearchResult, build_local_report,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during a research run
#[derive(Error, Debug)]
pub enum RunResearchError {
    #[error("Topic is empty")]
    EmptyTopic,

    #[error("Search failed: {0}")]
    Search(#[from] ToolCallError),

    #[error("Search returned no results for '{0}'")]
    NoResults(String),
}

/// Input for the [`RunResearchUseCase`].
#[derive(Debug, Clone)]
pub struct RunResearchInput {
    pub topic: String,
    pub params: ResearchParams,
}

impl RunResearchInput {
    pub fn new(topic: impl Into<String>, params: ResearchParams) -> Self {
        Self {
            topic: topic.into(),
            params,
        }
    }
}

/// Use case for writing a research report.
#[derive(Clone)]
pub struct RunResearchUseCase {
    generator: Arc<dyn TextGenerator>,
    invoker: ToolInvoker,
    run_logger: Arc<dyn RunLogger>,
}

impl RunResearchUseCase {
    pub fn new(generator: Arc<dyn TextGenerator>, tool_caller: Arc<dyn ToolCaller>) -> Self {
        Self {
            generator,
            invoker: ToolInvoker::new(tool_caller),
            run_logger: Arc::new(NoRunLogger),
        }
    }

    pub fn with_run_logger(mut self, logger: Arc<dyn RunLogger>) -> Self {
        self.invoker = self.invoker.with_run_logger(logger.clone());
        self.run_logger = logger;
        self
    }

    pub async fn execute(
        &self,
        input: RunResearchInput,
        progress: &dyn AgentProgressNotifier,
    ) -> Result<ResearchReport, RunResearchError> {
        let topic = input.topic.trim();
        if topic.is_empty() {
            return Err(RunResearchError::EmptyTopic);
        }
        let params = &input.params;
        info!(topic, max_results = params.max_results, "Starting research run");

        progress.on_phase_change(AgentPhase::ToolCalling);
        progress.on_tool_start(SEARCH_WEB, topic);
        let results = match self.invoker.search_web(topic, params.max_results).await {
            Ok(results) => results,
            Err(e) => {
                progress.on_tool_failed(SEARCH_WEB, topic, &e);
                return Err(e.into());
            }
        };
        progress.on_tool_complete(SEARCH_WEB, topic);
        if results.is_empty() {
            return Err(RunResearchError::NoResults(topic.to_string()));
        }

        let pages = self.fetch_pages(&results, params, progress).await;
        debug!(results = results.len(), pages = pages.len(), "Findings collected");

        progress.on_phase_change(AgentPhase::Synthesizing);
        let findings = ResearchPromptTemplate::findings_json(&results, &pages);
        let prompt = ResearchPromptTemplate::summarize(topic, &findings);
        let generated = self
            .generator
            .generate(&prompt, Some(ResearchPromptTemplate::writer_system()))
            .await;

        let (markdown, generated_locally) = match generated {
            Ok(text) if !text.trim().is_empty() => (text, false),
            Ok(_) => {
                warn!("Writer returned an empty report, building it locally");
                progress.on_fallback("empty report from model, building it locally");
                (self.local_report(topic, &results, &pages, params), true)
            }
            Err(e) => {
                warn!(error = %e, "Report generation failed, building it locally");
                progress.on_fallback("model unavailable, building the report locally");
                (self.local_report(topic, &results, &pages, params), true)
            }
        };

        progress.on_phase_change(AgentPhase::Done);
        self.run_logger.log(RunEvent::new(
            "final_answer",
            json!({ "topic": topic, "generated_locally": generated_locally, "answer": &markdown }),
        ));

        Ok(ResearchReport {
            topic: topic.to_string(),
            markdown,
            results,
            pages,
            generated_locally,
        })
    }

    /// Fetch the top results in order; pages that fail or come back empty
    /// are skipped.
    async fn fetch_pages(
        &self,
        results: &[SearchResult],
        params: &ResearchParams,
        progress: &dyn AgentProgressNotifier,
    ) -> Vec<PageExtract> {
        let mut pages = Vec::new();

        for (index, result) in results.iter().take(params.max_pages).enumerate() {
            if result.url.trim().is_empty() {
                continue;
            }
            progress.on_tool_start(FETCH_URL, &result.url);
            match self
                .invoker
                .fetch_url(&result.url, params.page_max_chars, params.insecure_ssl)
                .await
            {
                Ok(page) if page.is_empty() => {
                    warn!(url = %result.url, "Fetched page is empty, skipping");
                    progress.on_tool_complete(FETCH_URL, &result.url);
                    progress.on_fallback(&format!(
                        "{} returned an empty page, skipped",
                        result.url
                    ));
                }
                Ok(page) => {
                    progress.on_tool_complete(FETCH_URL, &result.url);
                    pages.push(PageExtract {
                        rank: index + 1,
                        url: result.url.clone(),
                        page,
                    });
                }
                Err(e) => {
                    warn!(url = %result.url, error = %e, "Skipping page");
                    progress.on_tool_failed(FETCH_URL, &result.url, &e);
                }
            }
        }

        pages
    }

    fn local_report(
        &self,
        topic: &str,
        results: &[SearchResult],
        pages: &[PageExtract],
        params: &ResearchParams,
    ) -> String {
        build_local_report(topic, results, pages, params.max_results as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::agent_progress::NoAgentProgress;
    use crate::ports::text_generator::GenerationError;
    use crate::test_support::{ScriptedGenerator, ScriptedToolCaller};
    use serde_json::Value;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingProgress {
        events: Mutex<Vec<String>>,
    }

    impl AgentProgressNotifier for RecordingProgress {
        fn on_tool_start(&self, tool: &str, target: &str) {
            self.events.lock().unwrap().push(format!("start {tool} {target}"));
        }

        fn on_tool_complete(&self, tool: &str, target: &str) {
            self.events.lock().unwrap().push(format!("done {tool} {target}"));
        }

        fn on_tool_failed(&self, tool: &str, target: &str, _error: &ToolCallError) {
            self.events.lock().unwrap().push(format!("failed {tool} {target}"));
        }

        fn on_fallback(&self, reason: &str) {
            self.events.lock().unwrap().push(format!("fallback {reason}"));
        }
    }

    fn search_results() -> Value {
        json!({ "result": [
            {"title": "MCP intro", "url": "https://a.example", "snippet": "intro"},
            {"title": "No link", "url": "", "snippet": "orphan"},
            {"title": "MCP spec", "url": "https://b.example", "snippet": "spec"}
        ]})
    }

    fn page(title: &str, text: &str) -> Value {
        json!({ "result": {"title": title, "text": text, "length": text.len()} })
    }

    fn input() -> RunResearchInput {
        RunResearchInput::new("Model Context Protocol", ResearchParams::default())
    }

    #[tokio::test]
    async fn test_report_from_model() {
        let generator = Arc::new(ScriptedGenerator::answering(&["# MCP Report\n\nBody"]));
        let tools = Arc::new(ScriptedToolCaller::new(vec![
            Ok(search_results()),
            Ok(page("Intro", "Intro text")),
            Ok(page("Spec", "Spec text")),
        ]));
        let use_case = RunResearchUseCase::new(generator.clone(), tools.clone());

        let report = use_case.execute(input(), &NoAgentProgress).await.unwrap();

        assert_eq!(report.markdown, "# MCP Report\n\nBody");
        assert!(!report.generated_locally);
        assert_eq!(report.results.len(), 3);
        // the result without a URL is not fetched; ranks follow search order
        let ranks: Vec<usize> = report.pages.iter().map(|p| p.rank).collect();
        assert_eq!(ranks, vec![1, 3]);

        let calls = tools.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[1].1["max_chars"], 8000);

        let (prompt, system) = &generator.prompts()[0];
        assert!(prompt.contains("Topic: Model Context Protocol"));
        assert!(prompt.contains("Spec text"));
        assert!(system.as_deref().unwrap_or_default().contains("research writer"));
    }

    #[tokio::test]
    async fn test_generation_failure_builds_local_report() {
        let generator = Arc::new(ScriptedGenerator::new(vec![Err(GenerationError::Quota(
            "429".into(),
        ))]));
        let tools = Arc::new(ScriptedToolCaller::new(vec![
            Ok(search_results()),
            Err(ToolCallError::unreachable("fetch_url", "timeout")),
            Ok(page("Spec", "Spec text")),
        ]));
        let use_case = RunResearchUseCase::new(generator, tools);

        let report = use_case.execute(input(), &NoAgentProgress).await.unwrap();

        assert!(report.generated_locally);
        assert!(report
            .markdown
            .starts_with("# Research Brief: Model Context Protocol"));
        assert!(report.markdown.contains("- Spec (https://b.example)"));
        assert_eq!(report.pages.len(), 1);
    }

    #[tokio::test]
    async fn test_max_pages_limits_fetches() {
        let generator = Arc::new(ScriptedGenerator::answering(&["report"]));
        let tools = Arc::new(ScriptedToolCaller::new(vec![
            Ok(search_results()),
            Ok(page("Intro", "Intro text")),
        ]));
        let use_case = RunResearchUseCase::new(generator, tools.clone());
        let params = ResearchParams::default().with_max_pages(1);

        use_case
            .execute(RunResearchInput::new("MCP", params), &NoAgentProgress)
            .await
            .unwrap();

        assert_eq!(tools.call_count(), 2);
    }

    #[tokio::test]
    async fn test_empty_page_is_reported_as_skipped() {
        let generator = Arc::new(ScriptedGenerator::answering(&["report"]));
        let tools = Arc::new(ScriptedToolCaller::new(vec![
            Ok(search_results()),
            Ok(page("", "")),
            Ok(page("Spec", "Spec text")),
        ]));
        let use_case = RunResearchUseCase::new(generator, tools);
        let progress = RecordingProgress::default();

        let report = use_case.execute(input(), &progress).await.unwrap();

        assert_eq!(report.pages.len(), 1);
        let events = progress.events.lock().unwrap();
        let fetch_events: Vec<&String> =
            events.iter().filter(|e| e.contains("a.example")).collect();
        assert_eq!(
            fetch_events,
            vec![
                "start fetch_url https://a.example",
                "done fetch_url https://a.example",
                "fallback https://a.example returned an empty page, skipped",
            ]
        );
    }

    #[tokio::test]
    async fn test_search_failure_is_error() {
        let generator = Arc::new(ScriptedGenerator::answering(&[]));
        let tools = Arc::new(ScriptedToolCaller::new(vec![Err(
            ToolCallError::unreachable("search_web", "refused"),
        )]));
        let use_case = RunResearchUseCase::new(generator.clone(), tools);

        let err = use_case.execute(input(), &NoAgentProgress).await.unwrap_err();

        assert!(matches!(err, RunResearchError::Search(_)));
        assert_eq!(generator.call_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_topic() {
        let use_case = RunResearchUseCase::new(
            Arc::new(ScriptedGenerator::answering(&[])),
            Arc::new(ScriptedToolCaller::new(vec![])),
        );
        let err = use_case
            .execute(RunResearchInput::new("  ", ResearchParams::default()), &NoAgentProgress)
            .await
            .unwrap_err();
        assert!(matches!(err, RunResearchError::EmptyTopic));
    }
}
