//! Tool-backed branches of a run: search grounding and page summaries.

use super::RunAgentUseCase;
use super::types::{AnswerSource, RunAgentError};
use crate::ports::agent_progress::AgentProgressNotifier;
use scout_domain::{
    AgentPhase, AgentPromptTemplate, FETCH_URL, FetchTarget, Query, SEARCH_WEB, SearchResult,
};
use tracing::{debug, info, warn};

impl RunAgentUseCase {
    /// Search, then synthesize from the usable results.
    ///
    /// An unreachable search tool or a result list without any title or
    /// snippet degrades to a direct explanation.
    pub(super) async fn answer_from_search(
        &self,
        query: &Query,
        search_query: &str,
        max_results: u32,
        progress: &dyn AgentProgressNotifier,
    ) -> Result<(String, AnswerSource), RunAgentError> {
        progress.on_phase_change(AgentPhase::ToolCalling);
        progress.on_tool_start(SEARCH_WEB, search_query);

        let results = match self.invoker.search_web(search_query, max_results).await {
            Ok(results) => {
                progress.on_tool_complete(SEARCH_WEB, search_query);
                results
            }
            Err(e) => {
                warn!(error = %e, "Search failed, answering without grounding");
                progress.on_tool_failed(SEARCH_WEB, search_query, &e);
                Vec::new()
            }
        };

        let grounding: Vec<String> = results
            .iter()
            .filter(|r| r.has_content())
            .take(self.params.max_grounding_results)
            .map(SearchResult::grounding_line)
            .collect();
        debug!(
            results = results.len(),
            grounding = grounding.len(),
            "Search grounding collected"
        );

        if grounding.is_empty() {
            progress.on_fallback("no usable search results, answering directly");
            return self.answer_directly(query, progress).await;
        }

        progress.on_phase_change(AgentPhase::Synthesizing);
        let prompt = AgentPromptTemplate::grounded_synthesis(query.content(), &grounding);
        let answer = self
            .generate(query, AgentPhase::Synthesizing, &prompt, None)
            .await?;
        Ok((
            answer,
            AnswerSource::Search {
                grounding_results: grounding.len(),
            },
        ))
    }

    /// Fetch and summarize each page in order.
    ///
    /// A page that cannot be fetched is skipped. When no page survives the
    /// run falls back to a direct explanation.
    pub(super) async fn answer_from_pages(
        &self,
        query: &Query,
        targets: &[FetchTarget],
        malformed: usize,
        progress: &dyn AgentProgressNotifier,
    ) -> Result<(String, AnswerSource), RunAgentError> {
        if malformed > 0 {
            warn!(malformed, "Skipping fetch_url entries without a URL");
        }

        let mut blocks = Vec::with_capacity(targets.len());
        let mut skipped = malformed;

        for target in targets {
            progress.on_phase_change(AgentPhase::ToolCalling);
            progress.on_tool_start(FETCH_URL, &target.url);

            let page = match self
                .invoker
                .fetch_url(&target.url, target.max_chars, self.params.insecure_ssl)
                .await
            {
                Ok(page) => page,
                Err(e) => {
                    warn!(url = %target.url, error = %e, "Skipping page");
                    progress.on_tool_failed(FETCH_URL, &target.url, &e);
                    skipped += 1;
                    continue;
                }
            };
            progress.on_tool_complete(FETCH_URL, &target.url);

            // a page without text is still summarized, from its title
            let mut content = page.preview(self.params.preview_chars).trim();
            if content.is_empty() {
                debug!(url = %target.url, "Page has no text, summarizing the title");
                content = page.title.trim();
            }

            progress.on_phase_change(AgentPhase::Summarizing);
            let prompt = AgentPromptTemplate::page_summary(&target.url, content);
            let summary = self
                .generate(query, AgentPhase::Summarizing, &prompt, None)
                .await?;
            blocks.push(format!("Source: {}\n{}", target.url, summary.trim()));
        }

        info!(summarized = blocks.len(), skipped, "Page summaries complete");

        if blocks.is_empty() {
            progress.on_fallback("no page could be fetched, answering directly");
            return self.answer_directly(query, progress).await;
        }

        Ok((
            blocks.join("\n\n"),
            AnswerSource::Pages {
                summarized: blocks.len(),
                skipped,
            },
        ))
    }

    /// Explain the query in simple terms without tool context.
    pub(super) async fn answer_directly(
        &self,
        query: &Query,
        progress: &dyn AgentProgressNotifier,
    ) -> Result<(String, AnswerSource), RunAgentError> {
        progress.on_phase_change(AgentPhase::Synthesizing);
        let prompt = AgentPromptTemplate::direct_explanation(query.content());
        let answer = self
            .generate(query, AgentPhase::Synthesizing, &prompt, None)
            .await?;
        Ok((answer, AnswerSource::Direct))
    }
}
