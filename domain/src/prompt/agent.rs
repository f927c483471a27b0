//! Prompt templates for the single-turn agent

use crate::action::descriptor::{FETCH_URL, SEARCH_WEB};

/// Templates for the planning, synthesis and summary prompts
pub struct AgentPromptTemplate;

impl AgentPromptTemplate {
    /// System instruction for the planning call.
    ///
    /// Describes the two tools and the JSON action format the parser expects.
    pub fn planner_system() -> String {
        format!(
            r#"You are an assistant with access to tools:
1. {SEARCH_WEB}(query, max_results) -> Use when the user asks to explain a concept or learn a topic.
2. {FETCH_URL}(url) -> Use when the user asks for websites, resources or links. In that case, return actual URLs (not queries) inside {FETCH_URL}.
Decide which tool is needed and respond with a JSON action like:
{{"action": "{SEARCH_WEB}", "args": {{"query": "artificial intelligence", "max_results": 5}}}}
or {{"action": "{FETCH_URL}", "args": {{"url": "https://example.com"}}}}
To fetch several pages, pass a list: {{"action": "{FETCH_URL}", "args": [{{"url": "https://a.example"}}, {{"url": "https://b.example"}}]}}
If no tool is needed, just answer normally."#
        )
    }

    /// Direct answer without tool context.
    pub fn direct_explanation(query: &str) -> String {
        format!(
            "Write a concise paragraph explaining the topic in simple terms: {}",
            query
        )
    }

    /// Answer grounded on search result lines (`title: snippet`).
    pub fn grounded_synthesis(query: &str, grounding: &[String]) -> String {
        format!(
            "Question: {}\n\nWrite a concise paragraph explaining the topic based on these search results:\n\n{}",
            query,
            grounding.join("\n")
        )
    }

    /// Summary of one fetched page.
    pub fn page_summary(url: &str, content: &str) -> String {
        format!(
            "Summarize this webpage ({}) into a clear paragraph:\n\n{}",
            url, content
        )
    }
}
