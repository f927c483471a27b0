//! Typed access to the remote web tools.
//!
//! Wraps a [`ToolCaller`] with the two operations the use cases need and
//! normalizes whatever envelope the transport returns.

use crate::ports::run_logger::{NoRunLogger, RunEvent, RunLogger};
use crate::ports::tool_caller::{ToolArgs, ToolCallError, ToolCaller};
use crate::services::fault_policy::with_cert_fallback;
use scout_domain::envelope::{normalize_list, normalize_record};
use scout_domain::{FETCH_URL, FetchedPage, RawEnvelope, SEARCH_WEB, SearchResult};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, warn};

/// Invokes `search_web` and `fetch_url` on a tool server.
#[derive(Clone)]
pub struct ToolInvoker {
    caller: Arc<dyn ToolCaller>,
    run_logger: Arc<dyn RunLogger>,
}

impl ToolInvoker {
    pub fn new(caller: Arc<dyn ToolCaller>) -> Self {
        Self {
            caller,
            run_logger: Arc::new(NoRunLogger),
        }
    }

    pub fn with_run_logger(mut self, logger: Arc<dyn RunLogger>) -> Self {
        self.run_logger = logger;
        self
    }

    /// Search the web. Results keep provider order; elements that are not
    /// records are dropped.
    pub async fn search_web(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<Vec<SearchResult>, ToolCallError> {
        let args = tool_args(json!({ "query": query, "max_results": max_results }));
        let envelope = self.call(SEARCH_WEB, args).await?;

        let items = normalize_list(&envelope);
        let total = items.len();
        let results: Vec<SearchResult> = items.iter().filter_map(SearchResult::from_value).collect();
        if results.len() < total {
            debug!(
                dropped = total - results.len(),
                "Dropped malformed search result elements"
            );
        }
        Ok(results)
    }

    /// Fetch one page. A certificate fault on the first attempt is retried
    /// once with `insecure = true`.
    pub async fn fetch_url(
        &self,
        url: &str,
        max_chars: usize,
        insecure: bool,
    ) -> Result<FetchedPage, ToolCallError> {
        let envelope = with_cert_fallback(
            || self.call(FETCH_URL, fetch_args(url, max_chars, insecure)),
            || {
                self.run_logger.log(RunEvent::new(
                    "tool_fallback",
                    json!({ "tool": FETCH_URL, "url": url, "reason": "certificate" }),
                ));
                self.call(FETCH_URL, fetch_args(url, max_chars, true))
            },
        )
        .await?;

        Ok(FetchedPage::from_record(&normalize_record(&envelope), max_chars))
    }

    async fn call(
        &self,
        name: &str,
        args: ToolArgs,
    ) -> Result<RawEnvelope, ToolCallError> {
        debug!(tool = name, "Calling tool");
        let outcome = self.caller.call_tool(name, args.clone()).await;

        let status = match &outcome {
            Ok(_) => "ok".to_string(),
            Err(e) => {
                warn!(tool = name, kind = %e.kind(), "Tool call failed: {}", e.message());
                e.kind().to_string()
            }
        };
        self.run_logger.log(RunEvent::new(
            "tool_call",
            json!({ "tool": name, "args": Value::Object(args), "status": status }),
        ));
        outcome
    }
}

fn fetch_args(url: &str, max_chars: usize, insecure: bool) -> ToolArgs {
    tool_args(json!({ "url": url, "max_chars": max_chars, "insecure": insecure }))
}

fn tool_args(value: Value) -> ToolArgs {
    match value {
        Value::Object(map) => map,
        _ => ToolArgs::new(),
    }
}
