//! Port for structured run transcripts.
//!
//! Separate from `tracing` diagnostics: a [`RunLogger`] records the planner
//! output, parsed action, tool calls and final answer of a run in a
//! machine-readable form (JSONL in the default adapter).

use serde_json::Value;

/// A structured run event.
pub struct RunEvent {
    /// Event type identifier (e.g. "plan_output", "tool_call", "final_answer").
    pub event_type: &'static str,
    /// Event-specific fields.
    pub payload: Value,
}

impl RunEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for recording run events.
///
/// `log` is synchronous and infallible; write failures are the adapter's
/// concern and never interrupt a run.
pub trait RunLogger: Send + Sync {
    fn log(&self, event: RunEvent);
}

/// No-op implementation for tests and when no transcript is requested.
pub struct NoRunLogger;

impl RunLogger for NoRunLogger {
    fn log(&self, _event: RunEvent) {}
}
