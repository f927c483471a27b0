//! Agent progress port.
//!
//! [`AgentProgressNotifier`] is an output port the presentation layer
//! implements to show a run as it moves through its phases.

use crate::ports::tool_caller::ToolCallError;
use scout_domain::AgentPhase;

/// Progress notifier for one agent or research run.
///
/// All methods have default no-op implementations, so implementers only
/// need to override the callbacks they care about.
pub trait AgentProgressNotifier: Send + Sync {
    /// Called when the run enters a new phase
    fn on_phase_change(&self, _phase: AgentPhase) {}

    /// Called before a tool is invoked; `target` is the query or URL
    fn on_tool_start(&self, _tool: &str, _target: &str) {}

    /// Called when a tool call succeeds
    fn on_tool_complete(&self, _tool: &str, _target: &str) {}

    /// Called when a tool call fails after any fallback
    fn on_tool_failed(&self, _tool: &str, _target: &str, _error: &ToolCallError) {}

    /// Called when the run degrades to a simpler path
    fn on_fallback(&self, _reason: &str) {}
}

/// No-op implementation for when progress isn't needed
pub struct NoAgentProgress;

impl AgentProgressNotifier for NoAgentProgress {}
