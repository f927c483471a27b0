//! Application layer for scout
//!
//! Ports for text generation and tool calls, the tool invoker with its
//! certificate fallback, and the agent and research use cases.
//! Depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod services;
pub mod use_cases;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use config::{AgentParams, ResearchParams};
pub use ports::{
    agent_progress::{AgentProgressNotifier, NoAgentProgress},
    run_logger::{NoRunLogger, RunEvent, RunLogger},
    text_generator::{GenerationError, TextGenerator},
    tool_caller::{ToolArgs, ToolCallError, ToolCaller, ToolFaultKind},
};
pub use services::{ToolInvoker, with_cert_fallback};
pub use use_cases::run_agent::{AnswerSource, RunAgentError, RunAgentOutput, RunAgentUseCase};
pub use use_cases::run_research::{
    RunResearchError, RunResearchInput, RunResearchUseCase,
};
