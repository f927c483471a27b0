//! Prompt domain
//!
//! Templates for every generation call the agent and the research pipeline make.

pub mod agent;
pub mod research;

pub use agent::AgentPromptTemplate;
pub use research::ResearchPromptTemplate;
