//! Application-level configuration.
//!
//! - [`AgentParams`]: budgets for one agent run
//! - [`ResearchParams`]: budgets for one research report

pub mod agent_params;

pub use agent_params::{AgentParams, ResearchParams};
