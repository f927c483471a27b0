//! Port definitions (interfaces for external systems)

pub mod agent_progress;
pub mod run_logger;
pub mod text_generator;
pub mod tool_caller;
