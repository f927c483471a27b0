//! Use cases (application services)

pub mod run_agent;
pub mod run_research;
