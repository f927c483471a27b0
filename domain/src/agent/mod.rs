//! Agent domain module
//!
//! The phases one agent run passes through.

pub mod phase;

pub use phase::AgentPhase;
