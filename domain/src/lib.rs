//! Domain layer for scout
//!
//! Pure logic with no I/O: the planner's action format, the tool-call
//! envelope decoder, research value objects and prompt templates.
//!
//! # Core Concepts
//!
//! ## Action
//!
//! The planning call answers with a JSON action (`search_web` / `fetch_url`)
//! or with prose. [`parse_action`] never fails; prose becomes
//! [`ActionDescriptor::None`].
//!
//! ## Envelope
//!
//! Tool-call transports wrap their payload differently. [`normalize`]
//! walks a fixed list of accessor paths and fails closed to a neutral value.

pub mod action;
pub mod agent;
pub mod config;
pub mod core;
pub mod envelope;
pub mod prompt;
pub mod research;
pub mod util;

// Re-export commonly used types
pub use action::{
    ActionDefaults, ActionDescriptor, FETCH_URL, FetchTarget, SEARCH_WEB, parse_action,
    parse_action_with,
};
pub use agent::AgentPhase;
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use core::query::Query;
pub use envelope::{ExpectedShape, NormalizedValue, RawEnvelope, normalize};
pub use prompt::{AgentPromptTemplate, ResearchPromptTemplate};
pub use research::{FetchedPage, PageExtract, ResearchReport, SearchResult, build_local_report};
