//! Planner decisions.
//!
//! The planning step asks a model to answer with a JSON action. This module
//! holds the resulting [`ActionDescriptor`] and the defensive parser that
//! builds it from raw model output.

pub mod descriptor;
pub mod parser;

pub use descriptor::{ActionDefaults, ActionDescriptor, FETCH_URL, FetchTarget, SEARCH_WEB};
pub use parser::{parse_action, parse_action_with, strip_code_fences};
