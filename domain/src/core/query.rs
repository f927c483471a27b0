//! Query value object

use serde::{Deserialize, Serialize};

/// A free-form user query (Value Object)
///
/// The content is kept exactly as typed. Blank input is a valid query; the
/// planner decides what to do with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    content: String,
}

impl Query {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }

    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl From<&str> for Query {
    fn from(s: &str) -> Self {
        Query::new(s)
    }
}

impl From<String> for Query {
    fn from(s: String) -> Self {
        Query::new(s)
    }
}
