//! Tool call port
//!
//! The remote tool server (`search_web`, `fetch_url`) is reached through
//! [`ToolCaller`]. Failures carry an explicit [`ToolFaultKind`] so callers can
//! branch on the kind instead of inspecting messages.

use async_trait::async_trait;
use scout_domain::RawEnvelope;
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

/// Arguments record passed to a tool
pub type ToolArgs = Map<String, Value>;

/// Classification of a failed tool call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolFaultKind {
    /// TLS certificate or trust validation failed
    Certificate,
    /// The server or the target could not be reached
    Unreachable,
    /// The tool ran and reported an error
    Rejected,
    /// The transport answered with something that is not a tool result
    InvalidResponse,
}

impl ToolFaultKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolFaultKind::Certificate => "certificate",
            ToolFaultKind::Unreachable => "unreachable",
            ToolFaultKind::Rejected => "rejected",
            ToolFaultKind::InvalidResponse => "invalid_response",
        }
    }
}

impl fmt::Display for ToolFaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified tool call failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Tool '{tool}' failed ({kind}): {message}")]
pub struct ToolCallError {
    kind: ToolFaultKind,
    tool: String,
    message: String,
}

impl ToolCallError {
    pub fn new(kind: ToolFaultKind, tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            tool: tool.into(),
            message: message.into(),
        }
    }

    pub fn certificate(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ToolFaultKind::Certificate, tool, message)
    }

    pub fn unreachable(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ToolFaultKind::Unreachable, tool, message)
    }

    pub fn rejected(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ToolFaultKind::Rejected, tool, message)
    }

    pub fn invalid_response(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ToolFaultKind::InvalidResponse, tool, message)
    }

    pub fn kind(&self) -> ToolFaultKind {
        self.kind
    }

    pub fn tool(&self) -> &str {
        &self.tool
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_certificate_failure(&self) -> bool {
        self.kind == ToolFaultKind::Certificate
    }
}

/// Tool-call capability
#[async_trait]
pub trait ToolCaller: Send + Sync {
    /// Invoke tool `name` with `args` and return its raw envelope
    async fn call_tool(&self, name: &str, args: ToolArgs) -> Result<RawEnvelope, ToolCallError>;
}
