//! Infrastructure layer for scout
//!
//! Adapters that implement the ports defined in the application layer
//! (Gemini text generation, MCP tool calls, JSONL transcripts) plus
//! configuration file loading and report persistence.

pub mod config;
pub mod gemini;
pub mod logging;
pub mod mcp;
pub mod report;

// Re-export commonly used types
pub use config::{
    ConfigLoader, FileAgentConfig, FileConfig, FileLoggingConfig, FileModelConfig,
    FileOutputConfig, FileResearchConfig, FileServerConfig,
};
pub use gemini::{FallbackTextGenerator, GeminiSettings, GeminiTextGenerator};
pub use logging::JsonlRunLogger;
pub use mcp::McpHttpToolCaller;
pub use report::ReportWriter;
