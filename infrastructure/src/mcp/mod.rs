//! MCP tool server adapter

mod client;

pub use client::McpHttpToolCaller;
