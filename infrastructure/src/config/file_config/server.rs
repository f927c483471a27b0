//! Tool server configuration from TOML (`[server]` section)

use scout_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8010/mcp";

/// Raw `[server]` configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileServerConfig {
    /// Streamable HTTP endpoint of the MCP tool server
    pub url: String,
    /// Per-request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for FileServerConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SERVER_URL.to_string(),
            timeout_seconds: 60,
        }
    }
}

impl FileServerConfig {
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let url = self.url.trim();
        if url.starts_with("http://") || url.starts_with("https://") {
            return Vec::new();
        }
        vec![ConfigIssue::error(
            ConfigIssueCode::InvalidUrl {
                field: "server.url".to_string(),
                value: self.url.clone(),
            },
            format!("server.url: '{}' is not an http(s) URL", self.url),
        )]
    }
}
