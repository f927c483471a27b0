//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw `[logging]` configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL run transcript path
    pub transcript: Option<PathBuf>,
    /// Diagnostic log file (instead of stderr)
    pub file: Option<PathBuf>,
}
