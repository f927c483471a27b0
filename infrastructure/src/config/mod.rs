//! Configuration file loading for scout
//!
//! This module handles file I/O and merging of configuration from multiple
//! sources. The priority order (highest to lowest):
//!
//! 1. `SCOUT_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./scout.toml` or `./.scout.toml`
//! 4. Global: `~/.config/scout/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    DEFAULT_GEMINI_BASE_URL, DEFAULT_MODEL, DEFAULT_SERVER_URL, FileAgentConfig, FileConfig,
    FileLoggingConfig, FileModelConfig, FileOutputConfig, FileResearchConfig, FileServerConfig,
};
pub use loader::ConfigLoader;
