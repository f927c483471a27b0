//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

const PROJECT_FILES: [&str; 2] = ["scout.toml", ".scout.toml"];
const ENV_PREFIX: &str = "SCOUT_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `SCOUT_`-prefixed environment variables (`SCOUT_MODEL__NAME=...`)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./scout.toml` or `./.scout.toml`
    /// 4. Global: `~/.config/scout/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, Box<figment::Error>> {
        let mut files = Vec::new();
        if let Some(global) = Self::global_config_path()
            && global.exists()
        {
            files.push(global);
        }
        if let Some(project) = Self::project_config_path() {
            files.push(project);
        }
        if let Some(path) = config_path {
            files.push(path.to_path_buf());
        }

        Self::figment(&files)
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(Box::new)
    }

    /// Load only the given files over the defaults, lowest priority first.
    pub fn load_files(files: &[PathBuf]) -> Result<FileConfig, Box<figment::Error>> {
        Self::figment(files).extract().map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    fn figment(files: &[PathBuf]) -> Figment {
        files.iter().fold(
            Figment::new().merge(Serialized::defaults(FileConfig::default())),
            |figment, path| figment.merge(Toml::file(path)),
        )
    }

    /// Get the global config file path (`<config dir>/scout/config.toml`)
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("scout").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(explicit: Option<&Path>) {
        println!("Configuration sources (in priority order):");

        println!("  [ENV  ] {}*  (nested keys use '__')", ENV_PREFIX);

        if let Some(path) = explicit {
            let mark = if path.exists() { "FOUND" } else { "MISS " };
            println!("  [{}] Explicit: {}", mark, path.display());
        }

        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./scout.toml or ./.scout.toml");
        }

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        println!("  [     ] Default: built-in defaults");
    }
}
