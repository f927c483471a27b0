//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for agent answers and reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Only the answer text
    Answer,
    /// JSON with the chosen action and how the answer was produced
    Json,
}

impl From<OutputFormat> for scout_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Answer => scout_domain::OutputFormat::Answer,
            OutputFormat::Json => scout_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for scout
#[derive(Parser, Debug)]
#[command(name = "scout")]
#[command(author, version, about = "Single-turn web agent over MCP search and fetch tools")]
#[command(long_about = r#"
Scout answers one question per run. A model decides whether to search the
web, fetch specific pages, or answer directly; tool results are used as
grounding for the final answer.

With --research, scout instead searches a topic, reads the top pages and
writes a Markdown report.

Configuration files are loaded from (in priority order):
1. SCOUT_* environment variables (e.g. SCOUT_MODEL__NAME)
2. --config <path>     Explicit config file
3. ./scout.toml        Project-level config
4. ~/.config/scout/config.toml   Global config

Example:
  scout "What is the Model Context Protocol?"
  scout "Give me links to learn Rust async"
  scout --research "Model Context Protocol" --out reports/mcp.md
"#)]
pub struct Cli {
    /// The question to answer (prompted on stdin when omitted)
    pub query: Option<String>,

    /// Write a research report on TOPIC instead of answering a question
    #[arg(long, value_name = "TOPIC", conflicts_with = "query")]
    pub research: Option<String>,

    /// Number of search results for --research
    #[arg(long, value_name = "N")]
    pub max_results: Option<u32>,

    /// Where to write the research report
    #[arg(long, value_name = "PATH")]
    pub out: Option<PathBuf>,

    /// Skip certificate verification on the first fetch attempt (or RA_INSECURE_SSL=1)
    #[arg(long)]
    pub insecure_ssl: bool,

    /// Gemini model name (e.g. gemini-1.5-flash)
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// MCP server endpoint
    #[arg(long, value_name = "URL")]
    pub server_url: Option<String>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Write diagnostic logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Append a JSONL transcript of the run to this file
    #[arg(long, value_name = "PATH")]
    pub transcript: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
