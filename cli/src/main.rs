//! CLI entrypoint for scout
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use scout_application::{
    AgentProgressNotifier, NoAgentProgress, RunAgentUseCase, RunLogger,
    RunResearchInput, RunResearchUseCase, TextGenerator, ToolCaller,
};
use scout_domain::{OutputFormat, Severity};
use scout_infrastructure::{
    ConfigLoader, FallbackTextGenerator, FileConfig, GeminiSettings, GeminiTextGenerator,
    JsonlRunLogger, McpHttpToolCaller, ReportWriter,
};
use scout_presentation::{Cli, ConsoleFormatter, ProgressReporter, SimpleProgress};
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?
    };
    apply_overrides(&mut config, &cli);
    if !config.output.color {
        colored::control::set_override(false);
    }

    let log_file = cli.log_file.clone().or_else(|| config.logging.file.clone());
    let log_guard = init_logging(cli.verbose, log_file.as_deref())?;

    info!("Starting scout");

    let issues = config.validate();
    for issue in &issues {
        eprintln!("{}", ConsoleFormatter::format_config_issue(issue));
    }
    if issues.iter().any(|i| i.severity == Severity::Error) {
        bail!("Invalid configuration");
    }

    // === Dependency Injection ===
    let generator = build_generator(&config)?;
    let tool_caller: Arc<dyn ToolCaller> = Arc::new(
        McpHttpToolCaller::new(
            config.server.url.clone(),
            Duration::from_secs(config.server.timeout_seconds),
        )
        .context("Failed to build the tool server client")?,
    );
    let run_logger = build_run_logger(&cli, &config);

    let progress: Box<dyn AgentProgressNotifier> = if cli.quiet {
        Box::new(NoAgentProgress)
    } else if io::stderr().is_terminal() {
        Box::new(ProgressReporter::new())
    } else {
        Box::new(SimpleProgress)
    };

    let format = cli
        .output
        .map(Into::into)
        .or(config.output.format)
        .unwrap_or_default();

    if let Some(topic) = cli.research.as_deref() {
        return run_research(
            topic,
            &config,
            generator,
            tool_caller,
            run_logger,
            progress.as_ref(),
            format,
        )
        .await;
    }

    let query = match cli.query.clone() {
        Some(q) => q,
        None => prompt_for_query()?,
    };

    let mut use_case = RunAgentUseCase::new(generator, tool_caller, config.agent.to_params());
    if let Some(logger) = run_logger {
        use_case = use_case.with_run_logger(logger);
    }

    let result = use_case.execute(&query, progress.as_ref()).await;
    match result {
        Ok(output) => {
            let text = match format {
                OutputFormat::Answer => ConsoleFormatter::format_answer(&output),
                OutputFormat::Json => ConsoleFormatter::format_json(&output),
            };
            print!("{}", text);
            if format == OutputFormat::Json {
                println!();
            }
            Ok(())
        }
        Err(e) => {
            drop(progress);
            eprint!("{}", ConsoleFormatter::format_agent_error(&e));
            drop(log_guard);
            std::process::exit(1);
        }
    }
}

/// Command-line flags and well-known environment variables win over files.
fn apply_overrides(config: &mut FileConfig, cli: &Cli) {
    if let Some(model) = cli
        .model
        .clone()
        .or_else(|| std::env::var("GEMINI_MODEL").ok().filter(|m| !m.is_empty()))
    {
        config.model.name = model;
    }
    if let Some(url) = &cli.server_url {
        config.server.url = url.clone();
    }
    if cli.insecure_ssl || std::env::var("RA_INSECURE_SSL").is_ok_and(|v| v == "1") {
        config.agent.insecure_ssl = true;
    }
    if let Some(max) = cli.max_results {
        config.agent.search_max_results = max;
        config.research.max_results = max;
    }
    if let Some(out) = &cli.out {
        config.research.out = out.clone();
    }
}

fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    // Initialize logging based on verbosity level
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let Some(path) = log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(io::stderr)
            .init();
        return Ok(None);
    };

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    let file_name = path
        .file_name()
        .context("Log file path has no file name")?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .init();

    Ok(Some(guard))
}

fn build_generator(config: &FileConfig) -> Result<Arc<dyn TextGenerator>> {
    let model = &config.model;
    let api_key = model.api_key.clone().or_else(|| {
        std::env::var(&model.api_key_env)
            .ok()
            .filter(|k| !k.is_empty())
    });
    if api_key.is_none() {
        warn!(
            "No API key found in {}; generation calls will be rejected",
            model.api_key_env
        );
    }

    let settings = |name: &str| GeminiSettings {
        base_url: model.base_url.clone(),
        model: name.to_string(),
        api_key: api_key.clone(),
        timeout: Duration::from_secs(model.timeout_seconds),
    };

    let primary: Arc<dyn TextGenerator> = Arc::new(
        GeminiTextGenerator::new(settings(&model.name))
            .context("Failed to build the Gemini client")?,
    );

    match model.fallback_model() {
        Some(fallback) => {
            info!(primary = %model.name, fallback, "Model fallback enabled");
            let fallback: Arc<dyn TextGenerator> = Arc::new(
                GeminiTextGenerator::new(settings(fallback))
                    .context("Failed to build the fallback Gemini client")?,
            );
            Ok(Arc::new(FallbackTextGenerator::new(primary, fallback)))
        }
        None => Ok(primary),
    }
}

fn build_run_logger(cli: &Cli, config: &FileConfig) -> Option<Arc<dyn RunLogger>> {
    let path = cli
        .transcript
        .clone()
        .or_else(|| config.logging.transcript.clone())?;
    let logger = JsonlRunLogger::open(&path)?;
    info!(path = %logger.path().display(), run = logger.run_id(), "Writing transcript");
    Some(Arc::new(logger))
}

async fn run_research(
    topic: &str,
    config: &FileConfig,
    generator: Arc<dyn TextGenerator>,
    tool_caller: Arc<dyn ToolCaller>,
    run_logger: Option<Arc<dyn RunLogger>>,
    progress: &dyn AgentProgressNotifier,
    format: OutputFormat,
) -> Result<()> {
    let mut use_case = RunResearchUseCase::new(generator, tool_caller);
    if let Some(logger) = run_logger {
        use_case = use_case.with_run_logger(logger);
    }

    let input = RunResearchInput::new(
        topic,
        config.research.to_params(config.agent.insecure_ssl),
    );
    let report = use_case.execute(input, progress).await?;

    let saved = ReportWriter::write(&config.research.out, &report.markdown)
        .await
        .with_context(|| {
            format!(
                "Failed to write report to {}",
                config.research.out.display()
            )
        })?;

    match format {
        OutputFormat::Json => println!("{}", ConsoleFormatter::format_json(&report)),
        OutputFormat::Answer => print!(
            "{}",
            ConsoleFormatter::format_report_preview(
                &report,
                Some(&saved),
                config.output.preview_chars,
            )
        ),
    }
    Ok(())
}

fn prompt_for_query() -> Result<String> {
    print!("Ask me something: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
