//! Console output for agent answers and research reports

use colored::Colorize;
use scout_application::{RunAgentError, RunAgentOutput};
use scout_domain::util::truncate_chars;
use scout_domain::{ConfigIssue, ResearchReport, Severity};
use serde::Serialize;
use std::path::Path;

/// Formats run results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// The answer text alone, ready for piping.
    pub fn format_answer(output: &RunAgentOutput) -> String {
        let mut text = output.answer.trim_end().to_string();
        text.push('\n');
        text
    }

    /// Pretty JSON for any serializable result
    pub fn format_json<T: Serialize>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }

    /// Where the report went plus the first `preview_chars` characters.
    pub fn format_report_preview(
        report: &ResearchReport,
        saved_to: Option<&Path>,
        preview_chars: usize,
    ) -> String {
        let mut output = String::new();

        if let Some(path) = saved_to {
            output.push_str(&format!(
                "{} {}\n",
                "Report saved to".green().bold(),
                path.display()
            ));
        }
        if report.generated_locally {
            output.push_str(&format!(
                "{}\n",
                "Model unavailable; report assembled from search results.".yellow()
            ));
        }
        output.push_str(&format!(
            "{} {} results, {} pages\n",
            "Sources:".dimmed(),
            report.results.len(),
            report.pages.len()
        ));

        output.push_str(&Self::section_header("Preview"));
        let preview = truncate_chars(&report.markdown, preview_chars);
        output.push_str(preview);
        if preview.len() < report.markdown.len() {
            output.push_str("\n...");
        }
        output.push('\n');

        output
    }

    /// Error message with the query to retry.
    pub fn format_agent_error(error: &RunAgentError) -> String {
        format!(
            "{} {}\n{} scout {:?}\n",
            "Error:".red().bold(),
            error,
            "Retry with:".dimmed(),
            error.query()
        )
    }

    pub fn format_config_issue(issue: &ConfigIssue) -> String {
        match issue.severity {
            Severity::Error => format!("{} {}", "Config error:".red().bold(), issue.message),
            Severity::Warning => format!("{} {}", "Config warning:".yellow().bold(), issue.message),
        }
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }
}
