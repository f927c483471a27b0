//! Progress reporting for agent and research runs

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use scout_application::{AgentProgressNotifier, ToolCallError};
use scout_domain::AgentPhase;
use std::sync::Mutex;
use std::time::Duration;

/// Spinner that follows the run's phase and tool calls
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn with_spinner(&self, f: impl FnOnce(&ProgressBar)) {
        let Ok(mut guard) = self.spinner.lock() else {
            return;
        };
        let spinner = guard.get_or_insert_with(|| {
            let pb = ProgressBar::new_spinner();
            pb.set_style(Self::spinner_style());
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        });
        f(spinner);
    }

    fn finish(&self) {
        if let Ok(mut guard) = self.spinner.lock()
            && let Some(pb) = guard.take()
        {
            pb.finish_and_clear();
        }
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        self.finish();
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentProgressNotifier for ProgressReporter {
    fn on_phase_change(&self, phase: AgentPhase) {
        if phase == AgentPhase::Done {
            self.finish();
            return;
        }
        self.with_spinner(|pb| {
            pb.set_prefix(phase.display_name());
            pb.set_message("");
        });
    }

    fn on_tool_start(&self, tool: &str, target: &str) {
        self.with_spinner(|pb| pb.set_message(format!("{} {}", tool, target.dimmed())));
    }

    fn on_tool_complete(&self, tool: &str, target: &str) {
        self.with_spinner(|pb| pb.println(format!("  {} {} {}", "v".green(), tool, target)));
    }

    fn on_tool_failed(&self, tool: &str, target: &str, error: &ToolCallError) {
        self.with_spinner(|pb| {
            pb.println(format!(
                "  {} {} {} ({})",
                "x".red(),
                tool,
                target,
                error.kind()
            ))
        });
    }

    fn on_fallback(&self, reason: &str) {
        self.with_spinner(|pb| pb.println(format!("  {} {}", "~".yellow(), reason)));
    }
}

/// Simple text-based progress (no fancy UI), written to stderr
pub struct SimpleProgress;

impl AgentProgressNotifier for SimpleProgress {
    fn on_phase_change(&self, phase: AgentPhase) {
        if phase != AgentPhase::Done {
            eprintln!("{} {}", "->".cyan(), phase.display_name().bold());
        }
    }

    fn on_tool_complete(&self, tool: &str, target: &str) {
        eprintln!("  {} {} {}", "v".green(), tool, target);
    }

    fn on_tool_failed(&self, tool: &str, target: &str, error: &ToolCallError) {
        eprintln!("  {} {} {} ({})", "x".red(), tool, target, error.message());
    }

    fn on_fallback(&self, reason: &str) {
        eprintln!("  {} {}", "~".yellow(), reason);
    }
}
