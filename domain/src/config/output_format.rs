//! Output format value object

use serde::{Deserialize, Serialize};

/// How a finished run is rendered on the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain answer text (default)
    #[default]
    Answer,
    /// JSON object with the query, the chosen action and the answer
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Answer => "answer",
            OutputFormat::Json => "json",
        }
    }
}
