//! Agent run phases

use serde::{Deserialize, Serialize};
use std::fmt;

/// Phase of a single agent run.
///
/// A run moves `Planning → Dispatching → ToolCalling → Synthesizing → Done`.
/// `ToolCalling` and `Synthesizing` are skipped depending on the action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentPhase {
    /// Asking the model which action to take
    Planning,
    /// Branching on the parsed action
    Dispatching,
    /// Calling a remote tool
    ToolCalling,
    /// Producing the final answer from the gathered grounding
    Synthesizing,
    /// Summarizing one fetched page
    Summarizing,
    /// Terminal
    Done,
}

impl AgentPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentPhase::Planning => "planning",
            AgentPhase::Dispatching => "dispatching",
            AgentPhase::ToolCalling => "tool_calling",
            AgentPhase::Synthesizing => "synthesizing",
            AgentPhase::Summarizing => "summarizing",
            AgentPhase::Done => "done",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            AgentPhase::Planning => "Planning",
            AgentPhase::Dispatching => "Dispatching",
            AgentPhase::ToolCalling => "Calling tool",
            AgentPhase::Synthesizing => "Synthesizing",
            AgentPhase::Summarizing => "Summarizing",
            AgentPhase::Done => "Done",
        }
    }

    /// Phases whose generation failure ends the run.
    pub fn is_generation_phase(&self) -> bool {
        matches!(
            self,
            AgentPhase::Planning | AgentPhase::Synthesizing | AgentPhase::Summarizing
        )
    }
}

impl fmt::Display for AgentPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_names() {
        assert_eq!(AgentPhase::ToolCalling.as_str(), "tool_calling");
        assert_eq!(AgentPhase::Synthesizing.to_string(), "synthesizing");
        assert_eq!(AgentPhase::Planning.display_name(), "Planning");
    }

    #[test]
    fn test_generation_phases() {
        assert!(AgentPhase::Planning.is_generation_phase());
        assert!(AgentPhase::Synthesizing.is_generation_phase());
        assert!(!AgentPhase::ToolCalling.is_generation_phase());
        assert!(!AgentPhase::Done.is_generation_phase());
    }
}
