//! Planning step: ask the model for an action and parse it.

use super::RunAgentUseCase;
use super::types::RunAgentError;
use crate::ports::run_logger::RunEvent;
use scout_domain::{ActionDescriptor, AgentPhase, AgentPromptTemplate, Query, parse_action_with};
use serde_json::json;
use tracing::{debug, info};

impl RunAgentUseCase {
    pub(super) async fn plan(&self, query: &Query) -> Result<ActionDescriptor, RunAgentError> {
        let system = AgentPromptTemplate::planner_system();
        let output = self
            .generate(query, AgentPhase::Planning, query.content(), Some(system.as_str()))
            .await?;
        debug!(chars = output.len(), "Planner responded");
        self.run_logger.log(RunEvent::new(
            "plan_output",
            json!({ "query": query.content(), "output": output }),
        ));

        let action = parse_action_with(&output, &self.params.action_defaults());
        info!(action = action.kind(), "Planner chose action");
        self.run_logger.log(RunEvent::new(
            "action_parsed",
            json!({ "action": &action }),
        ));
        Ok(action)
    }
}
