//! Scripted port implementations shared by the use case tests.

use crate::ports::text_generator::{GenerationError, TextGenerator};
use crate::ports::tool_caller::{ToolArgs, ToolCallError, ToolCaller};
use async_trait::async_trait;
use scout_domain::RawEnvelope;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Generator answering from a queue and recording every prompt.
pub struct ScriptedGenerator {
    responses: Mutex<VecDeque<Result<String, GenerationError>>>,
    pub prompts: Mutex<Vec<(String, Option<String>)>>,
}

impl ScriptedGenerator {
    pub fn new(responses: Vec<Result<String, GenerationError>>) -> Self {
        Self {
            responses: Mutex::new(VecDeque::from(responses)),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn answering(texts: &[&str]) -> Self {
        Self::new(texts.iter().map(|t| Ok(t.to_string())).collect())
    }

    pub fn prompts(&self) -> Vec<(String, Option<String>)> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    fn model_name(&self) -> &str {
        "scripted"
    }

    async fn generate(
        &self,
        prompt: &str,
        system_instruction: Option<&str>,
    ) -> Result<String, GenerationError> {
        self.prompts
            .lock()
            .unwrap()
            .push((prompt.to_string(), system_instruction.map(str::to_string)));
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GenerationError::Unavailable("No more responses".into())))
    }
}

/// Tool caller answering from a queue and recording every call.
pub struct ScriptedToolCaller {
    responses: Mutex<VecDeque<Result<RawEnvelope, ToolCallError>>>,
    pub calls: Mutex<Vec<(String, ToolArgs)>>,
}

impl ScriptedToolCaller {
    pub fn new(responses: Vec<Result<Value, ToolCallError>>) -> Self {
        Self {
            responses: Mutex::new(
                responses
                    .into_iter()
                    .map(|r| r.map(RawEnvelope::new))
                    .collect(),
            ),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, ToolArgs)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ToolCaller for ScriptedToolCaller {
    async fn call_tool(&self, name: &str, args: ToolArgs) -> Result<RawEnvelope, ToolCallError> {
        self.calls.lock().unwrap().push((name.to_string(), args));
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ToolCallError::unreachable(name, "No more responses")))
    }
}
