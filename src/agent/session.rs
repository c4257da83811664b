//! Assistant session: one user message in, one answer out, with any number
//! of tool calls in between.

use crate::agent::model::ChatModel;
use crate::agent::system_prompt::SYSTEM_PROMPT;
use crate::config::GigaToolsConfig;
use crate::error::{Error, Result};
use crate::tools::ToolRegistry;
use crate::types::*;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Anything that can answer a single user message.
#[async_trait]
pub trait Assistant: Send + Sync {
    async fn chat(&self, message: &str) -> Result<String>;
}

#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub system_prompt: String,
    pub max_tool_calls_per_turn: u32,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            system_prompt: SYSTEM_PROMPT.to_string(),
            max_tool_calls_per_turn: 10,
        }
    }
}

impl From<&GigaToolsConfig> for SessionSettings {
    fn from(config: &GigaToolsConfig) -> Self {
        Self {
            max_tool_calls_per_turn: config.max_tool_calls_per_turn,
            ..Self::default()
        }
    }
}

/// Chat model plus registered tools. Keeps no history between turns.
pub struct AssistantSession {
    model: Arc<dyn ChatModel>,
    registry: ToolRegistry,
    settings: SessionSettings,
}

impl AssistantSession {
    pub fn new(model: Arc<dyn ChatModel>, registry: ToolRegistry, settings: SessionSettings) -> Self {
        Self {
            model,
            registry,
            settings,
        }
    }
}

#[async_trait]
impl Assistant for AssistantSession {
    async fn chat(&self, message: &str) -> Result<String> {
        let tools = self.registry.descriptors();
        let mut messages = vec![
            ChatMessage::system(self.settings.system_prompt.as_str()),
            ChatMessage::user(message),
        ];
        let mut tool_calls: u32 = 0;
        let mut failed_calls: u32 = 0;

        loop {
            let completion = self.model.complete(&messages, &tools).await?;
            let usage = &completion.usage;
            debug!(
                "{} used {} tokens ({} prompt, {} completion)",
                self.model.model_name(),
                usage.total_tokens,
                usage.prompt_tokens,
                usage.completion_tokens
            );

            let Some(call) = completion.function_call else {
                return completion.content.ok_or(Error::EmptyResponse);
            };

            if tool_calls >= self.settings.max_tool_calls_per_turn {
                warn!("Tool call limit reached, last request: {}", call.name);
                return Err(Error::ToolLoop(self.settings.max_tool_calls_per_turn));
            }
            tool_calls += 1;

            info!("Tool: {}({})", call.name, call.arguments);
            let outcome = self.registry.execute(&call.name, &call.arguments);
            if outcome.success {
                debug!("Tool {} returned {}", call.name, outcome.content);
            } else {
                failed_calls += 1;
                warn!("Tool {} failed ({} this turn): {}", call.name, failed_calls, outcome.content);
            }

            let name = call.name.clone();
            messages.push(ChatMessage::assistant_call(call, completion.functions_state_id));
            messages.push(ChatMessage::function_result(name, outcome.content));
        }
    }
}
