//! Seam between the assistant session and a concrete chat backend.

use crate::error::Result;
use crate::tools::ToolDescriptor;
use crate::types::{ChatMessage, Completion};
use async_trait::async_trait;

/// A chat-completion backend that understands function calling.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Model identifier, for logs.
    fn model_name(&self) -> &str;

    /// Send the conversation so far plus the callable tools; the reply is
    /// either final text or a single function call.
    async fn complete(
        &self,
        messages: &[ChatMessage],
        tools: &[&ToolDescriptor],
    ) -> Result<Completion>;
}
