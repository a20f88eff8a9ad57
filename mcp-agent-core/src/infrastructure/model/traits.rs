//! Model traits

use super::types::{
    CompletionRequest, ModelError, ModelTurn, ReplayState, ToolDefinition, ToolResult,
};
use crate::types::ChatMessage;
use async_trait::async_trait;

/// Capability-calling collaborator driven by the agent runtime.
///
/// Implementations own their credentials and vendor wire format.
#[async_trait]
pub trait ToolCallingModel: Send + Sync {
    /// First turn of a run; may return tool calls or a final text.
    async fn chat(
        &self,
        system: &str,
        conversation: &[ChatMessage],
        tools: &[ToolDefinition],
    ) -> Result<ModelTurn, ModelError>;

    /// Continue after the runtime has produced results for the previous calls.
    async fn continue_with_results(
        &self,
        system: &str,
        conversation: &[ChatMessage],
        results: &[ToolResult],
        replay: &ReplayState,
        tools: &[ToolDefinition],
    ) -> Result<ModelTurn, ModelError>;

    /// Plain single-turn completion. The default ignores `request.model` and
    /// routes through [`ToolCallingModel::chat`] with no tools.
    async fn complete(&self, request: CompletionRequest) -> Result<String, ModelError> {
        let conversation = [ChatMessage::user(request.user)];
        let turn = self.chat(&request.system, &conversation, &[]).await?;
        Ok(turn.final_text.unwrap_or_default())
    }
}
