//! Model types - calls, results, definitions and errors

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// A capability invocation requested by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Opaque identifier echoed back in the matching [`ToolResult`].
    pub call_id: String,
    pub name: String,
    #[serde(default)]
    pub arguments: Value,
}

impl ToolCall {
    pub fn new(call_id: impl Into<String>, name: impl Into<String>, arguments: Value) -> Self {
        Self {
            call_id: call_id.into(),
            name: name.into(),
            arguments,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolResult {
    pub call_id: String,
    pub output: String,
}

impl ToolResult {
    pub fn new(call_id: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            call_id: call_id.into(),
            output: output.into(),
        }
    }
}

/// A tool as advertised to the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_schema: Option<Value>,
}

/// Provider-specific items the model needs to resume a conversation after
/// tool results are returned. The runtime passes it back untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplayState(pub Vec<Value>);

/// One model turn: either a final text, tool calls, or both.
#[derive(Debug, Clone, Default)]
pub struct ModelTurn {
    pub final_text: Option<String>,
    pub tool_calls: Vec<ToolCall>,
    pub replay: ReplayState,
}

impl ModelTurn {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            final_text: Some(content.into()),
            ..Self::default()
        }
    }

    pub fn calls(tool_calls: Vec<ToolCall>) -> Self {
        Self {
            tool_calls,
            ..Self::default()
        }
    }
}

/// Single-turn completion without tools, used for classification and
/// reflection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub system: String,
    pub user: String,
    /// Model override; `None` uses the collaborator's default model.
    pub model: Option<String>,
}

impl CompletionRequest {
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
            model: None,
        }
    }

    pub fn with_model(mut self, model: Option<String>) -> Self {
        self.model = model;
        self
    }
}

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model request failed: {message}")]
    Request { message: String },
    #[error("model returned invalid response: {reason}")]
    InvalidResponse { reason: String },
}

impl ModelError {
    pub fn request(message: impl Into<String>) -> Self {
        Self::Request {
            message: message.into(),
        }
    }

    pub fn invalid_response(reason: impl Into<String>) -> Self {
        Self::InvalidResponse {
            reason: reason.into(),
        }
    }
}
