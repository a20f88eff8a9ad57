//! Model collaborator contract
//!
//! The agent runtime never talks to an LLM vendor directly. It drives an
//! implementation of [`ToolCallingModel`] supplied by the caller.
//!
//! # Structure
//! - `types` - Tool calls, results, definitions, turns and errors
//! - `traits` - The `ToolCallingModel` trait

pub mod traits;
pub mod types;

pub use traits::ToolCallingModel;
pub use types::{
    CompletionRequest, ModelError, ModelTurn, ReplayState, ToolCall, ToolDefinition, ToolResult,
};
