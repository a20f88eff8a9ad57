//! # Protocol Client
//!
//! One [`McpClient`] per server endpoint. It owns the session token, performs
//! the `initialize` handshake and paginated discovery once, and exposes the
//! invocation primitives (`tools/call`, `resources/read`, `prompts/get`).

mod descriptor;
mod error;
mod protocol;

pub use descriptor::{
    PromptArgument, PromptDescriptor, PromptMessage, ResourceDescriptor, ServerCapabilities,
    ServerDescriptor, ToolDescriptor,
};
pub use error::McpError;
pub use protocol::McpClient;
