//! JSON-RPC 2.0 envelopes exchanged with MCP servers.

mod envelope;
mod types;

pub use envelope::{event_payload, parse_response};
pub use types::{RpcError, RpcNotification, RpcRequest, RpcResponse};

/// Protocol revision announced during `initialize`.
pub const PROTOCOL_VERSION: &str = "2024-11-05";
