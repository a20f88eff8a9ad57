//! Transport seam between the protocol client and the wire.
//!
//! One JSON-RPC message is posted per call; the reply body is returned raw so
//! the client can unwrap event envelopes itself.

mod http;

pub use http::HttpTransport;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Header carrying the session token assigned during `initialize`.
pub const SESSION_HEADER: &str = "Mcp-Session-Id";

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(String),
    #[error("server responded with HTTP {0}")]
    Status(u16),
}

#[derive(Debug, Clone, Default)]
pub struct TransportReply {
    /// Session token echoed back by the server, if any.
    pub session_id: Option<String>,
    pub body: String,
}

#[async_trait]
pub trait McpTransport: Send + Sync {
    fn endpoint(&self) -> &str;

    async fn post(
        &self,
        message: &Value,
        session_id: Option<&str>,
    ) -> Result<TransportReply, TransportError>;
}
