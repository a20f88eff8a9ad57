use thiserror::Error;

#[derive(Debug, Error)]
pub enum McpError {
    #[error("MCP server '{server}' has not been discovered yet")]
    NotInitialized { server: String },
    #[error("MCP server '{server}' transport error: {message}")]
    Transport { server: String, message: String },
    #[error("MCP server '{server}' responded with HTTP {status}")]
    Http { server: String, status: u16 },
    #[error("MCP server '{server}' returned invalid JSON: {source}")]
    InvalidJson {
        server: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("MCP error on '{method}' from '{server}': [{code}] {message}")]
    Rpc {
        server: String,
        method: String,
        code: i64,
        message: String,
    },
    #[error("MCP server '{server}' answered '{method}' without '{field}'")]
    MissingField {
        server: String,
        method: String,
        field: String,
    },
}

impl McpError {
    /// True for failures reaching the server, as opposed to protocol-level
    /// rejections.
    pub fn is_transport(&self) -> bool {
        matches!(self, McpError::Transport { .. } | McpError::Http { .. })
    }
}
