use super::{McpTransport, SESSION_HEADER, TransportError, TransportReply};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

const ACCEPT_JSON_AND_SSE: &str = "application/json, text/event-stream";

/// Streamable HTTP transport backed by `reqwest`.
#[derive(Clone)]
pub struct HttpTransport {
    http: Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(endpoint, Client::new())
    }

    pub fn with_client(endpoint: impl Into<String>, client: Client) -> Self {
        Self {
            http: client,
            endpoint: endpoint.into(),
        }
    }

    pub fn with_connect_timeout(
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, TransportError> {
        let client = Client::builder()
            .connect_timeout(timeout)
            .build()
            .map_err(|err| TransportError::Request(err.to_string()))?;
        Ok(Self::with_client(endpoint, client))
    }
}

#[async_trait]
impl McpTransport for HttpTransport {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn post(
        &self,
        message: &Value,
        session_id: Option<&str>,
    ) -> Result<TransportReply, TransportError> {
        let mut request = self
            .http
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, ACCEPT_JSON_AND_SSE)
            .json(message);
        if let Some(session_id) = session_id {
            request = request.header(SESSION_HEADER, session_id);
        }

        let response = request
            .send()
            .await
            .map_err(|err| TransportError::Request(err.to_string()))?;
        let status = response.status();
        debug!(url = %self.endpoint, status = %status, "Received MCP HTTP response");
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }

        // Header lookup is case-insensitive, so `mcp-session-id` and
        // `MCP-Session-Id` both match.
        let session_id = response
            .headers()
            .get(SESSION_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response
            .text()
            .await
            .map_err(|err| TransportError::Request(err.to_string()))?;

        Ok(TransportReply { session_id, body })
    }
}
