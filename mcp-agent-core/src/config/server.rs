use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

/// One MCP server endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub name: String,
    pub endpoint: String,
    pub connect_timeout: Duration,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawServer {
    name: String,
    endpoint: String,
    #[serde(default)]
    connect_timeout_secs: Option<u64>,
}

impl From<RawServer> for ServerConfig {
    fn from(raw: RawServer) -> Self {
        let endpoint = shellexpand::full(&raw.endpoint)
            .map(|cow| cow.into_owned())
            .unwrap_or_else(|_| raw.endpoint.clone());

        Self {
            name: raw.name.trim().to_string(),
            endpoint: endpoint.trim().to_string(),
            connect_timeout: Duration::from_secs(
                raw.connect_timeout_secs
                    .unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS),
            ),
        }
    }
}

impl ServerConfig {
    pub fn has_http_endpoint(&self) -> bool {
        self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")
    }
}
