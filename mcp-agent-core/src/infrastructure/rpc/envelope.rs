use super::types::RpcResponse;

const DATA_MARKER: &str = "data:";

/// Locate the JSON payload in a response body.
///
/// Streamable HTTP servers may wrap the reply in a single server-sent event
/// (`event: message\ndata: {...}`). Plain JSON bodies are returned as-is.
pub fn event_payload(body: &str) -> &str {
    let trimmed = body.trim();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return trimmed;
    }

    trimmed
        .lines()
        .filter_map(|line| line.trim_start().strip_prefix(DATA_MARKER))
        .map(str::trim)
        .find(|payload| !payload.is_empty())
        .unwrap_or(trimmed)
}

pub fn parse_response(body: &str) -> Result<RpcResponse, serde_json::Error> {
    serde_json::from_str(event_payload(body))
}
