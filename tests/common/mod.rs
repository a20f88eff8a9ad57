// Shared test doubles for the integration suites.
//
// `StubServer` answers JSON-RPC over an in-memory transport and can split
// list results into cursor-linked pages. `ScriptedModel` replays canned model
// turns and completions while recording what the runtime sent it.

#![allow(dead_code)]

use async_trait::async_trait;
use mcp_agent_core::client::McpClient;
use mcp_agent_core::model::{
    CompletionRequest, ModelError, ModelTurn, ReplayState, ToolCallingModel, ToolDefinition,
    ToolResult,
};
use mcp_agent_core::transport::{McpTransport, TransportError, TransportReply};
use mcp_agent_core::types::ChatMessage;
use serde_json::{Value, json};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::Mutex;

pub type RequestLog = Arc<Mutex<Vec<(Value, Option<String>)>>>;

#[derive(Clone)]
pub struct StubServer {
    name: String,
    page_size: usize,
    tools: Vec<Value>,
    prompts: Vec<Value>,
    resources: Vec<Value>,
    replies: HashMap<String, String>,
    requests: RequestLog,
}

impl StubServer {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            page_size: usize::MAX,
            tools: Vec::new(),
            prompts: Vec::new(),
            resources: Vec::new(),
            replies: HashMap::new(),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn page_size(mut self, size: usize) -> Self {
        self.page_size = size.max(1);
        self
    }

    pub fn tools(mut self, names: &[&str]) -> Self {
        self.tools.extend(
            names
                .iter()
                .map(|name| json!({ "name": name, "description": format!("{name} tool") })),
        );
        self
    }

    pub fn prompt(mut self, descriptor: Value) -> Self {
        self.prompts.push(descriptor);
        self
    }

    pub fn resource(mut self, uri: &str) -> Self {
        self.resources.push(json!({ "uri": uri }));
        self
    }

    pub fn reply(mut self, tool: &str, text: &str) -> Self {
        self.replies.insert(tool.to_string(), text.to_string());
        self
    }

    pub fn requests(&self) -> RequestLog {
        self.requests.clone()
    }

    pub fn client(&self) -> Arc<McpClient> {
        Arc::new(McpClient::new(
            self.name.clone(),
            Arc::new(StubTransport {
                endpoint: format!("http://stub/{}/mcp", self.name),
                server: self.clone(),
            }),
        ))
    }

    pub async fn methods(&self) -> Vec<String> {
        self.requests
            .lock()
            .await
            .iter()
            .map(|(message, _)| message["method"].as_str().unwrap_or_default().to_string())
            .collect()
    }

    pub async fn count(&self, method: &str) -> usize {
        self.methods().await.iter().filter(|sent| *sent == method).count()
    }

    fn page(&self, key: &str, items: &[Value], params: &Value) -> Value {
        let start: usize = params["cursor"]
            .as_str()
            .and_then(|cursor| cursor.strip_prefix("page-"))
            .and_then(|offset| offset.parse().ok())
            .unwrap_or(0);
        let end = start.saturating_add(self.page_size).min(items.len());
        let mut result = serde_json::Map::new();
        result.insert(key.to_string(), Value::Array(items[start.min(end)..end].to_vec()));
        if end < items.len() {
            result.insert("nextCursor".to_string(), json!(format!("page-{end}")));
        }
        Value::Object(result)
    }

    fn answer(&self, method: &str, params: &Value) -> Value {
        match method {
            "initialize" => json!({
                "result": {
                    "protocolVersion": "2024-11-05",
                    "capabilities": { "tools": {}, "prompts": {}, "resources": {} },
                    "serverInfo": { "name": self.name, "version": "2.0.0" }
                }
            }),
            "tools/list" => json!({ "result": self.page("tools", &self.tools, params) }),
            "prompts/list" => json!({ "result": self.page("prompts", &self.prompts, params) }),
            "resources/list" => json!({ "result": self.page("resources", &self.resources, params) }),
            "tools/call" => {
                let name = params["name"].as_str().unwrap_or_default();
                match self.replies.get(name) {
                    Some(text) => json!({ "result": { "content": [{ "type": "text", "text": text }] } }),
                    None => json!({ "error": { "code": -32602, "message": format!("Unknown tool: {name}") } }),
                }
            }
            "prompts/get" => {
                let name = params["name"].as_str().unwrap_or_default();
                json!({ "result": { "messages": [
                    { "role": "user", "content": { "type": "text", "text": format!("Follow the {name} layout.") } }
                ] } })
            }
            "resources/read" => json!({ "result": { "contents": [{ "uri": params["uri"], "text": "resource body" }] } }),
            other => json!({ "error": { "code": -32601, "message": format!("Method not found: {other}") } }),
        }
    }
}

struct StubTransport {
    endpoint: String,
    server: StubServer,
}

#[async_trait]
impl McpTransport for StubTransport {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn post(
        &self,
        message: &Value,
        session_id: Option<&str>,
    ) -> Result<TransportReply, TransportError> {
        self.server
            .requests
            .lock()
            .await
            .push((message.clone(), session_id.map(str::to_string)));

        let method = message["method"].as_str().unwrap_or_default();
        if method.starts_with("notifications/") {
            return Ok(TransportReply::default());
        }
        let params = message.get("params").cloned().unwrap_or(Value::Null);
        let mut reply = self.server.answer(method, &params);
        reply["jsonrpc"] = json!("2.0");
        reply["id"] = message["id"].clone();

        // Replies are wrapped as a single server-sent event.
        Ok(TransportReply {
            session_id: (method == "initialize").then(|| format!("{}-session", self.server.name)),
            body: format!("event: message\ndata: {reply}\n\n"),
        })
    }
}

#[derive(Clone, Default)]
pub struct ScriptedModel {
    turns: Arc<Mutex<VecDeque<ModelTurn>>>,
    completions: Arc<Mutex<VecDeque<String>>>,
    pub instructions: Arc<Mutex<Vec<String>>>,
    pub results: Arc<Mutex<Vec<Vec<ToolResult>>>>,
}

impl ScriptedModel {
    pub fn new(turns: Vec<ModelTurn>, completions: Vec<&str>) -> Self {
        Self {
            turns: Arc::new(Mutex::new(turns.into())),
            completions: Arc::new(Mutex::new(
                completions.into_iter().map(String::from).collect(),
            )),
            ..Self::default()
        }
    }

    async fn next_turn(&self) -> ModelTurn {
        self.turns
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| ModelTurn::text("final"))
    }
}

#[async_trait]
impl ToolCallingModel for ScriptedModel {
    async fn chat(
        &self,
        system: &str,
        _conversation: &[ChatMessage],
        _tools: &[ToolDefinition],
    ) -> Result<ModelTurn, ModelError> {
        self.instructions.lock().await.push(system.to_string());
        Ok(self.next_turn().await)
    }

    async fn continue_with_results(
        &self,
        system: &str,
        _conversation: &[ChatMessage],
        results: &[ToolResult],
        _replay: &ReplayState,
        _tools: &[ToolDefinition],
    ) -> Result<ModelTurn, ModelError> {
        self.instructions.lock().await.push(system.to_string());
        self.results.lock().await.push(results.to_vec());
        Ok(self.next_turn().await)
    }

    async fn complete(&self, _request: CompletionRequest) -> Result<String, ModelError> {
        self.completions
            .lock()
            .await
            .pop_front()
            .ok_or_else(|| ModelError::request("no scripted completion"))
    }
}
