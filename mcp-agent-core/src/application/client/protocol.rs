use super::descriptor::{
    PromptDescriptor, PromptMessage, ResourceDescriptor, ServerDescriptor, ToolDescriptor,
};
use super::error::McpError;
use crate::config::ServerConfig;
use crate::infrastructure::rpc::{self, PROTOCOL_VERSION, RpcNotification, RpcRequest};
use crate::infrastructure::transport::{HttpTransport, McpTransport, TransportError, TransportReply};
use serde::de::DeserializeOwned;
use serde_json::{Map as JsonMap, Value, json};
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{Mutex as AsyncMutex, OnceCell};
use tracing::{debug, info, warn};

pub struct McpClient {
    name: String,
    transport: Arc<dyn McpTransport>,
    id_counter: AtomicU64,
    session_id: AsyncMutex<Option<String>>,
    descriptor: OnceCell<ServerDescriptor>,
}

impl McpClient {
    /// `name` labels the server in logs and errors; the endpoint comes from
    /// the transport.
    pub fn new(name: impl Into<String>, transport: Arc<dyn McpTransport>) -> Self {
        Self {
            name: name.into(),
            transport,
            id_counter: AtomicU64::new(1),
            session_id: AsyncMutex::new(None),
            descriptor: OnceCell::new(),
        }
    }

    /// HTTP client for a configured server.
    pub fn from_config(config: &ServerConfig) -> Result<Self, McpError> {
        let transport = HttpTransport::with_connect_timeout(&config.endpoint, config.connect_timeout)
            .map_err(|err| McpError::Transport {
                server: config.name.clone(),
                message: err.to_string(),
            })?;
        Ok(Self::new(config.name.clone(), Arc::new(transport)))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn endpoint(&self) -> &str {
        self.transport.endpoint()
    }

    pub async fn session_id(&self) -> Option<String> {
        self.session_id.lock().await.clone()
    }

    /// The discovered descriptor, if [`McpClient::discover`] already ran.
    pub fn descriptor(&self) -> Option<&ServerDescriptor> {
        self.descriptor.get()
    }

    /// Handshake and enumerate everything the server offers. Runs once;
    /// concurrent callers wait on the same initialisation and later calls
    /// return the cached descriptor.
    pub async fn discover(&self) -> Result<&ServerDescriptor, McpError> {
        self.descriptor
            .get_or_try_init(|| self.handshake_and_list())
            .await
    }

    pub async fn call_tool(&self, name: &str, arguments: Value) -> Result<String, McpError> {
        self.ensure_initialized()?;
        let params = json!({
            "name": name,
            "arguments": match arguments {
                Value::Null => Value::Object(Default::default()),
                other => other,
            }
        });
        let method = "tools/call";
        let result = self.send_request(method, params).await?;
        let blocks = result
            .get("content")
            .and_then(Value::as_array)
            .ok_or_else(|| self.missing_field(method, "content"))?;

        let text = blocks
            .iter()
            .filter(|block| block.get("type").and_then(Value::as_str).unwrap_or("text") == "text")
            .map(|block| block.get("text").and_then(Value::as_str).unwrap_or_default())
            .collect::<Vec<_>>()
            .join("\n");
        Ok(text)
    }

    pub async fn read_resource(&self, uri: &str) -> Result<String, McpError> {
        self.ensure_initialized()?;
        let method = "resources/read";
        let result = self.send_request(method, json!({ "uri": uri })).await?;
        let contents = result
            .get("contents")
            .and_then(Value::as_array)
            .ok_or_else(|| self.missing_field(method, "contents"))?;

        let text = contents
            .iter()
            .filter_map(|item| item.get("text"))
            .map(|text| match text {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join("\n");
        Ok(text)
    }

    /// Render a prompt template. The message array is returned in server
    /// order for the caller to interpret.
    pub async fn get_prompt(
        &self,
        name: &str,
        arguments: Option<JsonMap<String, Value>>,
    ) -> Result<Vec<PromptMessage>, McpError> {
        self.ensure_initialized()?;
        let mut params = JsonMap::new();
        params.insert("name".to_string(), Value::String(name.to_string()));
        if let Some(arguments) = arguments {
            params.insert("arguments".to_string(), Value::Object(arguments));
        }
        let method = "prompts/get";
        let mut result = self.send_request(method, Value::Object(params)).await?;
        let messages = result
            .get_mut("messages")
            .filter(|messages| messages.is_array())
            .map(Value::take)
            .ok_or_else(|| self.missing_field(method, "messages"))?;
        serde_json::from_value(messages).map_err(|source| McpError::InvalidJson {
            server: self.name.clone(),
            source,
        })
    }

    async fn handshake_and_list(&self) -> Result<ServerDescriptor, McpError> {
        let mut descriptor = self.initialize().await?;
        info!(server = %self.name, "Connected to {descriptor}");

        if descriptor.capabilities.tools {
            descriptor.tools = self.list_typed::<ToolDescriptor>("tools/list", "tools").await?;
        }
        if descriptor.capabilities.resources {
            descriptor.resources = self
                .list_typed::<ResourceDescriptor>("resources/list", "resources")
                .await?;
        }
        if descriptor.capabilities.prompts {
            descriptor.prompts = self
                .list_typed::<PromptDescriptor>("prompts/list", "prompts")
                .await?;
        }

        info!(
            server = %self.name,
            tools = descriptor.tools.len(),
            resources = descriptor.resources.len(),
            prompts = descriptor.prompts.len(),
            "Discovery complete"
        );
        Ok(descriptor)
    }

    async fn initialize(&self) -> Result<ServerDescriptor, McpError> {
        let params = json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {
                "tools": {},
                "resources": {},
                "prompts": {}
            },
            "clientInfo": {
                "name": env!("CARGO_PKG_NAME"),
                "version": env!("CARGO_PKG_VERSION")
            }
        });
        let method = "initialize";
        let reply = self.exchange(method, params).await?;
        {
            let mut session = self.session_id.lock().await;
            *session = reply.session_id.clone();
        }
        let result = self.decode(method, &reply)?;
        let descriptor = ServerDescriptor::from_initialize(self.endpoint(), &result);

        self.send_notification("notifications/initialized").await?;
        Ok(descriptor)
    }

    /// Follow `nextCursor` until a page omits it or sets it to null.
    pub(crate) async fn list_all(
        &self,
        method: &str,
        result_key: &str,
    ) -> Result<Vec<Value>, McpError> {
        let mut accumulated = Vec::new();
        let mut cursor: Option<String> = None;
        let mut seen = HashSet::new();

        loop {
            let params = match &cursor {
                Some(cursor) => json!({ "cursor": cursor }),
                None => json!({}),
            };
            let mut result = self.send_request(method, params).await?;
            if let Some(Value::Array(items)) = result.get_mut(result_key).map(Value::take) {
                accumulated.extend(items);
            }

            cursor = match result.get("nextCursor") {
                None | Some(Value::Null) => None,
                Some(Value::String(next)) => Some(next.clone()),
                Some(other) => Some(other.to_string()),
            };
            match &cursor {
                Some(next) if !seen.insert(next.clone()) => {
                    warn!(server = %self.name, method, cursor = %next, "Pagination cursor repeated; stopping");
                    break;
                }
                Some(next) => debug!(server = %self.name, method, cursor = %next, "Following pagination cursor"),
                None => break,
            }
        }

        Ok(accumulated)
    }

    async fn list_typed<T: DeserializeOwned>(
        &self,
        method: &str,
        result_key: &str,
    ) -> Result<Vec<T>, McpError> {
        let items = self.list_all(method, result_key).await?;
        let mut parsed = Vec::with_capacity(items.len());
        for item in items {
            match serde_json::from_value::<T>(item) {
                Ok(value) => parsed.push(value),
                Err(err) => warn!(
                    server = %self.name,
                    method,
                    %err,
                    "Skipping malformed list item"
                ),
            }
        }
        Ok(parsed)
    }

    async fn send_request(&self, method: &str, params: Value) -> Result<Value, McpError> {
        let reply = self.exchange(method, params).await?;
        self.decode(method, &reply)
    }

    async fn exchange(&self, method: &str, params: Value) -> Result<TransportReply, McpError> {
        let id = self.id_counter.fetch_add(1, Ordering::SeqCst);
        debug!(server = %self.name, method, id, "Sending MCP request");
        let payload = serde_json::to_value(RpcRequest::new(id, method, params)).map_err(
            |source| McpError::InvalidJson {
                server: self.name.clone(),
                source,
            },
        )?;
        let session = self.session_id().await;
        self.transport
            .post(&payload, session.as_deref())
            .await
            .map_err(|err| self.transport_error(err))
    }

    async fn send_notification(&self, method: &str) -> Result<(), McpError> {
        let payload = serde_json::to_value(RpcNotification::new(method)).map_err(|source| {
            McpError::InvalidJson {
                server: self.name.clone(),
                source,
            }
        })?;
        let session = self.session_id().await;
        self.transport
            .post(&payload, session.as_deref())
            .await
            .map_err(|err| self.transport_error(err))?;
        Ok(())
    }

    fn decode(&self, method: &str, reply: &TransportReply) -> Result<Value, McpError> {
        let response = rpc::parse_response(&reply.body).map_err(|source| McpError::InvalidJson {
            server: self.name.clone(),
            source,
        })?;
        if let Some(error) = response.error {
            return Err(McpError::Rpc {
                server: self.name.clone(),
                method: method.to_string(),
                code: error.code,
                message: error.message,
            });
        }
        Ok(response.into_result())
    }

    fn ensure_initialized(&self) -> Result<(), McpError> {
        if self.descriptor.initialized() {
            Ok(())
        } else {
            Err(McpError::NotInitialized {
                server: self.name.clone(),
            })
        }
    }

    fn missing_field(&self, method: &str, field: &str) -> McpError {
        McpError::MissingField {
            server: self.name.clone(),
            method: method.to_string(),
            field: field.to_string(),
        }
    }

    fn transport_error(&self, err: TransportError) -> McpError {
        match err {
            TransportError::Status(status) => McpError::Http {
                server: self.name.clone(),
                status,
            },
            TransportError::Request(message) => McpError::Transport {
                server: self.name.clone(),
                message,
            },
        }
    }
}
