use serde::Deserialize;
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServerCapabilities {
    pub tools: bool,
    pub resources: bool,
    pub prompts: bool,
}

impl ServerCapabilities {
    /// Read the capability areas a server advertised in its `initialize`
    /// result. An area counts as supported when its key is present.
    pub fn from_value(capabilities: &Value) -> Self {
        let advertises = |key: &str| capabilities.get(key).is_some_and(|value| !value.is_null());
        Self {
            tools: advertises("tools"),
            resources: advertises("resources"),
            prompts: advertises("prompts"),
        }
    }
}

/// Discovered state of one MCP server.
#[derive(Debug, Clone)]
pub struct ServerDescriptor {
    pub endpoint: String,
    pub name: String,
    pub version: String,
    pub capabilities: ServerCapabilities,
    /// Free-form usage guidance some servers return from `initialize`.
    pub instructions: Option<String>,
    pub tools: Vec<ToolDescriptor>,
    pub resources: Vec<ResourceDescriptor>,
    pub prompts: Vec<PromptDescriptor>,
}

impl ServerDescriptor {
    pub fn from_initialize(endpoint: impl Into<String>, result: &Value) -> Self {
        let info = result.get("serverInfo");
        let text = |key: &str, fallback: &str| {
            info.and_then(|info| info.get(key))
                .and_then(Value::as_str)
                .unwrap_or(fallback)
                .to_string()
        };
        Self {
            endpoint: endpoint.into(),
            name: text("name", "unknown"),
            version: text("version", "?"),
            capabilities: result
                .get("capabilities")
                .map(ServerCapabilities::from_value)
                .unwrap_or_default(),
            instructions: result
                .get("instructions")
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|text| !text.is_empty())
                .map(str::to_string),
            tools: Vec::new(),
            resources: Vec::new(),
            prompts: Vec::new(),
        }
    }
}

impl fmt::Display for ServerDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} v{} @ {} [tools={} resources={} prompts={}]",
            self.name,
            self.version,
            self.endpoint,
            self.tools.len(),
            self.resources.len(),
            self.prompts.len()
        )
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// JSON schema of the tool's arguments, kept as an open value.
    #[serde(default, rename = "inputSchema")]
    pub input_schema: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PromptArgument {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub required: Option<bool>,
    /// Non-standard type hint some servers attach to template arguments.
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

impl PromptArgument {
    pub fn is_required(&self) -> bool {
        self.required.unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PromptDescriptor {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub arguments: Option<Vec<PromptArgument>>,
}

impl PromptDescriptor {
    pub fn arguments(&self) -> &[PromptArgument] {
        self.arguments.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResourceDescriptor {
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "mimeType")]
    pub mime_type: Option<String>,
}

impl ResourceDescriptor {
    /// Registry key: the URI, falling back to the name.
    pub fn key(&self) -> Option<&str> {
        self.uri
            .as_deref()
            .or(self.name.as_deref())
            .filter(|key| !key.is_empty())
    }
}

/// One message of a rendered prompt template.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PromptMessage {
    #[serde(default = "default_role")]
    pub role: String,
    /// A single content object, an array of typed blocks, or a plain string.
    #[serde(default)]
    pub content: Value,
}

fn default_role() -> String {
    "user".to_string()
}

impl PromptMessage {
    /// Plain text of this message's content.
    pub fn text(&self) -> String {
        match &self.content {
            Value::String(text) => text.clone(),
            Value::Object(map) => match map.get("text") {
                Some(Value::String(text)) => text.clone(),
                _ => self.content.to_string(),
            },
            Value::Array(blocks) => blocks
                .iter()
                .filter(|block| block.get("type").and_then(Value::as_str) == Some("text"))
                .map(|block| block.get("text").and_then(Value::as_str).unwrap_or_default())
                .collect::<Vec<_>>()
                .join("\n"),
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }
}
