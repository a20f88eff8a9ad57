//! # Capability Registry
//!
//! Indexes the tools, prompt templates and resources discovered on every
//! configured server into one namespace. The first server to register a name
//! owns it; later duplicates are recorded as [`Collision`]s and dropped.

mod fetch;

pub use fetch::{
    PROMPT_FETCH_PREFIX, fetch_tool_definition, fetch_tool_name, prompt_for_fetch_tool,
};

use crate::client::{
    McpClient, McpError, PromptDescriptor, PromptMessage, ServerDescriptor, ToolDescriptor,
};
use crate::model::ToolDefinition;
use serde_json::{Map as JsonMap, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapabilityKind {
    Tool,
    Prompt,
    Resource,
}

impl fmt::Display for CapabilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CapabilityKind::Tool => "tool",
            CapabilityKind::Prompt => "prompt",
            CapabilityKind::Resource => "resource",
        })
    }
}

/// A name declared by more than one server. A prompt whose fetch tool name
/// is already a registered tool, or a tool named like the fetch tool of a
/// registered prompt, is reported the same way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collision {
    pub kind: CapabilityKind,
    pub name: String,
    /// Server that registered the name first and keeps it.
    pub kept: String,
    pub dropped: String,
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("unknown tool '{0}'")]
    UnknownTool(String),
    #[error("unknown prompt '{0}'")]
    UnknownPrompt(String),
    #[error("unknown resource '{0}'")]
    UnknownResource(String),
    #[error(transparent)]
    Client(#[from] McpError),
}

struct Entry<T> {
    item: T,
    owner: Arc<McpClient>,
}

/// Insertion-ordered, first-wins name index.
struct Catalog<T> {
    entries: Vec<Entry<T>>,
    index: HashMap<String, usize>,
}

impl<T> Default for Catalog<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T> Catalog<T> {
    /// Returns the current owner's server name when `name` is already taken.
    fn insert(&mut self, name: &str, item: T, owner: &Arc<McpClient>) -> Result<(), String> {
        if let Some(&position) = self.index.get(name) {
            return Err(self.entries[position].owner.name().to_string());
        }
        self.index.insert(name.to_string(), self.entries.len());
        self.entries.push(Entry {
            item,
            owner: owner.clone(),
        });
        Ok(())
    }

    fn get(&self, name: &str) -> Option<&Entry<T>> {
        self.index.get(name).map(|&position| &self.entries[position])
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Default)]
pub struct CapabilityRegistry {
    servers: Vec<Arc<McpClient>>,
    tools: Catalog<ToolDescriptor>,
    prompts: Catalog<PromptDescriptor>,
    resources: Catalog<String>,
    collisions: Vec<Collision>,
}

impl CapabilityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discover every client in order and register what it offers. Any
    /// discovery failure aborts the whole build.
    pub async fn discover(clients: Vec<Arc<McpClient>>) -> Result<Self, McpError> {
        let mut registry = Self::new();
        for client in clients {
            client.discover().await?;
            registry.register(client)?;
        }
        info!(
            servers = registry.servers.len(),
            tools = registry.tools.len(),
            prompts = registry.prompts.len(),
            resources = registry.resources.len(),
            collisions = registry.collisions.len(),
            "Capability registry ready"
        );
        Ok(registry)
    }

    /// Register an already discovered client.
    pub fn register(&mut self, client: Arc<McpClient>) -> Result<(), McpError> {
        let descriptor = client
            .descriptor()
            .ok_or_else(|| McpError::NotInitialized {
                server: client.name().to_string(),
            })?;

        // Tools share one namespace with the synthesized prompt fetch tools.
        for tool in &descriptor.tools {
            let shadowed = prompt_for_fetch_tool(&tool.name)
                .and_then(|prompt| self.prompts.get(prompt))
                .map(|entry| entry.owner.name().to_string());
            let inserted = match shadowed {
                Some(kept) => Err(kept),
                None => self.tools.insert(&tool.name, tool.clone(), &client),
            };
            if let Err(kept) = inserted {
                self.record_collision(CapabilityKind::Tool, &tool.name, kept, client.name());
            }
        }
        for prompt in &descriptor.prompts {
            let shadowed = self
                .tools
                .get(&fetch_tool_name(&prompt.name))
                .map(|entry| entry.owner.name().to_string());
            let inserted = match shadowed {
                Some(kept) => Err(kept),
                None => self.prompts.insert(&prompt.name, prompt.clone(), &client),
            };
            if let Err(kept) = inserted {
                self.record_collision(CapabilityKind::Prompt, &prompt.name, kept, client.name());
            }
        }
        for resource in &descriptor.resources {
            let Some(key) = resource.key() else {
                warn!(server = client.name(), "Skipping resource without uri or name");
                continue;
            };
            if let Err(kept) = self.resources.insert(key, key.to_string(), &client) {
                self.record_collision(CapabilityKind::Resource, key, kept, client.name());
            }
        }

        self.servers.push(client);
        Ok(())
    }

    fn record_collision(&mut self, kind: CapabilityKind, name: &str, kept: String, dropped: &str) {
        warn!(
            %kind,
            name,
            kept = %kept,
            dropped,
            "Duplicate capability ignored; first registration wins"
        );
        self.collisions.push(Collision {
            kind,
            name: name.to_string(),
            kept,
            dropped: dropped.to_string(),
        });
    }

    pub fn collisions(&self) -> &[Collision] {
        &self.collisions
    }

    pub fn servers(&self) -> impl Iterator<Item = &ServerDescriptor> {
        self.servers.iter().filter_map(|client| client.descriptor())
    }

    pub fn tool_names(&self) -> impl Iterator<Item = &str> {
        self.tools.entries.iter().map(|entry| entry.item.name.as_str())
    }

    pub fn prompt_names(&self) -> impl Iterator<Item = &str> {
        self.prompts.entries.iter().map(|entry| entry.item.name.as_str())
    }

    pub fn resource_keys(&self) -> impl Iterator<Item = &str> {
        self.resources.entries.iter().map(|entry| entry.item.as_str())
    }

    pub fn tool(&self, name: &str) -> Option<&ToolDescriptor> {
        self.tools.get(name).map(|entry| &entry.item)
    }

    pub fn prompt(&self, name: &str) -> Option<&PromptDescriptor> {
        self.prompts.get(name).map(|entry| &entry.item)
    }

    pub fn tool_owner(&self, name: &str) -> Option<&Arc<McpClient>> {
        self.tools.get(name).map(|entry| &entry.owner)
    }

    pub fn prompt_owner(&self, name: &str) -> Option<&Arc<McpClient>> {
        self.prompts.get(name).map(|entry| &entry.owner)
    }

    pub fn resource_owner(&self, uri: &str) -> Option<&Arc<McpClient>> {
        self.resources.get(uri).map(|entry| &entry.owner)
    }

    /// Tools as advertised to the model: every registered tool followed by
    /// one fetch tool per prompt template.
    pub fn tool_definitions(&self) -> Vec<ToolDefinition> {
        let tools = self.tools.entries.iter().map(|entry| ToolDefinition {
            name: entry.item.name.clone(),
            description: entry.item.description.clone().unwrap_or_default(),
            input_schema: entry.item.input_schema.clone(),
        });
        let fetchers = self
            .prompts
            .entries
            .iter()
            .map(|entry| fetch_tool_definition(&entry.item));
        tools.chain(fetchers).collect()
    }

    /// Compact name listing handed to the planner.
    pub fn capability_summary(&self) -> String {
        let mut summary = String::new();
        let mut section = |label: &str, names: Vec<&str>| {
            if !names.is_empty() {
                summary.push_str(&format!("{label}: {}\n", names.join(", ")));
            }
        };
        section("TOOLS", self.tool_names().collect());
        section("PROMPT TEMPLATES", self.prompt_names().collect());
        section("RESOURCES", self.resource_keys().collect());
        summary
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty() && self.prompts.is_empty() && self.resources.is_empty()
    }

    pub async fn call_tool(&self, name: &str, arguments: Value) -> Result<String, RegistryError> {
        let owner = self
            .tool_owner(name)
            .ok_or_else(|| RegistryError::UnknownTool(name.to_string()))?;
        Ok(owner.call_tool(name, arguments).await?)
    }

    pub async fn get_prompt(
        &self,
        name: &str,
        arguments: Option<JsonMap<String, Value>>,
    ) -> Result<Vec<PromptMessage>, RegistryError> {
        let owner = self
            .prompt_owner(name)
            .ok_or_else(|| RegistryError::UnknownPrompt(name.to_string()))?;
        Ok(owner.get_prompt(name, arguments).await?)
    }

    pub async fn read_resource(&self, uri: &str) -> Result<String, RegistryError> {
        let owner = self
            .resource_owner(uri)
            .ok_or_else(|| RegistryError::UnknownResource(uri.to_string()))?;
        Ok(owner.read_resource(uri).await?)
    }
}
