use clap::{Parser, Subcommand};
use serde_json::{Map as JsonMap, Value};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "mcp-agent",
    version,
    about = "Inspect and call MCP servers configured for the agent"
)]
pub struct Cli {
    /// Path to the agent configuration (defaults to config/agent.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Handshake with every server and list what it offers
    Discover,
    /// Invoke a tool by name
    CallTool {
        name: String,
        /// Tool arguments as a JSON object
        #[arg(long, value_parser = parse_json_object)]
        args: Option<JsonMap<String, Value>>,
    },
    /// Read a resource by URI
    ReadResource { uri: String },
    /// Render a prompt template by name
    GetPrompt {
        name: String,
        /// Template arguments as a JSON object
        #[arg(long, value_parser = parse_json_object)]
        args: Option<JsonMap<String, Value>>,
    },
}

fn parse_json_object(raw: &str) -> Result<JsonMap<String, Value>, String> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(format!("expected a JSON object, got {other}")),
        Err(err) => Err(format!("invalid JSON: {err}")),
    }
}
