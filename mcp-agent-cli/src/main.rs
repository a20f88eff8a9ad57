mod cli;

use clap::Parser;
use cli::{Cli, Command};
use mcp_agent_core::client::McpClient;
use mcp_agent_core::config::AppConfig;
use mcp_agent_core::registry::CapabilityRegistry;
use serde_json::{Value, json};
use std::error::Error;
use std::sync::Arc;
use std::sync::Once;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();
    let cli = Cli::parse();
    debug!(?cli.command, config = ?cli.config, "CLI arguments parsed");

    let config = AppConfig::load(cli.config.as_deref())?;
    info!(servers = config.servers.len(), mode = %config.planning_mode, "Loaded configuration");

    let clients = config
        .servers
        .iter()
        .map(|server| McpClient::from_config(server).map(Arc::new))
        .collect::<Result<Vec<_>, _>>()?;
    let registry = CapabilityRegistry::discover(clients).await?;

    let output = match cli.command {
        Command::Discover => describe(&registry),
        Command::CallTool { name, args } => {
            let arguments = args.map(Value::Object).unwrap_or(Value::Null);
            let text = registry.call_tool(&name, arguments).await?;
            json!({ "tool": name, "text": text })
        }
        Command::ReadResource { uri } => {
            let text = registry.read_resource(&uri).await?;
            json!({ "uri": uri, "text": text })
        }
        Command::GetPrompt { name, args } => {
            let messages = registry.get_prompt(&name, args).await?;
            let messages: Vec<Value> = messages
                .iter()
                .map(|message| json!({ "role": message.role, "text": message.text() }))
                .collect();
            json!({ "prompt": name, "messages": messages })
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn describe(registry: &CapabilityRegistry) -> Value {
    let servers: Vec<Value> = registry
        .servers()
        .map(|server| {
            json!({
                "summary": server.to_string(),
                "name": server.name,
                "version": server.version,
                "endpoint": server.endpoint,
                "instructions": server.instructions,
                "tools": server.tools.iter().map(|tool| tool.name.as_str()).collect::<Vec<_>>(),
                "prompts": server.prompts.iter().map(|prompt| prompt.name.as_str()).collect::<Vec<_>>(),
                "resources": server.resources.iter().filter_map(|resource| resource.key()).collect::<Vec<_>>(),
            })
        })
        .collect();
    let collisions: Vec<Value> = registry
        .collisions()
        .iter()
        .map(|collision| {
            json!({
                "kind": collision.kind.to_string(),
                "name": collision.name,
                "kept": collision.kept,
                "dropped": collision.dropped,
            })
        })
        .collect();

    json!({
        "servers": servers,
        "collisions": collisions,
        "capabilities": registry.capability_summary(),
    })
}

fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    });
}
