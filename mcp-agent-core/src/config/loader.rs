use super::CONFIG_PATH;
use super::app::AppConfig;
use super::error::ConfigError;
use super::runtime::{DEFAULT_HISTORY_PREVIEW_LIMIT, DEFAULT_OBSERVATION_LIMIT, DebugOptions};
use super::server::{RawServer, ServerConfig};
use crate::planner::PlanningMode;
use dotenvy::from_filename;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::Once;
use tracing::debug;

static ENV_LOADER: Once = Once::new();

/// Raw configuration structure for deserialization from TOML
#[derive(Debug, Deserialize, Default)]
pub(super) struct RawConfig {
    #[serde(default)]
    pub planning_mode: PlanningMode,
    pub classifier_model: Option<String>,
    pub planner_model: Option<String>,
    pub observation_limit: Option<usize>,
    pub history_preview_limit: Option<usize>,
    pub reflection: Option<bool>,
    #[serde(default)]
    pub debug: DebugOptions,
    #[serde(default)]
    pub servers: Vec<RawServer>,
}

/// Ensures environment variables are loaded from config/.env
pub fn ensure_env_loaded() {
    ENV_LOADER.call_once(|| {
        let _ = from_filename("config/.env");
    });
}

/// Load and validate configuration from a file path
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    ensure_env_loaded();
    let config_path = path.unwrap_or_else(|| Path::new(CONFIG_PATH));
    debug!(path = %config_path.display(), "Reading agent configuration file");

    let content = fs::read_to_string(config_path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            ConfigError::NotFound {
                path: config_path.to_path_buf(),
            }
        } else {
            ConfigError::Io {
                path: config_path.to_path_buf(),
                source,
            }
        }
    })?;

    parse_config(&content)
}

/// Parse and validate configuration from TOML text
pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    let parsed: RawConfig =
        toml::from_str(content).map_err(|source| ConfigError::Parse { source })?;
    validate_and_build(parsed)
}

fn validate_and_build(parsed: RawConfig) -> Result<AppConfig, ConfigError> {
    if parsed.servers.is_empty() {
        return Err(ConfigError::NoServers);
    }

    let servers: Vec<ServerConfig> = parsed.servers.into_iter().map(ServerConfig::from).collect();
    let mut seen = HashSet::new();
    for server in &servers {
        if !server.has_http_endpoint() {
            return Err(ConfigError::InvalidEndpoint {
                server: server.name.clone(),
            });
        }
        if !seen.insert(server.name.as_str()) {
            return Err(ConfigError::DuplicateServer {
                server: server.name.clone(),
            });
        }
    }

    let blank_to_none = |value: Option<String>| value.filter(|text| !text.trim().is_empty());

    Ok(AppConfig {
        planning_mode: parsed.planning_mode,
        classifier_model: blank_to_none(parsed.classifier_model),
        planner_model: blank_to_none(parsed.planner_model),
        observation_limit: parsed.observation_limit.unwrap_or(DEFAULT_OBSERVATION_LIMIT),
        history_preview_limit: parsed
            .history_preview_limit
            .unwrap_or(DEFAULT_HISTORY_PREVIEW_LIMIT),
        reflection: parsed.reflection,
        debug: parsed.debug,
        servers,
    })
}
