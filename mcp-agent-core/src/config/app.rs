use super::error::ConfigError;
use super::runtime::{DebugOptions, RuntimeConfig};
use super::server::ServerConfig;
use crate::planner::PlanningMode;
use std::path::Path;

/// Application configuration loaded from `config/agent.toml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub planning_mode: PlanningMode,
    pub classifier_model: Option<String>,
    pub planner_model: Option<String>,
    pub observation_limit: usize,
    pub history_preview_limit: usize,
    pub reflection: Option<bool>,
    pub debug: DebugOptions,
    pub servers: Vec<ServerConfig>,
}

impl AppConfig {
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        super::loader::load_config(path)
    }

    pub fn server(&self, name: &str) -> Option<&ServerConfig> {
        self.servers.iter().find(|server| server.name == name)
    }

    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            planning_mode: self.planning_mode,
            classifier_model: self.classifier_model.clone(),
            planner_model: self.planner_model.clone(),
            observation_limit: self.observation_limit,
            history_preview_limit: self.history_preview_limit,
            reflection: self.reflection,
            debug: self.debug,
        }
    }
}
