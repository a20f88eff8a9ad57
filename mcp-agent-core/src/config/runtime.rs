use crate::planner::PlanningMode;
use serde::Deserialize;

pub const DEFAULT_OBSERVATION_LIMIT: usize = 500;
pub const DEFAULT_HISTORY_PREVIEW_LIMIT: usize = 300;

/// Opt-in diagnostic dumps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DebugOptions {
    /// Log tool results and rendered prompt templates.
    pub log_protocol_payloads: bool,
    /// Log every instruction sent to the model.
    pub log_instructions: bool,
}

/// Settings passed to `AgentRuntime::new`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub planning_mode: PlanningMode,
    pub classifier_model: Option<String>,
    pub planner_model: Option<String>,
    /// Per-observation character cap in the run history.
    pub observation_limit: usize,
    /// Per-entry character cap in the rebuilt instruction.
    pub history_preview_limit: usize,
    /// Explicit reflection switch; `None` reflects only in full mode.
    pub reflection: Option<bool>,
    pub debug: DebugOptions,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            planning_mode: PlanningMode::default(),
            classifier_model: None,
            planner_model: None,
            observation_limit: DEFAULT_OBSERVATION_LIMIT,
            history_preview_limit: DEFAULT_HISTORY_PREVIEW_LIMIT,
            reflection: None,
            debug: DebugOptions::default(),
        }
    }
}

impl RuntimeConfig {
    pub fn reflection_enabled(&self) -> bool {
        self.reflection
            .unwrap_or(self.planning_mode == PlanningMode::Full)
    }
}
