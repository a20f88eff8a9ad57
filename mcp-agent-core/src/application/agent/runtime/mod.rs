mod coercion;
mod dispatch;
mod instructions;
mod synthesis;

use std::sync::Arc;

use crate::config::DebugOptions;
use crate::model::ToolDefinition;
use crate::registry::CapabilityRegistry;

pub use coercion::coerce_arguments;
pub use dispatch::{DispatchOutcome, flatten_prompt_messages};
pub(super) use instructions::history_block;
pub(super) use super::errors::AgentError;
pub(super) use super::models::SynthesisInput;

const DEBUG_DUMP_LIMIT: usize = 2000;

/// Per-runtime view of the registry: the advertised tool definitions and
/// the base instruction are derived once at construction.
pub(crate) struct CapabilityRuntime {
    registry: Arc<CapabilityRegistry>,
    definitions: Vec<ToolDefinition>,
    base_instruction: String,
    debug: DebugOptions,
}

impl CapabilityRuntime {
    pub fn new(registry: Arc<CapabilityRegistry>, debug: DebugOptions) -> Self {
        let definitions = registry.tool_definitions();
        let base_instruction = instructions::base_instruction(&registry, &definitions);
        Self {
            registry,
            definitions,
            base_instruction,
            debug,
        }
    }

    pub fn registry(&self) -> &CapabilityRegistry {
        &self.registry
    }

    pub fn definitions(&self) -> &[ToolDefinition] {
        &self.definitions
    }

    pub fn base_instruction(&self) -> &str {
        &self.base_instruction
    }
}

/// Cut `text` to at most `max` characters, marking the cut with `...`.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    if max < 3 {
        return text.chars().take(max).collect();
    }
    let kept: String = text.chars().take(max - 3).collect();
    format!("{kept}...")
}

pub(super) fn debug_dump(text: &str) -> String {
    truncate(text, DEBUG_DUMP_LIMIT)
}
