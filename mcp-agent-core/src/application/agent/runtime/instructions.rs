use super::{CapabilityRuntime, truncate};
use crate::model::ToolDefinition;
use crate::planner::{Plan, PlanningMode};
use crate::registry::{CapabilityRegistry, fetch_tool_name};

pub(super) fn base_instruction(
    registry: &CapabilityRegistry,
    definitions: &[ToolDefinition],
) -> String {
    let mut text = String::from("You are a capable AI assistant backed by MCP server tools.\n\n");

    let tools: Vec<_> = registry.tool_names().collect();
    if !tools.is_empty() {
        text.push_str("## Available Tools\n");
        for name in tools {
            text.push_str(&format!("- **{name}**"));
            let description = definitions
                .iter()
                .find(|definition| definition.name == name)
                .map(|definition| first_line(&definition.description))
                .unwrap_or_default();
            if !description.is_empty() {
                text.push_str(&format!(": {description}"));
            }
            text.push('\n');
        }
        text.push('\n');
    }

    let prompts: Vec<_> = registry
        .prompt_names()
        .filter_map(|name| registry.prompt(name))
        .collect();
    if !prompts.is_empty() {
        text.push_str("## Prompt Templates (shape final answer, not data sources)\n");
        text.push_str(
            "Calling get_prompt__* defers the template to synthesis. Still use data tools.\n\n",
        );
        for prompt in prompts {
            text.push_str(&format!("- **{}**", prompt.name));
            if let Some(description) = prompt
                .description
                .as_deref()
                .map(str::trim)
                .filter(|text| !text.is_empty())
            {
                text.push_str(&format!(": {}", description.replace('\n', " ")));
            }
            text.push_str(&format!("\n  -> call: {}\n", fetch_tool_name(&prompt.name)));
            for argument in prompt.arguments() {
                let requirement = if argument.is_required() {
                    "required"
                } else {
                    "optional"
                };
                text.push_str(&format!("    - {} ({requirement})", argument.name));
                if let Some(description) = argument
                    .description
                    .as_deref()
                    .map(str::trim)
                    .filter(|text| !text.is_empty())
                {
                    text.push_str(&format!(": {description}"));
                }
                text.push('\n');
            }
            text.push('\n');
        }
    }

    let guidance: Vec<_> = registry
        .servers()
        .filter_map(|server| {
            server
                .instructions
                .as_deref()
                .map(|instructions| (server.name.as_str(), instructions))
        })
        .collect();
    if !guidance.is_empty() {
        text.push_str("## Server Guidance\n");
        for (server, instructions) in guidance {
            text.push_str(&format!("### {server}\n{instructions}\n\n"));
        }
    }

    text
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or_default().trim()
}

impl CapabilityRuntime {
    /// Base instruction plus the goal, planned steps, remaining budget and
    /// guard rules for the next model turn.
    pub fn execution_instruction(&self, plan: &Plan, remaining: usize) -> String {
        let mut text = format!("{}\n## Execution\n", self.base_instruction);
        if plan.mode != PlanningMode::Minimal {
            text.push_str(&format!("Goal: {}\n", plan.intent));
        }
        if !plan.steps.is_empty() {
            text.push_str("Planned steps:\n");
            for (index, step) in plan.steps.iter().enumerate() {
                text.push_str(&format!("{}. {step}\n", index + 1));
            }
        }
        text.push_str(&format!(
            "Steps remaining: {remaining}\n\n\
             - Do NOT exceed {remaining} tool-call turns.\n\
             - Never repeat a tool call with the same arguments.\n\
             - Stop as soon as you have enough to answer.\n"
        ));
        text
    }
}

/// Truncated view of the gathered observations appended to the rebuilt
/// instruction. Empty when nothing was gathered.
pub fn history_block(history: &[String], preview_limit: usize) -> String {
    if history.is_empty() {
        return String::new();
    }
    let mut block = String::from("\n## Gathered so far:\n");
    for entry in history {
        block.push_str(&truncate(entry, preview_limit));
        block.push('\n');
    }
    block
}
