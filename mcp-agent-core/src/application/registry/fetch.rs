use crate::client::PromptDescriptor;
use crate::model::ToolDefinition;
use serde_json::{Map as JsonMap, Value, json};

/// Name prefix of the tool synthesized for every prompt template.
pub const PROMPT_FETCH_PREFIX: &str = "get_prompt__";

pub fn fetch_tool_name(prompt: &str) -> String {
    format!("{PROMPT_FETCH_PREFIX}{prompt}")
}

/// Template name addressed by a fetch tool, or `None` for ordinary tools.
pub fn prompt_for_fetch_tool(tool: &str) -> Option<&str> {
    tool.strip_prefix(PROMPT_FETCH_PREFIX)
}

/// Tool-shaped definition that lets the model fetch a prompt template.
///
/// Each declared argument becomes a schema property typed by the
/// argument's `type` hint, or `string` without one. Required arguments are
/// listed under `required`.
pub fn fetch_tool_definition(prompt: &PromptDescriptor) -> ToolDefinition {
    let mut properties = JsonMap::new();
    let mut required = Vec::new();

    for argument in prompt.arguments() {
        let mut property = JsonMap::new();
        let kind = argument
            .kind
            .as_deref()
            .map(str::trim)
            .filter(|kind| !kind.is_empty())
            .unwrap_or("string");
        property.insert("type".to_string(), Value::String(kind.to_string()));
        if let Some(description) = argument
            .description
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
        {
            property.insert(
                "description".to_string(),
                Value::String(description.to_string()),
            );
        }
        properties.insert(argument.name.clone(), Value::Object(property));
        if argument.is_required() {
            required.push(Value::String(argument.name.clone()));
        }
    }

    let mut schema = json!({ "type": "object", "properties": properties });
    if !required.is_empty() {
        schema["required"] = Value::Array(required);
    }

    ToolDefinition {
        name: fetch_tool_name(&prompt.name),
        description: format!(
            "Output template for '{}'. Structures the FINAL ANSWER. \
             Call early to set format; use data tools for research. {}",
            prompt.name,
            prompt.description.as_deref().unwrap_or_default()
        ),
        input_schema: Some(schema),
    }
}
