use super::{AgentError, CapabilityRuntime, coerce_arguments, debug_dump};
use crate::client::PromptMessage;
use crate::model::ToolCall;
use crate::registry::prompt_for_fetch_tool;
use tracing::{debug, info};

/// Where a dispatched call's result goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Research material; joins the run history.
    Observation(String),
    /// Rendered prompt template; held back for synthesis.
    DeferredTemplate(String),
}

impl CapabilityRuntime {
    pub async fn dispatch(&self, call: &ToolCall) -> Result<DispatchOutcome, AgentError> {
        if let Some(owner) = self.registry.tool_owner(&call.name) {
            debug!(server = owner.name(), tool = call.name.as_str(), "Calling tool");
            let text = owner.call_tool(&call.name, call.arguments.clone()).await?;
            if self.debug.log_protocol_payloads {
                info!(tool = call.name.as_str(), "tools/call payload:\n{}", debug_dump(&text));
            }
            return Ok(DispatchOutcome::Observation(text));
        }

        let prompt = prompt_for_fetch_tool(&call.name)
            .ok_or_else(|| AgentError::UnknownTool(call.name.clone()))?;
        let owner = self
            .registry
            .prompt_owner(prompt)
            .ok_or_else(|| AgentError::UnknownPrompt(prompt.to_string()))?;
        let arguments = coerce_arguments(self.registry.prompt(prompt), &call.arguments);
        debug!(server = owner.name(), prompt, "Fetching prompt template");
        let messages = owner.get_prompt(prompt, Some(arguments)).await?;
        let text = flatten_prompt_messages(&messages);
        if self.debug.log_protocol_payloads {
            info!(prompt, "prompts/get payload:\n{}", debug_dump(&text));
        }
        Ok(DispatchOutcome::DeferredTemplate(text))
    }
}

/// Plain text of a rendered template. Several messages are each labelled
/// with their upper-cased role.
pub fn flatten_prompt_messages(messages: &[PromptMessage]) -> String {
    match messages {
        [] => String::new(),
        [single] => single.text(),
        many => many
            .iter()
            .map(|message| format!("[{}]\n{}", message.role.to_uppercase(), message.text()))
            .collect::<Vec<_>>()
            .join("\n\n"),
    }
}
