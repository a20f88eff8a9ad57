use super::errors::AgentError;
use super::models::{AgentOutcome, ReasoningStep, ReasoningTrace, SynthesisInput};
use super::runtime::{CapabilityRuntime, DispatchOutcome, debug_dump, history_block, truncate};
use crate::config::RuntimeConfig;
use crate::model::{CompletionRequest, ToolCall, ToolCallingModel, ToolResult};
use crate::planner::{Plan, Planner};
use crate::registry::CapabilityRegistry;
use crate::types::ChatMessage;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

pub const DUPLICATE_NOTICE: &str =
    "[DUPLICATE] Already called with these args. Try something different.";
pub const PROMPT_QUEUED_NOTICE: &str =
    "[PROMPT QUEUED] Template collected. Continue with data tools.";
pub const GOAL_ACHIEVED_MARKER: &str = "[GOAL_ACHIEVED]";
pub const CONTINUE_MARKER: &str = "[CONTINUE]";

const DUPLICATE_SKIPPED: &str = "[DUPLICATE SKIPPED]";
const PROMPT_DEFERRED: &str = "[PROMPT DEFERRED]";
const REFLECTION_SYSTEM: &str = "You are a reflection agent. Be concise.";

/// Deduplication key of a call. `serde_json` maps are ordered, so equal
/// argument objects serialize identically.
pub fn fingerprint(call: &ToolCall) -> String {
    format!("{}|{}", call.name, call.arguments)
}

/// Per-run mutable state; dropped when the run ends.
#[derive(Default)]
struct RunState {
    fingerprints: HashSet<String>,
    history: Vec<String>,
    deferred: Vec<String>,
    dispatched: usize,
}

pub struct AgentRuntime {
    runtime: CapabilityRuntime,
    model: Arc<dyn ToolCallingModel>,
    planner: Planner,
    config: RuntimeConfig,
}

impl AgentRuntime {
    pub fn new(
        registry: Arc<CapabilityRegistry>,
        model: Arc<dyn ToolCallingModel>,
        config: RuntimeConfig,
    ) -> Self {
        let planner = Planner::new(config.planning_mode)
            .with_models(config.classifier_model.clone(), config.planner_model.clone());
        Self {
            runtime: CapabilityRuntime::new(registry, config.debug),
            model,
            planner,
            config,
        }
    }

    pub fn registry(&self) -> &CapabilityRegistry {
        self.runtime.registry()
    }

    pub fn base_instruction(&self) -> &str {
        self.runtime.base_instruction()
    }

    pub async fn run(&self, question: &str) -> Result<AgentOutcome, AgentError> {
        info!("Agent run started");
        let capabilities = self.runtime.registry().capability_summary();
        let plan = self
            .planner
            .plan(self.model.as_ref(), question, &capabilities)
            .await?;

        if plan.is_trivial() {
            let answer = plan.direct_answer.clone().unwrap_or_default();
            info!(complexity = %plan.complexity, "Answering directly without tool calls");
            return Ok(AgentOutcome {
                plan,
                trace: ReasoningTrace::default(),
                synthesis: SynthesisInput::direct(answer),
                dispatched: 0,
            });
        }

        self.execute(question, plan).await
    }

    async fn execute(&self, question: &str, plan: Plan) -> Result<AgentOutcome, AgentError> {
        let budget = plan.budget;
        let reflect = self.config.reflection_enabled();
        let conversation = [ChatMessage::user(question)];
        let definitions = self.runtime.definitions();
        let mut state = RunState::default();
        let mut trace = ReasoningTrace::default();

        let instruction = self.runtime.execution_instruction(&plan, budget);
        self.log_instruction("execution instruction", &instruction);
        let mut turn = self.model.chat(&instruction, &conversation, definitions).await?;
        let mut used = 0;

        while !turn.tool_calls.is_empty() && used < budget {
            used += 1;
            let remaining = budget - used;
            info!(
                mode = %plan.mode,
                step = used,
                budget,
                calls = turn.tool_calls.len(),
                "Executing step"
            );

            let mut step = ReasoningStep::new(used);
            let mut results = Vec::with_capacity(turn.tool_calls.len());

            for call in &turn.tool_calls {
                if !state.fingerprints.insert(fingerprint(call)) {
                    debug!(tool = call.name.as_str(), "Skipping duplicate call");
                    results.push(ToolResult::new(call.call_id.clone(), DUPLICATE_NOTICE));
                    step.record(format!("{}(dup)", call.name), DUPLICATE_SKIPPED);
                    continue;
                }

                state.dispatched += 1;
                match self.runtime.dispatch(call).await? {
                    DispatchOutcome::Observation(text) => {
                        debug!(tool = call.name.as_str(), chars = text.len(), "Observation gathered");
                        state.history.push(format!(
                            "OBSERVATION[{}]: {}",
                            call.name,
                            truncate(&text, self.config.observation_limit)
                        ));
                        results.push(ToolResult::new(call.call_id.clone(), text.clone()));
                        step.record(call.name.clone(), text);
                    }
                    DispatchOutcome::DeferredTemplate(text) => {
                        debug!(tool = call.name.as_str(), chars = text.len(), "Prompt template deferred");
                        state.deferred.push(text);
                        results.push(ToolResult::new(call.call_id.clone(), PROMPT_QUEUED_NOTICE));
                        step.record(call.name.clone(), PROMPT_DEFERRED);
                    }
                }
            }

            if reflect {
                let reflection = self
                    .reflect(question, &plan.intent, &state.history, remaining)
                    .await?;
                step.goal_achieved = reflection.contains(GOAL_ACHIEVED_MARKER);
                step.reflection = Some(reflection);
            }

            let done = step.goal_achieved;
            trace.push(step);
            if done || remaining == 0 {
                break;
            }

            let instruction = format!(
                "{}{}",
                self.runtime.execution_instruction(&plan, remaining),
                history_block(&state.history, self.config.history_preview_limit)
            );
            self.log_instruction("updated instruction", &instruction);
            let next = self
                .model
                .continue_with_results(&instruction, &conversation, &results, &turn.replay, definitions)
                .await?;
            turn = next;
        }

        if !trace.is_empty() {
            info!("Reasoning trace:\n{}", trace.render());
        }
        info!(
            steps = trace.len(),
            dispatched = state.dispatched,
            deferred = state.deferred.len(),
            "Agent loop finished"
        );

        let synthesis = self
            .runtime
            .synthesis_input(question, &state.history, &state.deferred);
        Ok(AgentOutcome {
            plan,
            trace,
            synthesis,
            dispatched: state.dispatched,
        })
    }

    async fn reflect(
        &self,
        question: &str,
        intent: &str,
        history: &[String],
        remaining: usize,
    ) -> Result<String, AgentError> {
        let message = format!(
            "Assess progress in 2-3 sentences.\n\
             Question: {question}\nGoal: {intent}\nSteps remaining: {remaining}\n\
             History:\n{}\n\n\
             End with exactly {GOAL_ACHIEVED_MARKER} or {CONTINUE_MARKER}.",
            history.join("\n")
        );
        let reply = self
            .model
            .complete(CompletionRequest::new(REFLECTION_SYSTEM, message))
            .await?;
        if reply.trim().is_empty() {
            return Ok(CONTINUE_MARKER.to_string());
        }
        Ok(reply)
    }

    fn log_instruction(&self, label: &str, instruction: &str) {
        if self.config.debug.log_instructions {
            info!("{label}:\n{}", debug_dump(instruction));
        }
    }
}
