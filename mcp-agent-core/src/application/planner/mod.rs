//! # Planner
//!
//! Turns a question and a capability summary into a bounded [`Plan`]:
//!
//! - `Minimal` - greeting heuristic only, no model call
//! - `Balanced` - one classification call (complexity, budget, intent)
//! - `Full` - one planning call that also returns ordered steps
//!
//! Unparseable model output never fails planning; a fixed fallback plan is
//! used instead. Model transport failures do propagate.

mod heuristic;
mod parser;
mod prompts;

pub use heuristic::is_small_talk;
pub use parser::{PlanParseError, RawPlan, extract_json, parse_plan};

use crate::model::{CompletionRequest, ModelError, ToolCallingModel};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use tracing::{info, warn};

/// Upper bound on any plan's step budget.
pub const MAX_STEPS: usize = 10;

pub const GREETING_ANSWER: &str = "Hello! How can I help you today?";
pub const FILLER_ANSWER: &str = "I'm here to help! What would you like to know?";

const FALLBACK_BUDGET: usize = 4;
const FALLBACK_RESEARCH_STEPS: [&str; 4] = [
    "Search for information",
    "Search for context",
    "Gather data points",
    "Synthesise findings",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanningMode {
    #[default]
    #[serde(alias = "short")]
    Minimal,
    #[serde(alias = "mid")]
    Balanced,
    #[serde(alias = "long")]
    Full,
}

impl PlanningMode {
    pub fn as_str(self) -> &'static str {
        match self {
            PlanningMode::Minimal => "minimal",
            PlanningMode::Balanced => "balanced",
            PlanningMode::Full => "full",
        }
    }
}

impl fmt::Display for PlanningMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlanningMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "minimal" | "short" => Ok(PlanningMode::Minimal),
            "balanced" | "mid" => Ok(PlanningMode::Balanced),
            "full" | "long" => Ok(PlanningMode::Full),
            other => Err(format!("unknown planning mode '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub mode: PlanningMode,
    pub complexity: String,
    /// Maximum number of loop iterations, always within `0..=MAX_STEPS`.
    pub budget: usize,
    pub intent: String,
    pub steps: Vec<String>,
    pub direct_answer: Option<String>,
}

impl Plan {
    /// A trivial plan is answered directly without entering the loop.
    pub fn is_trivial(&self) -> bool {
        self.budget == 0 && self.direct_answer.is_some()
    }
}

/// Clamp a model-supplied budget into `0..=MAX_STEPS`.
pub fn clamp_budget(value: i64) -> usize {
    value.clamp(0, MAX_STEPS as i64) as usize
}

#[derive(Debug, Clone, Default)]
pub struct Planner {
    mode: PlanningMode,
    classifier_model: Option<String>,
    planner_model: Option<String>,
}

impl Planner {
    pub fn new(mode: PlanningMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Model overrides for the balanced-mode classification call and the
    /// full-mode planning call.
    pub fn with_models(mut self, classifier: Option<String>, planner: Option<String>) -> Self {
        self.classifier_model = classifier;
        self.planner_model = planner;
        self
    }

    pub fn mode(&self) -> PlanningMode {
        self.mode
    }

    pub async fn plan(
        &self,
        model: &dyn ToolCallingModel,
        question: &str,
        capabilities: &str,
    ) -> Result<Plan, ModelError> {
        let plan = match self.mode {
            PlanningMode::Minimal => Self::plan_minimal(question),
            PlanningMode::Balanced => {
                let request = CompletionRequest::new(
                    prompts::classifier_prompt(capabilities),
                    format!("Question: {question}"),
                )
                .with_model(self.classifier_model.clone());
                let reply = model.complete(request).await?;
                self.interpret(&reply, question)
            }
            PlanningMode::Full => {
                let request = CompletionRequest::new(
                    prompts::planner_prompt(capabilities),
                    format!("User question: {question}"),
                )
                .with_model(self.planner_model.clone());
                let reply = model.complete(request).await?;
                self.interpret(&reply, question)
            }
        };

        info!(
            mode = %plan.mode,
            complexity = %plan.complexity,
            budget = plan.budget,
            steps = plan.steps.len(),
            "Plan ready"
        );
        Ok(plan)
    }

    fn plan_minimal(question: &str) -> Plan {
        if is_small_talk(question) {
            return Plan {
                mode: PlanningMode::Minimal,
                complexity: "trivial".to_string(),
                budget: 0,
                intent: "Greeting or chitchat".to_string(),
                steps: Vec::new(),
                direct_answer: Some(GREETING_ANSWER.to_string()),
            };
        }
        Plan {
            mode: PlanningMode::Minimal,
            complexity: "unknown".to_string(),
            budget: MAX_STEPS,
            intent: question.to_string(),
            steps: Vec::new(),
            direct_answer: None,
        }
    }

    /// Build a plan from a balanced or full-mode reply, falling back when the
    /// reply is not structured output.
    pub fn interpret(&self, reply: &str, question: &str) -> Plan {
        let raw = match parse_plan(reply) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(mode = %self.mode, %err, chars = reply.len(), "Plan parse failed; using fallback");
                return self.fallback(question);
            }
        };

        let default_budget = match self.mode {
            PlanningMode::Full => 3,
            _ => FALLBACK_BUDGET as i64,
        };
        let budget = clamp_budget(raw.step_budget.unwrap_or(default_budget));
        let mut steps = match self.mode {
            PlanningMode::Full => raw.planned_steps,
            _ => Vec::new(),
        };
        steps.truncate(budget);

        let direct_answer = match raw.direct_answer {
            None if budget == 0 => Some(FILLER_ANSWER.to_string()),
            answer => answer,
        };

        Plan {
            mode: self.mode,
            complexity: raw.complexity.unwrap_or_else(|| "moderate".to_string()),
            budget,
            intent: raw.intent.unwrap_or_else(|| question.to_string()),
            steps,
            direct_answer,
        }
    }

    fn fallback(&self, question: &str) -> Plan {
        let steps = match self.mode {
            PlanningMode::Full => FALLBACK_RESEARCH_STEPS.iter().map(|step| step.to_string()).collect(),
            _ => Vec::new(),
        };
        Plan {
            mode: self.mode,
            complexity: "moderate".to_string(),
            budget: FALLBACK_BUDGET,
            intent: question.to_string(),
            steps,
            direct_answer: None,
        }
    }
}
