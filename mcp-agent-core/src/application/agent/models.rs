use super::runtime::truncate;
use crate::planner::Plan;

const OBSERVATION_PREVIEW: usize = 120;

/// One loop iteration. `actions` and `observations` are parallel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReasoningStep {
    pub step: usize,
    pub actions: Vec<String>,
    pub observations: Vec<String>,
    pub reflection: Option<String>,
    pub goal_achieved: bool,
}

impl ReasoningStep {
    pub fn new(step: usize) -> Self {
        Self {
            step,
            actions: Vec::new(),
            observations: Vec::new(),
            reflection: None,
            goal_achieved: false,
        }
    }

    pub(crate) fn record(&mut self, action: impl Into<String>, observation: impl Into<String>) {
        self.actions.push(action.into());
        self.observations.push(observation.into());
    }

    pub fn render(&self) -> String {
        let mut block = format!("Step {}\n", self.step);
        for (index, action) in self.actions.iter().enumerate() {
            block.push_str(&format!("  ACTION:      {action}\n"));
            if let Some(observation) = self.observations.get(index) {
                block.push_str(&format!(
                    "  OBSERVATION: {}\n",
                    truncate(observation, OBSERVATION_PREVIEW)
                ));
            }
        }
        if let Some(reflection) = self.reflection.as_deref().filter(|text| !text.trim().is_empty()) {
            block.push_str(&format!("  REFLECTION:  {reflection}\n"));
        }
        block.push_str(&format!("  GOAL MET:    {}\n", self.goal_achieved));
        block
    }
}

/// Append-only record of a run's iterations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReasoningTrace {
    steps: Vec<ReasoningStep>,
}

impl ReasoningTrace {
    pub(crate) fn push(&mut self, step: ReasoningStep) {
        self.steps.push(step);
    }

    pub fn steps(&self) -> &[ReasoningStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn render(&self) -> String {
        self.steps.iter().map(ReasoningStep::render).collect()
    }
}

/// What the answer-generation step receives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisInput {
    /// `None` marks `user_message` as a finished direct answer.
    pub system_instruction: Option<String>,
    pub user_message: String,
}

impl SynthesisInput {
    pub fn direct(answer: impl Into<String>) -> Self {
        Self {
            system_instruction: None,
            user_message: answer.into(),
        }
    }

    pub fn is_direct_answer(&self) -> bool {
        self.system_instruction.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct AgentOutcome {
    pub plan: Plan,
    pub trace: ReasoningTrace,
    pub synthesis: SynthesisInput,
    /// Calls actually forwarded to a server; duplicates are not counted.
    pub dispatched: usize,
}
