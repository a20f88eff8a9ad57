use super::{CapabilityRuntime, SynthesisInput};

const TEMPLATE_SEPARATOR: &str = "\n\n---\n\n";

impl CapabilityRuntime {
    /// Assemble the answer-generation input from what the loop gathered.
    ///
    /// Deferred templates become the system instruction; otherwise the base
    /// instruction is used, grounded on the observations when there are any.
    pub fn synthesis_input(
        &self,
        question: &str,
        history: &[String],
        deferred: &[String],
    ) -> SynthesisInput {
        let research: String = history.iter().map(|entry| format!("{entry}\n\n")).collect();

        if !deferred.is_empty() {
            let instruction = deferred.join(TEMPLATE_SEPARATOR);
            let tail = if history.is_empty() {
                "Fulfil the system prompt instructions.".to_string()
            } else {
                format!("Research:\n\n{research}\nFulfil the system prompt using this research.")
            };
            return SynthesisInput {
                system_instruction: Some(instruction),
                user_message: format!("Original request: {question}\n\n{tail}"),
            };
        }

        if history.is_empty() {
            return SynthesisInput {
                system_instruction: Some(self.base_instruction.clone()),
                user_message: question.to_string(),
            };
        }

        SynthesisInput {
            system_instruction: Some(self.base_instruction.clone()),
            user_message: format!(
                "Answer using ONLY the research below. Be comprehensive. Do not invent facts.\n\n\
                 Question: {question}\n\nResearch:\n{research}"
            ),
        }
    }
}
