use super::MAX_STEPS;

pub(super) fn classifier_prompt(capabilities: &str) -> String {
    format!(
        "You are a query classifier. Output ONLY a JSON object -- no markdown, no explanation.\n\n\
         Available capabilities:\n{capabilities}\n\n\
         Output format:\n\
         {{\n  \"complexity\": \"<trivial|simple|moderate|complex>\",\n  \
         \"step_budget\": <0 to {MAX_STEPS}>,\n  \
         \"intent\": \"<one sentence>\",\n  \
         \"direct_answer\": <null or \"string for trivial only\">\n}}\n\n\
         Rules:\n\
         - trivial  = greetings, chitchat, capability questions -> budget=0, set direct_answer\n\
         - simple   = single lookup -> budget 1-2\n\
         - moderate = multi-aspect -> budget 3-5\n\
         - complex  = deep research -> budget 6-{MAX_STEPS}\n\n\
         Output ONLY valid JSON. Nothing else."
    )
}

pub(super) fn planner_prompt(capabilities: &str) -> String {
    format!(
        "You are a planning agent. Output ONLY a JSON object -- no markdown, no extra text.\n\n\
         Available capabilities:\n{capabilities}\n\n\
         Output format:\n\
         {{\n  \"complexity\": \"<trivial|simple|moderate|complex>\",\n  \
         \"step_budget\": <0 to {MAX_STEPS}>,\n  \
         \"intent\": \"<one sentence: what does the user want?>\",\n  \
         \"planned_steps\": [\"<step 1: tool + action>\", \"<step 2>\", ...],\n  \
         \"direct_answer\": <null or \"string for trivial only\">\n}}\n\n\
         Complexity -> budget rules (be HONEST, not generous):\n\
         - trivial  -> 0   (greetings, chitchat, capability questions)\n\
         - simple   -> 1-2 (single search or lookup)\n\
         - moderate -> 3-5 (multi-aspect research)\n\
         - complex  -> 6-{MAX_STEPS} (deep research, multi-step pipelines)\n\n\
         CRITICAL:\n\
         1. planned_steps must have EXACTLY step_budget entries (0 for trivial).\n\
         2. Each step must name a specific tool from the capability list.\n\
         3. direct_answer must be JSON null for non-trivial queries.\n\
         4. Do NOT over-allocate -- only use steps genuinely needed.\n\
         5. Output ONLY valid JSON. Nothing else."
    )
}
