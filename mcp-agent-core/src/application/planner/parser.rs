use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanParseError {
    #[error("no JSON found in planner response")]
    NoJson,
    #[error("planner response is not a JSON object")]
    NotAnObject,
}

/// Fields a classification or planning response may carry. Missing fields
/// fall back per mode at the call site.
#[derive(Debug, Default, PartialEq)]
pub struct RawPlan {
    pub complexity: Option<String>,
    pub step_budget: Option<i64>,
    pub intent: Option<String>,
    pub planned_steps: Vec<String>,
    pub direct_answer: Option<String>,
}

pub fn parse_plan(content: &str) -> Result<RawPlan, PlanParseError> {
    let value = extract_json(content).ok_or(PlanParseError::NoJson)?;
    let Value::Object(map) = value else {
        return Err(PlanParseError::NotAnObject);
    };

    let text = |key: &str| {
        map.get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_string)
    };

    let step_budget = map.get("step_budget").and_then(|budget| match budget {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|float| float as i64)),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    });

    let planned_steps = map
        .get("planned_steps")
        .and_then(Value::as_array)
        .map(|steps| {
            steps
                .iter()
                .map(|step| match step {
                    Value::String(text) => text.clone(),
                    other => other.to_string(),
                })
                .collect()
        })
        .unwrap_or_default();

    Ok(RawPlan {
        complexity: text("complexity"),
        step_budget,
        intent: text("intent"),
        planned_steps,
        direct_answer: text("direct_answer"),
    })
}

/// Pull a JSON value out of a model reply that may wrap it in a code fence
/// or surround it with prose.
pub fn extract_json(content: &str) -> Option<Value> {
    let trimmed = content.trim();

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return Some(value);
    }

    if trimmed.starts_with("```") {
        let stripped = trimmed.trim_start_matches("```json");
        let stripped = stripped.trim_start_matches("```JSON");
        let stripped = stripped.trim_start_matches("```");
        if let Some(end) = stripped.rfind("```") {
            if let Ok(value) = serde_json::from_str::<Value>(stripped[..end].trim()) {
                return Some(value);
            }
        }
    }

    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
        if start < end {
            if let Ok(value) = serde_json::from_str::<Value>(&trimmed[start..=end]) {
                return Some(value);
            }
        }
    }

    None
}
