use crate::client::PromptDescriptor;
use serde_json::{Map as JsonMap, Value};

/// Convert model-supplied prompt arguments to the types the template
/// declares. Without declared arguments the object is forwarded as-is.
pub fn coerce_arguments(prompt: Option<&PromptDescriptor>, raw: &Value) -> JsonMap<String, Value> {
    let raw = match raw {
        Value::Object(map) => map.clone(),
        _ => JsonMap::new(),
    };
    let Some(declared) = prompt.and_then(|prompt| prompt.arguments.as_deref()) else {
        return raw;
    };

    let mut coerced = JsonMap::new();
    for (key, value) in raw {
        let argument = declared.iter().find(|argument| argument.name == key);
        let required = argument.is_some_and(|argument| argument.is_required());
        let kind = argument
            .and_then(|argument| argument.kind.as_deref())
            .unwrap_or("string")
            .to_ascii_lowercase();

        let text = match &value {
            Value::Null => String::new(),
            Value::String(text) => text.trim().to_string(),
            other => other.to_string(),
        };

        // Required blanks go through so the server names the missing field.
        if text.is_empty() || text.eq_ignore_ascii_case("null") {
            if required {
                coerced.insert(key, value);
            }
            continue;
        }

        match kind.as_str() {
            "integer" | "int" | "number" => match text.parse::<i64>() {
                Ok(number) => {
                    coerced.insert(key, Value::from(number));
                }
                Err(_) if required => {
                    coerced.insert(key, value);
                }
                Err(_) => {}
            },
            "boolean" | "bool" => {
                coerced.insert(key, Value::Bool(parse_flag(&text)));
            }
            _ => {
                coerced.insert(key, Value::String(text));
            }
        }
    }
    coerced
}

fn parse_flag(text: &str) -> bool {
    matches!(
        text.to_ascii_lowercase().as_str(),
        "true" | "yes" | "y" | "1" | "on"
    )
}
