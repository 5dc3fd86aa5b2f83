//! Tolerant parsing of the model's `{category, text}` reply.
//!
//! Models wrap JSON in code fences or surround it with prose. Anything that
//! cannot be read yields an empty classification, which the engine turns
//! into a retry.

use serde_json::Value;

use crate::ports::RawClassification;

/// Parses `content` into a raw classification. Never fails.
pub fn parse_classification(content: &str) -> RawClassification {
    let Some(json) = extract_json_object(content) else {
        return RawClassification::empty();
    };
    let Ok(Value::Object(map)) = serde_json::from_str::<Value>(&json) else {
        return RawClassification::empty();
    };

    RawClassification {
        category: map.get("category").and_then(scalar_to_string),
        text: map.get("text").and_then(scalar_to_string),
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Finds the JSON object in a reply: a fenced block first, then the first
/// balanced `{...}`.
fn extract_json_object(content: &str) -> Option<String> {
    let trimmed = content.trim();

    if let Some(block) = extract_from_code_block(trimmed) {
        return Some(block);
    }

    let start = trimmed.find('{')?;
    extract_balanced(trimmed, start)
}

fn extract_from_code_block(s: &str) -> Option<String> {
    let patterns = ["```json\n", "```json\r\n", "```\n", "```\r\n"];

    for pattern in patterns {
        if let Some(start) = s.find(pattern) {
            let body_start = start + pattern.len();
            if let Some(end) = s[body_start..].find("```") {
                return Some(s[body_start..body_start + end].trim().to_string());
            }
        }
    }
    None
}

fn extract_balanced(s: &str, start: usize) -> Option<String> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape_next = false;

    for (offset, c) in s[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match c {
            '\\' if in_string => escape_next = true,
            '"' => in_string = !in_string,
            _ if in_string => {}
            '{' => depth += 1,
            '}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(s[start..start + offset + 1].to_string());
                }
            }
            _ => {}
        }
    }
    None
}
