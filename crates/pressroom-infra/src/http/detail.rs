//! Error body decoding.
//!
//! The content service reports failures as `{"detail": "..."}`. Validation
//! failures carry a list of `{"loc": [...], "msg": "..."}` objects instead.
//! Anything else is surfaced verbatim.

use serde_json::Value;

/// Extract the human-readable message from an error response body.
pub fn extract_detail(body: &str) -> String {
    let trimmed = body.trim();
    let Ok(Value::Object(map)) = serde_json::from_str::<Value>(trimmed) else {
        return trimmed.to_string();
    };

    match map.get("detail") {
        Some(Value::String(detail)) => detail.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .map(describe_item)
            .collect::<Vec<_>>()
            .join("; "),
        Some(other) => other.to_string(),
        None => trimmed.to_string(),
    }
}

fn describe_item(item: &Value) -> String {
    let msg = item.get("msg").and_then(Value::as_str);
    let loc = item.get("loc").and_then(Value::as_array).map(|parts| {
        parts
            .iter()
            .map(|p| match p {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(".")
    });
    match (loc, msg) {
        (Some(loc), Some(msg)) => format!("{loc}: {msg}"),
        (None, Some(msg)) => msg.to_string(),
        _ => item.to_string(),
    }
}
