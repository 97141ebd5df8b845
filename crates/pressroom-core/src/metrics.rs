//! Metrics gate.
//!
//! A publish without value metrics is refused before anything is persisted.
//! When a payload is present it is normalized into a complete
//! [`ValueMetricsSnapshot`]: every field is filled, missing ones with zero,
//! empty string or `None`, and numbers sent as strings are accepted.

use serde_json::Value;

use pressroom_types::error::GateError;
use pressroom_types::metrics::{MetricsPayload, ValueMetricsSnapshot};

/// Check that metrics exist and produce the snapshot attached to the publish.
pub fn require_metrics(payload: Option<&MetricsPayload>) -> Result<ValueMetricsSnapshot, GateError> {
    let payload = payload.ok_or(GateError::Missing)?;
    if payload.is_empty() {
        return Err(GateError::Empty);
    }

    let snapshot = ValueMetricsSnapshot {
        generation_time_secs: float(payload, "generation_time_secs"),
        time_saved_minutes: float(payload, "time_saved_minutes"),
        cost_saved: float(payload, "cost_saved"),
        generation_cost: float(payload, "generation_cost"),
        estimated_manual_cost: float(payload, "estimated_manual_cost"),
        variants_generated: saturating_u32(unsigned(payload, "variants_generated")),
        distinct_formats: saturating_u32(unsigned(payload, "distinct_formats")),
        words_per_second: float(payload, "words_per_second"),
        model_used: text(payload, "model_used"),
        user_id: integer(payload, "user_id"),
        content_type: text(payload, "content_type"),
        estimated_complexity: text(payload, "estimated_complexity"),
        roi_percent: float(payload, "roi_percent"),
        tokens_total: unsigned(payload, "tokens_total"),
    };

    tracing::debug!(
        fields = payload.len(),
        roi_percent = snapshot.roi_percent,
        "metrics gate passed"
    );
    Ok(snapshot)
}

fn float(payload: &MetricsPayload, key: &str) -> f64 {
    match payload.get(key) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

fn unsigned(payload: &MetricsPayload, key: &str) -> u64 {
    let value = float(payload, key);
    if value.is_finite() && value > 0.0 {
        value.round() as u64
    } else {
        0
    }
}

fn saturating_u32(value: u64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

fn integer(payload: &MetricsPayload, key: &str) -> Option<i64> {
    match payload.get(key) {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    }
}

fn text(payload: &MetricsPayload, key: &str) -> String {
    match payload.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}
