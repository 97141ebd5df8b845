//! Value-accounting metrics attached to a publish.
//!
//! Ephemeral generation returns an untyped JSON object ([`MetricsPayload`]).
//! The metrics gate turns it into a complete [`ValueMetricsSnapshot`] before a
//! publish may start; the snapshot is then sent unchanged with the durable
//! generation request.

use serde::{Deserialize, Serialize};

/// Raw metrics object exactly as the backend returned it.
pub type MetricsPayload = serde_json::Map<String, serde_json::Value>;

/// Complete metrics record sent with a publish.
///
/// Every field is always present on the wire; values the backend did not
/// report are zero, empty or null.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValueMetricsSnapshot {
    /// Wall-clock generation time in seconds.
    pub generation_time_secs: f64,
    pub time_saved_minutes: f64,
    pub cost_saved: f64,
    pub generation_cost: f64,
    pub estimated_manual_cost: f64,
    pub variants_generated: u32,
    pub distinct_formats: u32,
    pub words_per_second: f64,
    pub model_used: String,
    pub user_id: Option<i64>,
    pub content_type: String,
    pub estimated_complexity: String,
    pub roi_percent: f64,
    pub tokens_total: u64,
}

/// Coarse rating of a snapshot's return on investment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueBand {
    /// ROI above 200%.
    High,
    /// ROI between 100% and 200% inclusive.
    Good,
    /// ROI positive but below 100%.
    Moderate,
    /// ROI zero or negative.
    Review,
}

impl ValueMetricsSnapshot {
    pub fn band(&self) -> ValueBand {
        let roi = self.roi_percent;
        if roi > 200.0 {
            ValueBand::High
        } else if roi >= 100.0 {
            ValueBand::Good
        } else if roi > 0.0 {
            ValueBand::Moderate
        } else {
            ValueBand::Review
        }
    }

    /// One-line summary for notifications and logs.
    pub fn summary(&self) -> String {
        format!(
            "ROI {:.0}% | saved {:.0} min, {} | cost {} | {} tokens | {} variant(s) via {}",
            self.roi_percent,
            self.time_saved_minutes,
            format_cost(self.cost_saved),
            format_cost(self.generation_cost),
            self.tokens_total,
            self.variants_generated,
            if self.model_used.is_empty() { "unknown model" } else { &self.model_used },
        )
    }
}

/// Format a USD amount as an estimate.
///
/// Below one cent uses three decimals (`~$0.004`), otherwise two (`~$0.12`).
pub fn format_cost(cost: f64) -> String {
    if cost < 0.01 {
        format!("~${cost:.3}")
    } else {
        format!("~${cost:.2}")
    }
}
