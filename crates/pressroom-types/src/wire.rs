//! Request and response payloads exchanged with the content backend.
//!
//! These are the provider-agnostic shapes used by the `ContentBackend` port;
//! the HTTP implementation serializes them as snake_case JSON unchanged.

use serde::{Deserialize, Serialize};

use crate::ids::{ChannelId, ContentId, ModelId, ProjectId, SectionId, VariantId};
use crate::metrics::{MetricsPayload, ValueMetricsSnapshot};

/// The draft content as sent to ephemeral generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EphemeralContent {
    /// Durable id when regenerating for an existing record, `null` otherwise.
    pub id: Option<ContentId>,
    pub title: String,
    pub body: String,
    pub section_id: SectionId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<ProjectId>,
}

/// Generate variants without persisting anything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EphemeralGenerateRequest {
    pub content: EphemeralContent,
    pub channel_ids: Vec<ChannelId>,
    pub model_id: ModelId,
    pub regenerate: bool,
}

/// One variant produced by ephemeral generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedVariant {
    pub channel_identifier: ChannelId,
    /// Free-text channel name; classified client-side.
    pub channel_label: String,
    pub generated_body: String,
    /// Some backends suggest a per-channel headline; the draft title is used
    /// when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EphemeralGenerateResponse {
    #[serde(default)]
    pub variants: Vec<GeneratedVariant>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<MetricsPayload>,
}

/// Create the parent content record. Absent optionals are not transmitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateContentRequest {
    pub title: String,
    pub body: String,
    pub section_id: SectionId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<ProjectId>,
    pub channel_ids: Vec<ChannelId>,
    pub model_id: ModelId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedContent {
    pub id: ContentId,
}

/// The operator's final text for one channel, as sent for durable generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantPayload {
    pub channel_identifier: ChannelId,
    pub title: String,
    pub generated_body: String,
}

/// Persist variants for a content record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DurableGenerateRequest {
    pub content_id: ContentId,
    pub channel_ids: Vec<ChannelId>,
    pub model_id: ModelId,
    pub variants: Vec<VariantPayload>,
    pub value_metrics: ValueMetricsSnapshot,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

/// A persisted variant as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurableVariant {
    pub id: VariantId,
    pub channel_identifier: ChannelId,
    #[serde(default)]
    pub channel_label: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub generated_body: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurableGenerateResponse {
    #[serde(default)]
    pub generated_variants: Vec<DurableVariant>,
}

/// Targeted edit of a persisted variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateVariantRequest {
    pub title: String,
    pub generated_body: String,
}

/// A persisted content record, as loaded for editing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRecord {
    pub id: ContentId,
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub section_id: Option<SectionId>,
    #[serde(default)]
    pub project_id: Option<ProjectId>,
    #[serde(default)]
    pub channel_ids: Vec<ChannelId>,
    #[serde(default)]
    pub model_id: Option<ModelId>,
}
