//! Draft content and per-channel variants.

use serde::{Deserialize, Serialize};

use crate::channel::ChannelKey;
use crate::ids::{ChannelId, ContentId, LocalVariantId, ModelId, ProjectId, SectionId, VariantId};

/// Whether a variant is real generator output or a placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariantKind {
    /// Output for a real channel; eligible for publishing.
    Generated,
    /// Explanatory placeholder shown when generation returned nothing.
    /// Never published, never reconciled.
    Informational,
}

/// One generated piece of content for one channel.
///
/// `server_id` is only reachable through [`DraftVariant::server_id`]; it is
/// fixed at construction so a durable variant cannot be re-pointed and an
/// ephemeral one cannot acquire an id behind the store's back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftVariant {
    pub local_id: LocalVariantId,
    server_id: Option<VariantId>,
    pub channel_key: ChannelKey,
    /// Correlation key with the durable record. `None` only for
    /// informational variants.
    pub channel_identifier: Option<ChannelId>,
    /// Raw label as returned by the backend.
    pub channel_label: String,
    pub title: String,
    pub body: String,
    pub kind: VariantKind,
}

impl DraftVariant {
    /// A freshly generated variant that exists only on the client.
    pub fn ephemeral(
        channel_key: ChannelKey,
        channel_identifier: ChannelId,
        channel_label: impl Into<String>,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            local_id: LocalVariantId::new(),
            server_id: None,
            channel_key,
            channel_identifier: Some(channel_identifier),
            channel_label: channel_label.into(),
            title: title.into(),
            body: body.into(),
            kind: VariantKind::Generated,
        }
    }

    /// A variant loaded from (or promoted to) durable storage.
    pub fn durable(
        server_id: VariantId,
        channel_key: ChannelKey,
        channel_identifier: ChannelId,
        channel_label: impl Into<String>,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            local_id: LocalVariantId::new(),
            server_id: Some(server_id),
            channel_key,
            channel_identifier: Some(channel_identifier),
            channel_label: channel_label.into(),
            title: title.into(),
            body: body.into(),
            kind: VariantKind::Generated,
        }
    }

    /// The placeholder inserted when generation produced no variants.
    pub fn informational(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            local_id: LocalVariantId::new(),
            server_id: None,
            channel_key: ChannelKey::Unclassified,
            channel_identifier: None,
            channel_label: String::new(),
            title: title.into(),
            body: body.into(),
            kind: VariantKind::Informational,
        }
    }

    pub fn server_id(&self) -> Option<VariantId> {
        self.server_id
    }

    /// True until the variant has a durable server id.
    pub fn is_ephemeral(&self) -> bool {
        self.server_id.is_none()
    }

    pub fn is_informational(&self) -> bool {
        self.kind == VariantKind::Informational
    }
}

/// Which editable field of a variant an overlay entry targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariantField {
    Title,
    Body,
}

/// What the operator sees for a variant: overlay values where present,
/// generator values otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibleContent {
    pub title: String,
    pub body: String,
}

impl VisibleContent {
    /// Both title and body contain something other than whitespace.
    pub fn is_publishable(&self) -> bool {
        !self.title.trim().is_empty() && !self.body.trim().is_empty()
    }
}

/// The parent content record being drafted.
///
/// Not durable until publish; `server_id` is written at most once.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DraftContent {
    pub server_id: Option<ContentId>,
    pub title: String,
    pub body: String,
    pub section_id: Option<SectionId>,
    pub project_id: Option<ProjectId>,
    pub channel_ids: Vec<ChannelId>,
    pub model_id: Option<ModelId>,
    /// Conversation/session id shared with chat-style generation.
    pub session_id: Option<String>,
}

impl DraftContent {
    /// Start a new, not yet persisted draft.
    pub fn new(title: impl Into<String>, body: impl Into<String>, section_id: SectionId) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            section_id: Some(section_id),
            ..Self::default()
        }
    }

    pub fn with_channels(mut self, channel_ids: impl IntoIterator<Item = ChannelId>) -> Self {
        self.channel_ids = channel_ids.into_iter().collect();
        self
    }

    pub fn with_model(mut self, model_id: ModelId) -> Self {
        self.model_id = Some(model_id);
        self
    }

    pub fn with_project(mut self, project_id: ProjectId) -> Self {
        self.project_id = Some(project_id);
        self
    }

    pub fn is_persisted(&self) -> bool {
        self.server_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ephemeral_variant_has_no_server_id() {
        let v = DraftVariant::ephemeral(ChannelKey::Web, ChannelId(2), "Web", "T", "B");
        assert!(v.is_ephemeral());
        assert!(v.server_id().is_none());
        assert_eq!(v.kind, VariantKind::Generated);
    }

    #[test]
    fn test_durable_variant_keeps_server_id() {
        let v = DraftVariant::durable(VariantId(40), ChannelKey::Print, ChannelId(1), "Impreso", "T", "B");
        assert!(!v.is_ephemeral());
        assert_eq!(v.server_id(), Some(VariantId(40)));
    }

    #[test]
    fn test_informational_variant_is_tagged_not_keyed() {
        let v = DraftVariant::informational("No content", "Check the model");
        assert!(v.is_informational());
        assert!(v.channel_identifier.is_none());
        assert_eq!(v.channel_key, ChannelKey::Unclassified);
    }

    #[test]
    fn test_visible_content_publishable_requires_both_fields() {
        let both = VisibleContent { title: "T".into(), body: "B".into() };
        let blank_title = VisibleContent { title: "  ".into(), body: "B".into() };
        let blank_body = VisibleContent { title: "T".into(), body: "\n".into() };
        assert!(both.is_publishable());
        assert!(!blank_title.is_publishable());
        assert!(!blank_body.is_publishable());
    }

    #[test]
    fn test_draft_content_builder() {
        let draft = DraftContent::new("T", "B", SectionId(3))
            .with_channels([ChannelId(1), ChannelId(2)])
            .with_model(ModelId(7));
        assert_eq!(draft.channel_ids, vec![ChannelId(1), ChannelId(2)]);
        assert_eq!(draft.model_id, Some(ModelId(7)));
        assert!(!draft.is_persisted());
    }
}
