//! Editing session: one draft from generation to publish.
//!
//! `EditingSession` owns the draft content record, the draft store, the edit
//! overlay and the pending metrics payload of a single editing view, and
//! wires the orchestrator, metrics gate and reconciler together. Methods that
//! mutate take `&mut self`, so there is exactly one writer at a time.

use pressroom_types::channel::ChannelKey;
use pressroom_types::config::DraftLimits;
use pressroom_types::draft::{DraftContent, DraftVariant, VariantField, VisibleContent};
use pressroom_types::error::{BackendError, GenerationFailure, PublishError, RepositoryError, ValidationError};
use pressroom_types::ids::{ContentId, LocalVariantId};
use pressroom_types::metrics::MetricsPayload;
use pressroom_types::publish::{PublishPhase, PublishReceipt};

use crate::backend::ContentBackend;
use crate::classifier::classify;
use crate::draft_store::{self, DraftStore};
use crate::metrics::require_metrics;
use crate::orchestrator::GenerationOrchestrator;
use crate::overlay::EditOverlay;
use crate::publish::PublishReconciler;
use crate::session_store::{DEFAULT_SESSION_KEY, NoSessionStore, SessionStore};

pub struct EditingSession<B, S = NoSessionStore>
where
    B: ContentBackend + Clone,
    S: SessionStore,
{
    orchestrator: GenerationOrchestrator<B>,
    reconciler: PublishReconciler<B>,
    session_store: S,
    session_key: String,
    content: DraftContent,
    store: DraftStore,
    overlay: EditOverlay,
    metrics: Option<MetricsPayload>,
}

impl<B: ContentBackend + Clone> EditingSession<B, NoSessionStore> {
    pub fn new(backend: B, limits: DraftLimits) -> Self {
        Self {
            orchestrator: GenerationOrchestrator::new(backend.clone(), limits),
            reconciler: PublishReconciler::new(backend),
            session_store: NoSessionStore,
            session_key: DEFAULT_SESSION_KEY.to_string(),
            content: DraftContent::default(),
            store: DraftStore::new(),
            overlay: EditOverlay::new(),
            metrics: None,
        }
    }
}

impl<B, S> EditingSession<B, S>
where
    B: ContentBackend + Clone,
    S: SessionStore,
{
    /// Persist the conversation session id through `store`.
    pub fn with_session_store<S2: SessionStore>(self, store: S2) -> EditingSession<B, S2> {
        EditingSession {
            orchestrator: self.orchestrator,
            reconciler: self.reconciler,
            session_store: store,
            session_key: self.session_key,
            content: self.content,
            store: self.store,
            overlay: self.overlay,
            metrics: self.metrics,
        }
    }

    /// Store the session id under a different key (one per editing view).
    pub fn with_session_key(mut self, key: impl Into<String>) -> Self {
        self.session_key = key.into();
        self
    }

    // -----------------------------------------------------------------------
    // Session id
    // -----------------------------------------------------------------------

    /// Load the persisted session id into the draft. Returns it when found.
    pub async fn restore_session(&mut self) -> Result<Option<String>, RepositoryError> {
        let session_id = self.session_store.load(&self.session_key).await?;
        if let Some(id) = &session_id {
            tracing::debug!(session_key = %self.session_key, "restored session id");
            self.content.session_id = Some(id.clone());
        }
        Ok(session_id)
    }

    /// Set and persist the conversation session id.
    pub async fn set_session_id(&mut self, session_id: impl Into<String>) -> Result<(), RepositoryError> {
        let session_id = session_id.into();
        self.session_store.save(&self.session_key, &session_id).await?;
        self.content.session_id = Some(session_id);
        Ok(())
    }

    /// Drop the session id from the draft and from the store.
    pub async fn forget_session(&mut self) -> Result<(), RepositoryError> {
        self.session_store.clear(&self.session_key).await?;
        self.content.session_id = None;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Generation
    // -----------------------------------------------------------------------

    /// Generate variants for `content`.
    ///
    /// `content` becomes the session's draft once generation succeeds. When
    /// it carries no server id or session id, the ones already known to the
    /// current draft are kept. On success the store is replaced in one step,
    /// overlay entries of vanished variants are dropped and the metrics
    /// payload is replaced. On failure the draft, store, overlay and metrics
    /// are left untouched.
    ///
    /// Returns the number of publishable variants produced.
    pub async fn generate(
        &mut self,
        mut content: DraftContent,
        regenerate: bool,
    ) -> Result<usize, GenerationFailure> {
        if content.server_id.is_none() {
            content.server_id = self.content.server_id;
        }
        if content.session_id.is_none() {
            content.session_id = self.content.session_id.clone();
        }

        let outcome = self
            .orchestrator
            .generate_ephemeral(&content, &content.channel_ids, content.model_id, regenerate)
            .await?;

        self.content = content;
        self.store.replace_all(outcome.variants);
        self.overlay.retain(&self.store.local_ids());
        self.metrics = outcome.metrics;
        self.reconciler.reset_phase();
        Ok(self.store.publishable().count())
    }

    // -----------------------------------------------------------------------
    // Editing
    // -----------------------------------------------------------------------

    pub fn edit_title(&mut self, local_id: LocalVariantId, value: impl Into<String>) -> Result<(), ValidationError> {
        self.edit(local_id, VariantField::Title, value.into())
    }

    pub fn edit_body(&mut self, local_id: LocalVariantId, value: impl Into<String>) -> Result<(), ValidationError> {
        self.edit(local_id, VariantField::Body, value.into())
    }

    fn edit(&mut self, local_id: LocalVariantId, field: VariantField, value: String) -> Result<(), ValidationError> {
        if self.store.get(&local_id).is_none() {
            return Err(ValidationError::UnknownVariant(local_id));
        }
        self.overlay.set(local_id, field, value);
        Ok(())
    }

    /// Revert a variant to the generated values.
    pub fn revert(&mut self, local_id: &LocalVariantId) {
        self.overlay.clear(local_id);
    }

    pub fn visible(&self, local_id: &LocalVariantId) -> Option<VisibleContent> {
        draft_store::visible(&self.store, &self.overlay, local_id)
    }

    /// Whether the publish control should be enabled.
    pub fn can_publish(&self) -> bool {
        !self.reconciler.is_publishing()
            && draft_store::has_any_publishable_content(&self.store, &self.overlay)
    }

    /// Non-empty buckets in canonical order.
    pub fn buckets(&self) -> Vec<(ChannelKey, &[DraftVariant])> {
        self.store
            .non_empty_keys()
            .into_iter()
            .map(|key| (key, self.store.bucket(key)))
            .collect()
    }

    /// `"{title}\n\n{body}"` of the first variant in a bucket, using visible
    /// values. `None` when the bucket is empty or the title is blank.
    pub fn clipboard_text(&self, key: ChannelKey) -> Option<String> {
        let first = self.store.bucket(key).first()?;
        let visible = self.visible(&first.local_id)?;
        if visible.title.trim().is_empty() {
            return None;
        }
        Some(format!("{}\n\n{}", visible.title, visible.body))
    }

    // -----------------------------------------------------------------------
    // Publishing
    // -----------------------------------------------------------------------

    /// Check metrics, then persist and reconcile.
    ///
    /// On success the draft, store, overlay and metrics are cleared; the
    /// durable content id is reported in the receipt. On failure everything
    /// stays for a retry, including a content id created along the way.
    pub async fn publish(&mut self) -> Result<PublishReceipt, PublishError> {
        let snapshot = require_metrics(self.metrics.as_ref()).inspect_err(|err| {
            tracing::warn!(error = %err, "publish refused by metrics gate");
        })?;

        let receipt = self
            .reconciler
            .publish(&mut self.content, &self.store, &self.overlay, snapshot)
            .await?;

        self.reset_draft();
        Ok(receipt)
    }

    /// Phase of the current publish, or the terminal phase of the last one
    /// for this draft. `Idle` once a new draft is generated or discarded.
    pub fn publish_phase(&self) -> PublishPhase {
        self.reconciler.phase()
    }

    // -----------------------------------------------------------------------
    // Existing records
    // -----------------------------------------------------------------------

    /// Load a persisted content record and its variants for editing.
    ///
    /// A missing variant list counts as empty. Returns the number of
    /// variants loaded.
    pub async fn load_existing(&mut self, content_id: ContentId) -> Result<usize, BackendError> {
        let backend = self.orchestrator.backend();
        let record = backend.get_content(content_id).await?;
        let durable = match backend.list_variants(content_id).await {
            Ok(variants) => variants,
            Err(BackendError::NotFound(_)) => Vec::new(),
            Err(err) => return Err(err),
        };

        let variants: Vec<DraftVariant> = durable
            .into_iter()
            .map(|v| {
                DraftVariant::durable(
                    v.id,
                    classify(&v.channel_label),
                    v.channel_identifier,
                    v.channel_label,
                    v.title,
                    v.generated_body,
                )
            })
            .collect();

        tracing::info!(
            content_id = %content_id,
            variants = variants.len(),
            "loaded content for editing"
        );

        self.content = DraftContent {
            server_id: Some(record.id),
            title: record.title,
            body: record.body,
            section_id: record.section_id,
            project_id: record.project_id,
            channel_ids: record.channel_ids,
            model_id: record.model_id,
            session_id: self.content.session_id.take(),
        };
        let count = variants.len();
        self.store.replace_all(variants);
        self.overlay.clear_all();
        self.metrics = None;
        Ok(count)
    }

    /// Forget the current draft view (navigation away).
    ///
    /// The next draft starts without a content id; only the session id
    /// survives.
    pub fn discard(&mut self) {
        self.reset_draft();
        self.reconciler.reset_phase();
    }

    fn reset_draft(&mut self) {
        self.content = DraftContent {
            session_id: self.content.session_id.take(),
            ..DraftContent::default()
        };
        self.store.clear();
        self.overlay.clear_all();
        self.metrics = None;
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn content(&self) -> &DraftContent {
        &self.content
    }

    pub fn store(&self) -> &DraftStore {
        &self.store
    }

    pub fn overlay(&self) -> &EditOverlay {
        &self.overlay
    }

    pub fn metrics(&self) -> Option<&MetricsPayload> {
        self.metrics.as_ref()
    }

    pub fn backend(&self) -> &B {
        self.orchestrator.backend()
    }
}
