//! Publish reconciler.
//!
//! Turns a locally edited draft into durable records:
//!
//! 1. **Validating**: model, scheduled variants, titles, channel identifiers.
//! 2. **EnsuringContentRecord**: create the parent record if it has no id.
//! 3. **PersistingVariants**: one durable generation call.
//! 4. **Reconciling**: match every local variant to its durable counterpart
//!    by channel identifier, then push differing title/body values with
//!    concurrent targeted updates.
//!
//! Matching is all-or-nothing: a single unmatched identifier fails the
//! publish before any update is sent. Updates that succeed are not rolled back
//! when a sibling fails; the error lists both sides.

use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use futures_util::future::join_all;

use pressroom_types::channel::ChannelKey;
use pressroom_types::draft::{DraftContent, VisibleContent};
use pressroom_types::error::{FailedUpdate, PublishError, ReconciliationError, ValidationError};
use pressroom_types::ids::{ChannelId, ContentId, ModelId, VariantId};
use pressroom_types::metrics::ValueMetricsSnapshot;
use pressroom_types::publish::{PublishPhase, PublishReceipt};
use pressroom_types::wire::{
    CreateContentRequest, DurableGenerateRequest, DurableVariant, UpdateVariantRequest,
    VariantPayload,
};

use crate::backend::ContentBackend;
use crate::draft_store::{DraftStore, visible_for};
use crate::overlay::EditOverlay;

/// A variant that passed validation, with the values the operator sees.
#[derive(Debug, Clone)]
struct Scheduled {
    channel_identifier: ChannelId,
    visible: VisibleContent,
}

/// Clears the in-progress flag when a publish attempt ends, however it ends.
struct InProgressGuard<'a>(&'a AtomicBool);

impl<'a> InProgressGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InProgressGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Drives one publish at a time for a single editing session.
pub struct PublishReconciler<B: ContentBackend> {
    backend: B,
    in_progress: AtomicBool,
    phase: AtomicU8,
}

impl<B: ContentBackend> PublishReconciler<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            in_progress: AtomicBool::new(false),
            phase: AtomicU8::new(encode(PublishPhase::Idle)),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Current phase, or the terminal phase of the last attempt.
    pub fn phase(&self) -> PublishPhase {
        decode(self.phase.load(Ordering::SeqCst))
    }

    pub fn is_publishing(&self) -> bool {
        self.in_progress.load(Ordering::SeqCst)
    }

    /// Back to `Idle` for a new draft. Ignored while a publish is running.
    pub fn reset_phase(&self) {
        if !self.is_publishing() {
            self.phase.store(encode(PublishPhase::Idle), Ordering::SeqCst);
        }
    }

    /// Publish the draft.
    ///
    /// On success `content.server_id` holds the durable content id. It is
    /// also kept after a failure past record creation, so a retry does not
    /// create a second record.
    pub async fn publish(
        &self,
        content: &mut DraftContent,
        store: &DraftStore,
        overlay: &EditOverlay,
        metrics: ValueMetricsSnapshot,
    ) -> Result<PublishReceipt, PublishError> {
        let Some(_guard) = InProgressGuard::acquire(&self.in_progress) else {
            tracing::warn!("publish requested while another publish is running");
            return Err(PublishError::InProgress);
        };

        let result = self.run(content, store, overlay, metrics).await;
        match &result {
            Ok(receipt) => {
                self.enter(PublishPhase::Committed);
                tracing::info!(
                    content_id = %receipt.content_id,
                    variants = receipt.variants.len(),
                    updated = receipt.updated.len(),
                    "publish committed"
                );
            }
            Err(err) => {
                self.enter(PublishPhase::Failed);
                tracing::warn!(error = %err, "publish failed");
            }
        }
        result
    }

    async fn run(
        &self,
        content: &mut DraftContent,
        store: &DraftStore,
        overlay: &EditOverlay,
        metrics: ValueMetricsSnapshot,
    ) -> Result<PublishReceipt, PublishError> {
        self.enter(PublishPhase::Validating);
        let (model_id, scheduled) = validate(content, store, overlay)?;

        self.enter(PublishPhase::EnsuringContentRecord);
        let (content_id, created_content) = self.ensure_content_record(content, model_id).await?;

        self.enter(PublishPhase::PersistingVariants);
        let channel_ids = if content.channel_ids.is_empty() {
            scheduled.iter().map(|s| s.channel_identifier).collect()
        } else {
            content.channel_ids.clone()
        };
        let request = DurableGenerateRequest {
            content_id,
            channel_ids,
            model_id,
            variants: scheduled
                .iter()
                .map(|s| VariantPayload {
                    channel_identifier: s.channel_identifier,
                    title: s.visible.title.clone(),
                    generated_body: s.visible.body.clone(),
                })
                .collect(),
            value_metrics: metrics,
            session_id: content.session_id.clone(),
        };
        tracing::debug!(variants = request.variants.len(), "persisting variants");
        let durable = self
            .backend
            .durable_generate(&request)
            .await
            .map_err(PublishError::Persistence)?
            .generated_variants;

        self.enter(PublishPhase::Reconciling);
        let updated = self.reconcile(&scheduled, &durable).await?;

        Ok(PublishReceipt {
            content_id,
            created_content,
            variants: durable,
            updated,
        })
    }

    async fn ensure_content_record(
        &self,
        content: &mut DraftContent,
        model_id: ModelId,
    ) -> Result<(ContentId, bool), PublishError> {
        if let Some(id) = content.server_id {
            tracing::debug!(content_id = %id, "content record already exists");
            return Ok((id, false));
        }

        let section_id = content.section_id.ok_or(ValidationError::MissingSection)?;
        let request = CreateContentRequest {
            title: content.title.clone(),
            body: content.body.clone(),
            section_id,
            project_id: content.project_id,
            channel_ids: content.channel_ids.clone(),
            model_id,
            session_id: content.session_id.clone(),
        };
        let created = self
            .backend
            .create_content(&request)
            .await
            .map_err(PublishError::Persistence)?;

        tracing::info!(content_id = %created.id, "content record created");
        content.server_id = Some(created.id);
        Ok((created.id, true))
    }

    /// Match local variants to durable records and push the differences.
    async fn reconcile(
        &self,
        scheduled: &[Scheduled],
        durable: &[DurableVariant],
    ) -> Result<Vec<VariantId>, ReconciliationError> {
        let mut pairs = Vec::with_capacity(scheduled.len());
        let mut unmatched = Vec::new();
        for local in scheduled {
            match durable
                .iter()
                .find(|d| d.channel_identifier == local.channel_identifier)
            {
                Some(record) => pairs.push((local, record)),
                None => unmatched.push(local.channel_identifier),
            }
        }
        if !unmatched.is_empty() {
            return Err(ReconciliationError::Unmatched {
                channel_identifiers: unmatched,
            });
        }

        let pending: Vec<(VariantId, UpdateVariantRequest)> = pairs
            .into_iter()
            .filter(|(local, record)| {
                local.visible.title != record.title || local.visible.body != record.generated_body
            })
            .map(|(local, record)| {
                (
                    record.id,
                    UpdateVariantRequest {
                        title: local.visible.title.clone(),
                        generated_body: local.visible.body.clone(),
                    },
                )
            })
            .collect();

        tracing::debug!(updates = pending.len(), "applying edits to durable variants");
        let results = join_all(
            pending
                .iter()
                .map(|(id, request)| self.backend.update_variant(*id, request)),
        )
        .await;

        let mut applied = Vec::new();
        let mut failed = Vec::new();
        for ((id, _), result) in pending.iter().zip(results) {
            match result {
                Ok(()) => applied.push(*id),
                Err(err) => failed.push(FailedUpdate {
                    variant_id: *id,
                    message: err.to_string(),
                }),
            }
        }

        if failed.is_empty() {
            Ok(applied)
        } else {
            Err(ReconciliationError::UpdatesFailed { failed, applied })
        }
    }

    fn enter(&self, phase: PublishPhase) {
        tracing::debug!(phase = %phase, "publish phase");
        self.phase.store(encode(phase), Ordering::SeqCst);
    }
}

fn validate(
    content: &DraftContent,
    store: &DraftStore,
    overlay: &EditOverlay,
) -> Result<(ModelId, Vec<Scheduled>), ValidationError> {
    let model_id = content.model_id.ok_or(ValidationError::MissingModel)?;

    let mut scheduled = Vec::new();
    let mut missing_titles: Vec<ChannelKey> = Vec::new();
    for variant in store.publishable() {
        let visible = visible_for(variant, overlay);
        if visible.title.trim().is_empty() {
            if !missing_titles.contains(&variant.channel_key) {
                missing_titles.push(variant.channel_key);
            }
            continue;
        }
        let channel_identifier = variant
            .channel_identifier
            .ok_or(ValidationError::MissingChannelIdentifier(variant.local_id))?;
        scheduled.push(Scheduled {
            channel_identifier,
            visible,
        });
    }

    if !missing_titles.is_empty() {
        return Err(ValidationError::MissingVariantTitles(missing_titles));
    }
    if scheduled.is_empty() {
        return Err(ValidationError::NothingToPublish);
    }
    Ok((model_id, scheduled))
}

fn encode(phase: PublishPhase) -> u8 {
    match phase {
        PublishPhase::Idle => 0,
        PublishPhase::Validating => 1,
        PublishPhase::EnsuringContentRecord => 2,
        PublishPhase::PersistingVariants => 3,
        PublishPhase::Reconciling => 4,
        PublishPhase::Committed => 5,
        PublishPhase::Failed => 6,
    }
}

fn decode(raw: u8) -> PublishPhase {
    match raw {
        1 => PublishPhase::Validating,
        2 => PublishPhase::EnsuringContentRecord,
        3 => PublishPhase::PersistingVariants,
        4 => PublishPhase::Reconciling,
        5 => PublishPhase::Committed,
        6 => PublishPhase::Failed,
        _ => PublishPhase::Idle,
    }
}
