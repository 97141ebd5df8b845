//! Generation orchestrator.
//!
//! Validates the draft, issues exactly one ephemeral generation call and
//! turns the response into classified [`DraftVariant`]s. Nothing is written
//! anywhere: the caller swaps the returned variants into its store.

use pressroom_types::config::DraftLimits;
use pressroom_types::draft::{DraftContent, DraftVariant};
use pressroom_types::error::{GenerationFailure, ValidationError};
use pressroom_types::ids::{ChannelId, ModelId, SectionId};
use pressroom_types::metrics::MetricsPayload;
use pressroom_types::wire::{EphemeralContent, EphemeralGenerateRequest};

use crate::backend::ContentBackend;
use crate::classifier::classify;

/// Title of the placeholder variant shown when generation returns nothing.
pub const EMPTY_RESULT_TITLE: &str = "No content was generated";

/// Body of the placeholder variant shown when generation returns nothing.
pub const EMPTY_RESULT_BODY: &str = "The backend returned no variants for the selected channels. \
Check that the language model is configured and active, and that every selected channel \
has a prompt and a style assigned.";

/// Result of a successful ephemeral generation.
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    pub variants: Vec<DraftVariant>,
    /// Raw value metrics, exactly as returned.
    pub metrics: Option<MetricsPayload>,
}

impl GenerationOutcome {
    /// True when only the informational placeholder was produced.
    pub fn is_empty_result(&self) -> bool {
        self.variants.iter().all(DraftVariant::is_informational)
    }
}

pub struct GenerationOrchestrator<B: ContentBackend> {
    backend: B,
    limits: DraftLimits,
}

impl<B: ContentBackend> GenerationOrchestrator<B> {
    pub fn new(backend: B, limits: DraftLimits) -> Self {
        Self { backend, limits }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Generate one variant per channel without persisting anything.
    ///
    /// All preconditions are checked before the backend is contacted. An
    /// empty response is not an error: a single informational variant is
    /// returned instead.
    pub async fn generate_ephemeral(
        &self,
        content: &DraftContent,
        channel_ids: &[ChannelId],
        model_id: Option<ModelId>,
        regenerate: bool,
    ) -> Result<GenerationOutcome, GenerationFailure> {
        let (section_id, model_id) = self.validate(content, channel_ids, model_id)?;

        let request = EphemeralGenerateRequest {
            content: EphemeralContent {
                id: content.server_id,
                title: content.title.clone(),
                body: content.body.clone(),
                section_id,
                project_id: content.project_id,
            },
            channel_ids: channel_ids.to_vec(),
            model_id,
            regenerate,
        };

        tracing::info!(
            channels = channel_ids.len(),
            model_id = %model_id,
            regenerate,
            "requesting ephemeral generation"
        );

        let response = self
            .backend
            .ephemeral_generate(&request)
            .await
            .map_err(|err| {
                tracing::warn!(error = %err, "ephemeral generation failed");
                GenerationFailure::Generation(err)
            })?;

        let variants: Vec<DraftVariant> = if response.variants.is_empty() {
            tracing::warn!("ephemeral generation returned no variants");
            vec![DraftVariant::informational(EMPTY_RESULT_TITLE, EMPTY_RESULT_BODY)]
        } else {
            response
                .variants
                .into_iter()
                .map(|generated| {
                    let key = classify(&generated.channel_label);
                    tracing::debug!(
                        label = %generated.channel_label,
                        channel_key = %key,
                        "classified variant"
                    );
                    DraftVariant::ephemeral(
                        key,
                        generated.channel_identifier,
                        generated.channel_label,
                        generated.title.unwrap_or_else(|| content.title.clone()),
                        generated.generated_body,
                    )
                })
                .collect()
        };

        tracing::info!(
            variants = variants.len(),
            has_metrics = response.metrics.is_some(),
            "ephemeral generation complete"
        );

        Ok(GenerationOutcome {
            variants,
            metrics: response.metrics,
        })
    }

    fn validate(
        &self,
        content: &DraftContent,
        channel_ids: &[ChannelId],
        model_id: Option<ModelId>,
    ) -> Result<(SectionId, ModelId), ValidationError> {
        let title_len = content.title.trim().chars().count();
        let body_len = content.body.trim().chars().count();

        if title_len == 0 {
            return Err(ValidationError::MissingTitle);
        }
        if body_len == 0 {
            return Err(ValidationError::MissingBody);
        }
        let limits = &self.limits;
        if title_len < limits.min_title_chars || title_len > limits.max_title_chars {
            return Err(ValidationError::TitleLength {
                len: title_len,
                min: limits.min_title_chars,
                max: limits.max_title_chars,
            });
        }
        if body_len < limits.min_body_chars || body_len > limits.max_body_chars {
            return Err(ValidationError::BodyLength {
                len: body_len,
                min: limits.min_body_chars,
                max: limits.max_body_chars,
            });
        }
        let section_id = content.section_id.ok_or(ValidationError::MissingSection)?;
        if channel_ids.is_empty() {
            return Err(ValidationError::NoChannels);
        }
        let model_id = model_id.ok_or(ValidationError::MissingModel)?;
        Ok((section_id, model_id))
    }
}

#[cfg(test)]
mod tests {
    use pressroom_types::channel::ChannelKey;
    use pressroom_types::error::BackendError;
    use pressroom_types::ids::ContentId;

    use super::*;
    use crate::testing::{Call, MockBackend};

    fn draft() -> DraftContent {
        DraftContent::new("T", "B".repeat(25), SectionId(3))
    }

    fn orchestrator(backend: MockBackend) -> GenerationOrchestrator<MockBackend> {
        GenerationOrchestrator::new(backend, DraftLimits::default())
    }

    #[tokio::test]
    async fn test_empty_channel_list_never_reaches_backend() {
        let orch = orchestrator(MockBackend::new());
        let err = orch
            .generate_ephemeral(&draft(), &[], Some(ModelId(7)), false)
            .await
            .unwrap_err();
        assert_eq!(err, GenerationFailure::Validation(ValidationError::NoChannels));
        assert!(orch.backend().calls().is_empty());
    }

    #[tokio::test]
    async fn test_each_precondition_is_checked_before_network() {
        let orch = orchestrator(MockBackend::new());
        let channels = [ChannelId(1)];

        let mut no_title = draft();
        no_title.title = "  ".into();
        let mut no_section = draft();
        no_section.section_id = None;
        let mut short_body = draft();
        short_body.body = "too short".into();

        let cases = [
            (no_title, Some(ModelId(7)), ValidationError::MissingTitle),
            (no_section, Some(ModelId(7)), ValidationError::MissingSection),
            (draft(), None, ValidationError::MissingModel),
            (
                short_body,
                Some(ModelId(7)),
                ValidationError::BodyLength { len: 9, min: 20, max: 10_000 },
            ),
        ];
        for (content, model, expected) in cases {
            let err = orch
                .generate_ephemeral(&content, &channels, model, false)
                .await
                .unwrap_err();
            assert_eq!(err, GenerationFailure::Validation(expected));
        }
        assert!(orch.backend().calls().is_empty());
    }

    #[tokio::test]
    async fn test_variants_are_classified_and_titled() {
        let backend = MockBackend::new().with_generated(&[(1, "Impreso", "print body"), (2, "Twitter/X", "tweet")]);
        let orch = orchestrator(backend);

        let outcome = orch
            .generate_ephemeral(&draft(), &[ChannelId(1), ChannelId(2)], Some(ModelId(7)), false)
            .await
            .unwrap();

        assert_eq!(outcome.variants.len(), 2);
        assert_eq!(outcome.variants[0].channel_key, ChannelKey::Print);
        assert_eq!(outcome.variants[0].title, "T");
        assert_eq!(outcome.variants[1].channel_key, ChannelKey::SocialX);
        assert_eq!(outcome.variants[1].channel_identifier, Some(ChannelId(2)));
        assert!(outcome.variants.iter().all(DraftVariant::is_ephemeral));
        assert!(outcome.metrics.is_some());
        assert!(!outcome.is_empty_result());

        let calls = orch.backend().calls();
        assert_eq!(calls.len(), 1);
        match &calls[0] {
            Call::Ephemeral(req) => {
                assert_eq!(req.content.id, None);
                assert_eq!(req.content.section_id, SectionId(3));
                assert_eq!(req.model_id, ModelId(7));
                assert!(!req.regenerate);
            }
            other => panic!("unexpected call {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_persisted_content_sends_its_id() {
        let orch = orchestrator(MockBackend::new().with_generated(&[(1, "Web", "x")]));
        let mut content = draft();
        content.server_id = Some(ContentId(9));

        orch.generate_ephemeral(&content, &[ChannelId(1)], Some(ModelId(7)), true)
            .await
            .unwrap();

        match &orch.backend().calls()[0] {
            Call::Ephemeral(req) => {
                assert_eq!(req.content.id, Some(ContentId(9)));
                assert!(req.regenerate);
            }
            other => panic!("unexpected call {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_response_yields_informational_variant() {
        let orch = orchestrator(MockBackend::new());
        let outcome = orch
            .generate_ephemeral(&draft(), &[ChannelId(1)], Some(ModelId(7)), false)
            .await
            .unwrap();

        assert_eq!(outcome.variants.len(), 1);
        let placeholder = &outcome.variants[0];
        assert!(placeholder.is_informational());
        assert_eq!(placeholder.channel_key, ChannelKey::Unclassified);
        assert!(outcome.is_empty_result());
    }

    #[tokio::test]
    async fn test_backend_failure_carries_detail() {
        let mut backend = MockBackend::new();
        backend.ephemeral = Err(BackendError::Status {
            status: 404,
            detail: "LLM 7 not found or inactive".into(),
        });
        let orch = orchestrator(backend);

        let err = orch
            .generate_ephemeral(&draft(), &[ChannelId(1)], Some(ModelId(7)), false)
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Generation failed: LLM 7 not found or inactive");
    }
}
