//! Scripted in-memory `ContentBackend` for unit tests.

use std::sync::Mutex;
use std::time::Duration;

use pressroom_types::error::{BackendError, RepositoryError};
use pressroom_types::ids::{ChannelId, ContentId, VariantId};
use pressroom_types::wire::{
    ContentRecord, CreateContentRequest, CreatedContent, DurableGenerateRequest,
    DurableGenerateResponse, DurableVariant, EphemeralGenerateRequest, EphemeralGenerateResponse,
    GeneratedVariant, UpdateVariantRequest,
};

use crate::backend::ContentBackend;
use crate::session_store::SessionStore;

/// Every call the backend received, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Ephemeral(EphemeralGenerateRequest),
    CreateContent(CreateContentRequest),
    Durable(DurableGenerateRequest),
    Update(VariantId, UpdateVariantRequest),
    GetContent(ContentId),
    ListVariants(ContentId),
}

/// Mock backend with canned responses.
///
/// Durable generation echoes the submitted payloads (ids from 100 upwards)
/// unless `durable` is set.
pub struct MockBackend {
    pub calls: Mutex<Vec<Call>>,
    pub ephemeral: Result<EphemeralGenerateResponse, BackendError>,
    pub created_id: ContentId,
    pub create_error: Option<BackendError>,
    pub durable: Option<Result<DurableGenerateResponse, BackendError>>,
    pub failing_updates: Vec<VariantId>,
    pub content: Option<ContentRecord>,
    pub variants: Result<Vec<DurableVariant>, BackendError>,
    durable_delay: Option<Duration>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            ephemeral: Ok(EphemeralGenerateResponse::default()),
            created_id: ContentId(55),
            create_error: None,
            durable: None,
            failing_updates: Vec::new(),
            content: None,
            variants: Ok(Vec::new()),
            durable_delay: None,
        }
    }
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ephemeral generation returns these `(channel_identifier, label, body)`
    /// triples plus a small metrics object.
    pub fn with_generated(mut self, variants: &[(i64, &str, &str)]) -> Self {
        let mut metrics = serde_json::Map::new();
        metrics.insert("roi_percent".into(), serde_json::json!(250.0));
        metrics.insert("tokens_total".into(), serde_json::json!(1200));
        self.ephemeral = Ok(EphemeralGenerateResponse {
            variants: variants
                .iter()
                .map(|(id, label, body)| GeneratedVariant {
                    channel_identifier: ChannelId(*id),
                    channel_label: (*label).to_string(),
                    generated_body: (*body).to_string(),
                    title: None,
                })
                .collect(),
            metrics: Some(metrics),
        });
        self
    }

    pub fn with_durable(mut self, variants: Vec<DurableVariant>) -> Self {
        self.durable = Some(Ok(DurableGenerateResponse {
            generated_variants: variants,
        }));
        self
    }

    /// Make durable generation suspend before answering.
    pub fn with_durable_delay(mut self, ms: u64) -> Self {
        self.durable_delay = Some(Duration::from_millis(ms));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn updates(&self) -> Vec<(VariantId, UpdateVariantRequest)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Update(id, req) => Some((id, req)),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|c| pred(c)).count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

pub fn durable(id: i64, channel: i64, title: &str, body: &str) -> DurableVariant {
    DurableVariant {
        id: VariantId(id),
        channel_identifier: ChannelId(channel),
        channel_label: String::new(),
        title: title.to_string(),
        generated_body: body.to_string(),
    }
}

impl ContentBackend for MockBackend {
    async fn ephemeral_generate(
        &self,
        request: &EphemeralGenerateRequest,
    ) -> Result<EphemeralGenerateResponse, BackendError> {
        self.record(Call::Ephemeral(request.clone()));
        self.ephemeral.clone()
    }

    async fn create_content(
        &self,
        request: &CreateContentRequest,
    ) -> Result<CreatedContent, BackendError> {
        self.record(Call::CreateContent(request.clone()));
        match &self.create_error {
            Some(err) => Err(err.clone()),
            None => Ok(CreatedContent {
                id: self.created_id,
            }),
        }
    }

    async fn durable_generate(
        &self,
        request: &DurableGenerateRequest,
    ) -> Result<DurableGenerateResponse, BackendError> {
        self.record(Call::Durable(request.clone()));
        if let Some(delay) = self.durable_delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(response) = &self.durable {
            return response.clone();
        }
        Ok(DurableGenerateResponse {
            generated_variants: request
                .variants
                .iter()
                .enumerate()
                .map(|(idx, v)| DurableVariant {
                    id: VariantId(100 + idx as i64),
                    channel_identifier: v.channel_identifier,
                    channel_label: String::new(),
                    title: v.title.clone(),
                    generated_body: v.generated_body.clone(),
                })
                .collect(),
        })
    }

    async fn update_variant(
        &self,
        id: VariantId,
        request: &UpdateVariantRequest,
    ) -> Result<(), BackendError> {
        self.record(Call::Update(id, request.clone()));
        if self.failing_updates.contains(&id) {
            return Err(BackendError::Status {
                status: 500,
                detail: "update rejected".into(),
            });
        }
        Ok(())
    }

    async fn get_content(&self, id: ContentId) -> Result<ContentRecord, BackendError> {
        self.record(Call::GetContent(id));
        self.content
            .clone()
            .ok_or_else(|| BackendError::NotFound(format!("content {id}")))
    }

    async fn list_variants(
        &self,
        content_id: ContentId,
    ) -> Result<Vec<DurableVariant>, BackendError> {
        self.record(Call::ListVariants(content_id));
        self.variants.clone()
    }
}

/// `SessionStore` backed by a map.
#[derive(Default)]
pub struct MemorySessionStore {
    pub entries: Mutex<std::collections::HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }
}

impl SessionStore for MemorySessionStore {
    async fn load(&self, key: &str) -> Result<Option<String>, RepositoryError> {
        Ok(self.get(key))
    }

    async fn save(&self, key: &str, session_id: &str) -> Result<(), RepositoryError> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), session_id.to_string());
        Ok(())
    }

    async fn clear(&self, key: &str) -> Result<(), RepositoryError> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}
