//! HttpContentBackend -- concrete [`ContentBackend`] over the content
//! service's JSON API.
//!
//! Every operation is a single request; nothing is retried. Non-success
//! responses are mapped onto [`BackendError`], with the service's `detail`
//! message unwrapped when present.
//!
//! The bearer token is wrapped in [`secrecy::SecretString`] and is never
//! logged or included in `Debug` output.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{RequestBuilder, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;

use pressroom_core::backend::ContentBackend;
use pressroom_types::config::BackendConfig;
use pressroom_types::error::BackendError;
use pressroom_types::ids::{ContentId, VariantId};
use pressroom_types::wire::{
    ContentRecord, CreateContentRequest, CreatedContent, DurableGenerateRequest,
    DurableGenerateResponse, DurableVariant, EphemeralGenerateRequest, EphemeralGenerateResponse,
    UpdateVariantRequest,
};

use super::detail::extract_detail;

/// Content backend reached over HTTP.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct HttpContentBackend {
    client: reqwest::Client,
    base_url: String,
    token: Option<Arc<SecretString>>,
}

impl HttpContentBackend {
    /// Create a backend client from configuration.
    pub fn new(config: &BackendConfig, token: Option<SecretString>) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| BackendError::Transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: token.map(Arc::new),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the full URL for a given path.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, BackendError> {
        let response = self
            .authorize(builder)
            .send()
            .await
            .map_err(|e| BackendError::Transport(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();
        let detail = extract_detail(&error_body);
        tracing::debug!(status = status.as_u16(), detail = %detail, "backend returned an error");
        Err(match status {
            StatusCode::UNAUTHORIZED => BackendError::Unauthorized,
            StatusCode::NOT_FOUND => BackendError::NotFound(detail),
            _ => BackendError::Status {
                status: status.as_u16(),
                detail,
            },
        })
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, BackendError> {
        let response = self.send(builder).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| BackendError::Decode(format!("failed to parse response: {e}")))
    }
}

// No Debug derive: the token must never end up in logs.

impl ContentBackend for HttpContentBackend {
    #[tracing::instrument(
        name = "backend.ephemeral_generate",
        skip_all,
        fields(channels = request.channel_ids.len(), model_id = %request.model_id)
    )]
    async fn ephemeral_generate(
        &self,
        request: &EphemeralGenerateRequest,
    ) -> Result<EphemeralGenerateResponse, BackendError> {
        let builder = self.client.post(self.url("/generate/ephemeral")).json(request);
        let response: EphemeralGenerateResponse = self.send_json(builder).await?;
        tracing::info!(variants = response.variants.len(), "ephemeral generation returned");
        Ok(response)
    }

    #[tracing::instrument(name = "backend.create_content", skip_all, fields(section_id = %request.section_id))]
    async fn create_content(&self, request: &CreateContentRequest) -> Result<CreatedContent, BackendError> {
        let builder = self.client.post(self.url("/contents/")).json(request);
        let created: CreatedContent = self.send_json(builder).await?;
        tracing::info!(content_id = %created.id, "content record created");
        Ok(created)
    }

    #[tracing::instrument(
        name = "backend.durable_generate",
        skip_all,
        fields(content_id = %request.content_id, variants = request.variants.len())
    )]
    async fn durable_generate(
        &self,
        request: &DurableGenerateRequest,
    ) -> Result<DurableGenerateResponse, BackendError> {
        let builder = self.client.post(self.url("/generate/outputs")).json(request);
        let response: DurableGenerateResponse = self.send_json(builder).await?;
        tracing::info!(
            variants = response.generated_variants.len(),
            "durable generation returned"
        );
        Ok(response)
    }

    #[tracing::instrument(name = "backend.update_variant", skip_all, fields(variant_id = %id))]
    async fn update_variant(&self, id: VariantId, request: &UpdateVariantRequest) -> Result<(), BackendError> {
        let builder = self
            .client
            .put(self.url(&format!("/generate/outputs/{id}")))
            .json(request);
        // The acknowledgement body is ignored.
        self.send(builder).await?;
        Ok(())
    }

    #[tracing::instrument(name = "backend.get_content", skip_all, fields(content_id = %id))]
    async fn get_content(&self, id: ContentId) -> Result<ContentRecord, BackendError> {
        let builder = self.client.get(self.url(&format!("/contents/{id}")));
        self.send_json(builder).await
    }

    #[tracing::instrument(name = "backend.list_variants", skip_all, fields(content_id = %content_id))]
    async fn list_variants(&self, content_id: ContentId) -> Result<Vec<DurableVariant>, BackendError> {
        let builder = self
            .client
            .get(self.url(&format!("/generate/contents/{content_id}/outputs")));
        match self.send_json(builder).await {
            Ok(variants) => Ok(variants),
            Err(BackendError::NotFound(_)) => {
                tracing::debug!("no persisted variants");
                Ok(Vec::new())
            }
            Err(err) => Err(err),
        }
    }
}
