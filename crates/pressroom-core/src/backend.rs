//! ContentBackend trait definition.
//!
//! The remote content service that generates and stores variants. The core
//! crate only talks to it through this port; the HTTP implementation lives in
//! pressroom-infra (`HttpContentBackend`).

use std::future::Future;

use pressroom_types::error::BackendError;
use pressroom_types::ids::{ContentId, VariantId};
use pressroom_types::wire::{
    ContentRecord, CreateContentRequest, CreatedContent, DurableGenerateRequest,
    DurableGenerateResponse, DurableVariant, EphemeralGenerateRequest, EphemeralGenerateResponse,
    UpdateVariantRequest,
};

/// Trait for content backends.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition). Every method
/// is a single request; retries are never attempted here.
pub trait ContentBackend: Send + Sync {
    /// Generate one variant per channel without persisting anything.
    fn ephemeral_generate(
        &self,
        request: &EphemeralGenerateRequest,
    ) -> impl Future<Output = Result<EphemeralGenerateResponse, BackendError>> + Send;

    /// Create the parent content record and return its durable id.
    fn create_content(
        &self,
        request: &CreateContentRequest,
    ) -> impl Future<Output = Result<CreatedContent, BackendError>> + Send;

    /// Generate and persist variants for an existing content record.
    fn durable_generate(
        &self,
        request: &DurableGenerateRequest,
    ) -> impl Future<Output = Result<DurableGenerateResponse, BackendError>> + Send;

    /// Overwrite title and body of one persisted variant.
    fn update_variant(
        &self,
        id: VariantId,
        request: &UpdateVariantRequest,
    ) -> impl Future<Output = Result<(), BackendError>> + Send;

    /// Load a persisted content record.
    fn get_content(
        &self,
        id: ContentId,
    ) -> impl Future<Output = Result<ContentRecord, BackendError>> + Send;

    /// List persisted variants of a content record. A record without variants
    /// yields an empty list, not an error.
    fn list_variants(
        &self,
        content_id: ContentId,
    ) -> impl Future<Output = Result<Vec<DurableVariant>, BackendError>> + Send;
}

impl<T: ContentBackend> ContentBackend for std::sync::Arc<T> {
    fn ephemeral_generate(
        &self,
        request: &EphemeralGenerateRequest,
    ) -> impl Future<Output = Result<EphemeralGenerateResponse, BackendError>> + Send {
        (**self).ephemeral_generate(request)
    }

    fn create_content(
        &self,
        request: &CreateContentRequest,
    ) -> impl Future<Output = Result<CreatedContent, BackendError>> + Send {
        (**self).create_content(request)
    }

    fn durable_generate(
        &self,
        request: &DurableGenerateRequest,
    ) -> impl Future<Output = Result<DurableGenerateResponse, BackendError>> + Send {
        (**self).durable_generate(request)
    }

    fn update_variant(
        &self,
        id: VariantId,
        request: &UpdateVariantRequest,
    ) -> impl Future<Output = Result<(), BackendError>> + Send {
        (**self).update_variant(id, request)
    }

    fn get_content(
        &self,
        id: ContentId,
    ) -> impl Future<Output = Result<ContentRecord, BackendError>> + Send {
        (**self).get_content(id)
    }

    fn list_variants(
        &self,
        content_id: ContentId,
    ) -> impl Future<Output = Result<Vec<DurableVariant>, BackendError>> + Send {
        (**self).list_variants(content_id)
    }
}
