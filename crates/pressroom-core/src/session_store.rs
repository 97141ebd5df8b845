//! Session id persistence trait.
//!
//! Generation and publishing share a conversation session id with the
//! backend. `SessionStore` keeps the active id across reloads so a resumed
//! editing view continues the same conversation.

use std::future::Future;

use pressroom_types::error::RepositoryError;

/// Key under which the editing view stores its session id.
pub const DEFAULT_SESSION_KEY: &str = "editor";

/// Persistence interface for session ids.
///
/// Uses RPITIT consistent with all async traits in this project.
pub trait SessionStore: Send + Sync {
    /// Load the session id stored under `key`, if any.
    fn load(&self, key: &str) -> impl Future<Output = Result<Option<String>, RepositoryError>> + Send;

    /// Save or replace the session id stored under `key`.
    fn save(
        &self,
        key: &str,
        session_id: &str,
    ) -> impl Future<Output = Result<(), RepositoryError>> + Send;

    /// Forget the session id stored under `key`. No-op when absent.
    fn clear(&self, key: &str) -> impl Future<Output = Result<(), RepositoryError>> + Send;
}

/// A `SessionStore` that remembers nothing. Used when no persistent store
/// is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSessionStore;

impl SessionStore for NoSessionStore {
    async fn load(&self, _key: &str) -> Result<Option<String>, RepositoryError> {
        Ok(None)
    }

    async fn save(&self, _key: &str, _session_id: &str) -> Result<(), RepositoryError> {
        Ok(())
    }

    async fn clear(&self, _key: &str) -> Result<(), RepositoryError> {
        Ok(())
    }
}

impl<T: SessionStore> SessionStore for std::sync::Arc<T> {
    fn load(&self, key: &str) -> impl Future<Output = Result<Option<String>, RepositoryError>> + Send {
        (**self).load(key)
    }

    fn save(
        &self,
        key: &str,
        session_id: &str,
    ) -> impl Future<Output = Result<(), RepositoryError>> + Send {
        (**self).save(key, session_id)
    }

    fn clear(&self, key: &str) -> impl Future<Output = Result<(), RepositoryError>> + Send {
        (**self).clear(key)
    }
}
