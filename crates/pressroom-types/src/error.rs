use thiserror::Error;

use crate::channel::ChannelKey;
use crate::ids::{ChannelId, LocalVariantId, VariantId};

/// Input problems detected on the client before any network call.
///
/// Never retried; the operator has to fix the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("title is required")]
    MissingTitle,

    #[error("body is required")]
    MissingBody,

    #[error("a section is required")]
    MissingSection,

    #[error("select at least one channel")]
    NoChannels,

    #[error("select a valid language model")]
    MissingModel,

    #[error("title must be between {min} and {max} characters (got {len})")]
    TitleLength { len: usize, min: usize, max: usize },

    #[error("body must be between {min} and {max} characters (got {len})")]
    BodyLength { len: usize, min: usize, max: usize },

    #[error("there are no generated variants to publish")]
    NothingToPublish,

    #[error("every variant needs a title before publishing (missing in: {})", join_keys(.0))]
    MissingVariantTitles(Vec<ChannelKey>),

    #[error("variant {0} has no channel identifier")]
    MissingChannelIdentifier(LocalVariantId),

    #[error("unknown variant {0}")]
    UnknownVariant(LocalVariantId),
}

fn join_keys(keys: &[ChannelKey]) -> String {
    keys.iter().map(|k| k.label()).collect::<Vec<_>>().join(", ")
}

/// Failures talking to the content backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("not authorized")]
    Unauthorized,

    #[error("not found: {0}")]
    NotFound(String),

    #[error("backend returned HTTP {status}: {detail}")]
    Status { status: u16, detail: String },

    #[error("unexpected response: {0}")]
    Decode(String),
}

impl BackendError {
    /// The message supplied by the backend, when it sent one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            BackendError::Status { detail, .. } | BackendError::NotFound(detail)
                if !detail.is_empty() =>
            {
                Some(detail.as_str())
            }
            _ => None,
        }
    }
}

/// Why ephemeral generation did not produce variants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationFailure {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("generation failed: {0}")]
    Generation(#[source] BackendError),
}

impl GenerationFailure {
    /// Single notification text: backend detail when available.
    pub fn user_message(&self) -> String {
        match self {
            GenerationFailure::Validation(err) => err.to_string(),
            GenerationFailure::Generation(err) => match err.detail() {
                Some(detail) => format!("Generation failed: {detail}"),
                None => "Generation failed. Please try again.".to_string(),
            },
        }
    }
}

/// A durable update that did not go through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedUpdate {
    pub variant_id: VariantId,
    pub message: String,
}

/// Local drafts could not be matched to, or written onto, their durable
/// counterparts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconciliationError {
    #[error("no durable variant returned for channel identifier(s): {}", join_ids(.channel_identifiers))]
    Unmatched { channel_identifiers: Vec<ChannelId> },

    #[error("{}", describe_failed_updates(.failed, .applied))]
    UpdatesFailed {
        failed: Vec<FailedUpdate>,
        applied: Vec<VariantId>,
    },
}

fn join_ids(ids: &[ChannelId]) -> String {
    ids.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

fn describe_failed_updates(failed: &[FailedUpdate], applied: &[VariantId]) -> String {
    let details = failed
        .iter()
        .map(|f| format!("{}: {}", f.variant_id, f.message))
        .collect::<Vec<_>>()
        .join("; ");
    format!(
        "{} update(s) failed ({details}); {} already applied",
        failed.len(),
        applied.len()
    )
}

/// Publishing without value metrics is refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateError {
    #[error("no metrics were computed for this draft; publish refused")]
    Missing,

    #[error("metrics payload is empty; publish refused")]
    Empty,
}

/// Terminal failure of a publish attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PublishError {
    #[error(transparent)]
    Gate(#[from] GateError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("could not persist: {0}")]
    Persistence(#[source] BackendError),

    #[error(transparent)]
    Reconciliation(#[from] ReconciliationError),

    #[error("a publish is already in progress")]
    InProgress,
}

impl PublishError {
    /// Single notification text: backend detail when available.
    pub fn user_message(&self) -> String {
        match self {
            PublishError::Persistence(err) => match err.detail() {
                Some(detail) => format!("Publish failed: {detail}"),
                None => "Publish failed. Please try again.".to_string(),
            },
            other => format!("Publish failed: {other}"),
        }
    }
}

/// Errors from repository operations (used by trait definitions in pressroom-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unmatched_lists_every_identifier() {
        let err = ReconciliationError::Unmatched {
            channel_identifiers: vec![ChannelId(2), ChannelId(5)],
        };
        assert_eq!(
            err.to_string(),
            "no durable variant returned for channel identifier(s): 2, 5"
        );
    }

    #[test]
    fn test_updates_failed_display() {
        let err = ReconciliationError::UpdatesFailed {
            failed: vec![FailedUpdate {
                variant_id: VariantId(11),
                message: "timeout".into(),
            }],
            applied: vec![VariantId(10)],
        };
        let msg = err.to_string();
        assert!(msg.contains("1 update(s) failed"));
        assert!(msg.contains("11: timeout"));
        assert!(msg.contains("1 already applied"));
    }

    #[test]
    fn test_missing_titles_names_channels() {
        let err = ValidationError::MissingVariantTitles(vec![ChannelKey::Print, ChannelKey::SocialX]);
        assert!(err.to_string().contains("Print, Twitter/X"));
    }

    #[test]
    fn test_generation_user_message_prefers_backend_detail() {
        let err = GenerationFailure::Generation(BackendError::Status {
            status: 404,
            detail: "LLM 7 not found or inactive".into(),
        });
        assert_eq!(err.user_message(), "Generation failed: LLM 7 not found or inactive");

        let err = GenerationFailure::Generation(BackendError::Transport("connection refused".into()));
        assert_eq!(err.user_message(), "Generation failed. Please try again.");
    }

    #[test]
    fn test_publish_user_message() {
        let err = PublishError::from(GateError::Empty);
        assert!(err.user_message().contains("metrics payload is empty"));
    }

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::Query("syntax error".to_string());
        assert_eq!(err.to_string(), "query error: syntax error");
    }
}
