//! Publish state machine types.

use serde::{Deserialize, Serialize};

use std::fmt;

use crate::ids::{ContentId, VariantId};
use crate::wire::DurableVariant;

/// Where a publish attempt currently is.
///
/// `Idle -> Validating -> EnsuringContentRecord -> PersistingVariants ->
/// Reconciling -> {Committed | Failed}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublishPhase {
    Idle,
    Validating,
    EnsuringContentRecord,
    PersistingVariants,
    Reconciling,
    Committed,
    Failed,
}

impl PublishPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, PublishPhase::Committed | PublishPhase::Failed)
    }

    /// Whether a publish is running (the publish control should be disabled).
    pub fn is_busy(&self) -> bool {
        !matches!(
            self,
            PublishPhase::Idle | PublishPhase::Committed | PublishPhase::Failed
        )
    }
}

impl fmt::Display for PublishPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PublishPhase::Idle => "idle",
            PublishPhase::Validating => "validating",
            PublishPhase::EnsuringContentRecord => "ensuring_content_record",
            PublishPhase::PersistingVariants => "persisting_variants",
            PublishPhase::Reconciling => "reconciling",
            PublishPhase::Committed => "committed",
            PublishPhase::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// What a committed publish produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishReceipt {
    pub content_id: ContentId,
    /// True when this publish created the content record.
    pub created_content: bool,
    /// Durable records as returned by the backend.
    pub variants: Vec<DurableVariant>,
    /// Durable ids that received the operator's edits afterwards.
    pub updated: Vec<VariantId>,
}
