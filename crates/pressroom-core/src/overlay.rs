//! Edit overlay: local, non-destructive title/body overrides.
//!
//! The overlay never touches a [`DraftVariant`]; values are merged when read
//! (see [`crate::draft_store::visible`]) and when publishing. A present
//! override always wins, including an empty string.
//!
//! [`DraftVariant`]: pressroom_types::draft::DraftVariant

use std::collections::{HashMap, HashSet};

use pressroom_types::draft::VariantField;
use pressroom_types::ids::LocalVariantId;

/// Overrides for one variant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverlayEntry {
    pub title: Option<String>,
    pub body: Option<String>,
}

impl OverlayEntry {
    pub fn field(&self, field: VariantField) -> Option<&str> {
        match field {
            VariantField::Title => self.title.as_deref(),
            VariantField::Body => self.body.as_deref(),
        }
    }
}

/// All overrides of the active editing view, keyed by local variant id.
#[derive(Debug, Clone, Default)]
pub struct EditOverlay {
    entries: HashMap<LocalVariantId, OverlayEntry>,
}

impl EditOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an override. Last write wins per field.
    pub fn set(&mut self, local_id: LocalVariantId, field: VariantField, value: impl Into<String>) {
        let entry = self.entries.entry(local_id).or_default();
        match field {
            VariantField::Title => entry.title = Some(value.into()),
            VariantField::Body => entry.body = Some(value.into()),
        }
    }

    pub fn get(&self, local_id: &LocalVariantId) -> Option<&OverlayEntry> {
        self.entries.get(local_id)
    }

    /// Drop every override for a variant, revealing generator output again.
    pub fn clear(&mut self, local_id: &LocalVariantId) {
        self.entries.remove(local_id);
    }

    /// Keep only entries whose variant still exists.
    pub fn retain(&mut self, live: &HashSet<LocalVariantId>) {
        self.entries.retain(|id, _| live.contains(id));
    }

    pub fn clear_all(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
