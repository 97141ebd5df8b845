//! In-memory per-channel collection of draft variants.
//!
//! The store holds the variants of the current editing view, bucketed by
//! [`ChannelKey`]. Every variant lives in exactly one bucket; iteration is in
//! canonical key order, then insertion order. Nothing here is durable.

use std::collections::HashSet;

use pressroom_types::channel::ChannelKey;
use pressroom_types::draft::{DraftVariant, VisibleContent};
use pressroom_types::ids::LocalVariantId;

use crate::overlay::EditOverlay;

const BUCKETS: usize = ChannelKey::ALL.len();

#[derive(Debug, Clone, Default)]
pub struct DraftStore {
    buckets: [Vec<DraftVariant>; BUCKETS],
}

impl DraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swap the whole content of the store in one step.
    pub fn replace_all(&mut self, variants: impl IntoIterator<Item = DraftVariant>) {
        let mut buckets: [Vec<DraftVariant>; BUCKETS] = Default::default();
        for variant in variants {
            buckets[variant.channel_key.index()].push(variant);
        }
        self.buckets = buckets;
    }

    pub fn insert(&mut self, variant: DraftVariant) {
        self.buckets[variant.channel_key.index()].push(variant);
    }

    pub fn get(&self, local_id: &LocalVariantId) -> Option<&DraftVariant> {
        self.iter().find(|v| v.local_id == *local_id)
    }

    pub fn bucket(&self, key: ChannelKey) -> &[DraftVariant] {
        &self.buckets[key.index()]
    }

    /// Keys that currently hold at least one variant, in canonical order.
    pub fn non_empty_keys(&self) -> Vec<ChannelKey> {
        ChannelKey::ALL
            .into_iter()
            .filter(|key| !self.buckets[key.index()].is_empty())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DraftVariant> {
        self.buckets.iter().flatten()
    }

    pub fn local_ids(&self) -> HashSet<LocalVariantId> {
        self.iter().map(|v| v.local_id).collect()
    }

    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }

    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
    }

    /// Variants scheduled for publishing: everything except informational
    /// placeholders.
    pub fn publishable(&self) -> impl Iterator<Item = &DraftVariant> {
        self.iter().filter(|v| !v.is_informational())
    }
}

/// What the operator sees for a variant: overlay values win over generator
/// values, field by field.
pub fn visible(
    store: &DraftStore,
    overlay: &EditOverlay,
    local_id: &LocalVariantId,
) -> Option<VisibleContent> {
    store.get(local_id).map(|variant| visible_for(variant, overlay))
}

pub(crate) fn visible_for(variant: &DraftVariant, overlay: &EditOverlay) -> VisibleContent {
    let entry = overlay.get(&variant.local_id);
    VisibleContent {
        title: entry
            .and_then(|e| e.title.clone())
            .unwrap_or_else(|| variant.title.clone()),
        body: entry
            .and_then(|e| e.body.clone())
            .unwrap_or_else(|| variant.body.clone()),
    }
}

/// True iff at least one variant has a non-blank visible title and body.
pub fn has_any_publishable_content(store: &DraftStore, overlay: &EditOverlay) -> bool {
    store
        .publishable()
        .any(|variant| visible_for(variant, overlay).is_publishable())
}
