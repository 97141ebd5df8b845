//! Shared domain types for Pressroom.
//!
//! This crate contains the domain types used across the draft -> generate ->
//! edit -> publish pipeline: identifiers, the channel taxonomy, draft content
//! and variants, value metrics, backend payloads, and the error taxonomy.
//!
//! Zero infrastructure dependencies -- only serde, serde_json, uuid, thiserror.

pub mod channel;
pub mod config;
pub mod draft;
pub mod error;
pub mod ids;
pub mod metrics;
pub mod publish;
pub mod wire;
