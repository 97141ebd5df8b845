//! Pipeline logic and port definitions for Pressroom.
//!
//! This crate defines the "ports" (`ContentBackend`, `SessionStore`) that the
//! infrastructure layer implements, and the draft -> generate -> edit ->
//! publish pipeline built on them. It depends only on `pressroom-types` --
//! never on `pressroom-infra` or any network/database crate.

pub mod backend;
pub mod classifier;
pub mod draft_store;
pub mod metrics;
pub mod orchestrator;
pub mod overlay;
pub mod publish;
pub mod session;
pub mod session_store;

#[cfg(test)]
pub(crate) mod testing;
