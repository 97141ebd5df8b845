//! Configuration types for Pressroom.
//!
//! `PressroomConfig` represents the top-level `config.toml` that controls the
//! backend endpoint, draft limits and local storage.

use serde::{Deserialize, Serialize};

/// Top-level configuration.
///
/// Loaded from `~/.pressroom/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PressroomConfig {
    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub limits: DraftLimits,

    /// SQLite URL for the local session store. Defaults to
    /// `sqlite://{data_dir}/pressroom.db` when unset.
    #[serde(default)]
    pub database_url: Option<String>,
}

impl Default for PressroomConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            limits: DraftLimits::default(),
            database_url: None,
        }
    }
}

/// Where the content backend lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout. Generation calls can take minutes.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8000/api".to_string()
}

fn default_timeout_secs() -> u64 {
    300
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Character limits enforced on the draft before generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftLimits {
    #[serde(default = "default_min_title")]
    pub min_title_chars: usize,
    #[serde(default = "default_max_title")]
    pub max_title_chars: usize,
    #[serde(default = "default_min_body")]
    pub min_body_chars: usize,
    #[serde(default = "default_max_body")]
    pub max_body_chars: usize,
}

fn default_min_title() -> usize {
    1
}

fn default_max_title() -> usize {
    200
}

fn default_min_body() -> usize {
    20
}

fn default_max_body() -> usize {
    10_000
}

impl Default for DraftLimits {
    fn default() -> Self {
        Self {
            min_title_chars: default_min_title(),
            max_title_chars: default_max_title(),
            min_body_chars: default_min_body(),
            max_body_chars: default_max_body(),
        }
    }
}
