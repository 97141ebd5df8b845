//! Configuration loader for Pressroom.
//!
//! Reads `config.toml` from the data directory (`~/.pressroom/` in production)
//! and deserializes it into [`PressroomConfig`]. Falls back to sensible
//! defaults when the file is missing or malformed. Environment variables
//! override the file:
//!
//! - `PRESSROOM_DATA_DIR`: data directory
//! - `PRESSROOM_API_BASE`: backend base URL
//! - `PRESSROOM_API_TOKEN`: bearer token (never written to disk)

use std::path::{Path, PathBuf};

use secrecy::SecretString;

use pressroom_types::config::PressroomConfig;

pub const ENV_DATA_DIR: &str = "PRESSROOM_DATA_DIR";
pub const ENV_API_BASE: &str = "PRESSROOM_API_BASE";
pub const ENV_API_TOKEN: &str = "PRESSROOM_API_TOKEN";

/// Resolve the data directory: `PRESSROOM_DATA_DIR`, else `~/.pressroom`.
pub fn default_data_dir() -> PathBuf {
    match std::env::var(ENV_DATA_DIR) {
        Ok(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
        _ => dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".pressroom"),
    }
}

/// Load configuration from `{data_dir}/config.toml`, then apply environment
/// overrides.
///
/// - If the file does not exist, starts from [`PressroomConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and starts from
///   the default.
pub async fn load_config(data_dir: &Path) -> PressroomConfig {
    let config = read_config_file(data_dir).await;
    apply_overrides(config, std::env::var(ENV_API_BASE).ok())
}

async fn read_config_file(data_dir: &Path) -> PressroomConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return PressroomConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return PressroomConfig::default();
        }
    };

    match toml::from_str::<PressroomConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            PressroomConfig::default()
        }
    }
}

/// Apply a base URL override. Blank values are ignored.
pub fn apply_overrides(mut config: PressroomConfig, api_base: Option<String>) -> PressroomConfig {
    if let Some(base) = api_base.map(|b| b.trim().to_string()).filter(|b| !b.is_empty()) {
        tracing::debug!(base_url = %base, "backend base URL overridden from environment");
        config.backend.base_url = base;
    }
    config
}

/// Bearer token from `PRESSROOM_API_TOKEN`, if set and non-blank.
pub fn api_token_from_env() -> Option<SecretString> {
    std::env::var(ENV_API_TOKEN)
        .ok()
        .filter(|t| !t.trim().is_empty())
        .map(SecretString::from)
}

/// SQLite URL for the session store: the configured one, else
/// `sqlite://{data_dir}/pressroom.db`.
pub fn database_url(config: &PressroomConfig, data_dir: &Path) -> String {
    match &config.database_url {
        Some(url) => url.clone(),
        None => format!("sqlite://{}/pressroom.db", data_dir.display()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = read_config_file(tmp.path()).await;
        assert_eq!(config, PressroomConfig::default());
    }

    #[tokio::test]
    async fn load_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join("config.toml"),
            r#"
[backend]
base_url = "https://newsroom.example.com/api"
timeout_secs = 60

[limits]
max_body_chars = 5000
"#,
        )
        .await
        .unwrap();

        let config = read_config_file(tmp.path()).await;
        assert_eq!(config.backend.base_url, "https://newsroom.example.com/api");
        assert_eq!(config.backend.timeout_secs, 60);
        assert_eq!(config.limits.max_body_chars, 5000);
        assert_eq!(config.limits.min_body_chars, 20);
    }

    #[tokio::test]
    async fn load_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("config.toml"), "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = read_config_file(tmp.path()).await;
        assert_eq!(config, PressroomConfig::default());
    }

    #[test]
    fn apply_overrides_replaces_base_url() {
        let config = apply_overrides(PressroomConfig::default(), Some(" https://api.example.com ".into()));
        assert_eq!(config.backend.base_url, "https://api.example.com");
    }

    #[test]
    fn apply_overrides_ignores_blank_values() {
        let config = apply_overrides(PressroomConfig::default(), Some("   ".into()));
        assert_eq!(config.backend.base_url, "http://localhost:8000/api");
        let config = apply_overrides(PressroomConfig::default(), None);
        assert_eq!(config.backend.base_url, "http://localhost:8000/api");
    }

    #[test]
    fn database_url_defaults_into_data_dir() {
        let config = PressroomConfig::default();
        let url = database_url(&config, Path::new("/tmp/pressroom"));
        assert_eq!(url, "sqlite:///tmp/pressroom/pressroom.db");

        let config = PressroomConfig {
            database_url: Some("sqlite::memory:".into()),
            ..PressroomConfig::default()
        };
        assert_eq!(database_url(&config, Path::new("/x")), "sqlite::memory:");
    }
}
