//! Server configuration, read from the environment with CLI overrides
//! applied in `main`.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{HotDogError, Result};

#[derive(Debug, Clone)]
pub struct Config {
    /// Bind address for the HTTP server
    pub listen_addr: String,
    /// SQLite database file
    pub database_path: PathBuf,
    /// Root directory for uploaded image blobs
    pub storage_dir: PathBuf,
    /// Public base URL the server is reachable at (image links are built
    /// from this)
    pub public_base_url: String,
    /// Vision model identifier
    pub model: String,
    /// API key; the environment variable takes priority in `get_api_key`
    pub api_key: Option<String>,
    /// Bound on the classification call; no retry on expiry
    pub ai_timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:3000".into(),
            database_path: PathBuf::from("hotdog.db"),
            storage_dir: PathBuf::from("images"),
            public_base_url: "http://127.0.0.1:3000".into(),
            model: "gpt-4o".into(),
            api_key: None,
            ai_timeout_seconds: 60,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            listen_addr: env_or("HOTDOG_LISTEN", defaults.listen_addr),
            database_path: PathBuf::from(env_or(
                "HOTDOG_DATABASE",
                defaults.database_path.display().to_string(),
            )),
            storage_dir: PathBuf::from(env_or(
                "HOTDOG_STORAGE_DIR",
                defaults.storage_dir.display().to_string(),
            )),
            public_base_url: env_or("HOTDOG_PUBLIC_URL", defaults.public_base_url),
            model: env_or("HOTDOG_MODEL", defaults.model),
            api_key: None,
            ai_timeout_seconds: std::env::var("HOTDOG_AI_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.ai_timeout_seconds),
        }
    }

    pub fn get_api_key(&self) -> Result<String> {
        // environment takes priority
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            if !key.trim().is_empty() {
                return Ok(key);
            }
        }

        self.api_key
            .clone()
            .ok_or_else(|| HotDogError::Config("OPENAI_API_KEY is not set".into()))
    }

    pub fn ai_timeout(&self) -> Duration {
        Duration::from_secs(self.ai_timeout_seconds)
    }

    /// Base URL uploaded images are served under.
    pub fn images_base_url(&self) -> String {
        format!("{}/images", self.public_base_url.trim_end_matches('/'))
    }
}

fn env_or(key: &str, default: String) -> String {
    match std::env::var(key) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.listen_addr, "127.0.0.1:3000");
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.ai_timeout_seconds, 60);
    }

    #[test]
    fn test_images_base_url_trims_trailing_slash() {
        let config = Config {
            public_base_url: "https://hotdog.example/".into(),
            ..Config::default()
        };
        assert_eq!(config.images_base_url(), "https://hotdog.example/images");
    }
}
