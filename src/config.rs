use crate::error::{EtlError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
}

#[derive(Debug, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
    /// Pause between consecutive requests; the upstream municipal systems are
    /// low-capacity and rate limit aggressive clients.
    pub delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: "https://pmtibausulrn.apitransparencia.topsolutionsrn.com.br"
                    .to_string(),
                timeout_seconds: 30,
                delay_ms: 250,
            },
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let config_content = fs::read_to_string(path).map_err(|e| {
            EtlError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&config_content)?;
        Ok(config)
    }

    /// Loads the config file if present, otherwise falls back to the built-in
    /// defaults for the municipal transparency API.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            info!("No config file at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_config_toml() {
        let config: Config = toml::from_str(
            r#"
            [api]
            base_url = "https://example.test"
            timeout_seconds = 10
            delay_ms = 100
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://example.test");
        assert_eq!(config.api.timeout_seconds, 10);
        assert_eq!(config.api.delay_ms, 100);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = Config::load_or_default(Path::new("does-not-exist.toml")).unwrap();
        assert!(config.api.base_url.starts_with("https://"));
        assert_eq!(config.api.delay_ms, 250);
    }
}
