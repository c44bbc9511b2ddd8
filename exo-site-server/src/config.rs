use exo_backend::config::{ExtractorConfig, SourcesConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Port to bind the server to
    #[serde(default = "default_port")]
    pub port: u16,

    /// Whether to bind to all interfaces (0.0.0.0) or just localhost
    #[serde(default = "default_bind_all")]
    pub bind_all: bool,

    /// Directory holding the site's static files
    #[serde(default = "default_public_directory")]
    pub public_directory: String,

    /// Enable CORS for cross-origin requests
    #[serde(default = "default_enable_cors")]
    pub enable_cors: bool,

    #[serde(default)]
    pub sources: SourcesConfig,

    #[serde(default)]
    pub extractor: ExtractorConfig,
}

fn default_port() -> u16 {
    3030
}

fn default_bind_all() -> bool {
    true
}

fn default_public_directory() -> String {
    "public".to_string()
}

fn default_enable_cors() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            bind_all: default_bind_all(),
            public_directory: default_public_directory(),
            enable_cors: default_enable_cors(),
            sources: SourcesConfig::default(),
            extractor: ExtractorConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file; a missing file gives the defaults
    pub fn load(path: &str) -> anyhow::Result<Self> {
        if !Path::new(path).exists() {
            tracing::warn!("Config file '{}' not found, using defaults", path);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config file '{}': {}", path, e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config file: {}", e))?;

        Ok(config)
    }

    pub fn bind_ip(&self) -> [u8; 4] {
        if self.bind_all { [0, 0, 0, 0] } else { [127, 0, 0, 1] }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exo_backend::module::catalog::UnitLabels;

    #[test]
    fn test_partial_config() {
        let config: Config = toml::from_str(
            r#"
            port = 8080
            bind_all = false

            [sources]
            catalog = "https://example.org/all_exoplanets.json"

            [extractor]
            unit_labels = "matched"
            "#,
        )
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.bind_ip(), [127, 0, 0, 1]);
        assert_eq!(config.public_directory, "public");
        assert!(config.enable_cors);
        assert_eq!(config.sources.catalog, "https://example.org/all_exoplanets.json");
        assert_eq!(config.sources.scraped, "public/results.json");
        assert_eq!(config.extractor.unit_labels, UnitLabels::Matched);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = Config::load("definitely/not/here.toml").unwrap();
        assert_eq!(config.port, 3030);
        assert_eq!(config.bind_ip(), [0, 0, 0, 0]);
    }
}
