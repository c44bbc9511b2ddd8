use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

use crate::module::catalog::{ResourceLocation, UnitLabels};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    /// Comprehensive catalog document (path or http(s) URL)
    #[serde(default = "default_catalog_source")]
    pub catalog: String,

    /// Scraped page content (path or http(s) URL)
    #[serde(default = "default_scraped_source")]
    pub scraped: String,
}

impl SourcesConfig {
    pub fn catalog_location(&self) -> ResourceLocation {
        ResourceLocation::parse(&self.catalog)
    }

    pub fn scraped_location(&self) -> ResourceLocation {
        ResourceLocation::parse(&self.scraped)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractorConfig {
    #[serde(default)]
    pub unit_labels: UnitLabels,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveConfig {
    #[serde(default = "default_catalog_source")]
    pub output: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageConfig {
    #[serde(default = "default_page_url")]
    pub url: String,

    #[serde(default = "default_scraped_source")]
    pub output: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default = "default_log_dir")]
    pub log_dir: String,

    #[serde(default = "default_log_retention_days")]
    pub log_retention_days: u64,

    #[serde(default)]
    pub sources: SourcesConfig,

    #[serde(default)]
    pub extractor: ExtractorConfig,

    #[serde(default)]
    pub archive: ArchiveConfig,

    #[serde(default)]
    pub page: PageConfig,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_dir() -> String {
    "logs".to_string()
}

fn default_log_retention_days() -> u64 {
    3
}

fn default_catalog_source() -> String {
    "public/all_exoplanets.json".to_string()
}

fn default_scraped_source() -> String {
    "public/results.json".to_string()
}

fn default_page_url() -> String {
    "https://science.nasa.gov/exoplanets/".to_string()
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            catalog: default_catalog_source(),
            scraped: default_scraped_source(),
        }
    }
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            output: default_catalog_source(),
        }
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            url: default_page_url(),
            output: default_scraped_source(),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_dir: default_log_dir(),
            log_retention_days: default_log_retention_days(),
            sources: SourcesConfig::default(),
            extractor: ExtractorConfig::default(),
            archive: ArchiveConfig::default(),
            page: PageConfig::default(),
        }
    }
}

impl BackendConfig {
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config: BackendConfig = toml::from_str(content).context("Failed to parse config")?;
        Ok(config)
    }
}

pub static CONFIG: OnceLock<BackendConfig> = OnceLock::new();

/// Load the config file once for the process.
///
/// A missing file falls back to the defaults; a file that exists but does
/// not parse is an error.
pub fn read_config(path: impl AsRef<Path>) -> anyhow::Result<&'static BackendConfig> {
    let path = path.as_ref();
    let config = if path.exists() {
        BackendConfig::from_file(path)?
    } else {
        tracing::warn!("Config file {:?} not found, using defaults", path);
        BackendConfig::default()
    };

    Ok(CONFIG.get_or_init(|| config))
}
