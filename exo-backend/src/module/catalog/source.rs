//! Record sources tried by the loader
//!
//! Each source reads one resource (a local file or an http(s) URL) and
//! turns it into records, or reports why it could not.

use async_trait::async_trait;
use exo_common::{ExoplanetRecord, ScrapedContent};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::error::SourceError;
use super::extractor::Extractor;

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT: &str = "Mozilla/5.0 (compatible; ExoplanetResearch/1.0)";

/// Which loading path produced a record list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordOrigin {
    Catalog,
    Scraped,
    Fallback,
}

impl RecordOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordOrigin::Catalog => "catalog",
            RecordOrigin::Scraped => "scraped",
            RecordOrigin::Fallback => "fallback",
        }
    }
}

impl fmt::Display for RecordOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a resource lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceLocation {
    File(PathBuf),
    Url(String),
}

impl ResourceLocation {
    /// `http://` and `https://` strings are URLs, anything else a path
    pub fn parse(location: &str) -> Self {
        let trimmed = location.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            ResourceLocation::Url(trimmed.to_string())
        } else {
            ResourceLocation::File(PathBuf::from(trimmed))
        }
    }
}

impl fmt::Display for ResourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceLocation::File(path) => write!(f, "{}", path.display()),
            ResourceLocation::Url(url) => f.write_str(url),
        }
    }
}

/// HTTP client shared by the URL-backed sources
pub fn build_client() -> reqwest::Result<Client> {
    Client::builder()
        .timeout(FETCH_TIMEOUT)
        .user_agent(USER_AGENT)
        .build()
}

/// Read a resource to a string. Every failure is "unavailable".
async fn fetch_text(
    client: &Client,
    location: &ResourceLocation,
    source_name: &str,
) -> Result<String, SourceError> {
    debug!("Reading {} from {}", source_name, location);

    match location {
        ResourceLocation::File(path) => tokio::fs::read_to_string(path)
            .await
            .map_err(|e| SourceError::unavailable(source_name, format!("{}: {}", path.display(), e))),
        ResourceLocation::Url(url) => {
            let response = client
                .get(url)
                .send()
                .await
                .map_err(|e| SourceError::unavailable(source_name, e))?;

            if !response.status().is_success() {
                return Err(SourceError::unavailable(
                    source_name,
                    format!("HTTP {}", response.status()),
                ));
            }

            response
                .text()
                .await
                .map_err(|e| SourceError::unavailable(source_name, e))
        }
    }
}

/// One step of the loader's fallback chain
#[async_trait]
pub trait RecordSource: Send + Sync {
    fn name(&self) -> &str;

    fn origin(&self) -> RecordOrigin;

    /// A non-empty record list, or the reason this source is skipped
    async fn load(&self) -> Result<Vec<ExoplanetRecord>, SourceError>;
}

/// The pre-built comprehensive catalog; records pass through unchanged
pub struct CatalogSource {
    client: Client,
    location: ResourceLocation,
}

impl CatalogSource {
    pub const NAME: &'static str = "comprehensive catalog";

    pub fn new(client: Client, location: ResourceLocation) -> Self {
        Self { client, location }
    }
}

#[async_trait]
impl RecordSource for CatalogSource {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn origin(&self) -> RecordOrigin {
        RecordOrigin::Catalog
    }

    async fn load(&self) -> Result<Vec<ExoplanetRecord>, SourceError> {
        let text = fetch_text(&self.client, &self.location, Self::NAME).await?;

        let document: RawCatalog = serde_json::from_str(&text)
            .map_err(|e| SourceError::malformed(Self::NAME, e))?;

        if document.exoplanets.is_empty() {
            return Err(SourceError::empty(Self::NAME));
        }

        let total = document.exoplanets.len();
        let mut records = Vec::with_capacity(total);
        for (index, entry) in document.exoplanets.into_iter().enumerate() {
            match catalog_entry(entry) {
                Ok(record) => records.push(record),
                Err(reason) => warn!(index, "Skipping catalog entry: {}", reason),
            }
        }

        if records.is_empty() {
            return Err(SourceError::malformed(
                Self::NAME,
                format!("none of {} entries is a valid record", total),
            ));
        }

        info!(
            "Loaded {} of {} exoplanets from comprehensive catalog {}",
            records.len(),
            total,
            self.location
        );
        Ok(records)
    }
}

/// Only the list is required; metadata and entries are checked separately
#[derive(Deserialize)]
struct RawCatalog {
    exoplanets: Vec<Value>,
}

/// One catalog entry as a record. Fields the record does not name are
/// carried along untouched; a blank name or a `type`/`habitable` outside
/// the known values rejects the entry.
fn catalog_entry(entry: Value) -> Result<ExoplanetRecord, String> {
    let record: ExoplanetRecord = serde_json::from_value(entry).map_err(|e| e.to_string())?;
    if record.name.trim().is_empty() {
        return Err("empty name".to_string());
    }
    Ok(record)
}

/// Raw scraped page text run through the [`Extractor`]
pub struct ScrapedSource {
    client: Client,
    location: ResourceLocation,
    extractor: Extractor,
}

impl ScrapedSource {
    pub const NAME: &'static str = "scraped content";

    pub fn new(client: Client, location: ResourceLocation, extractor: Extractor) -> Self {
        Self {
            client,
            location,
            extractor,
        }
    }
}

#[async_trait]
impl RecordSource for ScrapedSource {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn origin(&self) -> RecordOrigin {
        RecordOrigin::Scraped
    }

    async fn load(&self) -> Result<Vec<ExoplanetRecord>, SourceError> {
        let text = fetch_text(&self.client, &self.location, Self::NAME).await?;

        let content: ScrapedContent = serde_json::from_str(&text)
            .map_err(|e| SourceError::malformed(Self::NAME, e))?;

        let records = self.extractor.extract_records(&content);
        if records.is_empty() {
            return Err(SourceError::empty(Self::NAME));
        }

        info!(
            "Extracted {} exoplanets from {} scraped paragraphs",
            records.len(),
            content.paragraphs.len()
        );
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::catalog::UnitLabels;
    use crate::module::catalog::error::SourceErrorKind;

    fn client() -> Client {
        build_client().unwrap()
    }

    #[test]
    fn test_parse_location() {
        assert_eq!(
            ResourceLocation::parse("https://example.org/results.json"),
            ResourceLocation::Url("https://example.org/results.json".to_string())
        );
        assert_eq!(
            ResourceLocation::parse(" public/results.json "),
            ResourceLocation::File(PathBuf::from("public/results.json"))
        );
    }

    #[tokio::test]
    async fn test_missing_file_is_unavailable() {
        let source = CatalogSource::new(
            client(),
            ResourceLocation::File(PathBuf::from("definitely/not/here.json")),
        );
        let err = source.load().await.unwrap_err();
        assert_eq!(err.kind(), SourceErrorKind::Unavailable);
    }

    #[tokio::test]
    async fn test_catalog_without_list_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("all_exoplanets.json");
        std::fs::write(&path, r#"{"metadata": null, "planets": []}"#).unwrap();

        let source = CatalogSource::new(client(), ResourceLocation::File(path));
        let err = source.load().await.unwrap_err();
        assert_eq!(err.kind(), SourceErrorKind::Malformed);
    }

    #[tokio::test]
    async fn test_bad_entries_skipped_rest_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("all_exoplanets.json");
        std::fs::write(
            &path,
            r#"{"exoplanets": [
                {"name": "Kepler-22 b", "type": "Super Earth", "habitable": "No", "description": "a",
                 "eccentricity": 0.1, "pl_custom_flag": 1},
                {"name": "K2-18 b", "type": "Unknown", "habitable": "Unknown", "description": "b"},
                {"name": "  ", "type": "Terrestrial", "habitable": "Yes", "description": "c"},
                {"name": "WASP-12 b", "type": "Gas Giant", "habitable": "No", "description": "d"}
            ]}"#,
        )
        .unwrap();

        let source = CatalogSource::new(client(), ResourceLocation::File(path));
        let records = source.load().await.unwrap();
        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Kepler-22 b", "WASP-12 b"]);
        assert_eq!(records[0].eccentricity, Some(0.1));
        assert_eq!(records[0].extra["pl_custom_flag"], 1);
    }

    #[tokio::test]
    async fn test_catalog_with_only_bad_entries_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("all_exoplanets.json");
        std::fs::write(
            &path,
            r#"{"exoplanets": [{"name": "", "type": "Unknown", "habitable": "No", "description": ""}]}"#,
        )
        .unwrap();

        let source = CatalogSource::new(client(), ResourceLocation::File(path));
        let err = source.load().await.unwrap_err();
        assert_eq!(err.kind(), SourceErrorKind::Malformed);
    }

    #[tokio::test]
    async fn test_empty_catalog_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("all_exoplanets.json");
        std::fs::write(&path, r#"{"exoplanets": []}"#).unwrap();

        let source = CatalogSource::new(client(), ResourceLocation::File(path));
        let err = source.load().await.unwrap_err();
        assert_eq!(err.kind(), SourceErrorKind::Empty);
    }

    #[tokio::test]
    async fn test_scraped_source_extracts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.json");
        std::fs::write(
            &path,
            r#"{"headings": [{"tag": "h1", "text": "Exoplanets"}],
                "paragraphs": ["Kepler-22b is a super earth found in 2011."]}"#,
        )
        .unwrap();

        let extractor = Extractor::new(UnitLabels::Historical).unwrap();
        let source = ScrapedSource::new(client(), ResourceLocation::File(path), extractor);
        let records = source.load().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Kepler-22b");
        assert_eq!(records[0].year.as_deref(), Some("2011"));
        assert_eq!(source.origin(), RecordOrigin::Scraped);
    }
}
