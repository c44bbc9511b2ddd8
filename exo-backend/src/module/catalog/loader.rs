use anyhow::{Context, Result};
use exo_common::ExoplanetRecord;
use tracing::{info, warn};

use super::extractor::Extractor;
use super::fallback::fallback_catalog;
use super::source::{
    CatalogSource, RecordOrigin, RecordSource, ResourceLocation, ScrapedSource, build_client,
};
use crate::config::{ExtractorConfig, SourcesConfig};

/// Records plus the path that produced them
#[derive(Debug, Clone)]
pub struct LoadedRecords {
    pub records: Vec<ExoplanetRecord>,
    pub origin: RecordOrigin,
}

/// Ordered fallback chain over record sources.
///
/// Sources are tried one after another; the first non-empty result wins.
/// When every source is skipped the built-in catalog is returned, so
/// [`RecordLoader::load`] cannot fail and never returns an empty list.
pub struct RecordLoader {
    sources: Vec<Box<dyn RecordSource>>,
}

impl RecordLoader {
    pub fn new(sources: Vec<Box<dyn RecordSource>>) -> Self {
        Self { sources }
    }

    /// Catalog first, then scraped content
    pub fn from_config(sources: &SourcesConfig, extractor: &ExtractorConfig) -> Result<Self> {
        Self::standard(
            sources.catalog_location(),
            sources.scraped_location(),
            extractor,
        )
    }

    pub fn standard(
        catalog: ResourceLocation,
        scraped: ResourceLocation,
        extractor: &ExtractorConfig,
    ) -> Result<Self> {
        let client = build_client().context("Failed to build HTTP client")?;
        let extractor =
            Extractor::new(extractor.unit_labels).context("Failed to compile extraction patterns")?;

        Ok(Self::new(vec![
            Box::new(CatalogSource::new(client.clone(), catalog)),
            Box::new(ScrapedSource::new(client, scraped, extractor)),
        ]))
    }

    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    pub async fn load(&self) -> LoadedRecords {
        for source in &self.sources {
            match source.load().await {
                Ok(records) if !records.is_empty() => {
                    info!("Using {} records from {}", records.len(), source.name());
                    return LoadedRecords {
                        records,
                        origin: source.origin(),
                    };
                }
                Ok(_) => {
                    warn!(source = source.name(), "Source returned no records, trying next");
                }
                Err(e) => {
                    warn!(source = source.name(), kind = e.kind().as_str(), "{}, trying next", e);
                }
            }
        }

        let records = fallback_catalog();
        info!("No data resource available, using {} built-in records", records.len());
        LoadedRecords {
            records,
            origin: RecordOrigin::Fallback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::catalog::error::SourceError;
    use crate::module::catalog::fallback::FALLBACK_LEN;
    use async_trait::async_trait;
    use exo_common::{Habitable, PlanetType};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubSource {
        origin: RecordOrigin,
        result: fn() -> Result<Vec<ExoplanetRecord>, SourceError>,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl RecordSource for StubSource {
        fn name(&self) -> &str {
            "stub"
        }

        fn origin(&self) -> RecordOrigin {
            self.origin
        }

        async fn load(&self) -> Result<Vec<ExoplanetRecord>, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.result)()
        }
    }

    fn stub(
        origin: RecordOrigin,
        result: fn() -> Result<Vec<ExoplanetRecord>, SourceError>,
    ) -> (Box<dyn RecordSource>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let source = StubSource {
            origin,
            result,
            calls: calls.clone(),
        };
        (Box::new(source), calls)
    }

    fn one_record() -> Result<Vec<ExoplanetRecord>, SourceError> {
        Ok(vec![ExoplanetRecord::new(
            "Kepler-22b",
            PlanetType::SuperEarth,
            Habitable::No,
            "d",
        )])
    }

    #[tokio::test]
    async fn test_first_success_wins() {
        let (first, first_calls) = stub(RecordOrigin::Catalog, one_record);
        let (second, second_calls) = stub(RecordOrigin::Scraped, one_record);

        let loaded = RecordLoader::new(vec![first, second]).load().await;
        assert_eq!(loaded.origin, RecordOrigin::Catalog);
        assert_eq!(loaded.records.len(), 1);
        assert_eq!(first_calls.load(Ordering::SeqCst), 1);
        assert_eq!(second_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_errors_fall_through_in_order() {
        let (first, _) = stub(RecordOrigin::Catalog, || {
            Err(SourceError::malformed("catalog", "bad json"))
        });
        let (second, second_calls) = stub(RecordOrigin::Scraped, one_record);

        let loaded = RecordLoader::new(vec![first, second]).load().await;
        assert_eq!(loaded.origin, RecordOrigin::Scraped);
        assert_eq!(second_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_everything_skipped_uses_fallback() {
        let (first, _) = stub(RecordOrigin::Catalog, || {
            Err(SourceError::unavailable("catalog", "404"))
        });
        let (second, _) = stub(RecordOrigin::Scraped, || Ok(Vec::new()));

        let loaded = RecordLoader::new(vec![first, second]).load().await;
        assert_eq!(loaded.origin, RecordOrigin::Fallback);
        assert_eq!(loaded.records, fallback_catalog());
    }

    #[tokio::test]
    async fn test_no_sources_still_loads() {
        let loaded = RecordLoader::new(Vec::new()).load().await;
        assert_eq!(loaded.records.len(), FALLBACK_LEN);
    }

    #[tokio::test]
    async fn test_missing_files_use_fallback() {
        let loader = RecordLoader::standard(
            ResourceLocation::parse("no/such/all_exoplanets.json"),
            ResourceLocation::parse("no/such/results.json"),
            &ExtractorConfig::default(),
        )
        .unwrap();
        assert_eq!(loader.source_names(), vec![CatalogSource::NAME, ScrapedSource::NAME]);

        let loaded = loader.load().await;
        assert_eq!(loaded.origin, RecordOrigin::Fallback);
        assert!(loaded.records.len() >= FALLBACK_LEN);
    }
}
