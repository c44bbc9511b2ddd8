//! NASA Exoplanet Archive TAP client

use anyhow::{Context, Result};
use reqwest::{Client, Url};
use std::time::Duration;
use tracing::{info, warn};

use super::types::ArchiveRow;

const ARCHIVE_BASE_URL: &str = "https://exoplanetarchive.ipac.caltech.edu";
const TAP_SYNC_PATH: &str = "/TAP/sync";

const FULL_COLUMNS: &str = "pl_name,hostname,pl_orbper,pl_rade,pl_bmasse,pl_eqt,pl_orbincl,\
pl_orbeccen,pl_trandep,pl_trandur,pl_a,pl_dens,pl_insol,pl_logg,pl_massj,pl_radj";
const NARROW_COLUMNS: &str = "pl_name,hostname,pl_orbper,pl_rade,pl_bmasse,pl_eqt";

/// Tables queried in order; later duplicates are dropped by the builder
const TABLES: [&str; 2] = ["ps", "pscomppars"];

/// Pause between queries
const DEFAULT_REQUEST_DELAY: Duration = Duration::from_secs(2);

pub struct ArchiveClient {
    client: Client,
    base_url: String,
    request_delay: Duration,
}

impl ArchiveClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(ARCHIVE_BASE_URL, DEFAULT_REQUEST_DELAY)
    }

    pub fn with_base_url(base_url: &str, request_delay: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (compatible; ExoplanetResearch/1.0)")
            .build()
            .context("Failed to build archive HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            request_delay,
        })
    }

    /// Run one ADQL query and decode the JSON rows
    pub async fn query(&self, adql: &str) -> Result<Vec<ArchiveRow>> {
        let url = Url::parse_with_params(
            &format!("{}{}", self.base_url, TAP_SYNC_PATH),
            &[("query", adql), ("format", "json")],
        )
        .context("Invalid archive URL")?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to query exoplanet archive")?
            .error_for_status()
            .context("Exoplanet archive returned an error status")?;

        let rows: Vec<ArchiveRow> = response
            .json()
            .await
            .context("Failed to decode exoplanet archive rows")?;

        Ok(rows)
    }

    /// Rows from every table, in table order.
    ///
    /// A failing table query is retried once with a narrower column list;
    /// if that succeeds no further tables are queried. Failures are logged,
    /// never returned.
    pub async fn fetch_all(&self) -> Vec<ArchiveRow> {
        let mut rows = Vec::new();

        for (i, table) in TABLES.iter().enumerate() {
            info!("Querying archive table {} ({}/{})", table, i + 1, TABLES.len());

            match self.query(&select(FULL_COLUMNS, table)).await {
                Ok(batch) => {
                    info!("Retrieved {} rows from {}", batch.len(), table);
                    rows.extend(batch);
                }
                Err(e) => {
                    warn!("Archive query on {} failed: {:#}", table, e);
                    match self.query(&select(NARROW_COLUMNS, "ps")).await {
                        Ok(batch) => {
                            info!("Retrieved {} rows from narrow query", batch.len());
                            rows.extend(batch);
                            break;
                        }
                        Err(e) => {
                            warn!("Narrow archive query failed too: {:#}", e);
                            continue;
                        }
                    }
                }
            }

            if i + 1 < TABLES.len() && !self.request_delay.is_zero() {
                tokio::time::sleep(self.request_delay).await;
            }
        }

        rows
    }
}

fn select(columns: &str, table: &str) -> String {
    format!("select {} from {}", columns, table)
}
