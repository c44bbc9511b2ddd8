//! Overview page scraper
//!
//! Checks robots.txt, fetches the page and parses it into the
//! scraped-content resource read by the record loader.

use anyhow::{Context, Result, bail};
use exo_common::ScrapedContent;
use reqwest::{Client, Response, StatusCode, Url};
use std::path::Path;
use std::time::Duration;
use tokio::fs;
use tracing::{debug, info, warn};

use super::parser::parse_page;
use super::robots::{allowed_by_robots, robots_url};
use crate::module::catalog::source::build_client;

/// Token matched against robots.txt `User-agent` lines
const ROBOTS_AGENT: &str = "ExoplanetResearch";

/// Extra attempts after the first one
const MAX_RETRIES: u32 = 3;
const DEFAULT_BACKOFF: Duration = Duration::from_millis(500);

/// Statuses worth asking again for
fn is_retryable(status: StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 502 | 503 | 504)
}

pub struct PageScraper {
    client: Client,
    backoff: Duration,
}

impl PageScraper {
    pub fn new() -> Result<Self> {
        Self::with_backoff(DEFAULT_BACKOFF)
    }

    /// `backoff` doubles after every failed attempt
    pub fn with_backoff(backoff: Duration) -> Result<Self> {
        let client = build_client().context("Failed to build page HTTP client")?;
        Ok(Self { client, backoff })
    }

    /// GET with bounded retries on transport errors and retryable statuses.
    /// The last response is returned whatever its status.
    async fn get_with_retry(&self, url: &Url) -> reqwest::Result<Response> {
        let mut delay = self.backoff;
        let mut attempt = 0;
        loop {
            match self.client.get(url.clone()).send().await {
                Ok(response) if attempt < MAX_RETRIES && is_retryable(response.status()) => {
                    warn!("{} returned {}, retrying in {:?}", url, response.status(), delay);
                }
                Err(e) if attempt < MAX_RETRIES && !e.is_builder() => {
                    warn!("Request to {} failed: {}, retrying in {:?}", url, e, delay);
                }
                result => return result,
            }
            attempt += 1;
            tokio::time::sleep(delay).await;
            delay *= 2;
        }
    }

    /// Whether robots.txt lets us fetch `page`. A robots.txt that cannot be
    /// read permits scraping.
    pub async fn is_allowed(&self, page: &Url) -> bool {
        let Some(robots) = robots_url(page) else {
            return true;
        };

        let response = match self.get_with_retry(&robots).await {
            Ok(response) if response.status().is_success() => response,
            Ok(response) => {
                debug!("No robots.txt at {} ({})", robots, response.status());
                return true;
            }
            Err(e) => {
                debug!("Could not fetch {}: {}", robots, e);
                return true;
            }
        };

        match response.text().await {
            Ok(text) => allowed_by_robots(&text, ROBOTS_AGENT),
            Err(_) => true,
        }
    }

    /// Fetch and parse one page, refusing when robots.txt forbids it
    pub async fn scrape(&self, url: &str) -> Result<ScrapedContent> {
        let page = Url::parse(url).with_context(|| format!("Invalid page URL {}", url))?;

        if !self.is_allowed(&page).await {
            bail!("robots.txt disallows scraping {}", url);
        }

        info!("Fetching exoplanet page {}", url);
        let html = self
            .get_with_retry(&page)
            .await
            .with_context(|| format!("Failed to GET {}", url))?
            .error_for_status()
            .with_context(|| format!("{} returned an error status", url))?
            .text()
            .await
            .context("Failed to read page body")?;

        let content = parse_page(&html, url)?;
        if content.paragraphs.is_empty() {
            warn!("No paragraphs found on {}", url);
        }
        info!(
            "Parsed {} headings and {} paragraphs from {}",
            content.headings.len(),
            content.paragraphs.len(),
            url
        );
        Ok(content)
    }

    /// Write scraped content as pretty JSON, creating parent directories
    pub async fn save(content: &ScrapedContent, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory {:?}", parent))?;
        }

        let json = serde_json::to_string_pretty(content).context("Failed to serialize page content")?;
        fs::write(path, json)
            .await
            .with_context(|| format!("Failed to write page content to {:?}", path))?;

        info!("Saved scraped content to {:?}", path);
        Ok(())
    }
}
