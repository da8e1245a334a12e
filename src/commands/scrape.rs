//! Scrape command: fetch item pages, extract records, persist them.

use crate::config::Config;
use crate::ebay::{EbayClient, ItemRecord, ItemSource, Parser};
use crate::store;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, warn};

/// Records produced by one run: a single object or a list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scraped {
    Single(ItemRecord),
    Batch(Vec<ItemRecord>),
}

impl Scraped {
    /// Returns the records as a slice.
    pub fn records(&self) -> &[ItemRecord] {
        match self {
            Scraped::Single(record) => std::slice::from_ref(record),
            Scraped::Batch(records) => records,
        }
    }
}

/// Executes scraping over one or many item URLs.
pub struct ScrapeCommand {
    config: Config,
    parser: Parser,
}

impl ScrapeCommand {
    /// Creates a new scrape command.
    pub fn new(config: Config) -> Self {
        let parser = Parser::new().with_strict(config.strict);
        Self { config, parser }
    }

    /// Where records are persisted.
    pub fn output_path(&self) -> &PathBuf {
        &self.config.output
    }

    /// Scrapes `urls`: one URL runs in single mode, several in batch mode.
    ///
    /// With `batch` set in the config a single URL also yields a list.
    pub async fn execute(&self, urls: &[String]) -> Result<Scraped> {
        let client = EbayClient::new(&self.config).await.context("Failed to create HTTP client")?;

        self.execute_with_client(&client, urls).await
    }

    /// Scrapes `urls` with a provided client (for testing).
    pub async fn execute_with_client(
        &self,
        client: &impl ItemSource,
        urls: &[String],
    ) -> Result<Scraped> {
        match urls {
            [] => anyhow::bail!("No URLs given"),
            [url] if !self.config.batch => self.scrape_one(client, url).await.map(Scraped::Single),
            _ => self.scrape_batch(client, urls).await.map(Scraped::Batch),
        }
    }

    /// Fetches and extracts a single item, then persists it.
    ///
    /// A page that comes back without content is an error. The record keeps
    /// `url` exactly as given.
    pub async fn scrape_one(&self, client: &impl ItemSource, url: &str) -> Result<ItemRecord> {
        validate_url(url)?;

        let html = client
            .fetch(url)
            .await?
            .with_context(|| format!("No content returned for {}", url))?;

        let record = self.parser.extract(&html, url)?;
        store::save(&self.config.output, &record)?;

        Ok(record)
    }

    /// Fetches and extracts each item in order, then persists the list.
    ///
    /// URLs that are invalid or return no content are skipped.
    pub async fn scrape_batch(
        &self,
        client: &impl ItemSource,
        urls: &[String],
    ) -> Result<Vec<ItemRecord>> {
        let mut records: Vec<ItemRecord> = Vec::new();

        for url in urls {
            if let Err(e) = validate_url(url) {
                warn!("Skipping {}", e);
                continue;
            }

            match client.fetch(url).await? {
                Some(html) => records.push(self.parser.extract(&html, url)?),
                None => warn!("Skipping {}: no content", url),
            }
        }

        info!("Scraped {} of {} items", records.len(), urls.len());
        store::save(&self.config.output, &records)?;

        Ok(records)
    }
}

/// Checks `url` is an http(s) URL, ignoring surrounding whitespace.
fn validate_url(url: &str) -> Result<()> {
    let trimmed = url.trim();
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        anyhow::bail!("invalid URL: '{}'. Expected an http:// or https:// address.", url);
    }
    Ok(())
}
