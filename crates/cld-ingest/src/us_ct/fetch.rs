//! Paginated fetch of the CT brand dataset with incremental caching
//!
//! A fetch session retrieves the complete brand collection exactly once:
//! a fresh cache artifact short-circuits the network entirely, otherwise
//! pages are requested sequentially and streamed into a new artifact as
//! they arrive. Any failure before the final commit drops the cache
//! writer, which deletes the in-progress artifact — a session never
//! leaves a truncated blob behind and never returns a partial record set.

use cld_common::cache::CacheStore;
use cld_common::{CldError, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::config::CtBrandsConfig;
use super::models::Brand;

/// Cache artifact name for the brand dataset
pub const BRANDS_JSON_FILE: &str = "us_ct_brands.json";

/// Stable sort key making pagination deterministic across requests
const ORDER_FIELD: &str = "registration_number";

/// HTTP client for the CT brand feed
pub struct BrandClient {
    client: Client,
    config: CtBrandsConfig,
}

impl BrandClient {
    /// Create a new client with the given configuration
    pub fn new(config: CtBrandsConfig) -> Result<Self> {
        config.validate().map_err(CldError::Config)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent("cld-ingest/0.1")
            .build()
            .map_err(|e| CldError::Network(e.to_string()))?;

        Ok(BrandClient { client, config })
    }

    /// Configuration in use
    pub fn config(&self) -> &CtBrandsConfig {
        &self.config
    }

    /// Fetch the complete brand collection, reusing a fresh cache artifact
    /// when one exists.
    ///
    /// On a cache miss the collection is paged through in
    /// `batch_limit`-sized requests ordered by registration number; each
    /// page's records are appended to both the in-memory result and the
    /// cache artifact. The loop stops at the first short page, so a
    /// collection of exactly `k * batch_limit` records costs one extra
    /// empty-page request.
    pub async fn fetch_brands(&self, cache: &CacheStore) -> Result<Vec<Brand>> {
        match self.read_cached_brands(cache) {
            Ok(brands) => {
                info!(count = brands.len(), "loaded brands from cache");
                return Ok(brands);
            }
            Err(e) if e.is_cache_soft() => {
                // Missing, stale or unreadable: fall through to a fetch.
                debug!(reason = %e, "cache not usable");
            }
            Err(e) => return Err(e),
        }

        let mut writer = cache.begin_write(BRANDS_JSON_FILE)?;
        writer.write_all(b"[")?;

        let mut brands: Vec<Brand> = Vec::new();
        let mut offset = 0usize;
        let mut first_written = true;
        loop {
            let body = self.fetch_page(offset).await?;

            let batch: Vec<Brand> = serde_json::from_str(&body)
                .map_err(|e| CldError::PageDecode(format!("offset {offset}: {e}")))?;
            debug!(offset, count = batch.len(), "fetched page");

            // Each page body is itself a bracketed array; strip the
            // brackets so the artifact stays one flat array.
            let trimmed = body.trim();
            let trimmed = trimmed.strip_prefix('[').unwrap_or(trimmed);
            let trimmed = trimmed.strip_suffix(']').unwrap_or(trimmed).trim();
            if !trimmed.is_empty() {
                if !first_written {
                    writer.write_all(b",")?;
                }
                first_written = false;
                writer.write_all(trimmed.as_bytes())?;
            }

            let fetched = batch.len();
            brands.extend(batch);

            // Sole termination rule: a short page ends the collection.
            if fetched < self.config.batch_limit {
                break;
            }
            offset += self.config.batch_limit;
        }

        writer.write_all(b"]")?;
        writer.commit()?;

        info!(count = brands.len(), "fetched brands from remote");
        Ok(brands)
    }

    /// Read and decode a fresh cache artifact.
    ///
    /// A fresh artifact that no longer decodes is reported as
    /// [`CldError::CacheDecode`] rather than a hard failure, so the caller
    /// treats it like any other unusable cache and refetches.
    fn read_cached_brands(&self, cache: &CacheStore) -> Result<Vec<Brand>> {
        let bytes = cache.read_if_fresh(BRANDS_JSON_FILE, self.config.max_cache_age())?;
        serde_json::from_slice::<Vec<Brand>>(&bytes).map_err(|e| {
            warn!(error = %e, "cache artifact unreadable, refetching");
            CldError::CacheDecode(format!("{BRANDS_JSON_FILE}: {e}"))
        })
    }

    /// Request a single page, returning the raw body text.
    async fn fetch_page(&self, offset: usize) -> Result<String> {
        let mut params = vec![
            ("$order".to_string(), ORDER_FIELD.to_string()),
            ("$offset".to_string(), offset.to_string()),
            ("$limit".to_string(), self.config.batch_limit.to_string()),
        ];
        if let Some(token) = &self.config.app_token {
            params.push(("$$app_token".to_string(), token.clone()));
        }

        let response = self
            .client
            .get(&self.config.base_url)
            .query(&params)
            .send()
            .await
            .map_err(|e| CldError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CldError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(CldError::HttpStatus {
                status: status.as_u16(),
                status_text: status
                    .canonical_reason()
                    .unwrap_or("unknown status")
                    .to_string(),
                body,
            });
        }

        Ok(body)
    }
}
