//! CLD Ingest Library
//!
//! Tools for ingesting consumer product lab datasets from public
//! regulatory sources.
//!
//! # Supported Data Sources
//!
//! - **US / Connecticut**: approved brand registry with cannabinoid and
//!   terpene lab panels, served through the Socrata Open Data API
//!
//! # Example
//!
//! ```no_run
//! use cld_common::cache::CacheStore;
//! use cld_ingest::us_ct::{clean_brands, BrandClient, CtBrandsConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let cache = CacheStore::new("./.cld/cache");
//!     let client = BrandClient::new(CtBrandsConfig::default())?;
//!     let brands = client.fetch_brands(&cache).await?;
//!     let brands = clean_brands(brands);
//!     println!("{} clean records", brands.len());
//!     Ok(())
//! }
//! ```

pub mod us_ct;
