//! CLD Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared infrastructure for the CLD (consumer lab data) workspace.
//!
//! # Overview
//!
//! This crate provides common functionality used across all CLD workspace
//! members:
//!
//! - **Error Handling**: the [`CldError`] taxonomy and [`Result`] alias
//! - **Caching**: file-backed artifact cache with freshness gating
//! - **Logging**: tracing subscriber configuration and initialization
//!
//! # Example
//!
//! ```no_run
//! use cld_common::cache::CacheStore;
//! use std::time::Duration;
//!
//! fn warm_start() -> cld_common::Result<Vec<u8>> {
//!     let store = CacheStore::new("./.cld/cache");
//!     store.read_if_fresh("us_ct_brands.json", Duration::from_secs(3600))
//! }
//! ```

pub mod cache;
pub mod error;
pub mod logging;

// Re-export commonly used types
pub use error::{CldError, Result};
