// Connecticut Brand Registry Ingestion Module
//
// Ingests the CT consumer product brand dataset, a lab-measurement feed
// published through the Socrata Open Data API.
//
// Socrata documentation:
//   https://dev.socrata.com/foundry/data.ct.gov/egd5-wb6r
//
// Pipeline shape:
// - Fetch: paginated HTTP client with an incremental disk cache
// - Decode: serde models with the Measure value domain for analyte text
// - Clean: per-record validity filter
// - Export: CSV artifact for downstream consumers

pub mod config;
pub mod export;
pub mod fetch;
pub mod measure;
pub mod models;
pub mod validate;

// Re-export main types
pub use config::{CtBrandsConfig, DEFAULT_BRANDS_URL};
pub use export::{write_brands_csv, BRANDS_CSV_FILE};
pub use fetch::{BrandClient, BRANDS_JSON_FILE};
pub use measure::Measure;
pub use models::{Brand, Image};
pub use validate::{clean_brands, is_brand_erroneous};
