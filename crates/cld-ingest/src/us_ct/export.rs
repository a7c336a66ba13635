//! CSV export of cleaned brand records
//!
//! Writes the brand CSV artifact through a [`CacheWriter`] so it gets the
//! same commit-or-delete semantics as the JSON cache. Field quoting is
//! owned by the csv crate.

use cld_common::cache::CacheStore;
use cld_common::Result;
use tracing::info;

use super::models::Brand;

/// Cache artifact name for the CSV export
pub const BRANDS_CSV_FILE: &str = "us_ct_brands.csv";

/// Timestamp format used in the CSV output
const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Fixed non-measurement columns, in output order
const HEAD_COLUMNS: [&str; 11] = [
    "brand_name",
    "dosage_form",
    "branding_entity",
    "product_image_url",
    "product_image_desc",
    "label_image_url",
    "label_image_desc",
    "lab_analysis_url",
    "lab_analysis_desc",
    "approval_date",
    "registration_number",
];

/// Trailing descriptive columns, in output order
const TAIL_COLUMNS: [&str; 5] = [
    "market",
    "chemotype",
    "processing_technique",
    "solvents_used",
    "national_drug_code",
];

/// Write the full brand CSV artifact into the cache store.
pub fn write_brands_csv(cache: &CacheStore, brands: &[Brand]) -> Result<()> {
    let buffer = render_csv(brands).map_err(|e| std::io::Error::other(e.to_string()))?;

    let mut writer = cache.begin_write(BRANDS_CSV_FILE)?;
    writer.write_all(&buffer)?;
    writer.commit()?;

    info!(
        count = brands.len(),
        artifact = %cache.path_for(BRANDS_CSV_FILE).display(),
        "wrote brand CSV"
    );
    Ok(())
}

/// Render the header row plus one row per record.
fn render_csv(brands: &[Brand]) -> std::result::Result<Vec<u8>, csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(Vec::new());
    csv_writer.write_record(csv_headers())?;
    for brand in brands {
        csv_writer.write_record(csv_record(brand))?;
    }
    csv_writer
        .into_inner()
        .map_err(|e| csv::Error::from(std::io::Error::other(e.to_string())))
}

/// Header row: fixed columns plus the declared measurement columns.
fn csv_headers() -> Vec<String> {
    let probe = Brand::default();
    let mut headers: Vec<String> = HEAD_COLUMNS.iter().map(|c| c.to_string()).collect();
    headers.extend(probe.measurements().iter().map(|(name, _)| name.to_string()));
    headers.extend(TAIL_COLUMNS.iter().map(|c| c.to_string()));
    headers
}

/// One CSV row for a brand record.
fn csv_record(brand: &Brand) -> Vec<String> {
    let approval = brand
        .approval_date
        .map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_default();

    let mut fields = vec![
        brand.brand_name.clone(),
        brand.dosage_form.clone(),
        brand.branding_entity.clone(),
        brand.product_image.url.clone(),
        brand.product_image.description.clone(),
        brand.label_image.url.clone(),
        brand.label_image.description.clone(),
        brand.lab_analysis.url.clone(),
        brand.lab_analysis.description.clone(),
        approval,
        brand.registration_number.clone(),
    ];
    fields.extend(brand.measurements().iter().map(|(_, m)| m.as_csv()));
    fields.extend([
        brand.market.clone(),
        brand.chemotype.clone(),
        brand.processing_technique.clone(),
        brand.solvents_used.clone(),
        brand.national_drug_code.clone(),
    ]);
    fields
}
