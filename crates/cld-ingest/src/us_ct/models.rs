//! Record types for the CT brand registry feed
//!
//! One [`Brand`] per approved product registration, decoded straight from
//! a Socrata JSON page. Socrata omits columns with no value, so every
//! field defaults; a missing measurement column decodes to
//! [`Measure::Empty`]. Records are read-only after decode — the cleaning
//! pass drops bad records, it never edits them.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::measure::Measure;

/// An image or document attachment on a brand record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Image {
    /// URL to the image
    #[serde(default)]
    pub url: String,
    /// Description of the image
    #[serde(default)]
    pub description: String,
}

/// Raw brand record from the CT registry
///
/// The measurement fields cover the cannabinoid and terpene panel the lab
/// reports; all of them share the [`Measure`] value domain.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Brand {
    #[serde(default)]
    pub brand_name: String,
    #[serde(default)]
    pub dosage_form: String,
    #[serde(default)]
    pub branding_entity: String,
    #[serde(default)]
    pub product_image: Image,
    #[serde(default)]
    pub label_image: Image,
    #[serde(default)]
    pub lab_analysis: Image,
    #[serde(default)]
    pub approval_date: Option<NaiveDateTime>,
    /// Registration number: the record identity and the feed's stable
    /// pagination sort key
    #[serde(default)]
    pub registration_number: String,
    #[serde(default)]
    pub tetrahydrocannabinol_thc: Measure,
    #[serde(default)]
    pub tetrahydrocannabinol_acid_thca: Measure,
    #[serde(default)]
    pub cannabidiols_cbd: Measure,
    #[serde(default)]
    pub cannabidiol_acid_cbda: Measure,
    #[serde(default)]
    pub a_pinene: Measure,
    #[serde(default)]
    pub b_myrcene: Measure,
    #[serde(default)]
    pub b_caryophyllene: Measure,
    #[serde(default)]
    pub b_pinene: Measure,
    #[serde(default)]
    pub limonene: Measure,
    #[serde(default)]
    pub ocimene: Measure,
    #[serde(default)]
    pub linalool_lin: Measure,
    #[serde(default)]
    pub humulene_hum: Measure,
    #[serde(default)]
    pub cbg: Measure,
    #[serde(default)]
    pub cbg_a: Measure,
    #[serde(default)]
    pub cannabavarin_cbdv: Measure,
    #[serde(default)]
    pub cannabichromene_cbc: Measure,
    #[serde(default)]
    pub cannbinol_cbn: Measure,
    #[serde(default)]
    pub tetrahydrocannabivarin_thcv: Measure,
    #[serde(default)]
    pub a_bisabolol: Measure,
    #[serde(default)]
    pub a_phellandrene: Measure,
    #[serde(default)]
    pub a_terpinene: Measure,
    #[serde(default)]
    pub b_eudesmol: Measure,
    #[serde(default)]
    pub b_terpinene: Measure,
    #[serde(default)]
    pub fenchone: Measure,
    #[serde(default)]
    pub pulegol: Measure,
    #[serde(default)]
    pub borneol: Measure,
    #[serde(default)]
    pub isopulegol: Measure,
    #[serde(default)]
    pub carene: Measure,
    #[serde(default)]
    pub camphene: Measure,
    #[serde(default)]
    pub camphor: Measure,
    #[serde(default)]
    pub caryophyllene_oxide: Measure,
    #[serde(default)]
    pub cedrol: Measure,
    #[serde(default)]
    pub eucalyptol: Measure,
    #[serde(default)]
    pub geraniol: Measure,
    #[serde(default)]
    pub guaiol: Measure,
    #[serde(default)]
    pub geranyl_acetate: Measure,
    #[serde(default)]
    pub isoborneol: Measure,
    #[serde(default)]
    pub menthol: Measure,
    #[serde(default)]
    pub l_fenchone: Measure,
    #[serde(default)]
    pub nerol: Measure,
    #[serde(default)]
    pub sabinene: Measure,
    #[serde(default)]
    pub terpineol: Measure,
    #[serde(default)]
    pub terpinolene: Measure,
    #[serde(default)]
    pub trans_b_farnesene: Measure,
    #[serde(default)]
    pub valencene: Measure,
    #[serde(default)]
    pub a_cedrene: Measure,
    #[serde(default)]
    pub a_farnesene: Measure,
    #[serde(default)]
    pub b_farnesene: Measure,
    #[serde(default)]
    pub cis_nerolidol: Measure,
    #[serde(default)]
    pub fenchol: Measure,
    #[serde(default)]
    pub trans_nerolidol: Measure,
    #[serde(default)]
    pub market: String,
    #[serde(default)]
    pub chemotype: String,
    #[serde(default)]
    pub processing_technique: String,
    #[serde(default)]
    pub solvents_used: String,
    #[serde(default)]
    pub national_drug_code: String,
}

/// Number of measurement fields on a [`Brand`]
pub const MEASUREMENT_COUNT: usize = 51;

impl Brand {
    /// The declared list of measurement fields, as (column name, value)
    /// pairs.
    ///
    /// The validator and the exporters iterate this list instead of
    /// naming fifty-odd fields each; extending the analyte panel means
    /// extending this table.
    pub fn measurements(&self) -> [(&'static str, Measure); MEASUREMENT_COUNT] {
        [
            ("tetrahydrocannabinol_thc", self.tetrahydrocannabinol_thc),
            (
                "tetrahydrocannabinol_acid_thca",
                self.tetrahydrocannabinol_acid_thca,
            ),
            ("cannabidiols_cbd", self.cannabidiols_cbd),
            ("cannabidiol_acid_cbda", self.cannabidiol_acid_cbda),
            ("a_pinene", self.a_pinene),
            ("b_myrcene", self.b_myrcene),
            ("b_caryophyllene", self.b_caryophyllene),
            ("b_pinene", self.b_pinene),
            ("limonene", self.limonene),
            ("ocimene", self.ocimene),
            ("linalool_lin", self.linalool_lin),
            ("humulene_hum", self.humulene_hum),
            ("cbg", self.cbg),
            ("cbg_a", self.cbg_a),
            ("cannabavarin_cbdv", self.cannabavarin_cbdv),
            ("cannabichromene_cbc", self.cannabichromene_cbc),
            ("cannbinol_cbn", self.cannbinol_cbn),
            (
                "tetrahydrocannabivarin_thcv",
                self.tetrahydrocannabivarin_thcv,
            ),
            ("a_bisabolol", self.a_bisabolol),
            ("a_phellandrene", self.a_phellandrene),
            ("a_terpinene", self.a_terpinene),
            ("b_eudesmol", self.b_eudesmol),
            ("b_terpinene", self.b_terpinene),
            ("fenchone", self.fenchone),
            ("pulegol", self.pulegol),
            ("borneol", self.borneol),
            ("isopulegol", self.isopulegol),
            ("carene", self.carene),
            ("camphene", self.camphene),
            ("camphor", self.camphor),
            ("caryophyllene_oxide", self.caryophyllene_oxide),
            ("cedrol", self.cedrol),
            ("eucalyptol", self.eucalyptol),
            ("geraniol", self.geraniol),
            ("guaiol", self.guaiol),
            ("geranyl_acetate", self.geranyl_acetate),
            ("isoborneol", self.isoborneol),
            ("menthol", self.menthol),
            ("l_fenchone", self.l_fenchone),
            ("nerol", self.nerol),
            ("sabinene", self.sabinene),
            ("terpineol", self.terpineol),
            ("terpinolene", self.terpinolene),
            ("trans_b_farnesene", self.trans_b_farnesene),
            ("valencene", self.valencene),
            ("a_cedrene", self.a_cedrene),
            ("a_farnesene", self.a_farnesene),
            ("b_farnesene", self.b_farnesene),
            ("cis_nerolidol", self.cis_nerolidol),
            ("fenchol", self.fenchol),
            ("trans_nerolidol", self.trans_nerolidol),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_sparse_socrata_record() {
        // Socrata drops empty columns entirely; everything absent must
        // default cleanly.
        let json = r#"{
            "brand_name": "Example Flower",
            "registration_number": "CT-00123",
            "approval_date": "2022-03-01T00:00:00.000",
            "product_image": { "url": "https://example.invalid/p.jpg" },
            "tetrahydrocannabinol_thc": "18.7%",
            "b_myrcene": "<LOQ",
            "limonene": "0"
        }"#;

        let brand: Brand = serde_json::from_str(json).unwrap();
        assert_eq!(brand.registration_number, "CT-00123");
        assert_eq!(brand.brand_name, "Example Flower");
        assert_eq!(brand.product_image.url, "https://example.invalid/p.jpg");
        assert_eq!(brand.product_image.description, "");
        assert!(brand.approval_date.is_some());
        assert_eq!(brand.tetrahydrocannabinol_thc, Measure::Amount(18.7));
        assert_eq!(brand.b_myrcene, Measure::Trace);
        assert_eq!(brand.limonene, Measure::Zero);
        // Absent measurement columns
        assert_eq!(brand.cbg, Measure::Empty);
        assert_eq!(brand.trans_nerolidol, Measure::Empty);
    }

    #[test]
    fn test_measurements_table_covers_all_fields() {
        let brand = Brand {
            cbg: Measure::Amount(1.0),
            trans_nerolidol: Measure::Trace,
            ..Brand::default()
        };

        let table = brand.measurements();
        assert_eq!(table.len(), MEASUREMENT_COUNT);
        assert!(table.contains(&("cbg", Measure::Amount(1.0))));
        assert!(table.contains(&("trans_nerolidol", Measure::Trace)));
        // No duplicate column names
        let mut names: Vec<_> = table.iter().map(|(n, _)| *n).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), MEASUREMENT_COUNT);
    }
}
