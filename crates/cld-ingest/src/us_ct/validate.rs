//! Brand record validation
//!
//! A single stable filtering pass over the fetched record set. Bad
//! records are dropped silently; the caller logs the counts if it cares.

use super::models::Brand;

/// Drop erroneous brand records, preserving the order of the remainder.
pub fn clean_brands(brands: Vec<Brand>) -> Vec<Brand> {
    brands
        .into_iter()
        .filter(|b| !is_brand_erroneous(b))
        .collect()
}

/// Returns true if the brand record is erroneous.
///
/// A record needs its registration number, and every measurement field
/// must be a valid percentage reading.
pub fn is_brand_erroneous(brand: &Brand) -> bool {
    if brand.registration_number.is_empty() {
        return true;
    }
    brand
        .measurements()
        .iter()
        .any(|(_, measure)| !measure.is_valid_percent())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::us_ct::measure::Measure;

    fn valid_brand(registration: &str) -> Brand {
        Brand {
            registration_number: registration.to_string(),
            brand_name: "Test Brand".to_string(),
            tetrahydrocannabinol_thc: Measure::Amount(18.0),
            b_myrcene: Measure::Trace,
            limonene: Measure::Zero,
            ..Brand::default()
        }
    }

    #[test]
    fn test_valid_brand_is_kept() {
        assert!(!is_brand_erroneous(&valid_brand("CT-1")));
    }

    #[test]
    fn test_missing_registration_number_is_dropped() {
        let brand = valid_brand("");
        assert!(is_brand_erroneous(&brand));
    }

    #[test]
    fn test_out_of_range_measurement_is_dropped() {
        let mut brand = valid_brand("CT-1");
        brand.guaiol = Measure::Amount(250.0);
        assert!(is_brand_erroneous(&brand));
    }

    #[test]
    fn test_clean_preserves_order_of_survivors() {
        let mut bad = valid_brand("CT-2");
        bad.cbg = Measure::Amount(101.0);

        let brands = vec![valid_brand("CT-1"), bad, valid_brand("CT-3")];
        let cleaned = clean_brands(brands);

        let keys: Vec<_> = cleaned
            .iter()
            .map(|b| b.registration_number.as_str())
            .collect();
        assert_eq!(keys, ["CT-1", "CT-3"]);
    }

    #[test]
    fn test_clean_does_not_mutate_survivors() {
        let original = valid_brand("CT-1");
        let cleaned = clean_brands(vec![original.clone()]);
        assert_eq!(cleaned, vec![original]);
    }
}
