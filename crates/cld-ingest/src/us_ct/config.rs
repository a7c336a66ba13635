//! CT brand feed configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default Socrata resource endpoint for the CT brand dataset
pub const DEFAULT_BRANDS_URL: &str = "https://data.ct.gov/resource/egd5-wb6r.json";

/// Configuration for fetching the CT brand dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CtBrandsConfig {
    /// Socrata resource endpoint
    pub base_url: String,

    /// Optional data.ct.gov application token
    pub app_token: Option<String>,

    /// Page size for paginated requests
    pub batch_limit: usize,

    /// Maximum cache artifact age in seconds; 0 accepts any existing
    /// artifact
    pub max_cache_age_secs: u64,

    /// HTTP timeout in seconds
    pub timeout_secs: u64,
}

impl Default for CtBrandsConfig {
    fn default() -> Self {
        CtBrandsConfig {
            base_url: DEFAULT_BRANDS_URL.to_string(),
            app_token: None,
            batch_limit: 5000,
            max_cache_age_secs: 24 * 60 * 60,
            timeout_secs: 60,
        }
    }
}

impl CtBrandsConfig {
    /// Maximum cache artifact age as a duration
    pub fn max_cache_age(&self) -> Duration {
        Duration::from_secs(self.max_cache_age_secs)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("Base URL cannot be empty".to_string());
        }

        if self.batch_limit == 0 {
            return Err("Batch limit must be greater than 0".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("Timeout must be greater than 0".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = CtBrandsConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.batch_limit, 5000);
        assert_eq!(config.max_cache_age(), Duration::from_secs(86_400));
    }

    #[test]
    fn test_invalid_configs() {
        let config = CtBrandsConfig {
            base_url: String::new(),
            ..CtBrandsConfig::default()
        };
        assert!(config.validate().is_err());

        let config = CtBrandsConfig {
            batch_limit: 0,
            ..CtBrandsConfig::default()
        };
        assert!(config.validate().is_err());

        let config = CtBrandsConfig {
            timeout_secs: 0,
            ..CtBrandsConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
