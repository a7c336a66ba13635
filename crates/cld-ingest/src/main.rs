//! CLD Ingest - data ingestion tool

use anyhow::Result;
use clap::Parser;
use cld_common::cache::CacheStore;
use cld_common::logging::{init_logging, LogConfig, LogFormat, LogLevel};
use cld_ingest::us_ct;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "cld-ingest")]
#[command(author, version, about = "CLD data ingestion tool")]
struct Cli {
    /// Data source to ingest
    #[command(subcommand)]
    source: Source,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Log in JSON instead of text
    #[arg(short = 'j', long)]
    log_json: bool,

    /// Log file destination (default: stderr)
    #[arg(short, long, env = "CLD_LOG_FILE")]
    log_file: Option<PathBuf>,
}

#[derive(Parser, Debug)]
enum Source {
    /// Ingest the CT brand registry dataset
    UsCt {
        /// Cache root directory
        #[arg(long, default_value = "./.cld/cache")]
        cache_root: PathBuf,

        /// data.ct.gov application token
        #[arg(short, long, env = "CT_APP_TOKEN")]
        token: Option<String>,

        /// Maximum cache age in hours; 0 accepts any existing artifact
        #[arg(long, default_value_t = 24)]
        max_cache_age_hours: u64,

        /// Page size for remote requests
        #[arg(long, default_value_t = 5000)]
        batch_limit: usize,

        /// Write the CSV artifact after cleaning (default)
        #[arg(long, overrides_with = "no_csv")]
        csv: bool,

        /// Skip writing the CSV artifact
        #[arg(long, overrides_with = "csv")]
        no_csv: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_config = LogConfig {
        level: if cli.verbose {
            LogLevel::Debug
        } else {
            LogLevel::Info
        },
        format: if cli.log_json {
            LogFormat::Json
        } else {
            LogFormat::Text
        },
        log_file: cli.log_file.clone(),
    };
    init_logging(&log_config)?;

    match cli.source {
        Source::UsCt {
            cache_root,
            token,
            max_cache_age_hours,
            batch_limit,
            csv: _,
            no_csv,
        } => {
            let cache = CacheStore::new(cache_root);
            let config = us_ct::CtBrandsConfig {
                app_token: token,
                batch_limit,
                max_cache_age_secs: max_cache_age_hours * 60 * 60,
                ..us_ct::CtBrandsConfig::default()
            };

            info!("fetching brands from data.ct.gov");
            let client = us_ct::BrandClient::new(config)?;
            let brands = client.fetch_brands(&cache).await?;

            let fetched = brands.len();
            let brands = us_ct::clean_brands(brands);
            info!(
                fetched,
                kept = brands.len(),
                dropped = fetched - brands.len(),
                "cleaned brand records"
            );

            if !no_csv {
                us_ct::write_brands_csv(&cache, &brands)?;
            }
        },
    }

    info!("Ingestion complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_toggle_last_flag_wins() {
        let cli = Cli::parse_from(["cld-ingest", "us-ct"]);
        let Source::UsCt { no_csv, .. } = cli.source;
        assert!(!no_csv);

        let cli = Cli::parse_from(["cld-ingest", "us-ct", "--no-csv"]);
        let Source::UsCt { no_csv, .. } = cli.source;
        assert!(no_csv);

        let cli = Cli::parse_from(["cld-ingest", "us-ct", "--no-csv", "--csv"]);
        let Source::UsCt { no_csv, .. } = cli.source;
        assert!(!no_csv);

        let cli = Cli::parse_from(["cld-ingest", "us-ct", "--csv", "--no-csv"]);
        let Source::UsCt { no_csv, .. } = cli.source;
        assert!(no_csv);
    }
}
