use std::path::PathBuf;
use std::process;
use std::str::FromStr;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use coursefeed::batch::{DEFAULT_OUTPUT_DIR, run_all};
use coursefeed::scraper::{ScraperConfig, WebScraper};
use coursefeed::types::UnitCode;
use log::LevelFilter;

#[derive(Parser)]
#[command(name = "coursefeed")]
#[command(about = "Scrape university course catalogs into one CSV per college", long_about = None)]
struct Cli {
    #[arg(
        short = 'l',
        long = "log-level",
        value_enum,
        default_value = "info",
        help = "Set the logging level"
    )]
    log_level: LogLevel,

    #[arg(
        short = 'o',
        long = "output-dir",
        default_value = DEFAULT_OUTPUT_DIR,
        help = "Directory the per-college CSV files are written to"
    )]
    output_dir: PathBuf,

    #[arg(
        short = 'u',
        long = "unit",
        value_parser = parse_unit,
        help = "College code to scrape (repeatable); defaults to every known college"
    )]
    units: Vec<UnitCode>,

    #[arg(
        long = "delay-ms",
        default_value_t = 1000,
        help = "Pause between page requests, in milliseconds"
    )]
    delay_ms: u64,

    #[arg(long = "base-url", help = "Override the catalog host")]
    base_url: Option<String>,
}

#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn parse_unit(s: &str) -> Result<UnitCode, String> {
    UnitCode::from_str(s).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level.clone().into())
        .target(env_logger::Target::Stdout)
        .init();

    let mut config = ScraperConfig {
        delay: Duration::from_millis(cli.delay_ms),
        ..ScraperConfig::default()
    };
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }

    let scraper = WebScraper::with_config(config).unwrap_or_else(|e| {
        log::error!("Error creating scraper: {}", e);
        process::exit(1);
    });

    let units = if cli.units.is_empty() {
        UnitCode::defaults()
    } else {
        cli.units
    };

    log::info!("Starting to scrape {} colleges...", units.len());

    let report = run_all(&scraper, &units, &cli.output_dir)
        .await
        .unwrap_or_else(|e| {
            log::error!("Error preparing output directory: {}", e);
            process::exit(1);
        });

    print!("{}", report);
    log::info!("Scraping complete!");
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults_match_batch_constants() {
        let cli = Cli::try_parse_from(["coursefeed"]).expect("No arguments should be accepted");
        assert_eq!(cli.output_dir, PathBuf::from("bu_courses"));
        assert!(cli.units.is_empty());
        assert_eq!(cli.delay_ms, 1000);
        assert!(cli.base_url.is_none());
    }

    #[test]
    fn test_repeated_units_are_normalized() {
        let cli = Cli::try_parse_from(["coursefeed", "-u", "CAS", "--unit", "eng"]).unwrap();
        let slugs: Vec<_> = cli.units.iter().map(|u| u.slug()).collect();
        assert_eq!(slugs, ["cas", "eng"]);
    }

    #[test]
    fn test_invalid_unit_is_rejected() {
        assert!(Cli::try_parse_from(["coursefeed", "-u", "c/as"]).is_err());
    }
}
