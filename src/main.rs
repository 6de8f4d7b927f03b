//! kkoutfinder - find slider, curveball, fastball strikeouts in MLB history
//!
//! Walks every season from the newest back, fetching schedules and
//! play-by-play from the MLB stats API (or the local cache), and reports the
//! at-bats that match the sequence.

use std::io;

use chrono::{Datelike, Local};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};

use kkoutfinder::cache::CacheManager;
use kkoutfinder::cli::Cli;
use kkoutfinder::config::SearchConfig;
use kkoutfinder::data::StatsApiClient;
use kkoutfinder::{logging, report, runner};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = match SearchConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => Cli::command().error(ErrorKind::InvalidValue, e).exit(),
    };

    logging::init_logging(config.quiet)?;

    let store = match &config.cache_dir {
        Some(dir) => CacheManager::with_dir(dir.clone()),
        None => CacheManager::new().ok_or("could not determine a cache directory")?,
    };
    tracing::info!(
        cache_dir = %store.cache_dir().display(),
        policy = config.policy.name(),
        first_season = config.first_season,
        last_season = config.last_season,
        "starting search"
    );

    let client = StatsApiClient::new();
    let outcome = runner::run(&client, &config, store, Local::now().year()).await?;

    report::export(&config.output, &outcome.matches)?;
    report::print_summary(&mut io::stdout(), outcome.best_score, &outcome.matches)?;

    Ok(())
}
