//! Command-line interface parsing for kkoutfinder
//!
//! This module handles parsing of CLI arguments using clap and turns them into
//! a validated [`SearchConfig`].

use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

use crate::config::SearchConfig;
use crate::matcher::MatchPolicy;

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The specified policy name is not recognized
    #[error("Invalid policy: '{0}'. Valid policies: tolerant, strict")]
    InvalidPolicy(String),

    /// The season range is empty
    #[error("Invalid season range: --from {from} is after --to {to}")]
    InvalidSeasonRange { from: i32, to: i32 },

    /// The velocity threshold is not a usable speed
    #[error("Invalid velocity threshold: {0}. Expected a positive speed in mph")]
    InvalidVelocity(f64),
}

/// kkoutfinder - find slider, curveball, fastball strikeouts in MLB history
#[derive(Parser, Debug)]
#[command(name = "kkoutfinder")]
#[command(about = "Search MLB play-by-play for three-pitch slider, curveball, fastball strikeouts")]
#[command(version)]
pub struct Cli {
    /// Suppress progress and status output
    #[arg(short, long)]
    pub quiet: bool,

    /// Matching policy
    ///
    /// tolerant: every slider, curveball, fastball strikeout is scored 0-6 and
    /// the best-scoring ones are kept.
    /// strict: only sequences that are outside, in the dirt and swung at,
    /// then inside and called are kept, unscored.
    #[arg(long, value_name = "POLICY", default_value = "tolerant")]
    pub policy: String,

    /// Oldest season to search
    #[arg(long = "from", value_name = "YEAR")]
    pub from_season: Option<i32>,

    /// Newest season to search (defaults to the current year)
    #[arg(long = "to", value_name = "YEAR")]
    pub to_season: Option<i32>,

    /// Directory for cached schedules and play-by-play
    #[arg(long, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// File the matches are exported to
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Third-pitch speed (mph) that earns the velocity point
    #[arg(long, value_name = "MPH")]
    pub min_velocity: Option<f64>,
}

/// Parses a policy string argument into a MatchPolicy.
///
/// # Returns
/// * `Ok(MatchPolicy)` if the string names a policy
/// * `Err(CliError::InvalidPolicy)` if it doesn't
pub fn parse_policy_arg(s: &str) -> Result<MatchPolicy, CliError> {
    MatchPolicy::from_str(s).ok_or_else(|| CliError::InvalidPolicy(s.to_string()))
}

impl SearchConfig {
    /// Creates a SearchConfig from parsed CLI arguments.
    ///
    /// Unset options keep their defaults.
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let mut config = SearchConfig {
            quiet: cli.quiet,
            policy: parse_policy_arg(&cli.policy)?,
            cache_dir: cli.cache_dir.clone(),
            ..SearchConfig::default()
        };

        if let Some(from) = cli.from_season {
            config.first_season = from;
        }
        if let Some(to) = cli.to_season {
            config.last_season = to;
        }
        if config.first_season > config.last_season {
            return Err(CliError::InvalidSeasonRange {
                from: config.first_season,
                to: config.last_season,
            });
        }

        if let Some(output) = &cli.output {
            config.output = output.clone();
        }

        if let Some(mph) = cli.min_velocity {
            if !mph.is_finite() || mph <= 0.0 {
                return Err(CliError::InvalidVelocity(mph));
            }
            config.matcher.velocity_threshold = mph;
        }

        Ok(config)
    }
}
