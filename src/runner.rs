//! Season-by-season search
//!
//! Walks the configured seasons newest first, pulling schedules and
//! play-by-play through the caches, evaluating every at-bat and folding the
//! matches into the run's results. Each season's play-by-play cache is
//! flushed once the season is done, so an aborted run keeps every season
//! finished before it.

use std::io;

use indicatif::{ProgressBar, ProgressStyle};
use thiserror::Error;
use tracing::{info, warn};

use crate::cache::{CacheError, CacheManager, PlayByPlayCache, ScheduleCache, SeasonError};
use crate::config::SearchConfig;
use crate::data::StatsSource;
use crate::matcher::{evaluate, BestSet, Evaluation, MatchPolicy, YearTally};
use crate::report::{self, MatchRecord};

/// Errors that stop a run
#[derive(Debug, Error)]
pub enum RunError {
    /// Loading the schedule cache failed before any season started
    #[error("failed to load schedule cache: {0}")]
    ScheduleCache(#[source] CacheError),

    /// A season could not be completed
    #[error("season {year} aborted: {source}")]
    Season {
        year: i32,
        #[source]
        source: SeasonError,
    },
}

impl RunError {
    fn season(year: i32, source: impl Into<SeasonError>) -> Self {
        RunError::Season {
            year,
            source: source.into(),
        }
    }
}

/// Matches collected so far under the run's policy
#[derive(Debug, Clone)]
enum Collector {
    /// Tolerant policy: best-scoring matches only
    Ranked(BestSet<MatchRecord>),
    /// Strict policy: every accepted match
    Unranked(Vec<MatchRecord>),
}

impl Collector {
    fn new(policy: MatchPolicy) -> Self {
        if policy.is_scored() {
            Collector::Ranked(BestSet::new())
        } else {
            Collector::Unranked(Vec::new())
        }
    }

    fn offer(self, record: MatchRecord) -> Self {
        match self {
            Collector::Ranked(best) => {
                let score = record.score.unwrap_or(0);
                Collector::Ranked(best.fold(score, record))
            }
            Collector::Unranked(mut all) => {
                all.push(record);
                Collector::Unranked(all)
            }
        }
    }

    fn best_score(&self) -> Option<u8> {
        match self {
            Collector::Ranked(best) => Some(best.best_score()),
            Collector::Unranked(_) => None,
        }
    }

    fn sorted(&self) -> Vec<MatchRecord> {
        let mut records = match self {
            Collector::Ranked(best) => best.items().to_vec(),
            Collector::Unranked(all) => all.clone(),
        };
        report::sort_by_start_time(&mut records);
        records
    }
}

/// What a completed run found
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    pub policy: MatchPolicy,
    /// Highest score seen; `None` under the strict policy
    pub best_score: Option<u8>,
    /// Matches ordered by start time
    pub matches: Vec<MatchRecord>,
    /// Evaluation counts per season, in processing order
    pub seasons: Vec<(i32, YearTally)>,
}

fn season_progress(year: i32, games: usize, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(games as u64).with_prefix(format!("{} season", year));
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{prefix} {wide_bar} {pos}/{len} | elapsed: {elapsed_precise}, eta: {eta_precise}")
    {
        bar.set_style(style);
    }
    bar
}

/// Runs the search over every configured season
///
/// `current_year` decides which schedules are closed and may be cached.
pub async fn run<S: StatsSource>(
    source: &S,
    config: &SearchConfig,
    store: CacheManager,
    current_year: i32,
) -> Result<RunOutcome, RunError> {
    let mut schedules = ScheduleCache::load(store.clone()).map_err(RunError::ScheduleCache)?;
    let mut collector = Collector::new(config.policy);
    let mut seasons = Vec::new();

    for year in config.seasons() {
        let games = schedules
            .get_or_fetch(source, year, current_year)
            .await
            .map_err(|e| RunError::season(year, e))?;
        let mut play_by_play =
            PlayByPlayCache::load(store.clone(), year).map_err(|e| RunError::season(year, e))?;
        let mut tally = YearTally::default();

        let progress = season_progress(year, games.len(), config.quiet);
        for scheduled in &games {
            progress.inc(1);
            if !scheduled.is_final() || config.is_excluded_game_type(&scheduled.game_type) {
                continue;
            }

            let record = play_by_play
                .get_or_fetch(source, scheduled.game_id)
                .await
                .map_err(|e| RunError::season(year, e))?;

            for at_bat in &record.all_plays {
                let evaluation = evaluate(at_bat, config.policy, &config.matcher);
                tally.record(&evaluation);
                if let Evaluation::Match(score) = evaluation {
                    let found = MatchRecord::from_at_bat(year, scheduled.game_id, at_bat, score);
                    collector = collector.offer(found);
                }
            }
        }
        progress.finish_and_clear();

        info!(
            year,
            games = games.len(),
            at_bats = tally.at_bats,
            considered = tally.considered,
            matched = tally.matched,
            bad_data = tally.bad_data,
            bad_data_rate = tally.bad_data_rate(),
            "season scanned"
        );
        if tally.bad_data > 0 && tally.bad_data == tally.considered {
            warn!(year, "every candidate at-bat was missing data");
        }

        if !config.quiet {
            let _ = report::print_summary(&mut io::stdout(), collector.best_score(), &collector.sorted());
        }

        play_by_play
            .flush_if_dirty()
            .map_err(|e| RunError::season(year, e))?;
        seasons.push((year, tally));
    }

    Ok(RunOutcome {
        policy: config.policy,
        best_score: collector.best_score(),
        matches: collector.sorted(),
        seasons,
    })
}
