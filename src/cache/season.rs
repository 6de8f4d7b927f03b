//! Season-level caches layered over [`CacheManager`]
//!
//! `ScheduleCache` keeps every closed season's schedule in one file.
//! `PlayByPlayCache` keeps one season's play-by-play records and only writes
//! them back when something new was fetched.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{debug, info};

use super::{CacheError, CacheKind, CacheManager};
use crate::data::{ApiError, PlayByPlay, ScheduledGame, StatsSource};

/// Failure to obtain data either from disk or from the network
#[derive(Debug, Error)]
pub enum SeasonError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Cache(#[from] CacheError),
}

/// First and last day of every month of `year`
///
/// The schedule service is queried one month at a time.
pub fn month_ranges(year: i32) -> Vec<(NaiveDate, NaiveDate)> {
    (1..=12)
        .filter_map(|month| {
            let start = NaiveDate::from_ymd_opt(year, month, 1)?;
            let next = if month == 12 {
                NaiveDate::from_ymd_opt(year + 1, 1, 1)?
            } else {
                NaiveDate::from_ymd_opt(year, month + 1, 1)?
            };
            Some((start, next.pred_opt()?))
        })
        .collect()
}

/// Schedules of closed seasons, backed by `schedules.json`
#[derive(Debug)]
pub struct ScheduleCache {
    store: CacheManager,
    seasons: BTreeMap<i32, Vec<ScheduledGame>>,
}

impl ScheduleCache {
    /// Loads the persisted schedules, starting empty if none exist
    pub fn load(store: CacheManager) -> Result<Self, CacheError> {
        let seasons = store.load(CacheKind::Schedule)?.unwrap_or_default();
        Ok(Self { store, seasons })
    }

    pub fn cached(&self, year: i32) -> Option<&[ScheduledGame]> {
        self.seasons.get(&year).map(Vec::as_slice)
    }

    /// Returns the schedule for `year`, fetching it if it is not cached
    ///
    /// A fetched schedule is committed and flushed only when `year` is
    /// strictly before `current_year`; the current season can still change.
    pub async fn get_or_fetch<S: StatsSource>(
        &mut self,
        source: &S,
        year: i32,
        current_year: i32,
    ) -> Result<Vec<ScheduledGame>, SeasonError> {
        if let Some(games) = self.seasons.get(&year) {
            debug!(year, games = games.len(), "schedule served from cache");
            return Ok(games.clone());
        }

        info!(year, "fetching season schedule");
        let mut games = Vec::new();
        for (start, end) in month_ranges(year) {
            games.extend(source.fetch_schedule(start, end).await?);
        }

        if year < current_year {
            self.seasons.insert(year, games.clone());
            self.store.flush(CacheKind::Schedule, &self.seasons)?;
        }

        Ok(games)
    }
}

/// One season's play-by-play records, backed by `pbp{year}.json`
#[derive(Debug)]
pub struct PlayByPlayCache {
    store: CacheManager,
    year: i32,
    games: BTreeMap<u64, PlayByPlay>,
    dirty: bool,
}

impl PlayByPlayCache {
    /// Loads the persisted records for `year`, starting empty if none exist
    pub fn load(store: CacheManager, year: i32) -> Result<Self, CacheError> {
        let games = store
            .load(CacheKind::PlayByPlay(year))?
            .unwrap_or_default();
        Ok(Self {
            store,
            year,
            games,
            dirty: false,
        })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// True once a game has been fetched since the last flush
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns the record for `game_id`, fetching and remembering it if absent
    pub async fn get_or_fetch<S: StatsSource>(
        &mut self,
        source: &S,
        game_id: u64,
    ) -> Result<&PlayByPlay, ApiError> {
        if !self.games.contains_key(&game_id) {
            let record = source.fetch_play_by_play(game_id).await?;
            self.games.insert(game_id, record);
            self.dirty = true;
        }
        Ok(&self.games[&game_id])
    }

    /// Writes the records back if anything was fetched
    ///
    /// Returns whether a write happened.
    pub fn flush_if_dirty(&mut self) -> Result<bool, CacheError> {
        if !self.dirty {
            return Ok(false);
        }
        self.store
            .flush(CacheKind::PlayByPlay(self.year), &self.games)?;
        self.dirty = false;
        Ok(true)
    }
}
