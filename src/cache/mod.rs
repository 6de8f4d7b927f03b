//! Cache module for storing fetched schedules and play-by-play to disk
//!
//! `CacheManager` owns the file layout and atomic writes. The season caches
//! decide what to fetch, what to keep and when to write it back, so repeated
//! runs skip every closed season and every game already seen.

mod manager;
mod season;

pub use manager::{write_atomic, CacheError, CacheKind, CacheManager};
pub use season::{month_ranges, PlayByPlayCache, ScheduleCache, SeasonError};
