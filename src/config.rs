//! Search configuration
//!
//! Every constant the search depends on lives here with a `Default` that
//! reproduces the standard behaviour: pitch-code groupings, zone sets, call
//! codes, the velocity threshold, the season range and the file locations.

use std::path::PathBuf;

use chrono::{Datelike, Local};

use crate::matcher::MatchPolicy;

/// First season with pitch-level tracking data
pub const FIRST_TRACKED_SEASON: i32 = 2008;

/// Default location of the exported matches
pub const DEFAULT_OUTPUT_FILE: &str = "kkout_matches.json";

/// Pitch codes, call codes and zone sets used by the sequence matcher
#[derive(Debug, Clone, PartialEq)]
pub struct MatcherConfig {
    /// First pitch family; sweepers count as sliders
    pub slider_codes: Vec<String>,
    /// Second pitch family; knuckle-curves count as curveballs
    pub curveball_codes: Vec<String>,
    /// Third pitch family; sinkers count as fastballs
    pub fastball_codes: Vec<String>,
    /// Call code of a rule-based strike (pitch clock violation)
    pub automatic_strike_code: String,
    pub swinging_strike_code: String,
    pub called_strike_code: String,
    /// Zones on the catcher's left (inside to a left-handed batter)
    pub catcher_left_zones: Vec<u8>,
    /// Zones on the catcher's right (inside to a right-handed batter)
    pub catcher_right_zones: Vec<u8>,
    /// Zones below the strike zone
    pub dirt_zones: Vec<u8>,
    /// Third-pitch release speed (mph) that counts as high velocity
    pub velocity_threshold: f64,
}

fn codes(list: &[&str]) -> Vec<String> {
    list.iter().map(|code| code.to_string()).collect()
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            slider_codes: codes(&["SL", "ST"]),
            curveball_codes: codes(&["CU", "KC"]),
            fastball_codes: codes(&["FF", "SI"]),
            automatic_strike_code: "AC".to_string(),
            swinging_strike_code: "S".to_string(),
            called_strike_code: "C".to_string(),
            catcher_left_zones: vec![1, 4, 7, 11, 13],
            catcher_right_zones: vec![3, 6, 9, 12, 14],
            dirt_zones: vec![13, 14],
            velocity_threshold: 96.5,
        }
    }
}

/// Everything a run needs to know
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Oldest season searched
    pub first_season: i32,
    /// Newest season searched; seasons run newest first
    pub last_season: i32,
    /// Cache directory; `None` uses the XDG cache directory
    pub cache_dir: Option<PathBuf>,
    /// Where the matches are exported
    pub output: PathBuf,
    /// Suppress progress and status output
    pub quiet: bool,
    pub policy: MatchPolicy,
    /// Game-type codes skipped entirely (exhibition, spring training)
    pub excluded_game_types: Vec<String>,
    pub matcher: MatcherConfig,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            first_season: FIRST_TRACKED_SEASON,
            last_season: Local::now().year(),
            cache_dir: None,
            output: PathBuf::from(DEFAULT_OUTPUT_FILE),
            quiet: false,
            policy: MatchPolicy::default(),
            excluded_game_types: codes(&["E", "S"]),
            matcher: MatcherConfig::default(),
        }
    }
}

impl SearchConfig {
    /// Seasons in processing order, newest first
    pub fn seasons(&self) -> impl Iterator<Item = i32> {
        (self.first_season..=self.last_season).rev()
    }

    pub fn is_excluded_game_type(&self, game_type: &str) -> bool {
        self.excluded_game_types.iter().any(|t| t == game_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matcher_config_default() {
        let config = MatcherConfig::default();
        assert_eq!(config.slider_codes, vec!["SL", "ST"]);
        assert_eq!(config.curveball_codes, vec!["CU", "KC"]);
        assert_eq!(config.fastball_codes, vec!["FF", "SI"]);
        assert_eq!(config.automatic_strike_code, "AC");
        assert_eq!(config.dirt_zones, vec![13, 14]);
        assert!((config.velocity_threshold - 96.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zone_sets_are_disjoint_mirrors() {
        let config = MatcherConfig::default();
        for zone in &config.catcher_left_zones {
            assert!(!config.catcher_right_zones.contains(zone));
        }
        assert_eq!(
            config.catcher_left_zones.len(),
            config.catcher_right_zones.len()
        );
    }

    #[test]
    fn test_search_config_default() {
        let config = SearchConfig::default();
        assert_eq!(config.first_season, 2008);
        assert_eq!(config.last_season, Local::now().year());
        assert_eq!(config.output, PathBuf::from("kkout_matches.json"));
        assert!(!config.quiet);
        assert_eq!(config.policy, MatchPolicy::Tolerant);
        assert!(config.cache_dir.is_none());
    }

    #[test]
    fn test_seasons_run_newest_first() {
        let config = SearchConfig {
            first_season: 2019,
            last_season: 2021,
            ..SearchConfig::default()
        };
        assert_eq!(config.seasons().collect::<Vec<_>>(), vec![2021, 2020, 2019]);
    }

    #[test]
    fn test_excluded_game_types() {
        let config = SearchConfig::default();
        assert!(config.is_excluded_game_type("E"));
        assert!(config.is_excluded_game_type("S"));
        assert!(!config.is_excluded_game_type("R"));
        assert!(!config.is_excluded_game_type("W"));
    }
}
