//! kkoutfinder library
//!
//! Searches MLB play-by-play history for three-pitch strikeouts thrown
//! slider, curveball, fastball. Schedules and play-by-play are cached on disk
//! so repeated runs only fetch what is new.

pub mod cache;
pub mod cli;
pub mod config;
pub mod data;
pub mod logging;
pub mod matcher;
pub mod report;
pub mod runner;
