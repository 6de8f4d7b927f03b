//! Result export and console summary

use std::io::{self, Write};
use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use crossterm::style::Stylize;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::cache::{write_atomic, CacheError};
use crate::data::AtBat;

/// Errors that can occur while exporting matches
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to serialize matches: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error(transparent)]
    Write(#[from] CacheError),
}

/// One qualifying at-bat, as exported
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub start_time: Option<DateTime<Utc>>,
    pub pitcher: String,
    pub batter: String,
    pub season: i32,
    pub game_id: u64,
    /// Present under the tolerant policy only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>,
}

impl MatchRecord {
    pub fn from_at_bat(season: i32, game_id: u64, at_bat: &AtBat, score: Option<u8>) -> Self {
        Self {
            start_time: at_bat.start_time(),
            pitcher: at_bat.pitcher_name().to_string(),
            batter: at_bat.batter_name().to_string(),
            season,
            game_id,
            score,
        }
    }

    /// `"{start time} - {pitcher} to {batter}"`
    pub fn summary_line(&self) -> String {
        let start = self
            .start_time
            .map(|t| t.to_rfc3339_opts(SecondsFormat::Millis, true))
            .unwrap_or_else(|| "unknown time".to_string());
        format!("{} - {} to {}", start, self.pitcher, self.batter)
    }
}

/// Orders records by start time, unknown times first
pub fn sort_by_start_time(records: &mut [MatchRecord]) {
    records.sort_by_key(|record| record.start_time);
}

/// Summary heading plus one line per record
///
/// The heading is `best_score=N` when matches are scored and `matches=N`
/// otherwise.
pub fn summary_lines(best_score: Option<u8>, records: &[MatchRecord]) -> Vec<String> {
    let heading = match best_score {
        Some(score) => format!("best_score={}", score),
        None => format!("matches={}", records.len()),
    };
    std::iter::once(heading)
        .chain(records.iter().map(MatchRecord::summary_line))
        .collect()
}

/// Writes the summary with a highlighted heading
pub fn print_summary<W: Write>(
    out: &mut W,
    best_score: Option<u8>,
    records: &[MatchRecord],
) -> io::Result<()> {
    let mut lines = summary_lines(best_score, records).into_iter();
    if let Some(heading) = lines.next() {
        writeln!(out, "{}", heading.bold())?;
    }
    for line in lines {
        writeln!(out, "{}", line)?;
    }
    out.flush()
}

/// Exports `records` as a pretty JSON array, ordered by start time
pub fn export(path: &Path, records: &[MatchRecord]) -> Result<(), ReportError> {
    let mut sorted = records.to_vec();
    sort_by_start_time(&mut sorted);
    let json = serde_json::to_vec_pretty(&sorted)?;
    write_atomic(path, &json)?;
    info!(path = %path.display(), matches = sorted.len(), "exported matches");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn record(hour: u32, pitcher: &str, score: Option<u8>) -> MatchRecord {
        MatchRecord {
            start_time: Some(Utc.with_ymd_and_hms(2023, 5, 4, hour, 0, 0).unwrap()),
            pitcher: pitcher.to_string(),
            batter: "Bo Batter".to_string(),
            season: 2023,
            game_id: 717000 + u64::from(hour),
            score,
        }
    }

    #[test]
    fn test_summary_line_format() {
        let line = record(19, "Pat Pitcher", Some(6)).summary_line();
        assert_eq!(line, "2023-05-04T19:00:00.000Z - Pat Pitcher to Bo Batter");
    }

    #[test]
    fn test_summary_lines_scored() {
        let lines = summary_lines(Some(5), &[record(18, "A", Some(5)), record(20, "B", Some(5))]);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "best_score=5");
        assert!(lines[1].contains("A to Bo Batter"));
    }

    #[test]
    fn test_summary_lines_unscored() {
        let lines = summary_lines(None, &[record(18, "A", None)]);
        assert_eq!(lines[0], "matches=1");
    }

    #[test]
    fn test_print_summary_writes_every_record() {
        let mut out = Vec::new();
        print_summary(&mut out, Some(2), &[record(18, "A", Some(2)), record(19, "B", Some(2))])
            .expect("write to vec");
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("best_score=2"));
        assert!(text.contains("A to Bo Batter"));
        assert!(text.contains("B to Bo Batter"));
    }

    #[test]
    fn test_export_sorts_by_start_time() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("matches.json");

        export(&path, &[record(21, "Late", Some(4)), record(17, "Early", Some(4))])
            .expect("export should succeed");

        let written: Vec<MatchRecord> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written.len(), 2);
        assert_eq!(written[0].pitcher, "Early");
        assert_eq!(written[1].pitcher, "Late");
    }

    #[test]
    fn test_export_omits_score_when_unscored() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("strict.json");

        export(&path, &[record(17, "Strict", None)]).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(!text.contains("score"));
        assert!(text.contains("\"pitcher\": \"Strict\""));
    }
}
