//! Core data models for kkoutfinder
//!
//! This module contains the schedule and play-by-play records returned by the
//! MLB stats service. The same types are persisted to the on-disk caches, so
//! every field the service may omit is optional and absent fields are skipped
//! when serializing.

pub mod statsapi;

pub use statsapi::{ApiError, RetryPolicy, StatsApiClient, StatsSource};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a scheduled game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Not played yet
    Scheduled,
    /// Completed, play-by-play is final
    Final,
    /// Postponed, suspended, in progress, cancelled, ...
    Other,
}

impl GameStatus {
    /// Maps the service's `status.detailedState` string to a status
    pub fn from_detailed_state(state: &str) -> Self {
        match state {
            "Final" => GameStatus::Final,
            "Scheduled" | "Pre-Game" | "Warmup" => GameStatus::Scheduled,
            _ => GameStatus::Other,
        }
    }
}

/// One entry of a season schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledGame {
    /// The service's `gamePk`
    pub game_id: u64,
    /// Whether the game has been played
    pub status: GameStatus,
    /// Game-type code: `R` regular season, `S` spring training, `E` exhibition, ...
    pub game_type: String,
}

impl ScheduledGame {
    pub fn is_final(&self) -> bool {
        self.status == GameStatus::Final
    }
}

/// Batter handedness for a plate appearance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Handedness {
    Right,
    Left,
}

impl Handedness {
    /// Parses a bat-side code (`"R"` or `"L"`)
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "R" => Some(Handedness::Right),
            "L" => Some(Handedness::Left),
            _ => None,
        }
    }
}

/// Full play-by-play record for a game
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayByPlay {
    #[serde(default)]
    pub all_plays: Vec<AtBat>,
}

/// A single plate appearance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtBat {
    /// Final ball/strike count
    #[serde(default)]
    pub count: Count,
    /// Indices into `play_events` of the pitches thrown in this at-bat
    #[serde(default)]
    pub pitch_index: Vec<usize>,
    /// Pitches and non-pitch actions, in order
    #[serde(default)]
    pub play_events: Vec<PitchEvent>,
    #[serde(default)]
    pub matchup: Matchup,
    #[serde(default)]
    pub about: About,
}

impl AtBat {
    /// True when the at-bat ended on a 0-ball, 3-strike count
    pub fn is_three_pitch_strikeout_count(&self) -> bool {
        self.count.balls == 0 && self.count.strikes == 3
    }

    /// Resolves `pitch_index` into pitch events
    ///
    /// Returns `None` if any index points outside `play_events`.
    pub fn pitches(&self) -> Option<Vec<&PitchEvent>> {
        self.pitch_index
            .iter()
            .map(|&i| self.play_events.get(i))
            .collect()
    }

    pub fn handedness(&self) -> Option<Handedness> {
        self.matchup
            .bat_side
            .as_ref()
            .and_then(|side| side.code.as_deref())
            .and_then(Handedness::from_code)
    }

    pub fn pitcher_name(&self) -> &str {
        Person::name_or_unknown(self.matchup.pitcher.as_ref())
    }

    pub fn batter_name(&self) -> &str {
        Person::name_or_unknown(self.matchup.batter.as_ref())
    }

    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.about.start_time
    }
}

/// Ball/strike count
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Count {
    #[serde(default)]
    pub balls: u8,
    #[serde(default)]
    pub strikes: u8,
}

/// Pitcher and batter involved in an at-bat
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Matchup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bat_side: Option<Code>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pitcher: Option<Person>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batter: Option<Person>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

impl Person {
    fn name_or_unknown(person: Option<&Person>) -> &str {
        person
            .and_then(|p| p.full_name.as_deref())
            .unwrap_or("unknown")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct About {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
}

/// A `{ "code": ... }` object as the service nests them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Code {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// One pitch (or other play event) within an at-bat
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PitchEvent {
    #[serde(default)]
    pub details: PitchDetails,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pitch_data: Option<PitchData>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PitchDetails {
    /// Call code: `C` called strike, `S` swinging strike, `AC` automatic strike, ...
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Pitch classification (`SL`, `ST`, `CU`, `KC`, `FF`, `SI`, ...)
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub pitch_type: Option<Code>,
    /// Location zone as carried by older records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PitchData {
    /// Release speed in mph
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_speed: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<u8>,
}

impl PitchEvent {
    pub fn pitch_type_code(&self) -> Option<&str> {
        self.details
            .pitch_type
            .as_ref()
            .and_then(|t| t.code.as_deref())
    }

    pub fn call_code(&self) -> Option<&str> {
        self.details.code.as_deref()
    }

    /// Plate location zone, probing `pitchData.zone` before `details.zone`
    pub fn zone(&self) -> Option<u8> {
        self.pitch_data
            .as_ref()
            .and_then(|data| data.zone)
            .or(self.details.zone)
    }

    pub fn start_speed(&self) -> Option<f64> {
        self.pitch_data.as_ref().and_then(|data| data.start_speed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_at_bat() -> AtBat {
        serde_json::from_value(json!({
            "count": { "balls": 0, "strikes": 3, "outs": 1 },
            "pitchIndex": [0, 2, 3],
            "playEvents": [
                { "details": { "code": "C", "type": { "code": "SL", "description": "Slider" } },
                  "pitchData": { "startSpeed": 86.1, "zone": 3 } },
                { "details": { "description": "Mound visit" } },
                { "details": { "code": "S", "type": { "code": "KC" } },
                  "pitchData": { "startSpeed": 81.0, "zone": 13 } },
                { "details": { "code": "C", "type": { "code": "FF" } },
                  "pitchData": { "startSpeed": 97.4, "zone": 1 } }
            ],
            "matchup": {
                "batSide": { "code": "R", "description": "Right" },
                "pitcher": { "id": 1, "fullName": "Pat Pitcher" },
                "batter": { "id": 2, "fullName": "Bo Batter" }
            },
            "about": { "startTime": "2023-06-01T23:10:04.123Z", "inning": 3 }
        }))
        .expect("sample at-bat should deserialize")
    }

    #[test]
    fn test_game_status_from_detailed_state() {
        assert_eq!(GameStatus::from_detailed_state("Final"), GameStatus::Final);
        assert_eq!(GameStatus::from_detailed_state("Scheduled"), GameStatus::Scheduled);
        assert_eq!(GameStatus::from_detailed_state("Pre-Game"), GameStatus::Scheduled);
        assert_eq!(GameStatus::from_detailed_state("Postponed"), GameStatus::Other);
        assert_eq!(GameStatus::from_detailed_state("Completed Early"), GameStatus::Other);
    }

    #[test]
    fn test_at_bat_deserializes_service_shape() {
        let at_bat = sample_at_bat();

        assert!(at_bat.is_three_pitch_strikeout_count());
        assert_eq!(at_bat.handedness(), Some(Handedness::Right));
        assert_eq!(at_bat.pitcher_name(), "Pat Pitcher");
        assert_eq!(at_bat.batter_name(), "Bo Batter");
        assert!(at_bat.start_time().is_some());

        let pitches = at_bat.pitches().expect("indices are in range");
        assert_eq!(pitches.len(), 3);
        assert_eq!(pitches[0].pitch_type_code(), Some("SL"));
        assert_eq!(pitches[1].pitch_type_code(), Some("KC"));
        assert_eq!(pitches[2].call_code(), Some("C"));
        assert_eq!(pitches[2].start_speed(), Some(97.4));
    }

    #[test]
    fn test_pitches_out_of_range_is_none() {
        let mut at_bat = sample_at_bat();
        at_bat.pitch_index = vec![0, 2, 9];
        assert!(at_bat.pitches().is_none());
    }

    #[test]
    fn test_zone_falls_back_to_details_field() {
        let primary: PitchEvent = serde_json::from_value(json!({
            "details": { "code": "B" },
            "pitchData": { "zone": 11 }
        }))
        .unwrap();
        let secondary: PitchEvent = serde_json::from_value(json!({
            "details": { "code": "B", "zone": 11 },
            "pitchData": { "startSpeed": 92.0 }
        }))
        .unwrap();
        let neither: PitchEvent = serde_json::from_value(json!({
            "details": { "code": "B" }
        }))
        .unwrap();

        assert_eq!(primary.zone(), Some(11));
        assert_eq!(secondary.zone(), primary.zone());
        assert_eq!(neither.zone(), None);
    }

    #[test]
    fn test_primary_zone_wins_over_secondary() {
        let event: PitchEvent = serde_json::from_value(json!({
            "details": { "zone": 5 },
            "pitchData": { "zone": 14 }
        }))
        .unwrap();
        assert_eq!(event.zone(), Some(14));
    }

    #[test]
    fn test_unknown_names_and_handedness() {
        let at_bat = AtBat::default();
        assert_eq!(at_bat.pitcher_name(), "unknown");
        assert_eq!(at_bat.batter_name(), "unknown");
        assert_eq!(at_bat.handedness(), None);
        assert_eq!(Handedness::from_code("S"), None);
    }

    #[test]
    fn test_cached_form_survives_roundtrip() {
        let record = PlayByPlay {
            all_plays: vec![sample_at_bat()],
        };
        let json = serde_json::to_string(&record).expect("serialize");
        let back: PlayByPlay = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, record);
    }
}
