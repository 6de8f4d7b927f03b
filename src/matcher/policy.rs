//! Sequence evaluation policies
//!
//! Both policies share the same preconditions and pitch-family checks and
//! read the same six location/call features from the at-bat. They differ in
//! what they do with the features:
//!
//! - `Tolerant` accepts every slider, curveball, fastball strikeout and
//!   scores it 0-6, one point per feature (including high velocity).
//! - `Strict` scores nothing and accepts only when the five location/call
//!   features all hold; velocity is ignored.

use crate::config::MatcherConfig;
use crate::data::{AtBat, Handedness, PitchEvent};

use super::zones::{classify, is_in_dirt, is_inside, is_outside, SEQUENCE};

/// Highest score the tolerant policy can award
pub const MAX_SCORE: u8 = 6;

/// How a qualifying sequence is judged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchPolicy {
    /// Accept any matching sequence and rank by score
    #[default]
    Tolerant,
    /// Accept only sequences meeting every location/call condition
    Strict,
}

impl MatchPolicy {
    /// Parses a policy name (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "tolerant" | "scored" | "score" => Some(MatchPolicy::Tolerant),
            "strict" | "binary" => Some(MatchPolicy::Strict),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MatchPolicy::Tolerant => "tolerant",
            MatchPolicy::Strict => "strict",
        }
    }

    /// Whether matches carry a score and are ranked
    pub fn is_scored(self) -> bool {
        self == MatchPolicy::Tolerant
    }
}

/// Outcome of evaluating one at-bat
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Evaluation {
    /// Not a 0-3 count, or not exactly three pitches
    Ineligible,
    /// Eligible, but the sequence does not qualify
    Rejected,
    /// A needed field was missing
    BadData,
    /// Qualifies; carries the score under the tolerant policy
    Match(Option<u8>),
}

impl Evaluation {
    pub fn is_match(&self) -> bool {
        matches!(self, Evaluation::Match(_))
    }
}

/// The location and call features of a slider, curveball, fastball sequence
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequenceFeatures {
    /// First pitch on the outside edge
    pub outside_first: bool,
    /// Second pitch below the zone
    pub dirt_second: bool,
    /// Second pitch swung at and missed
    pub swinging_second: bool,
    /// Third pitch at or above the velocity threshold; `None` if speed is missing
    pub high_velocity_third: Option<bool>,
    /// Third pitch on the inside edge
    pub inside_third: bool,
    /// Third pitch called strike three
    pub called_third: bool,
}

impl SequenceFeatures {
    /// Reads the features from the three pitches of an at-bat
    ///
    /// Returns `None` if a zone, call code or the batter's side is missing.
    pub fn extract(
        hand: Handedness,
        pitches: [&PitchEvent; 3],
        config: &MatcherConfig,
    ) -> Option<Self> {
        let [first, second, third] = pitches;
        let third_zone = third.zone()?;

        Some(Self {
            outside_first: is_outside(first.zone()?, hand, config),
            dirt_second: is_in_dirt(second.zone()?, config),
            swinging_second: second.call_code()? == config.swinging_strike_code,
            high_velocity_third: third
                .start_speed()
                .map(|speed| speed >= config.velocity_threshold),
            inside_third: is_inside(third_zone, hand, config),
            called_third: third.call_code()? == config.called_strike_code,
        })
    }

    /// Tolerant score, or `None` if the third pitch has no speed
    pub fn score(&self) -> Option<u8> {
        let high_velocity = self.high_velocity_third?;
        let points = [
            self.outside_first,
            self.dirt_second,
            self.swinging_second,
            high_velocity,
            self.inside_third,
            self.called_third,
        ];
        Some(points.iter().filter(|&&p| p).count() as u8)
    }

    /// Strict acceptance: every location/call feature holds
    pub fn meets_strict(&self) -> bool {
        self.outside_first
            && self.dirt_second
            && self.swinging_second
            && self.inside_third
            && self.called_third
    }
}

/// Checks count, pitch count, automatic strikes and pitch families
///
/// Returns the three pitches when the at-bat is a slider, curveball, fastball
/// strikeout, or the evaluation that ends the search otherwise.
pub fn qualifying_pitches<'a>(
    at_bat: &'a AtBat,
    config: &MatcherConfig,
) -> Result<[&'a PitchEvent; 3], Evaluation> {
    if !at_bat.is_three_pitch_strikeout_count() || at_bat.pitch_index.len() != 3 {
        return Err(Evaluation::Ineligible);
    }

    let pitches = at_bat.pitches().ok_or(Evaluation::BadData)?;
    let pitches: [&PitchEvent; 3] = pitches.try_into().map_err(|_| Evaluation::BadData)?;

    if pitches
        .iter()
        .any(|p| p.call_code() == Some(config.automatic_strike_code.as_str()))
    {
        return Err(Evaluation::Rejected);
    }

    for (pitch, expected) in pitches.iter().zip(SEQUENCE) {
        let code = pitch.pitch_type_code().ok_or(Evaluation::BadData)?;
        if classify(code, config) != Some(expected) {
            return Err(Evaluation::Rejected);
        }
    }

    Ok(pitches)
}

/// Evaluates one at-bat under `policy`
pub fn evaluate(at_bat: &AtBat, policy: MatchPolicy, config: &MatcherConfig) -> Evaluation {
    let pitches = match qualifying_pitches(at_bat, config) {
        Ok(pitches) => pitches,
        Err(outcome) => return outcome,
    };

    let Some(hand) = at_bat.handedness() else {
        return Evaluation::BadData;
    };
    let Some(features) = SequenceFeatures::extract(hand, pitches, config) else {
        return Evaluation::BadData;
    };

    match policy {
        MatchPolicy::Tolerant => match features.score() {
            Some(score) => Evaluation::Match(Some(score)),
            None => Evaluation::BadData,
        },
        MatchPolicy::Strict if features.meets_strict() => Evaluation::Match(None),
        MatchPolicy::Strict => Evaluation::Rejected,
    }
}
