//! Pitch families and plate-location zone sets
//!
//! Zones follow the service's 14-zone grid seen from the catcher: 1-9 the
//! strike zone in a 3x3 grid, 11-14 the four regions around it, 13 and 14
//! the low pair.

use crate::config::MatcherConfig;
use crate::data::Handedness;

/// The three pitch families of the sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PitchFamily {
    Slider,
    Curveball,
    Fastball,
}

/// The required order of families within the at-bat
pub const SEQUENCE: [PitchFamily; 3] = [
    PitchFamily::Slider,
    PitchFamily::Curveball,
    PitchFamily::Fastball,
];

/// Maps a pitch-type code to its family, if it belongs to one
pub fn classify(code: &str, config: &MatcherConfig) -> Option<PitchFamily> {
    let contains = |codes: &[String]| codes.iter().any(|c| c == code);
    if contains(&config.slider_codes[..]) {
        Some(PitchFamily::Slider)
    } else if contains(&config.curveball_codes[..]) {
        Some(PitchFamily::Curveball)
    } else if contains(&config.fastball_codes[..]) {
        Some(PitchFamily::Fastball)
    } else {
        None
    }
}

/// Zones on the far edge of the plate from `hand`
pub fn outside_zones(hand: Handedness, config: &MatcherConfig) -> &[u8] {
    match hand {
        Handedness::Right => &config.catcher_right_zones,
        Handedness::Left => &config.catcher_left_zones,
    }
}

/// Zones on the near edge of the plate to `hand`
pub fn inside_zones(hand: Handedness, config: &MatcherConfig) -> &[u8] {
    match hand {
        Handedness::Right => &config.catcher_left_zones,
        Handedness::Left => &config.catcher_right_zones,
    }
}

pub fn is_outside(zone: u8, hand: Handedness, config: &MatcherConfig) -> bool {
    outside_zones(hand, config).contains(&zone)
}

pub fn is_inside(zone: u8, hand: Handedness, config: &MatcherConfig) -> bool {
    inside_zones(hand, config).contains(&zone)
}

/// Below the strike zone
pub fn is_in_dirt(zone: u8, config: &MatcherConfig) -> bool {
    config.dirt_zones.contains(&zone)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_folds_subtypes() {
        let config = MatcherConfig::default();
        assert_eq!(classify("SL", &config), Some(PitchFamily::Slider));
        assert_eq!(classify("ST", &config), Some(PitchFamily::Slider));
        assert_eq!(classify("CU", &config), Some(PitchFamily::Curveball));
        assert_eq!(classify("KC", &config), Some(PitchFamily::Curveball));
        assert_eq!(classify("FF", &config), Some(PitchFamily::Fastball));
        assert_eq!(classify("SI", &config), Some(PitchFamily::Fastball));
        assert_eq!(classify("FC", &config), None);
        assert_eq!(classify("CH", &config), None);
    }

    #[test]
    fn test_zone_one_flips_with_handedness() {
        let config = MatcherConfig::default();
        assert!(is_inside(1, Handedness::Right, &config));
        assert!(!is_outside(1, Handedness::Right, &config));
        assert!(is_outside(1, Handedness::Left, &config));
        assert!(!is_inside(1, Handedness::Left, &config));
    }

    #[test]
    fn test_outside_sets_mirror_inside_sets() {
        let config = MatcherConfig::default();
        assert_eq!(
            outside_zones(Handedness::Right, &config),
            inside_zones(Handedness::Left, &config)
        );
        assert_eq!(
            outside_zones(Handedness::Left, &config),
            inside_zones(Handedness::Right, &config)
        );
    }

    #[test]
    fn test_middle_column_is_neither_edge() {
        let config = MatcherConfig::default();
        for zone in [2, 5, 8] {
            for hand in [Handedness::Right, Handedness::Left] {
                assert!(!is_outside(zone, hand, &config));
                assert!(!is_inside(zone, hand, &config));
            }
        }
    }

    #[test]
    fn test_dirt_zones() {
        let config = MatcherConfig::default();
        assert!(is_in_dirt(13, &config));
        assert!(is_in_dirt(14, &config));
        assert!(!is_in_dirt(11, &config));
        assert!(!is_in_dirt(8, &config));
    }
}
