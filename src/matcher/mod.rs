//! Sequence matcher
//!
//! Decides whether an at-bat is a three-pitch strikeout thrown slider (or
//! sweeper), curveball (or knuckle-curve), fastball (or sinker), and judges
//! it under the selected [`MatchPolicy`].

mod best;
mod policy;
mod zones;

pub use best::{BestSet, YearTally};
pub use policy::{evaluate, qualifying_pitches, Evaluation, MatchPolicy, SequenceFeatures, MAX_SCORE};
pub use zones::{classify, inside_zones, is_in_dirt, is_inside, is_outside, outside_zones, PitchFamily, SEQUENCE};
