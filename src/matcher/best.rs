//! Accumulation of matches across a run

use std::cmp::Ordering;

use super::policy::Evaluation;

/// The highest-scoring candidates seen so far
///
/// Folding a candidate that ties the best score appends it; a higher score
/// discards everything kept so far. The initial best score is zero, so the
/// first zero-scored candidate is kept.
#[derive(Debug, Clone, PartialEq)]
pub struct BestSet<T> {
    best_score: u8,
    items: Vec<T>,
}

impl<T> Default for BestSet<T> {
    fn default() -> Self {
        Self {
            best_score: 0,
            items: Vec::new(),
        }
    }
}

impl<T> BestSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn best_score(&self) -> u8 {
        self.best_score
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Offers a candidate with its score
    pub fn fold(mut self, score: u8, item: T) -> Self {
        match score.cmp(&self.best_score) {
            Ordering::Less => {}
            Ordering::Equal => self.items.push(item),
            Ordering::Greater => {
                self.best_score = score;
                self.items.clear();
                self.items.push(item);
            }
        }
        self
    }

    /// Consumes the set, ordering items by `key`
    pub fn into_sorted_by_key<K: Ord>(self, key: impl FnMut(&T) -> K) -> Vec<T> {
        let mut items = self.items;
        items.sort_by_key(key);
        items
    }
}

/// Per-season evaluation counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct YearTally {
    /// Every at-bat evaluated
    pub at_bats: usize,
    /// At-bats with a 0-3 count and exactly three pitches
    pub considered: usize,
    /// Considered at-bats missing a needed field
    pub bad_data: usize,
    pub matched: usize,
}

impl YearTally {
    pub fn record(&mut self, evaluation: &Evaluation) {
        self.at_bats += 1;
        match evaluation {
            Evaluation::Ineligible => return,
            Evaluation::Rejected => {}
            Evaluation::BadData => self.bad_data += 1,
            Evaluation::Match(_) => self.matched += 1,
        }
        self.considered += 1;
    }

    /// Share of considered at-bats that had to be skipped for missing data
    pub fn bad_data_rate(&self) -> f64 {
        if self.considered == 0 {
            0.0
        } else {
            self.bad_data as f64 / self.considered as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_best_set_update_law() {
        // (score, start time)
        let observed = [(2, 40), (5, 30), (5, 10), (3, 50), (5, 20)];

        let best = observed
            .iter()
            .fold(BestSet::new(), |set, &(score, time)| set.fold(score, time));

        assert_eq!(best.best_score(), 5);
        assert_eq!(best.len(), 3);
        assert_eq!(best.into_sorted_by_key(|&time| time), vec![10, 20, 30]);
    }

    #[test]
    fn test_higher_score_resets() {
        let best = BestSet::new().fold(1, "a").fold(1, "b").fold(4, "c");
        assert_eq!(best.items(), &["c"]);
        assert_eq!(best.best_score(), 4);
    }

    #[test]
    fn test_lower_score_is_ignored() {
        let best = BestSet::new().fold(3, "a").fold(2, "b");
        assert_eq!(best.items(), &["a"]);
    }

    #[test]
    fn test_zero_score_kept_initially() {
        let best = BestSet::new().fold(0, "a");
        assert_eq!(best.best_score(), 0);
        assert_eq!(best.items(), &["a"]);
        assert!(BestSet::<&str>::new().is_empty());
    }

    #[test]
    fn test_tally_counts() {
        let mut tally = YearTally::default();
        for evaluation in [
            Evaluation::Ineligible,
            Evaluation::Ineligible,
            Evaluation::Rejected,
            Evaluation::BadData,
            Evaluation::Match(Some(3)),
            Evaluation::Match(None),
        ] {
            tally.record(&evaluation);
        }

        assert_eq!(tally.at_bats, 6);
        assert_eq!(tally.considered, 4);
        assert_eq!(tally.bad_data, 1);
        assert_eq!(tally.matched, 2);
        assert!((tally.bad_data_rate() - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_empty_tally_rate_is_zero() {
        assert_eq!(YearTally::default().bad_data_rate(), 0.0);
    }
}
