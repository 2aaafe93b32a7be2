//! # Rating Statistics
//!
//! Display aggregates recomputed from the full rating set on every request.

use serde::Serialize;

use crate::models::{Rating, Stars};

/// Count, mean, per-star histogram and per-star percentages for one joke.
///
/// `histogram[0]` counts one-star ratings, `histogram[4]` five-star ones.
/// Percentages are rounded per bucket and may not add up to 100.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingStats {
    pub count: usize,
    pub average: f64,
    pub histogram: [u32; 5],
    pub percentages: [u32; 5],
}

impl RatingStats {
    pub fn compute<I>(ratings: I) -> Self
    where
        I: IntoIterator<Item = Stars>,
    {
        let mut histogram = [0u32; 5];
        let mut sum = 0u64;
        let mut count = 0usize;

        for stars in ratings {
            histogram[usize::from(stars.get() - 1)] += 1;
            sum += u64::from(stars.get());
            count += 1;
        }

        // An unrated joke shows 0 everywhere instead of dividing by zero.
        if count == 0 {
            return Self::empty();
        }

        let percentages = histogram.map(|bucket| round_half_up_percent(bucket, count));

        Self {
            count,
            average: sum as f64 / count as f64,
            histogram,
            percentages,
        }
    }

    pub fn from_ratings(ratings: &[Rating]) -> Self {
        Self::compute(ratings.iter().map(|r| r.value))
    }

    pub fn empty() -> Self {
        Self {
            count: 0,
            average: 0.0,
            histogram: [0; 5],
            percentages: [0; 5],
        }
    }

    /// Average with one decimal, as rendered next to the stars.
    pub fn average_display(&self) -> String {
        format!("{:.1}", self.average)
    }
}

/// `round(100 * part / whole)` with halves going up, in integer arithmetic.
fn round_half_up_percent(part: u32, whole: usize) -> u32 {
    let part = u64::from(part);
    let whole = whole as u64;
    ((200 * part + whole) / (2 * whole)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stars(values: &[i64]) -> Vec<Stars> {
        values.iter().map(|v| Stars::try_from(*v).unwrap()).collect()
    }

    #[test]
    fn empty_set_is_all_zero() {
        let stats = RatingStats::compute(Vec::new());
        assert_eq!(stats.count, 0);
        assert_eq!(stats.average, 0.0);
        assert_eq!(stats.histogram, [0, 0, 0, 0, 0]);
        assert_eq!(stats.percentages, [0, 0, 0, 0, 0]);
    }

    #[test]
    fn percentages_are_rounded_independently() {
        let stats = RatingStats::compute(stars(&[5, 5, 1]));
        assert_eq!(stats.count, 3);
        assert!((stats.average - 3.6667).abs() < 1e-4);
        assert_eq!(stats.histogram, [1, 0, 0, 0, 2]);
        assert_eq!(stats.percentages, [33, 0, 0, 0, 67]);
    }

    #[test]
    fn halves_round_up() {
        // 1/8 = 12.5% and 3/8 = 37.5%
        let stats = RatingStats::compute(stars(&[1, 2, 2, 2, 3, 3, 3, 3]));
        assert_eq!(stats.histogram, [1, 3, 4, 0, 0]);
        assert_eq!(stats.percentages, [13, 38, 50, 0, 0]);
    }

    #[test]
    fn percentages_may_overshoot_100() {
        // three buckets at 16.67% and one at 50% -> 17 + 17 + 17 + 50
        let stats = RatingStats::compute(stars(&[1, 2, 3, 4, 4, 4]));
        assert_eq!(stats.percentages, [17, 17, 17, 50, 0]);
        assert_eq!(stats.percentages.iter().sum::<u32>(), 101);
    }

    #[test]
    fn single_rating() {
        let stats = RatingStats::compute(stars(&[4]));
        assert_eq!(stats.count, 1);
        assert_eq!(stats.average, 4.0);
        assert_eq!(stats.percentages, [0, 0, 0, 100, 0]);
        assert_eq!(stats.average_display(), "4.0");
    }
}
