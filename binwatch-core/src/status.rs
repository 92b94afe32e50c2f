//! Fill-level classification into status tiers.

use crate::model::{BinRecord, StatusTier};

/// Lowest fill level classified as [`StatusTier::Medium`].
pub const MEDIUM_THRESHOLD: i32 = 60;
/// Lowest fill level classified as [`StatusTier::High`].
pub const HIGH_THRESHOLD: i32 = 85;

/// Map a fill percentage to its status tier.
///
/// The value is not range checked: anything below zero is `Low` and
/// anything above 100 is `High`. Keeping levels within `0..=100` is up to
/// whoever writes them.
#[must_use]
pub fn classify(fill_level: i32) -> StatusTier {
    if fill_level < MEDIUM_THRESHOLD {
        StatusTier::Low
    } else if fill_level < HIGH_THRESHOLD {
        StatusTier::Medium
    } else {
        StatusTier::High
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Number of bins in each status tier.
pub struct StatusCounts {
    /// Bins below the medium threshold.
    pub low: usize,
    /// Bins between the medium and high thresholds.
    pub medium: usize,
    /// Bins at or above the high threshold.
    pub high: usize,
}

impl StatusCounts {
    /// Count bins per tier.
    #[must_use]
    pub fn tally(bins: &[BinRecord]) -> Self {
        bins.iter()
            .fold(Self::default(), |mut counts, bin| {
                match bin.status() {
                    StatusTier::Low => counts.low += 1,
                    StatusTier::Medium => counts.medium += 1,
                    StatusTier::High => counts.high += 1,
                }
                counts
            })
    }

    /// Number of bins counted.
    #[must_use]
    pub fn total(&self) -> usize {
        self.low + self.medium + self.high
    }

    /// Count for a single tier.
    #[must_use]
    pub fn get(&self, tier: StatusTier) -> usize {
        match tier {
            StatusTier::Low => self.low,
            StatusTier::Medium => self.medium,
            StatusTier::High => self.high,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BinCategory, FillLevel, LastUpdated};

    #[test]
    fn low_tier_covers_zero_to_fifty_nine() {
        for fill in 0..=59 {
            assert_eq!(classify(fill), StatusTier::Low, "fill {fill}");
        }
    }

    #[test]
    fn medium_tier_covers_sixty_to_eighty_four() {
        for fill in 60..=84 {
            assert_eq!(classify(fill), StatusTier::Medium, "fill {fill}");
        }
    }

    #[test]
    fn high_tier_covers_eighty_five_to_hundred() {
        for fill in 85..=100 {
            assert_eq!(classify(fill), StatusTier::High, "fill {fill}");
        }
    }

    #[test]
    fn thresholds_are_exact() {
        assert_eq!(classify(59), StatusTier::Low);
        assert_eq!(classify(60), StatusTier::Medium);
        assert_eq!(classify(84), StatusTier::Medium);
        assert_eq!(classify(85), StatusTier::High);
    }

    #[test]
    fn out_of_range_values_are_not_rejected() {
        assert_eq!(classify(-20), StatusTier::Low);
        assert_eq!(classify(140), StatusTier::High);
    }

    #[test]
    fn tally_counts_each_tier() {
        let bins: Vec<BinRecord> = [25, 78, 92, 45, 67]
            .into_iter()
            .enumerate()
            .map(|(idx, fill)| {
                BinRecord::new(
                    format!("BIN-{idx}").as_str(),
                    BinCategory::Plastic,
                    FillLevel::clamped(fill),
                    "Test",
                    LastUpdated::JustNow,
                )
            })
            .collect();

        let counts = StatusCounts::tally(&bins);

        assert_eq!(
            counts,
            StatusCounts {
                low: 2,
                medium: 2,
                high: 1
            }
        );
        assert_eq!(counts.total(), 5);
        assert_eq!(counts.get(StatusTier::High), 1);
    }
}
