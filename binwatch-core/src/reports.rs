//! Static report figures shown on the reports screen.

use chrono::{Month, Weekday};

use crate::model::BinCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Average fill level per category on one weekday.
pub struct WeeklyFill {
    /// Day of the week.
    pub day: Weekday,
    /// Percentages in [`BinCategory::ALL`] order.
    pub levels: [u8; 5],
}

impl WeeklyFill {
    /// Level recorded for `category` on this day.
    #[must_use]
    pub fn level(&self, category: BinCategory) -> u8 {
        BinCategory::ALL
            .iter()
            .zip(self.levels)
            .find_map(|(candidate, level)| (*candidate == category).then_some(level))
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Average fill level across all bins for one month.
pub struct MonthlyFill {
    /// Calendar month.
    pub month: Month,
    /// Average fill percentage.
    pub fill_level: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Share of collected waste by category.
pub struct CategoryShare {
    /// Waste category.
    pub category: BinCategory,
    /// Percentage of the total volume.
    pub percent: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Headline figures above the report charts.
pub struct ReportSummary {
    /// Collections this week.
    pub total_collections: u32,
    /// Change in collections against last week, in percent.
    pub collection_change_pct: i32,
    /// Average fill level across the fleet.
    pub average_fill: u8,
    /// Bins currently reporting.
    pub active_bins: usize,
    /// Bins registered.
    pub total_bins: usize,
}

/// Fill levels for the last week, Monday first.
#[must_use]
pub fn weekly_fill_levels() -> Vec<WeeklyFill> {
    // tiny-particle, plastic, metal, solid-waste, sanitary-waste
    [
        (Weekday::Mon, [25, 65, 45, 80, 30]),
        (Weekday::Tue, [35, 75, 55, 70, 40]),
        (Weekday::Wed, [40, 85, 65, 90, 35]),
        (Weekday::Thu, [30, 70, 50, 85, 45]),
        (Weekday::Fri, [45, 90, 70, 95, 50]),
        (Weekday::Sat, [20, 60, 40, 75, 25]),
        (Weekday::Sun, [15, 50, 35, 60, 20]),
    ]
    .into_iter()
    .map(|(day, levels)| WeeklyFill { day, levels })
    .collect()
}

/// Fleet-wide fill trend for the first half of the year.
#[must_use]
pub fn monthly_trend() -> Vec<MonthlyFill> {
    [
        (Month::January, 65),
        (Month::February, 72),
        (Month::March, 68),
        (Month::April, 75),
        (Month::May, 82),
        (Month::June, 78),
    ]
    .into_iter()
    .map(|(month, fill_level)| MonthlyFill { month, fill_level })
    .collect()
}

/// Waste volume distribution, largest share first.
#[must_use]
pub fn category_distribution() -> Vec<CategoryShare> {
    [
        (BinCategory::Plastic, 35),
        (BinCategory::Metal, 25),
        (BinCategory::SolidWaste, 20),
        (BinCategory::SanitaryWaste, 15),
        (BinCategory::TinyParticle, 5),
    ]
    .into_iter()
    .map(|(category, percent)| CategoryShare { category, percent })
    .collect()
}

/// Headline figures for a fleet of `bins` registered bins, all online.
#[must_use]
pub fn summary(bins: usize) -> ReportSummary {
    ReportSummary {
        total_collections: 156,
        collection_change_pct: 12,
        average_fill: 73,
        active_bins: bins,
        total_bins: bins,
    }
}
