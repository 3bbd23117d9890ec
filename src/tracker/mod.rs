//! Pure reward math: calendar intervals, monthly aggregation and tier ranking.

pub mod aggregate;
pub mod calendar;
pub mod rank;

pub use aggregate::{monthly_stats, week_summaries};
pub use calendar::{MonthInterval, MonthParseError, MonthRef};
pub use rank::{daily_threshold, marker_positions, RankProgress};

use crate::models::{AppSettings, MonthData, MonthlyStats, WeekSummary};

/// Everything the month view needs, derived from one snapshot.
#[derive(Debug, Clone)]
pub struct MonthReport {
    pub interval: MonthInterval,
    pub stats: MonthlyStats,
    pub rank: RankProgress,
    pub weeks: Vec<WeekSummary>,
}

impl MonthReport {
    pub fn build(data: &MonthData, settings: &AppSettings, month: MonthRef) -> Self {
        let interval = MonthInterval::resolve(month);
        let stats = monthly_stats(data, &interval);
        let rank = RankProgress::compute(
            stats.average_per_day,
            &settings.thresholds,
            stats.days_in_month,
        );
        let weeks = week_summaries(data, &interval, settings.weekly_goal);
        Self {
            interval,
            stats,
            rank,
            weeks,
        }
    }
}
