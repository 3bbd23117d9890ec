use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Month totals, recomputed from the entry map on every render.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyStats {
    pub total_minutes: u64,
    pub days_with_reading: u32,
    /// Minutes per day with reading; 0.0 when nothing was read.
    pub average_per_day: f64,
    pub days_in_month: u32,
}

impl MonthlyStats {
    pub fn has_reading(&self) -> bool {
        self.days_with_reading > 0
    }
}

/// Totals for one row of the calendar grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekSummary {
    pub start: NaiveDate,
    pub total_minutes: u64,
    pub goal_met: bool,
}
