use crate::models::{MonthData, MonthlyStats, WeekSummary};
use crate::tracker::calendar::MonthInterval;

/// Fold the entry map over the month's days.
///
/// Only entries with `minutes > 0` count toward the total and the number of
/// reading days. Padding days from neighbouring months are ignored.
pub fn monthly_stats(data: &MonthData, interval: &MonthInterval) -> MonthlyStats {
    let mut total_minutes = 0u64;
    let mut days_with_reading = 0u32;

    for day in interval.month_days() {
        if let Some(entry) = data.get(day) {
            if entry.minutes > 0 {
                total_minutes += entry.minutes as u64;
                days_with_reading += 1;
            }
        }
    }

    let average_per_day = if days_with_reading > 0 {
        total_minutes as f64 / days_with_reading as f64
    } else {
        0.0
    };

    MonthlyStats {
        total_minutes,
        days_with_reading,
        average_per_day,
        days_in_month: interval.day_count(),
    }
}

/// One summary per grid row, counting in-month days only.
pub fn week_summaries(
    data: &MonthData,
    interval: &MonthInterval,
    weekly_goal: u32,
) -> Vec<WeekSummary> {
    interval
        .weeks()
        .into_iter()
        .map(|week| {
            let total_minutes: u64 = week
                .iter()
                .filter(|d| interval.contains(**d))
                .map(|d| data.minutes_on(*d) as u64)
                .sum();
            WeekSummary {
                start: week[0],
                total_minutes,
                goal_met: total_minutes >= weekly_goal as u64,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReadingEntry;
    use crate::tracker::calendar::MonthRef;
    use chrono::NaiveDate;

    fn march() -> MonthInterval {
        MonthInterval::resolve(MonthRef::new(2026, 3).unwrap())
    }

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, m, day).unwrap()
    }

    #[test]
    fn test_empty_month_has_zero_average() {
        let stats = monthly_stats(&MonthData::new(), &march());
        assert_eq!(stats.total_minutes, 0);
        assert_eq!(stats.days_with_reading, 0);
        assert_eq!(stats.average_per_day, 0.0);
        assert!(!stats.average_per_day.is_nan());
        assert_eq!(stats.days_in_month, 31);
    }

    #[test]
    fn test_average_over_reading_days_only() {
        let mut data = MonthData::new();
        data.upsert(d(3, 1), ReadingEntry::new(20, vec![]));
        data.upsert(d(3, 2), ReadingEntry::new(0, vec!["Skimmed".into()]));
        data.upsert(d(3, 15), ReadingEntry::new(40, vec![]));
        let stats = monthly_stats(&data, &march());
        assert_eq!(stats.total_minutes, 60);
        assert_eq!(stats.days_with_reading, 2);
        assert_eq!(stats.average_per_day, 30.0);
        assert!(stats.has_reading());
    }

    #[test]
    fn test_padding_days_are_excluded() {
        let mut data = MonthData::new();
        // Feb 23 and Apr 5 are visible in the March grid but outside the month
        data.upsert(d(2, 23), ReadingEntry::new(100, vec![]));
        data.upsert(d(4, 5), ReadingEntry::new(100, vec![]));
        data.upsert(d(3, 31), ReadingEntry::new(12, vec![]));
        let stats = monthly_stats(&data, &march());
        assert_eq!(stats.total_minutes, 12);
        assert_eq!(stats.days_with_reading, 1);
    }

    #[test]
    fn test_week_summaries() {
        let mut data = MonthData::new();
        data.upsert(d(2, 28), ReadingEntry::new(500, vec![]));
        data.upsert(d(3, 1), ReadingEntry::new(30, vec![]));
        data.upsert(d(3, 2), ReadingEntry::new(60, vec![]));
        data.upsert(d(3, 3), ReadingEntry::new(50, vec![]));

        let weeks = week_summaries(&data, &march(), 100);
        assert_eq!(weeks.len(), 6);
        assert_eq!(weeks[0].start, d(2, 23));
        assert_eq!(weeks[0].total_minutes, 30);
        assert!(!weeks[0].goal_met);
        assert_eq!(weeks[1].start, d(3, 2));
        assert_eq!(weeks[1].total_minutes, 110);
        assert!(weeks[1].goal_met);
    }

    #[test]
    fn test_zero_weekly_goal_always_met() {
        let weeks = week_summaries(&MonthData::new(), &march(), 0);
        assert!(weeks.iter().all(|w| w.goal_met));
    }
}
