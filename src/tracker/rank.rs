use serde::{Deserialize, Serialize};

use crate::models::{LevelThresholds, Tier};

/// A tier's monthly target spread over the days of the month.
///
/// A zero-day period is treated as a single day.
pub fn daily_threshold(thresholds: &LevelThresholds, tier: Tier, days_in_month: u32) -> f64 {
    thresholds.get(tier) as f64 / days_in_month.max(1) as f64
}

/// Where each tier's marker sits on a 0-100 bar, relative to God's monthly target.
///
/// These are monthly ratios, not daily-normalized values. A zero God target puts
/// every marker at the end of the bar.
pub fn marker_positions(thresholds: &LevelThresholds) -> [(Tier, f64); 4] {
    let ceiling = thresholds.get(Tier::God) as f64;
    Tier::ALL.map(|tier| {
        let pos = if ceiling > 0.0 {
            thresholds.get(tier) as f64 * 100.0 / ceiling
        } else {
            100.0
        };
        (tier, pos.clamp(0.0, 100.0))
    })
}

/// Current rank and progress toward the next one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankProgress {
    pub current: Tier,
    pub next: Option<Tier>,
    /// 0.0..=100.0
    pub progress_percent: f64,
    next_daily_target: Option<f64>,
}

impl RankProgress {
    /// Rank an active daily average against the thresholds.
    ///
    /// Tiers are walked from Noob upward and each one whose daily threshold is met
    /// replaces the previous; Noob is kept when nothing is met. Thresholds are not
    /// required to ascend, so an inverted pair can skip a tier.
    pub fn compute(average_per_day: f64, thresholds: &LevelThresholds, days_in_month: u32) -> Self {
        let average = if average_per_day.is_finite() {
            average_per_day.max(0.0)
        } else {
            0.0
        };
        let daily = |tier: Tier| daily_threshold(thresholds, tier, days_in_month);

        let current = Tier::ALL.iter().fold(Tier::Noob, |prev, &tier| {
            if average >= daily(tier) { tier } else { prev }
        });
        let next = current.next();

        let progress_percent = match next {
            Some(next_tier) => {
                let lo = daily(current);
                let hi = daily(next_tier);
                let range = hi - lo;
                if range > 0.0 {
                    ((average - lo) / range * 100.0).clamp(0.0, 100.0)
                } else {
                    100.0
                }
            }
            None => 100.0,
        };

        Self {
            current,
            next,
            progress_percent,
            next_daily_target: next.map(daily),
        }
    }

    /// Minutes per day needed for the next tier, if there is one.
    pub fn next_daily_target(&self) -> Option<f64> {
        self.next_daily_target
    }

    pub fn is_top(&self) -> bool {
        self.next.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DEFAULT_THRESHOLDS;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_scenario_exact_noob_threshold() {
        let r = RankProgress::compute(10.0, &DEFAULT_THRESHOLDS, 30);
        assert_eq!(r.current, Tier::Noob);
        assert_eq!(r.next, Some(Tier::Pro));
        assert!(r.progress_percent.abs() < EPS);
        assert!((r.next_daily_target().unwrap() - 400.0 / 30.0).abs() < EPS);
    }

    #[test]
    fn test_scenario_god() {
        let r = RankProgress::compute(500.0 / 30.0, &DEFAULT_THRESHOLDS, 30);
        assert_eq!(r.current, Tier::God);
        assert_eq!(r.next, None);
        assert_eq!(r.progress_percent, 100.0);
        assert!(r.is_top());
        assert_eq!(r.next_daily_target(), None);

        let r = RankProgress::compute(16.67, &DEFAULT_THRESHOLDS, 30);
        assert_eq!(r.current, Tier::God);
    }

    #[test]
    fn test_scenario_no_reading() {
        let r = RankProgress::compute(0.0, &DEFAULT_THRESHOLDS, 31);
        assert_eq!(r.current, Tier::Noob);
        assert_eq!(r.progress_percent, 0.0);
    }

    #[test]
    fn test_midway_progress() {
        // Pro daily 400/20 = 20, Hacker daily 450/20 = 22.5
        let r = RankProgress::compute(21.25, &DEFAULT_THRESHOLDS, 20);
        assert_eq!(r.current, Tier::Pro);
        assert_eq!(r.next, Some(Tier::Hacker));
        assert!((r.progress_percent - 50.0).abs() < EPS);
    }

    #[test]
    fn test_monotonic_in_average() {
        let mut prev = RankProgress::compute(0.0, &DEFAULT_THRESHOLDS, 30);
        let mut avg = 0.0;
        while avg < 25.0 {
            avg += 0.1;
            let r = RankProgress::compute(avg, &DEFAULT_THRESHOLDS, 30);
            assert!(r.current >= prev.current);
            if r.current == prev.current {
                assert!(r.progress_percent >= prev.progress_percent);
            }
            prev = r;
        }
        assert_eq!(prev.current, Tier::God);
    }

    #[test]
    fn test_idempotent() {
        let a = RankProgress::compute(14.2, &DEFAULT_THRESHOLDS, 28);
        let b = RankProgress::compute(14.2, &DEFAULT_THRESHOLDS, 28);
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_thresholds_are_trivially_met() {
        let t = LevelThresholds {
            noob: 0,
            pro: 0,
            hacker: 0,
            god: 0,
        };
        let r = RankProgress::compute(0.0, &t, 30);
        assert_eq!(r.current, Tier::God);
        assert_eq!(r.progress_percent, 100.0);
    }

    #[test]
    fn test_equal_neighbour_thresholds_report_full_progress() {
        let t = LevelThresholds {
            noob: 300,
            pro: 400,
            hacker: 400,
            god: 500,
        };
        // Meets Pro and Hacker together; range to God is positive
        let r = RankProgress::compute(400.0 / 30.0, &t, 30);
        assert_eq!(r.current, Tier::Hacker);
        assert!(r.progress_percent.abs() < EPS);

        let flat = LevelThresholds {
            noob: 300,
            pro: 300,
            hacker: 450,
            god: 500,
        };
        // Noob and Pro share a target, so the step to Pro is empty
        let r = RankProgress::compute(1.0, &flat, 30);
        assert_eq!(r.current, Tier::Noob);
        assert_eq!(r.progress_percent, 100.0);
    }

    #[test]
    fn test_inverted_thresholds_clamp_progress() {
        let t = LevelThresholds {
            noob: 300,
            pro: 600,
            hacker: 450,
            god: 900,
        };
        // 16/day meets Noob (10) and Hacker (15) but not Pro (20)
        let r = RankProgress::compute(16.0, &t, 30);
        assert_eq!(r.current, Tier::Hacker);
        assert_eq!(r.next, Some(Tier::God));
        assert!(r.progress_percent >= 0.0 && r.progress_percent <= 100.0);
    }

    #[test]
    fn test_below_current_floor_clamps_to_zero() {
        // Noob is the floor even when unearned; progress never goes negative
        let r = RankProgress::compute(2.0, &DEFAULT_THRESHOLDS, 30);
        assert_eq!(r.current, Tier::Noob);
        assert_eq!(r.progress_percent, 0.0);
    }

    #[test]
    fn test_degenerate_inputs() {
        let r = RankProgress::compute(f64::NAN, &DEFAULT_THRESHOLDS, 30);
        assert_eq!(r.current, Tier::Noob);
        let r = RankProgress::compute(-5.0, &DEFAULT_THRESHOLDS, 30);
        assert_eq!(r.progress_percent, 0.0);
        let r = RankProgress::compute(600.0, &DEFAULT_THRESHOLDS, 0);
        assert_eq!(r.current, Tier::God);
    }

    #[test]
    fn test_marker_positions() {
        let pos = marker_positions(&DEFAULT_THRESHOLDS);
        assert_eq!(pos[0], (Tier::Noob, 60.0));
        assert_eq!(pos[1], (Tier::Pro, 80.0));
        assert_eq!(pos[2], (Tier::Hacker, 90.0));
        assert_eq!(pos[3], (Tier::God, 100.0));
    }

    #[test]
    fn test_marker_positions_degenerate() {
        let zero_god = LevelThresholds {
            noob: 0,
            pro: 0,
            hacker: 0,
            god: 0,
        };
        assert!(marker_positions(&zero_god).iter().all(|(_, p)| *p == 100.0));

        let inverted = LevelThresholds {
            noob: 300,
            pro: 800,
            hacker: 450,
            god: 500,
        };
        assert_eq!(marker_positions(&inverted)[1].1, 100.0);
    }

    #[test]
    fn test_daily_threshold() {
        assert_eq!(daily_threshold(&DEFAULT_THRESHOLDS, Tier::Noob, 30), 10.0);
        assert_eq!(daily_threshold(&DEFAULT_THRESHOLDS, Tier::God, 0), 500.0);
    }
}
