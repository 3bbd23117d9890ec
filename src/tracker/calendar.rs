use chrono::{Datelike, Duration, Local, NaiveDate};
use std::str::FromStr;
use thiserror::Error;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MonthParseError {
    #[error("expected YYYY-MM, got '{0}'")]
    Format(String),
    #[error("month must be between 1 and 12, got {0}")]
    OutOfRange(u32),
    #[error("year {0} is outside the supported calendar range")]
    Unsupported(i32),
}

/// A calendar month, used for navigation and as the input of [`MonthInterval`].
///
/// Only months whose whole padded grid fits in chrono's date range can be
/// constructed, so resolving an interval never fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthRef {
    year: i32,
    month: u32,
    bounds: Bounds,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct Bounds {
    month_start: NaiveDate,
    month_end: NaiveDate,
    grid_start: NaiveDate,
    grid_end: NaiveDate,
}

impl Bounds {
    fn compute(year: i32, month: u32) -> Option<Self> {
        let month_start = NaiveDate::from_ymd_opt(year, month, 1)?;
        let (next_year, next_month) = if month == 12 {
            (year.checked_add(1)?, 1)
        } else {
            (year, month + 1)
        };
        let month_end = NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()?;

        let back = month_start.weekday().num_days_from_monday() as i64;
        let forward = 6 - month_end.weekday().num_days_from_monday() as i64;
        Some(Self {
            month_start,
            month_end,
            grid_start: month_start.checked_sub_signed(Duration::days(back))?,
            grid_end: month_end.checked_add_signed(Duration::days(forward))?,
        })
    }
}

impl MonthRef {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        let bounds = Bounds::compute(year, month)?;
        Some(Self {
            year,
            month,
            bounds,
        })
    }

    /// `None` for the few months at the edges of chrono's range.
    pub fn from_date(date: NaiveDate) -> Option<Self> {
        Self::new(date.year(), date.month())
    }

    pub fn current() -> Option<Self> {
        Self::from_date(Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        self.bounds.month_start
    }

    pub fn prev(&self) -> Option<Self> {
        if self.month == 1 {
            Self::new(self.year.checked_sub(1)?, 12)
        } else {
            Self::new(self.year, self.month - 1)
        }
    }

    pub fn next(&self) -> Option<Self> {
        if self.month == 12 {
            Self::new(self.year.checked_add(1)?, 1)
        } else {
            Self::new(self.year, self.month + 1)
        }
    }

    pub fn name(&self) -> &'static str {
        MONTH_NAMES[(self.month - 1) as usize]
    }
}

impl std::fmt::Display for MonthRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.name(), self.year)
    }
}

impl FromStr for MonthRef {
    type Err = MonthParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (y, m) = s
            .split_once('-')
            .ok_or_else(|| MonthParseError::Format(s.to_string()))?;
        let year: i32 = y.parse().map_err(|_| MonthParseError::Format(s.to_string()))?;
        let month: u32 = m.parse().map_err(|_| MonthParseError::Format(s.to_string()))?;
        if !(1..=12).contains(&month) {
            return Err(MonthParseError::OutOfRange(month));
        }
        Self::new(year, month).ok_or(MonthParseError::Unsupported(year))
    }
}

/// The exact month range plus the Monday-first grid that pads it to whole weeks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthInterval {
    pub month: MonthRef,
    pub month_start: NaiveDate,
    pub month_end: NaiveDate,
    pub grid_start: NaiveDate,
    pub grid_end: NaiveDate,
}

impl MonthInterval {
    pub fn resolve(month: MonthRef) -> Self {
        let Bounds {
            month_start,
            month_end,
            grid_start,
            grid_end,
        } = month.bounds;
        Self {
            month,
            month_start,
            month_end,
            grid_start,
            grid_end,
        }
    }

    /// Every day shown in the month view, Monday first.
    pub fn grid_days(&self) -> Vec<NaiveDate> {
        days_between(self.grid_start, self.grid_end)
    }

    pub fn month_days(&self) -> Vec<NaiveDate> {
        days_between(self.month_start, self.month_end)
    }

    pub fn day_count(&self) -> u32 {
        (self.month_end - self.month_start).num_days() as u32 + 1
    }

    /// Grid split into rows of seven days.
    pub fn weeks(&self) -> Vec<Vec<NaiveDate>> {
        self.grid_days().chunks(7).map(|w| w.to_vec()).collect()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.month_start && date <= self.month_end
    }
}

fn days_between(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take_while(|d| *d <= end).collect()
}
