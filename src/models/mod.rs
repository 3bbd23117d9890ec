pub mod entry;
pub mod settings;
pub mod stats;
pub mod tier;

pub use entry::{MonthData, ReadingEntry};
pub use settings::AppSettings;
pub use stats::{MonthlyStats, WeekSummary};
pub use tier::{LevelThresholds, Tier, DEFAULT_THRESHOLDS};
