use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::models::Tier;
use crate::tracker::MonthRef;

#[derive(Parser, Debug)]
#[command(name = "reading-buddy", version, author, about = "A cheerful terminal reading log with monthly reward ranks")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Record reading minutes for a day (replaces the day's minutes)
    Log {
        /// Minutes read; negative values count as 0
        #[arg(allow_negative_numbers = true)]
        minutes: i64,
        /// Day to record (YYYY-MM-DD), defaults to today
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
        /// Add to the day's minutes instead of replacing them
        #[arg(long)]
        add: bool,
        /// Book title read that day (repeatable)
        #[arg(long = "book")]
        books: Vec<String>,
    },
    /// Add a book title to a day
    Book {
        /// Book title
        title: String,
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },
    /// Delete a day's record
    Delete {
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },
    /// Show one day's record
    Show {
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },
    /// Print the month calendar with weekly totals
    Calendar {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(long)]
        month: Option<MonthRef>,
    },
    /// Show monthly totals and rank progress
    Stats {
        #[arg(long)]
        month: Option<MonthRef>,
    },
    /// Print a paper-friendly monthly summary to stdout
    Print {
        #[arg(long)]
        month: Option<MonthRef>,
    },
    /// Show or edit reward settings
    Settings {
        /// Student name shown on summaries
        #[arg(long)]
        name: Option<String>,
        /// Weekly minute goal
        #[arg(long, allow_negative_numbers = true)]
        weekly_goal: Option<i64>,
        /// Monthly minute target for a tier, e.g. --threshold pro=400 (repeatable)
        #[arg(long = "threshold", value_parser = parse_threshold)]
        thresholds: Vec<(Tier, i64)>,
        /// Restore default settings before applying other flags
        #[arg(long)]
        reset: bool,
    },
}

pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| format!("expected YYYY-MM-DD, got '{}'", s))
}

pub fn parse_threshold(s: &str) -> Result<(Tier, i64), String> {
    let (tier, minutes) = s
        .split_once('=')
        .ok_or_else(|| format!("expected TIER=MINUTES, got '{}'", s))?;
    let tier: Tier = tier.parse().map_err(|e: anyhow::Error| e.to_string())?;
    let minutes: i64 = minutes
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a whole number", minutes))?;
    Ok((tier, minutes))
}

/// Negative input is floored at zero rather than rejected.
pub fn clamp_minutes(value: i64) -> u32 {
    value.clamp(0, u32::MAX as i64) as u32
}
