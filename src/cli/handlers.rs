use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use log::info;
use std::fmt::Write as _;

use crate::cli::args::clamp_minutes;
use crate::db::{KeyValueStore, ReadingRepo};
use crate::models::{AppSettings, MonthData, ReadingEntry, Tier};
use crate::tracker::{marker_positions, MonthReport, MonthRef};
use crate::utils::format::{format_average, format_minutes, progress_bar};

// ─── ANSI helpers ────────────────────────────────────────────────────────────

macro_rules! println_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        println!("\x1b[0m");
    }};
}

const GREEN: &str = "\x1b[32m";
const AMBER: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const GOLD: &str = "\x1b[38;2;196;160;68m";
const GREY: &str = "\x1b[38;2;148;163;184m";

fn tier_color(tier: Tier) -> &'static str {
    match tier {
        Tier::Noob => GREY,
        Tier::Pro => GREEN,
        Tier::Hacker => RED,
        Tier::God => GOLD,
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn month_or_current(month: Option<MonthRef>) -> Result<MonthRef> {
    month
        .or_else(MonthRef::current)
        .context("Today is outside the supported calendar range")
}

// ─── Log / book / delete / show ──────────────────────────────────────────────

pub fn handle_log<S: KeyValueStore>(
    repo: &ReadingRepo<S>,
    minutes: i64,
    date: Option<NaiveDate>,
    add: bool,
    books: &[String],
) -> Result<()> {
    let date = date.unwrap_or_else(today);
    let minutes = clamp_minutes(minutes);
    let mut data = repo.load_data()?;

    let mut entry = data.get(date).cloned().unwrap_or_default();
    entry.minutes = if add {
        entry.minutes.saturating_add(minutes)
    } else {
        minutes
    };
    for title in books {
        let title = title.trim();
        if !title.is_empty() {
            entry.books.push(title.to_string());
        }
    }
    data.upsert(date, entry.clone());
    repo.save_data(&data)?;
    info!("logged {} minutes on {}", entry.minutes, date);

    println_colored!(
        GREEN,
        "  ✓ {} — {} read",
        date.format("%a %b %d"),
        format_minutes(entry.minutes as u64)
    );
    if let Some(month) = MonthRef::from_date(date) {
        print_month_rank(repo, &data, month)?;
    }
    Ok(())
}

pub fn handle_book<S: KeyValueStore>(
    repo: &ReadingRepo<S>,
    title: &str,
    date: Option<NaiveDate>,
) -> Result<()> {
    let date = date.unwrap_or_else(today);
    if repo.add_book(date, title)? {
        println_colored!(GREEN, "  ✓ Added \"{}\" to {}", title.trim(), date);
    } else {
        println_colored!(AMBER, "  Book title is empty — nothing added");
    }
    Ok(())
}

pub fn handle_delete<S: KeyValueStore>(repo: &ReadingRepo<S>, date: Option<NaiveDate>) -> Result<()> {
    let date = date.unwrap_or_else(today);
    match repo.delete_entry(date)? {
        Some(entry) => println_colored!(
            RED,
            "  ✗ Deleted {} ({} minutes)",
            date,
            entry.minutes
        ),
        None => println_colored!(DIM, "  No record on {}", date),
    }
    Ok(())
}

pub fn handle_show<S: KeyValueStore>(repo: &ReadingRepo<S>, date: Option<NaiveDate>) -> Result<()> {
    let date = date.unwrap_or_else(today);
    let data = repo.load_data()?;
    println!();
    println_colored!(GOLD, "  {}", date.format("%A, %B %d %Y"));
    println!();
    match data.get(date) {
        None => println_colored!(DIM, "  Nothing recorded yet"),
        Some(entry) => print!("{}", render_entry(entry)),
    }
    println!();
    Ok(())
}

fn render_entry(entry: &ReadingEntry) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "  Minutes:  {}", entry.minutes);
    if entry.books.is_empty() {
        let _ = writeln!(out, "  Books:    —");
    } else {
        for (i, book) in entry.books.iter().enumerate() {
            let label = if i == 0 { "Books:" } else { "" };
            let _ = writeln!(out, "  {:<9} {}. {}", label, i + 1, book);
        }
    }
    out
}

// ─── Calendar ────────────────────────────────────────────────────────────────

pub fn handle_calendar<S: KeyValueStore>(
    repo: &ReadingRepo<S>,
    month: Option<MonthRef>,
) -> Result<()> {
    let month = month_or_current(month)?;
    let data = repo.load_data()?;
    let settings = repo.load_settings()?;
    let report = MonthReport::build(&data, &settings, month);
    println!();
    println_colored!(GOLD, "  {}", month);
    print!("{}", render_calendar(&data, &report));
    println_colored!(
        DIM,
        "  ✓ = weekly goal of {} met",
        format_minutes(settings.weekly_goal as u64)
    );
    println!();
    Ok(())
}

const CELL: usize = 7;

/// Monday-first month grid: one row of day numbers and one of minutes per week.
pub fn render_calendar(data: &MonthData, report: &MonthReport) -> String {
    let mut out = String::new();
    out.push_str("  ");
    for name in ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"] {
        let _ = write!(out, "{:>width$}", name, width = CELL);
    }
    let _ = writeln!(out, "{:>width$}", "Week", width = CELL + 2);

    for (week, summary) in report.interval.weeks().iter().zip(&report.weeks) {
        let mut days = String::from("  ");
        let mut mins = String::from("  ");
        for day in week {
            if report.interval.contains(*day) {
                let _ = write!(days, "{:>width$}", day.format("%-d").to_string(), width = CELL);
                let cell = match data.get(*day) {
                    Some(e) if e.minutes > 0 => format!("{}m", e.minutes),
                    Some(_) => "0m".to_string(),
                    None => String::new(),
                };
                let _ = write!(mins, "{:>width$}", cell, width = CELL);
            } else {
                let _ = write!(days, "{:>width$}", "·", width = CELL);
                let _ = write!(mins, "{:>width$}", "", width = CELL);
            }
        }
        let mark = if summary.goal_met { " ✓" } else { "" };
        let _ = writeln!(out, "{}", days);
        let _ = writeln!(
            out,
            "{}{:>width$}{}",
            mins,
            format!("{}m", summary.total_minutes),
            mark,
            width = CELL + 2
        );
    }
    out
}

// ─── Stats ───────────────────────────────────────────────────────────────────

pub fn handle_stats<S: KeyValueStore>(repo: &ReadingRepo<S>, month: Option<MonthRef>) -> Result<()> {
    let month = month_or_current(month)?;
    let data = repo.load_data()?;
    let settings = repo.load_settings()?;
    let report = MonthReport::build(&data, &settings, month);

    println!();
    println_colored!(GOLD, "  Reading Stats — {}", month);
    println!();
    println_colored!(
        BOLD,
        "  Month total:   {}",
        format_minutes(report.stats.total_minutes)
    );
    println!(
        "  Reading days:  {} / {}",
        report.stats.days_with_reading, report.stats.days_in_month
    );
    println!(
        "  Active avg:    {} min/day",
        format_average(report.stats.average_per_day)
    );
    if !report.stats.has_reading() {
        println_colored!(DIM, "  No reading logged this month yet");
    }
    print_rank(&report, &settings);

    let markers: Vec<String> = marker_positions(&settings.thresholds)
        .iter()
        .map(|(tier, pos)| format!("{} {:.0}%", tier, pos))
        .collect();
    println_colored!(DIM, "  Markers:       {}", markers.join("  ·  "));
    println!();
    Ok(())
}

fn print_month_rank<S: KeyValueStore>(
    repo: &ReadingRepo<S>,
    data: &MonthData,
    month: MonthRef,
) -> Result<()> {
    let settings = repo.load_settings()?;
    let report = MonthReport::build(data, &settings, month);
    print_rank(&report, &settings);
    Ok(())
}

fn print_rank(report: &MonthReport, settings: &AppSettings) {
    let rank = &report.rank;
    println_colored!(
        tier_color(rank.current),
        "  Rank:          {} {}",
        rank.current.icon(),
        rank.current
    );
    let bar = progress_bar(rank.progress_percent, 20);
    if rank.is_top() {
        println_colored!(GOLD, "  Progress:      {}  ULTIMATE GOD STATUS! 👑", bar);
        return;
    }
    if let (Some(next), Some(target)) = (rank.next, rank.next_daily_target()) {
        println!(
            "  Progress:      {}  {:.0}%  → {}",
            bar, rank.progress_percent, next
        );
        println_colored!(
            DIM,
            "  Need {} min/day avg for {} ({} min over {} days)",
            format_average(target),
            next,
            settings.thresholds.get(next),
            report.stats.days_in_month
        );
    }
}

// ─── Print summary ───────────────────────────────────────────────────────────

pub fn handle_print<S: KeyValueStore>(repo: &ReadingRepo<S>, month: Option<MonthRef>) -> Result<()> {
    let month = month_or_current(month)?;
    let data = repo.load_data()?;
    let settings = repo.load_settings()?;
    print!("{}", render_summary(&data, &settings, month));
    Ok(())
}

const BLANK: &str = "____________________";

/// Plain-text monthly summary for printing, with blanks to fill in by hand.
pub fn render_summary(data: &MonthData, settings: &AppSettings, month: MonthRef) -> String {
    let report = MonthReport::build(data, settings, month);
    let mut out = String::new();

    let _ = writeln!(out, "# Reading Log — {}", month);
    let _ = writeln!(out);
    let name = settings.student_name.trim();
    let _ = writeln!(
        out,
        "  Student:           {}",
        if name.is_empty() { BLANK } else { name }
    );
    let _ = writeln!(
        out,
        "  Total {} Minutes: {}",
        month.name(),
        report.stats.total_minutes
    );
    let _ = writeln!(out, "  Parent Signature:  {}", BLANK);
    let _ = writeln!(out, "  Date Submitted:    {}", BLANK);
    let _ = writeln!(out);

    let _ = writeln!(out, "## Summary");
    let _ = writeln!(
        out,
        "  Month total:  {} minutes",
        report.stats.total_minutes
    );
    let _ = writeln!(
        out,
        "  Reading days: {} of {}",
        report.stats.days_with_reading, report.stats.days_in_month
    );
    let _ = writeln!(
        out,
        "  Active avg:   {} min/day",
        format_average(report.stats.average_per_day)
    );
    let _ = writeln!(
        out,
        "  Rank:         {} {} ({:.0}% to {})",
        report.rank.current.icon(),
        report.rank.current,
        report.rank.progress_percent,
        report
            .rank
            .next
            .map(|t| t.label())
            .unwrap_or("the top")
    );
    let _ = writeln!(out);

    let _ = writeln!(out, "## Days");
    let mut any = false;
    for day in report.interval.month_days() {
        if let Some(entry) = data.get(day) {
            any = true;
            let books = if entry.books.is_empty() {
                String::new()
            } else {
                format!("  {}", entry.books.join(", "))
            };
            let _ = writeln!(
                out,
                "  {}  {:>4} min{}",
                day.format("%a %d"),
                entry.minutes,
                books
            );
        }
    }
    if !any {
        let _ = writeln!(out, "  (no reading recorded)");
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "## Weeks (goal {} min)", settings.weekly_goal);
    for week in &report.weeks {
        let _ = writeln!(
            out,
            "  from {}  {:>5} min  {}",
            week.start.format("%b %d"),
            week.total_minutes,
            if week.goal_met { "goal met" } else { "" }
        );
    }
    out
}

// ─── Settings ────────────────────────────────────────────────────────────────

pub fn handle_settings<S: KeyValueStore>(
    repo: &ReadingRepo<S>,
    name: Option<&str>,
    weekly_goal: Option<i64>,
    thresholds: &[(Tier, i64)],
    reset: bool,
) -> Result<()> {
    let mut settings = repo.load_settings()?;
    let changed = apply_settings(&mut settings, name, weekly_goal, thresholds, reset);
    if changed {
        repo.save_settings(&settings)?;
        info!("settings updated");
        println_colored!(GREEN, "  ✓ Settings saved");
    }

    println!();
    println_colored!(GOLD, "  Settings");
    println!();
    let name = if settings.student_name.is_empty() {
        "—"
    } else {
        settings.student_name.as_str()
    };
    println!("  Student:      {}", name);
    println!("  Weekly goal:  {} min", settings.weekly_goal);
    println!();
    for tier in Tier::ALL {
        println_colored!(
            tier_color(tier),
            "  {} {:<8} {:>5} min / month",
            tier.icon(),
            tier,
            settings.thresholds.get(tier)
        );
    }
    if !settings.thresholds.is_ascending() {
        println!();
        println_colored!(
            AMBER,
            "  Targets are not in ascending order; ranks may skip a tier"
        );
    }
    println!();
    Ok(())
}

/// Apply edits in place; returns whether anything was requested.
pub fn apply_settings(
    settings: &mut AppSettings,
    name: Option<&str>,
    weekly_goal: Option<i64>,
    thresholds: &[(Tier, i64)],
    reset: bool,
) -> bool {
    if reset {
        settings.reset();
    }
    if let Some(name) = name {
        settings.student_name = name.trim().to_string();
    }
    if let Some(goal) = weekly_goal {
        settings.weekly_goal = clamp_minutes(goal);
    }
    for (tier, minutes) in thresholds {
        settings.thresholds.set(*tier, clamp_minutes(*minutes));
    }
    reset || name.is_some() || weekly_goal.is_some() || !thresholds.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use crate::models::DEFAULT_THRESHOLDS;

    fn march() -> MonthRef {
        MonthRef::new(2026, 3).unwrap()
    }

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
    }

    #[test]
    fn test_handle_log_clamps_and_adds() {
        let repo = ReadingRepo::new(MemoryStore::new());
        handle_log(&repo, -10, Some(d(2)), false, &["Holes".to_string()]).unwrap();
        let data = repo.load_data().unwrap();
        assert_eq!(data.get(d(2)).unwrap().minutes, 0);

        handle_log(&repo, 20, Some(d(2)), true, &[]).unwrap();
        handle_log(&repo, 15, Some(d(2)), true, &["  ".to_string()]).unwrap();
        let entry = repo.load_data().unwrap().get(d(2)).cloned().unwrap();
        assert_eq!(entry.minutes, 35);
        assert_eq!(entry.books, vec!["Holes".to_string()]);

        handle_log(&repo, 5, Some(d(2)), false, &[]).unwrap();
        assert_eq!(repo.load_data().unwrap().minutes_on(d(2)), 5);
    }

    #[test]
    fn test_apply_settings() {
        let mut s = AppSettings::default();
        let changed = apply_settings(
            &mut s,
            Some(" Mia "),
            Some(-4),
            &[(Tier::Pro, 410), (Tier::God, -1)],
            false,
        );
        assert!(changed);
        assert_eq!(s.student_name, "Mia");
        assert_eq!(s.weekly_goal, 0);
        assert_eq!(s.thresholds.pro, 410);
        assert_eq!(s.thresholds.god, 0);

        assert!(apply_settings(&mut s, None, None, &[], true));
        assert_eq!(s.thresholds, DEFAULT_THRESHOLDS);
        assert!(!apply_settings(&mut s, None, None, &[], false));
    }

    #[test]
    fn test_render_calendar() {
        let mut data = MonthData::new();
        data.upsert(d(1), ReadingEntry::new(30, vec![]));
        data.upsert(d(3), ReadingEntry::new(120, vec![]));
        let report = MonthReport::build(&data, &AppSettings::default(), march());
        let text = render_calendar(&data, &report);
        let lines: Vec<&str> = text.lines().collect();
        // header + two lines per week, six weeks in March 2026
        assert_eq!(lines.len(), 13);
        assert!(lines[0].contains("Mon") && lines[0].contains("Week"));
        assert!(lines[1].trim_end().ends_with('1'));
        assert!(lines[2].contains("30m"));
        assert!(lines[4].contains("120m") && lines[4].ends_with('✓'));
    }

    #[test]
    fn test_render_summary() {
        let mut data = MonthData::new();
        data.upsert(d(4), ReadingEntry::new(40, vec!["Matilda".into(), "Holes".into()]));
        let settings = AppSettings {
            student_name: "Sam".into(),
            ..AppSettings::default()
        };
        let text = render_summary(&data, &settings, march());
        assert!(text.contains("# Reading Log — March 2026"));
        assert!(text.contains("Student:           Sam"));
        assert!(text.contains("Total March Minutes: 40"));
        assert!(text.contains("Month total:  40 minutes"));
        assert!(text.contains("Matilda, Holes"));
        assert!(text.contains("God"));
    }

    #[test]
    fn test_render_summary_empty_month() {
        let text = render_summary(&MonthData::new(), &AppSettings::default(), march());
        assert!(text.contains("(no reading recorded)"));
        assert!(text.contains("Student:           ____________________"));
        assert!(text.contains("Parent Signature:  ____________________"));
        assert!(text.contains("Date Submitted:    ____________________"));
        assert!(text.contains("Noob"));
    }
}
