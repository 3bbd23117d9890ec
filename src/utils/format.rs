use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Format minutes as "Xh Ym", or "Ym" under an hour.
pub fn format_minutes(minutes: u64) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;
    if hours > 0 {
        format!("{}h {}m", hours, mins)
    } else {
        format!("{}m", mins)
    }
}

/// Stopwatch display, "MM:SS". Minutes keep growing past 59.
pub fn format_clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Whole minutes to log for a timed session; any started minute counts.
pub fn timer_minutes(secs: u64) -> u32 {
    secs.div_ceil(60).min(u32::MAX as u64) as u32
}

/// One decimal place, as shown next to "min/day".
pub fn format_average(avg: f64) -> String {
    format!("{:.1}", avg)
}

/// Create a simple ASCII progress bar from a 0-100 percentage
pub fn progress_bar(percent: f64, width: usize) -> String {
    let ratio = (percent / 100.0).clamp(0.0, 1.0);
    let filled_count = (ratio * width as f64).round() as usize;
    let empty_count = width.saturating_sub(filled_count);
    format!("{}{}", "█".repeat(filled_count), "░".repeat(empty_count))
}

/// Cut `text` to at most `width` terminal columns, ending with "…" when shortened.
pub fn truncate_to_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}
