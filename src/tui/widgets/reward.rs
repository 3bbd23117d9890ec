use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::models::{LevelThresholds, MonthlyStats, Tier};
use crate::tracker::{marker_positions, RankProgress};
use crate::tui::theme;
use crate::utils::format::{format_average, format_minutes};

/// Progress bar with a `│` at each tier's marker position.
///
/// Fill follows the daily-average progress toward the next tier while markers
/// follow the monthly targets relative to God, so the two scales differ.
pub fn marker_bar(progress_percent: f64, thresholds: &LevelThresholds, width: usize) -> (String, String) {
    if width == 0 {
        return (String::new(), String::new());
    }
    let filled = ((progress_percent / 100.0).clamp(0.0, 1.0) * width as f64).round() as usize;
    let mut bar: Vec<char> = (0..width)
        .map(|i| if i < filled { '█' } else { '░' })
        .collect();
    let mut labels: Vec<char> = vec![' '; width];

    for (tier, pos) in marker_positions(thresholds) {
        let idx = ((pos / 100.0) * width as f64).round() as usize;
        let idx = idx.min(width - 1);
        bar[idx] = '│';
        let initial = tier.label().chars().next().unwrap_or('?');
        labels[idx] = initial;
    }

    (bar.into_iter().collect(), labels.into_iter().collect())
}

pub fn render(
    frame: &mut Frame,
    area: Rect,
    stats: &MonthlyStats,
    rank: &RankProgress,
    thresholds: &LevelThresholds,
) {
    let tier_style = theme::tier(rank.current);
    let block = Block::default()
        .title(Span::styled(" Current Rank ", theme::gold()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(tier_style)
        .style(theme::surface());

    let badge = Line::from(vec![
        Span::styled(format!("  {} ", rank.current.icon()), tier_style),
        Span::styled(rank.current.label(), tier_style.add_modifier(Modifier::REVERSED)),
        Span::styled("   Active daily avg ", theme::dim()),
        Span::styled(format_average(stats.average_per_day), theme::sky().add_modifier(Modifier::BOLD)),
        Span::styled(" min/day", theme::dim()),
        Span::styled("   Month total ", theme::dim()),
        Span::styled(format_minutes(stats.total_minutes), theme::sky().add_modifier(Modifier::BOLD)),
    ]);

    let bar_width = area.width.saturating_sub(6) as usize;
    let (bar, labels) = marker_bar(rank.progress_percent, thresholds, bar_width);
    let bar_style = if rank.current == Tier::God {
        theme::gold()
    } else {
        theme::sky()
    };

    let hint = match (rank.next, rank.next_daily_target()) {
        (Some(next), Some(target)) => Line::from(vec![
            Span::styled(format!("  {:.0}%", rank.progress_percent), theme::bold()),
            Span::styled(
                format!(" · Need {} min/day avg for {}", format_average(target), next),
                theme::dim(),
            ),
        ]),
        _ => Line::from(Span::styled(
            "  ULTIMATE GOD STATUS! 👑",
            theme::gold().add_modifier(Modifier::BOLD),
        )),
    };

    let footnote = Line::from(Span::styled(
        format!(
            "  Ranks compare your active daily average to monthly goals divided by {} days",
            stats.days_in_month
        ),
        theme::dim().add_modifier(Modifier::ITALIC),
    ));

    let text = vec![
        badge,
        Line::from(""),
        Line::from(vec![Span::raw("  "), Span::styled(bar, bar_style)]),
        Line::from(vec![Span::raw("  "), Span::styled(labels, theme::dim())]),
        hint,
        footnote,
    ];
    frame.render_widget(Paragraph::new(text).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DEFAULT_THRESHOLDS;

    #[test]
    fn test_marker_bar_places_markers() {
        let (bar, labels) = marker_bar(0.0, &DEFAULT_THRESHOLDS, 20);
        assert_eq!(bar.chars().count(), 20);
        // 60%, 80%, 90%, and 100% clamped to the last column
        assert_eq!(labels, "            N   P HG");
        assert_eq!(bar, "░░░░░░░░░░░░│░░░│░││");
    }

    #[test]
    fn test_marker_bar_fill() {
        let (bar, _) = marker_bar(50.0, &DEFAULT_THRESHOLDS, 10);
        assert!(bar.starts_with("█████░"));
    }

    #[test]
    fn test_marker_bar_zero_width() {
        assert_eq!(marker_bar(50.0, &DEFAULT_THRESHOLDS, 0), (String::new(), String::new()));
    }
}
