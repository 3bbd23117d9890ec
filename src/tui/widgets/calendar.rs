use chrono::NaiveDate;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::models::MonthData;
use crate::tracker::MonthReport;
use crate::tui::theme;
use crate::utils::format::truncate_to_width;

const WEEK_COL: usize = 10;
const DAY_NAMES: [&str; 7] = ["MON", "TUE", "WED", "THU", "FRI", "SAT", "SUN"];

/// Left-align `text` in exactly `width` columns.
fn pad(text: &str, width: usize) -> String {
    let cut = truncate_to_width(text, width);
    let fill = width.saturating_sub(cut.width());
    format!("{}{}", cut, " ".repeat(fill))
}

pub struct CalendarView<'a> {
    pub data: &'a MonthData,
    pub report: &'a MonthReport,
    pub selected: NaiveDate,
    pub today: NaiveDate,
    pub show_books: bool,
    pub weekly_goal: u32,
}

pub fn render(frame: &mut Frame, area: Rect, view: &CalendarView) {
    let block = Block::default()
        .title(Span::styled(" Calendar ", theme::gold()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border())
        .style(theme::surface());

    let inner_width = area.width.saturating_sub(2) as usize;
    let cell = (inner_width.saturating_sub(WEEK_COL) / 7).max(4);

    let mut lines = Vec::new();
    let mut header = Vec::new();
    for name in DAY_NAMES {
        header.push(Span::styled(pad(&format!(" {}", name), cell), theme::dim()));
    }
    header.push(Span::styled(pad(" WEEK", WEEK_COL), theme::dim()));
    lines.push(Line::from(header));

    let interval = &view.report.interval;
    for (week, summary) in interval.weeks().iter().zip(&view.report.weeks) {
        let mut numbers = Vec::new();
        let mut minutes = Vec::new();
        let mut books = Vec::new();

        for day in week {
            let in_month = interval.contains(*day);
            let entry = view.data.get(*day);

            let mut style = if in_month { theme::surface() } else { theme::dim() };
            if *day == view.today {
                style = style.bg(theme::TODAY);
            }
            if *day == view.selected {
                style = style.bg(theme::SELECTED).add_modifier(Modifier::BOLD);
            }

            numbers.push(Span::styled(pad(&format!(" {}", day.format("%-d")), cell), style));

            let (mins_text, book_text) = match entry {
                Some(e) if in_month => (
                    format!(" {}m", e.minutes),
                    e.books.first().map(|b| format!(" {}", b)).unwrap_or_default(),
                ),
                _ => (String::new(), String::new()),
            };
            let mins_style = if entry.map(|e| e.minutes > 0).unwrap_or(false) {
                style.fg(theme::SKY).add_modifier(Modifier::BOLD)
            } else {
                style
            };
            minutes.push(Span::styled(pad(&mins_text, cell), mins_style));
            books.push(Span::styled(pad(&book_text, cell), style.fg(theme::TEXT_DIM)));
        }

        let week_style = if summary.goal_met {
            theme::green()
        } else {
            theme::dim()
        };
        let mark = if summary.goal_met { " ✓" } else { "" };
        numbers.push(Span::raw(pad("", WEEK_COL)));
        minutes.push(Span::styled(
            pad(&format!(" {}m{}", summary.total_minutes, mark), WEEK_COL),
            week_style,
        ));

        lines.push(Line::from(numbers));
        lines.push(Line::from(minutes));
        if view.show_books {
            books.push(Span::raw(pad("", WEEK_COL)));
            lines.push(Line::from(books));
        }
    }

    lines.push(Line::from(Span::styled(
        format!(" Weekly goal: {} min", view.weekly_goal),
        Style::default().fg(theme::TEXT_DIM),
    )));

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_fills_exact_width() {
        assert_eq!(pad("ab", 4), "ab  ");
        assert_eq!(pad("abcdef", 4), "abc…");
        assert_eq!(pad("", 3), "   ");
    }
}
