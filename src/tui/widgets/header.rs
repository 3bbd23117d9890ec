use chrono::NaiveDate;
use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::tracker::MonthRef;
use crate::tui::theme;

pub fn render(frame: &mut Frame, area: Rect, month: MonthRef, student_name: &str, today: NaiveDate) {
    let mut title_spans = vec![
        Span::styled("📚 ", theme::sky()),
        Span::styled("Reading Buddy", theme::sky().add_modifier(Modifier::BOLD)),
    ];
    if !student_name.trim().is_empty() {
        title_spans.push(Span::styled("  ·  ", theme::dim()));
        title_spans.push(Span::styled(student_name.trim().to_string(), theme::bold()));
    }

    let month_line = Line::from(vec![
        Span::styled("‹ ", theme::dim()),
        Span::styled(month.to_string(), theme::gold().add_modifier(Modifier::BOLD)),
        Span::styled(" ›", theme::dim()),
        Span::styled("  ·  ", theme::dim()),
        Span::styled(today.format("%A, %b %d, %Y").to_string(), theme::dim()),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::sky())
        .style(theme::base());

    let paragraph = Paragraph::new(vec![Line::from(title_spans), month_line])
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
