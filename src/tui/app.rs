use anyhow::{Context, Result};
use chrono::{Duration, Local, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent};
use log::{debug, warn};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};
use std::time::Instant;

use crate::config::AppConfig;
use crate::db::{KeyValueStore, ReadingRepo};
use crate::models::{AppSettings, MonthData};
use crate::tracker::{MonthReport, MonthRef};
use crate::tui::editor::{DayEditor, EditorAction, EditorField};
use crate::tui::events::{Event, EventHandler};
use crate::tui::theme;
use crate::tui::timer::ReadingTimer;
use crate::tui::widgets::{calendar, header, reward, statusbar};
use crate::utils::format::{format_clock, timer_minutes};

#[derive(Debug, Clone)]
pub enum Mode {
    Calendar,
    Editor(DayEditor),
    Timer(ReadingTimer),
    Help,
}

pub struct App<S: KeyValueStore> {
    repo: ReadingRepo<S>,
    pub config: AppConfig,
    pub mode: Mode,
    pub should_quit: bool,
    pub status: Option<String>,

    pub today: NaiveDate,
    pub month: MonthRef,
    pub selected: NaiveDate,

    // Snapshot, reloaded after every edit
    pub data: MonthData,
    pub settings: AppSettings,
    pub report: MonthReport,
}

impl<S: KeyValueStore> App<S> {
    pub fn new(repo: ReadingRepo<S>, config: AppConfig, today: NaiveDate) -> Result<Self> {
        let data = repo.load_data()?;
        let settings = repo.load_settings()?;
        let month =
            MonthRef::from_date(today).context("Today is outside the supported calendar range")?;
        let report = MonthReport::build(&data, &settings, month);
        Ok(App {
            repo,
            config,
            mode: Mode::Calendar,
            should_quit: false,
            status: None,
            today,
            month,
            selected: today,
            data,
            settings,
            report,
        })
    }

    pub fn reload(&mut self) -> Result<()> {
        self.data = self.repo.load_data()?;
        self.settings = self.repo.load_settings()?;
        self.refresh();
        Ok(())
    }

    fn refresh(&mut self) {
        self.report = MonthReport::build(&self.data, &self.settings, self.month);
    }

    pub fn tick(&mut self) {
        let today = Local::now().date_naive();
        if today != self.today {
            debug!("date rolled over to {}", today);
            self.today = today;
        }
    }

    // ─── Navigation ──────────────────────────────────────────────────────────

    fn show_month(&mut self, month: MonthRef) {
        self.month = month;
        self.refresh();
    }

    /// Move the cursor, following it into neighbouring months.
    ///
    /// The cursor stays put when the target day's month cannot be shown.
    fn move_selection(&mut self, days: i64) {
        let Some(selected) = self.selected.checked_add_signed(Duration::days(days)) else {
            return;
        };
        let Some(month) = MonthRef::from_date(selected) else {
            return;
        };
        self.selected = selected;
        if month != self.month {
            self.show_month(month);
        }
    }

    fn jump_month(&mut self, forward: bool) {
        let month = if forward {
            self.month.next()
        } else {
            self.month.prev()
        };
        if let Some(month) = month {
            self.selected = month.first_day();
            self.show_month(month);
        }
    }

    fn go_today(&mut self) {
        if let Some(month) = MonthRef::from_date(self.today) {
            self.selected = self.today;
            self.show_month(month);
        }
    }

    // ─── Keys ────────────────────────────────────────────────────────────────

    pub fn handle_key(&mut self, key: KeyEvent) {
        self.status = None;
        let now = Instant::now();
        let mode = std::mem::replace(&mut self.mode, Mode::Calendar);
        self.mode = match mode {
            Mode::Calendar => {
                self.handle_calendar_key(key.code);
                // handle_calendar_key may have switched modes
                std::mem::replace(&mut self.mode, Mode::Calendar)
            }
            Mode::Help => Mode::Calendar,
            Mode::Editor(editor) => self.handle_editor_key(editor, key.code),
            Mode::Timer(timer) => self.handle_timer_key(timer, key.code, now),
        };
    }

    fn handle_calendar_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc | KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Left | KeyCode::Char('h') => self.move_selection(-1),
            KeyCode::Right | KeyCode::Char('l') => self.move_selection(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-7),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(7),
            KeyCode::Char('[') | KeyCode::Char('<') | KeyCode::PageUp => self.jump_month(false),
            KeyCode::Char(']') | KeyCode::Char('>') | KeyCode::PageDown => self.jump_month(true),
            KeyCode::Char('t') => self.go_today(),
            KeyCode::Char('?') => self.mode = Mode::Help,
            KeyCode::Char(' ') => self.mode = Mode::Timer(ReadingTimer::start(Instant::now())),
            KeyCode::Enter => {
                self.mode = Mode::Editor(DayEditor::open(self.selected, self.data.get(self.selected)));
            }
            KeyCode::Char('x') => self.delete_selected(),
            _ => {}
        }
    }

    fn handle_editor_key(&mut self, mut editor: DayEditor, code: KeyCode) -> Mode {
        match editor.handle_key(code) {
            EditorAction::Continue => Mode::Editor(editor),
            EditorAction::Cancel => Mode::Calendar,
            EditorAction::Delete => {
                self.delete_selected();
                Mode::Calendar
            }
            EditorAction::Save(entry) => {
                let minutes = entry.minutes;
                match self.repo.update_entry(editor.date, entry) {
                    Ok(data) => {
                        self.data = data;
                        self.refresh();
                        self.status = Some(format!("✓ Saved {} minutes on {}", minutes, editor.date));
                    }
                    Err(e) => self.report_error("save entry", e),
                }
                Mode::Calendar
            }
        }
    }

    fn handle_timer_key(&mut self, mut timer: ReadingTimer, code: KeyCode, now: Instant) -> Mode {
        match code {
            KeyCode::Esc => Mode::Calendar,
            KeyCode::Char(' ') => {
                timer.toggle(now);
                Mode::Timer(timer)
            }
            KeyCode::Char('r') => {
                timer.reset(now);
                Mode::Timer(timer)
            }
            KeyCode::Enter => match timer.finish(now) {
                // Nothing timed yet; keep the popup open
                None => Mode::Timer(timer),
                Some(minutes) => {
                    self.log_timed_minutes(minutes);
                    Mode::Calendar
                }
            },
            _ => Mode::Timer(timer),
        }
    }

    fn log_timed_minutes(&mut self, minutes: u32) {
        match self.repo.add_minutes(self.today, minutes) {
            Ok(entry) => {
                self.status = Some(format!(
                    "✓ Logged {} min today ({} total)",
                    minutes, entry.minutes
                ));
                if let Err(e) = self.reload() {
                    self.report_error("reload", e);
                }
            }
            Err(e) => self.report_error("log timer", e),
        }
    }

    fn delete_selected(&mut self) {
        match self.repo.delete_entry(self.selected) {
            Ok(Some(_)) => {
                self.data.remove(self.selected);
                self.refresh();
                self.status = Some(format!("✗ Deleted {}", self.selected));
            }
            Ok(None) => {}
            Err(e) => self.report_error("delete entry", e),
        }
    }

    fn report_error(&mut self, action: &str, e: anyhow::Error) {
        warn!("failed to {}: {:#}", action, e);
        self.status = Some(format!("Could not {}: {}", action, e));
    }

    // ─── Drawing ─────────────────────────────────────────────────────────────

    pub fn draw(&self, frame: &mut Frame) {
        self.draw_main(frame);
        match &self.mode {
            Mode::Calendar => {}
            Mode::Help => self.draw_help_overlay(frame),
            Mode::Editor(editor) => self.draw_editor(frame, editor),
            Mode::Timer(timer) => self.draw_timer(frame, timer),
        }
    }

    fn draw_main(&self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(theme::base()), area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // header
                Constraint::Length(8), // reward tracker
                Constraint::Min(0),    // calendar
                Constraint::Length(1), // status bar
            ])
            .split(area);

        header::render(
            frame,
            chunks[0],
            self.month,
            &self.settings.student_name,
            self.today,
        );
        reward::render(
            frame,
            chunks[1],
            &self.report.stats,
            &self.report.rank,
            &self.settings.thresholds,
        );
        calendar::render(
            frame,
            chunks[2],
            &calendar::CalendarView {
                data: &self.data,
                report: &self.report,
                selected: self.selected,
                today: self.today,
                show_books: self.config.ui.show_books,
                weekly_goal: self.settings.weekly_goal,
            },
        );
        statusbar::render(frame, chunks[3], self.status.as_deref());
    }

    fn popup(&self, frame: &mut Frame, width: u16, height: u16) -> Rect {
        let area = frame.area();
        let width = width.min(area.width);
        let height = height.min(area.height);
        let popup = Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        };
        frame.render_widget(Clear, popup);
        popup
    }

    fn draw_editor(&self, frame: &mut Frame, editor: &DayEditor) {
        let area = self.popup(frame, 50, 14 + editor.books.len().min(6) as u16);

        let mut lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("  How many minutes?  ", theme::dim()),
                Span::styled("− ", theme::dim()),
                Span::styled(
                    format!("{:>4}", editor.minutes),
                    theme::sky().add_modifier(Modifier::BOLD),
                ),
                Span::styled(" +", theme::dim()),
            ]),
            Line::from(""),
            Line::from(Span::styled("  Books read", theme::dim())),
        ];

        if editor.books.is_empty() {
            lines.push(Line::from(Span::styled("    No books added yet", theme::dim())));
        }
        for (i, book) in editor.books.iter().enumerate() {
            lines.push(Line::from(vec![
                Span::styled(format!("    {}. ", i + 1), theme::dim()),
                Span::styled(book.clone(), theme::bold()),
            ]));
        }

        lines.push(Line::from(""));
        match &editor.field {
            EditorField::NewBook(buffer) => {
                lines.push(Line::from(vec![
                    Span::styled("  Title: ", theme::dim()),
                    Span::styled(format!("{}_", buffer), theme::bold()),
                ]));
                lines.push(Line::from(Span::styled(
                    "  [Enter] add  [Esc] back",
                    theme::dim(),
                )));
            }
            EditorField::Minutes => {
                lines.push(Line::from(Span::styled(
                    "  [0-9] type  [+/-] ±5  [b] add book  [u] undo book",
                    theme::dim(),
                )));
                let delete_hint = if editor.existed { "  [x] delete" } else { "" };
                lines.push(Line::from(Span::styled(
                    format!("  [Enter] save  [Esc] cancel{}", delete_hint),
                    theme::dim(),
                )));
            }
        }

        let block = Block::default()
            .title(Span::styled(
                format!(" {} ", editor.date.format("%B %-d")),
                theme::gold(),
            ))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::sky())
            .style(theme::surface());
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn draw_timer(&self, frame: &mut Frame, timer: &ReadingTimer) {
        let area = self.popup(frame, 44, 10);
        let secs = timer.elapsed_secs(Instant::now());

        let state = if timer.is_running() {
            Span::styled("reading…", theme::green())
        } else {
            Span::styled("paused", theme::dim())
        };
        let finish = if secs == 0 {
            Span::styled("  [Enter] finish (start reading first)", theme::dim())
        } else {
            Span::styled(
                format!("  [Enter] finish & log {} min", timer_minutes(secs)),
                theme::gold(),
            )
        };

        let lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("  ⏱  ", theme::sky()),
                Span::styled(format_clock(secs), theme::bold()),
                Span::raw("  "),
                state,
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "  [Space] pause/resume  [r] reset",
                theme::dim(),
            )),
            Line::from(finish),
            Line::from(Span::styled("  [Esc] discard", theme::dim())),
        ];

        let block = Block::default()
            .title(Span::styled(" Reading Timer ", theme::gold()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::sky())
            .style(theme::surface());
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn draw_help_overlay(&self, frame: &mut Frame) {
        let area = self.popup(frame, 52, 16);
        let keys = [
            ("←/→  h/l", "previous / next day"),
            ("↑/↓  k/j", "previous / next week"),
            ("[ ]  < >", "previous / next month"),
            ("t", "jump to today"),
            ("Enter", "edit selected day"),
            ("x", "delete selected day"),
            ("Space", "reading timer (logs to today)"),
            ("?", "this help"),
            ("q / Esc", "quit"),
        ];

        let mut lines = vec![Line::from("")];
        for (key, what) in keys {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<10}", key), theme::gold()),
                Span::styled(what, theme::dim()),
            ]));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "  Edit targets with `reading-buddy settings`",
            theme::dim(),
        )));
        lines.push(Line::from(Span::styled("  [any key] close", theme::dim())));

        let block = Block::default()
            .title(Span::styled(" Help ", theme::gold()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::sky())
            .style(theme::surface());
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

/// Run the TUI event loop.
pub fn run<S: KeyValueStore>(repo: ReadingRepo<S>, config: AppConfig) -> Result<()> {
    let tick_rate = config.ui.tick_rate_ms;
    let mut app = App::new(repo, config, Local::now().date_naive())?;

    let mut terminal = ratatui::init();
    let events = EventHandler::new(tick_rate);

    let result = (|| -> Result<()> {
        loop {
            terminal.draw(|frame| app.draw(frame))?;

            match events.next()? {
                Event::Key(key) => {
                    app.handle_key(key);
                    if app.should_quit {
                        break;
                    }
                }
                Event::Resize(..) => {}
                Event::Tick => app.tick(),
            }
        }
        Ok(())
    })();

    ratatui::restore();
    result
}
