use chrono::NaiveDate;
use crossterm::event::KeyCode;

use crate::models::ReadingEntry;

const STEP: u32 = 5;
const MAX_MINUTES: u32 = 24 * 60;

#[derive(Debug, Clone, PartialEq)]
pub enum EditorField {
    Minutes,
    NewBook(String),
}

/// What the app should do after the editor handled a key.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorAction {
    Continue,
    Save(ReadingEntry),
    Delete,
    Cancel,
}

/// Working copy of one day's record while the popup is open.
#[derive(Debug, Clone)]
pub struct DayEditor {
    pub date: NaiveDate,
    pub minutes: u32,
    pub books: Vec<String>,
    pub field: EditorField,
    pub existed: bool,
}

impl DayEditor {
    pub fn open(date: NaiveDate, entry: Option<&ReadingEntry>) -> Self {
        Self {
            date,
            minutes: entry.map(|e| e.minutes).unwrap_or(0),
            books: entry.map(|e| e.books.clone()).unwrap_or_default(),
            field: EditorField::Minutes,
            existed: entry.is_some(),
        }
    }

    pub fn entry(&self) -> ReadingEntry {
        ReadingEntry::new(self.minutes, self.books.clone())
    }

    pub fn handle_key(&mut self, code: KeyCode) -> EditorAction {
        match &mut self.field {
            EditorField::Minutes => self.handle_minutes_key(code),
            EditorField::NewBook(buffer) => {
                match code {
                    KeyCode::Esc => self.field = EditorField::Minutes,
                    KeyCode::Enter => {
                        let title = buffer.trim().to_string();
                        if !title.is_empty() {
                            self.books.push(title);
                        }
                        self.field = EditorField::Minutes;
                    }
                    KeyCode::Backspace => {
                        buffer.pop();
                    }
                    KeyCode::Char(c) => buffer.push(c),
                    _ => {}
                }
                EditorAction::Continue
            }
        }
    }

    fn handle_minutes_key(&mut self, code: KeyCode) -> EditorAction {
        match code {
            KeyCode::Esc => return EditorAction::Cancel,
            KeyCode::Enter => return EditorAction::Save(self.entry()),
            KeyCode::Char('x') if self.existed => return EditorAction::Delete,
            KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Up => {
                self.minutes = (self.minutes + STEP).min(MAX_MINUTES);
            }
            KeyCode::Char('-') | KeyCode::Down => {
                self.minutes = self.minutes.saturating_sub(STEP);
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                let digit = c.to_digit(10).unwrap_or(0);
                self.minutes = (self.minutes * 10 + digit).min(MAX_MINUTES);
            }
            KeyCode::Backspace => {
                self.minutes /= 10;
            }
            KeyCode::Char('b') => {
                self.field = EditorField::NewBook(String::new());
            }
            KeyCode::Char('u') => {
                self.books.pop();
            }
            _ => {}
        }
        EditorAction::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    #[test]
    fn test_minutes_editing() {
        let mut ed = DayEditor::open(date(), None);
        assert_eq!(ed.minutes, 0);
        ed.handle_key(KeyCode::Char('-'));
        assert_eq!(ed.minutes, 0);
        ed.handle_key(KeyCode::Char('2'));
        ed.handle_key(KeyCode::Char('5'));
        assert_eq!(ed.minutes, 25);
        ed.handle_key(KeyCode::Char('+'));
        assert_eq!(ed.minutes, 30);
        ed.handle_key(KeyCode::Backspace);
        assert_eq!(ed.minutes, 3);
        for _ in 0..6 {
            ed.handle_key(KeyCode::Char('9'));
        }
        assert_eq!(ed.minutes, MAX_MINUTES);
    }

    #[test]
    fn test_book_input() {
        let existing = ReadingEntry::new(10, vec!["Holes".into()]);
        let mut ed = DayEditor::open(date(), Some(&existing));
        ed.handle_key(KeyCode::Char('b'));
        for c in " Wonder ".chars() {
            ed.handle_key(KeyCode::Char(c));
        }
        // digits go to the title, not the minutes
        ed.handle_key(KeyCode::Char('2'));
        ed.handle_key(KeyCode::Backspace);
        assert_eq!(ed.handle_key(KeyCode::Enter), EditorAction::Continue);
        assert_eq!(ed.field, EditorField::Minutes);
        assert_eq!(ed.books, vec!["Holes".to_string(), "Wonder".to_string()]);
        assert_eq!(ed.minutes, 10);

        ed.handle_key(KeyCode::Char('b'));
        ed.handle_key(KeyCode::Enter);
        assert_eq!(ed.books.len(), 2);

        ed.handle_key(KeyCode::Char('u'));
        assert_eq!(ed.books, vec!["Holes".to_string()]);
    }

    #[test]
    fn test_save_cancel_delete() {
        let mut ed = DayEditor::open(date(), None);
        assert_eq!(ed.handle_key(KeyCode::Char('x')), EditorAction::Continue);
        ed.handle_key(KeyCode::Char('7'));
        assert_eq!(
            ed.handle_key(KeyCode::Enter),
            EditorAction::Save(ReadingEntry::new(7, vec![]))
        );
        assert_eq!(ed.handle_key(KeyCode::Esc), EditorAction::Cancel);

        let existing = ReadingEntry::new(10, vec![]);
        let mut ed = DayEditor::open(date(), Some(&existing));
        assert_eq!(ed.handle_key(KeyCode::Char('x')), EditorAction::Delete);
    }
}
