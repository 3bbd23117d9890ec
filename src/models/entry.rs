use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One day's reading record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingEntry {
    pub minutes: u32,
    #[serde(default)]
    pub books: Vec<String>,
}

impl ReadingEntry {
    pub fn new(minutes: u32, books: Vec<String>) -> Self {
        Self { minutes, books }
    }
}

/// Date key used for storage, `YYYY-MM-DD`.
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Sparse map of ISO date key to entry. Missing days read as zero minutes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MonthData {
    entries: BTreeMap<String, ReadingEntry>,
}

impl MonthData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, date: NaiveDate) -> Option<&ReadingEntry> {
        self.entries.get(&date_key(date))
    }

    pub fn minutes_on(&self, date: NaiveDate) -> u32 {
        self.get(date).map(|e| e.minutes).unwrap_or(0)
    }

    pub fn upsert(&mut self, date: NaiveDate, entry: ReadingEntry) {
        self.entries.insert(date_key(date), entry);
    }

    pub fn remove(&mut self, date: NaiveDate) -> Option<ReadingEntry> {
        self.entries.remove(&date_key(date))
    }

    /// Add minutes to a day, keeping any books already recorded.
    pub fn add_minutes(&mut self, date: NaiveDate, minutes: u32) -> &ReadingEntry {
        let entry = self.entries.entry(date_key(date)).or_default();
        entry.minutes = entry.minutes.saturating_add(minutes);
        entry
    }

    /// Append a book title. Blank titles are ignored.
    pub fn add_book(&mut self, date: NaiveDate, title: &str) -> bool {
        let title = title.trim();
        if title.is_empty() {
            return false;
        }
        self.entries
            .entry(date_key(date))
            .or_default()
            .books
            .push(title.to_string());
        true
    }

    pub fn remove_book(&mut self, date: NaiveDate, index: usize) -> Option<String> {
        let entry = self.entries.get_mut(&date_key(date))?;
        if index < entry.books.len() {
            Some(entry.books.remove(index))
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    #[test]
    fn test_missing_day_reads_zero() {
        let data = MonthData::new();
        assert_eq!(data.minutes_on(day(1)), 0);
        assert!(data.get(day(1)).is_none());
    }

    #[test]
    fn test_upsert_overwrites() {
        let mut data = MonthData::new();
        data.upsert(day(2), ReadingEntry::new(20, vec!["Matilda".into()]));
        data.upsert(day(2), ReadingEntry::new(35, vec![]));
        assert_eq!(data.len(), 1);
        assert_eq!(data.get(day(2)).unwrap().minutes, 35);
        assert!(data.get(day(2)).unwrap().books.is_empty());
    }

    #[test]
    fn test_add_minutes_keeps_books() {
        let mut data = MonthData::new();
        data.upsert(day(3), ReadingEntry::new(10, vec!["Holes".into()]));
        data.add_minutes(day(3), 7);
        let entry = data.get(day(3)).unwrap();
        assert_eq!(entry.minutes, 17);
        assert_eq!(entry.books, vec!["Holes".to_string()]);

        data.add_minutes(day(4), 5);
        assert_eq!(data.minutes_on(day(4)), 5);
    }

    #[test]
    fn test_books_keep_order_and_duplicates() {
        let mut data = MonthData::new();
        assert!(data.add_book(day(5), "  Wonder "));
        assert!(data.add_book(day(5), "Wonder"));
        assert!(!data.add_book(day(5), "   "));
        let entry = data.get(day(5)).unwrap();
        assert_eq!(entry.minutes, 0);
        assert_eq!(entry.books, vec!["Wonder".to_string(), "Wonder".to_string()]);

        assert_eq!(data.remove_book(day(5), 0).as_deref(), Some("Wonder"));
        assert_eq!(data.remove_book(day(5), 3), None);
        assert_eq!(data.get(day(5)).unwrap().books.len(), 1);
    }

    #[test]
    fn test_remove_entry() {
        let mut data = MonthData::new();
        data.upsert(day(6), ReadingEntry::new(15, vec![]));
        assert!(data.remove(day(6)).is_some());
        assert!(data.remove(day(6)).is_none());
        assert!(data.is_empty());
    }

    #[test]
    fn test_json_shape() {
        let mut data = MonthData::new();
        data.upsert(day(9), ReadingEntry::new(30, vec!["Dog Man".into()]));
        let json = serde_json::to_string(&data).unwrap();
        assert_eq!(json, r#"{"2026-03-09":{"minutes":30,"books":["Dog Man"]}}"#);

        let back: MonthData = serde_json::from_str(r#"{"2026-03-10":{"minutes":5}}"#).unwrap();
        assert_eq!(back.minutes_on(day(10)), 5);
    }
}
