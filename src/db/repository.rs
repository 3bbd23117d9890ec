use anyhow::{Context, Result};
use chrono::NaiveDate;
use log::{debug, warn};
use serde::de::DeserializeOwned;

use crate::db::store::KeyValueStore;
use crate::models::{AppSettings, MonthData, ReadingEntry};

pub const DATA_KEY: &str = "reading_buddy_data";
pub const SETTINGS_KEY: &str = "reading_buddy_settings";

/// Loads and saves the reading log and settings as JSON snapshots.
///
/// A missing or unreadable snapshot loads as its default.
pub struct ReadingRepo<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> ReadingRepo<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    // ─── Snapshots ───────────────────────────────────────────────────────────

    pub fn load_data(&self) -> Result<MonthData> {
        self.load_or_default(DATA_KEY)
    }

    pub fn save_data(&self, data: &MonthData) -> Result<()> {
        let json = serde_json::to_string(data).context("Serializing reading log")?;
        self.store
            .save(DATA_KEY, &json)
            .context("Saving reading log")?;
        debug!("saved {} reading entries", data.len());
        Ok(())
    }

    pub fn load_settings(&self) -> Result<AppSettings> {
        self.load_or_default(SETTINGS_KEY)
    }

    pub fn save_settings(&self, settings: &AppSettings) -> Result<()> {
        let json = serde_json::to_string(settings).context("Serializing settings")?;
        self.store
            .save(SETTINGS_KEY, &json)
            .context("Saving settings")?;
        debug!("saved settings");
        Ok(())
    }

    fn load_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T> {
        let raw = self
            .store
            .load(key)
            .with_context(|| format!("Loading '{}'", key))?;
        match raw {
            None => {
                debug!("no '{}' snapshot, using defaults", key);
                Ok(T::default())
            }
            Some(json) => match serde_json::from_str(&json) {
                Ok(value) => Ok(value),
                Err(e) => {
                    warn!("ignoring malformed '{}' snapshot: {}", key, e);
                    Ok(T::default())
                }
            },
        }
    }

    // ─── Entry edits ─────────────────────────────────────────────────────────

    /// Overwrite a day's record and return the updated log.
    pub fn update_entry(&self, date: NaiveDate, entry: ReadingEntry) -> Result<MonthData> {
        let mut data = self.load_data()?;
        data.upsert(date, entry);
        self.save_data(&data)?;
        Ok(data)
    }

    /// Remove a day's record. Returns the removed entry, if any.
    pub fn delete_entry(&self, date: NaiveDate) -> Result<Option<ReadingEntry>> {
        let mut data = self.load_data()?;
        let removed = data.remove(date);
        if removed.is_some() {
            self.save_data(&data)?;
        }
        Ok(removed)
    }

    /// Add timed minutes on top of whatever the day already has.
    pub fn add_minutes(&self, date: NaiveDate, minutes: u32) -> Result<ReadingEntry> {
        let mut data = self.load_data()?;
        let entry = data.add_minutes(date, minutes).clone();
        self.save_data(&data)?;
        Ok(entry)
    }

    pub fn add_book(&self, date: NaiveDate, title: &str) -> Result<bool> {
        let mut data = self.load_data()?;
        let added = data.add_book(date, title);
        if added {
            self.save_data(&data)?;
        }
        Ok(added)
    }
}
