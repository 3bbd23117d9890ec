use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_tick_rate_ms() -> u64 {
    250
}
fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Overrides the database location inside the data directory.
    #[serde(default)]
    pub db_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
    /// Show the first book title inside calendar cells.
    #[serde(default = "default_true")]
    pub show_books: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate_ms(),
            show_books: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

impl AppConfig {
    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("", "", "reading-buddy")
            .context("Could not determine project directories")
    }

    pub fn config_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn data_dir() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.data_dir().to_path_buf())
    }

    pub fn db_path(&self) -> Result<PathBuf> {
        match &self.storage.db_path {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::data_dir()?.join("reading-buddy.db")),
        }
    }

    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let content =
            std::fs::read_to_string(&path).with_context(|| format!("Reading {:?}", path))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Parsing config.toml")
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).context("Serializing config")?;
        std::fs::write(&path, content).with_context(|| format!("Writing {:?}", path))?;
        Ok(())
    }

    /// Create the parent directory of the database file.
    pub fn ensure_data_dir(&self) -> Result<PathBuf> {
        let db_path = self.db_path()?;
        let dir = db_path
            .parent()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));
        std::fs::create_dir_all(&dir).with_context(|| format!("Creating {:?}", dir))?;
        Ok(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.ui.tick_rate_ms, 250);
        assert!(config.ui.show_books);
        assert!(config.storage.db_path.is_none());
    }

    #[test]
    fn test_partial_toml() {
        let config = AppConfig::from_toml(
            "[storage]\ndb_path = \"/tmp/reading.db\"\n\n[ui]\nshow_books = false\n",
        )
        .unwrap();
        assert_eq!(config.db_path().unwrap(), PathBuf::from("/tmp/reading.db"));
        assert!(!config.ui.show_books);
        assert_eq!(config.ui.tick_rate_ms, 250);
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = AppConfig::default();
        config.ui.tick_rate_ms = 100;
        let text = toml::to_string_pretty(&config).unwrap();
        let back = AppConfig::from_toml(&text).unwrap();
        assert_eq!(back.ui.tick_rate_ms, 100);
    }

    #[test]
    fn test_ensure_data_dir_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.storage.db_path = Some(dir.path().join("nested").join("log.db"));
        let created = config.ensure_data_dir().unwrap();
        assert!(created.ends_with("nested"));
        assert!(created.is_dir());
    }
}
