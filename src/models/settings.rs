use serde::{Deserialize, Serialize};

use super::tier::{LevelThresholds, DEFAULT_THRESHOLDS};

fn default_weekly_goal() -> u32 {
    100
}

/// Reward parameters edited from the settings command or form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    #[serde(default)]
    pub thresholds: LevelThresholds,
    #[serde(default = "default_weekly_goal")]
    pub weekly_goal: u32,
    #[serde(default)]
    pub student_name: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            thresholds: DEFAULT_THRESHOLDS,
            weekly_goal: default_weekly_goal(),
            student_name: String::new(),
        }
    }
}

impl AppSettings {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
