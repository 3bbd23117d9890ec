use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Reward ranks, lowest first. Ordering follows declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    Noob,
    Pro,
    Hacker,
    God,
}

impl Tier {
    pub const ALL: [Tier; 4] = [Tier::Noob, Tier::Pro, Tier::Hacker, Tier::God];

    pub fn label(&self) -> &'static str {
        match self {
            Tier::Noob => "Noob",
            Tier::Pro => "Pro",
            Tier::Hacker => "Hacker",
            Tier::God => "God",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Tier::Noob => "🌱",
            Tier::Pro => "📖",
            Tier::Hacker => "🚀",
            Tier::God => "👑",
        }
    }

    pub fn next(&self) -> Option<Tier> {
        match self {
            Tier::Noob => Some(Tier::Pro),
            Tier::Pro => Some(Tier::Hacker),
            Tier::Hacker => Some(Tier::God),
            Tier::God => None,
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Tier {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "noob" => Ok(Tier::Noob),
            "pro" => Ok(Tier::Pro),
            "hacker" => Ok(Tier::Hacker),
            "god" => Ok(Tier::God),
            _ => Err(anyhow::anyhow!("Unknown tier: {}", s)),
        }
    }
}

pub const DEFAULT_THRESHOLDS: LevelThresholds = LevelThresholds {
    noob: 300,
    pro: 400,
    hacker: 450,
    god: 500,
};

/// Monthly minute targets per tier.
///
/// Targets are expected to ascend from Noob to God but nothing enforces it;
/// see [`LevelThresholds::is_ascending`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelThresholds {
    #[serde(rename = "Noob")]
    pub noob: u32,
    #[serde(rename = "Pro")]
    pub pro: u32,
    #[serde(rename = "Hacker")]
    pub hacker: u32,
    #[serde(rename = "God")]
    pub god: u32,
}

impl Default for LevelThresholds {
    fn default() -> Self {
        DEFAULT_THRESHOLDS
    }
}

impl LevelThresholds {
    pub fn get(&self, tier: Tier) -> u32 {
        match tier {
            Tier::Noob => self.noob,
            Tier::Pro => self.pro,
            Tier::Hacker => self.hacker,
            Tier::God => self.god,
        }
    }

    pub fn set(&mut self, tier: Tier, minutes: u32) {
        match tier {
            Tier::Noob => self.noob = minutes,
            Tier::Pro => self.pro = minutes,
            Tier::Hacker => self.hacker = minutes,
            Tier::God => self.god = minutes,
        }
    }

    /// True when Noob <= Pro <= Hacker <= God.
    pub fn is_ascending(&self) -> bool {
        Tier::ALL
            .windows(2)
            .all(|pair| self.get(pair[0]) <= self.get(pair[1]))
    }
}
