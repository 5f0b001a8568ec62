//! Game settings and configuration
//!
//! Read from JSON supplied by the host page (web) or a file (native). Nothing is
//! written back; settings live only as long as the session.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{DEFAULT_PLAYER_NAME, SEND_DELAY_MS};
use crate::tuning::{LevelConfig, LevelTable};

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Level table must contain at least one level")]
    EmptyLevelTable,

    #[error("Invalid level {level}: {reason}")]
    InvalidLevel { level: u32, reason: String },
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Name written to the leaderboard on game over
    pub player_name: String,
    /// Fixed RNG seed (random per run when absent)
    pub seed: Option<u64>,
    /// Send animation length in milliseconds
    pub send_delay_ms: u64,
    /// Replacement level table
    pub levels: Option<Vec<LevelConfig>>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            player_name: DEFAULT_PLAYER_NAME.to_string(),
            seed: None,
            send_delay_ms: SEND_DELAY_MS,
            levels: None,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        // Reject bad level tables up front rather than at game start
        settings.build_levels()?;
        Ok(settings)
    }

    /// Parse settings, falling back to defaults on any error
    pub fn load(json: Option<&str>) -> Self {
        match json.map(Self::from_json) {
            Some(Ok(settings)) => {
                log::info!("Loaded settings (player: {})", settings.player_name);
                settings
            }
            Some(Err(e)) => {
                log::warn!("Ignoring invalid settings: {}", e);
                Self::default()
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Level table to play with
    pub fn build_levels(&self) -> Result<LevelTable, ConfigError> {
        match &self.levels {
            Some(levels) => LevelTable::new(levels.clone()),
            None => Ok(LevelTable::default()),
        }
    }

    pub fn send_delay(&self) -> Duration {
        Duration::from_millis(self.send_delay_ms)
    }
}
