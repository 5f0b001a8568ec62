//! Data-driven game balance
//!
//! Per-level parameters. Levels past the end of the table reuse the last entry,
//! so there is no hard level cap.

use serde::{Deserialize, Serialize};

use crate::settings::ConfigError;

/// Parameters for one difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelConfig {
    /// 1-based level number
    pub level: u32,
    /// Pizzas to serve before the level is complete
    pub pizza_count: u32,
    /// Countdown length in seconds
    pub time_limit_secs: u32,
    /// Upper bound (inclusive) for each topping in an order
    pub topping_max: u32,
    /// Inclusive (min, max) bonus for clearing the level
    pub bonus_range: (u32, u32),
}

impl LevelConfig {
    const fn new(
        level: u32,
        pizza_count: u32,
        time_limit_secs: u32,
        topping_max: u32,
        bonus_range: (u32, u32),
    ) -> Self {
        Self {
            level,
            pizza_count,
            time_limit_secs,
            topping_max,
            bonus_range,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidLevel {
            level: self.level,
            reason: reason.to_string(),
        };
        if self.pizza_count == 0 {
            return Err(invalid("pizza_count must be at least 1"));
        }
        if self.time_limit_secs == 0 {
            return Err(invalid("time_limit_secs must be at least 1"));
        }
        if self.topping_max == 0 {
            return Err(invalid("topping_max must be at least 1"));
        }
        if self.bonus_range.0 > self.bonus_range.1 {
            return Err(invalid("bonus_range min exceeds max"));
        }
        Ok(())
    }
}

/// Built-in level table
pub const DEFAULT_LEVELS: [LevelConfig; 5] = [
    LevelConfig::new(1, 2, 60, 3, (50, 100)),
    LevelConfig::new(2, 3, 55, 4, (100, 150)),
    LevelConfig::new(3, 4, 50, 5, (150, 200)),
    LevelConfig::new(4, 5, 45, 6, (200, 300)),
    LevelConfig::new(5, 6, 40, 7, (300, 500)),
];

/// Ordered, non-empty list of level parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelTable {
    levels: Vec<LevelConfig>,
}

impl Default for LevelTable {
    fn default() -> Self {
        Self {
            levels: DEFAULT_LEVELS.to_vec(),
        }
    }
}

impl LevelTable {
    /// Build a table, rejecting empty tables and degenerate levels
    pub fn new(levels: Vec<LevelConfig>) -> Result<Self, ConfigError> {
        if levels.is_empty() {
            return Err(ConfigError::EmptyLevelTable);
        }
        for config in &levels {
            config.validate()?;
        }
        Ok(Self { levels })
    }

    /// Parse a JSON array of level configs
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let levels: Vec<LevelConfig> = serde_json::from_str(json)?;
        Self::new(levels)
    }

    /// Config for a 1-based level; out-of-range levels fall back to the last entry
    pub fn get(&self, level: u32) -> &LevelConfig {
        let idx = (level.max(1) - 1) as usize;
        self.levels
            .get(idx)
            .unwrap_or_else(|| &self.levels[self.levels.len() - 1])
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LevelConfig> {
        self.levels.iter()
    }
}
