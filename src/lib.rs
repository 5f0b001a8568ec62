//! Pizza Maker - A pizza-assembly arcade game
//!
//! Core modules:
//! - `sim`: Game session, order generation, pure transitions
//! - `tuning`: Data-driven level table
//! - `highscores`: Top-5 leaderboard
//! - `platform`: Clock/timer abstraction and the browser bridge
//! - `game`: Driver wiring session, timers, RNG and leaderboard together

pub mod game;
pub mod highscores;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::{Game, Snapshot};
pub use highscores::HighScores;
pub use settings::{ConfigError, Settings};
pub use tuning::{LevelConfig, LevelTable};

/// Game configuration constants
pub mod consts {
    use std::time::Duration;

    /// Points awarded for every completed pizza
    pub const POINTS_PER_PIZZA: u64 = 100;

    /// Countdown period while a level is in progress
    pub const COUNTDOWN_PERIOD: Duration = Duration::from_secs(1);

    /// Send animation length before the next order (or level end) resolves
    pub const SEND_DELAY_MS: u64 = 600;

    /// Name recorded on the leaderboard when none is configured
    pub const DEFAULT_PLAYER_NAME: &str = "Pizza Pro";

    /// Topping placement area (percent of pizza diameter)
    pub const TOPPING_AREA_MIN: f32 = 20.0;
    pub const TOPPING_AREA_SPAN: f32 = 60.0;
}
