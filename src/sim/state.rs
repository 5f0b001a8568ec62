//! Game session state and events
//!
//! Everything a transition reads or writes lives in `GameSession`; there is no
//! other mutable game state.

use serde::{Deserialize, Serialize};

use super::order::{Order, PlacedTopping, ToppingCounts, ToppingKind};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for start
    #[default]
    NotStarted,
    /// Active gameplay, countdown running
    InProgress,
    /// All pizzas served, waiting for "next level"
    LevelComplete,
    /// Time ran out
    GameOver,
}

/// Something that happened during a transition (for UI feedback)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    LevelStarted { level: u32, time_limit_secs: u32 },
    OrderGenerated { order: Order },
    ToppingPlaced { id: u64, kind: ToppingKind },
    /// Order matched; the pizza is now being sent out
    PizzaCompleted { points: u64, score: u64 },
    /// Send animation finished and the next order is up
    PizzaServed { pizzas_completed: u32 },
    LevelCompleted { level: u32, bonus: u32, score: u64 },
    TimeExpired { score: u64 },
    HighScoreRecorded { rank: usize, score: u64 },
}

/// Complete session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    pub phase: GamePhase,
    /// Current level (1-based)
    pub level: u32,
    pub score: u64,
    /// Countdown seconds left in the level
    pub time_remaining_secs: u32,
    /// Present whenever phase is InProgress
    pub current_order: Option<Order>,
    /// Toppings on the current pizza, in placement order
    pub placed_toppings: Vec<PlacedTopping>,
    /// Pizzas served so far in this level
    pub pizzas_completed: u32,
    /// Pizza is sliding out; placement is locked
    pub sending: bool,
    /// Bonus awarded for the most recent level clear
    pub last_bonus: u32,
    /// Leaderboard already checked for this game over
    pub score_recorded: bool,
    /// Next topping ID
    next_id: u64,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    pub fn new() -> Self {
        Self {
            phase: GamePhase::NotStarted,
            level: 1,
            score: 0,
            time_remaining_secs: 0,
            current_order: None,
            placed_toppings: Vec::new(),
            pizzas_completed: 0,
            sending: false,
            last_bonus: 0,
            score_recorded: false,
            next_id: 1,
        }
    }

    /// Allocate a new topping ID (unique for the life of the session)
    pub fn next_topping_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Per-kind tally of the toppings on the pizza
    pub fn placed_counts(&self) -> ToppingCounts {
        ToppingCounts::tally(self.placed_toppings.iter().map(|t| t.kind))
    }

    /// Whether another topping of `kind` would be accepted right now
    pub fn can_add(&self, kind: ToppingKind) -> bool {
        if self.phase != GamePhase::InProgress || self.sending {
            return false;
        }
        match &self.current_order {
            Some(order) => self.placed_counts().get(kind) < order.get(kind),
            None => false,
        }
    }
}
