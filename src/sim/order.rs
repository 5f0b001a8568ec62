//! Toppings, orders and the completion predicate

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::tuning::LevelConfig;

/// Topping kinds (closed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToppingKind {
    #[serde(alias = "ketchup")]
    Sauce,
    Cheese,
    #[serde(alias = "olives")]
    Olive,
}

impl ToppingKind {
    pub const ALL: [ToppingKind; 3] = [ToppingKind::Sauce, ToppingKind::Cheese, ToppingKind::Olive];

    pub fn as_str(&self) -> &'static str {
        match self {
            ToppingKind::Sauce => "sauce",
            ToppingKind::Cheese => "cheese",
            ToppingKind::Olive => "olive",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "sauce" | "ketchup" => Some(ToppingKind::Sauce),
            "cheese" => Some(ToppingKind::Cheese),
            "olive" | "olives" => Some(ToppingKind::Olive),
            _ => None,
        }
    }
}

/// A count per topping kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ToppingCounts {
    pub sauce: u32,
    pub cheese: u32,
    pub olive: u32,
}

/// Target counts the player must match
pub type Order = ToppingCounts;

impl ToppingCounts {
    pub fn new(sauce: u32, cheese: u32, olive: u32) -> Self {
        Self {
            sauce,
            cheese,
            olive,
        }
    }

    pub fn get(&self, kind: ToppingKind) -> u32 {
        match kind {
            ToppingKind::Sauce => self.sauce,
            ToppingKind::Cheese => self.cheese,
            ToppingKind::Olive => self.olive,
        }
    }

    fn slot(&mut self, kind: ToppingKind) -> &mut u32 {
        match kind {
            ToppingKind::Sauce => &mut self.sauce,
            ToppingKind::Cheese => &mut self.cheese,
            ToppingKind::Olive => &mut self.olive,
        }
    }

    /// Tally kinds from an iterator
    pub fn tally(kinds: impl IntoIterator<Item = ToppingKind>) -> Self {
        let mut counts = Self::default();
        for kind in kinds {
            *counts.slot(kind) += 1;
        }
        counts
    }

    pub fn total(&self) -> u32 {
        self.sauce + self.cheese + self.olive
    }
}

/// Draw a fresh order: each kind uniform in [1, topping_max], independently
pub fn generate_order<R: Rng + ?Sized>(config: &LevelConfig, rng: &mut R) -> Order {
    let max = config.topping_max.max(1);
    let mut order = Order::default();
    for kind in ToppingKind::ALL {
        *order.slot(kind) = rng.random_range(1..=max);
    }
    order
}

/// True iff placed counts equal the order exactly for every kind
pub fn is_complete(placed: &ToppingCounts, order: &Order) -> bool {
    ToppingKind::ALL
        .iter()
        .all(|&kind| placed.get(kind) == order.get(kind))
}

/// A topping sitting on the pizza (position is cosmetic)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedTopping {
    pub id: u64,
    pub kind: ToppingKind,
    /// Horizontal position, percent of pizza width
    pub x: f32,
    /// Vertical position, percent of pizza height
    pub y: f32,
    /// Degrees
    pub rotation: f32,
}
