//! Game simulation module
//!
//! All gameplay rules live here. This module must stay pure:
//! - Randomness only through the caller's RNG
//! - No clocks or timers (the driver feeds ticks and send resolutions)
//! - No rendering or platform dependencies

pub mod order;
pub mod state;
pub mod tick;

pub use order::{Order, PlacedTopping, ToppingCounts, ToppingKind, generate_order, is_complete};
pub use state::{GameEvent, GamePhase, GameSession};
pub use tick::{add_topping, advance_level, resolve_send, setup_level, start, tick};
