//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time (monotonic clock source)
//! - Timers (countdown interval, send delay)
//! - The JavaScript-facing game handle (web only)

pub mod time;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use time::{Clock, ManualClock, SystemClock, TimerKind, TimerQueue};
