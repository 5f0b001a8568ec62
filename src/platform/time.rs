//! Monotonic clocks and the game's timer queue
//!
//! The game never sleeps or registers callbacks. The host advances a `Clock`,
//! calls `Game::pump`, and whatever timers are due fire in due-time order.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

/// Monotonic time source, measured from an arbitrary origin
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Wall clock backed by `std::time::Instant`
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: std::time::Instant,
}

#[cfg(not(target_arch = "wasm32"))]
impl Default for SystemClock {
    fn default() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Browser clock (`Date.now()`; `Instant` is unavailable on wasm32)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin_ms: f64,
}

#[cfg(target_arch = "wasm32")]
impl Default for SystemClock {
    fn default() -> Self {
        Self {
            origin_ms: js_sys::Date::now(),
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl Clock for SystemClock {
    fn now(&self) -> Duration {
        let elapsed = (js_sys::Date::now() - self.origin_ms).max(0.0);
        Duration::from_secs_f64(elapsed / 1000.0)
    }
}

/// Hand-cranked clock; clones share the same time
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, dt: Duration) {
        self.now.set(self.now.get() + dt);
    }

    pub fn set(&self, now: Duration) {
        self.now.set(now);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// The two timers the game uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// 1 Hz level countdown
    Countdown,
    /// One-shot end of the pizza send animation
    SendPizza,
}

#[derive(Debug, Clone, Copy)]
struct Timer {
    kind: TimerKind,
    due: Duration,
    /// Re-arm period for intervals
    period: Option<Duration>,
}

/// At most one pending timer per kind
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    timers: Vec<Timer>,
}

/// Shortest allowed interval period
const MIN_PERIOD: Duration = Duration::from_millis(1);

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a repeating timer, replacing any pending timer of the same kind
    pub fn set_interval(&mut self, kind: TimerKind, now: Duration, period: Duration) {
        let period = period.max(MIN_PERIOD);
        self.cancel(kind);
        self.timers.push(Timer {
            kind,
            due: now + period,
            period: Some(period),
        });
    }

    /// Arm a one-shot timer, replacing any pending timer of the same kind
    pub fn set_timeout(&mut self, kind: TimerKind, now: Duration, delay: Duration) {
        self.cancel(kind);
        self.timers.push(Timer {
            kind,
            due: now + delay,
            period: None,
        });
    }

    /// Returns true if a timer was pending
    pub fn cancel(&mut self, kind: TimerKind) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.kind != kind);
        self.timers.len() != before
    }

    pub fn is_active(&self, kind: TimerKind) -> bool {
        self.timers.iter().any(|t| t.kind == kind)
    }

    /// Next due time across all timers
    pub fn next_due(&self) -> Option<Duration> {
        self.timers.iter().map(|t| t.due).min()
    }

    /// Take the earliest timer due at or before `now`.
    ///
    /// Intervals are re-armed one period after their due time (not after
    /// `now`), so a late pump still delivers every missed tick. Ties go to the
    /// timer armed first.
    pub fn pop_due(&mut self, now: Duration) -> Option<(TimerKind, Duration)> {
        let idx = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= now)
            .min_by_key(|(i, t)| (t.due, *i))
            .map(|(i, _)| i)?;

        let timer = self.timers[idx];
        match timer.period {
            Some(period) => self.timers[idx].due += period,
            None => {
                self.timers.remove(idx);
            }
        }
        Some((timer.kind, timer.due))
    }

    pub fn clear(&mut self) {
        self.timers.clear();
    }
}
