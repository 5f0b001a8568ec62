//! Game driver
//!
//! Owns the session, leaderboard, RNG, clock and timer queue. The presentation
//! layer calls the action methods and `pump`, then renders `snapshot()`.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::consts::COUNTDOWN_PERIOD;
use crate::highscores::{HighScoreEntry, HighScores};
use crate::platform::time::{Clock, SystemClock, TimerKind, TimerQueue};
use crate::settings::{ConfigError, Settings};
use crate::sim::{
    self, GameEvent, GamePhase, GameSession, Order, PlacedTopping, ToppingCounts, ToppingKind,
};
use crate::tuning::LevelTable;

/// Read-only view for rendering
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub level: u32,
    pub score: u64,
    pub time_remaining_secs: u32,
    pub order: Option<Order>,
    /// Per-kind count already on the pizza
    pub placed: ToppingCounts,
    pub toppings: Vec<PlacedTopping>,
    pub pizzas_completed: u32,
    pub pizzas_total: u32,
    pub sending: bool,
    pub last_bonus: u32,
    /// Kinds that would accept another topping right now
    pub addable: Vec<ToppingKind>,
    pub high_scores: Vec<HighScoreEntry>,
}

/// A running game instance
pub struct Game<R = Pcg32, C = SystemClock> {
    session: GameSession,
    high_scores: HighScores,
    levels: LevelTable,
    settings: Settings,
    rng: R,
    clock: C,
    timers: TimerQueue,
    events: Vec<GameEvent>,
}

impl Game<Pcg32, SystemClock> {
    /// Real-time game configured from settings
    pub fn from_settings(settings: Settings) -> Result<Self, ConfigError> {
        let seed = settings.seed.unwrap_or_else(rand::random);
        log::info!("Game initialized with seed: {}", seed);
        Self::with_clock(settings, seed, SystemClock::default())
    }
}

impl<C: Clock> Game<Pcg32, C> {
    /// Seeded game on a caller-supplied clock
    pub fn with_clock(settings: Settings, seed: u64, clock: C) -> Result<Self, ConfigError> {
        let levels = settings.build_levels()?;
        Ok(Self::new(settings, levels, Pcg32::seed_from_u64(seed), clock))
    }
}

impl<R: Rng, C: Clock> Game<R, C> {
    pub fn new(settings: Settings, levels: LevelTable, rng: R, clock: C) -> Self {
        Self {
            session: GameSession::new(),
            high_scores: HighScores::seeded(),
            levels,
            settings,
            rng,
            clock,
            timers: TimerQueue::new(),
            events: Vec::new(),
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    pub fn levels(&self) -> &LevelTable {
        &self.levels
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// When the host should pump next (None while no timer is armed)
    pub fn next_timer_due(&self) -> Option<std::time::Duration> {
        self.timers.next_due()
    }

    /// Take events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Start (or restart) a game
    pub fn start(&mut self) {
        self.pump();
        let events = sim::start(&mut self.session, &self.levels, &mut self.rng);
        self.apply(events);
    }

    /// Place one topping
    pub fn add_topping(&mut self, kind: ToppingKind) {
        self.pump();
        let events = sim::add_topping(&mut self.session, kind, &mut self.rng);
        self.apply(events);
    }

    /// Continue from the level-complete screen
    pub fn advance_level(&mut self) {
        self.pump();
        let events = sim::advance_level(&mut self.session, &self.levels, &mut self.rng);
        self.apply(events);
    }

    /// Fire every timer due by the clock's current time. Returns how many fired.
    pub fn pump(&mut self) -> usize {
        let now = self.clock.now();
        let mut fired = 0;
        while let Some((kind, _due)) = self.timers.pop_due(now) {
            fired += 1;
            let events = match kind {
                TimerKind::Countdown => sim::tick(&mut self.session),
                TimerKind::SendPizza => {
                    sim::resolve_send(&mut self.session, &self.levels, &mut self.rng)
                }
            };
            self.apply(events);
        }
        fired
    }

    /// Keep timers and leaderboard in step with what a transition did
    fn apply(&mut self, events: Vec<GameEvent>) {
        let now = self.clock.now();
        for event in &events {
            match event {
                GameEvent::LevelStarted { .. } => {
                    self.timers
                        .set_interval(TimerKind::Countdown, now, COUNTDOWN_PERIOD);
                }
                GameEvent::PizzaCompleted { .. } => {
                    self.timers
                        .set_timeout(TimerKind::SendPizza, now, self.settings.send_delay());
                }
                _ => {}
            }
        }

        if self.session.phase != GamePhase::InProgress {
            self.timers.cancel(TimerKind::Countdown);
            self.timers.cancel(TimerKind::SendPizza);
        }

        self.events.extend(events);

        if self.session.phase == GamePhase::GameOver {
            self.record_high_score();
        }
    }

    /// Runs once per game over; later calls are no-ops until the next start
    fn record_high_score(&mut self) {
        if self.session.score_recorded {
            return;
        }
        self.session.score_recorded = true;

        let score = self.session.score;
        if let Some(rank) = self
            .high_scores
            .record_if_qualifying(score, &self.settings.player_name)
        {
            log::info!("New high score #{}: {}", rank, score);
            self.events.push(GameEvent::HighScoreRecorded { rank, score });
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        let s = &self.session;
        Snapshot {
            phase: s.phase,
            level: s.level,
            score: s.score,
            time_remaining_secs: s.time_remaining_secs,
            order: s.current_order,
            placed: s.placed_counts(),
            toppings: s.placed_toppings.clone(),
            pizzas_completed: s.pizzas_completed,
            pizzas_total: self.levels.get(s.level).pizza_count,
            sending: s.sending,
            last_bonus: s.last_bonus,
            addable: ToppingKind::ALL
                .into_iter()
                .filter(|&k| s.can_add(k))
                .collect(),
            high_scores: self.high_scores.entries().to_vec(),
        }
    }
}
