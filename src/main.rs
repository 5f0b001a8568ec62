//! Pizza Maker entry point
//!
//! The web build is driven from JavaScript through `platform::web`. Natively
//! this runs a headless auto-chef game on a simulated clock and logs it.

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use std::time::Duration;

    use pizza_maker::platform::ManualClock;
    use pizza_maker::sim::{GameEvent, GamePhase, ToppingKind};
    use pizza_maker::{Game, Settings};

    /// Simulated delay between two topping clicks
    const CLICK_INTERVAL: Duration = Duration::from_millis(450);

    /// Levels the auto-chef plays before walking away
    const MAX_LEVELS: u32 = 7;

    /// Read settings JSON from the path in `PIZZA_MAKER_SETTINGS`, if set
    fn load_settings() -> Settings {
        let json = std::env::var("PIZZA_MAKER_SETTINGS")
            .ok()
            .and_then(|path| match std::fs::read_to_string(&path) {
                Ok(json) => Some(json),
                Err(e) => {
                    log::warn!("Cannot read settings {}: {}", path, e);
                    None
                }
            });
        Settings::load(json.as_deref())
    }

    pub fn run() {
        let settings = load_settings();
        let seed = settings.seed.unwrap_or_else(rand::random);
        let clock = ManualClock::new();
        let mut game = match Game::with_clock(settings, seed, clock.clone()) {
            Ok(game) => game,
            Err(e) => {
                log::error!("Bad configuration: {}", e);
                return;
            }
        };
        log::info!("Auto-chef run with seed {}", seed);

        game.start();
        loop {
            match game.session().phase {
                GamePhase::InProgress => {
                    // Next topping the order still needs, if any
                    let next = ToppingKind::ALL
                        .into_iter()
                        .find(|&k| game.session().can_add(k));
                    if let Some(kind) = next {
                        game.add_topping(kind);
                    }
                    clock.advance(CLICK_INTERVAL);
                    game.pump();
                }
                GamePhase::LevelComplete if game.session().level < MAX_LEVELS => {
                    game.advance_level();
                }
                GamePhase::LevelComplete => {
                    // Idle on the level screen; nothing ticks here, so stop
                    break;
                }
                GamePhase::GameOver | GamePhase::NotStarted => break,
            }

            for event in game.drain_events() {
                report(&event);
            }
        }
        for event in game.drain_events() {
            report(&event);
        }

        println!("\nFinal score: {}", game.session().score);
        println!("High scores:");
        for (i, entry) in game.high_scores().entries().iter().enumerate() {
            println!("  #{} {:<12} {:>6}", i + 1, entry.name, entry.score);
        }
    }

    fn report(event: &GameEvent) {
        match event {
            GameEvent::LevelStarted {
                level,
                time_limit_secs,
            } => println!("Level {} ({}s on the clock)", level, time_limit_secs),
            GameEvent::OrderGenerated { order } => println!(
                "  Order: sauce {}, cheese {}, olive {}",
                order.sauce, order.cheese, order.olive
            ),
            GameEvent::PizzaCompleted { points, score } => {
                println!("  Pizza done! +{} (score {})", points, score)
            }
            GameEvent::LevelCompleted { level, bonus, score } => {
                println!("Level {} complete, bonus +{} (score {})", level, bonus, score)
            }
            GameEvent::TimeExpired { score } => println!("Time up! Score {}", score),
            GameEvent::HighScoreRecorded { rank, score } => {
                println!("New high score #{}: {}", rank, score)
            }
            GameEvent::ToppingPlaced { .. } | GameEvent::PizzaServed { .. } => {}
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Pizza Maker (native) starting...");
    demo::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::wasm_start, this is just to satisfy the compiler
}
