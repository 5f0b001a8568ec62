//! Session transitions
//!
//! Each action is a free function over `&mut GameSession` that returns the
//! events it produced. An empty result means the action was not valid in the
//! current phase and nothing changed.

use rand::Rng;

use super::order::{PlacedTopping, ToppingKind, generate_order, is_complete};
use super::state::{GameEvent, GamePhase, GameSession};
use crate::consts::*;
use crate::tuning::LevelTable;

/// Begin a new game from the title screen or after game over
pub fn start<R: Rng + ?Sized>(
    session: &mut GameSession,
    levels: &LevelTable,
    rng: &mut R,
) -> Vec<GameEvent> {
    match session.phase {
        GamePhase::NotStarted | GamePhase::GameOver => {}
        _ => {
            log::debug!("start ignored in {:?}", session.phase);
            return Vec::new();
        }
    }

    session.level = 1;
    session.score = 0;
    session.last_bonus = 0;
    session.score_recorded = false;
    session.phase = GamePhase::InProgress;
    log::info!("New game");
    setup_level(session, levels, rng)
}

/// Reset the countdown and pizza counter for `session.level` and deal a new order
pub fn setup_level<R: Rng + ?Sized>(
    session: &mut GameSession,
    levels: &LevelTable,
    rng: &mut R,
) -> Vec<GameEvent> {
    let config = levels.get(session.level);
    session.time_remaining_secs = config.time_limit_secs;
    session.pizzas_completed = 0;
    session.sending = false;

    let mut events = vec![GameEvent::LevelStarted {
        level: session.level,
        time_limit_secs: config.time_limit_secs,
    }];
    events.push(new_order(session, levels, rng));
    events
}

fn new_order<R: Rng + ?Sized>(
    session: &mut GameSession,
    levels: &LevelTable,
    rng: &mut R,
) -> GameEvent {
    let order = generate_order(levels.get(session.level), rng);
    session.current_order = Some(order);
    session.placed_toppings.clear();
    GameEvent::OrderGenerated { order }
}

/// One countdown second
pub fn tick(session: &mut GameSession) -> Vec<GameEvent> {
    if session.phase != GamePhase::InProgress {
        return Vec::new();
    }

    if session.time_remaining_secs <= 1 {
        session.time_remaining_secs = 0;
        session.sending = false;
        session.phase = GamePhase::GameOver;
        log::info!(
            "Time up on level {} (score {})",
            session.level,
            session.score
        );
        return vec![GameEvent::TimeExpired {
            score: session.score,
        }];
    }

    session.time_remaining_secs -= 1;
    Vec::new()
}

/// Put a topping on the pizza, then check whether the order is done
pub fn add_topping<R: Rng + ?Sized>(
    session: &mut GameSession,
    kind: ToppingKind,
    rng: &mut R,
) -> Vec<GameEvent> {
    if !session.can_add(kind) {
        log::debug!("{} rejected", kind.as_str());
        return Vec::new();
    }

    let id = session.next_topping_id();
    session.placed_toppings.push(PlacedTopping {
        id,
        kind,
        x: TOPPING_AREA_MIN + rng.random::<f32>() * TOPPING_AREA_SPAN,
        y: TOPPING_AREA_MIN + rng.random::<f32>() * TOPPING_AREA_SPAN,
        rotation: rng.random::<f32>() * 360.0,
    });

    let mut events = vec![GameEvent::ToppingPlaced { id, kind }];
    if let Some(event) = check_completion(session) {
        events.push(event);
    }
    events
}

/// Enter the sending state and award pizza points if the order is matched
fn check_completion(session: &mut GameSession) -> Option<GameEvent> {
    if session.sending {
        return None;
    }
    let order = session.current_order.as_ref()?;
    if !is_complete(&session.placed_counts(), order) {
        return None;
    }

    session.sending = true;
    session.score += POINTS_PER_PIZZA;
    Some(GameEvent::PizzaCompleted {
        points: POINTS_PER_PIZZA,
        score: session.score,
    })
}

/// Finish the send animation: next order, or level clear with bonus
pub fn resolve_send<R: Rng + ?Sized>(
    session: &mut GameSession,
    levels: &LevelTable,
    rng: &mut R,
) -> Vec<GameEvent> {
    if session.phase != GamePhase::InProgress || !session.sending {
        return Vec::new();
    }

    let config = levels.get(session.level);
    let served = session.pizzas_completed + 1;
    let events = if served >= config.pizza_count {
        let (min, max) = config.bonus_range;
        let bonus = rng.random_range(min..=max);
        session.last_bonus = bonus;
        session.score += u64::from(bonus);
        session.phase = GamePhase::LevelComplete;
        log::info!(
            "Level {} complete: bonus {}, score {}",
            session.level,
            bonus,
            session.score
        );
        vec![GameEvent::LevelCompleted {
            level: session.level,
            bonus,
            score: session.score,
        }]
    } else {
        session.pizzas_completed = served;
        vec![
            GameEvent::PizzaServed {
                pizzas_completed: served,
            },
            new_order(session, levels, rng),
        ]
    };

    session.sending = false;
    events
}

/// Move on from the level-complete screen
pub fn advance_level<R: Rng + ?Sized>(
    session: &mut GameSession,
    levels: &LevelTable,
    rng: &mut R,
) -> Vec<GameEvent> {
    if session.phase != GamePhase::LevelComplete {
        log::debug!("advance_level ignored in {:?}", session.phase);
        return Vec::new();
    }

    session.level += 1;
    session.phase = GamePhase::InProgress;
    setup_level(session, levels, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::order::{Order, ToppingCounts};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn started(seed: u64) -> (GameSession, LevelTable, Pcg32) {
        let levels = LevelTable::default();
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut session = GameSession::new();
        start(&mut session, &levels, &mut rng);
        (session, levels, rng)
    }

    fn place(session: &mut GameSession, rng: &mut Pcg32, kinds: &[ToppingKind]) -> Vec<GameEvent> {
        kinds
            .iter()
            .flat_map(|&k| add_topping(session, k, rng))
            .collect()
    }

    fn fill_order(session: &mut GameSession, rng: &mut Pcg32) -> Vec<GameEvent> {
        let order = session.current_order.unwrap();
        let mut events = Vec::new();
        for kind in ToppingKind::ALL {
            for _ in 0..order.get(kind) {
                events.extend(add_topping(session, kind, rng));
            }
        }
        events
    }

    #[test]
    fn test_start_sets_up_level_one() {
        let (session, levels, _) = started(1);
        assert_eq!(session.phase, GamePhase::InProgress);
        assert_eq!(session.level, 1);
        assert_eq!(session.score, 0);
        assert_eq!(session.time_remaining_secs, levels.get(1).time_limit_secs);
        assert_eq!(session.pizzas_completed, 0);
        assert!(session.current_order.is_some());
        assert!(session.placed_toppings.is_empty());
    }

    #[test]
    fn test_start_ignored_mid_game() {
        let (mut session, levels, mut rng) = started(1);
        session.score = 300;
        assert!(start(&mut session, &levels, &mut rng).is_empty());
        assert_eq!(session.score, 300);
    }

    #[test]
    fn test_restart_after_game_over_resets() {
        let (mut session, levels, mut rng) = started(2);
        session.level = 4;
        session.score = 1234;
        session.score_recorded = true;
        session.phase = GamePhase::GameOver;

        let events = start(&mut session, &levels, &mut rng);
        assert!(matches!(events[0], GameEvent::LevelStarted { level: 1, .. }));
        assert_eq!(session.phase, GamePhase::InProgress);
        assert_eq!(session.level, 1);
        assert_eq!(session.score, 0);
        assert!(!session.score_recorded);
        assert_eq!(session.time_remaining_secs, 60);
    }

    #[test]
    fn test_tick_counts_down_then_game_over() {
        let (mut session, _, _) = started(3);
        session.time_remaining_secs = 3;

        assert!(tick(&mut session).is_empty());
        assert_eq!(session.time_remaining_secs, 2);
        assert!(tick(&mut session).is_empty());
        assert_eq!(session.time_remaining_secs, 1);

        let events = tick(&mut session);
        assert_eq!(events, vec![GameEvent::TimeExpired { score: 0 }]);
        assert_eq!(session.time_remaining_secs, 0);
        assert_eq!(session.phase, GamePhase::GameOver);

        // No further decrements or repeated expiry
        assert!(tick(&mut session).is_empty());
        assert_eq!(session.time_remaining_secs, 0);
    }

    #[test]
    fn test_tick_ignored_outside_play() {
        let mut session = GameSession::new();
        session.time_remaining_secs = 10;
        assert!(tick(&mut session).is_empty());
        assert_eq!(session.time_remaining_secs, 10);
    }

    #[test]
    fn test_first_pizza_scenario() {
        use ToppingKind::*;
        let (mut session, levels, mut rng) = started(4);
        session.current_order = Some(Order::new(2, 1, 3));

        let events = place(&mut session, &mut rng, &[Sauce, Sauce, Cheese, Olive, Olive]);
        assert!(!events.iter().any(|e| matches!(e, GameEvent::PizzaCompleted { .. })));
        assert!(!session.sending);

        let events = add_topping(&mut session, Olive, &mut rng);
        assert!(events.contains(&GameEvent::PizzaCompleted {
            points: 100,
            score: 100
        }));
        assert!(session.sending);
        assert_eq!(session.score, 100);

        let events = resolve_send(&mut session, &levels, &mut rng);
        assert!(events.contains(&GameEvent::PizzaServed { pizzas_completed: 1 }));
        assert_eq!(session.pizzas_completed, 1);
        assert_eq!(session.phase, GamePhase::InProgress);
        assert!(!session.sending);
        assert!(session.placed_toppings.is_empty());
        assert!(session.current_order.is_some());
    }

    #[test]
    fn test_cannot_overfill() {
        use ToppingKind::*;
        let (mut session, _, mut rng) = started(5);
        session.current_order = Some(Order::new(1, 2, 2));

        add_topping(&mut session, Sauce, &mut rng);
        assert!(add_topping(&mut session, Sauce, &mut rng).is_empty());
        assert!(add_topping(&mut session, Sauce, &mut rng).is_empty());
        assert_eq!(session.placed_counts(), ToppingCounts::new(1, 0, 0));
    }

    #[test]
    fn test_locked_while_sending() {
        let (mut session, _, mut rng) = started(6);
        fill_order(&mut session, &mut rng);
        assert!(session.sending);
        let placed = session.placed_toppings.len();

        for kind in ToppingKind::ALL {
            assert!(add_topping(&mut session, kind, &mut rng).is_empty());
        }
        assert_eq!(session.placed_toppings.len(), placed);
        assert_eq!(session.score, POINTS_PER_PIZZA);
    }

    #[test]
    fn test_level_clear_awards_bonus() {
        let (mut session, levels, mut rng) = started(7);

        fill_order(&mut session, &mut rng);
        resolve_send(&mut session, &levels, &mut rng);
        fill_order(&mut session, &mut rng);
        let events = resolve_send(&mut session, &levels, &mut rng);

        assert_eq!(session.phase, GamePhase::LevelComplete);
        assert!((50..=100).contains(&session.last_bonus));
        assert_eq!(session.score, 200 + u64::from(session.last_bonus));
        assert!(matches!(events[0], GameEvent::LevelCompleted { level: 1, .. }));
        // The final pizza does not bump the counter past the level size
        assert_eq!(session.pizzas_completed, 1);
        assert!(!session.sending);
    }

    #[test]
    fn test_resolve_without_send_is_noop() {
        let (mut session, levels, mut rng) = started(8);
        let order = session.current_order;
        assert!(resolve_send(&mut session, &levels, &mut rng).is_empty());
        assert_eq!(session.current_order, order);
    }

    #[test]
    fn test_advance_level() {
        let (mut session, levels, mut rng) = started(9);
        assert!(advance_level(&mut session, &levels, &mut rng).is_empty());
        assert_eq!(session.level, 1);

        session.phase = GamePhase::LevelComplete;
        session.time_remaining_secs = 12;
        advance_level(&mut session, &levels, &mut rng);
        assert_eq!(session.level, 2);
        assert_eq!(session.phase, GamePhase::InProgress);
        assert_eq!(session.time_remaining_secs, 55);
        assert_eq!(session.pizzas_completed, 0);
        let order = session.current_order.unwrap();
        for kind in ToppingKind::ALL {
            assert!((1..=4).contains(&order.get(kind)));
        }
    }

    #[test]
    fn test_past_last_level_reuses_config() {
        let (mut session, levels, mut rng) = started(10);
        session.level = 5;
        session.phase = GamePhase::LevelComplete;
        advance_level(&mut session, &levels, &mut rng);
        assert_eq!(session.level, 6);
        assert_eq!(session.time_remaining_secs, 40);
    }

    #[test]
    fn test_time_up_clears_sending() {
        let (mut session, levels, mut rng) = started(11);
        fill_order(&mut session, &mut rng);
        session.time_remaining_secs = 1;
        tick(&mut session);
        assert_eq!(session.phase, GamePhase::GameOver);
        assert!(!session.sending);
        // Late resolution must not revive the game
        assert!(resolve_send(&mut session, &levels, &mut rng).is_empty());
        assert_eq!(session.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_topping_ids_unique_across_orders() {
        let (mut session, levels, mut rng) = started(12);
        let mut ids: Vec<u64> = Vec::new();
        for e in fill_order(&mut session, &mut rng) {
            if let GameEvent::ToppingPlaced { id, .. } = e {
                ids.push(id);
            }
        }
        resolve_send(&mut session, &levels, &mut rng);
        for e in fill_order(&mut session, &mut rng) {
            if let GameEvent::ToppingPlaced { id, .. } = e {
                assert!(!ids.contains(&id));
            }
        }
    }

    #[test]
    fn test_topping_placement_in_area() {
        let (mut session, _, mut rng) = started(13);
        fill_order(&mut session, &mut rng);
        for t in &session.placed_toppings {
            assert!((20.0..=80.0).contains(&t.x));
            assert!((20.0..=80.0).contains(&t.y));
            assert!((0.0..=360.0).contains(&t.rotation));
        }
    }
}
