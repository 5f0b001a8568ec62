//! JavaScript-facing game handle
//!
//! The page owns rendering and input. It calls the actions below from button
//! handlers, calls `pump` from `requestAnimationFrame`, and redraws from
//! `snapshot_json`.

use wasm_bindgen::prelude::*;

use crate::game::Game;
use crate::settings::Settings;
use crate::sim::ToppingKind;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Pizza Maker starting...");
}

#[wasm_bindgen]
pub struct WebGame {
    game: Game,
}

#[wasm_bindgen]
impl WebGame {
    /// `settings_json` may be empty to use defaults
    #[wasm_bindgen(constructor)]
    pub fn new(settings_json: Option<String>) -> Result<WebGame, JsValue> {
        let settings = Settings::load(settings_json.as_deref().filter(|s| !s.is_empty()));
        let game = Game::from_settings(settings).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(WebGame { game })
    }

    pub fn start(&mut self) {
        self.game.start();
    }

    /// Unknown topping names are ignored
    pub fn add_topping(&mut self, kind: &str) {
        match ToppingKind::from_str(kind) {
            Some(kind) => self.game.add_topping(kind),
            None => log::warn!("Unknown topping: {}", kind),
        }
    }

    pub fn advance_level(&mut self) {
        self.game.advance_level();
    }

    /// Fire due timers; returns true if anything changed
    pub fn pump(&mut self) -> bool {
        self.game.pump() > 0
    }

    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&self.game.snapshot()).unwrap_or_default()
    }

    /// Events since the last call, as a JSON array
    pub fn events_json(&mut self) -> String {
        serde_json::to_string(&self.game.drain_events()).unwrap_or_default()
    }
}
