//! Browser bindings
//!
//! The page fetches the config documents, constructs a `WebGame`, forwards mouse and
//! keyboard events to it and draws the JSON view every animation frame.

use wasm_bindgen::prelude::*;

use crate::config::GameConfig;
use crate::game::Game;
use crate::sim::ShotOutcome;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        // Logger already installed by a previous module instance
        return;
    }
    log::info!("Zombie Rush core loaded");
}

/// Game handle exported to JavaScript
#[wasm_bindgen]
pub struct WebGame {
    inner: Game,
}

#[wasm_bindgen]
impl WebGame {
    /// Fails with a user-facing message when a config document is invalid
    #[wasm_bindgen(constructor)]
    pub fn new(
        level_json: &str,
        bonus_json: &str,
        game_json: Option<String>,
        width: f32,
        height: f32,
        seed: f64,
    ) -> Result<WebGame, JsValue> {
        let config = GameConfig::from_json(level_json, bonus_json, game_json.as_deref())
            .map_err(|e| {
                log::error!("{}", e);
                JsValue::from_str(&e.to_string())
            })?;
        Ok(WebGame {
            inner: Game::new(config, width, height, seed as u64),
        })
    }

    #[wasm_bindgen(js_name = startRun)]
    pub fn start_run(&mut self, avatar: &str) {
        self.inner.start_run(avatar);
    }

    #[wasm_bindgen(js_name = restartRun)]
    pub fn restart_run(&mut self) -> bool {
        self.inner.restart_run()
    }

    #[wasm_bindgen(js_name = setPlayerTarget)]
    pub fn set_player_target(&mut self, x: f32, y: f32) {
        self.inner.set_player_target(x, y);
    }

    /// Returns true when the shot killed an enemy
    pub fn shoot(&mut self) -> bool {
        matches!(self.inner.shoot(), ShotOutcome::Killed { .. })
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.inner.resize(width, height);
    }

    pub fn frame(&mut self, dt_ms: f64) {
        self.inner.frame(dt_ms);
    }

    #[wasm_bindgen(js_name = isOver)]
    pub fn is_over(&self) -> bool {
        self.inner.is_over()
    }

    /// Render view as JSON, `undefined` before the first run
    pub fn view(&mut self) -> Option<String> {
        let view = self.inner.view()?;
        match serde_json::to_string(&view) {
            Ok(json) => Some(json),
            Err(e) => {
                log::warn!("View serialization failed: {:?}", e);
                None
            }
        }
    }
}
