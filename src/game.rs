//! Run lifecycle and the host-facing command surface
//!
//! [`Game`] owns the validated configuration and the current run. Input handlers call
//! its commands; the renderer reads a [`RenderView`] each frame. Commands that arrive
//! while no run is in progress (before start, after game over) are ignored.

use glam::Vec2;
use serde::Serialize;

use crate::config::{GameConfig, TierDisplay};
use crate::consts::MAX_FRAME_DT_MS;
use crate::sim::{GameState, ShotOutcome, TickInput, combat, new_run, tick};

/// Game instance holding config and the current run
#[derive(Debug)]
pub struct Game {
    config: GameConfig,
    state: Option<GameState>,
    input: TickInput,
    arena: Vec2,
    /// Avatar of the last started run, reused by restart
    avatar: Option<String>,
    seed: u64,
    runs_started: u64,
}

impl Game {
    pub fn new(config: GameConfig, width: f32, height: f32, seed: u64) -> Self {
        Self {
            config,
            state: None,
            input: TickInput::default(),
            arena: Vec2::new(width, height),
            avatar: None,
            seed,
            runs_started: 0,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Current (or last finished) run
    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    /// Start a fresh run with the chosen avatar
    pub fn start_run(&mut self, avatar: impl Into<String>) {
        let avatar = avatar.into();
        let seed = self.seed.wrapping_add(self.runs_started);
        self.runs_started += 1;
        self.input = TickInput::default();
        self.state = Some(new_run(&self.config, self.arena, avatar.clone(), seed));
        self.avatar = Some(avatar);
    }

    /// Start over with the same avatar; returns false if no run was ever started
    pub fn restart_run(&mut self) -> bool {
        match self.avatar.clone() {
            Some(avatar) => {
                self.start_run(avatar);
                true
            }
            None => {
                log::debug!("Restart ignored: no run started yet");
                false
            }
        }
    }

    /// Point the player at a position (mouse move)
    pub fn set_player_target(&mut self, x: f32, y: f32) {
        self.input.target = Some(Vec2::new(x, y));
    }

    /// Fire at the nearest enemy
    pub fn shoot(&mut self) -> ShotOutcome {
        match self.state.as_mut() {
            Some(state) => combat::shoot(state, &self.config),
            None => {
                log::debug!("Shot ignored: no run in progress");
                ShotOutcome::Ignored
            }
        }
    }

    /// Window resize; recenters the player
    pub fn resize(&mut self, width: f32, height: f32) {
        self.arena = Vec2::new(width, height);
        self.input.target = None;
        if let Some(state) = self.state.as_mut() {
            state.resize(self.arena);
        }
    }

    /// Run one animation frame, `dt_ms` since the previous one
    pub fn frame(&mut self, dt_ms: f64) {
        let dt_ms = dt_ms.clamp(0.0, MAX_FRAME_DT_MS);
        if let Some(state) = self.state.as_mut() {
            tick(state, &self.config, &self.input, dt_ms);
        }
    }

    pub fn is_over(&self) -> bool {
        self.state.as_ref().is_some_and(|s| s.phase.is_terminal())
    }

    /// Snapshot for the renderer; finished explosions are dropped on the way
    pub fn view(&mut self) -> Option<RenderView> {
        let state = self.state.as_mut()?;
        state.prune_explosions();
        Some(RenderView::from_state(state, &self.config))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub life: u32,
    pub bullets: u32,
    pub avatar: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnemyView {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub emoji: &'static str,
    pub kind: String,
    pub flashing: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PickupView {
    pub tier: String,
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub display: TierDisplay,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplosionView {
    pub x: f32,
    pub y: f32,
    /// 0 at start, 1 when finished
    pub progress: f32,
}

/// Everything the renderer draws for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderView {
    pub player: PlayerView,
    pub enemies: Vec<EnemyView>,
    pub pickups: Vec<PickupView>,
    pub explosions: Vec<ExplosionView>,
    pub kills: u32,
    pub level_kills: u32,
    /// Level number shown in the HUD
    pub level: u32,
    pub elapsed_secs: u64,
    pub terminal: bool,
    pub message: Option<String>,
}

impl RenderView {
    pub fn from_state(state: &GameState, config: &GameConfig) -> Self {
        let now = state.now_ms();
        let player = &state.player;

        Self {
            player: PlayerView {
                x: player.pos.x,
                y: player.pos.y,
                radius: player.radius,
                life: player.life,
                bullets: player.bullets,
                avatar: player.avatar.clone(),
            },
            enemies: state
                .enemies
                .iter()
                .map(|e| EnemyView {
                    id: e.id,
                    x: e.pos.x,
                    y: e.pos.y,
                    radius: e.radius,
                    emoji: e.skin.emoji(),
                    kind: e.kind.clone(),
                    flashing: e.is_flashing(now),
                })
                .collect(),
            pickups: state
                .bonus_slots
                .iter()
                .zip(config.tiers())
                .filter_map(|(slot, tier)| {
                    slot.active.map(|p| PickupView {
                        tier: tier.key.clone(),
                        x: p.pos.x,
                        y: p.pos.y,
                        radius: p.radius,
                        display: tier.display.clone(),
                    })
                })
                .collect(),
            explosions: state
                .live_explosions()
                .map(|e| ExplosionView {
                    x: e.pos.x,
                    y: e.pos.y,
                    progress: ((now - e.started_ms) / e.duration_ms) as f32,
                })
                .collect(),
            kills: state.kills,
            level_kills: state.level_kills,
            level: config
                .level(state.level_index)
                .map_or(state.level_index as u32 + 1, |l| l.ordinal),
            elapsed_secs: state.elapsed_secs(),
            terminal: state.phase.is_terminal(),
            message: state.phase.message(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEVELS: &str = r#"{"levels": [
        {"level": 1, "typeObjectives": [{"config": {"type": "killCount", "value": 2}}]},
        {"level": 2, "typeObjectives": [{"config": {"type": "killCount", "value": 50}}]}
    ]}"#;
    const BONUS: &str = r#"{"basic": {"tier1": {"order": 0, "threshold": 3, "reward": {"bullets": 5},
        "display": {"color": "gold", "textColor": "black", "text": "+5"}}}}"#;

    fn game() -> Game {
        let config = GameConfig::from_json(LEVELS, BONUS, None).unwrap();
        Game::new(config, 800.0, 600.0, 99)
    }

    #[test]
    fn test_commands_before_start_are_ignored() {
        let mut game = game();
        assert_eq!(game.shoot(), ShotOutcome::Ignored);
        assert!(!game.restart_run());
        game.frame(16.0);
        assert!(game.state().is_none());
        assert!(game.view().is_none());
    }

    #[test]
    fn test_start_run_and_view() {
        let mut game = game();
        game.start_run("🤠");
        let view = game.view().unwrap();
        assert_eq!(view.player.avatar, "🤠");
        assert_eq!(view.player.life, 3);
        assert_eq!(view.player.bullets, 10);
        assert_eq!(view.enemies.len(), 5);
        assert_eq!(view.level, 1);
        assert!(!view.terminal);
        assert!(view.message.is_none());
    }

    #[test]
    fn test_kills_advance_level_in_view() {
        let mut game = game();
        game.start_run("🤠");
        assert!(matches!(game.shoot(), ShotOutcome::Killed { .. }));
        assert!(matches!(game.shoot(), ShotOutcome::Killed { .. }));

        let view = game.view().unwrap();
        assert_eq!(view.level, 2);
        assert_eq!(view.kills, 2);
        assert_eq!(view.level_kills, 0);
        assert_eq!(view.player.bullets, 8);
        assert_eq!(view.explosions.len(), 2);

        game.frame(100.0);
        game.frame(100.0);
        game.frame(100.0);
        assert!(game.view().unwrap().explosions.is_empty());
        assert!(game.state().unwrap().explosions.is_empty());
    }

    #[test]
    fn test_pickup_shows_display() {
        let mut game = game();
        game.start_run("🤠");
        for _ in 0..3 {
            game.shoot();
        }
        let view = game.view().unwrap();
        assert_eq!(view.pickups.len(), 1);
        assert_eq!(view.pickups[0].tier, "tier1");
        assert_eq!(view.pickups[0].display.text, "+5");
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut game = game();
        game.start_run("🤠");
        game.shoot();
        game.frame(50.0);
        assert!(game.restart_run());

        let state = game.state().unwrap();
        assert_eq!(state.kills, 0);
        assert_eq!(state.player.bullets, 10);
        assert_eq!(state.player.avatar, "🤠");
        assert_eq!(state.now_ms(), 0.0);
        assert_eq!(state.enemies.len(), 5);
    }

    #[test]
    fn test_frame_delta_is_clamped() {
        let mut game = game();
        game.start_run("🤠");
        game.frame(5_000.0);
        assert_eq!(game.state().unwrap().now_ms(), MAX_FRAME_DT_MS);
    }

    #[test]
    fn test_resize_recenters_player() {
        let mut game = game();
        game.start_run("🤠");
        game.set_player_target(10.0, 10.0);
        game.resize(1000.0, 400.0);
        assert_eq!(game.state().unwrap().player.pos, Vec2::new(500.0, 200.0));
    }

    #[test]
    fn test_view_serializes_camel_case() {
        let mut game = game();
        game.start_run("🤠");
        let json = serde_json::to_string(&game.view().unwrap()).unwrap();
        assert!(json.contains("\"levelKills\":0"));
        assert!(json.contains("\"elapsedSecs\":0"));
    }
}
