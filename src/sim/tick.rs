//! Per-frame simulation tick
//!
//! Core game loop: advance the clock (firing ambient spawns), move the player, move
//! enemies and resolve contact, check the level objective, then collect bonus pickups.

use glam::Vec2;

use super::clock::TimerKind;
use super::collision::step_toward;
use super::state::GameState;
use super::{bonus, combat, level, spawn};
use crate::config::GameConfig;
use crate::consts::PLAYER_ARRIVE_DISTANCE;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Point the player walks toward (mouse position)
    pub target: Option<Vec2>,
}

/// Create a run and spawn its first level
pub fn new_run(
    config: &GameConfig,
    arena: Vec2,
    avatar: impl Into<String>,
    seed: u64,
) -> GameState {
    let mut state = GameState::new(config, arena, avatar, seed);
    level::begin(&mut state, config);
    log::info!(
        "Run started: avatar {}, seed {}, {} enemies on the board",
        state.player.avatar,
        seed,
        state.enemies.len()
    );
    state
}

/// Advance the run by one frame of `dt_ms` milliseconds
///
/// Terminal runs are left untouched.
pub fn tick(state: &mut GameState, config: &GameConfig, input: &TickInput, dt_ms: f64) {
    if !state.is_playing() {
        return;
    }

    for timer in state.clock.advance(dt_ms) {
        match timer {
            TimerKind::AmbientSpawn => spawn::spawn_ambient(state, config),
        }
    }

    // Update player position
    if let Some(target) = input.target {
        if state.player.pos.distance(target) > PLAYER_ARRIVE_DISTANCE {
            state.player.pos = step_toward(state.player.pos, target, config.tuning().player_speed);
        }
    }

    combat::resolve_tick(state);
    if !state.is_playing() {
        return;
    }
    level::check_objectives(state, config);
    if !state.is_playing() {
        return;
    }
    bonus::collect_pickups(state, config);
}
