//! Level objectives and level-to-level transitions

use super::spawn;
use super::state::GameState;
use crate::config::{GameConfig, Objective, ObjectiveKind};

/// Whether `objective` is satisfied by the current state
pub fn objective_met(state: &GameState, objective: &Objective) -> bool {
    match &objective.kind {
        ObjectiveKind::KillCount { target } => state.level_kills >= *target,
        ObjectiveKind::ClearTarget { target_type } => {
            state.enemies.iter().all(|e| &e.kind != target_type)
        }
    }
}

/// Complete the level if any of its objectives is met (first match wins)
///
/// Returns true when the level was completed, whether that advanced to the next level
/// or won the run.
pub fn check_objectives(state: &mut GameState, config: &GameConfig) -> bool {
    if !state.is_playing() {
        return false;
    }
    let Some(level) = config.level(state.level_index) else {
        return false;
    };
    match level.objectives.iter().position(|o| objective_met(state, o)) {
        Some(index) => {
            complete_level(state, config, index);
            true
        }
        None => false,
    }
}

/// Apply the objective's reward, then move on to the next level or win
fn complete_level(state: &mut GameState, config: &GameConfig, objective_index: usize) {
    let Some(objective) = config
        .level(state.level_index)
        .and_then(|l| l.objectives.get(objective_index))
    else {
        return;
    };

    state.cancel_spawn_timer();
    state.apply_reward(&objective.reward);
    if objective.clear_board {
        state.enemies.clear();
    }
    if !state.is_playing() {
        // The reward itself drained the last life
        return;
    }

    let next = state.level_index + 1;
    match config.level(next) {
        Some(level) => {
            state.level_index = next;
            state.level_kills = 0;
            log::info!("Level {} started", level.ordinal);
            spawn::enter_level(state, config, false);
        }
        None => state.end_run(true),
    }
}

/// Start a run: spawn for the first level, with the opening wave
pub fn begin(state: &mut GameState, config: &GameConfig) {
    state.level_index = 0;
    state.level_kills = 0;
    if let Some(level) = config.level(0) {
        log::info!("Level {} started", level.ordinal);
    }
    spawn::enter_level(state, config, true);
}
