//! Enemy movement, player contact and shooting

use glam::Vec2;

use super::collision::{circles_overlap, nearest_index, step_toward};
use super::state::{Explosion, GameState};
use super::{bonus, level};
use crate::config::GameConfig;
use crate::consts::FLASH_DURATION_MS;

/// What a shot did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShotOutcome {
    /// No bullets, no enemies, or no run in progress
    Ignored,
    /// Enemy damaged but still standing
    Hit { enemy_id: u32 },
    /// Enemy destroyed at `pos`
    Killed { enemy_id: u32, pos: Vec2 },
}

/// Move every enemy one step toward the player and resolve contact
///
/// An enemy touching the player is destroyed and costs one life. Losing the last life
/// ends the run on the spot; enemies after that one are left untouched.
pub fn resolve_tick(state: &mut GameState) {
    if !state.is_playing() {
        return;
    }
    let player_pos = state.player.pos;
    let player_radius = state.player.radius;

    let mut i = 0;
    while i < state.enemies.len() {
        let enemy = &mut state.enemies[i];
        enemy.pos = step_toward(enemy.pos, player_pos, enemy.speed);

        if circles_overlap(enemy.pos, enemy.radius, player_pos, player_radius) {
            let enemy = state.enemies.remove(i);
            state.player.life = state.player.life.saturating_sub(1);
            log::debug!("Enemy #{} reached the player, life {}", enemy.id, state.player.life);
            if state.player.life == 0 {
                state.end_run(false);
                return;
            }
            continue;
        }
        i += 1;
    }
}

/// Fire one bullet at the enemy nearest the player
///
/// Order of effects: damage, then death bookkeeping (explosion, kill counters), then
/// the level objective check, then one bonus ladder step. The ladder step happens for
/// every kill, even when the objective check ended the run.
pub fn shoot(state: &mut GameState, config: &GameConfig) -> ShotOutcome {
    if !state.is_playing() || state.player.bullets == 0 {
        log::debug!("Shot ignored");
        return ShotOutcome::Ignored;
    }
    let Some(index) = nearest_index(state.player.pos, state.enemies.iter().map(|e| e.pos)) else {
        return ShotOutcome::Ignored;
    };

    state.player.bullets -= 1;
    let now = state.now_ms();
    let enemy = &mut state.enemies[index];
    enemy.health -= 1;
    enemy.flash_until = Some(now + FLASH_DURATION_MS);
    if enemy.health > 0 {
        return ShotOutcome::Hit { enemy_id: enemy.id };
    }

    let enemy = state.enemies.remove(index);
    state.explosions.push(Explosion::new(enemy.pos, now));
    state.kills += 1;
    state.level_kills += 1;

    level::check_objectives(state, config);
    bonus::record_kill(state, config, enemy.pos);

    ShotOutcome::Killed {
        enemy_id: enemy.id,
        pos: enemy.pos,
    }
}
