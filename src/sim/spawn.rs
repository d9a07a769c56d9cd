//! Enemy spawning
//!
//! Enemies appear on a ring around the arena center and get tougher with the level
//! index. Each level either runs ambient interval spawning, fires a one-shot override
//! burst, or both.

use glam::Vec2;
use rand::Rng;

use super::clock::TimerKind;
use super::state::{Enemy, EnemySkin, GameState};
use crate::config::{EnemyModifiers, GameConfig, SpawnOverride, Tuning};
use crate::consts::*;
use crate::polar_offset;

/// Which stat profile a spawn uses
#[derive(Debug, Clone, Copy)]
pub enum SpawnProfile<'a> {
    /// Interval spawning: the level's override when it declares one, otherwise the
    /// level's own modifiers and type `"zombie"`
    Ambient,
    /// An override burst member
    Override(&'a SpawnOverride),
}

/// Derived stats of a freshly spawned enemy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyStats {
    pub speed: f32,
    pub radius: f32,
    pub health: i32,
}

/// Stats for an enemy spawned during level `factor`
pub fn enemy_stats(tuning: &Tuning, factor: usize, modifiers: &EnemyModifiers) -> EnemyStats {
    let factor = factor as f32;
    let speed = (tuning.enemy_base_speed - factor * SPEED_REDUCTION_PER_LEVEL)
        .max(tuning.enemy_min_speed);

    let inc = modifiers.radius_increment;
    let radius = (tuning.enemy_base_radius + factor * (RADIUS_GROWTH_PER_LEVEL + inc))
        * (1.0 + RADIUS_INCREMENT_SCALE * inc);

    EnemyStats {
        speed: speed * (1.0 + modifiers.speed_multiplier),
        radius,
        health: (tuning.enemy_base_health + modifiers.health_increment).max(1),
    }
}

/// Random point on the spawn ring of the current level
pub fn spawn_position(state: &mut GameState, spawn_radius_percent: f32) -> Vec2 {
    let center = state.arena_center();
    let ring = spawn_radius_percent / 100.0 * center.x.min(center.y);
    let theta = state.rng.random_range(0.0..std::f32::consts::TAU);
    polar_offset(center, ring, theta)
}

/// Spawn one enemy for the current level; returns its id
pub fn spawn_one(state: &mut GameState, config: &GameConfig, profile: SpawnProfile) -> Option<u32> {
    let level = config.level(state.level_index)?;
    let (modifiers, kind) = match profile {
        SpawnProfile::Ambient => match level.spawn_override() {
            Some(o) => (&o.modifiers, o.name.as_str()),
            None => (&level.modifiers, DEFAULT_ENEMY_TYPE),
        },
        SpawnProfile::Override(o) => (&o.modifiers, o.name.as_str()),
    };
    let stats = enemy_stats(config.tuning(), state.level_index, modifiers);
    let pos = spawn_position(state, level.spawn_radius_percent);
    let skin = EnemySkin::ALL[state.rng.random_range(0..EnemySkin::ALL.len())];

    let id = state.next_entity_id();
    state.enemies.push(Enemy {
        id,
        pos,
        radius: stats.radius,
        speed: stats.speed,
        health: stats.health,
        skin,
        kind: kind.to_string(),
        flash_until: None,
    });
    log::debug!("Spawned {} #{} at ({:.0}, {:.0})", kind, id, pos.x, pos.y);
    Some(id)
}

/// Fired by the ambient spawn timer
pub fn spawn_ambient(state: &mut GameState, config: &GameConfig) {
    if state.is_playing() {
        spawn_one(state, config, SpawnProfile::Ambient);
    }
}

/// Set up spawning for the level at `state.level_index`
///
/// An override with `spawn_others` off suspends interval spawning and creates its burst
/// once; with `spawn_others` on there is no burst and interval spawns take the override's
/// profile. `kill_all` clears the board once on entry either way. `opening_wave` adds the
/// run-start batch of interval enemies.
pub fn enter_level(state: &mut GameState, config: &GameConfig, opening_wave: bool) {
    let Some(level) = config.level(state.level_index) else {
        return;
    };
    state.cancel_spawn_timer();

    if let Some(spawn) = level.spawn_override() {
        if spawn.kill_all {
            state.enemies.clear();
        }
        if !spawn.spawn_others {
            for _ in 0..spawn.count {
                spawn_one(state, config, SpawnProfile::Override(spawn));
            }
        }
    }

    if level.ambient_spawning() {
        if opening_wave {
            for _ in 0..config.tuning().initial_wave {
                spawn_one(state, config, SpawnProfile::Ambient);
            }
        }
        let period = config.tuning().spawn_interval_ms;
        state.spawn_timer = Some(state.clock.schedule_repeating(TimerKind::AmbientSpawn, period));
    }
}
