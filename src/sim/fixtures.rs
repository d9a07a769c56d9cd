//! Shared builders for simulation tests

use glam::Vec2;

use super::state::{Enemy, EnemySkin, GameState};
use crate::config::{
    BonusTier, EnemyModifiers, GameConfig, LevelDef, Objective, ObjectiveKind, Reward,
    SpawnOverride, TierDisplay, Tuning,
};
use crate::consts::DEFAULT_ENEMY_TYPE;

pub const ARENA: Vec2 = Vec2::new(800.0, 600.0);

pub fn tier(key: &str, order: i32, threshold: u32, bullets: i32, life: i32) -> BonusTier {
    BonusTier {
        key: key.to_string(),
        order,
        threshold,
        reward: Reward { bullets, life },
        display: TierDisplay::default(),
    }
}

pub fn kill_level(target: u32) -> LevelDef {
    level(ObjectiveKind::KillCount { target }, Reward::default(), None)
}

pub fn clear_level(target_type: &str, spawn_override: Option<SpawnOverride>) -> LevelDef {
    level(
        ObjectiveKind::ClearTarget {
            target_type: target_type.to_string(),
        },
        Reward::default(),
        spawn_override,
    )
}

pub fn level(
    kind: ObjectiveKind,
    reward: Reward,
    spawn_override: Option<SpawnOverride>,
) -> LevelDef {
    LevelDef {
        ordinal: 1,
        modifiers: EnemyModifiers::default(),
        spawn_radius_percent: 100.0,
        objectives: vec![Objective {
            kind,
            reward,
            clear_board: false,
            spawn_override,
        }],
    }
}

pub fn boss_override(count: u32, spawn_others: bool, kill_all: bool) -> SpawnOverride {
    SpawnOverride {
        name: "boss".to_string(),
        modifiers: EnemyModifiers {
            speed_multiplier: 0.5,
            radius_increment: 2.0,
            health_increment: 4,
        },
        kill_all,
        spawn_others,
        count,
    }
}

/// Levels with a single `tier1` rung (threshold 3, +5 bullets)
pub fn config(levels: &[LevelDef]) -> GameConfig {
    config_with_tiers(levels, vec![tier("tier1", 0, 3, 5, 0)])
}

pub fn config_with_tiers(levels: &[LevelDef], tiers: Vec<BonusTier>) -> GameConfig {
    GameConfig::new(levels.to_vec(), tiers, Tuning::default()).unwrap()
}

/// A playing state with nothing spawned
pub fn state(config: &GameConfig) -> GameState {
    GameState::new(config, ARENA, "🙂", 42)
}

/// Push a default 1-health enemy and return its id
pub fn enemy_at(state: &mut GameState, pos: Vec2) -> u32 {
    let id = state.next_entity_id();
    state.enemies.push(Enemy {
        id,
        pos,
        radius: 15.0,
        speed: 0.35,
        health: 1,
        skin: EnemySkin::Zombie,
        kind: DEFAULT_ENEMY_TYPE.to_string(),
        flash_until: None,
    });
    id
}
