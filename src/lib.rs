//! Zombie Rush - browser arcade shooter simulation core
//!
//! Core modules:
//! - `config`: Level, bonus and tuning documents (parsed and validated once)
//! - `sim`: Deterministic simulation (spawning, combat, bonus ladder, levels)
//! - `game`: Run lifecycle facade and the read-only render view
//! - `web`: wasm-bindgen surface for the browser host

pub mod config;
pub mod game;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::{ConfigError, GameConfig};
pub use game::{Game, RenderView};

use glam::Vec2;

/// Gameplay constants that are not part of the tuning document
pub mod consts {
    /// Upper bound on a single frame delta (ms), avoids a burst after a tab stall
    pub const MAX_FRAME_DT_MS: f64 = 100.0;
    /// Maximum timer fires per frame to prevent spiral of death
    pub const MAX_TIMER_CATCHUP: u32 = 8;

    /// Red flash window after an enemy is hit (ms)
    pub const FLASH_DURATION_MS: f64 = 100.0;
    /// Explosion effect lifetime (ms)
    pub const EXPLOSION_DURATION_MS: f64 = 300.0;

    /// Per-level speed reduction applied to freshly spawned enemies
    pub const SPEED_REDUCTION_PER_LEVEL: f32 = 0.025;
    /// Radius growth per level, added to the level's radius increment
    pub const RADIUS_GROWTH_PER_LEVEL: f32 = 2.0;
    /// Radius scale per unit of radius increment
    pub const RADIUS_INCREMENT_SCALE: f32 = 0.25;

    /// Player stops chasing its target when this close
    pub const PLAYER_ARRIVE_DISTANCE: f32 = 1.0;

    /// Type tag of enemies spawned without an override
    pub const DEFAULT_ENEMY_TYPE: &str = "zombie";
}

/// Unit vector from `from` toward `to`, `None` when the points coincide
#[inline]
pub fn direction_to(from: Vec2, to: Vec2) -> Option<Vec2> {
    let delta = to - from;
    let dist = delta.length();
    if dist > 0.0 { Some(delta / dist) } else { None }
}

/// Convert polar (r, theta) to cartesian (x, y) around `center`
#[inline]
pub fn polar_offset(center: Vec2, r: f32, theta: f32) -> Vec2 {
    center + Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Whole seconds elapsed between two millisecond timestamps
#[inline]
pub fn whole_seconds(start_ms: f64, now_ms: f64) -> u64 {
    ((now_ms - start_ms).max(0.0) / 1000.0).floor() as u64
}
