//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Simulated clock only (no wall-clock reads)
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod bonus;
pub mod clock;
pub mod collision;
pub mod combat;
pub mod level;
pub mod spawn;
pub mod state;
pub mod tick;

#[cfg(test)]
pub(crate) mod fixtures;

pub use clock::{SimClock, TimerHandle, TimerKind};
pub use collision::{circles_overlap, nearest_index, step_toward};
pub use combat::{ShotOutcome, shoot};
pub use spawn::{EnemyStats, SpawnProfile, enemy_stats};
pub use state::{
    BonusSlot, Enemy, EnemySkin, Explosion, GamePhase, GameState, Pickup, Player,
};
pub use tick::{TickInput, new_run, tick};
