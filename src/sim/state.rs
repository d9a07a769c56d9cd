//! Game state and core simulation types
//!
//! A single owned [`GameState`] aggregate holds everything a run mutates, so independent
//! runs (and tests) never share state.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::clock::{SimClock, TimerHandle};
use crate::config::{GameConfig, Reward};
use crate::consts::*;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Player ran out of life
    GameOver { elapsed_secs: u64 },
    /// Player cleared the last level
    Won { elapsed_secs: u64 },
}

impl GamePhase {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GamePhase::Playing)
    }

    /// Overlay text for terminal phases
    pub fn message(&self) -> Option<String> {
        match self {
            GamePhase::Playing => None,
            GamePhase::GameOver { elapsed_secs } => {
                Some(format!("Game Over! You lasted {} seconds.", elapsed_secs))
            }
            GamePhase::Won { elapsed_secs } => {
                Some(format!("You Win! You lasted {} seconds.", elapsed_secs))
            }
        }
    }
}

/// The player's avatar
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    pub life: u32,
    pub bullets: u32,
    /// Avatar picked on the start screen (an emoji in the browser build)
    pub avatar: String,
}

impl Player {
    /// Add a reward's deltas; counts saturate at zero
    pub fn apply_reward(&mut self, reward: &Reward) {
        self.bullets = self.bullets.saturating_add_signed(reward.bullets);
        self.life = self.life.saturating_add_signed(reward.life);
    }
}

/// Enemy look, picked at random on spawn. Never read by gameplay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemySkin {
    Zombie,
    ManZombie,
    WomanZombie,
}

impl EnemySkin {
    pub const ALL: [EnemySkin; 3] = [
        EnemySkin::Zombie,
        EnemySkin::ManZombie,
        EnemySkin::WomanZombie,
    ];

    pub fn emoji(&self) -> &'static str {
        match self {
            EnemySkin::Zombie => "🧟",
            EnemySkin::ManZombie => "🧟‍♂️",
            EnemySkin::WomanZombie => "🧟‍♀️",
        }
    }
}

/// An enemy chasing the player
#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    /// Displacement per tick
    pub speed: f32,
    pub health: i32,
    pub skin: EnemySkin,
    /// Spawn override name, or `"zombie"`
    pub kind: String,
    /// Hit-flash end timestamp (ms)
    pub flash_until: Option<f64>,
}

impl Enemy {
    pub fn is_flashing(&self, now_ms: f64) -> bool {
        self.flash_until.is_some_and(|t| now_ms < t)
    }
}

/// Death explosion, visual only
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Explosion {
    pub pos: Vec2,
    pub started_ms: f64,
    pub duration_ms: f64,
}

impl Explosion {
    pub fn new(pos: Vec2, started_ms: f64) -> Self {
        Self {
            pos,
            started_ms,
            duration_ms: EXPLOSION_DURATION_MS,
        }
    }

    pub fn is_live(&self, now_ms: f64) -> bool {
        now_ms - self.started_ms < self.duration_ms
    }
}

/// A bonus pickup lying on the field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pickup {
    pub pos: Vec2,
    pub radius: f32,
}

/// Runtime state of one bonus tier (same index as `GameConfig::tiers`)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BonusSlot {
    pub counter: u32,
    pub active: Option<Pickup>,
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    /// Arena width and height
    pub arena: Vec2,
    pub player: Player,
    /// Live enemies in spawn order
    pub enemies: Vec<Enemy>,
    /// Explosions, pruned when read
    pub explosions: Vec<Explosion>,
    /// Bonus ladder slots in ladder order
    pub bonus_slots: Vec<BonusSlot>,
    /// Tier currently accumulating kills
    pub current_tier: usize,
    /// Current level index (0-based)
    pub level_index: usize,
    /// Kills over the whole run
    pub kills: u32,
    /// Kills since the current level began
    pub level_kills: u32,
    pub clock: SimClock,
    /// Ambient spawn timer, when ambient spawning is running
    pub spawn_timer: Option<TimerHandle>,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Fresh run state with the player centered; nothing spawned yet
    pub fn new(config: &GameConfig, arena: Vec2, avatar: impl Into<String>, seed: u64) -> Self {
        let tuning = config.tuning();
        Self {
            seed,
            phase: GamePhase::Playing,
            arena,
            player: Player {
                pos: arena / 2.0,
                radius: tuning.player_radius,
                life: tuning.player_life,
                bullets: tuning.player_bullets,
                avatar: avatar.into(),
            },
            enemies: Vec::new(),
            explosions: Vec::new(),
            bonus_slots: vec![BonusSlot::default(); config.tiers().len()],
            current_tier: 0,
            level_index: 0,
            kills: 0,
            level_kills: 0,
            clock: SimClock::new(),
            spawn_timer: None,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    #[inline]
    pub fn arena_center(&self) -> Vec2 {
        self.arena / 2.0
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    #[inline]
    pub fn now_ms(&self) -> f64 {
        self.clock.now_ms()
    }

    pub fn elapsed_secs(&self) -> u64 {
        match self.phase {
            GamePhase::Playing => self.clock.elapsed_secs(),
            GamePhase::GameOver { elapsed_secs } | GamePhase::Won { elapsed_secs } => elapsed_secs,
        }
    }

    /// Stop ambient spawning
    pub fn cancel_spawn_timer(&mut self) {
        if let Some(handle) = self.spawn_timer.take() {
            self.clock.cancel(handle);
        }
    }

    /// Apply a reward to the player; a reward that drains the last life ends the run
    pub fn apply_reward(&mut self, reward: &Reward) {
        self.player.apply_reward(reward);
        if self.player.life == 0 && self.is_playing() {
            self.end_run(false);
        }
    }

    /// Enter a terminal phase and stop every timer
    pub fn end_run(&mut self, won: bool) {
        if !self.is_playing() {
            return;
        }
        let elapsed_secs = self.clock.elapsed_secs();
        self.phase = if won {
            GamePhase::Won { elapsed_secs }
        } else {
            GamePhase::GameOver { elapsed_secs }
        };
        self.spawn_timer = None;
        self.clock.cancel_all();
        log::info!(
            "Run ended ({}) after {}s with {} kills",
            if won { "won" } else { "lost" },
            elapsed_secs,
            self.kills
        );
    }

    /// Explosions still running at the current time
    pub fn live_explosions(&self) -> impl Iterator<Item = &Explosion> {
        let now = self.now_ms();
        self.explosions.iter().filter(move |e| e.is_live(now))
    }

    /// Drop finished explosions
    pub fn prune_explosions(&mut self) {
        let now = self.now_ms();
        self.explosions.retain(|e| e.is_live(now));
    }

    /// Move the arena (window resize); the player is recentered
    pub fn resize(&mut self, arena: Vec2) {
        self.arena = arena;
        self.player.pos = arena / 2.0;
    }
}
