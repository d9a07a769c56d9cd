//! Zombie Rush entry point
//!
//! The browser build is driven through the `web` bindings of the library. Natively this
//! binary loads the JSON configs from a directory and plays one run headless with a
//! simple autopilot, which is handy for balancing level and bonus configs.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Zombie Rush (native) starting...");

    if let Err(e) = headless::run() {
        log::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::start, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::error::Error;
    use std::fs;
    use std::path::PathBuf;

    use zombie_rush::sim::{GameState, ShotOutcome, nearest_index};
    use zombie_rush::{Game, GameConfig};

    const ARENA_WIDTH: f32 = 1280.0;
    const ARENA_HEIGHT: f32 = 720.0;
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Give up after ten minutes of simulated play
    const MAX_FRAMES: u32 = 60 * 60 * 10;
    /// Frames between autopilot shots
    const SHOT_COOLDOWN: u32 = 12;
    /// Autopilot only shoots enemies this close
    const SHOT_RANGE: f32 = 160.0;

    /// Usage: `zombie-rush [config-dir] [seed]`
    pub fn run() -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args().skip(1);
        let dir = args.next().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("config"));
        let seed = match args.next() {
            Some(s) => s.parse::<u64>()?,
            None => 1,
        };

        let level_json = fs::read_to_string(dir.join("levelConfig.json"))?;
        let bonus_json = fs::read_to_string(dir.join("bonusConfig.json"))?;
        let game_json = fs::read_to_string(dir.join("gameConfig.json")).ok();
        let config = GameConfig::from_json(&level_json, &bonus_json, game_json.as_deref())?;

        let mut game = Game::new(config, ARENA_WIDTH, ARENA_HEIGHT, seed);
        game.start_run("🙂");

        let mut cooldown = 0;
        for frame in 0..MAX_FRAMES {
            let Some(state) = game.state() else { break };
            let (target, wants_shot) = autopilot(state);
            game.set_player_target(target.0, target.1);

            if cooldown > 0 {
                cooldown -= 1;
            } else if wants_shot {
                if let ShotOutcome::Killed { enemy_id, .. } = game.shoot() {
                    log::debug!("Autopilot killed #{}", enemy_id);
                }
                cooldown = SHOT_COOLDOWN;
            }

            game.frame(FRAME_MS);
            if game.is_over() {
                break;
            }
            if frame % 600 == 0 {
                if let Some(view) = game.view() {
                    log::info!(
                        "t={}s level={} life={} bullets={} kills={} enemies={}",
                        view.elapsed_secs,
                        view.level,
                        view.player.life,
                        view.player.bullets,
                        view.kills,
                        view.enemies.len()
                    );
                }
            }
        }

        match game.view() {
            Some(view) => println!(
                "{} (kills: {}, level: {})",
                view.message.unwrap_or_else(|| "Still alive after the frame limit.".to_string()),
                view.kills,
                view.level
            ),
            None => println!("No run was played."),
        }
        Ok(())
    }

    /// Walk to the nearest pickup (or the arena center) and shoot anything in range
    fn autopilot(state: &GameState) -> ((f32, f32), bool) {
        let player = state.player.pos;
        let pickups: Vec<_> = state
            .bonus_slots
            .iter()
            .filter_map(|s| s.active.map(|p| p.pos))
            .collect();
        let target = nearest_index(player, pickups.iter().copied())
            .map(|i| pickups[i])
            .unwrap_or_else(|| state.arena_center());

        let wants_shot = state
            .enemies
            .iter()
            .any(|e| e.pos.distance(player) - e.radius < SHOT_RANGE);
        ((target.x, target.y), wants_shot)
    }
}
