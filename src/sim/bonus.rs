//! Bonus ladder
//!
//! Tiers are climbed one rung at a time. Kills feed the counter of the current tier;
//! reaching its threshold drops that tier's pickup and moves the ladder up. Picking up
//! a tier's reward rewinds the ladder to that tier and wipes everything above it, so a
//! player who grabs a low pickup gives up progress toward the higher ones.

use glam::Vec2;

use super::collision::circles_overlap;
use super::state::{GameState, Pickup};
use crate::config::GameConfig;

/// Count a kill for the current tier; returns the tier index whose pickup dropped
pub fn record_kill(state: &mut GameState, config: &GameConfig, at: Vec2) -> Option<usize> {
    let tiers = config.tiers();
    let current = state.current_tier;
    let tier = tiers.get(current)?;
    let slot = state.bonus_slots.get_mut(current)?;

    slot.counter += 1;
    if slot.active.is_some() || slot.counter < tier.threshold {
        return None;
    }

    slot.active = Some(Pickup {
        pos: at,
        radius: config.tuning().pickup_radius,
    });
    state.current_tier = (current + 1).min(tiers.len() - 1);
    for slot in &mut state.bonus_slots[state.current_tier..] {
        slot.counter = 0;
    }
    log::debug!("Bonus '{}' dropped at ({:.0}, {:.0})", tier.key, at.x, at.y);
    Some(current)
}

/// Collect the first pickup (in ladder order) the player is touching
///
/// Returns the collected tier index. Collecting clears every higher tier, so at most
/// one pickup can be collected per tick.
pub fn collect_pickups(state: &mut GameState, config: &GameConfig) -> Option<usize> {
    if !state.is_playing() {
        return None;
    }
    let player_pos = state.player.pos;
    let player_radius = state.player.radius;

    let index = state.bonus_slots.iter().position(|slot| {
        slot.active
            .is_some_and(|p| circles_overlap(player_pos, player_radius, p.pos, p.radius))
    })?;
    let tier = config.tiers().get(index)?;

    for slot in &mut state.bonus_slots[index..] {
        slot.active = None;
        slot.counter = 0;
    }
    state.current_tier = index;
    state.apply_reward(&tier.reward);
    log::info!(
        "Bonus '{}' collected: bullets {}, life {}",
        tier.key,
        state.player.bullets,
        state.player.life
    );
    Some(index)
}
