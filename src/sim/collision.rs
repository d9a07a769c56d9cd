//! Circle geometry for chasing, contact and targeting
//!
//! Every entity in the arena is a circle. Contact is strict overlap: two circles
//! touching exactly at their rims do not collide.

use glam::Vec2;

use crate::direction_to;

/// Check whether two circles overlap (center distance < sum of radii)
#[inline]
pub fn circles_overlap(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    a.distance(b) < a_radius + b_radius
}

/// Move `from` toward `to` by at most `max_step`
///
/// Coincident points stay put (no direction to move in), and the step is clamped to
/// the remaining distance so a fast mover never overshoots its target.
pub fn step_toward(from: Vec2, to: Vec2, max_step: f32) -> Vec2 {
    match direction_to(from, to) {
        Some(dir) => from + dir * max_step.min(from.distance(to)),
        None => from,
    }
}

/// Index of the point closest to `origin`
///
/// Ties go to the earliest point, so callers get insertion-order tie breaking.
pub fn nearest_index<I>(origin: Vec2, points: I) -> Option<usize>
where
    I: IntoIterator<Item = Vec2>,
{
    let mut best: Option<(usize, f32)> = None;
    for (i, p) in points.into_iter().enumerate() {
        let d = origin.distance_squared(p);
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((i, d)),
        }
    }
    best.map(|(i, _)| i)
}
