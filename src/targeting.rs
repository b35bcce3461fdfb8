//! Targeting resolver - nearest mob to the player.
//!
//! Recomputed once per simulation tick and never cached across ticks, because
//! both the player and the mobs move continuously.

use crate::components::{Mob, Position};
use glam::Vec2;
use hecs::{Entity, World};

/// Find the mob nearest to `player_pos` (Euclidean distance).
///
/// Returns `None` when no mobs exist, in which case dynamic attacks fall back
/// to their default trajectory. Equidistant mobs tie-break on the lower
/// entity bits so the result is deterministic.
pub fn nearest_mob(player_pos: Vec2, world: &World) -> Option<(Entity, Vec2)> {
    let mut best: Option<(Entity, Vec2, f32)> = None;

    for (entity, (pos, _mob)) in world.query::<(&Position, &Mob)>().iter() {
        let mob_pos = pos.as_vec2();
        let dist = player_pos.distance_squared(mob_pos);
        let closer = match best {
            None => true,
            Some((best_entity, _, best_dist)) => {
                dist < best_dist
                    || (dist == best_dist && entity.to_bits() < best_entity.to_bits())
            }
        };
        if closer {
            best = Some((entity, mob_pos, dist));
        }
    }

    best.map(|(entity, pos, _)| (entity, pos))
}
