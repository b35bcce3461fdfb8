//! Movement systems: player input, velocity integration, attack following.

use crate::components::{Facing, Mob, Position, StaticAttack, Velocity};
use crate::constants::*;
use crate::input::InputVector;
use glam::Vec2;
use hecs::{Entity, World};

/// Move the player by the polled input vector.
///
/// Returns the displacement applied this tick and, when the horizontal input
/// changed the facing, the new flip state for the renderer.
pub fn move_player(
    world: &mut World,
    player: Entity,
    input: InputVector,
) -> (Vec2, Option<bool>) {
    let displacement = input.as_vec2() * PLAYER_SPEED;

    if let Ok(mut pos) = world.get::<&mut Position>(player) {
        pos.translate(displacement);
    } else {
        return (Vec2::ZERO, None);
    }

    // Source art faces left: moving right flips the sprite
    let mut facing_change = None;
    if input.dx != 0 {
        if let Ok(mut facing) = world.get::<&mut Facing>(player) {
            let flipped = input.dx == 1;
            if facing.flipped != flipped {
                facing.flipped = flipped;
                facing_change = Some(flipped);
            }
        }
    }

    (displacement, facing_change)
}

/// Integrate every velocity-carrying entity (mobs, beams) by `dt` seconds
pub fn integrate_velocities(world: &mut World, dt: f32) {
    for (_, (pos, vel)) in world.query_mut::<(&mut Position, &Velocity)>() {
        pos.translate(vel.as_vec2() * dt);
    }
}

/// Static attacks follow the player's displacement each tick
pub fn follow_player(world: &mut World, player_displacement: Vec2) {
    if player_displacement == Vec2::ZERO {
        return;
    }
    for (_, (pos, _attack)) in world.query_mut::<(&mut Position, &StaticAttack)>() {
        pos.translate(player_displacement);
    }
}

/// Re-aim one mob's velocity at the player. Fired by the mob's recurring
/// movement timer; a firing against a despawned mob is a safe no-op.
pub fn retarget_mob(world: &mut World, mob: Entity, player_pos: Vec2) {
    let speed = match world.get::<&Mob>(mob) {
        Ok(m) => m.speed,
        Err(_) => return,
    };
    let toward = {
        let Ok(pos) = world.get::<&Position>(mob) else {
            return;
        };
        (player_pos - pos.as_vec2()).normalize_or_zero() * speed
    };
    if let Ok(mut vel) = world.get::<&mut Velocity>(mob) {
        vel.x = toward.x;
        vel.y = toward.y;
    }
}

/// Turn mobs toward the player. Returns the entities whose flip changed so
/// the renderer can be notified.
pub fn update_mob_facing(world: &mut World, player_pos: Vec2) -> Vec<(Entity, bool)> {
    let mut changes = Vec::new();
    for (entity, (pos, facing, _mob)) in
        world.query_mut::<(&Position, &mut Facing, &Mob)>()
    {
        let flipped = pos.x < player_pos.x;
        if facing.flipped != flipped {
            facing.flipped = flipped;
            changes.push((entity, flipped));
        }
    }
    changes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Health, MobKind, Player};

    fn spawn_player(world: &mut World) -> Entity {
        world.spawn((
            Position::new(0.0, 0.0),
            Player,
            Facing::new(),
            Health::new(PLAYER_STARTING_HEALTH),
        ))
    }

    #[test]
    fn test_move_player_applies_speed_per_axis() {
        let mut world = World::new();
        let player = spawn_player(&mut world);

        let (displacement, _) = move_player(&mut world, player, InputVector::new(1, -1));
        assert_eq!(displacement, Vec2::new(PLAYER_SPEED, -PLAYER_SPEED));

        let pos = world.get::<&Position>(player).unwrap();
        assert_eq!(pos.as_vec2(), Vec2::new(PLAYER_SPEED, -PLAYER_SPEED));
    }

    #[test]
    fn test_move_player_reports_facing_change_once() {
        let mut world = World::new();
        let player = spawn_player(&mut world);

        let (_, change) = move_player(&mut world, player, InputVector::new(1, 0));
        assert_eq!(change, Some(true));
        // Same direction again: no change to report
        let (_, change) = move_player(&mut world, player, InputVector::new(1, 0));
        assert_eq!(change, None);
        let (_, change) = move_player(&mut world, player, InputVector::new(-1, 0));
        assert_eq!(change, Some(false));
    }

    #[test]
    fn test_integrate_velocities() {
        let mut world = World::new();
        let e = world.spawn((Position::new(0.0, 0.0), Velocity::new(60.0, -30.0)));
        integrate_velocities(&mut world, 0.5);
        let pos = world.get::<&Position>(e).unwrap();
        assert_eq!(pos.as_vec2(), Vec2::new(30.0, -15.0));
    }

    #[test]
    fn test_static_attacks_follow_player() {
        let mut world = World::new();
        let attack = world.spawn((
            Position::new(10.0, 0.0),
            StaticAttack {
                kind: crate::components::AttackKind::Catnip,
                damage: 10,
                radius: 16.0,
                offset: Vec2::new(10.0, 0.0),
            },
        ));
        follow_player(&mut world, Vec2::new(5.0, 5.0));
        let pos = world.get::<&Position>(attack).unwrap();
        assert_eq!(pos.as_vec2(), Vec2::new(15.0, 5.0));
    }

    #[test]
    fn test_retarget_mob_aims_at_player() {
        let mut world = World::new();
        let mob = world.spawn((
            Position::new(100.0, 0.0),
            Velocity::zero(),
            Mob::new(MobKind::Mob1, 50.0, 0.9),
        ));

        retarget_mob(&mut world, mob, Vec2::ZERO);
        let vel = world.get::<&Velocity>(mob).unwrap().as_vec2();
        assert_eq!(vel, Vec2::new(-50.0, 0.0));
    }

    #[test]
    fn test_retarget_despawned_mob_is_noop() {
        let mut world = World::new();
        let mob = world.spawn((
            Position::new(100.0, 0.0),
            Velocity::zero(),
            Mob::new(MobKind::Mob1, 50.0, 0.9),
        ));
        let _ = world.despawn(mob);
        // Must not panic
        retarget_mob(&mut world, mob, Vec2::ZERO);
    }

    #[test]
    fn test_mob_facing_follows_player() {
        let mut world = World::new();
        let mob = world.spawn((
            Position::new(-10.0, 0.0),
            Facing::new(),
            Mob::new(MobKind::Mob1, 50.0, 0.9),
        ));

        let changes = update_mob_facing(&mut world, Vec2::ZERO);
        assert_eq!(changes, vec![(mob, true)]);
        // Unchanged on the next tick
        assert!(update_mob_facing(&mut world, Vec2::ZERO).is_empty());
    }
}
