//! Combat resolution: damage rules, cooldown gating, death and drops.
//!
//! Overlaps are found by an explicit spatial pass run once per tick (circle
//! tests against per-entity radii) and resolved pairwise here, so the combat
//! rules stay independent of any physics engine.
//!
//! Damage semantics:
//! - Dynamic attacks damage exactly once, then are removed. They ignore the
//!   mob's cooldown state.
//! - Static attacks are gated by a per-mob cooldown: once a mob takes static
//!   damage it takes none again until the window elapses, no matter how many
//!   static attacks are touching it.
//! - Mob contact damage to the player is gated by one player-wide cooldown.

use crate::clock::{TimerFiring, TimerQueue};
use crate::components::{
    Attackable, DynamicAttack, Health, Mob, Pickup, Position, StaticAttack,
};
use crate::constants::*;
use crate::events::{EventQueue, GameEvent};
use glam::Vec2;
use hecs::{Entity, World};
use rand::Rng;

fn overlaps(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    let reach = ra + rb;
    a.distance_squared(b) <= reach * reach
}

// =============================================================================
// DAMAGE OPERATIONS
// =============================================================================

/// Apply a dynamic attack hit: damage the mob, remove the attack.
/// Independent of the mob's cooldown state. Stale inputs are no-ops.
pub fn apply_dynamic_hit(
    world: &mut World,
    timers: &mut TimerQueue,
    events: &mut EventQueue,
    mob: Entity,
    attack: Entity,
) {
    let damage = match world.get::<&DynamicAttack>(attack) {
        Ok(a) => a.damage,
        Err(_) => return,
    };

    // One-shot: the attack goes away whether or not the mob is still there
    timers.cancel_for_entity(attack);
    let _ = world.despawn(attack);

    if let Ok(mut health) = world.get::<&mut Health>(mob) {
        health.current -= damage;
        events.push(GameEvent::MobHit { mob, damage });
    }
}

/// Apply a static attack hit, gated by the mob's cooldown window.
/// A mob on cooldown loses no health. Stale inputs are no-ops.
pub fn apply_static_hit(
    world: &mut World,
    timers: &mut TimerQueue,
    events: &mut EventQueue,
    now: f32,
    mob: Entity,
    damage: i32,
) {
    {
        let Ok(mut attackable) = world.get::<&mut Attackable>(mob) else {
            return;
        };
        if !attackable.ready {
            return;
        }
        attackable.ready = false;
    }

    if let Ok(mut health) = world.get::<&mut Health>(mob) {
        health.current -= damage;
        events.push(GameEvent::MobHit { mob, damage });
    }

    timers.after(
        now,
        MOB_STATIC_HIT_COOLDOWN,
        Some(mob),
        TimerFiring::StaticCooldownRevert { mob },
    );
}

/// Apply mob contact damage to the player, gated by the player-wide cooldown.
/// Signals `PlayerDefeated` when health reaches zero.
pub fn apply_mob_contact_to_player(
    world: &mut World,
    timers: &mut TimerQueue,
    events: &mut EventQueue,
    now: f32,
    player: Entity,
    damage: i32,
) {
    {
        let Ok(mut attackable) = world.get::<&mut Attackable>(player) else {
            return;
        };
        if !attackable.ready {
            return;
        }
        attackable.ready = false;
    }

    let remaining = {
        let Ok(mut health) = world.get::<&mut Health>(player) else {
            return;
        };
        health.current -= damage;
        health.current
    };

    events.push(GameEvent::PlayerHit { damage, remaining });
    timers.after(now, PLAYER_HIT_COOLDOWN, None, TimerFiring::PlayerCooldownRevert);

    if remaining <= 0 {
        events.push(GameEvent::PlayerDefeated);
    }
}

// =============================================================================
// OVERLAP PASS
// =============================================================================

/// Run the per-tick spatial pass: dynamic attacks against mobs, static
/// attacks against mobs, mobs against the player. Mob and beam snapshots are
/// sorted by entity bits, and a mob touched by several static attacks takes
/// the strongest one, so resolution is deterministic.
pub fn resolve_overlaps(
    world: &mut World,
    timers: &mut TimerQueue,
    events: &mut EventQueue,
    now: f32,
    player: Entity,
) {
    let Ok(player_pos) = world.get::<&Position>(player).map(|p| p.as_vec2()) else {
        return;
    };

    let mut mobs: Vec<(Entity, Vec2)> = world
        .query::<(&Position, &Mob)>()
        .iter()
        .map(|(e, (pos, _))| (e, pos.as_vec2()))
        .collect();
    mobs.sort_by_key(|(e, _)| e.to_bits());

    // Dynamic attacks: first overlapping mob takes the hit, attack is consumed
    let mut beams: Vec<(Entity, Vec2, f32)> = world
        .query::<(&Position, &DynamicAttack)>()
        .iter()
        .map(|(e, (pos, attack))| (e, pos.as_vec2(), attack.radius))
        .collect();
    beams.sort_by_key(|(e, _, _)| e.to_bits());

    for (attack, attack_pos, radius) in beams {
        let hit = mobs
            .iter()
            .find(|(_, mob_pos)| overlaps(attack_pos, radius, *mob_pos, MOB_RADIUS));
        if let Some(&(mob, _)) = hit {
            apply_dynamic_hit(world, timers, events, mob, attack);
        }
    }

    // Static attacks: each touched mob takes at most one hit, per its cooldown
    let mut statics: Vec<(Vec2, f32, i32)> = world
        .query::<(&Position, &StaticAttack)>()
        .iter()
        .map(|(_, (pos, attack))| (pos.as_vec2(), attack.radius, attack.damage))
        .collect();
    statics.sort_by(|a, b| b.2.cmp(&a.2));

    for &(mob, mob_pos) in &mobs {
        let touching = statics
            .iter()
            .find(|(attack_pos, radius, _)| overlaps(*attack_pos, *radius, mob_pos, MOB_RADIUS));
        if let Some(&(_, _, damage)) = touching {
            apply_static_hit(world, timers, events, now, mob, damage);
        }
    }

    // Mob contact with the player
    let touching_player = mobs
        .iter()
        .any(|(_, mob_pos)| overlaps(*mob_pos, MOB_RADIUS, player_pos, PLAYER_RADIUS));
    if touching_player {
        apply_mob_contact_to_player(world, timers, events, now, player, MOB_CONTACT_DAMAGE);
    }
}

// =============================================================================
// DEATH AND DROPS
// =============================================================================

/// Remove every mob whose health dropped to zero or below, rolling its drop
/// exactly once and cancelling its owned timers.
pub fn resolve_deaths(
    world: &mut World,
    timers: &mut TimerQueue,
    events: &mut EventQueue,
    rng: &mut impl Rng,
) {
    let dead: Vec<(Entity, Vec2, crate::components::MobKind, f32)> = world
        .query::<(&Position, &Health, &Mob)>()
        .iter()
        .filter(|(_, (_, health, _))| health.is_dead())
        .map(|(e, (pos, _, mob))| (e, pos.as_vec2(), mob.kind, mob.drop_rate))
        .collect();

    for (mob, position, kind, drop_rate) in dead {
        let roll: f32 = rng.gen();
        if roll < drop_rate {
            let pickup = world.spawn((
                Position::new(position.x, position.y),
                Pickup {
                    exp: PICKUP_EXP_VALUE,
                },
            ));
            events.push(GameEvent::PickupSpawned { pickup });
        }

        timers.cancel_for_entity(mob);
        let _ = world.despawn(mob);
        events.push(GameEvent::MobKilled {
            mob,
            kind,
            position,
        });
    }
}

/// Collect every pickup the player is touching. Returns the experience total
/// to feed the progression controller.
pub fn collect_pickups(world: &mut World, events: &mut EventQueue, player: Entity) -> u32 {
    let Ok(player_pos) = world.get::<&Position>(player).map(|p| p.as_vec2()) else {
        return 0;
    };

    let collected: Vec<(Entity, u32)> = world
        .query::<(&Position, &Pickup)>()
        .iter()
        .filter(|(_, (pos, _))| overlaps(pos.as_vec2(), 0.0, player_pos, PICKUP_RADIUS))
        .map(|(e, (_, pickup))| (e, pickup.exp))
        .collect();

    let mut total = 0;
    for (pickup, exp) in collected {
        let _ = world.despawn(pickup);
        events.push(GameEvent::PickupCollected { exp });
        total += exp;
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Facing, MobKind, Player, Velocity};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn spawn_test_mob(world: &mut World, hp: i32, drop_rate: f32) -> Entity {
        world.spawn((
            Position::new(0.0, 0.0),
            Velocity::zero(),
            Mob::new(MobKind::Mob1, 50.0, drop_rate),
            Health::new(hp),
            Attackable::new(),
            Facing::new(),
        ))
    }

    fn spawn_test_player(world: &mut World) -> Entity {
        world.spawn((
            Position::new(0.0, 0.0),
            Player,
            Facing::new(),
            Health::new(PLAYER_STARTING_HEALTH),
            Attackable::new(),
        ))
    }

    #[test]
    fn test_static_hit_on_cooldown_loses_no_health() {
        let mut world = World::new();
        let mut timers = TimerQueue::new();
        let mut events = EventQueue::new();
        let mob = spawn_test_mob(&mut world, 20, 0.0);

        apply_static_hit(&mut world, &mut timers, &mut events, 0.0, mob, 6);
        assert_eq!(world.get::<&Health>(mob).unwrap().current, 14);

        // Second hit inside the window: no-op
        apply_static_hit(&mut world, &mut timers, &mut events, 0.5, mob, 6);
        assert_eq!(world.get::<&Health>(mob).unwrap().current, 14);
    }

    #[test]
    fn test_static_cooldown_reverts_after_window() {
        let mut world = World::new();
        let mut timers = TimerQueue::new();
        let mut events = EventQueue::new();
        let mob = spawn_test_mob(&mut world, 20, 0.0);

        apply_static_hit(&mut world, &mut timers, &mut events, 0.0, mob, 6);
        for firing in timers.drain_due(MOB_STATIC_HIT_COOLDOWN) {
            if let TimerFiring::StaticCooldownRevert { mob } = firing {
                if let Ok(mut attackable) = world.get::<&mut Attackable>(mob) {
                    attackable.ready = true;
                }
            }
        }

        apply_static_hit(
            &mut world,
            &mut timers,
            &mut events,
            MOB_STATIC_HIT_COOLDOWN,
            mob,
            6,
        );
        assert_eq!(world.get::<&Health>(mob).unwrap().current, 8);
    }

    #[test]
    fn test_dynamic_hit_consumes_attack() {
        let mut world = World::new();
        let mut timers = TimerQueue::new();
        let mut events = EventQueue::new();
        let mob = spawn_test_mob(&mut world, 20, 0.0);
        let attack = world.spawn((
            Position::new(0.0, 0.0),
            Velocity::zero(),
            DynamicAttack {
                damage: 10,
                radius: BEAM_BASE_RADIUS,
            },
        ));

        apply_dynamic_hit(&mut world, &mut timers, &mut events, mob, attack);
        assert_eq!(world.get::<&Health>(mob).unwrap().current, 10);
        assert!(!world.contains(attack));

        // A second application of the removed attack is a no-op
        apply_dynamic_hit(&mut world, &mut timers, &mut events, mob, attack);
        assert_eq!(world.get::<&Health>(mob).unwrap().current, 10);
    }

    #[test]
    fn test_dynamic_hit_ignores_cooldown() {
        let mut world = World::new();
        let mut timers = TimerQueue::new();
        let mut events = EventQueue::new();
        let mob = spawn_test_mob(&mut world, 30, 0.0);

        // Put the mob on static cooldown first
        apply_static_hit(&mut world, &mut timers, &mut events, 0.0, mob, 6);
        assert_eq!(world.get::<&Health>(mob).unwrap().current, 24);

        let attack = world.spawn((
            Position::new(0.0, 0.0),
            DynamicAttack {
                damage: 10,
                radius: BEAM_BASE_RADIUS,
            },
        ));
        apply_dynamic_hit(&mut world, &mut timers, &mut events, mob, attack);
        assert_eq!(world.get::<&Health>(mob).unwrap().current, 14);
    }

    #[test]
    fn test_two_static_hits_one_cooldown_apart_kill_once() {
        let mut world = World::new();
        let mut timers = TimerQueue::new();
        let mut events = EventQueue::new();
        let mut rng = StdRng::seed_from_u64(1);
        // Drop rate 1.0: the single death roll must produce exactly one pickup
        let mob = spawn_test_mob(&mut world, 10, 1.0);

        apply_static_hit(&mut world, &mut timers, &mut events, 0.0, mob, 6);
        // Cooldown elapses
        for firing in timers.drain_due(MOB_STATIC_HIT_COOLDOWN) {
            if let TimerFiring::StaticCooldownRevert { mob } = firing {
                if let Ok(mut attackable) = world.get::<&mut Attackable>(mob) {
                    attackable.ready = true;
                }
            }
        }
        apply_static_hit(
            &mut world,
            &mut timers,
            &mut events,
            MOB_STATIC_HIT_COOLDOWN,
            mob,
            6,
        );

        // Health went transiently negative before death processing
        assert_eq!(world.get::<&Health>(mob).unwrap().current, -2);

        resolve_deaths(&mut world, &mut timers, &mut events, &mut rng);
        assert!(!world.contains(mob));

        // Running death resolution again changes nothing
        resolve_deaths(&mut world, &mut timers, &mut events, &mut rng);

        let kills = events
            .drain()
            .filter(|e| matches!(e, GameEvent::MobKilled { .. }))
            .count();
        assert_eq!(kills, 1);
        let pickups = world.query::<&Pickup>().iter().count();
        assert_eq!(pickups, 1);
    }

    #[test]
    fn test_player_contact_cooldown_ignores_second_hit() {
        let mut world = World::new();
        let mut timers = TimerQueue::new();
        let mut events = EventQueue::new();
        let player = spawn_test_player(&mut world);

        apply_mob_contact_to_player(&mut world, &mut timers, &mut events, 0.0, player, 10);
        // Second contact 0.5s later, inside the 1s window: ignored
        apply_mob_contact_to_player(&mut world, &mut timers, &mut events, 0.5, player, 10);

        assert_eq!(world.get::<&Health>(player).unwrap().current, 90);
        let hits = events
            .drain()
            .filter(|e| matches!(e, GameEvent::PlayerHit { .. }))
            .count();
        assert_eq!(hits, 1);
    }

    #[test]
    fn test_player_defeated_at_zero_health() {
        let mut world = World::new();
        let mut timers = TimerQueue::new();
        let mut events = EventQueue::new();
        let player = spawn_test_player(&mut world);
        world.get::<&mut Health>(player).unwrap().current = 10;

        apply_mob_contact_to_player(&mut world, &mut timers, &mut events, 0.0, player, 10);
        assert!(events
            .drain()
            .any(|e| matches!(e, GameEvent::PlayerDefeated)));
    }

    #[test]
    fn test_mob_health_never_increases() {
        let mut world = World::new();
        let mut timers = TimerQueue::new();
        let mut events = EventQueue::new();
        let mob = spawn_test_mob(&mut world, 100, 0.0);

        let mut last = 100;
        for step in 0..20 {
            let now = step as f32 * 0.3;
            for firing in timers.drain_due(now) {
                if let TimerFiring::StaticCooldownRevert { mob } = firing {
                    if let Ok(mut attackable) = world.get::<&mut Attackable>(mob) {
                        attackable.ready = true;
                    }
                }
            }
            apply_static_hit(&mut world, &mut timers, &mut events, now, mob, 3);
            let current = world.get::<&Health>(mob).unwrap().current;
            assert!(current <= last, "health increased: {} -> {}", last, current);
            last = current;
        }
        assert!(last < 100);
    }

    #[test]
    fn test_drop_rate_statistics() {
        let mut world = World::new();
        let mut timers = TimerQueue::new();
        let mut events = EventQueue::new();
        let mut rng = StdRng::seed_from_u64(42);
        let drop_rate = 0.3;
        let trials = 10_000;

        for _ in 0..trials {
            let mob = spawn_test_mob(&mut world, 10, drop_rate);
            world.get::<&mut Health>(mob).unwrap().current = 0;
        }
        resolve_deaths(&mut world, &mut timers, &mut events, &mut rng);

        let drops = world.query::<&Pickup>().iter().count();
        let observed = drops as f32 / trials as f32;
        assert!(
            (observed - drop_rate).abs() < 0.02,
            "observed drop rate {} too far from {}",
            observed,
            drop_rate
        );
    }

    #[test]
    fn test_overlap_pass_resolves_beam_and_contact() {
        let mut world = World::new();
        let mut timers = TimerQueue::new();
        let mut events = EventQueue::new();
        let player = spawn_test_player(&mut world);
        // Mob right on top of the player
        let mob = spawn_test_mob(&mut world, 30, 0.0);
        let beam = world.spawn((
            Position::new(5.0, 0.0),
            Velocity::zero(),
            DynamicAttack {
                damage: 10,
                radius: BEAM_BASE_RADIUS,
            },
        ));

        resolve_overlaps(&mut world, &mut timers, &mut events, 0.0, player);

        assert!(!world.contains(beam));
        assert_eq!(world.get::<&Health>(mob).unwrap().current, 20);
        assert_eq!(
            world.get::<&Health>(player).unwrap().current,
            PLAYER_STARTING_HEALTH - MOB_CONTACT_DAMAGE
        );
    }

    #[test]
    fn test_multiple_static_attacks_one_hit_per_window() {
        let mut world = World::new();
        let mut timers = TimerQueue::new();
        let mut events = EventQueue::new();
        let player = spawn_test_player(&mut world);
        // Move the player away so contact damage doesn't interfere
        world.get::<&mut Position>(player).unwrap().x = 1000.0;

        let mob = spawn_test_mob(&mut world, 100, 0.0);
        for _ in 0..3 {
            world.spawn((
                Position::new(0.0, 0.0),
                StaticAttack {
                    kind: crate::components::AttackKind::Claw,
                    damage: 10,
                    radius: STATIC_ATTACK_BASE_RADIUS,
                    offset: Vec2::ZERO,
                },
            ));
        }

        resolve_overlaps(&mut world, &mut timers, &mut events, 0.0, player);
        // Three touching static attacks, one cooldown-gated hit
        assert_eq!(world.get::<&Health>(mob).unwrap().current, 90);
    }

    #[test]
    fn test_collect_pickups() {
        let mut world = World::new();
        let mut events = EventQueue::new();
        let player = spawn_test_player(&mut world);
        world.spawn((Position::new(5.0, 0.0), Pickup { exp: 10 }));
        world.spawn((Position::new(-5.0, 5.0), Pickup { exp: 10 }));
        // Out of reach
        let far = world.spawn((Position::new(500.0, 0.0), Pickup { exp: 10 }));

        let total = collect_pickups(&mut world, &mut events, player);
        assert_eq!(total, 20);
        assert!(world.contains(far));
        assert_eq!(world.query::<&Pickup>().iter().count(), 1);
    }
}
