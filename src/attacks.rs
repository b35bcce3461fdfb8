//! Attack registration and creation.
//!
//! Attacks are registered per kind with a damage, a scale, and an optional
//! firing interval. Dynamic attacks (beam) fire a projectile per interval,
//! aimed at the tick's nearest mob. Static attacks either persist from
//! registration onward (catnip) or appear as timed swings per interval
//! (claw); both follow the player and deal cooldown-gated contact damage.
//! Level-ups rescale or redamage a registration in place.

use crate::clock::{TimerFiring, TimerQueue, TimerToken};
use crate::components::{AttackKind, DynamicAttack, Position, StaticAttack, Velocity};
use crate::constants::*;
use crate::events::{EventQueue, GameEvent};
use glam::Vec2;
use hecs::{Entity, World};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// ATTACK CONFIGURATION
// =============================================================================

/// Everything needed to register one attack
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttackConfig {
    pub kind: AttackKind,
    pub damage: i32,
    /// Size multiplier applied to the attack's collision radius
    pub scale: f32,
    /// Seconds between firings. `None` registers a permanent static attack
    /// spawned once; dynamic attacks require an interval.
    pub interval: Option<f32>,
}

impl AttackConfig {
    pub fn new(kind: AttackKind, damage: i32, scale: f32, interval: Option<f32>) -> Self {
        Self {
            kind,
            damage,
            scale,
            interval,
        }
    }

    /// Reject malformed configs at registration time
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.damage <= 0 {
            return Err("Attack damage must be positive");
        }
        if !(self.scale > 0.0) {
            return Err("Attack scale must be positive");
        }
        match self.interval {
            Some(interval) if !(interval > 0.0) => {
                return Err("Attack interval must be positive")
            }
            None if self.kind.is_dynamic() => {
                return Err("Dynamic attacks require a firing interval")
            }
            _ => {}
        }
        Ok(())
    }

    /// Collision radius after scaling
    pub fn radius(&self) -> f32 {
        let base = if self.kind.is_dynamic() {
            BEAM_BASE_RADIUS
        } else {
            STATIC_ATTACK_BASE_RADIUS
        };
        base * self.scale
    }
}

// =============================================================================
// ATTACK BOOK
// =============================================================================

#[derive(Debug, Clone)]
struct AttackSlot {
    config: AttackConfig,
    timer: Option<TimerToken>,
}

/// The set of registered attacks, keyed by kind
#[derive(Debug, Clone, Default)]
pub struct AttackBook {
    slots: HashMap<AttackKind, AttackSlot>,
}

impl AttackBook {
    pub fn new() -> Self {
        Self {
            slots: HashMap::new(),
        }
    }

    /// Register an attack. Interval-driven attacks start their firing timer;
    /// a permanent static attack spawns its entity immediately.
    pub fn register(
        &mut self,
        world: &mut World,
        timers: &mut TimerQueue,
        events: &mut EventQueue,
        now: f32,
        player_pos: Vec2,
        config: AttackConfig,
    ) -> Result<(), &'static str> {
        config.validate()?;
        if self.slots.contains_key(&config.kind) {
            return Err("Attack kind already registered");
        }

        let timer = config.interval.map(|interval| {
            timers.every(now, interval, None, TimerFiring::FireAttack { kind: config.kind })
        });

        if timer.is_none() {
            // Permanent static attack, centered on the player
            spawn_static_attack(world, events, player_pos, &config, Vec2::ZERO);
        }

        self.slots.insert(config.kind, AttackSlot { config, timer });
        Ok(())
    }

    /// Rescale a registered attack in place. Live static attack entities of
    /// this kind grow with it; beams already in flight are unaffected.
    pub fn set_scale(
        &mut self,
        world: &mut World,
        kind: AttackKind,
        scale: f32,
    ) -> Result<(), &'static str> {
        if !(scale > 0.0) {
            return Err("Attack scale must be positive");
        }
        let slot = self
            .slots
            .get_mut(&kind)
            .ok_or("Attack kind not registered")?;
        slot.config.scale = scale;
        let radius = slot.config.radius();
        for (_, attack) in world.query_mut::<&mut StaticAttack>() {
            if attack.kind == kind {
                attack.radius = radius;
            }
        }
        Ok(())
    }

    /// Change a registered attack's damage in place. Live static attack
    /// entities pick it up; beams already in flight keep theirs.
    pub fn set_damage(
        &mut self,
        world: &mut World,
        kind: AttackKind,
        damage: i32,
    ) -> Result<(), &'static str> {
        if damage <= 0 {
            return Err("Attack damage must be positive");
        }
        let slot = self
            .slots
            .get_mut(&kind)
            .ok_or("Attack kind not registered")?;
        slot.config.damage = damage;
        for (_, attack) in world.query_mut::<&mut StaticAttack>() {
            if attack.kind == kind {
                attack.damage = damage;
            }
        }
        Ok(())
    }

    /// Look up the current config for a kind. Returns `None` for unknown
    /// kinds, which makes a stale firing timer a safe no-op.
    pub fn config(&self, kind: AttackKind) -> Option<&AttackConfig> {
        self.slots.get(&kind).map(|slot| &slot.config)
    }
}

// =============================================================================
// ATTACK CREATION
// =============================================================================

/// Fire one beam from the player position.
///
/// The trajectory aims at `target` (this tick's nearest mob); with no target
/// the beam flies straight up at the fallback speed. The beam self-destroys
/// after its lifetime regardless of collision.
pub fn fire_beam(
    world: &mut World,
    timers: &mut TimerQueue,
    events: &mut EventQueue,
    now: f32,
    player_pos: Vec2,
    config: &AttackConfig,
    target: Option<Vec2>,
) -> Entity {
    let velocity = match target {
        Some(target_pos) => {
            let aim = (target_pos - player_pos).normalize_or_zero();
            if aim == Vec2::ZERO {
                Vec2::new(0.0, -BEAM_FALLBACK_SPEED)
            } else {
                aim * BEAM_SPEED
            }
        }
        None => Vec2::new(0.0, -BEAM_FALLBACK_SPEED),
    };

    let attack = world.spawn((
        Position::new(player_pos.x, player_pos.y),
        Velocity::new(velocity.x, velocity.y),
        DynamicAttack {
            damage: config.damage,
            radius: config.radius(),
        },
    ));

    timers.after(now, BEAM_LIFETIME, Some(attack), TimerFiring::ExpireAttack {
        attack,
    });
    events.push(GameEvent::BeamFired { attack });
    attack
}

/// Spawn a static attack entity at an offset from the player
pub fn spawn_static_attack(
    world: &mut World,
    events: &mut EventQueue,
    player_pos: Vec2,
    config: &AttackConfig,
    offset: Vec2,
) -> Entity {
    let pos = player_pos + offset;
    let attack = world.spawn((
        Position::new(pos.x, pos.y),
        StaticAttack {
            kind: config.kind,
            damage: config.damage,
            radius: config.radius(),
            offset,
        },
    ));
    events.push(GameEvent::StaticAttackSpawned {
        attack,
        kind: config.kind,
    });
    attack
}

/// Fire one timed static swing (claw) on the player's facing side. The swing
/// expires after its fixed lifetime.
pub fn fire_static_swing(
    world: &mut World,
    timers: &mut TimerQueue,
    events: &mut EventQueue,
    now: f32,
    player_pos: Vec2,
    facing_flipped: bool,
    config: &AttackConfig,
) -> Entity {
    // Source art faces left; flipped means the player looks right
    let offset_x = if facing_flipped {
        CLAW_OFFSET_X
    } else {
        -CLAW_OFFSET_X
    };
    let attack = spawn_static_attack(world, events, player_pos, config, Vec2::new(offset_x, 0.0));
    timers.after(now, STATIC_SWING_LIFETIME, Some(attack), TimerFiring::ExpireAttack {
        attack,
    });
    attack
}
