//! Data-driven mob spawning.
//!
//! A spawn registration is a (kind, interval, hp, drop rate) tuple driving an
//! independent recurring timer. Registrations are kept in FIFO order so the
//! progression controller can retire the lowest tier on level-up. Firing is
//! not synchronized with the simulation tick or with other registrations.

use crate::clock::{TimerFiring, TimerQueue, TimerToken};
use crate::components::{Attackable, Facing, Health, Mob, MobKind, Position, Velocity};
use crate::constants::*;
use crate::events::{EventQueue, GameEvent};
use glam::Vec2;
use hecs::{Entity, World};
use rand::Rng;
use serde::{Deserialize, Serialize};

// =============================================================================
// SPAWN CONFIGURATION
// =============================================================================

/// Everything needed to register one recurring mob spawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnConfig {
    pub kind: MobKind,
    /// Seconds between spawns
    pub interval: f32,
    /// Health each spawned mob starts with
    pub hp: i32,
    /// Probability in [0,1] of a pickup drop on death
    pub drop_rate: f32,
}

impl SpawnConfig {
    pub fn new(kind: MobKind, interval: f32, hp: i32, drop_rate: f32) -> Self {
        Self {
            kind,
            interval,
            hp,
            drop_rate,
        }
    }

    /// Reject malformed configs at registration time rather than letting them
    /// misbehave at runtime
    pub fn validate(&self) -> Result<(), &'static str> {
        if !(self.interval > 0.0) {
            return Err("Spawn interval must be positive");
        }
        if self.hp <= 0 {
            return Err("Spawn hp must be positive");
        }
        if !(0.0..=1.0).contains(&self.drop_rate) {
            return Err("Spawn drop rate must be within [0,1]");
        }
        Ok(())
    }
}

/// Handle to an active spawn registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpawnHandle(u64);

// =============================================================================
// SPAWN SCHEDULER
// =============================================================================

#[derive(Debug, Clone)]
struct SpawnSlot {
    handle: SpawnHandle,
    config: SpawnConfig,
    timer: TimerToken,
}

/// FIFO-ordered set of active spawn registrations
#[derive(Debug, Clone, Default)]
pub struct SpawnScheduler {
    slots: Vec<SpawnSlot>,
    next_handle: u64,
}

impl SpawnScheduler {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            next_handle: 0,
        }
    }

    /// Register a spawn config and start its recurring timer.
    /// Fails fast on a malformed config.
    pub fn register(
        &mut self,
        timers: &mut TimerQueue,
        now: f32,
        config: SpawnConfig,
    ) -> Result<SpawnHandle, &'static str> {
        config.validate()?;
        let handle = SpawnHandle(self.next_handle);
        self.next_handle += 1;
        let timer = timers.every(now, config.interval, None, TimerFiring::SpawnMob {
            slot: handle,
        });
        self.slots.push(SpawnSlot {
            handle,
            config,
            timer,
        });
        Ok(handle)
    }

    /// Remove the earliest still-active registration and stop its timer.
    /// Used to retire the lowest-tier spawn on level-up.
    pub fn unregister_oldest(&mut self, timers: &mut TimerQueue) -> Option<SpawnHandle> {
        if self.slots.is_empty() {
            return None;
        }
        let slot = self.slots.remove(0);
        timers.cancel(slot.timer);
        Some(slot.handle)
    }

    /// Remove every registration and stop all their timers
    pub fn unregister_all(&mut self, timers: &mut TimerQueue) {
        for slot in self.slots.drain(..) {
            timers.cancel(slot.timer);
        }
    }

    /// Look up the config for a handle. Returns `None` for retired handles,
    /// which makes a late timer firing a safe no-op.
    pub fn config(&self, handle: SpawnHandle) -> Option<&SpawnConfig> {
        self.slots
            .iter()
            .find(|slot| slot.handle == handle)
            .map(|slot| &slot.config)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Active handles in registration order
    pub fn handles(&self) -> Vec<SpawnHandle> {
        self.slots.iter().map(|slot| slot.handle).collect()
    }
}

// =============================================================================
// MOB CREATION
// =============================================================================

/// Spawn one mob of the configured kind at a random point on a fixed-radius
/// ring around the player, aimed at the player, with its movement re-aim
/// timer started.
pub fn spawn_mob(
    world: &mut World,
    timers: &mut TimerQueue,
    events: &mut EventQueue,
    rng: &mut impl Rng,
    now: f32,
    player_pos: Vec2,
    config: &SpawnConfig,
) -> Entity {
    let angle = rng.gen::<f32>() * std::f32::consts::TAU;
    let pos = player_pos + Vec2::new(angle.cos(), angle.sin()) * SPAWN_RADIUS;

    let toward_player = (player_pos - pos).normalize_or_zero() * MOB_BASE_SPEED;

    let mob = world.spawn((
        Position::new(pos.x, pos.y),
        Velocity::new(toward_player.x, toward_player.y),
        Mob::new(config.kind, MOB_BASE_SPEED, config.drop_rate),
        Health::new(config.hp),
        Attackable::new(),
        Facing::new(),
    ));

    // The re-aim timer is owned by the mob: despawning the mob cancels it
    timers.every(now, MOB_RETARGET_INTERVAL, Some(mob), TimerFiring::RetargetMob {
        mob,
    });

    events.push(GameEvent::MobSpawned {
        mob,
        kind: config.kind,
    });

    mob
}
