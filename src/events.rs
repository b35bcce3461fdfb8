//! Game event system for decoupled communication between systems.
//!
//! Combat and progression systems emit events, the session drains them at the
//! end of each tick and forwards the presentation-relevant ones (sounds, hit
//! flashes, bar updates) to the collaborator hooks.

use crate::components::{AttackKind, MobKind};
use glam::Vec2;
use hecs::Entity;

/// Game events that systems can emit and subscribe to
#[derive(Debug, Clone)]
pub enum GameEvent {
    /// A mob was created by the spawn scheduler
    MobSpawned {
        mob: Entity,
        kind: MobKind,
    },
    /// A mob took damage (dynamic or static)
    MobHit {
        mob: Entity,
        damage: i32,
    },
    /// A mob died and was removed
    MobKilled {
        mob: Entity,
        kind: MobKind,
        position: Vec2,
    },
    /// The player took mob contact damage
    PlayerHit {
        damage: i32,
        remaining: i32,
    },
    /// Player health reached zero
    PlayerDefeated,
    /// A dynamic attack was fired
    BeamFired {
        attack: Entity,
    },
    /// A static attack entity appeared (registration or timed swing)
    StaticAttackSpawned {
        attack: Entity,
        kind: AttackKind,
    },
    /// An experience pickup dropped from a dead mob
    PickupSpawned {
        pickup: Entity,
    },
    /// The player collected an experience pickup
    PickupCollected {
        exp: u32,
    },
    /// Experience crossed the level threshold; the caller decides when to
    /// apply the level-up
    LevelThresholdReached {
        level: u32,
    },
    /// A level-up was applied
    LeveledUp {
        level: u32,
    },
}

/// Simple event queue - events are pushed during update, processed at end of tick
#[derive(Default)]
pub struct EventQueue {
    events: Vec<GameEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Push an event to be processed later
    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Drain all events for processing
    pub fn drain(&mut self) -> impl Iterator<Item = GameEvent> + '_ {
        self.events.drain(..)
    }

    /// Check if there are pending events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
