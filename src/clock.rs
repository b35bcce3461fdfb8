//! Virtual clock and timer queue.
//!
//! All recurring work (mob spawns, attack firing, cooldown reverts, movement
//! re-aiming) is scheduled against a shared virtual clock. Timers carry data
//! describing the firing rather than closures, so due firings are drained and
//! processed at defined points inside the tick instead of mutating state from
//! arbitrary callbacks.

use crate::components::AttackKind;
use crate::spawning::SpawnHandle;
use hecs::Entity;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

// =============================================================================
// GAME CLOCK
// =============================================================================

/// Global game time clock (in seconds)
#[derive(Debug, Clone)]
pub struct GameClock {
    /// Current game time in seconds (simulation time, not real time)
    pub time: f32,
}

impl GameClock {
    pub fn new() -> Self {
        Self { time: 0.0 }
    }

    /// Advance time by the given number of seconds
    pub fn advance(&mut self, dt: f32) {
        debug_assert!(dt >= 0.0, "Cannot go backwards in time: dt = {}", dt);
        self.time += dt;
    }
}

impl Default for GameClock {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// TIMER FIRINGS
// =============================================================================

/// Token identifying a scheduled timer, used for cancellation
pub type TimerToken = u64;

/// What a timer does when it fires
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimerFiring {
    /// A spawn registration is due to create one mob
    SpawnMob { slot: SpawnHandle },
    /// An attack registration is due to fire
    FireAttack { kind: AttackKind },
    /// A mob re-aims its velocity at the player
    RetargetMob { mob: Entity },
    /// A mob's static damage cooldown window ends
    StaticCooldownRevert { mob: Entity },
    /// The player's contact damage cooldown window ends
    PlayerCooldownRevert,
    /// A hit flash reverts to full alpha
    HitFlashRevert { entity: Entity },
    /// A timed attack entity (beam, claw swing) reaches its lifetime
    ExpireAttack { attack: Entity },
}

// =============================================================================
// TIMER QUEUE
// =============================================================================

/// A scheduled timer, ordered by due time (min-heap)
#[derive(Debug, Clone, Copy)]
struct ScheduledTimer {
    token: TimerToken,
    due: f32,
    /// `Some` for repeating timers, rescheduled on each firing
    interval: Option<f32>,
    /// Entity whose despawn cancels this timer, if any
    owner: Option<Entity>,
    firing: TimerFiring,
}

impl PartialEq for ScheduledTimer {
    fn eq(&self, other: &Self) -> bool {
        self.token == other.token
    }
}

impl Eq for ScheduledTimer {}

impl PartialOrd for ScheduledTimer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScheduledTimer {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap behavior (earliest due first),
        // ties broken by registration order for determinism
        other
            .due
            .partial_cmp(&self.due)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.token.cmp(&self.token))
    }
}

/// Min-heap of scheduled timers with lazy cancellation
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    pending: BinaryHeap<ScheduledTimer>,
    cancelled: HashSet<TimerToken>,
    next_token: TimerToken,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self {
            pending: BinaryHeap::new(),
            cancelled: HashSet::new(),
            next_token: 0,
        }
    }

    fn push(
        &mut self,
        due: f32,
        interval: Option<f32>,
        owner: Option<Entity>,
        firing: TimerFiring,
    ) -> TimerToken {
        let token = self.next_token;
        self.next_token += 1;
        self.pending.push(ScheduledTimer {
            token,
            due,
            interval,
            owner,
            firing,
        });
        token
    }

    /// Schedule a one-shot timer `delay` seconds from `now`
    pub fn after(
        &mut self,
        now: f32,
        delay: f32,
        owner: Option<Entity>,
        firing: TimerFiring,
    ) -> TimerToken {
        self.push(now + delay.max(0.0), None, owner, firing)
    }

    /// Schedule a repeating timer firing every `interval` seconds.
    ///
    /// Intervals come from registration configs that are validated before any
    /// timer is started, so a non-positive interval here is a caller bug.
    pub fn every(
        &mut self,
        now: f32,
        interval: f32,
        owner: Option<Entity>,
        firing: TimerFiring,
    ) -> TimerToken {
        debug_assert!(interval > 0.0, "Timer interval must be positive");
        self.push(now + interval, Some(interval), owner, firing)
    }

    /// Cancel a timer by token. Cancelling an already-fired or unknown token
    /// is a no-op.
    pub fn cancel(&mut self, token: TimerToken) {
        self.cancelled.insert(token);
    }

    /// Remove all timers owned by a specific entity (e.g., on despawn)
    pub fn cancel_for_entity(&mut self, entity: Entity) {
        // Rebuild the heap without the cancelled entity's timers
        let remaining: Vec<_> = self
            .pending
            .drain()
            .filter(|t| t.owner != Some(entity))
            .collect();
        self.pending = remaining.into_iter().collect();
    }

    /// Pop every timer due at or before `now`, in due order. Repeating timers
    /// are rescheduled one interval later under the same token.
    pub fn drain_due(&mut self, now: f32) -> Vec<TimerFiring> {
        let mut firings = Vec::new();
        while let Some(next) = self.pending.peek() {
            if next.due > now {
                break;
            }
            let timer = self.pending.pop().unwrap();
            if self.cancelled.remove(&timer.token) {
                continue;
            }
            firings.push(timer.firing);
            if let Some(interval) = timer.interval {
                self.pending.push(ScheduledTimer {
                    due: timer.due + interval,
                    ..timer
                });
            }
        }
        firings
    }

    /// Check if there are any scheduled timers
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
