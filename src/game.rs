//! Core game state and the simulation tick.
//!
//! `GameState` owns all simulation data explicitly; systems receive it as
//! arguments instead of reaching into scene globals. One `tick` call runs the
//! full pipeline in a fixed order: timer drain, movement, targeting, attack
//! firing, combat resolution, deaths and drops, pickup collection,
//! progression, and finally the event drain to the presentation hooks.

use crate::attacks::{self, AttackBook, AttackConfig};
use crate::clock::{GameClock, TimerFiring, TimerQueue};
use crate::components::{Attackable, AttackKind, Facing, Health, MobKind, Player, Position};
use crate::constants::*;
use crate::escalation::{EscalationAction, EscalationTable};
use crate::events::{EventQueue, GameEvent};
use crate::input::InputVector;
use crate::presentation::Presentation;
use crate::session::{SessionPhase, SessionStats};
use crate::spawning::{self, SpawnConfig, SpawnScheduler};
use crate::systems::{combat, experience::Progression, movement};
use crate::targeting;
use glam::Vec2;
use hecs::{Entity, World};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Initial spawn and attack registrations plus the escalation table
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub spawns: Vec<SpawnConfig>,
    pub attacks: Vec<AttackConfig>,
    pub escalation: EscalationTable,
}

impl Default for SessionConfig {
    /// The standard session: mob1 every second, one beam every second, and
    /// the standard escalation curve
    fn default() -> Self {
        Self {
            spawns: vec![SpawnConfig::new(MobKind::Mob1, 1.0, 10, 0.9)],
            attacks: vec![AttackConfig::new(AttackKind::Beam, 10, 1.0, Some(1.0))],
            escalation: EscalationTable::standard(),
        }
    }
}

/// Core game state - owns all simulation data.
pub struct GameState {
    /// The ECS world
    pub world: World,
    /// Game clock (simulation time)
    pub clock: GameClock,
    /// Scheduled timers against the virtual clock
    pub timers: TimerQueue,
    /// Events emitted this tick, drained to the presentation hooks
    pub events: EventQueue,
    /// Active spawn registrations
    pub spawner: SpawnScheduler,
    /// Registered attacks
    pub attacks: AttackBook,
    /// Experience and level state
    pub progression: Progression,
    /// Level -> configuration changes
    pub escalation: EscalationTable,
    /// Player entity handle
    pub player_entity: Entity,
    /// Current session phase
    pub phase: SessionPhase,
    /// Running stats reported on session end
    pub stats: SessionStats,
    /// Nearest mob resolved this tick; recomputed every tick, never carried
    nearest: Option<(Entity, Vec2)>,
    /// Whether the player moved last tick (walk/idle animation switching)
    moving: bool,
    rng: StdRng,
}

impl GameState {
    /// Create the standard session
    pub fn new(seed: u64) -> Self {
        Self::from_config(seed, SessionConfig::default())
            .expect("default session config is valid")
    }

    /// Create a session from an explicit config. Fails fast on malformed
    /// spawn or attack registrations.
    pub fn from_config(seed: u64, config: SessionConfig) -> Result<Self, &'static str> {
        let mut world = World::new();
        let player_entity = world.spawn((
            Position::new(0.0, 0.0),
            Player,
            Facing::new(),
            Health::new(PLAYER_STARTING_HEALTH),
            Attackable::new(),
        ));

        let mut state = Self {
            world,
            clock: GameClock::new(),
            timers: TimerQueue::new(),
            events: EventQueue::new(),
            spawner: SpawnScheduler::new(),
            attacks: AttackBook::new(),
            progression: Progression::new(),
            escalation: config.escalation,
            player_entity,
            phase: SessionPhase::Playing,
            stats: SessionStats {
                mobs_killed: 0,
                level: 1,
                elapsed_seconds: 0.0,
            },
            nearest: None,
            moving: false,
            rng: StdRng::seed_from_u64(seed),
        };

        for spawn in config.spawns {
            state.spawner.register(&mut state.timers, 0.0, spawn)?;
        }
        let player_pos = state.player_pos();
        for attack in config.attacks {
            state.attacks.register(
                &mut state.world,
                &mut state.timers,
                &mut state.events,
                0.0,
                player_pos,
                attack,
            )?;
        }
        Ok(state)
    }

    fn player_pos(&self) -> Vec2 {
        self.world
            .get::<&Position>(self.player_entity)
            .map(|p| p.as_vec2())
            .unwrap_or(Vec2::ZERO)
    }

    /// The player's current health
    pub fn player_health(&self) -> i32 {
        self.world
            .get::<&Health>(self.player_entity)
            .map(|h| h.current)
            .unwrap_or(0)
    }

    /// Nearest mob resolved by the last tick
    pub fn nearest(&self) -> Option<Entity> {
        self.nearest.map(|(entity, _)| entity)
    }

    /// Advance the simulation by one fixed tick.
    ///
    /// Does nothing while the session is over or a level-up is pending (the
    /// clock freezes with the overlay up, so no timers slip by).
    pub fn tick(&mut self, input: InputVector, presentation: &mut dyn Presentation) {
        if self.phase != SessionPhase::Playing {
            return;
        }

        self.clock.advance(TICK_DT);
        self.stats.elapsed_seconds = self.clock.time;
        let now = self.clock.time;

        // Timer drain. Attack firings are held back until after this tick's
        // targeting so trajectory decisions see a fresh nearest mob.
        let mut attack_firings: Vec<AttackKind> = Vec::new();
        for firing in self.timers.drain_due(now) {
            match firing {
                TimerFiring::SpawnMob { slot } => {
                    if let Some(config) = self.spawner.config(slot).copied() {
                        let player_pos = self.player_pos();
                        spawning::spawn_mob(
                            &mut self.world,
                            &mut self.timers,
                            &mut self.events,
                            &mut self.rng,
                            now,
                            player_pos,
                            &config,
                        );
                    }
                }
                TimerFiring::FireAttack { kind } => attack_firings.push(kind),
                TimerFiring::RetargetMob { mob } => {
                    let player_pos = self.player_pos();
                    movement::retarget_mob(&mut self.world, mob, player_pos);
                }
                TimerFiring::StaticCooldownRevert { mob } => {
                    if let Ok(mut attackable) = self.world.get::<&mut Attackable>(mob) {
                        attackable.ready = true;
                    }
                }
                TimerFiring::PlayerCooldownRevert => {
                    if let Ok(mut attackable) =
                        self.world.get::<&mut Attackable>(self.player_entity)
                    {
                        attackable.ready = true;
                    }
                    presentation.set_visual_alpha(self.player_entity, 1.0);
                }
                TimerFiring::HitFlashRevert { entity } => {
                    if self.world.contains(entity) {
                        presentation.set_visual_alpha(entity, 1.0);
                    }
                }
                TimerFiring::ExpireAttack { attack } => {
                    self.timers.cancel_for_entity(attack);
                    let _ = self.world.despawn(attack);
                }
            }
        }

        // Movement
        let (displacement, facing_change) =
            movement::move_player(&mut self.world, self.player_entity, input);
        if let Some(flipped) = facing_change {
            presentation.set_facing(self.player_entity, flipped);
        }
        let was_moving = self.moving;
        self.moving = !input.is_idle();
        if self.moving != was_moving {
            let key = if self.moving { "player_anim" } else { "player_idle" };
            presentation.play_animation(self.player_entity, key);
        }
        movement::integrate_velocities(&mut self.world, TICK_DT);
        movement::follow_player(&mut self.world, displacement);

        let player_pos = self.player_pos();
        for (mob, flipped) in movement::update_mob_facing(&mut self.world, player_pos) {
            presentation.set_facing(mob, flipped);
        }

        // Targeting, before any dynamic-attack trajectory decisions
        self.nearest = targeting::nearest_mob(player_pos, &self.world);

        // Attacks due this tick
        for kind in attack_firings {
            let Some(config) = self.attacks.config(kind).copied() else {
                continue;
            };
            if kind.is_dynamic() {
                let target = self.nearest.map(|(_, pos)| pos);
                attacks::fire_beam(
                    &mut self.world,
                    &mut self.timers,
                    &mut self.events,
                    now,
                    player_pos,
                    &config,
                    target,
                );
            } else {
                let flipped = self
                    .world
                    .get::<&Facing>(self.player_entity)
                    .map(|f| f.flipped)
                    .unwrap_or(false);
                attacks::fire_static_swing(
                    &mut self.world,
                    &mut self.timers,
                    &mut self.events,
                    now,
                    player_pos,
                    flipped,
                    &config,
                );
            }
        }

        // Combat, deaths, drops
        combat::resolve_overlaps(
            &mut self.world,
            &mut self.timers,
            &mut self.events,
            now,
            self.player_entity,
        );
        combat::resolve_deaths(&mut self.world, &mut self.timers, &mut self.events, &mut self.rng);

        // Pickups feed progression
        let gained = combat::collect_pickups(&mut self.world, &mut self.events, self.player_entity);
        if gained > 0 && self.progression.add_experience(gained) {
            self.events.push(GameEvent::LevelThresholdReached {
                level: self.progression.level,
            });
        }

        self.drain_events(presentation);
    }

    /// Apply the pending level-up: advance the level and dispatch that
    /// level's escalation actions, then resume the simulation.
    pub fn apply_level_up(
        &mut self,
        presentation: &mut dyn Presentation,
    ) -> Result<(), &'static str> {
        if self.phase != SessionPhase::LevelPending {
            return Err("No level-up pending");
        }

        let new_level = self.progression.apply_level_up(None);
        self.stats.level = new_level;
        let now = self.clock.time;
        let player_pos = self.player_pos();

        let actions: Vec<EscalationAction> = self.escalation.for_level(new_level).to_vec();
        for action in actions {
            match action {
                EscalationAction::AddSpawn(config) => {
                    self.spawner.register(&mut self.timers, now, config)?;
                }
                EscalationAction::RemoveOldestSpawn => {
                    self.spawner.unregister_oldest(&mut self.timers);
                }
                EscalationAction::AddAttack(config) => {
                    self.attacks.register(
                        &mut self.world,
                        &mut self.timers,
                        &mut self.events,
                        now,
                        player_pos,
                        config,
                    )?;
                }
                EscalationAction::RescaleAttack { kind, scale } => {
                    self.attacks.set_scale(&mut self.world, kind, scale)?;
                }
                EscalationAction::RedamageAttack { kind, damage } => {
                    self.attacks.set_damage(&mut self.world, kind, damage)?;
                }
            }
        }

        self.events.push(GameEvent::LeveledUp { level: new_level });
        self.phase = SessionPhase::Playing;

        // Leftover experience may already cross the next threshold
        if self.progression.recheck() {
            self.events.push(GameEvent::LevelThresholdReached { level: new_level });
        }

        self.drain_events(presentation);
        Ok(())
    }

    /// Forward drained events to the presentation collaborators and handle
    /// session phase transitions.
    fn drain_events(&mut self, presentation: &mut dyn Presentation) {
        let now = self.clock.time;
        let events: Vec<GameEvent> = self.events.drain().collect();
        for event in events {
            match event {
                GameEvent::MobSpawned { mob, kind } => {
                    presentation.play_animation(mob, kind.animation_key());
                }
                GameEvent::MobHit { mob, .. } => {
                    presentation.play_sound("hit_mob", 0.3);
                    presentation.set_visual_alpha(mob, HIT_FLASH_ALPHA);
                    self.timers.after(now, HIT_FLASH_DURATION, Some(mob), TimerFiring::HitFlashRevert {
                        entity: mob,
                    });
                }
                GameEvent::MobKilled { kind, .. } => {
                    self.stats.mobs_killed += 1;
                    presentation.play_sound("explosion", 0.3);
                    if kind.is_boss() && self.phase == SessionPhase::Playing {
                        self.phase = SessionPhase::Victory;
                        presentation.play_sound("game_clear", 0.1);
                        presentation.on_victory(&self.stats);
                    }
                }
                GameEvent::PlayerHit { damage, .. } => {
                    presentation.play_sound("hurt", 0.3);
                    presentation.health_bar_decrease(damage);
                    // Alpha is restored when the contact cooldown reverts
                    presentation.set_visual_alpha(self.player_entity, HIT_FLASH_ALPHA);
                }
                GameEvent::PlayerDefeated => {
                    if self.phase == SessionPhase::Playing {
                        self.phase = SessionPhase::Defeated;
                        presentation.play_sound("game_over", 0.3);
                        presentation.on_player_defeated(&self.stats);
                    }
                }
                GameEvent::BeamFired { .. } => {
                    presentation.play_sound("beam", 0.3);
                }
                GameEvent::StaticAttackSpawned { attack, kind } => {
                    presentation.play_sound(kind.sound_key(), 0.3);
                    presentation.play_animation(attack, "attack_anim");
                }
                GameEvent::PickupSpawned { .. } => {}
                GameEvent::PickupCollected { .. } => {
                    presentation.play_sound("exp_up", 0.3);
                    presentation
                        .experience_bar_set(self.progression.current, self.progression.threshold);
                }
                GameEvent::LevelThresholdReached { .. } => {
                    if self.phase == SessionPhase::Playing {
                        self.phase = SessionPhase::LevelPending;
                    }
                }
                GameEvent::LeveledUp { level } => {
                    presentation.play_sound("next_level", 0.3);
                    presentation.level_indicator_set(level);
                    presentation
                        .experience_bar_set(self.progression.current, self.progression.threshold);
                }
            }
        }
    }
}
