//! Presentation collaborator hooks.
//!
//! Rendering, audio, UI widgets, and scene transitions live outside the core.
//! The simulation calls these hooks fire-and-forget and never reads anything
//! back; a headless session plugs in [`NullPresentation`].

use crate::session::SessionStats;
use hecs::Entity;

/// Hooks the core calls on its presentation collaborators.
///
/// Every method defaults to a no-op so shells only implement what they show.
pub trait Presentation {
    /// Start an animation on an entity (spawn, walk, idle, swing)
    fn play_animation(&mut self, _entity: Entity, _key: &str) {}

    /// Mirror an entity's sprite horizontally
    fn set_facing(&mut self, _entity: Entity, _flipped: bool) {}

    /// Set an entity's visual alpha (hit flash, contact cooldown)
    fn set_visual_alpha(&mut self, _entity: Entity, _alpha: f32) {}

    /// Play a sound effect
    fn play_sound(&mut self, _key: &str, _volume: f32) {}

    /// The player's HP bar lost `amount` points
    fn health_bar_decrease(&mut self, _amount: i32) {}

    /// The experience bar moved to `current` out of `threshold`
    fn experience_bar_set(&mut self, _current: u32, _threshold: u32) {}

    /// The level indicator changed
    fn level_indicator_set(&mut self, _level: u32) {}

    /// The session ended in defeat
    fn on_player_defeated(&mut self, _stats: &SessionStats) {}

    /// The session ended in victory
    fn on_victory(&mut self, _stats: &SessionStats) {}
}

/// Presentation that does nothing, for headless runs and tests
#[derive(Debug, Default)]
pub struct NullPresentation;

impl Presentation for NullPresentation {}
