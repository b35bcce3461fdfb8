//! Top-down survival action core.
//!
//! Mobs spawn on recurring timers and converge on the player; registered
//! attacks fire automatically (beams aimed at the nearest mob, static attacks
//! that follow the player); dead mobs drop experience pickups; accumulated
//! experience escalates the spawn and attack configuration level by level.
//!
//! Rendering, audio, input polling, and scene transitions are collaborators
//! behind the [`presentation::Presentation`] hooks; the crate only simulates.

pub mod attacks;
pub mod clock;
pub mod components;
pub mod constants;
pub mod escalation;
pub mod events;
pub mod game;
pub mod input;
pub mod presentation;
pub mod session;
pub mod spawning;
pub mod systems;
pub mod targeting;
