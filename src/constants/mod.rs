//! Game constants organized by domain.
//!
//! Centralizing magic numbers makes tuning easier and documents intent.
//! Constants are split into submodules by domain for easier navigation.

mod attacks;
mod mobs;
mod player;
mod progression;
mod time;

pub use attacks::*;
pub use mobs::*;
pub use player::*;
pub use progression::*;
pub use time::*;
