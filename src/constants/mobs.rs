//! Mob constants.

/// Mob movement speed in units per second (same for all kinds)
pub const MOB_BASE_SPEED: f32 = 50.0;
/// Seconds between re-aiming a mob's velocity at the player
pub const MOB_RETARGET_INTERVAL: f32 = 0.1;
/// Mob collision radius
pub const MOB_RADIUS: f32 = 16.0;
/// Seconds a mob is immune to static attack damage after taking a static hit
pub const MOB_STATIC_HIT_COOLDOWN: f32 = 1.0;
/// Distance from the player at which new mobs appear
pub const SPAWN_RADIUS: f32 = 500.0;
/// Seconds the half-alpha hit flash lasts on a struck entity
pub const HIT_FLASH_DURATION: f32 = 0.1;
/// Alpha applied to a struck entity while the hit flash is active
pub const HIT_FLASH_ALPHA: f32 = 0.5;
