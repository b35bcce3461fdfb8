//! Attack constants.

/// Beam projectile speed in units per second
pub const BEAM_SPEED: f32 = 300.0;
/// Seconds a beam lives before it self-destroys
pub const BEAM_LIFETIME: f32 = 1.5;
/// Speed of the fallback trajectory (straight up) when no mob exists
pub const BEAM_FALLBACK_SPEED: f32 = 250.0;
/// Beam collision radius at scale 1
pub const BEAM_BASE_RADIUS: f32 = 12.0;

/// Static attack collision radius at scale 1
pub const STATIC_ATTACK_BASE_RADIUS: f32 = 16.0;
/// Seconds a timed static attack (claw swing) persists per firing
pub const STATIC_SWING_LIFETIME: f32 = 0.5;
/// Horizontal distance of the claw swing from the player, toward facing
pub const CLAW_OFFSET_X: f32 = 40.0;
