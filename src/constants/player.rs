//! Player constants.

/// Player's starting (and maximum) health
pub const PLAYER_STARTING_HEALTH: i32 = 100;
/// Player movement speed in units per simulation tick
pub const PLAYER_SPEED: f32 = 5.0;
/// Seconds the player is immune to mob contact damage after being hit
pub const PLAYER_HIT_COOLDOWN: f32 = 1.0;
/// Player collision radius
pub const PLAYER_RADIUS: f32 = 14.0;
/// Damage a mob deals to the player on contact
pub const MOB_CONTACT_DAMAGE: i32 = 10;
