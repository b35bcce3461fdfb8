//! Experience and leveling constants.

/// Experience required to cross from one level to the next
pub const DEFAULT_LEVEL_THRESHOLD: u32 = 50;
/// Experience granted by one pickup
pub const PICKUP_EXP_VALUE: u32 = 10;
/// Radius within which the player collects a pickup
pub const PICKUP_RADIUS: f32 = 30.0;
