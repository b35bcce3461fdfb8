//! Simulation timing constants.

/// Fixed simulation tick duration in seconds (60 Hz)
pub const TICK_DT: f32 = 1.0 / 60.0;
