//! Simulation systems, one module per concern.

pub mod combat;
pub mod experience;
pub mod movement;
