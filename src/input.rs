//! Movement input polled each tick.
//!
//! The core never reads the keyboard; the shell translates pressed arrow keys
//! into a per-axis direction vector with components in {-1, 0, 1}.

use glam::Vec2;

/// Per-tick movement intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputVector {
    pub dx: i32,
    pub dy: i32,
}

impl InputVector {
    /// Build an input vector, clamping each axis to {-1, 0, 1}
    pub fn new(dx: i32, dy: i32) -> Self {
        Self {
            dx: dx.clamp(-1, 1),
            dy: dy.clamp(-1, 1),
        }
    }

    pub fn idle() -> Self {
        Self { dx: 0, dy: 0 }
    }

    pub fn is_idle(&self) -> bool {
        self.dx == 0 && self.dy == 0
    }

    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.dx as f32, self.dy as f32)
    }
}
