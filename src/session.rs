//! Session lifecycle state and end-of-run stats.

/// Stats reported to the scene-transition hooks when a session ends
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SessionStats {
    pub mobs_killed: u32,
    pub level: u32,
    pub elapsed_seconds: f32,
}

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Simulation running normally
    Playing,
    /// Experience crossed the threshold; simulation is paused until the
    /// caller applies the level-up (level-up overlay time)
    LevelPending,
    /// Player health reached zero; terminal
    Defeated,
    /// A boss mob was killed; terminal
    Victory,
}

impl SessionPhase {
    pub fn is_over(&self) -> bool {
        matches!(self, SessionPhase::Defeated | SessionPhase::Victory)
    }
}
