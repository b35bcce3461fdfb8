//! Experience and leveling system.
//!
//! The progression controller tracks experience against a per-level
//! threshold. Crossing the threshold is reported once and nothing is applied
//! automatically: the caller decides when to pause for the level-up overlay
//! and then applies the level-up, which dispatches the escalation table.

use crate::constants::*;

/// Experience and level state. Levels only ever go up.
#[derive(Debug, Clone, PartialEq)]
pub struct Progression {
    pub level: u32,
    pub current: u32,
    pub threshold: u32,
    /// A threshold crossing has been reported and not yet applied
    pending: bool,
}

impl Progression {
    pub fn new() -> Self {
        Self {
            level: 1,
            current: 0,
            threshold: DEFAULT_LEVEL_THRESHOLD,
            pending: false,
        }
    }

    /// Add experience. Returns `true` when this addition crosses the
    /// threshold for the first time; further additions while the crossing is
    /// unapplied return `false`.
    pub fn add_experience(&mut self, amount: u32) -> bool {
        self.current += amount;
        self.recheck()
    }

    /// Report an unreported threshold crossing, if any
    pub fn recheck(&mut self) -> bool {
        if !self.pending && self.current >= self.threshold {
            self.pending = true;
            return true;
        }
        false
    }

    pub fn threshold_pending(&self) -> bool {
        self.pending
    }

    /// Advance to the next level, carrying leftover experience over.
    /// `next_threshold` overrides the per-level default. Returns the new
    /// level.
    pub fn apply_level_up(&mut self, next_threshold: Option<u32>) -> u32 {
        self.level += 1;
        self.current = self.current.saturating_sub(self.threshold);
        self.threshold = next_threshold.unwrap_or(DEFAULT_LEVEL_THRESHOLD).max(1);
        self.pending = false;
        self.level
    }

    /// Progress toward the next level (0.0 to 1.0), for the experience bar
    pub fn progress(&self) -> f32 {
        (self.current as f32 / self.threshold as f32).clamp(0.0, 1.0)
    }
}

impl Default for Progression {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_level_one_with_no_experience() {
        let progression = Progression::new();
        assert_eq!(progression.level, 1);
        assert_eq!(progression.current, 0);
        assert_eq!(progression.threshold, DEFAULT_LEVEL_THRESHOLD);
    }

    #[test]
    fn test_threshold_reported_once_until_applied() {
        let mut progression = Progression::new();
        assert!(!progression.add_experience(30));
        // Crosses 50 here
        assert!(progression.add_experience(30));
        // Still pending: not reported again
        assert!(!progression.add_experience(10));
        assert!(!progression.recheck());
        assert_eq!(progression.level, 1);

        progression.apply_level_up(None);
        assert_eq!(progression.level, 2);
        assert!(!progression.threshold_pending());
    }

    #[test]
    fn test_level_up_carries_leftover_experience() {
        let mut progression = Progression::new();
        progression.add_experience(70);
        progression.apply_level_up(None);
        assert_eq!(progression.current, 20);
        // Leftover below the threshold: next crossing reports again
        assert!(!progression.recheck());
        assert!(progression.add_experience(30));
    }

    #[test]
    fn test_leftover_above_threshold_reports_on_recheck() {
        let mut progression = Progression::new();
        progression.add_experience(120);
        progression.apply_level_up(None);
        // 70 left, threshold 50: crossed again without new pickups
        assert!(progression.recheck());
    }

    #[test]
    fn test_custom_threshold_per_level() {
        let mut progression = Progression::new();
        progression.add_experience(50);
        progression.apply_level_up(Some(80));
        assert_eq!(progression.threshold, 80);
        assert!(!progression.add_experience(79));
        assert!(progression.add_experience(1));
    }

    #[test]
    fn test_progress_fraction() {
        let mut progression = Progression::new();
        progression.add_experience(25);
        assert!((progression.progress() - 0.5).abs() < f32::EPSILON);
    }
}
