//! Experience points and levels.
//!
//! Level `L` is reached at `5 * L²` XP, so `level = floor(sqrt(xp / 5))`.
//! Everything is computed in integers to avoid float rounding at exact
//! level boundaries.

use serde::{Deserialize, Serialize};

use crate::constants::progress::XP_FACTOR;

/// Level reached with `xp` experience points.
pub fn level_for_xp(xp: u64) -> u32 {
    let target = xp / XP_FACTOR;
    // Float estimate, then correct by at most a step either way.
    let mut level = (target as f64).sqrt() as u64;
    while level * level > target {
        level -= 1;
    }
    while (level + 1) * (level + 1) <= target {
        level += 1;
    }
    level.min(u32::MAX as u64) as u32
}

/// Total XP needed to reach `level`.
pub fn xp_for_level(level: u32) -> u64 {
    let level = level as u64;
    XP_FACTOR.saturating_mul(level * level)
}

/// XP between `level` and the next one.
pub fn xp_to_next_level(level: u32) -> u64 {
    xp_for_level(level.saturating_add(1)) - xp_for_level(level)
}

/// Snapshot of a user's progress, as shown in the map's level badge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelProgress {
    pub xp: u64,
    pub level: u32,
    /// XP still needed to reach the next level.
    pub remaining: u64,
    /// Fraction of the current level completed, in `[0, 1)`.
    pub fraction: f64,
}

impl LevelProgress {
    pub fn from_xp(xp: u64) -> Self {
        let level = level_for_xp(xp);
        let floor = xp_for_level(level);
        let span = xp_to_next_level(level);
        let earned = xp - floor;
        Self {
            xp,
            level,
            remaining: span.saturating_sub(earned),
            fraction: if span == 0 {
                0.0
            } else {
                earned as f64 / span as f64
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_thresholds() {
        assert_eq!(level_for_xp(0), 0);
        assert_eq!(level_for_xp(4), 0);
        assert_eq!(level_for_xp(5), 1);
        assert_eq!(level_for_xp(19), 1);
        assert_eq!(level_for_xp(20), 2);
        assert_eq!(level_for_xp(125), 5);
        assert_eq!(level_for_xp(124), 4);
    }

    #[test]
    fn level_round_trips_at_boundaries() {
        for level in [1u32, 2, 3, 10, 99, 1000, 65_535] {
            let xp = xp_for_level(level);
            assert_eq!(level_for_xp(xp), level);
            assert_eq!(level_for_xp(xp - 1), level - 1);
        }
    }

    #[test]
    fn huge_xp_does_not_overflow() {
        let level = level_for_xp(u64::MAX);
        assert!(level > 1_000_000_000);
    }

    #[test]
    fn next_level_cost_is_odd_multiple_of_five() {
        assert_eq!(xp_to_next_level(0), 5);
        assert_eq!(xp_to_next_level(1), 15);
        assert_eq!(xp_to_next_level(4), 45);
    }

    #[test]
    fn progress_snapshot() {
        let p = LevelProgress::from_xp(30);
        assert_eq!(p.level, 2);
        assert_eq!(p.remaining, 15);
        assert!((p.fraction - 10.0 / 25.0).abs() < 1e-12);

        let start = LevelProgress::from_xp(0);
        assert_eq!(start.level, 0);
        assert_eq!(start.remaining, 5);
        assert_eq!(start.fraction, 0.0);
    }
}
