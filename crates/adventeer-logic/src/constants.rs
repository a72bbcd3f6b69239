//! Trail tuning constants.
//!
//! Plain `f64`/`u32` constants with no runtime dependency. The thresholds in
//! [`motion`] and [`curves`] were tuned by eye; changing any of them changes
//! every generated trail.

/// Placement of the trail on the map canvas.
pub mod layout {
    /// X coordinate of the trail origin.
    pub const START_X: f64 = 100.0;
    /// Y coordinate of the trail origin.
    pub const BASE_Y: f64 = 250.0;
    /// Trail width at level 0.
    pub const BASE_WIDTH: f64 = 900.0;
    /// Extra width added per level.
    pub const WIDTH_PER_LEVEL: f64 = 120.0;
    /// Distance kept between the trail and the top/bottom of the viewport.
    pub const EDGE_MARGIN: f64 = 100.0;
    /// Blank space after the right-most point when sizing the map.
    pub const END_PADDING: f64 = 100.0;

    /// Horizontal distance from the origin to the final point.
    pub fn total_width(level: u32) -> f64 {
        BASE_WIDTH + level as f64 * WIDTH_PER_LEVEL
    }
}

/// Per-step movement of the trail head.
pub mod motion {
    /// Steps generated per level.
    pub const SEGMENTS_PER_LEVEL: u32 = 15;
    /// Minimum rightward move per step.
    pub const BASE_STEP: f64 = 10.0;
    /// Extra rightward move at full pull.
    pub const PULL_STEP: f64 = 20.0;
    /// Lag behind schedule (in x units) at which pull saturates.
    pub const PULL_WINDOW: f64 = 300.0;
    /// Scale of the vertical jitter per step.
    pub const VERTICAL_AMPLITUDE: f64 = 100.0;
    /// Scale of the vertical jitter on the final point.
    pub const FINAL_JITTER: f64 = 40.0;
}

/// Optional curve midpoints.
pub mod curves {
    pub const BASE_CHANCE: f64 = 0.15;
    pub const CHANCE_PER_LEVEL: f64 = 0.01;
    pub const MAX_CHANCE: f64 = 0.35;
    pub const BASE_DEPTH: f64 = 30.0;
    pub const DEPTH_PER_LEVEL: f64 = 2.0;
    pub const MAX_DEPTH: f64 = 80.0;
    /// Fraction of the step's x move at which the midpoint sits.
    pub const MIDPOINT_LEAD: f64 = 0.3;

    /// Probability-like threshold for inserting a midpoint, capped at [`MAX_CHANCE`].
    pub fn chance(level: u32) -> f64 {
        (BASE_CHANCE + level as f64 * CHANCE_PER_LEVEL).min(MAX_CHANCE)
    }

    /// Curve depth for a level, capped at [`MAX_DEPTH`].
    pub fn max_depth(level: u32) -> f64 {
        (BASE_DEPTH + level as f64 * DEPTH_PER_LEVEL).min(MAX_DEPTH)
    }
}

/// Noise sampling frequencies as `(step scale, seed scale)` pairs.
pub mod sampling {
    pub const JITTER_X: (f64, f64) = (0.05, 0.1);
    pub const JITTER_Y: (f64, f64) = (0.08, 0.1);
    /// Seed offset for the vertical jitter channel.
    pub const JITTER_Y_SEED_OFFSET: f64 = 100.0;
    pub const CURVE_GATE: (f64, f64) = (0.2, 0.3);
    pub const CURVE_INTENSITY: (f64, f64) = (0.4, 0.5);
    pub const CURVE_LIFT: (f64, f64) = (0.3, 0.2);
}

/// Map markers and level progression.
pub mod progress {
    /// XP for level `L` is `XP_FACTOR * L²`.
    pub const XP_FACTOR: u64 = 5;
    /// Levels between milestones.
    pub const MILESTONE_INTERVAL: u32 = 5;
    /// Milestones are shown this many levels past the current one.
    pub const MILESTONE_LOOKAHEAD: u32 = 5;
    /// Trail points between waypoint markers (and per level on the trail).
    pub const WAYPOINT_INTERVAL: usize = 15;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_width_grows_per_level() {
        assert_eq!(layout::total_width(0), 900.0);
        assert_eq!(layout::total_width(1), 1020.0);
        assert_eq!(layout::total_width(10), 2100.0);
    }

    #[test]
    fn curve_chance_caps() {
        assert!((curves::chance(1) - 0.16).abs() < 1e-12);
        assert_eq!(curves::chance(25), curves::MAX_CHANCE);
        assert_eq!(curves::chance(500), curves::MAX_CHANCE);
    }

    #[test]
    fn curve_depth_caps() {
        assert_eq!(curves::max_depth(1), 32.0);
        assert_eq!(curves::max_depth(25), 80.0);
        assert_eq!(curves::max_depth(100), 80.0);
    }

    #[test]
    fn waypoint_interval_matches_segments() {
        assert_eq!(
            progress::WAYPOINT_INTERVAL,
            motion::SEGMENTS_PER_LEVEL as usize
        );
    }
}
