//! Deterministic winding-trail generator.
//!
//! Given an identity and a level, [`generate`] produces the ordered points of
//! the treasure trail drawn on the map screen. Length and curviness scale with
//! level; the same `(identity, level, viewport_height)` always yields the same
//! points, which lets callers derive markers from index arithmetic over
//! independently generated copies.
//!
//! # Shape
//!
//! The trail starts at a fixed origin and walks right in small steps. Each
//! step follows a schedule: the further the head falls behind its target x,
//! the larger the "pull", which lengthens the step and damps horizontal
//! jitter. Vertical motion is pure noise, clamped to the viewport band.
//! Occasionally a curve midpoint is inserted before a step's main point. A
//! final point sits exactly at `START_X + total_width(level)`.

use serde::{Deserialize, Serialize};

use crate::config::TrailConfig;
use crate::constants::{curves, layout, motion, sampling};
use crate::seed::{identity_seed, noise_field};

/// Identity used when no user is signed in.
pub const GUEST_IDENTITY: &str = "guest";

/// A single vertex on the trail.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrailPoint {
    pub x: f64,
    pub y: f64,
}

impl TrailPoint {
    pub const ORIGIN: TrailPoint = TrailPoint {
        x: layout::START_X,
        y: layout::BASE_Y,
    };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Who the trail is for and how far they have come.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GenerationInput {
    pub identity: String,
    /// Always at least 1.
    pub level: u32,
}

impl GenerationInput {
    /// Build an input, flooring `level` at 1.
    pub fn new(identity: impl Into<String>, level: u32) -> Self {
        Self {
            identity: identity.into(),
            level: level.max(1),
        }
    }

    /// Input for a signed-out visitor.
    pub fn guest(level: u32) -> Self {
        Self::new(GUEST_IDENTITY, level)
    }

    pub fn generate(&self, config: &TrailConfig) -> Vec<TrailPoint> {
        generate(&self.identity, self.level, config.viewport_height)
    }
}

/// Number of main steps generated for a level (excludes origin, final point and midpoints).
pub fn segment_count(level: u32) -> u32 {
    level.max(1).saturating_mul(motion::SEGMENTS_PER_LEVEL)
}

/// Points reserved up front: origin, one per step, final point. Midpoints grow the vector.
fn initial_capacity(total_segments: u32) -> usize {
    (total_segments as usize).saturating_add(2)
}

/// Generate the trail for `identity` at `level`.
///
/// `level` 0 is treated as 1. Every point after the origin has its y clamped
/// to `[100, viewport_height - 100]`. The result always holds at least
/// `segment_count(level) + 2` points.
pub fn generate(identity: &str, level: u32, viewport_height: f64) -> Vec<TrailPoint> {
    let level = level.max(1);
    let config = TrailConfig {
        viewport_height,
        ..TrailConfig::default()
    };
    let noise = noise_field(identity_seed(identity));

    let total_width = layout::total_width(level);
    let total_segments = segment_count(level);
    let curve_chance = curves::chance(level);
    let curve_depth = curves::max_depth(level);

    let mut points = Vec::with_capacity(initial_capacity(total_segments));
    points.push(TrailPoint::ORIGIN);

    let mut last = TrailPoint::ORIGIN;
    let mut overall_progress = 0.0;
    let mut midpoints = 0usize;

    for i in 1..=total_segments {
        let step = i as f64;
        let target_progress = step / total_segments as f64 * total_width;
        let pull = ((target_progress - overall_progress) / motion::PULL_WINDOW).clamp(0.0, 1.0);

        let noise_x = noise.sample_channel(step, sampling::JITTER_X, 0.0) * (1.0 - pull);
        let noise_y = noise.sample_channel(
            step,
            sampling::JITTER_Y,
            sampling::JITTER_Y_SEED_OFFSET,
        );

        let x_move = motion::BASE_STEP + pull * motion::PULL_STEP;
        let y_move = noise_y * motion::VERTICAL_AMPLITUDE;
        let main = TrailPoint::new(last.x + x_move, config.clamp_y(last.y + y_move));

        if noise.sample_channel(step, sampling::CURVE_GATE, 0.0) > 1.0 - curve_chance {
            let intensity =
                (noise.sample_channel(step, sampling::CURVE_INTENSITY, 0.0) + 1.0) * curve_depth;
            let lift = noise.sample_channel(step, sampling::CURVE_LIFT, 0.0);
            let mid_x = last.x + x_move * curves::MIDPOINT_LEAD + noise_x * intensity;
            let mid_y = last.y + (noise_y + lift) * intensity;
            points.push(TrailPoint::new(mid_x, config.clamp_y(mid_y)));
            midpoints += 1;
        }

        points.push(main);
        last = main;
        overall_progress = main.x - layout::START_X;
    }

    let final_y = layout::BASE_Y + noise.sample(1.0, noise.seed() as f64) * motion::FINAL_JITTER;
    points.push(TrailPoint::new(
        layout::START_X + total_width,
        config.clamp_y(final_y),
    ));

    log::debug!(
        "Generated trail: level={} seed={} points={} midpoints={}",
        level,
        noise.seed(),
        points.len(),
        midpoints
    );
    points
}
