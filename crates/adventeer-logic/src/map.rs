//! Map-screen derivations over a generated trail.
//!
//! Milestones, the current position, and waypoint markers are all picked by
//! index arithmetic over the point sequence. This only lines up with the drawn
//! trail because generation is deterministic, so every function here takes
//! the points it indexes into.
//!
//! `level` in this module is the user's actual level, which may be 0. The
//! trail itself is generated for at least level 1.

use serde::{Deserialize, Serialize};

use crate::config::TrailConfig;
use crate::constants::{layout, progress};
use crate::trail::{generate, TrailPoint};

/// A labelled waypoint shown every [`progress::MILESTONE_INTERVAL`] levels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub level: u32,
    pub point: TrailPoint,
    pub unlocked: bool,
}

/// Progress state of a decorative waypoint marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WaypointStatus {
    Completed,
    Current,
    Locked,
}

/// A decorative marker on every 15th trail point and on the last one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    /// Index into the trail points.
    pub index: usize,
    pub point: TrailPoint,
    pub status: WaypointStatus,
}

/// Milestones up to `level + 5`, bounded by the point count.
///
/// Milestone `m` sits at point `min(m * 15, len - 1)` and is unlocked once
/// `level >= m`.
pub fn milestones(points: &[TrailPoint], level: u32) -> Vec<Milestone> {
    let Some(last_index) = points.len().checked_sub(1) else {
        return Vec::new();
    };
    let upper = ((level as usize).saturating_add(progress::MILESTONE_LOOKAHEAD as usize))
        .min(last_index);

    (1..=upper / progress::MILESTONE_INTERVAL as usize)
        .map(|n| {
            let milestone_level = n * progress::MILESTONE_INTERVAL as usize;
            let index = milestone_level
                .saturating_mul(progress::WAYPOINT_INTERVAL)
                .min(last_index);
            Milestone {
                level: milestone_level as u32,
                point: points[index],
                unlocked: level as usize >= milestone_level,
            }
        })
        .collect()
}

/// Index of the point representing the user's current position.
///
/// Returns 0 for an empty sequence.
pub fn current_index(points: &[TrailPoint], level: u32) -> usize {
    let last_index = points.len().saturating_sub(1);
    (level as usize)
        .saturating_mul(progress::WAYPOINT_INTERVAL)
        .min(last_index)
}

/// Horizontal scroll that centers the current position in the viewport.
pub fn scroll_offset(points: &[TrailPoint], level: u32, viewport_width: f64) -> f64 {
    let current_x = points
        .get(current_index(points, level))
        .map_or(0.0, |p| p.x);
    (current_x - viewport_width / 2.0).max(0.0)
}

/// Waypoint markers with their progress status.
///
/// The k-th marker represents level `floor(k * level / (len / 15))`.
pub fn waypoints(points: &[TrailPoint], level: u32) -> Vec<Waypoint> {
    let len = points.len();
    let markers_per_trail = len as f64 / progress::WAYPOINT_INTERVAL as f64;

    points
        .iter()
        .enumerate()
        .filter(|(index, _)| index % progress::WAYPOINT_INTERVAL == 0 || index + 1 == len)
        .enumerate()
        .map(|(ordinal, (index, point))| {
            let marker_level = (ordinal as f64 * level as f64 / markers_per_trail).floor();
            let status = if marker_level == level as f64 {
                WaypointStatus::Current
            } else if marker_level <= level as f64 {
                WaypointStatus::Completed
            } else {
                WaypointStatus::Locked
            };
            Waypoint {
                index,
                point: *point,
                status,
            }
        })
        .collect()
}

/// Canvas width needed to show the whole trail.
pub fn map_width(points: &[TrailPoint]) -> f64 {
    points.iter().fold(0.0_f64, |max, p| max.max(p.x)) + layout::END_PADDING
}

/// Everything the map screen draws for one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrailMap {
    pub identity: String,
    pub level: u32,
    pub points: Vec<TrailPoint>,
    pub milestones: Vec<Milestone>,
    pub waypoints: Vec<Waypoint>,
    pub current_index: usize,
    pub width: f64,
}

impl TrailMap {
    /// Generate the trail and derive its markers.
    pub fn build(identity: &str, level: u32, config: &TrailConfig) -> Self {
        let points = generate(identity, level, config.viewport_height);
        log::debug!(
            "Building trail map for level {} ({} points)",
            level,
            points.len()
        );
        Self {
            identity: identity.to_string(),
            level,
            milestones: milestones(&points, level),
            waypoints: waypoints(&points, level),
            current_index: current_index(&points, level),
            width: map_width(&points),
            points,
        }
    }

    pub fn current_point(&self) -> Option<TrailPoint> {
        self.points.get(self.current_index).copied()
    }

    pub fn scroll_offset(&self, config: &TrailConfig) -> f64 {
        scroll_offset(&self.points, self.level, config.viewport_width)
    }

    pub fn unlocked_milestones(&self) -> usize {
        self.milestones.iter().filter(|m| m.unlocked).count()
    }
}
