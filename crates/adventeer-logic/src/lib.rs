//! Pure treasure-trail logic for Adventeer.
//!
//! This crate holds the map-screen logic that is independent of any backend,
//! browser, or renderer. Functions take plain data and return results, so the
//! same code serves the web front end, the headless harness, and tests.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | Viewport configuration, JSON loading and validation |
//! | [`constants`] | Trail tuning constants (widths, amplitudes, thresholds) |
//! | [`map`] | Milestones, current position, waypoint markers, map extent |
//! | [`progression`] | XP ↔ level arithmetic |
//! | [`render`] | SVG path data and a debug SVG document |
//! | [`seed`] | Identity seeding and the seeded 2-D noise field |
//! | [`trail`] | Deterministic winding-trail generator |
//!
//! ```
//! use adventeer_logic::trail::generate;
//!
//! let points = generate("abc", 1, 800.0);
//! assert_eq!((points[0].x, points[0].y), (100.0, 250.0));
//! assert_eq!(points.last().map(|p| p.x), Some(1120.0));
//! ```

pub mod config;
pub mod constants;
pub mod map;
pub mod progression;
pub mod render;
pub mod seed;
pub mod trail;
