//! Viewport configuration for trail generation and rendering.
//!
//! The trail only needs the viewport height (for clamping) and width (for
//! centering the current position). Both are passed explicitly rather than
//! read from the rendering environment.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::layout;

/// Errors raised while loading or validating a [`TrailConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{field} must be a finite positive number, got {value}")]
    InvalidDimension { field: &'static str, value: f64 },
}

/// Viewport the trail is generated for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailConfig {
    pub viewport_width: f64,
    pub viewport_height: f64,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            viewport_width: 1280.0,
            viewport_height: 800.0,
        }
    }
}

impl TrailConfig {
    pub fn new(viewport_width: f64, viewport_height: f64) -> Self {
        Self {
            viewport_width,
            viewport_height,
        }
    }

    /// Parse and validate a config from JSON. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: TrailConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        log::debug!(
            "Loaded trail config from {}: {}x{}",
            path.display(),
            config.viewport_width,
            config.viewport_height
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_dimension("viewport_width", self.viewport_width)?;
        check_dimension("viewport_height", self.viewport_height)?;
        if self.viewport_height < 2.0 * layout::EDGE_MARGIN {
            log::warn!(
                "viewport_height {} leaves no room between the {}px margins; trail will be flat",
                self.viewport_height,
                layout::EDGE_MARGIN
            );
        }
        Ok(())
    }

    /// Lowest allowed y coordinate for generated points.
    pub fn min_y(&self) -> f64 {
        layout::EDGE_MARGIN
    }

    /// Highest allowed y coordinate for generated points.
    ///
    /// For viewports shorter than twice the margin this is below [`min_y`](Self::min_y);
    /// [`clamp_y`](Self::clamp_y) then pins everything to `min_y`.
    pub fn max_y(&self) -> f64 {
        self.viewport_height - layout::EDGE_MARGIN
    }

    /// Clamp a y coordinate into the viewport band.
    ///
    /// Applies the upper bound first, then the lower one, so it never panics
    /// on an inverted band the way `f64::clamp` would.
    pub fn clamp_y(&self, y: f64) -> f64 {
        y.min(self.max_y()).max(self.min_y())
    }
}

fn check_dimension(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidDimension { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = TrailConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_y(), 700.0);
    }

    #[test]
    fn parse_partial_json_keeps_defaults() {
        let config = TrailConfig::from_json_str(r#"{ "viewport_height": 600 }"#).unwrap();
        assert_eq!(config.viewport_height, 600.0);
        assert_eq!(config.viewport_width, 1280.0);
    }

    #[test]
    fn parse_rejects_non_positive() {
        let err = TrailConfig::from_json_str(r#"{ "viewport_width": 0 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidDimension {
                field: "viewport_width",
                ..
            }
        ));
    }

    #[test]
    fn parse_rejects_bad_json() {
        let err = TrailConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = TrailConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }

    #[test]
    fn clamp_y_respects_band() {
        let config = TrailConfig::new(1280.0, 800.0);
        assert_eq!(config.clamp_y(-50.0), 100.0);
        assert_eq!(config.clamp_y(400.0), 400.0);
        assert_eq!(config.clamp_y(9000.0), 700.0);
    }

    #[test]
    fn clamp_y_inverted_band_pins_to_margin() {
        let config = TrailConfig::new(1280.0, 150.0);
        assert_eq!(config.clamp_y(0.0), 100.0);
        assert_eq!(config.clamp_y(500.0), 100.0);
    }
}
