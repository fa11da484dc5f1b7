//! Render configuration
//!
//! Every visual constant of a render lives here instead of inline in the
//! pipeline, so callers can override any of them from a file or the command
//! line. Defaults reproduce the reference look: blue trails 150 samples long,
//! marker area 10-200 pt², trail width 0.25-3 pt, camera at 40° elevation and
//! 30° azimuth, 6.4×4.8 in figure at 400 dpi.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core_types::Rgb;
use crate::error::ConfigError;

/// Points per inch, for converting point sizes to pixels
pub const POINTS_PER_INCH: f32 = 72.0;

/// Visual constants for one render
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Marker area (pt²) for the lightest element
    pub min_point_size: f32,
    /// Marker area (pt²) for the heaviest element
    pub max_point_size: f32,

    /// Trail line width (pt) for the lightest element
    pub min_trail_width: f32,
    /// Trail line width (pt) for the heaviest element
    pub max_trail_width: f32,

    /// Number of most recent samples kept per trail
    pub trail_length: usize,
    /// Color shared by all trails
    pub trail_color: Rgb,
    /// Marker colors, assigned by element index modulo length
    pub marker_palette: Vec<Rgb>,

    /// Camera elevation above the x-y plane (degrees)
    pub elevation: f32,
    /// Camera azimuth around the z axis (degrees)
    pub azimuth: f32,

    /// Output resolution (dots per inch)
    pub dpi: u32,
    /// Figure width and height (inches)
    pub figure_size: (f32, f32),
    /// Figure background
    pub background: Rgb,
    /// Axis titles, in x, y, z order
    pub axis_labels: [String; 3],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            min_point_size: 10.0,
            max_point_size: 200.0,
            min_trail_width: 0.25,
            max_trail_width: 3.0,
            trail_length: 150,
            trail_color: Rgb::BLUE,
            marker_palette: Rgb::categorical_cycle(),
            elevation: 40.0,
            azimuth: 30.0,
            dpi: 400,
            figure_size: (6.4, 4.8),
            background: Rgb::WHITE,
            axis_labels: ["X".into(), "Y".into(), "Z".into()],
        }
    }
}

impl RenderConfig {
    /// Load a configuration from a JSON file
    ///
    /// Fields missing from the file keep their default values.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents =
            fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        serde_json::from_str(&contents).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }

    /// Check every value the renderer relies on
    ///
    /// # Errors
    /// Returns `InvalidValue` naming the first offending field
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.trail_length == 0 {
            return Err(invalid("trail_length", "must be at least 1"));
        }
        if self.dpi == 0 {
            return Err(invalid("dpi", "must be positive"));
        }
        for (field, value) in [
            ("min_point_size", self.min_point_size),
            ("max_point_size", self.max_point_size),
            ("min_trail_width", self.min_trail_width),
            ("max_trail_width", self.max_trail_width),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(field, &format!("must be finite and >= 0, got {value}")));
            }
        }
        for (field, value) in [("elevation", self.elevation), ("azimuth", self.azimuth)] {
            if !value.is_finite() {
                return Err(invalid(field, &format!("must be finite, got {value}")));
            }
        }
        let (width, height) = self.figure_size;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(invalid(
                "figure_size",
                &format!("must be finite and positive, got {width}x{height}"),
            ));
        }
        if self.marker_palette.is_empty() {
            return Err(invalid("marker_palette", "must hold at least one color"));
        }
        Ok(())
    }

    /// Marker area (pt²) for a normalized weight
    #[must_use]
    pub fn point_size(&self, weight: f32) -> f32 {
        lerp(self.min_point_size, self.max_point_size, weight)
    }

    /// Trail line width (pt) for a normalized weight
    #[must_use]
    pub fn trail_width(&self, weight: f32) -> f32 {
        lerp(self.min_trail_width, self.max_trail_width, weight)
    }

    /// Marker color for an element index
    ///
    /// Falls back to the trail color when the palette is empty.
    #[must_use]
    pub fn marker_color(&self, element: usize) -> Rgb {
        if self.marker_palette.is_empty() {
            return self.trail_color;
        }
        self.marker_palette[element % self.marker_palette.len()]
    }

    /// Output image size in pixels
    #[must_use]
    pub fn pixel_size(&self) -> (u32, u32) {
        let dpi = self.dpi as f32;
        let (width, height) = self.figure_size;
        (
            (width * dpi).round().max(1.0) as u32,
            (height * dpi).round().max(1.0) as u32,
        )
    }

    /// Pixels per typographic point at the configured resolution
    #[must_use]
    pub fn pixels_per_point(&self) -> f32 {
        self.dpi as f32 / POINTS_PER_INCH
    }
}

fn lerp(min: f32, max: f32, weight: f32) -> f32 {
    min + (max - min) * weight
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field,
        reason: reason.to_string(),
    }
}
