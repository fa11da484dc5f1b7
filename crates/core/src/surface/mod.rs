//! Drawing surface abstraction
//!
//! The scene composer computes geometry as plain data and hands it to a
//! [`DrawingSurface`] for the side effects. Two backends exist:
//! [`BitmapSurface`] rasterizes to an image file and [`RecordingSurface`]
//! keeps every call in memory.

mod bitmap;
mod recording;

pub use bitmap::BitmapSurface;
pub use recording::{DrawCommand, RecordingSurface};

use crate::core_types::Rgb;
use crate::error::RenderError;
use crate::trail::{Marker, TrailSegment};
use crate::view::ViewVolume;

/// Camera orientation, in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Angle above the x-y plane
    pub elevation: f32,
    /// Rotation around the z axis
    pub azimuth: f32,
}

/// Backend-agnostic 3D drawing target for one frame
///
/// Calls arrive in a fixed order: `set_axes` once, then for each element its
/// segments followed by its marker, then `set_camera`, then `present`.
/// Nothing may be written to the output target before `present`.
pub trait DrawingSurface {
    /// Fix the axis limits to the view volume and title the axes
    ///
    /// # Errors
    /// Backend-specific failure
    fn set_axes(&mut self, volume: &ViewVolume, labels: &[String; 3]) -> Result<(), RenderError>;

    /// Draw one trail segment with its own alpha and width
    ///
    /// # Errors
    /// Backend-specific failure
    fn draw_segment(&mut self, segment: &TrailSegment, color: Rgb) -> Result<(), RenderError>;

    /// Draw a current-position marker
    ///
    /// # Errors
    /// Backend-specific failure
    fn draw_marker(&mut self, marker: &Marker, color: Rgb) -> Result<(), RenderError>;

    /// Orient the camera
    ///
    /// # Errors
    /// Backend-specific failure
    fn set_camera(&mut self, camera: Camera) -> Result<(), RenderError>;

    /// Flush the frame to the output target
    ///
    /// # Errors
    /// Backend-specific failure, typically I/O or encoding
    fn present(&mut self) -> Result<(), RenderError>;
}
