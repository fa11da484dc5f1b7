//! In-memory surface that records draw calls

use super::{Camera, DrawingSurface};
use crate::core_types::Rgb;
use crate::error::RenderError;
use crate::trail::{Marker, TrailSegment};
use crate::view::ViewVolume;

/// One recorded surface call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// `set_axes`
    Axes {
        /// Volume the axes were fixed to
        volume: ViewVolume,
        /// Axis titles
        labels: [String; 3],
    },
    /// `draw_segment`
    Segment {
        /// Segment geometry and style
        segment: TrailSegment,
        /// Line color
        color: Rgb,
    },
    /// `draw_marker`
    Marker {
        /// Marker position and size
        marker: Marker,
        /// Fill color
        color: Rgb,
    },
    /// `set_camera`
    Camera(Camera),
    /// `present`
    Present,
}

/// Surface that keeps every call for later inspection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    /// Create an empty recording
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call in order
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Recorded segments in draw order
    pub fn segments(&self) -> impl Iterator<Item = &TrailSegment> + '_ {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Segment { segment, .. } => Some(segment),
            _ => None,
        })
    }

    /// Recorded markers in draw order
    pub fn markers(&self) -> impl Iterator<Item = &Marker> + '_ {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Marker { marker, .. } => Some(marker),
            _ => None,
        })
    }

    /// True once `present` has been called
    #[must_use]
    pub fn is_presented(&self) -> bool {
        self.commands
            .last()
            .is_some_and(|command| *command == DrawCommand::Present)
    }
}

impl DrawingSurface for RecordingSurface {
    fn set_axes(&mut self, volume: &ViewVolume, labels: &[String; 3]) -> Result<(), RenderError> {
        self.commands.push(DrawCommand::Axes {
            volume: *volume,
            labels: labels.clone(),
        });
        Ok(())
    }

    fn draw_segment(&mut self, segment: &TrailSegment, color: Rgb) -> Result<(), RenderError> {
        self.commands.push(DrawCommand::Segment {
            segment: *segment,
            color,
        });
        Ok(())
    }

    fn draw_marker(&mut self, marker: &Marker, color: Rgb) -> Result<(), RenderError> {
        self.commands.push(DrawCommand::Marker {
            marker: *marker,
            color,
        });
        Ok(())
    }

    fn set_camera(&mut self, camera: Camera) -> Result<(), RenderError> {
        self.commands.push(DrawCommand::Camera(camera));
        Ok(())
    }

    fn present(&mut self) -> Result<(), RenderError> {
        self.commands.push(DrawCommand::Present);
        Ok(())
    }
}
