//! Scene composition
//!
//! Rendering is split into a pure stage and a drawing stage:
//!
//! 1. [`compose_scene`] normalizes masses, computes the equal-aspect view
//!    volume and builds every element's trail. The result is plain data.
//! 2. [`draw_scene`] replays that data onto a [`DrawingSurface`]: axes, then
//!    each element's segments followed by its marker, then the camera, then
//!    the flush.
//!
//! [`render`] runs both; [`render_to_file`] does so onto a bitmap.

use std::path::Path;
use tracing::{debug, info};

use crate::config::RenderConfig;
use crate::core_types::{Rgb, TrajectoryDataset};
use crate::encoding::{normalize_masses, NormalizedWeights};
use crate::error::RenderError;
use crate::surface::{BitmapSurface, Camera, DrawingSurface};
use crate::trail::{build_trail, Trail};
use crate::view::{compute_view_volume, ViewVolume};

/// One element's drawable geometry
#[derive(Debug, Clone, PartialEq)]
pub struct SceneElement {
    /// Normalized visual weight
    pub weight: f32,
    /// Marker color
    pub marker_color: Rgb,
    /// Segments and marker
    pub trail: Trail,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// Equal-aspect axis limits
    pub volume: ViewVolume,
    /// Camera orientation
    pub camera: Camera,
    /// Shared trail color
    pub trail_color: Rgb,
    /// Per-element geometry in element order
    pub elements: Vec<SceneElement>,
}

impl Scene {
    /// Total number of trail segments
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.elements.iter().map(|e| e.trail.segments.len()).sum()
    }
}

/// Compute the geometry of one frame without touching any surface
///
/// # Errors
///
/// Returns `Config` if the configuration fails validation.
pub fn compose_scene(
    dataset: &TrajectoryDataset,
    config: &RenderConfig,
) -> Result<Scene, RenderError> {
    config.validate()?;

    let positions = dataset.positions();
    let weights: NormalizedWeights = normalize_masses(dataset.masses());
    let volume = compute_view_volume(positions);

    let elements = (0..positions.elements())
        .map(|element| -> Result<SceneElement, RenderError> {
            let weight = weights.get(element);
            let trail = build_trail(positions, element, weight, config)?;
            debug!(
                "Element {}: weight={:.3}, segments={}, marker size={:.1}",
                element,
                weight,
                trail.segments.len(),
                trail.marker.size
            );
            Ok(SceneElement {
                weight,
                marker_color: config.marker_color(element),
                trail,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Scene {
        volume,
        camera: Camera {
            elevation: config.elevation,
            azimuth: config.azimuth,
        },
        trail_color: config.trail_color,
        elements,
    })
}

/// Replay a composed scene onto a surface and flush it
///
/// # Errors
///
/// Propagates the first surface failure; the surface is not flushed then.
pub fn draw_scene<S: DrawingSurface + ?Sized>(
    scene: &Scene,
    config: &RenderConfig,
    surface: &mut S,
) -> Result<(), RenderError> {
    surface.set_axes(&scene.volume, &config.axis_labels)?;
    for element in &scene.elements {
        for segment in &element.trail.segments {
            surface.draw_segment(segment, scene.trail_color)?;
        }
        surface.draw_marker(&element.trail.marker, element.marker_color)?;
    }
    surface.set_camera(scene.camera)?;
    surface.present()
}

/// Compose and draw one frame
///
/// # Errors
///
/// Any error of [`compose_scene`] or [`draw_scene`]. Nothing is drawn when
/// composition fails.
pub fn render<S: DrawingSurface + ?Sized>(
    dataset: &TrajectoryDataset,
    config: &RenderConfig,
    surface: &mut S,
) -> Result<Scene, RenderError> {
    let scene = compose_scene(dataset, config)?;
    info!(
        "Rendering {} elements over {} timesteps: {} segments, view half extent {:.3}",
        scene.elements.len(),
        dataset.positions().timesteps(),
        scene.segment_count(),
        scene.volume.half_extent
    );
    draw_scene(&scene, config, surface)?;
    Ok(scene)
}

/// Render one frame to an image file, overwriting it if present
///
/// # Errors
///
/// Any error of [`render`], including failure to encode or write the file.
pub fn render_to_file<P: AsRef<Path>>(
    dataset: &TrajectoryDataset,
    config: &RenderConfig,
    path: P,
) -> Result<Scene, RenderError> {
    let mut surface = BitmapSurface::new(path, config);
    render(dataset, config, &mut surface)
}
