//! Raster image surface backed by plotters
//!
//! Draw calls are buffered and only replayed onto a pixel buffer in
//! [`present`](DrawingSurface::present). The image file is created after the
//! whole frame rasterized successfully, so a failed render never leaves a
//! partial artifact behind. The output format follows the file extension
//! (PNG or JPEG).
//!
//! Tick labels and axis titles use the DejaVu Sans face bundled with the
//! crate (`fonts` feature, on by default). Without it the axes are drawn
//! with no text at all.

use plotters::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::{Camera, DrawCommand, DrawingSurface, RecordingSurface};
use crate::config::RenderConfig;
use crate::core_types::{Rgb, Vec3};
use crate::error::RenderError;
use crate::trail::{Marker, TrailSegment};
use crate::view::ViewVolume;

/// Half extent used in place of a zero-size view volume
const DEGENERATE_HALF_EXTENT: f64 = 0.5;

/// Projection zoom, leaves room for tick labels around the cube
const PROJECTION_SCALE: f64 = 0.8;

/// Axis title size (pt)
const LABEL_FONT_POINTS: f32 = 10.0;

/// Figure margin (pt)
const MARGIN_POINTS: f32 = 8.0;

/// Whether glyphs can be rasterized in this build
const TEXT_ENABLED: bool = cfg!(feature = "fonts");

/// Tick labels per axis when text is enabled
const TICK_LABELS: usize = 5;

#[cfg(feature = "fonts")]
const BUNDLED_FONT: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");

/// Register the bundled face under the family plotters resolves for
/// `"sans-serif"`. Runs once per process.
#[cfg(feature = "fonts")]
fn register_bundled_font() -> Result<(), RenderError> {
    use plotters::style::{register_font, FontStyle};
    use std::sync::OnceLock;

    static REGISTERED: OnceLock<Result<(), String>> = OnceLock::new();
    REGISTERED
        .get_or_init(|| {
            register_font("sans-serif", FontStyle::Normal, BUNDLED_FONT)
                .map_err(|_| "bundled font is not a valid TrueType face".to_string())
        })
        .clone()
        .map_err(RenderError::Surface)
}

/// Image file surface
pub struct BitmapSurface {
    path: PathBuf,
    pixel_size: (u32, u32),
    pixels_per_point: f32,
    background: Rgb,
    calls: RecordingSurface,
}

impl BitmapSurface {
    /// Create a surface writing to `path` with the configured figure size,
    /// resolution and background
    #[must_use]
    pub fn new<P: AsRef<Path>>(path: P, config: &RenderConfig) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            pixel_size: config.pixel_size(),
            pixels_per_point: config.pixels_per_point(),
            background: config.background,
            calls: RecordingSurface::new(),
        }
    }

    /// Output file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Output size in pixels
    #[must_use]
    pub fn pixel_size(&self) -> (u32, u32) {
        self.pixel_size
    }

    /// Convert a length in points to whole pixels, at least one
    fn points_to_pixels(&self, points: f32) -> u32 {
        (points * self.pixels_per_point).round().max(1.0) as u32
    }

    /// Marker radius in pixels for an area in pt²
    fn marker_radius(&self, size: f32) -> u32 {
        self.points_to_pixels(size.max(0.0).sqrt() / 2.0)
    }

    /// Rasterize every buffered call into an RGB buffer
    fn rasterize(&self, buffer: &mut [u8]) -> Result<(), RenderError> {
        let mut volume = None;
        let mut labels = None;
        let mut camera = None;
        for command in self.calls.commands() {
            match command {
                DrawCommand::Axes {
                    volume: v,
                    labels: l,
                } => {
                    volume = Some(*v);
                    labels = Some(l);
                }
                DrawCommand::Camera(c) => camera = Some(*c),
                _ => {}
            }
        }
        let volume = volume
            .ok_or_else(|| RenderError::Surface("present called before set_axes".into()))?;
        let labels = labels
            .ok_or_else(|| RenderError::Surface("present called before set_axes".into()))?;
        let camera = camera.unwrap_or(Camera {
            elevation: 30.0,
            azimuth: -60.0,
        });

        #[cfg(feature = "fonts")]
        register_bundled_font()?;

        let root = BitMapBackend::with_buffer(buffer, self.pixel_size).into_drawing_area();
        root.fill(&to_plotters(self.background)).map_err(surface_error)?;

        let [x, y, z] = backend_limits(&volume);
        let mut chart = ChartBuilder::on(&root)
            .margin(self.points_to_pixels(MARGIN_POINTS))
            .build_cartesian_3d(x.0..x.1, y.0..y.1, z.0..z.1)
            .map_err(surface_error)?;

        chart.with_projection(|mut pb| {
            pb.pitch = f64::from(camera.elevation).to_radians();
            pb.yaw = f64::from(camera.azimuth).to_radians();
            pb.scale = PROJECTION_SCALE;
            pb.into_matrix()
        });

        let tick_labels = if TEXT_ENABLED { TICK_LABELS } else { 0 };
        chart
            .configure_axes()
            .x_labels(tick_labels)
            .y_labels(tick_labels)
            .z_labels(tick_labels)
            .light_grid_style(to_plotters(Rgb::BLACK).mix(0.15))
            .max_light_lines(3)
            .draw()
            .map_err(surface_error)?;

        if TEXT_ENABLED {
            let font_size = f64::from(self.points_to_pixels(LABEL_FONT_POINTS));
            let titles = [
                (labels[0].clone(), (x.1, y.0, z.0)),
                (labels[1].clone(), (x.0, y.1, z.0)),
                (labels[2].clone(), (x.0, y.0, z.1)),
            ];
            let ink = to_plotters(Rgb::BLACK);
            let style = ("sans-serif", font_size).into_font().color(&ink);
            chart
                .draw_series(
                    titles
                        .into_iter()
                        .map(|(label, at)| Text::new(label, at, style.clone())),
                )
                .map_err(surface_error)?;
        }

        let mut segments = 0_usize;
        let mut markers = 0_usize;
        for command in self.calls.commands() {
            match command {
                DrawCommand::Segment { segment, color } => {
                    let style = to_plotters(*color)
                        .mix(f64::from(segment.alpha))
                        .stroke_width(self.points_to_pixels(segment.width));
                    chart
                        .draw_series(std::iter::once(PathElement::new(
                            vec![to_coord(&segment.start), to_coord(&segment.end)],
                            style,
                        )))
                        .map_err(surface_error)?;
                    segments += 1;
                }
                DrawCommand::Marker { marker, color } => {
                    chart
                        .draw_series(std::iter::once(Circle::new(
                            to_coord(&marker.position),
                            self.marker_radius(marker.size),
                            to_plotters(*color).filled(),
                        )))
                        .map_err(surface_error)?;
                    markers += 1;
                }
                _ => {}
            }
        }

        root.present().map_err(surface_error)?;
        debug!(
            "Rasterized {} segments and {} markers at {}x{} px",
            segments, markers, self.pixel_size.0, self.pixel_size.1
        );
        Ok(())
    }
}

impl DrawingSurface for BitmapSurface {
    fn set_axes(&mut self, volume: &ViewVolume, labels: &[String; 3]) -> Result<(), RenderError> {
        self.calls.set_axes(volume, labels)
    }

    fn draw_segment(&mut self, segment: &TrailSegment, color: Rgb) -> Result<(), RenderError> {
        self.calls.draw_segment(segment, color)
    }

    fn draw_marker(&mut self, marker: &Marker, color: Rgb) -> Result<(), RenderError> {
        self.calls.draw_marker(marker, color)
    }

    fn set_camera(&mut self, camera: Camera) -> Result<(), RenderError> {
        self.calls.set_camera(camera)
    }

    fn present(&mut self) -> Result<(), RenderError> {
        let (width, height) = self.pixel_size;
        let mut buffer = vec![0_u8; width as usize * height as usize * 3];
        self.rasterize(&mut buffer)?;

        let frame = image::RgbImage::from_raw(width, height, buffer)
            .ok_or_else(|| RenderError::Surface("pixel buffer size mismatch".into()))?;
        frame.save(&self.path).map_err(|e| {
            RenderError::Surface(format!("failed to write {}: {e}", self.path.display()))
        })?;

        info!("Wrote {}x{} image to {}", width, height, self.path.display());
        Ok(())
    }
}

/// Axis limits handed to the backend, widened when the volume has no size
fn backend_limits(volume: &ViewVolume) -> [(f64, f64); 3] {
    let half = if volume.is_degenerate() {
        DEGENERATE_HALF_EXTENT
    } else {
        f64::from(volume.half_extent)
    };
    let c = volume.center;
    [
        (f64::from(c.x) - half, f64::from(c.x) + half),
        (f64::from(c.y) - half, f64::from(c.y) + half),
        (f64::from(c.z) - half, f64::from(c.z) + half),
    ]
}

fn to_coord(point: &Vec3) -> (f64, f64, f64) {
    (f64::from(point.x), f64::from(point.y), f64::from(point.z))
}

fn to_plotters(color: Rgb) -> RGBColor {
    RGBColor(color.r, color.g, color.b)
}

fn surface_error<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Surface(e.to_string())
}
