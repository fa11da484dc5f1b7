//! Frame-by-frame animation
//!
//! An animation is a lazy sequence of independent scenes, one per timestep.
//! Frame `t` is composed from the sliding window of timesteps ending at `t`
//! (at most `trail_length` long), so each frame recomputes its own weights
//! and view volume and carries no state from the previous one.

use std::ops::Range;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::RenderConfig;
use crate::core_types::TrajectoryDataset;
use crate::error::{DatasetError, RenderError};
use crate::scene::{compose_scene, draw_scene, Scene};
use crate::surface::BitmapSurface;
use crate::trail::trail_window;

/// Lazy iterator over the scenes of an animation
#[derive(Debug, Clone)]
pub struct Animation<'a> {
    dataset: &'a TrajectoryDataset,
    config: &'a RenderConfig,
    next: usize,
}

impl<'a> Animation<'a> {
    /// Create an animation over every timestep of `dataset`
    #[must_use]
    pub fn new(dataset: &'a TrajectoryDataset, config: &'a RenderConfig) -> Self {
        Self {
            dataset,
            config,
            next: 0,
        }
    }

    /// Number of frames (one per timestep)
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.dataset.positions().timesteps()
    }

    /// Timesteps visible in frame `index`
    #[must_use]
    pub fn frame_window(&self, index: usize) -> Range<usize> {
        trail_window(index + 1, self.config.trail_length.max(1))
    }

    /// Compose frame `index` directly
    ///
    /// # Errors
    ///
    /// Returns `TimestepOutOfRange` if `index` is past the last timestep, or any error
    /// of [`compose_scene`].
    pub fn frame(&self, index: usize) -> Result<Scene, RenderError> {
        if index >= self.frame_count() {
            return Err(DatasetError::TimestepOutOfRange {
                index,
                count: self.frame_count(),
            }
            .into());
        }
        let window = self.dataset.window(self.frame_window(index))?;
        compose_scene(&window, self.config)
    }
}

impl Iterator for Animation<'_> {
    type Item = Result<Scene, RenderError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.frame_count() {
            return None;
        }
        let frame = self.frame(self.next);
        self.next += 1;
        Some(frame)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.frame_count().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Animation<'_> {}

/// File name for frame `index` of an animation written next to `output`
///
/// `out/image.png` becomes `out/image_00042.png`.
#[must_use]
pub fn frame_path(output: &Path, index: usize) -> PathBuf {
    let stem = output
        .file_stem()
        .map_or_else(|| "frame".into(), |s| s.to_string_lossy().into_owned());
    let name = match output.extension() {
        Some(ext) => format!("{stem}_{index:05}.{}", ext.to_string_lossy()),
        None => format!("{stem}_{index:05}"),
    };
    output.with_file_name(name)
}

/// Render every frame to its own image file
///
/// Stops at the first failing frame; frames already written stay on disk.
///
/// # Errors
///
/// Any composition or surface error of the failing frame.
pub fn render_animation<P: AsRef<Path>>(
    dataset: &TrajectoryDataset,
    config: &RenderConfig,
    output: P,
) -> Result<Vec<PathBuf>, RenderError> {
    let output = output.as_ref();
    let animation = Animation::new(dataset, config);
    info!(
        "Rendering {} animation frames next to {}",
        animation.len(),
        output.display()
    );

    let mut written = Vec::with_capacity(animation.len());
    for (index, scene) in animation.enumerate() {
        let scene = scene?;
        let path = frame_path(output, index);
        let mut surface = BitmapSurface::new(&path, config);
        draw_scene(&scene, config, &mut surface)?;
        written.push(path);
    }
    Ok(written)
}
