//! N-Body Trail Rendering Core Library
//!
//! Renders a static 3D snapshot of a simulated N-body trajectory: every
//! element is drawn as a fading trail of its recent positions plus a marker at
//! its current position, with mass encoded as marker size and trail width.
//!
//! ## Pipeline
//!
//! - [`normalize_masses`] maps masses onto `[0, 1]` visual weights
//! - [`compute_view_volume`] picks an equal-aspect cube around all samples
//! - [`build_trail`] extracts each element's faded segments and marker
//! - [`render`] composes a [`Scene`] and draws it onto a [`DrawingSurface`]
//!
//! Geometry is computed as plain data first, so everything up to the final
//! draw is deterministic and testable without an image backend.

// Core types and utilities
pub mod core_types;

pub mod config;
pub mod error;

// Pipeline stages
pub mod encoding;
pub mod scene;
pub mod trail;
pub mod view;

// Input and output
pub mod animation;
pub mod loader;
pub mod surface;

// Re-export core types
pub use core_types::{MassVector, PositionSeries, Rgb, TrajectoryDataset, Vec3};

pub use config::RenderConfig;
pub use error::{ConfigError, DatasetError, RenderError};

// Re-export pipeline entry points
pub use animation::{frame_path, render_animation, Animation};
pub use encoding::{normalize_masses, NormalizedWeights};
pub use loader::{load_dataset, save_json, DatasetFormat};
pub use scene::{compose_scene, draw_scene, render, render_to_file, Scene, SceneElement};
pub use surface::{BitmapSurface, Camera, DrawCommand, DrawingSurface, RecordingSurface};
pub use trail::{build_trail, segment_alpha, trail_window, Marker, Trail, TrailSegment};
pub use view::{compute_view_volume, ViewVolume};
