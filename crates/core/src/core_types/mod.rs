//! Core types and utilities

pub mod color;
pub mod dataset;
pub mod vec3;

pub use color::Rgb;
pub use dataset::{MassVector, PositionSeries, TrajectoryDataset, AXIS_COUNT};
pub use vec3::Vec3;
