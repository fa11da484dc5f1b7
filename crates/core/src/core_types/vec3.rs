//! Vector type alias for 3D positions.

use nalgebra::Vector3;

/// 3D vector type for sample positions and view-volume centers.
///
/// This is a simple alias for `nalgebra::Vector3<f32>`. The dataset stores
/// 32-bit floats, so positions stay in `f32` from load to draw.
pub type Vec3 = Vector3<f32>;
