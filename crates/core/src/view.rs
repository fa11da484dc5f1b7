//! Equal-aspect viewing volume
//!
//! The view is a cube centered on the data whose half extent is half the
//! largest per-axis range. Using the same extent on every axis keeps the 3D
//! structure undistorted even when the data is much flatter along one axis.

use tracing::warn;

use crate::core_types::{PositionSeries, Vec3, AXIS_COUNT};

/// Cubic viewing volume
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewVolume {
    /// Midpoint of the data's bounding box
    pub center: Vec3,
    /// Half the side length of the cube, shared by all axes
    pub half_extent: f32,
}

impl ViewVolume {
    /// Lower and upper limit along one axis (0 = x, 1 = y, 2 = z)
    #[must_use]
    pub fn limits(&self, axis: usize) -> (f32, f32) {
        let c = self.center[axis];
        (c - self.half_extent, c + self.half_extent)
    }

    /// Limits for all three axes
    #[must_use]
    pub fn all_limits(&self) -> [(f32, f32); AXIS_COUNT] {
        [self.limits(0), self.limits(1), self.limits(2)]
    }

    /// True if `point` lies inside the cube (boundary included)
    #[must_use]
    pub fn contains(&self, point: &Vec3) -> bool {
        (0..AXIS_COUNT).all(|axis| {
            let (lo, hi) = self.limits(axis);
            (lo..=hi).contains(&point[axis])
        })
    }

    /// True when all positions coincide and the cube has no size
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.half_extent <= 0.0
    }
}

/// Compute the equal-aspect cube around every sample of every element
///
/// A stationary single point yields `half_extent == 0`; that is a valid
/// (if visually degenerate) volume, not an error.
#[must_use]
pub fn compute_view_volume(positions: &PositionSeries) -> ViewVolume {
    let mut min = [f32::INFINITY; AXIS_COUNT];
    let mut max = [f32::NEG_INFINITY; AXIS_COUNT];
    for axis in 0..AXIS_COUNT {
        for &value in positions.axis(axis) {
            min[axis] = min[axis].min(value);
            max[axis] = max[axis].max(value);
        }
    }

    let max_range = (0..AXIS_COUNT)
        .map(|axis| max[axis] - min[axis])
        .fold(0.0_f32, f32::max);
    let center = Vec3::new(
        (max[0] + min[0]) / 2.0,
        (max[1] + min[1]) / 2.0,
        (max[2] + min[2]) / 2.0,
    );

    let volume = ViewVolume {
        center,
        half_extent: max_range / 2.0,
    };
    if volume.is_degenerate() {
        warn!(
            "All positions coincide at ({:.3}, {:.3}, {:.3}), view volume has zero size",
            center.x, center.y, center.z
        );
    }
    volume
}
