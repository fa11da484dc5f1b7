//! In-memory trajectory dataset
//!
//! Positions are stored exactly as the simulation writes them: a rank-3 array
//! indexed `[axis, timestep, element]` with the axis dimension holding x, y, z.
//! Masses are a flat vector with one entry per element. Both are validated on
//! construction so every downstream stage can index without further checks.

use ndarray::{s, Array3, ArrayView2};
use std::ops::Range;

use super::vec3::Vec3;
use crate::error::DatasetError;

/// Number of spatial axes in the position array (x, y, z)
pub const AXIS_COUNT: usize = 3;

/// Time series of 3D positions, shape `[3, T, N]`
#[derive(Debug, Clone, PartialEq)]
pub struct PositionSeries {
    data: Array3<f32>,
}

impl PositionSeries {
    /// Wrap a `[3, T, N]` array
    ///
    /// # Errors
    /// Returns `AxisCount` if the leading dimension is not 3, or `Empty` if
    /// there are no timesteps or no elements.
    pub fn new(data: Array3<f32>) -> Result<Self, DatasetError> {
        let (axes, timesteps, elements) = data.dim();
        if axes != AXIS_COUNT {
            return Err(DatasetError::AxisCount(axes));
        }
        if timesteps == 0 {
            return Err(DatasetError::Empty {
                name: "positions".into(),
                dimension: "timestep",
            });
        }
        if elements == 0 {
            return Err(DatasetError::Empty {
                name: "positions".into(),
                dimension: "element",
            });
        }
        Ok(Self { data })
    }

    /// Build a series from per-timestep, per-element points
    ///
    /// `frames[t][e]` is the position of element `e` at timestep `t`.
    ///
    /// # Errors
    /// Returns `Ragged` if the frames disagree on element count, plus the
    /// errors of [`PositionSeries::new`].
    pub fn from_frames(frames: &[Vec<Vec3>]) -> Result<Self, DatasetError> {
        let elements = frames.first().map_or(0, Vec::len);
        if let Some(t) = frames.iter().position(|frame| frame.len() != elements) {
            return Err(DatasetError::Ragged {
                name: "positions".into(),
                at: format!("timestep {t}"),
            });
        }
        let data = Array3::from_shape_fn((AXIS_COUNT, frames.len(), elements), |(a, t, e)| {
            frames[t][e][a]
        });
        Self::new(data)
    }

    /// Number of recorded timesteps (T)
    #[must_use]
    pub fn timesteps(&self) -> usize {
        self.data.dim().1
    }

    /// Number of tracked elements (N)
    #[must_use]
    pub fn elements(&self) -> usize {
        self.data.dim().2
    }

    /// Position of `element` at `timestep`
    ///
    /// Panics if either index is out of range.
    #[must_use]
    pub fn position(&self, timestep: usize, element: usize) -> Vec3 {
        Vec3::new(
            self.data[[0, timestep, element]],
            self.data[[1, timestep, element]],
            self.data[[2, timestep, element]],
        )
    }

    /// Every sample of one spatial axis, shape `[T, N]`
    #[must_use]
    pub fn axis(&self, axis: usize) -> ArrayView2<'_, f32> {
        self.data.slice(s![axis, .., ..])
    }

    /// Owned copy of the timesteps in `range`
    ///
    /// # Errors
    /// Returns `Empty` if the clamped range holds no timesteps.
    pub fn window(&self, range: Range<usize>) -> Result<Self, DatasetError> {
        let end = range.end.min(self.timesteps());
        let start = range.start.min(end);
        Self::new(self.data.slice(s![.., start..end, ..]).to_owned())
    }

    /// Underlying `[3, T, N]` array
    #[must_use]
    pub fn as_array(&self) -> &Array3<f32> {
        &self.data
    }
}

/// One mass per element
#[derive(Debug, Clone, PartialEq)]
pub struct MassVector {
    values: Vec<f32>,
}

impl MassVector {
    /// Wrap a non-empty mass list
    ///
    /// # Errors
    /// Returns `Empty` if `values` is empty.
    pub fn new(values: Vec<f32>) -> Result<Self, DatasetError> {
        if values.is_empty() {
            return Err(DatasetError::Empty {
                name: "masses".into(),
                dimension: "element",
            });
        }
        Ok(Self { values })
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false; kept for API symmetry with `len`
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Raw masses
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }
}

/// Positions and masses of one simulation run, checked for agreement on N
#[derive(Debug, Clone, PartialEq)]
pub struct TrajectoryDataset {
    positions: PositionSeries,
    masses: MassVector,
}

impl TrajectoryDataset {
    /// Pair positions with masses
    ///
    /// # Errors
    /// Returns `ElementCountMismatch` if the mass vector length differs from
    /// the position array's element dimension.
    pub fn new(positions: PositionSeries, masses: MassVector) -> Result<Self, DatasetError> {
        if positions.elements() != masses.len() {
            return Err(DatasetError::ElementCountMismatch {
                positions: positions.elements(),
                masses: masses.len(),
            });
        }
        Ok(Self { positions, masses })
    }

    /// Validate and pair raw arrays as they come out of a store
    ///
    /// # Errors
    /// Any error of [`PositionSeries::new`], [`MassVector::new`] or
    /// [`TrajectoryDataset::new`].
    pub fn from_arrays(positions: Array3<f32>, masses: Vec<f32>) -> Result<Self, DatasetError> {
        Self::new(PositionSeries::new(positions)?, MassVector::new(masses)?)
    }

    /// Position history
    #[must_use]
    pub fn positions(&self) -> &PositionSeries {
        &self.positions
    }

    /// Element masses
    #[must_use]
    pub fn masses(&self) -> &MassVector {
        &self.masses
    }

    /// Same masses over the timesteps in `range`
    ///
    /// # Errors
    /// Returns `Empty` if the clamped range holds no timesteps.
    pub fn window(&self, range: Range<usize>) -> Result<Self, DatasetError> {
        Ok(Self {
            positions: self.positions.window(range)?,
            masses: self.masses.clone(),
        })
    }
}
