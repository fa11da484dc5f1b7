//! Mass-to-visual-weight encoding
//!
//! Masses are mapped linearly onto `[0, 1]` so the lightest element gets the
//! smallest marker and thinnest trail and the heaviest gets the largest. The
//! actual sizes are looked up in [`RenderConfig`](crate::RenderConfig).

use tracing::warn;

use crate::core_types::MassVector;

/// Normalized visual weight per element, each in `[0, 1]`
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedWeights {
    values: Vec<f32>,
}

impl NormalizedWeights {
    /// Weight of one element
    ///
    /// Panics if `element` is out of range.
    #[must_use]
    pub fn get(&self, element: usize) -> f32 {
        self.values[element]
    }

    /// Number of weights
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when there are no weights
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// All weights in element order
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }
}

/// Scale masses onto `[0, 1]`
///
/// Computes `(m - min) / (max - min)` per element. When every mass is equal
/// the range is zero, and every weight is 1 instead: an equal-mass system is
/// drawn at full visual weight.
#[must_use]
pub fn normalize_masses(masses: &MassVector) -> NormalizedWeights {
    let values = masses.as_slice();
    let (lo, hi) = values
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &m| {
            (lo.min(m), hi.max(m))
        });

    if lo == hi {
        warn!(
            "All {} masses equal {}, using full visual weight",
            values.len(),
            lo
        );
        return NormalizedWeights {
            values: vec![1.0; values.len()],
        };
    }

    let range = hi - lo;
    NormalizedWeights {
        values: values.iter().map(|&m| (m - lo) / range).collect(),
    }
}
