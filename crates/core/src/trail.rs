//! Per-element motion trails
//!
//! A trail is the last `trail_length` samples of one element, drawn as
//! consecutive segments that fade with age, plus a marker at the newest
//! sample. Line width and marker size encode mass; segment alpha encodes
//! recency.
//!
//! # Fade curve
//!
//! Segment `j` of a window holding `actual` samples gets
//!
//! ```text
//! alpha_j = (j + trail_length - actual) / trail_length
//! ```
//!
//! The offset `trail_length - actual` ties opacity to absolute age rather
//! than to the available history: a short history starts part-way up the
//! ramp instead of being stretched over `0..1`, and no segment ever reaches
//! full opacity. For a full window the newest segment has alpha
//! `(trail_length - 2) / trail_length`.

use std::ops::Range;

use crate::config::RenderConfig;
use crate::core_types::{PositionSeries, Vec3};
use crate::error::DatasetError;

/// One drawable piece of a trail between two consecutive samples
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailSegment {
    /// Older sample
    pub start: Vec3,
    /// Newer sample
    pub end: Vec3,
    /// Opacity in `[0, 1)`
    pub alpha: f32,
    /// Line width (pt), constant along one element's trail
    pub width: f32,
}

/// Current-position marker
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    /// Position at the last timestep
    pub position: Vec3,
    /// Marker area (pt²)
    pub size: f32,
}

/// Faded trail and current-position marker of one element
#[derive(Debug, Clone, PartialEq)]
pub struct Trail {
    /// Element index in the dataset
    pub element: usize,
    /// Segments from oldest to newest; empty for a single-sample history
    pub segments: Vec<TrailSegment>,
    /// Marker at the newest sample
    pub marker: Marker,
}

impl Trail {
    /// Number of samples the trail was built from
    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.segments.len() + 1
    }
}

/// Timesteps covered by a trail: the last `trail_length` of `timesteps`
#[must_use]
pub fn trail_window(timesteps: usize, trail_length: usize) -> Range<usize> {
    timesteps.saturating_sub(trail_length)..timesteps
}

/// Opacity of segment `j` in a window of `actual` samples
#[must_use]
pub fn segment_alpha(j: usize, actual: usize, trail_length: usize) -> f32 {
    (j + trail_length - actual) as f32 / trail_length as f32
}

/// Build the trail of one element
///
/// Takes up to `config.trail_length` of the most recent samples (fewer when
/// the history is shorter, without padding). Segment widths come from
/// `config.trail_width(weight)` and the marker size from
/// `config.point_size(weight)`.
///
/// # Arguments
///
/// * `positions` - Full position history
/// * `element` - Element index in `[0, N)`
/// * `weight` - Normalized visual weight of the element
/// * `config` - Render configuration (`trail_length` must be at least 1)
///
/// # Errors
///
/// Returns `ElementOutOfRange` if `element >= N`.
pub fn build_trail(
    positions: &PositionSeries,
    element: usize,
    weight: f32,
    config: &RenderConfig,
) -> Result<Trail, DatasetError> {
    if element >= positions.elements() {
        return Err(DatasetError::ElementOutOfRange {
            index: element,
            count: positions.elements(),
        });
    }

    let trail_length = config.trail_length.max(1);
    let window = trail_window(positions.timesteps(), trail_length);
    let actual = window.len();
    let width = config.trail_width(weight);

    let samples: Vec<Vec3> = window.map(|t| positions.position(t, element)).collect();
    let segments = samples
        .windows(2)
        .enumerate()
        .map(|(j, pair)| TrailSegment {
            start: pair[0],
            end: pair[1],
            alpha: segment_alpha(j, actual, trail_length),
            width,
        })
        .collect();

    let marker = Marker {
        position: positions.position(positions.timesteps() - 1, element),
        size: config.point_size(weight),
    };

    Ok(Trail {
        element,
        segments,
        marker,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn line_series(timesteps: usize) -> PositionSeries {
        let frames: Vec<Vec<Vec3>> = (0..timesteps)
            .map(|t| {
                let t = t as f32;
                vec![Vec3::new(t, 0.0, 0.0), Vec3::new(0.0, t, -t)]
            })
            .collect();
        PositionSeries::from_frames(&frames).unwrap()
    }

    fn config(trail_length: usize) -> RenderConfig {
        RenderConfig {
            trail_length,
            ..Default::default()
        }
    }

    #[test]
    fn test_window_bounds() {
        assert_eq!(trail_window(500, 150), 350..500);
        assert_eq!(trail_window(5, 150), 0..5);
        assert_eq!(trail_window(1, 150), 0..1);
    }

    #[test]
    fn test_full_window_alphas() {
        let trail = build_trail(&line_series(20), 0, 1.0, &config(8)).unwrap();
        assert_eq!(trail.segments.len(), 7);
        assert_eq!(trail.sample_count(), 8);
        for (j, segment) in trail.segments.iter().enumerate() {
            assert_relative_eq!(segment.alpha, j as f32 / 8.0);
        }
        assert_relative_eq!(trail.segments[6].alpha, 6.0 / 8.0);
    }

    #[test]
    fn test_full_window_uses_most_recent_samples() {
        let trail = build_trail(&line_series(20), 0, 1.0, &config(8)).unwrap();
        assert_eq!(trail.segments[0].start, Vec3::new(12.0, 0.0, 0.0));
        assert_eq!(trail.segments[6].end, Vec3::new(19.0, 0.0, 0.0));
        for pair in trail.segments.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
    }

    #[test]
    fn test_short_history_keeps_absolute_fade() {
        let trail = build_trail(&line_series(5), 1, 0.0, &config(150)).unwrap();
        assert_eq!(trail.segments.len(), 4);

        let alphas: Vec<f32> = trail.segments.iter().map(|s| s.alpha).collect();
        for (j, &alpha) in alphas.iter().enumerate() {
            assert_relative_eq!(alpha, (j + 145) as f32 / 150.0);
            assert!(alpha < 1.0);
        }
        for pair in alphas.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn test_single_sample_has_only_marker() {
        let trail = build_trail(&line_series(1), 0, 0.5, &config(150)).unwrap();
        assert!(trail.segments.is_empty());
        assert_eq!(trail.sample_count(), 1);
        assert_eq!(trail.marker.position, Vec3::zeros());
    }

    #[test]
    fn test_width_and_size_follow_weight() {
        let cfg = config(10);
        let heavy = build_trail(&line_series(4), 0, 1.0, &cfg).unwrap();
        let light = build_trail(&line_series(4), 0, 0.0, &cfg).unwrap();

        assert!(heavy.segments.iter().all(|s| s.width == cfg.max_trail_width));
        assert!(light.segments.iter().all(|s| s.width == cfg.min_trail_width));
        assert_eq!(heavy.marker.size, cfg.max_point_size);
        assert_eq!(light.marker.size, cfg.min_point_size);
    }

    #[test]
    fn test_marker_sits_on_last_sample() {
        let trail = build_trail(&line_series(6), 1, 1.0, &config(3)).unwrap();
        assert_eq!(trail.marker.position, Vec3::new(0.0, 5.0, -5.0));
        assert_eq!(trail.segments.last().unwrap().end, trail.marker.position);
    }

    #[test]
    fn test_trail_length_one_draws_marker_only() {
        let trail = build_trail(&line_series(6), 0, 1.0, &config(1)).unwrap();
        assert!(trail.segments.is_empty());
    }

    #[test]
    fn test_out_of_range_element() {
        let err = build_trail(&line_series(3), 2, 1.0, &config(10)).unwrap_err();
        assert_eq!(err, DatasetError::ElementOutOfRange { index: 2, count: 2 });
    }
}
