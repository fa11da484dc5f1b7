//! Rendering pipeline properties
//!
//! Exercises the full compose-and-draw path against a recording surface:
//! degenerate inputs, fade curves over long and short histories, equal-aspect
//! limits and determinism of repeated renders.

use approx::assert_relative_eq;
use nbody_trails_core::{
    compose_scene, render, DrawCommand, MassVector, PositionSeries, RecordingSurface,
    RenderConfig, TrajectoryDataset, Vec3,
};

/// Two bodies on circular orbits of radius 1 and 3 around the origin,
/// tilted so every axis has some extent
fn orbiting_pair(timesteps: usize, masses: Vec<f32>) -> TrajectoryDataset {
    let frames: Vec<Vec<Vec3>> = (0..timesteps)
        .map(|t| {
            let angle = t as f32 * 0.05;
            vec![
                Vec3::new(angle.cos(), angle.sin(), 0.1 * angle.sin()),
                Vec3::new(3.0 * (-angle).cos(), 3.0 * (-angle).sin(), -0.2),
            ]
        })
        .collect();
    TrajectoryDataset::new(
        PositionSeries::from_frames(&frames).unwrap(),
        MassVector::new(masses).unwrap(),
    )
    .unwrap()
}

#[test]
fn test_equal_masses_get_max_point_size() {
    let data = orbiting_pair(3, vec![1.0, 1.0]);
    let config = RenderConfig::default();
    let scene = compose_scene(&data, &config).unwrap();

    assert_eq!(scene.elements.len(), 2);
    for element in &scene.elements {
        assert_eq!(element.weight, 1.0);
        assert_eq!(element.trail.marker.size, config.max_point_size);
        assert!(element
            .trail
            .segments
            .iter()
            .all(|s| s.width == config.max_trail_width));
    }
}

#[test]
fn test_single_stationary_point_renders_marker_only() {
    let data = TrajectoryDataset::new(
        PositionSeries::from_frames(&[vec![Vec3::new(4.0, -2.0, 1.0)]]).unwrap(),
        MassVector::new(vec![5.0]).unwrap(),
    )
    .unwrap();

    let mut surface = RecordingSurface::new();
    let scene = render(&data, &RenderConfig::default(), &mut surface).unwrap();

    assert_eq!(scene.volume.half_extent, 0.0);
    assert_eq!(surface.segments().count(), 0);
    assert_eq!(surface.markers().count(), 1);
    assert!(surface.is_presented());
}

#[test]
fn test_long_history_fade_curve() {
    let config = RenderConfig::default();
    let length = config.trail_length;
    let data = orbiting_pair(400, vec![1.0, 2.0]);
    let scene = compose_scene(&data, &config).unwrap();

    for element in &scene.elements {
        let segments = &element.trail.segments;
        assert_eq!(segments.len(), length - 1);
        for (j, segment) in segments.iter().enumerate() {
            assert_relative_eq!(segment.alpha, j as f32 / length as f32);
        }
        assert_eq!(segments[0].alpha, 0.0);
        assert_relative_eq!(
            segments[length - 2].alpha,
            (length - 2) as f32 / length as f32
        );
    }
}

#[test]
fn test_short_history_never_reaches_full_opacity() {
    let data = orbiting_pair(5, vec![1.0, 2.0]);
    let scene = compose_scene(&data, &RenderConfig::default()).unwrap();

    for element in &scene.elements {
        let alphas: Vec<f32> = element.trail.segments.iter().map(|s| s.alpha).collect();
        assert_eq!(alphas.len(), 4);
        assert!(alphas.iter().all(|&a| a < 1.0));
        assert!(alphas.windows(2).all(|w| w[0] < w[1]));
        assert_relative_eq!(alphas[0], 145.0 / 150.0);
    }
}

#[test]
fn test_axes_are_an_equal_aspect_cube() {
    let data = orbiting_pair(200, vec![1.0, 2.0]);
    let mut surface = RecordingSurface::new();
    render(&data, &RenderConfig::default(), &mut surface).unwrap();

    let volume = match &surface.commands()[0] {
        DrawCommand::Axes { volume, labels } => {
            assert_eq!(labels, &["X".to_string(), "Y".to_string(), "Z".to_string()]);
            *volume
        }
        other => panic!("first call should fix the axes, got {other:?}"),
    };

    let [x, y, z] = volume.all_limits();
    assert_relative_eq!(x.1 - x.0, y.1 - y.0, epsilon = 1e-5);
    assert_relative_eq!(y.1 - y.0, z.1 - z.0, epsilon = 1e-5);
    // x and y span the outer orbit's diameter
    assert_relative_eq!(volume.half_extent, 3.0, epsilon = 0.05);
}

#[test]
fn test_markers_follow_mass_ordering() {
    let data = orbiting_pair(10, vec![1.0, 9.0]);
    let config = RenderConfig::default();
    let mut surface = RecordingSurface::new();
    render(&data, &config, &mut surface).unwrap();

    let sizes: Vec<f32> = surface.markers().map(|m| m.size).collect();
    assert_eq!(sizes, vec![config.min_point_size, config.max_point_size]);
}

#[test]
fn test_rendering_is_deterministic() {
    let data = orbiting_pair(180, vec![0.3, 7.0]);
    let config = RenderConfig {
        trail_length: 40,
        ..Default::default()
    };

    let mut first = RecordingSurface::new();
    let mut second = RecordingSurface::new();
    let scene_a = render(&data, &config, &mut first).unwrap();
    let scene_b = render(&data, &config, &mut second).unwrap();

    assert_eq!(scene_a, scene_b);
    assert_eq!(first.commands(), second.commands());
}

#[test]
fn test_camera_is_set_after_drawing() {
    let data = orbiting_pair(4, vec![1.0, 2.0]);
    let config = RenderConfig {
        elevation: 12.0,
        azimuth: -45.0,
        ..Default::default()
    };
    let mut surface = RecordingSurface::new();
    render(&data, &config, &mut surface).unwrap();

    let commands = surface.commands();
    let n = commands.len();
    match &commands[n - 2] {
        DrawCommand::Camera(camera) => {
            assert_eq!(camera.elevation, 12.0);
            assert_eq!(camera.azimuth, -45.0);
        }
        other => panic!("expected camera before flush, got {other:?}"),
    }
    assert_eq!(commands[n - 1], DrawCommand::Present);
}
