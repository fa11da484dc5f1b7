//! JSON dataset store
//!
//! ```json
//! { "positions": [[[x..N]..T], [[y..N]..T], [[z..N]..T]], "masses": [m..N] }
//! ```

use ndarray::Array3;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::io_error;
use crate::core_types::{TrajectoryDataset, AXIS_COUNT};
use crate::error::{DatasetError, RenderError};

#[derive(Debug, Serialize, Deserialize)]
struct RawDataset {
    positions: Option<Vec<Vec<Vec<f32>>>>,
    masses: Option<Vec<f32>>,
}

/// Read and validate a JSON dataset
pub(super) fn read(path: &Path) -> Result<TrajectoryDataset, RenderError> {
    let contents = fs::read_to_string(path).map_err(|e| io_error(path, e))?;
    let raw: RawDataset = serde_json::from_str(&contents).map_err(|e| RenderError::Decode {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let positions = raw
        .positions
        .ok_or_else(|| DatasetError::MissingArray("positions".into()))?;
    let masses = raw
        .masses
        .ok_or_else(|| DatasetError::MissingArray("masses".into()))?;

    Ok(TrajectoryDataset::from_arrays(to_array(&positions)?, masses)?)
}

/// Flatten `[axis][timestep][element]` nesting into a `[3, T, N]` array
fn to_array(nested: &[Vec<Vec<f32>>]) -> Result<Array3<f32>, DatasetError> {
    if nested.len() != AXIS_COUNT {
        return Err(DatasetError::AxisCount(nested.len()));
    }
    let timesteps = nested[0].len();
    let elements = nested[0].first().map_or(0, Vec::len);

    let mut flat = Vec::with_capacity(AXIS_COUNT * timesteps * elements);
    for (axis, rows) in nested.iter().enumerate() {
        if rows.len() != timesteps {
            return Err(DatasetError::Ragged {
                name: "positions".into(),
                at: format!("axis {axis}"),
            });
        }
        for (t, row) in rows.iter().enumerate() {
            if row.len() != elements {
                return Err(DatasetError::Ragged {
                    name: "positions".into(),
                    at: format!("axis {axis}, timestep {t}"),
                });
            }
            flat.extend_from_slice(row);
        }
    }

    Array3::from_shape_vec((AXIS_COUNT, timesteps, elements), flat).map_err(|e| {
        DatasetError::Ragged {
            name: "positions".into(),
            at: e.to_string(),
        }
    })
}

/// Write a dataset in the JSON store format, overwriting `path`
///
/// # Errors
///
/// Returns `Io` if the file cannot be written
pub fn save_json<P: AsRef<Path>>(dataset: &TrajectoryDataset, path: P) -> Result<(), RenderError> {
    let path = path.as_ref();
    let array = dataset.positions().as_array();
    let positions: Vec<Vec<Vec<f32>>> = array
        .outer_iter()
        .map(|axis| axis.outer_iter().map(|row| row.to_vec()).collect())
        .collect();
    let raw = RawDataset {
        positions: Some(positions),
        masses: Some(dataset.masses().as_slice().to_vec()),
    };
    let contents = serde_json::to_string(&raw).map_err(|e| RenderError::Decode {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    fs::write(path, contents).map_err(|e| io_error(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::Vec3;
    use std::path::PathBuf;

    fn temp_json(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("nbody_trails_{name}_{}.json", std::process::id()))
    }

    fn write(name: &str, contents: &str) -> PathBuf {
        let path = temp_json(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_reads_axis_major_layout() {
        // 2 timesteps, 2 elements
        let path = write(
            "layout",
            r#"{
                "positions": [
                    [[0.0, 1.0], [2.0, 3.0]],
                    [[4.0, 5.0], [6.0, 7.0]],
                    [[8.0, 9.0], [10.0, 11.0]]
                ],
                "masses": [1.0, 2.0]
            }"#,
        );
        let dataset = read(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(dataset.positions().timesteps(), 2);
        assert_eq!(dataset.positions().elements(), 2);
        assert_eq!(dataset.positions().position(1, 0), Vec3::new(2.0, 6.0, 10.0));
        assert_eq!(dataset.positions().position(0, 1), Vec3::new(1.0, 5.0, 9.0));
        assert_eq!(dataset.masses().as_slice(), &[1.0, 2.0]);
    }

    #[test]
    fn test_missing_masses() {
        let path = write("no_masses", r#"{ "positions": [[[0.0]], [[0.0]], [[0.0]]] }"#);
        let err = read(&path).unwrap_err();
        let _ = fs::remove_file(&path);
        assert!(matches!(
            err,
            RenderError::Dataset(DatasetError::MissingArray(ref name)) if name == "masses"
        ));
    }

    #[test]
    fn test_element_count_mismatch() {
        let path = write(
            "mismatch",
            r#"{ "positions": [[[0.0]], [[0.0]], [[0.0]]], "masses": [1.0, 2.0] }"#,
        );
        let err = read(&path).unwrap_err();
        let _ = fs::remove_file(&path);
        assert!(matches!(
            err,
            RenderError::Dataset(DatasetError::ElementCountMismatch {
                positions: 1,
                masses: 2
            })
        ));
    }

    #[test]
    fn test_ragged_and_wrong_axes() {
        let ragged = vec![
            vec![vec![0.0, 1.0]],
            vec![vec![0.0]],
            vec![vec![0.0, 1.0]],
        ];
        assert!(matches!(
            to_array(&ragged),
            Err(DatasetError::Ragged { .. })
        ));

        let two_axes = vec![vec![vec![0.0]], vec![vec![0.0]]];
        assert_eq!(to_array(&two_axes).unwrap_err(), DatasetError::AxisCount(2));
    }

    #[test]
    fn test_wrong_rank_is_decode_error() {
        let path = write("rank", r#"{ "positions": [[0.0, 1.0]], "masses": [1.0] }"#);
        let err = read(&path).unwrap_err();
        let _ = fs::remove_file(&path);
        assert!(matches!(err, RenderError::Decode { .. }));
    }

    #[test]
    fn test_save_then_load() {
        let path = temp_json("save");
        let original = TrajectoryDataset::from_arrays(
            Array3::from_shape_fn((3, 4, 2), |(a, t, e)| (a * 100 + t * 10 + e) as f32),
            vec![0.5, 2.5],
        )
        .unwrap();

        save_json(&original, &path).unwrap();
        let loaded = read(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(loaded, original);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = read(Path::new("/nonexistent/nbody_trails.json")).unwrap_err();
        assert!(matches!(err, RenderError::Io { .. }));
    }
}
