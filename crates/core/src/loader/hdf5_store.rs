//! HDF5 dataset store
//!
//! The simulation writes `positions` as a rank-3 native float dataset and
//! `masses` as a rank-1 native float dataset. Reading links libhdf5, so it
//! is only compiled with the `hdf5` feature (`hdf5-static` builds the
//! library from source).

use std::path::Path;

use crate::core_types::TrajectoryDataset;
use crate::error::RenderError;

#[cfg(feature = "hdf5")]
pub(super) fn read(path: &Path) -> Result<TrajectoryDataset, RenderError> {
    use ndarray::Ix3;

    use crate::error::DatasetError;

    let decode = |e: hdf5::Error| RenderError::Decode {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    // Dropping `file` at the end of this scope closes the store before any
    // rendering starts.
    let file = hdf5::File::open(path).map_err(decode)?;
    for name in ["positions", "masses"] {
        if !file.link_exists(name) {
            return Err(DatasetError::MissingArray(name.into()).into());
        }
    }

    let positions = file.dataset("positions").map_err(decode)?;
    if positions.ndim() != 3 {
        return Err(DatasetError::RankMismatch {
            name: "positions".into(),
            expected: 3,
            found: positions.ndim(),
        }
        .into());
    }
    let positions = positions
        .read_dyn::<f32>()
        .map_err(decode)?
        .into_dimensionality::<Ix3>()
        .map_err(|e| RenderError::Decode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let masses = file.dataset("masses").map_err(decode)?;
    if masses.ndim() != 1 {
        return Err(DatasetError::RankMismatch {
            name: "masses".into(),
            expected: 1,
            found: masses.ndim(),
        }
        .into());
    }
    let masses = masses.read_raw::<f32>().map_err(decode)?;

    Ok(TrajectoryDataset::from_arrays(positions, masses)?)
}

#[cfg(not(feature = "hdf5"))]
pub(super) fn read(path: &Path) -> Result<TrajectoryDataset, RenderError> {
    Err(RenderError::UnsupportedFormat {
        path: path.to_path_buf(),
        reason: "this build has no HDF5 reader, enable the `hdf5` feature or convert to .json"
            .into(),
    })
}

#[cfg(all(test, feature = "hdf5"))]
mod tests {
    use super::*;
    use crate::error::DatasetError;
    use ndarray::{Array1, Array2, Array3};
    use std::path::PathBuf;

    fn temp_store(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("nbody_trails_{name}_{}.hdf5", std::process::id()))
    }

    /// Positions `[3, T, N]` with element `e` at `(t, e, t * e)`
    fn positions(timesteps: usize, elements: usize) -> Array3<f32> {
        Array3::from_shape_fn((3, timesteps, elements), |(axis, t, e)| match axis {
            0 => t as f32,
            1 => e as f32,
            _ => (t * e) as f32,
        })
    }

    #[test]
    fn test_reads_positions_and_masses() {
        let path = temp_store("roundtrip");
        {
            let file = hdf5::File::create(&path).unwrap();
            file.new_dataset_builder()
                .with_data(&positions(4, 3))
                .create("positions")
                .unwrap();
            file.new_dataset_builder()
                .with_data(&Array1::from(vec![1.0_f32, 2.0, 5.0]))
                .create("masses")
                .unwrap();
        }

        let dataset = read(&path).unwrap();
        assert_eq!(dataset.positions().timesteps(), 4);
        assert_eq!(dataset.positions().elements(), 3);
        assert_eq!(dataset.masses().as_slice(), &[1.0, 2.0, 5.0]);
        let p = dataset.positions().position(3, 2);
        assert_eq!((p.x, p.y, p.z), (3.0, 2.0, 6.0));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_rank_and_presence_are_checked() {
        let flat = temp_store("flat_positions");
        {
            let file = hdf5::File::create(&flat).unwrap();
            file.new_dataset_builder()
                .with_data(&Array2::<f32>::zeros((3, 4)))
                .create("positions")
                .unwrap();
            file.new_dataset_builder()
                .with_data(&Array1::from(vec![1.0_f32; 4]))
                .create("masses")
                .unwrap();
        }
        assert!(matches!(
            read(&flat),
            Err(RenderError::Dataset(DatasetError::RankMismatch { expected: 3, found: 2, .. }))
        ));

        let no_masses = temp_store("no_masses");
        {
            let file = hdf5::File::create(&no_masses).unwrap();
            file.new_dataset_builder()
                .with_data(&positions(2, 2))
                .create("positions")
                .unwrap();
        }
        assert!(matches!(
            read(&no_masses),
            Err(RenderError::Dataset(DatasetError::MissingArray(name))) if name == "masses"
        ));

        let _ = std::fs::remove_file(&flat);
        let _ = std::fs::remove_file(&no_masses);
    }
}
