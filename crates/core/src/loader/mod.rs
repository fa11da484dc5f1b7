//! Dataset loading
//!
//! A dataset store exposes two arrays: `positions` (`[3, T, N]`) and
//! `masses` (`[N]`). The whole store is read into memory and closed before
//! any rendering starts. The reader is picked from the file extension.

mod hdf5_store;
mod json;

pub use json::save_json;

use std::path::{Path, PathBuf};
use tracing::info;

use crate::core_types::TrajectoryDataset;
use crate::error::RenderError;

/// Supported dataset stores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetFormat {
    /// HDF5 file with `positions` and `masses` datasets
    Hdf5,
    /// JSON object with `positions` and `masses` keys
    Json,
}

impl DatasetFormat {
    /// Pick the format from a file extension
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedFormat` for unknown or missing extensions
    pub fn from_path(path: &Path) -> Result<Self, RenderError> {
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_ascii_lowercase());
        match extension.as_deref() {
            Some("hdf5" | "h5" | "he5") => Ok(Self::Hdf5),
            Some("json") => Ok(Self::Json),
            _ => Err(RenderError::UnsupportedFormat {
                path: path.to_path_buf(),
                reason: "expected a .hdf5, .h5 or .json dataset".into(),
            }),
        }
    }
}

/// Read a trajectory dataset from disk
///
/// # Errors
///
/// Returns `UnsupportedFormat` for unknown extensions (or HDF5 input in a
/// build without the `hdf5` feature), `Io`/`Decode` when the store cannot be
/// read, and `Dataset` when the arrays are malformed.
pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<TrajectoryDataset, RenderError> {
    let path = path.as_ref();
    let dataset = match DatasetFormat::from_path(path)? {
        DatasetFormat::Hdf5 => hdf5_store::read(path)?,
        DatasetFormat::Json => json::read(path)?,
    };

    info!(
        "Loaded {}: {} timesteps, {} elements",
        path.display(),
        dataset.positions().timesteps(),
        dataset.positions().elements()
    );
    Ok(dataset)
}

fn io_error(path: &Path, source: std::io::Error) -> RenderError {
    RenderError::Io {
        path: PathBuf::from(path),
        source,
    }
}
