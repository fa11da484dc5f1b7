//! Error types for dataset loading, configuration and rendering
//!
//! Every failure is fail-fast: nothing is retried and no partial image is
//! written. Degenerate numeric input (constant masses, zero-extent positions,
//! short trail history) is not an error and never reaches these types.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Malformed input dataset
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetError {
    /// A named array is absent from the store
    MissingArray(String),
    /// A named array has the wrong number of dimensions
    RankMismatch {
        /// Array name
        name: String,
        /// Expected rank
        expected: usize,
        /// Rank found in the store
        found: usize,
    },
    /// The position array's leading dimension is not x, y, z
    AxisCount(usize),
    /// A named array has a zero-length dimension
    Empty {
        /// Array name
        name: String,
        /// Which dimension is empty
        dimension: &'static str,
    },
    /// Positions and masses disagree on the number of elements
    ElementCountMismatch {
        /// Elements in the position array
        positions: usize,
        /// Entries in the mass array
        masses: usize,
    },
    /// Nested arrays are not rectangular
    Ragged {
        /// Array name
        name: String,
        /// Human-readable location of the first irregular row
        at: String,
    },
    /// An element index outside `[0, N)` was requested
    ElementOutOfRange {
        /// Requested index
        index: usize,
        /// Number of elements
        count: usize,
    },
    /// A timestep index outside `[0, T)` was requested
    TimestepOutOfRange {
        /// Requested index
        index: usize,
        /// Number of timesteps
        count: usize,
    },
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetError::MissingArray(name) => write!(f, "dataset has no '{name}' array"),
            DatasetError::RankMismatch {
                name,
                expected,
                found,
            } => write!(f, "'{name}' must have rank {expected}, found rank {found}"),
            DatasetError::AxisCount(found) => {
                write!(f, "'positions' must have 3 spatial axes, found {found}")
            }
            DatasetError::Empty { name, dimension } => {
                write!(f, "'{name}' has an empty {dimension} dimension")
            }
            DatasetError::ElementCountMismatch { positions, masses } => write!(
                f,
                "positions describe {positions} elements but masses has {masses} entries"
            ),
            DatasetError::Ragged { name, at } => write!(f, "'{name}' is ragged at {at}"),
            DatasetError::ElementOutOfRange { index, count } => {
                write!(f, "element index {index} out of range for {count} elements")
            }
            DatasetError::TimestepOutOfRange { index, count } => {
                write!(f, "timestep {index} out of range for {count} timesteps")
            }
        }
    }
}

impl std::error::Error for DatasetError {}

/// Invalid render configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file
    LoadFailed(String),
    /// Failed to parse the configuration file
    ParseFailed(String),
    /// A field holds a value the renderer cannot use
    InvalidValue {
        /// Offending field
        field: &'static str,
        /// Why it was rejected
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::LoadFailed(msg) => write!(f, "Failed to load config: {msg}"),
            ConfigError::ParseFailed(msg) => write!(f, "Failed to parse config: {msg}"),
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "Invalid config value for {field}: {reason}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Any failure of a single render
#[derive(Debug)]
pub enum RenderError {
    /// Input arrays are malformed
    Dataset(DatasetError),
    /// Render configuration is invalid
    Config(ConfigError),
    /// Reading the dataset or writing the image failed
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying error
        source: io::Error,
    },
    /// The input file type has no reader in this build
    UnsupportedFormat {
        /// File involved
        path: PathBuf,
        /// Why it cannot be read
        reason: String,
    },
    /// The dataset store could not be decoded
    Decode {
        /// File involved
        path: PathBuf,
        /// Decoder message
        message: String,
    },
    /// The drawing backend failed
    Surface(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Dataset(e) => write!(f, "Malformed dataset: {e}"),
            RenderError::Config(e) => write!(f, "{e}"),
            RenderError::Io { path, source } => write!(f, "{}: {source}", path.display()),
            RenderError::UnsupportedFormat { path, reason } => {
                write!(f, "Cannot read {}: {reason}", path.display())
            }
            RenderError::Decode { path, message } => {
                write!(f, "Failed to decode {}: {message}", path.display())
            }
            RenderError::Surface(msg) => write!(f, "Drawing surface failed: {msg}"),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Dataset(e) => Some(e),
            RenderError::Config(e) => Some(e),
            RenderError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<DatasetError> for RenderError {
    fn from(e: DatasetError) -> Self {
        RenderError::Dataset(e)
    }
}

impl From<ConfigError> for RenderError {
    fn from(e: ConfigError) -> Self {
        RenderError::Config(e)
    }
}
