//! Error types for declust-io.

use std::path::PathBuf;

use declust_samples::SamplesError;

/// Error type for all fallible operations in the declust-io crate.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps an error originating from the csv library.
    #[error("csv error: {reason}")]
    Csv {
        /// Description of the underlying csv failure.
        reason: String,
    },

    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Samples error.
    #[error(transparent)]
    Samples(#[from] SamplesError),
}

impl From<csv::Error> for IoError {
    fn from(e: csv::Error) -> Self {
        IoError::Csv {
            reason: e.to_string(),
        }
    }
}
