//! Error types for the declust-distance crate.

use declust_samples::SamplesError;

/// Error type for all fallible operations in the declust-distance crate.
#[derive(Debug, thiserror::Error)]
pub enum DistanceError {
    /// Returned when a projected column is not a field of the collection.
    #[error("unknown column: {name:?}")]
    UnknownColumn {
        /// The missing column name.
        name: String,
    },

    /// Returned when a projected value cannot be coerced to a number.
    #[error("non-numeric value {value:?} in column {column:?} at row {row}")]
    NonNumeric {
        /// Row of the offending record.
        row: usize,
        /// Column being projected.
        column: String,
        /// Text of the offending value.
        value: String,
    },

    /// Returned when a projected value is NaN or infinite.
    #[error("non-finite value in column {column:?} at row {row}")]
    NonFinite {
        /// Row of the offending record.
        row: usize,
        /// Column being projected.
        column: String,
    },

    /// Returned when a matrix operation is attempted on an empty collection.
    #[error("sample matrix not found: collection is empty")]
    EmptyMatrix,

    /// Returned when a reducer name is not recognised.
    #[error("invalid or no reducer: {method:?}")]
    UnknownReducer {
        /// The unrecognised method string.
        method: String,
    },

    /// Returned when a percentile is outside `[0, 100]`.
    #[error("percentile must be within [0, 100], got {q}")]
    InvalidPercentile {
        /// The invalid percentile.
        q: f64,
    },

    /// Returned when a distance-matrix strategy name is not recognised.
    #[error("unknown distance strategy: {name:?}")]
    UnknownStrategy {
        /// The unrecognised strategy name.
        name: String,
    },

    /// Returned when filtering is attempted before the matrix is built.
    #[error("distance matrix has not been built")]
    MatrixNotBuilt,

    /// Returned when a proximity threshold is non-finite or not positive.
    #[error("threshold must be finite and positive, got {threshold}")]
    InvalidThreshold {
        /// The invalid threshold.
        threshold: f64,
    },

    /// Returned when no threshold is given and the default cannot be
    /// reduced to a single distance.
    #[error(
        "default threshold is a {n_dims}-dimensional percentile vector, not a distance; \
         supply an explicit threshold"
    )]
    AmbiguousThreshold {
        /// Number of projected dimensions.
        n_dims: usize,
    },

    /// Samples error.
    #[error(transparent)]
    Samples(#[from] SamplesError),
}
