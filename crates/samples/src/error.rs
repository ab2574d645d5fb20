//! Error types for the declust-samples crate.

use crate::source::BoxError;

/// Error type for all fallible operations in the declust-samples crate.
#[derive(Debug, thiserror::Error)]
pub enum SamplesError {
    /// Returned when both explicit records and a record source are supplied.
    #[error("ambiguous input: supply either records or a record source, not both")]
    AmbiguousInput,

    /// Returned when a record does not carry exactly the collection's fields.
    #[error("record {row} does not match the field list ({expected} fields expected, got {got})")]
    SchemaMismatch {
        /// Row of the offending record.
        row: usize,
        /// Number of fields in the field list.
        expected: usize,
        /// Number of matching fields found in the record.
        got: usize,
    },

    /// Returned when two collections with different field lists are merged.
    #[error("field lists differ: {left:?} vs {right:?}")]
    FieldListMismatch {
        /// Field list of the receiving collection.
        left: Vec<String>,
        /// Field list of the merged collection.
        right: Vec<String>,
    },

    /// Returned when a required argument is empty.
    #[error("no argument for {operation} operation")]
    MissingArgument {
        /// Name of the operation missing its argument.
        operation: &'static str,
    },

    /// Returned when a field name is not part of the collection.
    #[error("unknown field: {name:?}")]
    UnknownField {
        /// The missing field name.
        name: String,
    },

    /// Returned when a field name is already taken.
    #[error("duplicate field: {name:?}")]
    DuplicateField {
        /// The duplicated field name.
        name: String,
    },

    /// Returned when a sequence length does not match the collection.
    #[error("{field}: expected {expected} elements, got {got}")]
    LengthMismatch {
        /// Name of the mismatched input.
        field: &'static str,
        /// Expected length.
        expected: usize,
        /// Actual length.
        got: usize,
    },

    /// Returned when a partition percentage is outside `[0, 100]`.
    #[error("percentage must be within [0, 100], got {percentage}")]
    InvalidPercentage {
        /// The invalid percentage.
        percentage: f64,
    },

    /// Returned when a selection index is outside the collection.
    #[error("index {index} out of bounds for {count} samples")]
    IndexOutOfBounds {
        /// The offending index.
        index: usize,
        /// Number of samples in the collection.
        count: usize,
    },

    /// Returned when the fold count is zero.
    #[error("cannot make {k} folds from {count} samples")]
    InvalidFoldCount {
        /// Requested number of folds.
        k: usize,
        /// Number of samples in the collection.
        count: usize,
    },

    /// Wraps a failure of the record source collaborator.
    #[error("record source failed: {0}")]
    Source(#[source] BoxError),

    /// Wraps a failure of the record sink collaborator.
    #[error("record sink failed: {0}")]
    Sink(#[source] BoxError),
}
