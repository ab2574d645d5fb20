//! Collaborator seams for reading and persisting records.
//!
//! The core never touches files itself. A delimited-file reader (or any
//! other producer of field -> value mappings) implements [`RecordSource`];
//! a writer implements [`RecordSink`].

use crate::record::Record;

/// Boxed error returned by collaborators.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Records plus the field order they were produced in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordBatch {
    /// Field labels in source order (e.g. a header row).
    pub field_names: Vec<String>,
    /// Records in source order.
    pub records: Vec<Record>,
}

/// Produces an initial ordered list of records.
pub trait RecordSource {
    /// Reads every record the source holds.
    fn read_records(&mut self) -> Result<RecordBatch, BoxError>;
}

/// Persists records in a given field order.
pub trait RecordSink {
    /// Writes `records`, emitting fields in `field_names` order.
    fn write_records(&mut self, field_names: &[String], records: &[Record])
    -> Result<(), BoxError>;
}

impl RecordSource for RecordBatch {
    fn read_records(&mut self) -> Result<RecordBatch, BoxError> {
        Ok(std::mem::take(self))
    }
}

impl RecordSink for RecordBatch {
    fn write_records(
        &mut self,
        field_names: &[String],
        records: &[Record],
    ) -> Result<(), BoxError> {
        self.field_names = field_names.to_vec();
        self.records = records.to_vec();
        Ok(())
    }
}
