//! Delimited-file record sink.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use tracing::debug;

use declust_samples::{BoxError, Record, RecordSink, Samples};

use crate::error::IoError;

/// Writes a header row followed by one row per record.
///
/// Cells carry no type tag. A `Text` value such as `"007"` is written as
/// `007` and comes back from [`CsvSource`](crate::CsvSource) as `Int(7)`.
#[derive(Debug)]
pub struct CsvSink<W> {
    inner: W,
    delimiter: u8,
}

impl CsvSink<File> {
    /// Creates (or truncates) the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Io`] if the file cannot be created.
    pub fn create(path: &Path) -> Result<Self, IoError> {
        Ok(Self::from_writer(File::create(path)?))
    }
}

impl<W: Write> CsvSink<W> {
    /// Wraps any byte writer.
    pub fn from_writer(inner: W) -> Self {
        Self {
            inner,
            delimiter: b',',
        }
    }

    /// Sets the field delimiter (default `,`).
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Returns the wrapped writer.
    pub fn into_inner(self) -> W {
        self.inner
    }

    /// Writes `records` in `field_names` order. A field missing from a
    /// record is written as an empty cell.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Csv`] if writing fails.
    pub fn write_batch(&mut self, field_names: &[String], records: &[Record]) -> Result<(), IoError> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_writer(&mut self.inner);

        if !field_names.is_empty() {
            writer.write_record(field_names)?;
        }
        for rec in records {
            writer.write_record(field_names.iter().map(|name| {
                rec.get(name).map(ToString::to_string).unwrap_or_default()
            }))?;
        }
        writer.flush()?;
        debug!(
            n_fields = field_names.len(),
            n_records = records.len(),
            "wrote delimited records"
        );
        Ok(())
    }
}

impl<W: Write> RecordSink for CsvSink<W> {
    fn write_records(&mut self, field_names: &[String], records: &[Record]) -> Result<(), BoxError> {
        Ok(self.write_batch(field_names, records)?)
    }
}

/// Writes `samples` to a comma-delimited file at `path`.
///
/// # Errors
///
/// Returns [`IoError::Io`] if the file cannot be created and
/// [`IoError::Samples`] if writing fails.
pub fn write_csv(path: &Path, samples: &Samples) -> Result<(), IoError> {
    write_delimited(path, samples, b',')
}

/// Like [`write_csv`] with a custom field delimiter.
pub fn write_delimited(path: &Path, samples: &Samples, delimiter: u8) -> Result<(), IoError> {
    let mut sink = CsvSink::create(path)?.with_delimiter(delimiter);
    samples.save(&mut sink)?;
    debug!(path = %path.display(), %samples, "saved samples");
    Ok(())
}
