//! Delimited-file record source.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use declust_samples::{BoxError, Record, RecordBatch, RecordSource, Samples, SamplesBuilder, Value};

use crate::error::IoError;

/// Reads records from delimited text with a header row.
///
/// The header gives the field order. Every cell is coerced with
/// [`Value::parse`]. Rows whose length differs from the header are rejected.
#[derive(Debug)]
pub struct CsvSource<R> {
    inner: R,
    delimiter: u8,
}

impl CsvSource<File> {
    /// Opens the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::FileNotFound`] if `path` does not exist, or
    /// [`IoError::Io`] if it cannot be opened.
    pub fn from_path(path: &Path) -> Result<Self, IoError> {
        if !path.exists() {
            return Err(IoError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        Ok(Self::from_reader(File::open(path)?))
    }
}

impl<R: Read> CsvSource<R> {
    /// Wraps any byte reader.
    pub fn from_reader(inner: R) -> Self {
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

    /// Parses header and rows.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Csv`] for malformed input or ragged rows.
    pub fn read_batch(&mut self) -> Result<RecordBatch, IoError> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .from_reader(&mut self.inner);

        let field_names: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            let rec: Record = field_names
                .iter()
                .zip(row.iter())
                .map(|(name, cell)| (name.clone(), Value::parse(cell)))
                .collect();
            records.push(rec);
        }
        debug!(
            n_fields = field_names.len(),
            n_records = records.len(),
            "read delimited records"
        );

        Ok(RecordBatch {
            field_names,
            records,
        })
    }
}

impl<R: Read> RecordSource for CsvSource<R> {
    fn read_records(&mut self) -> Result<RecordBatch, BoxError> {
        Ok(self.read_batch()?)
    }
}

/// Reads a comma-delimited file into a [`Samples`] collection.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] for a missing file and
/// [`IoError::Samples`] when parsing or construction fails.
pub fn read_csv(path: &Path) -> Result<Samples, IoError> {
    read_delimited(path, b',')
}

/// Like [`read_csv`] with a custom field delimiter.
pub fn read_delimited(path: &Path, delimiter: u8) -> Result<Samples, IoError> {
    let source = CsvSource::from_path(path)?.with_delimiter(delimiter);
    let samples = SamplesBuilder::new().with_source(source).build()?;
    debug!(path = %path.display(), %samples, "loaded samples");
    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerces_cells() {
        let data = "name,x,flag\nA,1,true\nB,0.5,false\n";
        let batch = CsvSource::from_reader(data.as_bytes()).read_batch().unwrap();
        assert_eq!(batch.field_names, ["name", "x", "flag"]);
        assert_eq!(batch.records.len(), 2);
        assert_eq!(batch.records[0]["name"], Value::from("A"));
        assert_eq!(batch.records[0]["x"], Value::Int(1));
        assert_eq!(batch.records[1]["x"], Value::Float(0.5));
        assert_eq!(batch.records[1]["flag"], Value::Bool(false));
    }

    #[test]
    fn record_keeps_header_order() {
        let data = "z,a,m\n1,2,3\n";
        let batch = CsvSource::from_reader(data.as_bytes()).read_batch().unwrap();
        let keys: Vec<_> = batch.records[0].keys().cloned().collect();
        assert_eq!(keys, ["z", "a", "m"]);
    }

    #[test]
    fn custom_delimiter() {
        let data = "x;y\n1;2\n";
        let batch = CsvSource::from_reader(data.as_bytes())
            .with_delimiter(b';')
            .read_batch()
            .unwrap();
        assert_eq!(batch.field_names, ["x", "y"]);
        assert_eq!(batch.records[0]["y"], Value::Int(2));
    }

    #[test]
    fn ragged_row_is_rejected() {
        let data = "x,y\n1,2\n3\n";
        let result = CsvSource::from_reader(data.as_bytes()).read_batch();
        assert!(matches!(result, Err(IoError::Csv { .. })));
    }

    #[test]
    fn empty_input_gives_empty_batch() {
        let batch = CsvSource::from_reader("".as_bytes()).read_batch().unwrap();
        assert!(batch.field_names.is_empty());
        assert!(batch.records.is_empty());
    }

    #[test]
    fn missing_file() {
        let result = CsvSource::from_path(Path::new("/nonexistent/samples.csv"));
        assert!(matches!(result, Err(IoError::FileNotFound { .. })));
    }
}
