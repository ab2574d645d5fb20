//! The record collection: construction, column operations and selection.

use std::fmt;
use std::sync::Arc;

use ndarray::ArrayView2;
use tracing::{debug, warn};

use crate::error::SamplesError;
use crate::record::{Record, schema_gap};
use crate::source::{RecordSink, RecordSource};
use crate::value::Value;

const ADDED_COLUMN_PREFIX: &str = "added_column_";

/// Ordered collection of records sharing one field list.
///
/// Record order is the canonical sample order and `index()` is always
/// `0..count()`. Every record carries exactly the fields in
/// `field_names()`. Derived collections (selections, partitions, folds)
/// share the field list with their parent until either side changes its
/// columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Samples {
    records: Vec<Record>,
    field_names: Arc<Vec<String>>,
    index: Vec<usize>,
}

/// Builder for [`Samples`].
///
/// At most one of [`with_records`](Self::with_records) and
/// [`with_source`](Self::with_source) may be used. With neither, an empty
/// collection is built.
///
/// # Example
///
/// ```
/// use declust_samples::{SamplesBuilder, record};
///
/// let samples = SamplesBuilder::new()
///     .with_records(vec![record([("x", 1.0), ("y", 2.0)])])
///     .build()
///     .unwrap();
/// assert_eq!(samples.field_names(), ["x", "y"]);
/// ```
#[derive(Default)]
pub struct SamplesBuilder<'a> {
    records: Option<Vec<Record>>,
    source: Option<Box<dyn RecordSource + 'a>>,
    field_names: Option<Vec<String>>,
}

impl<'a> SamplesBuilder<'a> {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses an explicit record sequence.
    pub fn with_records(mut self, records: Vec<Record>) -> Self {
        self.records = Some(records);
        self
    }

    /// Reads records from a collaborator when [`build`](Self::build) runs.
    pub fn with_source(mut self, source: impl RecordSource + 'a) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Overrides the field list instead of inferring it.
    pub fn with_field_names<S: Into<String>>(
        mut self,
        names: impl IntoIterator<Item = S>,
    ) -> Self {
        self.field_names = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Builds the collection.
    ///
    /// The field list is, in order of preference: the explicit override, the
    /// source's own field order, the keys of the first record.
    ///
    /// # Errors
    ///
    /// Returns [`SamplesError::AmbiguousInput`] if both records and a source
    /// were given, [`SamplesError::Source`] if the source fails,
    /// [`SamplesError::DuplicateField`] for a repeated field name and
    /// [`SamplesError::SchemaMismatch`] if a record does not carry exactly
    /// the field list.
    pub fn build(self) -> Result<Samples, SamplesError> {
        let (records, source_fields) = match (self.records, self.source) {
            (Some(_), Some(_)) => return Err(SamplesError::AmbiguousInput),
            (Some(records), None) => (records, None),
            (None, Some(mut source)) => {
                let batch = source.read_records().map_err(SamplesError::Source)?;
                (batch.records, Some(batch.field_names))
            }
            (None, None) => {
                warn!("empty sample collection initialised");
                (Vec::new(), None)
            }
        };

        let field_names = self
            .field_names
            .or(source_fields)
            .or_else(|| records.first().map(|r| r.keys().cloned().collect()))
            .unwrap_or_default();

        for (i, name) in field_names.iter().enumerate() {
            if field_names[..i].contains(name) {
                return Err(SamplesError::DuplicateField { name: name.clone() });
            }
        }
        for (row, rec) in records.iter().enumerate() {
            if let Some(got) = schema_gap(rec, &field_names) {
                return Err(SamplesError::SchemaMismatch {
                    row,
                    expected: field_names.len(),
                    got,
                });
            }
        }

        Ok(Samples::from_parts(records, Arc::new(field_names)))
    }
}

impl Samples {
    /// Builds a collection from explicit records, inferring the field list
    /// from the first record.
    ///
    /// # Errors
    ///
    /// See [`SamplesBuilder::build`].
    pub fn new(records: Vec<Record>) -> Result<Self, SamplesError> {
        SamplesBuilder::new().with_records(records).build()
    }

    /// An empty, field-less collection.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds one record per row of `matrix`, zipping each row with `header`.
    ///
    /// # Errors
    ///
    /// Returns [`SamplesError::LengthMismatch`] if `header` does not have one
    /// label per column, or [`SamplesError::DuplicateField`] if a label
    /// repeats.
    pub fn from_array<S: AsRef<str>>(
        matrix: ArrayView2<'_, f64>,
        header: &[S],
    ) -> Result<Self, SamplesError> {
        if header.len() != matrix.ncols() {
            return Err(SamplesError::LengthMismatch {
                field: "header",
                expected: matrix.ncols(),
                got: header.len(),
            });
        }
        let names: Vec<String> = header.iter().map(|h| h.as_ref().to_string()).collect();
        let records: Vec<Record> = matrix
            .rows()
            .into_iter()
            .map(|row| {
                names
                    .iter()
                    .cloned()
                    .zip(row.iter().map(|&v| Value::Float(v)))
                    .collect()
            })
            .collect();
        SamplesBuilder::new()
            .with_records(records)
            .with_field_names(names)
            .build()
    }

    fn from_parts(records: Vec<Record>, field_names: Arc<Vec<String>>) -> Self {
        let index = (0..records.len()).collect();
        Self {
            records,
            field_names,
            index,
        }
    }

    /// New collection over `records` sharing this collection's field list.
    pub(crate) fn derive(&self, records: Vec<Record>) -> Self {
        Self::from_parts(records, Arc::clone(&self.field_names))
    }

    /// Derives a collection from indices already known to be in range.
    pub(crate) fn pick(&self, indices: &[usize]) -> Self {
        self.derive(indices.iter().map(|&i| self.records[i].clone()).collect())
    }

    /// Records in sample order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Record at position `i`.
    pub fn get(&self, i: usize) -> Option<&Record> {
        self.records.get(i)
    }

    /// Field labels in column order.
    pub fn field_names(&self) -> &[String] {
        &self.field_names
    }

    /// Sample handles, always `0..count()`.
    pub fn index(&self) -> &[usize] {
        &self.index
    }

    /// Number of samples.
    pub fn count(&self) -> usize {
        self.records.len()
    }

    /// Number of fields.
    pub fn field_count(&self) -> usize {
        self.field_names.len()
    }

    /// Returns `true` if the collection holds no samples.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Appends the records of `other`.
    ///
    /// An empty, field-less receiver adopts the field list of `other`.
    ///
    /// # Errors
    ///
    /// Returns [`SamplesError::FieldListMismatch`] if the two field lists
    /// differ in content or order.
    pub fn merge(&mut self, other: &Samples) -> Result<(), SamplesError> {
        if self.is_empty() && self.field_names.is_empty() {
            self.field_names = Arc::clone(&other.field_names);
        } else if self.field_names != other.field_names {
            return Err(SamplesError::FieldListMismatch {
                left: self.field_names.to_vec(),
                right: other.field_names.to_vec(),
            });
        }
        self.records.extend(other.records.iter().cloned());
        self.index = (0..self.records.len()).collect();
        debug!(count = self.count(), added = other.count(), "merged samples");
        Ok(())
    }

    /// Removes a field from every record and from the field list.
    ///
    /// # Errors
    ///
    /// Returns [`SamplesError::MissingArgument`] for an empty name and
    /// [`SamplesError::UnknownField`] if no such field exists.
    pub fn delete_column(&mut self, name: &str) -> Result<(), SamplesError> {
        let pos = self.position("delete", name)?;
        for rec in &mut self.records {
            rec.shift_remove(name);
        }
        Arc::make_mut(&mut self.field_names).remove(pos);
        debug!(column = name, "deleted column");
        Ok(())
    }

    /// Values of one field across all records, in sample order.
    ///
    /// # Errors
    ///
    /// Returns [`SamplesError::MissingArgument`] for an empty name and
    /// [`SamplesError::UnknownField`] if no such field exists.
    pub fn extract_column(&self, name: &str) -> Result<Vec<&Value>, SamplesError> {
        self.position("extract", name)?;
        self.records
            .iter()
            .map(|rec| {
                rec.get(name).ok_or_else(|| SamplesError::UnknownField {
                    name: name.to_string(),
                })
            })
            .collect()
    }

    /// Appends a field to every record and returns its name.
    ///
    /// Without a name the next free `added_column_<k>` label is used.
    ///
    /// # Errors
    ///
    /// Returns [`SamplesError::LengthMismatch`] unless there is exactly one
    /// value per sample, [`SamplesError::MissingArgument`] for an empty name
    /// and [`SamplesError::DuplicateField`] if the name is taken.
    pub fn add_column(
        &mut self,
        name: Option<&str>,
        values: Vec<Value>,
    ) -> Result<String, SamplesError> {
        if values.len() != self.count() {
            return Err(SamplesError::LengthMismatch {
                field: "values",
                expected: self.count(),
                got: values.len(),
            });
        }
        let name = match name {
            Some("") => return Err(SamplesError::MissingArgument { operation: "add" }),
            Some(n) => n.to_string(),
            None => self.next_added_column_name(),
        };
        if self.field_names.contains(&name) {
            return Err(SamplesError::DuplicateField { name });
        }

        self.records = self
            .records
            .iter()
            .zip(values)
            .map(|(rec, value)| {
                let mut out = rec.clone();
                out.insert(name.clone(), value);
                out
            })
            .collect();
        Arc::make_mut(&mut self.field_names).push(name.clone());
        debug!(column = %name, "added column");
        Ok(name)
    }

    fn next_added_column_name(&self) -> String {
        let next = self
            .field_names
            .iter()
            .filter_map(|f| f.strip_prefix(ADDED_COLUMN_PREFIX))
            .filter_map(|k| k.parse::<usize>().ok())
            .max()
            .map_or(1, |k| k + 1);
        format!("{ADDED_COLUMN_PREFIX}{next}")
    }

    fn position(&self, operation: &'static str, name: &str) -> Result<usize, SamplesError> {
        if name.is_empty() {
            return Err(SamplesError::MissingArgument { operation });
        }
        self.field_names
            .iter()
            .position(|f| f == name)
            .ok_or_else(|| SamplesError::UnknownField {
                name: name.to_string(),
            })
    }

    /// Hands records and field order to a persistence collaborator.
    ///
    /// # Errors
    ///
    /// Returns [`SamplesError::Sink`] if the collaborator fails.
    pub fn save(&self, sink: &mut dyn RecordSink) -> Result<(), SamplesError> {
        sink.write_records(&self.field_names, &self.records)
            .map_err(SamplesError::Sink)
    }

    /// New collection holding exactly the records at `indices`, in that
    /// order. Indices may repeat.
    ///
    /// # Errors
    ///
    /// Returns [`SamplesError::IndexOutOfBounds`] for an index outside
    /// `0..count()`.
    pub fn selection<I>(&self, indices: I) -> Result<Samples, SamplesError>
    where
        I: IntoIterator<Item = usize>,
    {
        let records = indices
            .into_iter()
            .map(|i| {
                self.records
                    .get(i)
                    .cloned()
                    .ok_or(SamplesError::IndexOutOfBounds {
                        index: i,
                        count: self.count(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.derive(records))
    }
}

impl fmt::Display for Samples {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "<Samples: empty>")
        } else {
            write!(
                f,
                "<Samples with {} variables, {} samples>",
                self.field_count(),
                self.count()
            )
        }
    }
}
