//! # declust-io
//!
//! Read and write sample collections as delimited text. [`CsvSource`] and
//! [`CsvSink`] plug into the [`RecordSource`](declust_samples::RecordSource)
//! and [`RecordSink`](declust_samples::RecordSink) seams of
//! `declust-samples`; [`read_csv`] and [`write_csv`] cover the common
//! file-to-file case.

mod error;
mod reader;
mod writer;

pub use error::IoError;
pub use reader::{CsvSource, read_csv, read_delimited};
pub use writer::{CsvSink, write_csv, write_delimited};
