//! Ordered sample-record collections.
//!
//! A [`Samples`] holds records (field -> [`Value`] maps) in a canonical
//! order with one shared field list. It supports column edits, index-based
//! selection and the randomised partitions used for model validation:
//!
//! | Operation | Result |
//! |-----------|--------|
//! | [`Samples::partition`] | `(train, validation)` by percentage |
//! | [`Samples::random_selection`] | `n` samples without replacement |
//! | [`Samples::make_folds`] | `k` disjoint validation folds with complements |
//!
//! Reading and writing files is left to collaborators implementing
//! [`RecordSource`] and [`RecordSink`].
//!
//! # Quick start
//!
//! ```
//! use declust_samples::{Samples, record};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let samples = Samples::new(
//!     (0..10).map(|i| record([("x", i as f64), ("y", 0.0)])).collect(),
//! )
//! .unwrap();
//! let mut rng = StdRng::seed_from_u64(42);
//! let (train, validation) = samples.partition(70.0, &mut rng).unwrap();
//! assert_eq!(train.count() + validation.count(), 10);
//! ```

mod error;
mod partition;
mod record;
mod samples;
mod source;
mod value;

pub use error::SamplesError;
pub use partition::{Fold, fold_sizes};
pub use record::{Record, record};
pub use samples::{Samples, SamplesBuilder};
pub use source::{BoxError, RecordBatch, RecordSink, RecordSource};
pub use value::Value;
