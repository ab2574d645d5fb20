//! Euclidean declustering of sample collections.
//!
//! A [`Distance`] projects a [`Samples`](declust_samples::Samples)
//! collection onto numeric columns, builds the full pairwise Euclidean
//! distance matrix and thins spatially over-clustered samples with a
//! greedy proximity filter.
//!
//! | Strategy | Computation | Use case |
//! |----------|-------------|----------|
//! | [`DistanceStrategy::PerRow`] | one row against all rows, per row | Low memory |
//! | [`DistanceStrategy::Broadcast`] | `n × n` difference per dimension | Default |
//!
//! # Quick start
//!
//! ```
//! use declust_distance::{Distance, DistanceStrategy, Reducer};
//! use declust_samples::{Samples, record};
//!
//! let samples = Samples::new(vec![
//!     record([("x", 0.0), ("y", 0.0)]),
//!     record([("x", 0.1), ("y", 0.1)]),
//!     record([("x", 10.0), ("y", 10.0)]),
//! ])
//! .unwrap();
//!
//! let mut distance = Distance::new(samples).unwrap();
//! let centre = distance.centroid(Reducer::Median).unwrap();
//! assert_eq!(centre.to_vec(), vec![0.1, 0.1]);
//!
//! distance.build_distance_matrix(DistanceStrategy::default()).unwrap();
//! let result = distance.proximity_filter(Some(1.0)).unwrap();
//! assert_eq!(result.removed(), [0]);
//! ```
//!
//! # Architecture
//!
//! ```text
//! Distance::with_columns()
//!   └─ project()                    coerce values to an n × d matrix
//! Distance::build_distance_matrix()
//!   └─ fill_distance_matrix()       (euclidean.rs)
//! Distance::proximity_filter()
//!   ├─ neighbor_counts()            (filter.rs)
//!   ├─ removal_set()                (filter.rs)
//!   └─ Samples::selection()         survivors as a new collection
//! ```

pub mod distance;
pub mod error;
pub mod euclidean;
pub mod filter;
pub mod reducer;

pub use distance::{DEFAULT_THRESHOLD_PERCENTILE, Distance};
pub use error::DistanceError;
pub use euclidean::{DistanceStrategy, euclidean};
pub use filter::{FilterResult, neighbor_counts, removal_set};
pub use reducer::Reducer;
