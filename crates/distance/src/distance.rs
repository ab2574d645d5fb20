//! Numeric projection of a sample collection plus its distance matrix.

use ndarray::{Array1, Array2, Axis};
use tracing::{debug, info, warn};

use declust_samples::Samples;

use crate::error::DistanceError;
use crate::euclidean::{DistanceStrategy, fill_distance_matrix};
use crate::filter::{FilterResult, neighbor_counts, removal_set_with_counts};
use crate::reducer::Reducer;

/// Percentile used when [`Distance::proximity_filter`] gets no threshold.
pub const DEFAULT_THRESHOLD_PERCENTILE: f64 = 90.0;

/// A sample collection projected onto numeric columns.
///
/// Construction coerces every selected field to `f64` and allocates a zero
/// `n × n` distance matrix (only when the collection is non-empty). The
/// matrix is filled by [`build_distance_matrix`](Self::build_distance_matrix).
/// Filtering never mutates `self`; build a new `Distance` from
/// [`FilterResult::into_samples`] for further distance work.
///
/// # Example
///
/// ```
/// use declust_distance::{Distance, DistanceStrategy};
/// use declust_samples::{Samples, record};
///
/// let samples = Samples::new(vec![
///     record([("x", 0.0), ("y", 0.0)]),
///     record([("x", 0.1), ("y", 0.1)]),
///     record([("x", 10.0), ("y", 10.0)]),
///     record([("x", 10.1), ("y", 10.1)]),
/// ])
/// .unwrap();
///
/// let mut distance = Distance::new(samples).unwrap();
/// distance.build_distance_matrix(DistanceStrategy::Broadcast).unwrap();
/// let result = distance.proximity_filter(Some(1.0)).unwrap();
/// assert_eq!(result.samples().count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Distance {
    samples: Samples,
    columns: Vec<String>,
    matrix: Option<Array2<f64>>,
    distance_matrix: Option<Array2<f64>>,
    built: bool,
}

impl Distance {
    /// Projects every field of `samples`.
    ///
    /// # Errors
    ///
    /// See [`Distance::with_columns`].
    pub fn new(samples: Samples) -> Result<Self, DistanceError> {
        let columns = samples.field_names().to_vec();
        Self::with_columns(samples, &columns)
    }

    /// Projects the named columns of `samples`, in the given order.
    ///
    /// # Errors
    ///
    /// Returns [`DistanceError::UnknownColumn`] for a column the collection
    /// lacks, [`DistanceError::NonNumeric`] for a value that does not coerce
    /// to a number and [`DistanceError::NonFinite`] for NaN or infinity.
    pub fn with_columns<S: AsRef<str>>(
        samples: Samples,
        columns: &[S],
    ) -> Result<Self, DistanceError> {
        let columns: Vec<String> = columns.iter().map(|c| c.as_ref().to_string()).collect();
        for c in &columns {
            if !samples.field_names().contains(c) {
                return Err(DistanceError::UnknownColumn { name: c.clone() });
            }
        }

        let n = samples.count();
        let (matrix, distance_matrix) = if n == 0 {
            (None, None)
        } else {
            (
                Some(project(&samples, &columns)?),
                Some(Array2::zeros((n, n))),
            )
        };
        debug!(n_samples = n, n_dims = columns.len(), "projected samples");

        Ok(Self {
            samples,
            columns,
            matrix,
            distance_matrix,
            built: false,
        })
    }

    /// The underlying collection.
    pub fn samples(&self) -> &Samples {
        &self.samples
    }

    /// Consumes `self` and returns the underlying collection.
    pub fn into_samples(self) -> Samples {
        self.samples
    }

    /// Projected column names.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of samples.
    pub fn count(&self) -> usize {
        self.samples.count()
    }

    /// Number of projected dimensions.
    pub fn n_dims(&self) -> usize {
        self.columns.len()
    }

    /// `count × n_dims` projection, `None` for an empty collection.
    pub fn matrix(&self) -> Option<&Array2<f64>> {
        self.matrix.as_ref()
    }

    /// `count × count` distance matrix, `None` for an empty collection.
    /// All zeros until [`build_distance_matrix`](Self::build_distance_matrix) runs.
    pub fn distance_matrix(&self) -> Option<&Array2<f64>> {
        self.distance_matrix.as_ref()
    }

    /// Returns `true` once the distance matrix has been computed.
    pub fn is_built(&self) -> bool {
        self.built
    }

    /// Column-wise reduction of the projection.
    ///
    /// # Errors
    ///
    /// Returns [`DistanceError::EmptyMatrix`] for an empty collection and
    /// [`DistanceError::InvalidPercentile`] for a percentile outside
    /// `[0, 100]`.
    pub fn centroid(&self, reducer: Reducer) -> Result<Array1<f64>, DistanceError> {
        reducer.validate()?;
        let matrix = self.matrix.as_ref().ok_or(DistanceError::EmptyMatrix)?;
        Ok(matrix
            .axis_iter(Axis(1))
            .map(|col| reducer.reduce(&col.to_vec()))
            .collect())
    }

    /// Computes all pairwise Euclidean distances.
    ///
    /// # Errors
    ///
    /// Returns [`DistanceError::EmptyMatrix`] for an empty collection.
    #[tracing::instrument(skip(self), fields(n_samples = self.count()))]
    pub fn build_distance_matrix(
        &mut self,
        strategy: DistanceStrategy,
    ) -> Result<(), DistanceError> {
        let (Some(matrix), Some(out)) = (self.matrix.as_ref(), self.distance_matrix.as_mut())
        else {
            return Err(DistanceError::EmptyMatrix);
        };
        info!(%strategy, "building distance matrix");
        fill_distance_matrix(matrix.view(), strategy, out.view_mut());
        self.built = true;
        Ok(())
    }

    /// Removes over-clustered samples and returns the survivors.
    ///
    /// With `None`, the threshold falls back to the 90th-percentile
    /// centroid. That is a per-dimension vector, so it is only accepted for
    /// one-dimensional projections; pass an explicit distance otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`DistanceError::MatrixNotBuilt`] before
    /// [`build_distance_matrix`](Self::build_distance_matrix),
    /// [`DistanceError::InvalidThreshold`] for a non-finite or non-positive
    /// threshold and [`DistanceError::AmbiguousThreshold`] when the default
    /// cannot be reduced to one distance.
    #[tracing::instrument(skip(self), fields(n_samples = self.count()))]
    pub fn proximity_filter(&self, threshold: Option<f64>) -> Result<FilterResult, DistanceError> {
        let distances = match (&self.distance_matrix, self.built) {
            (Some(d), true) => d,
            _ => return Err(DistanceError::MatrixNotBuilt),
        };
        let threshold = match threshold {
            Some(t) => t,
            None => self.default_threshold()?,
        };
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(DistanceError::InvalidThreshold { threshold });
        }

        let counts = neighbor_counts(distances.view(), threshold);
        info!(
            min = counts.iter().min().copied().unwrap_or(0),
            max = counts.iter().max().copied().unwrap_or(0),
            "neighbor group sizes"
        );

        let removed = removal_set_with_counts(distances.view(), threshold, &counts);
        let mut keep = vec![true; self.count()];
        for &i in &removed {
            keep[i] = false;
        }
        let survivors = self
            .samples
            .selection((0..self.count()).filter(|&i| keep[i]))?;
        info!(
            removed = removed.len(),
            remaining = survivors.count(),
            "removed elements"
        );

        Ok(FilterResult::new(survivors, removed, threshold, counts))
    }

    fn default_threshold(&self) -> Result<f64, DistanceError> {
        let centroid = self.centroid(Reducer::Percentile(DEFAULT_THRESHOLD_PERCENTILE))?;
        match centroid.as_slice() {
            Some(&[t]) => {
                warn!(threshold = t, "no threshold given, using 90th percentile of the only dimension");
                Ok(t)
            }
            _ => Err(DistanceError::AmbiguousThreshold {
                n_dims: centroid.len(),
            }),
        }
    }
}

/// Coerces the named columns of every record to `f64`.
fn project(samples: &Samples, columns: &[String]) -> Result<Array2<f64>, DistanceError> {
    let mut out = Array2::zeros((samples.count(), columns.len()));
    for (row, rec) in samples.records().iter().enumerate() {
        for (c, column) in columns.iter().enumerate() {
            let value = rec.get(column).ok_or_else(|| DistanceError::UnknownColumn {
                name: column.clone(),
            })?;
            let v = value.as_f64().ok_or_else(|| DistanceError::NonNumeric {
                row,
                column: column.clone(),
                value: value.to_string(),
            })?;
            if !v.is_finite() {
                return Err(DistanceError::NonFinite {
                    row,
                    column: column.clone(),
                });
            }
            out[[row, c]] = v;
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use declust_samples::{Value, record};

    fn four_points() -> Samples {
        Samples::new(vec![
            record([("x", 0.0), ("y", 0.0)]),
            record([("x", 0.1), ("y", 0.1)]),
            record([("x", 10.0), ("y", 10.0)]),
            record([("x", 10.1), ("y", 10.1)]),
        ])
        .unwrap()
    }

    #[test]
    fn test_projection_coerces_mixed_values() {
        let s = Samples::new(vec![
            record([("a", Value::Int(1)), ("b", Value::Bool(true)), ("c", Value::from("x"))]),
            record([("a", Value::Float(2.5)), ("b", Value::Bool(false)), ("c", Value::from("y"))]),
        ])
        .unwrap();
        let d = Distance::with_columns(s, &["b", "a"]).unwrap();
        let m = d.matrix().unwrap();
        assert_eq!(m.shape(), [2, 2]);
        assert_eq!(m[[0, 0]], 1.0);
        assert_eq!(m[[1, 1]], 2.5);
        assert_eq!(d.distance_matrix().unwrap().shape(), [2, 2]);
        assert!(!d.is_built());
    }

    #[test]
    fn test_projection_rejects_text() {
        let s = Samples::new(vec![record([("a", Value::from("spruce"))])]).unwrap();
        assert!(matches!(
            Distance::new(s),
            Err(DistanceError::NonNumeric { row: 0, .. })
        ));
    }

    #[test]
    fn test_projection_rejects_nan() {
        let s = Samples::new(vec![record([("a", f64::NAN)])]).unwrap();
        assert!(matches!(
            Distance::new(s),
            Err(DistanceError::NonFinite { row: 0, .. })
        ));
    }

    #[test]
    fn test_unknown_column() {
        assert!(matches!(
            Distance::with_columns(four_points(), &["z"]),
            Err(DistanceError::UnknownColumn { .. })
        ));
    }

    #[test]
    fn test_empty_collection() {
        let mut d = Distance::new(Samples::empty()).unwrap();
        assert!(d.matrix().is_none());
        assert!(d.distance_matrix().is_none());
        assert!(matches!(
            d.centroid(Reducer::Median),
            Err(DistanceError::EmptyMatrix)
        ));
        assert!(matches!(
            d.build_distance_matrix(DistanceStrategy::Broadcast),
            Err(DistanceError::EmptyMatrix)
        ));
    }

    #[test]
    fn test_centroid() {
        let d = Distance::new(four_points()).unwrap();
        let mean = d.centroid(Reducer::Mean).unwrap();
        assert_abs_diff_eq!(mean[0], 5.05, epsilon = 1e-12);
        let median = d.centroid(Reducer::Median).unwrap();
        assert_abs_diff_eq!(median[1], 5.05, epsilon = 1e-12);
        let max = d.centroid(Reducer::Percentile(100.0)).unwrap();
        assert_abs_diff_eq!(max[0], 10.1, epsilon = 1e-12);
    }

    #[test]
    fn test_centroid_invalid_percentile() {
        let d = Distance::new(four_points()).unwrap();
        assert!(matches!(
            d.centroid(Reducer::Percentile(120.0)),
            Err(DistanceError::InvalidPercentile { .. })
        ));
    }

    #[test]
    fn test_filter_requires_built_matrix() {
        let d = Distance::new(four_points()).unwrap();
        assert!(matches!(
            d.proximity_filter(Some(1.0)),
            Err(DistanceError::MatrixNotBuilt)
        ));
    }

    #[test]
    fn test_filter_four_points() {
        let mut d = Distance::new(four_points()).unwrap();
        d.build_distance_matrix(DistanceStrategy::PerRow).unwrap();
        let result = d.proximity_filter(Some(1.0)).unwrap();
        assert_eq!(result.removed(), [2, 0]);
        assert_eq!(result.samples().count(), 2);
        assert_eq!(result.samples().records()[0], four_points().records()[1]);
        assert_eq!(result.samples().records()[1], four_points().records()[3]);
        // the source is untouched
        assert_eq!(d.count(), 4);
    }

    #[test]
    fn test_filter_invalid_threshold() {
        let mut d = Distance::new(four_points()).unwrap();
        d.build_distance_matrix(DistanceStrategy::Broadcast).unwrap();
        for t in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                d.proximity_filter(Some(t)),
                Err(DistanceError::InvalidThreshold { .. })
            ));
        }
    }

    #[test]
    fn test_default_threshold_ambiguous_for_multi_dim() {
        let mut d = Distance::new(four_points()).unwrap();
        d.build_distance_matrix(DistanceStrategy::Broadcast).unwrap();
        assert!(matches!(
            d.proximity_filter(None),
            Err(DistanceError::AmbiguousThreshold { n_dims: 2 })
        ));
    }

    #[test]
    fn test_default_threshold_single_dim() {
        // x = 0..10: p90 = 8.1, so every pair closer than 8.1 counts.
        let s = Samples::new((0..10).map(|i| record([("x", i as f64)])).collect()).unwrap();
        let mut d = Distance::new(s).unwrap();
        d.build_distance_matrix(DistanceStrategy::Broadcast).unwrap();
        let result = d.proximity_filter(None).unwrap();
        assert_abs_diff_eq!(result.threshold(), 8.1, epsilon = 1e-12);
        assert!(result.samples().count() < 10);
    }
}
