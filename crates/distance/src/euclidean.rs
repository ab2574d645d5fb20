//! Pairwise Euclidean distance-matrix kernels.

use std::fmt;
use std::str::FromStr;

use ndarray::{ArrayView1, ArrayView2, ArrayViewMut2, Axis};

use crate::error::DistanceError;

/// How the `n × n` distance matrix is computed.
///
/// Both strategies yield the same matrix up to floating-point rounding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DistanceStrategy {
    /// Explicit loop over rows, each row measured against every other row.
    PerRow,
    /// One `n × n` squared-difference broadcast per dimension, accumulated,
    /// with a single square root at the end.
    #[default]
    Broadcast,
}

impl FromStr for DistanceStrategy {
    type Err = DistanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "per_row" | "per-row" | "row" => Ok(Self::PerRow),
            "broadcast" => Ok(Self::Broadcast),
            _ => Err(DistanceError::UnknownStrategy {
                name: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for DistanceStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PerRow => f.write_str("per_row"),
            Self::Broadcast => f.write_str("broadcast"),
        }
    }
}

/// Euclidean distance between two equal-length vectors.
///
/// ```
/// use declust_distance::euclidean;
///
/// assert_eq!(euclidean(&[0.0, 0.0], &[3.0, 4.0]), 5.0);
/// ```
pub fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    row_distance(ArrayView1::from(a), ArrayView1::from(b))
}

#[inline]
fn row_distance(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum::<f64>()
        .sqrt()
}

/// Fills `out` (`n × n`) with pairwise distances between the rows of
/// `matrix` (`n × d`).
///
/// # Panics
///
/// Debug-asserts that `out` is square with one row per matrix row.
pub(crate) fn fill_distance_matrix(
    matrix: ArrayView2<'_, f64>,
    strategy: DistanceStrategy,
    out: ArrayViewMut2<'_, f64>,
) {
    debug_assert_eq!(out.nrows(), matrix.nrows());
    debug_assert_eq!(out.ncols(), matrix.nrows());

    match strategy {
        DistanceStrategy::PerRow => fill_per_row(matrix, out),
        DistanceStrategy::Broadcast => fill_broadcast(matrix, out),
    }
}

fn fill_per_row(matrix: ArrayView2<'_, f64>, mut out: ArrayViewMut2<'_, f64>) {
    for (row_i, mut out_row) in matrix.rows().into_iter().zip(out.rows_mut()) {
        for (row_j, o) in matrix.rows().into_iter().zip(out_row.iter_mut()) {
            *o = row_distance(row_i, row_j);
        }
    }
}

fn fill_broadcast(matrix: ArrayView2<'_, f64>, mut out: ArrayViewMut2<'_, f64>) {
    out.fill(0.0);
    for col in matrix.axis_iter(Axis(1)) {
        // (n, 1) - (1, n) broadcasts to the full n × n difference matrix.
        let diff = &col.insert_axis(Axis(1)) - &col.insert_axis(Axis(0));
        out.zip_mut_with(&diff, |acc, &d| *acc += d * d);
    }
    out.mapv_inplace(f64::sqrt);
}
