//! Greedy proximity-filter declustering.
//!
//! Two samples are *close* when `0 < distance < threshold`. Coincident
//! samples (distance exactly zero) are never close to each other.
//!
//! ```text
//! neighbor_counts()     how many close samples each sample has
//!        │
//! removal_order()       indices by ascending neighbor count (ties by index)
//!        │
//! removal_set()         walk the order; an unmarked sample i marks every
//!                       close j <= i for removal
//! ```
//!
//! An isolated sample has no close partner and is never marked. Within a
//! close pair the lower index is marked and the higher survives. This is
//! a thinning heuristic: survivors are not guaranteed to be pairwise
//! farther apart than the threshold.

use ndarray::ArrayView2;

use declust_samples::Samples;

#[inline]
fn is_close(d: f64, threshold: f64) -> bool {
    d > 0.0 && d < threshold
}

/// Number of close samples for every row of a square distance matrix.
pub fn neighbor_counts(distances: ArrayView2<'_, f64>, threshold: f64) -> Vec<usize> {
    distances
        .rows()
        .into_iter()
        .map(|row| row.iter().filter(|&&d| is_close(d, threshold)).count())
        .collect()
}

/// Indices sorted by ascending neighbor count. The sort is stable, so
/// equal counts keep index order.
fn removal_order(counts: &[usize]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..counts.len()).collect();
    order.sort_by_key(|&i| counts[i]);
    order
}

/// Indices the proximity filter removes, unique and in descending order.
pub fn removal_set(distances: ArrayView2<'_, f64>, threshold: f64) -> Vec<usize> {
    let counts = neighbor_counts(distances, threshold);
    removal_set_with_counts(distances, threshold, &counts)
}

pub(crate) fn removal_set_with_counts(
    distances: ArrayView2<'_, f64>,
    threshold: f64,
    counts: &[usize],
) -> Vec<usize> {
    let n = distances.nrows();
    debug_assert_eq!(distances.ncols(), n);
    debug_assert_eq!(counts.len(), n);

    let mut marked = vec![false; n];
    for i in removal_order(counts) {
        if marked[i] {
            continue;
        }
        for j in 0..=i {
            if is_close(distances[[i, j]], threshold) {
                marked[j] = true;
            }
        }
    }

    (0..n).rev().filter(|&j| marked[j]).collect()
}

/// Outcome of [`Distance::proximity_filter`](crate::Distance::proximity_filter).
#[derive(Debug, Clone, PartialEq)]
pub struct FilterResult {
    samples: Samples,
    removed: Vec<usize>,
    threshold: f64,
    neighbor_counts: Vec<usize>,
}

impl FilterResult {
    pub(crate) fn new(
        samples: Samples,
        removed: Vec<usize>,
        threshold: f64,
        neighbor_counts: Vec<usize>,
    ) -> Self {
        Self {
            samples,
            removed,
            threshold,
            neighbor_counts,
        }
    }

    /// Surviving samples, in their original relative order.
    pub fn samples(&self) -> &Samples {
        &self.samples
    }

    /// Consumes the result and returns the surviving samples.
    pub fn into_samples(self) -> Samples {
        self.samples
    }

    /// Removed positions in the input collection, descending.
    pub fn removed(&self) -> &[usize] {
        &self.removed
    }

    /// Number of removed samples.
    pub fn n_removed(&self) -> usize {
        self.removed.len()
    }

    /// Threshold the filter ran with.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Close-neighbor count of every input sample.
    pub fn neighbor_counts(&self) -> &[usize] {
        &self.neighbor_counts
    }

    /// Smallest neighbor count, `None` for an empty input.
    pub fn min_neighbors(&self) -> Option<usize> {
        self.neighbor_counts.iter().copied().min()
    }

    /// Largest neighbor count, `None` for an empty input.
    pub fn max_neighbors(&self) -> Option<usize> {
        self.neighbor_counts.iter().copied().max()
    }
}
