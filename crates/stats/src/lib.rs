//! Slice statistics backing the declust column reducers.
//!
//! All functions operate on unsorted input and never reorder the caller's
//! data. NaN values sort last and therefore bias high percentiles; callers
//! are expected to pass finite data.

use std::cmp::Ordering;

/// Arithmetic mean of a slice. Returns 0.0 if empty.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let sum: f64 = data.iter().sum();
    sum / data.len() as f64
}

/// Returns a sorted copy of `data`.
pub fn sorted(data: &[f64]) -> Vec<f64> {
    let mut out = data.to_vec();
    out.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    out
}

/// Median of unsorted data. For even length, averages the middle two values.
///
/// # Panics
///
/// Panics if `data` is empty.
pub fn median(data: &[f64]) -> f64 {
    assert!(!data.is_empty(), "median: input must not be empty");
    let s = sorted(data);
    let n = s.len();
    if n % 2 == 1 {
        s[n / 2]
    } else {
        (s[n / 2 - 1] + s[n / 2]) / 2.0
    }
}

/// Percentile of unsorted data with linear interpolation between the two
/// nearest ranks (R type 7, the common default in numerical libraries).
///
/// `q` is expressed in percent and clamped to `[0, 100]`.
///
/// # Panics
///
/// Panics if `data` is empty.
pub fn percentile(data: &[f64], q: f64) -> f64 {
    assert!(!data.is_empty(), "percentile: input must not be empty");
    percentile_sorted(&sorted(data), q)
}

/// Same as [`percentile`] but expects pre-sorted input.
///
/// # Panics
///
/// Panics if `sorted` is empty.
pub fn percentile_sorted(sorted: &[f64], q: f64) -> f64 {
    assert!(
        !sorted.is_empty(),
        "percentile_sorted: input must not be empty"
    );
    let p = q.clamp(0.0, 100.0) / 100.0;
    let n = sorted.len();
    let h = (n - 1) as f64 * p;
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    sorted[lo] + (h - h.floor()) * (sorted[hi] - sorted[lo])
}
