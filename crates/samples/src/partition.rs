//! Randomised partitioning: train/validation split, subsampling, k-fold.
//!
//! Every operation draws from a caller-supplied [`Rng`], so results are
//! reproducible with a seeded generator.

use rand::Rng;
use rand::seq::index;
use tracing::{debug, warn};

use crate::error::SamplesError;
use crate::samples::Samples;

/// One cross-validation fold: a validation subset and its complement.
#[derive(Debug, Clone, PartialEq)]
pub struct Fold {
    train: Samples,
    validation: Samples,
    validation_index: Vec<usize>,
}

impl Fold {
    /// Training samples (every sample not in this fold).
    pub fn train(&self) -> &Samples {
        &self.train
    }

    /// Validation samples of this fold.
    pub fn validation(&self) -> &Samples {
        &self.validation
    }

    /// Positions of the validation samples in the parent collection.
    pub fn validation_index(&self) -> &[usize] {
        &self.validation_index
    }

    /// Splits into `(train, validation)`.
    pub fn into_parts(self) -> (Samples, Samples) {
        (self.train, self.validation)
    }
}

/// Per-fold validation sizes: `count / k` each, remainder on the last fold.
pub fn fold_sizes(count: usize, k: usize) -> Vec<usize> {
    if k == 0 {
        return Vec::new();
    }
    let mut sizes = vec![count / k; k];
    if let Some(last) = sizes.last_mut() {
        *last += count % k;
    }
    sizes
}

impl Samples {
    /// Randomly splits into `(train, validation)`.
    ///
    /// `floor(train_percentage / 100 * count)` samples are drawn without
    /// replacement for training, in draw order. The remaining samples keep
    /// their original order in the validation set.
    ///
    /// # Errors
    ///
    /// Returns [`SamplesError::InvalidPercentage`] unless
    /// `0 <= train_percentage <= 100`.
    pub fn partition(
        &self,
        train_percentage: f64,
        rng: &mut impl Rng,
    ) -> Result<(Samples, Samples), SamplesError> {
        if !(0.0..=100.0).contains(&train_percentage) {
            return Err(SamplesError::InvalidPercentage {
                percentage: train_percentage,
            });
        }
        let count = self.count();
        let n_train = ((train_percentage * count as f64) / 100.0).floor() as usize;

        let train = index::sample(rng, count, n_train).into_vec();
        let mut in_train = vec![false; count];
        for &i in &train {
            in_train[i] = true;
        }
        let validation: Vec<usize> = (0..count).filter(|&i| !in_train[i]).collect();

        debug!(
            n_train = train.len(),
            n_validation = validation.len(),
            "partitioned samples"
        );
        Ok((self.pick(&train), self.pick(&validation)))
    }

    /// Draws `n` samples without replacement.
    ///
    /// `None` returns a copy of the whole collection. A request for at
    /// least `count()` samples also returns everything, with a warning.
    pub fn random_selection(&self, n: Option<usize>, rng: &mut impl Rng) -> Samples {
        match n {
            None => self.derive(self.records().to_vec()),
            Some(n) if n >= self.count() => {
                warn!(
                    requested = n,
                    available = self.count(),
                    "number larger than population, selecting all samples"
                );
                self.derive(self.records().to_vec())
            }
            Some(n) => {
                let picked = index::sample(rng, self.count(), n).into_vec();
                self.pick(&picked)
            }
        }
    }

    /// Splits into `k` cross-validation folds.
    ///
    /// Validation folds are drawn in sequence, without replacement, from a
    /// shrinking pool, so they are pairwise disjoint and together cover
    /// every sample exactly once. Fold sizes follow [`fold_sizes`]. Each
    /// training set is the complement of its fold in the full collection.
    /// When `k` exceeds the sample count the leading folds are empty and the
    /// last one holds every sample.
    ///
    /// # Errors
    ///
    /// Returns [`SamplesError::InvalidFoldCount`] if `k` is zero.
    #[tracing::instrument(skip(self, rng), fields(count = self.count()))]
    pub fn make_folds(&self, k: usize, rng: &mut impl Rng) -> Result<Vec<Fold>, SamplesError> {
        let count = self.count();
        if k == 0 {
            return Err(SamplesError::InvalidFoldCount { k, count });
        }

        let mut pool: Vec<usize> = (0..count).collect();
        let mut folds = Vec::with_capacity(k);

        for size in fold_sizes(count, k) {
            let validation: Vec<usize> = index::sample(rng, pool.len(), size)
                .into_iter()
                .map(|p| pool[p])
                .collect();

            let mut in_fold = vec![false; count];
            for &i in &validation {
                in_fold[i] = true;
            }
            pool.retain(|&i| !in_fold[i]);
            let train: Vec<usize> = (0..count).filter(|&i| !in_fold[i]).collect();

            folds.push(Fold {
                train: self.pick(&train),
                validation: self.pick(&validation),
                validation_index: validation,
            });
        }

        debug!(k, "made folds");
        Ok(folds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::record;
    use crate::value::Value;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn numbered(n: i64) -> Samples {
        Samples::new((0..n).map(|i| record([("id", i)])).collect()).unwrap()
    }

    fn ids(s: &Samples) -> Vec<i64> {
        s.records()
            .iter()
            .map(|r| match r["id"] {
                Value::Int(i) => i,
                _ => panic!("id must be Int"),
            })
            .collect()
    }

    #[test]
    fn test_fold_sizes() {
        assert_eq!(fold_sizes(5, 2), [2, 3]);
        assert_eq!(fold_sizes(10, 5), [2, 2, 2, 2, 2]);
        assert_eq!(fold_sizes(7, 3), [2, 2, 3]);
        assert!(fold_sizes(7, 0).is_empty());
    }

    #[test]
    fn test_partition_sizes_and_disjoint() {
        let s = numbered(10);
        let mut rng = StdRng::seed_from_u64(1);
        let (train, val) = s.partition(75.0, &mut rng).unwrap();
        assert_eq!(train.count(), 7);
        assert_eq!(val.count(), 3);

        let mut all: Vec<i64> = ids(&train).into_iter().chain(ids(&val)).collect();
        all.sort_unstable();
        assert_eq!(all, (0..10).collect::<Vec<_>>());
        assert_eq!(train.index(), (0..7).collect::<Vec<_>>());
    }

    #[test]
    fn test_partition_validation_keeps_order() {
        let s = numbered(20);
        let mut rng = StdRng::seed_from_u64(9);
        let (_, val) = s.partition(50.0, &mut rng).unwrap();
        let v = ids(&val);
        assert!(v.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_partition_extremes() {
        let s = numbered(4);
        let mut rng = StdRng::seed_from_u64(0);
        let (train, val) = s.partition(0.0, &mut rng).unwrap();
        assert_eq!((train.count(), val.count()), (0, 4));
        let (train, val) = s.partition(100.0, &mut rng).unwrap();
        assert_eq!((train.count(), val.count()), (4, 0));
    }

    #[test]
    fn test_partition_invalid_percentage() {
        let s = numbered(4);
        let mut rng = StdRng::seed_from_u64(0);
        for p in [-1.0, 100.5, f64::NAN] {
            assert!(matches!(
                s.partition(p, &mut rng),
                Err(SamplesError::InvalidPercentage { .. })
            ));
        }
    }

    #[test]
    fn test_partition_seeded_reproducible() {
        let s = numbered(30);
        let a = s.partition(60.0, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = s.partition(60.0, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_random_selection() {
        let s = numbered(10);
        let mut rng = StdRng::seed_from_u64(3);
        let sel = s.random_selection(Some(4), &mut rng);
        assert_eq!(sel.count(), 4);
        let mut v = ids(&sel);
        v.sort_unstable();
        v.dedup();
        assert_eq!(v.len(), 4);
    }

    #[test]
    fn test_random_selection_all() {
        let s = numbered(3);
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(s.random_selection(None, &mut rng), s);
        assert_eq!(s.random_selection(Some(3), &mut rng), s);
        assert_eq!(s.random_selection(Some(50), &mut rng), s);
    }

    #[test]
    fn test_make_folds_five_into_two() {
        let s = numbered(5);
        let mut rng = StdRng::seed_from_u64(7);
        let folds = s.make_folds(2, &mut rng).unwrap();
        let sizes: Vec<usize> = folds.iter().map(|f| f.validation().count()).collect();
        assert_eq!(sizes, [2, 3]);
        assert_eq!(folds[0].train().count(), 3);
        assert_eq!(folds[1].train().count(), 2);
    }

    #[test]
    fn test_make_folds_cover_once() {
        let s = numbered(23);
        let mut rng = StdRng::seed_from_u64(11);
        let folds = s.make_folds(4, &mut rng).unwrap();
        let mut seen: Vec<usize> = folds
            .iter()
            .flat_map(|f| f.validation_index().iter().copied())
            .collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..23).collect::<Vec<_>>());

        for fold in &folds {
            let mut train = ids(fold.train());
            let val = ids(fold.validation());
            assert!(val.iter().all(|v| !train.contains(v)));
            train.extend(val);
            assert_eq!(train.len(), 23);
        }
    }

    #[test]
    fn test_make_folds_zero() {
        let s = numbered(3);
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            s.make_folds(0, &mut rng),
            Err(SamplesError::InvalidFoldCount { k: 0, count: 3 })
        ));
    }

    #[test]
    fn test_make_folds_more_than_count() {
        let s = numbered(3);
        let mut rng = StdRng::seed_from_u64(0);
        let folds = s.make_folds(4, &mut rng).unwrap();
        let sizes: Vec<_> = folds.iter().map(|f| f.validation().count()).collect();
        assert_eq!(sizes, [0, 0, 0, 3]);
        for fold in &folds[..3] {
            assert_eq!(fold.train(), &s);
            assert!(fold.validation_index().is_empty());
        }
        assert!(folds[3].train().is_empty());
    }
}
