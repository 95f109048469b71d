use rand::prelude::*;

use crate::{
    logging::Logger,
    PipelineError,
    Result,
    Sample,
};

use std::iter::Iterator;
use std::ops::Range;


/// Default number of folds.
pub const DEFAULT_N_FOLDS: usize = 5;
/// Default seed of the shuffle.
pub const DEFAULT_SEED: u64 = 1234;


/// A struct that generates
/// pairs of training/test sample for K-fold cross validation.
///
/// Every example lands in exactly one test fold,
/// and the fold sizes differ by at most one.
/// # Example
/// ```no_run
/// use houseboosts::prelude::*;
/// use houseboosts::CrossValidation;
///
/// # fn run(sample: &Sample) -> houseboosts::Result<()> {
/// let learner = RidgeCV::new().alphas(vec![1.0, 10.0]);
/// let cv = CrossValidation::new(sample)
///     .n_folds(5)
///     .verbose(true)
///     .seed(777)
///     .shuffle();
/// for (train, test) in cv {
///     let f = learner.fit(&train)?;
///     let predictions = f.predict_all(&test);
///     let loss = rmse(test.target(), &predictions[..]);
///     println!("[test: {loss}]");
/// }
/// # Ok(())
/// # }
/// ```
pub struct CrossValidation<'a> {
    current_fold: usize,
    n_folds: usize,
    seed: u64,
    sample: &'a Sample,
    ix: Vec<usize>,
    logger: Logger,
}


impl<'a> CrossValidation<'a> {
    /// Construct a new instance of `CrossValidation.`
    #[inline]
    pub fn new(sample: &'a Sample) -> Self {
        let n_sample = sample.shape().0;
        let ix = (0..n_sample).collect::<Vec<_>>();
        Self {
            current_fold: 0,
            n_folds: DEFAULT_N_FOLDS,
            seed: DEFAULT_SEED,
            logger: Logger::silent(),
            sample,
            ix,
        }
    }


    /// Set the number of folds.
    /// Default value is `5.`
    #[inline]
    pub fn n_folds(mut self, n_folds: usize) -> Self {
        self.n_folds = n_folds;
        self
    }


    /// Set the seed of the randomness for shuffling.
    /// Default vaule is `1234.`
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }


    /// Set the verbose parameter.
    /// If `true`, `CrossValidation` prints some information
    /// when generating a train/test pair.
    /// Default vaule is `false.`
    #[inline]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.logger = Logger::new(verbose);
        self
    }


    /// Shuffle the training sample.
    /// By default, `CrossValidation` does not shuffle the sample.
    #[inline]
    pub fn shuffle(mut self) -> Self {
        self.ix = shuffled_indices(self.ix.len(), self.seed);
        self
    }


    /// Returns the training/test sample for `i`th fold.
    #[inline]
    fn fold_at(&self, i: usize) -> (Sample, Sample) {
        let Range { start, end } = fold_bounds(self.ix.len(), self.n_folds, i);
        self.sample.split(&self.ix, start, end)
    }
}


impl<'a> Iterator for CrossValidation<'a> {
    type Item = (Sample, Sample);
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_fold >= self.n_folds { return None; }

        let output = self.fold_at(self.current_fold);
        self.current_fold += 1;

        let train_size = output.0.shape().0;
        let test_size = output.1.shape().0;
        self.logger.fold(self.current_fold, train_size, test_size);

        Some(output)
    }
}


/// `0, 1, ..., n_sample - 1` shuffled by a generator seeded with `seed`.
pub fn shuffled_indices(n_sample: usize, seed: u64) -> Vec<usize> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut ix = (0..n_sample).collect::<Vec<_>>();
    ix.shuffle(&mut rng);
    ix
}


/// Positions of the `i`-th test fold.
/// The first `n_sample % n_folds` folds hold one extra example.
pub fn fold_bounds(n_sample: usize, n_folds: usize, i: usize) -> Range<usize> {
    let base = n_sample / n_folds;
    let extra = n_sample % n_folds;
    let start = i * base + i.min(extra);
    let size = base + usize::from(i < extra);
    start..start + size
}


/// Returns the `(train, test)` row indices of each fold.
/// This is the partition [`CrossValidation`] yields after `shuffle()`.
pub fn kfold_indices(n_sample: usize, n_folds: usize, seed: u64)
    -> Vec<(Vec<usize>, Vec<usize>)>
{
    let ix = shuffled_indices(n_sample, seed);
    (0..n_folds).map(|i| {
            let Range { start, end } = fold_bounds(n_sample, n_folds, i);
            let train = ix[..start].iter()
                .chain(&ix[end..])
                .copied()
                .collect::<Vec<_>>();
            let test = ix[start..end].to_vec();
            (train, test)
        })
        .collect()
}


/// Returns an error unless `n_sample` examples
/// can be split into `n_folds` non-empty folds.
pub fn check_n_folds(n_sample: usize, n_folds: usize) -> Result<()> {
    if n_folds < 2 {
        return Err(PipelineError::InvalidParameter {
            name: "n_folds",
            value: n_folds.to_string(),
            reason: "at least 2 folds are required",
        });
    }
    if n_folds > n_sample {
        return Err(PipelineError::InvalidParameter {
            name: "n_folds",
            value: n_folds.to_string(),
            reason: "more folds than examples",
        });
    }
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_bounds_cover_every_row() {
        let n_sample = 13;
        let n_folds = 5;
        let sizes = (0..n_folds)
            .map(|i| fold_bounds(n_sample, n_folds, i).len())
            .collect::<Vec<_>>();
        let expect = vec![3, 3, 3, 2, 2];
        assert_eq!(expect, sizes, "expected {expect:?}, got {sizes:?}.");

        let last = fold_bounds(n_sample, n_folds, n_folds - 1);
        assert_eq!(n_sample, last.end);
    }


    #[test]
    fn test_kfold_partition() {
        let folds = kfold_indices(11, 4, 42);
        let mut seen = folds.iter()
            .flat_map(|(_, test)| test.iter().copied())
            .collect::<Vec<_>>();
        seen.sort();
        let expect = (0..11).collect::<Vec<_>>();
        assert_eq!(expect, seen, "expected {expect:?}, got {seen:?}.");

        for (train, test) in folds {
            assert_eq!(11, train.len() + test.len());
            assert!(test.iter().all(|i| !train.contains(i)));
        }
    }


    #[test]
    fn test_same_seed_same_partition() {
        assert_eq!(kfold_indices(20, 5, 2), kfold_indices(20, 5, 2));
        assert_ne!(shuffled_indices(20, 2), shuffled_indices(20, 42));
    }
}
