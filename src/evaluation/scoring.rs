use rayon::prelude::*;
use serde::{Serialize, Deserialize};

use super::cross_validation::{check_n_folds, kfold_indices};
use crate::{
    common::{loss_functions::{mse, r2_score, rmse}, stats},
    logging::Logger,
    AnyLearner,
    Regressor,
    Result,
    Sample,
};

use std::fmt;


/// The criterion a hyperparameter search ranks its candidates by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Scoring {
    /// Mean coefficient of determination over the folds; higher is better.
    #[default]
    R2,
    /// Mean squared error over the folds; lower is better.
    MeanSquaredError,
}


impl Scoring {
    /// Loss of one held-out fold under this criterion.
    /// Lower is better for both criteria: `R2` scores `1 - R²`.
    pub fn loss(&self, actual: &[f64], predicted: &[f64]) -> f64 {
        match self {
            Self::R2 => 1.0 - r2_score(actual, predicted),
            Self::MeanSquaredError => mse(actual, predicted),
        }
    }
}


impl fmt::Display for Scoring {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::R2 => write!(f, "R2"),
            Self::MeanSquaredError => write!(f, "MSE"),
        }
    }
}


/// Cross-validated RMSE of a learner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CvScore {
    /// RMSE on each test fold, in fold order.
    pub folds: Vec<f64>,
    /// Mean of `folds`.
    pub mean: f64,
    /// Population standard deviation of `folds`.
    pub std: f64,
}


impl CvScore {
    /// Summarize per-fold RMSEs.
    pub fn from_folds(folds: Vec<f64>) -> Self {
        let mean = stats::mean(&folds[..]);
        let std = stats::std_dev(&folds[..]);
        Self { folds, mean, std }
    }
}


impl fmt::Display for CvScore {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:.4} ({:.4})", self.mean, self.std)
    }
}


/// Refit `learner` on each training fold and
/// measure the RMSE on the held-out fold.
/// The partition depends only on `sample.shape().0`, `n_folds`, and `seed`,
/// so two learners scored with the same seed see the same folds.
pub fn cross_val_rmse(
    learner: &dyn AnyLearner,
    sample: &Sample,
    n_folds: usize,
    seed: u64,
    logger: &Logger,
) -> Result<CvScore>
{
    sample.check_trainable()?;
    let n_sample = sample.shape().0;
    check_n_folds(n_sample, n_folds)?;

    let folds = kfold_indices(n_sample, n_folds, seed);
    folds.iter()
        .enumerate()
        .for_each(|(i, (train, test))| {
            logger.fold(i + 1, train.len(), test.len());
        });

    let folds = folds.par_iter()
        .map(|(train, test)| {
            let train = sample.subset(&train[..]);
            let test = sample.subset(&test[..]);
            let f = learner.fit_boxed(&train)?;
            let predictions = f.predict_all(&test);
            Ok(rmse(test.target(), &predictions[..]))
        })
        .collect::<Result<Vec<_>>>()?;

    let score = CvScore::from_folds(folds);
    logger.score(learner.name(), score.mean, score.std);
    Ok(score)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cv_score_statistics() {
        let score = CvScore::from_folds(vec![1.0, 3.0]);
        assert_eq!(2.0, score.mean, "expected 2, got {}.", score.mean);
        assert_eq!(1.0, score.std, "expected 1, got {}.", score.std);
        let result = score.to_string();
        let expect = "2.0000 (1.0000)";
        assert_eq!(expect, result, "expected {expect}, got {result}.");
    }


    #[test]
    fn test_scoring_loss_is_lower_for_better_fits() {
        let actual = [0.0, 10.0];
        let good = [0.0, 9.0];
        let bad = [3.0, 4.0];
        for scoring in [Scoring::R2, Scoring::MeanSquaredError] {
            let good = scoring.loss(&actual, &good);
            let bad = scoring.loss(&actual, &bad);
            assert!(good < bad, "{scoring}: expected {good} < {bad}.");
        }
    }
}
