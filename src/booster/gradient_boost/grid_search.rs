//! Gradient-boosted trees with a grid search over
//! the number of rounds, the learning rate, and the early-stopping patience.
use rayon::prelude::*;

use super::gbm::{GBM, holdout};
use crate::{
    common::loss_functions::LossType,
    config::{BoostingConfig, DEFAULT_N_FOLDS, DEFAULT_TREE_SEED},
    evaluation::{
        cross_validation::{check_n_folds, kfold_indices},
        Scoring,
    },
    weak_learner::RegressionTreeRegressor,
    Booster,
    Learner,
    PipelineError,
    RegressionTreeBuilder,
    Regressor,
    Result,
    Sample,
    WeightedSum,
};

use std::fmt;


/// The boosted model returned by [`GradientBoostingCV`].
pub type BoostedTrees = WeightedSum<RegressionTreeRegressor>;


/// One point of the grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoostingCandidate {
    /// Maximum number of rounds.
    pub n_estimators: usize,
    /// Shrinkage factor of each tree.
    pub learning_rate: f64,
    /// Patience of the early stopping. `0` disables it.
    pub early_stopping_rounds: usize,
}


impl fmt::Display for BoostingCandidate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "n_estimators = {}, learning_rate = {}, early_stopping_rounds = {}",
            self.n_estimators, self.learning_rate, self.early_stopping_rounds,
        )
    }
}


/// Gradient-boosted regression trees whose boosting parameters
/// are chosen by K-fold CV over an exhaustive grid.
/// The candidates are ranked by the mean held-out R² by default.
///
/// ```no_run
/// use houseboosts::prelude::*;
///
/// # fn run(sample: &Sample) -> houseboosts::Result<()> {
/// let gbm = GradientBoostingCV::new()
///     .n_estimators(vec![50])
///     .learning_rates(vec![0.1, 0.3])
///     .max_depth(3);
/// let f = gbm.fit(sample)?;
/// println!("{} trees", f.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct GradientBoostingCV {
    n_estimators: Vec<usize>,
    learning_rates: Vec<f64>,
    early_stopping_rounds: Vec<usize>,
    max_depth: usize,
    lambda_l2: f64,
    min_child_weight: f64,
    n_bins: usize,
    validation_fraction: f64,
    loss: LossType,
    n_folds: usize,
    seed: u64,
    scoring: Scoring,
}


impl GradientBoostingCV {
    /// Construct a new instance of `GradientBoostingCV`
    /// with the default grid.
    pub fn new() -> Self {
        Self::from_config(&BoostingConfig::default())
    }


    /// Copy the grid and the tree parameters from `config`.
    pub fn from_config(config: &BoostingConfig) -> Self {
        Self {
            n_estimators: config.n_estimators.clone(),
            learning_rates: config.learning_rate.clone(),
            early_stopping_rounds: config.early_stopping_rounds.clone(),
            max_depth: config.max_depth,
            lambda_l2: config.lambda_l2,
            min_child_weight: config.min_child_weight,
            n_bins: config.n_bins,
            validation_fraction: config.validation_fraction,
            loss: LossType::L2,
            n_folds: DEFAULT_N_FOLDS,
            seed: DEFAULT_TREE_SEED,
            scoring: Scoring::R2,
        }
    }


    /// Set the candidate numbers of rounds.
    pub fn n_estimators(mut self, n_estimators: Vec<usize>) -> Self {
        self.n_estimators = n_estimators;
        self
    }


    /// Set the candidate learning rates.
    pub fn learning_rates(mut self, learning_rates: Vec<f64>) -> Self {
        self.learning_rates = learning_rates;
        self
    }


    /// Set the candidate early-stopping patiences.
    pub fn early_stopping_rounds(mut self, rounds: Vec<usize>) -> Self {
        self.early_stopping_rounds = rounds;
        self
    }


    /// Set the depth bound of each tree.
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }


    /// Set the L2 penalty on the leaf values.
    pub fn lambda_l2(mut self, lambda_l2: f64) -> Self {
        self.lambda_l2 = lambda_l2;
        self
    }


    /// Set the minimum hessian sum of a child.
    pub fn min_child_weight(mut self, weight: f64) -> Self {
        self.min_child_weight = weight;
        self
    }


    /// Set the number of histogram bins per feature.
    pub fn n_bins(mut self, n_bins: usize) -> Self {
        self.n_bins = n_bins;
        self
    }


    /// Fraction of the rows held out for the early stopping.
    /// `0` trains on every row and disables the early stopping.
    pub fn validation_fraction(mut self, fraction: f64) -> Self {
        self.validation_fraction = fraction;
        self
    }


    /// Set the loss minimized by the trees.
    pub fn loss(mut self, loss: LossType) -> Self {
        self.loss = loss;
        self
    }


    /// Set the number of folds of the grid search.
    pub fn n_folds(mut self, n_folds: usize) -> Self {
        self.n_folds = n_folds;
        self
    }


    /// Set the seed of the fold partition and of the validation split.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }


    /// Set the criterion that ranks the grid points.
    pub fn scoring(mut self, scoring: Scoring) -> Self {
        self.scoring = scoring;
        self
    }


    /// Every point of the grid, in lexicographic order of
    /// `(n_estimators, learning_rate, early_stopping_rounds)`.
    pub fn candidates(&self) -> Vec<BoostingCandidate> {
        let mut candidates = Vec::new();
        for &n_estimators in &self.n_estimators {
            for &learning_rate in &self.learning_rates {
                for &early_stopping_rounds in &self.early_stopping_rounds {
                    candidates.push(BoostingCandidate {
                        n_estimators,
                        learning_rate,
                        early_stopping_rounds,
                    });
                }
            }
        }
        candidates
    }


    /// Fit a single grid point.
    pub fn fit_candidate(&self, sample: &Sample, candidate: BoostingCandidate)
        -> Result<BoostedTrees>
    {
        let (train, validation) = holdout(
            sample, self.validation_fraction, self.seed
        );
        let tree = RegressionTreeBuilder::new(&train)
            .max_depth(self.max_depth)
            .lambda_l2(self.lambda_l2)
            .min_child_weight(self.min_child_weight)
            .n_bins(self.n_bins)
            .loss(self.loss)
            .build()?;

        let mut booster = GBM::init_with_loss(&train, self.loss)
            .n_estimators(candidate.n_estimators)
            .learning_rate(candidate.learning_rate)
            .early_stopping_rounds(candidate.early_stopping_rounds);
        if let Some(validation) = validation.as_ref() {
            booster = booster.validation(validation);
        }
        Ok(booster.run(&tree))
    }


    fn check_parameters(&self) -> Result<()> {
        let empty = [
            ("n_estimators", self.n_estimators.is_empty()),
            ("learning_rate", self.learning_rates.is_empty()),
            ("early_stopping_rounds", self.early_stopping_rounds.is_empty()),
        ];
        if let Some((name, _)) = empty.iter().find(|(_, e)| *e) {
            return Err(PipelineError::InvalidParameter {
                name: *name,
                value: "[]".to_string(),
                reason: "at least one candidate is required",
            });
        }
        if let Some(eta) = self.learning_rates.iter().find(|e| !(**e > 0.0)) {
            return Err(PipelineError::InvalidParameter {
                name: "learning_rate",
                value: eta.to_string(),
                reason: "must be positive",
            });
        }
        let fraction = self.validation_fraction;
        if !(0.0..1.0).contains(&fraction) {
            return Err(PipelineError::InvalidParameter {
                name: "validation_fraction",
                value: fraction.to_string(),
                reason: "must lie in [0, 1)",
            });
        }
        Ok(())
    }
}


impl Default for GradientBoostingCV {
    fn default() -> Self {
        Self::new()
    }
}


impl Learner for GradientBoostingCV {
    type Model = BoostedTrees;


    fn name(&self) -> &str {
        "GBM"
    }


    fn info(&self) -> Option<Vec<(&str, String)>> {
        let info = Vec::from([
            ("# of candidates", format!("{}", self.candidates().len())),
            ("Max depth", format!("{}", self.max_depth)),
            ("Lambda (L2)", format!("{}", self.lambda_l2)),
            ("Min child weight", format!("{}", self.min_child_weight)),
            ("Validation fraction", format!("{}", self.validation_fraction)),
            ("Scoring", format!("{}", self.scoring)),
        ]);
        Some(info)
    }


    fn fit(&self, sample: &Sample) -> Result<Self::Model> {
        sample.check_trainable()?;
        self.check_parameters()?;

        let candidates = self.candidates();
        if let [candidate] = candidates.as_slice() {
            return self.fit_candidate(sample, *candidate);
        }

        let n_sample = sample.shape().0;
        check_n_folds(n_sample, self.n_folds)?;
        let folds = kfold_indices(n_sample, self.n_folds, self.seed);

        let scores = candidates.par_iter()
            .map(|&candidate| {
                let losses = folds.iter()
                    .map(|(train, test)| {
                        let train = sample.subset(&train[..]);
                        let test = sample.subset(&test[..]);
                        let f = self.fit_candidate(&train, candidate)?;
                        let predictions = f.predict_all(&test);
                        Ok(self.scoring.loss(test.target(), &predictions[..]))
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(losses.iter().sum::<f64>() / losses.len() as f64)
            })
            .collect::<Result<Vec<_>>>()?;

        // The earliest candidate wins a tie.
        let best = scores.iter()
            .enumerate()
            .fold((0, f64::INFINITY), |best, (k, &score)| {
                if score < best.1 { (k, score) } else { best }
            })
            .0;
        self.fit_candidate(sample, candidates[best])
    }
}
