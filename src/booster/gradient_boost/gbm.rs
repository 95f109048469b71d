//! Provides Gradient Boosting Machine ([`GBM`]) by Friedman, 2001.
use rayon::prelude::*;

use crate::{
    common::loss_functions::*,
    evaluation::cross_validation::shuffled_indices,
    Booster,
    Regressor,
    Sample,
    WeakLearner,
    WeightedSum,
};

use std::mem;
use std::ops::ControlFlow;


/// Default number of rounds.
pub const DEFAULT_N_ESTIMATORS: usize = 100;
/// Default shrinkage.
pub const DEFAULT_LEARNING_RATE: f64 = 0.1;


/// The Gradient Boosting Machine proposed in the following paper:
///
/// [Jerome H. Friedman, 2001 - Greedy Function Approximation: A Gradient Boosting Machine](https://projecteuclid.org/journals/annals-of-statistics/volume-29/issue-5/Greedy-function-approximation-A-gradient-boostingmachine/10.1214/aos/1013203451.full)
///
/// GBM starts from the mean target and, in each round,
/// adds a hypothesis fitted to the gradient of the loss,
/// shrunk by the learning rate.
///
/// When a validation sample is given,
/// GBM stops once the validation loss has not improved
/// for `early_stopping_rounds` consecutive rounds,
/// and the returned model keeps only the rounds up to the best one.
///
/// # Example
/// ```no_run
/// use houseboosts::prelude::*;
///
/// # fn run(train: &Sample, valid: &Sample) -> houseboosts::Result<()> {
/// let weak_learner = RegressionTreeBuilder::new(train)
///     .max_depth(3)
///     .build()?;
/// let mut booster = GBM::init(train)
///     .loss(LossType::L2)
///     .n_estimators(200)
///     .learning_rate(0.1)
///     .validation(valid)
///     .early_stopping_rounds(5);
///
/// let f = booster.run(&weak_learner);
/// let predictions = f.predict_all(valid);
/// println!("validation rmse: {}", rmse(valid.target(), &predictions[..]));
/// # Ok(())
/// # }
/// ```
pub struct GBM<'a, H, L> {
    // Training data
    sample: &'a Sample,

    // Held-out data that drives the early stopping
    validation: Option<&'a Sample>,

    // Some struct that implements `LossFunction` trait
    loss: L,

    // Shrinkage applied to each hypothesis
    learning_rate: f64,

    // Max number of rounds.
    max_iter: usize,

    // Patience of the early stopping. `0` disables it.
    early_stopping_rounds: usize,

    // The model built so far.
    model: WeightedSum<H>,

    // Predictions of `model` on the training/validation sample.
    predictions: Vec<f64>,
    valid_predictions: Vec<f64>,

    // Training loss after each round.
    train_losses: Vec<f64>,
    // Validation loss after each round.
    valid_losses: Vec<f64>,

    best_round: usize,
    best_loss: f64,
    stale_rounds: usize,

    // Terminated iteration.
    terminated: usize,
}


impl<'a, H> GBM<'a, H, LossType> {
    /// Initialize the `GBM` with the squared loss.
    pub fn init(sample: &'a Sample) -> Self {
        Self::init_with_loss(sample, LossType::L2)
    }
}


impl<'a, H, L> GBM<'a, H, L> {
    /// Initialize the `GBM` with the given loss.
    pub fn init_with_loss(sample: &'a Sample, loss: L) -> Self {
        Self {
            sample,
            validation: None,
            loss,
            learning_rate: DEFAULT_LEARNING_RATE,
            max_iter: DEFAULT_N_ESTIMATORS,
            early_stopping_rounds: 0,
            model: WeightedSum::constant(0.0),
            predictions: Vec::new(),
            valid_predictions: Vec::new(),
            train_losses: Vec::new(),
            valid_losses: Vec::new(),
            best_round: 0,
            best_loss: f64::INFINITY,
            stale_rounds: 0,
            terminated: usize::MAX,
        }
    }


    /// Set the Loss Type.
    pub fn loss(mut self, loss_type: L) -> Self {
        self.loss = loss_type;
        self
    }


    /// Set the maximal number of rounds.
    pub fn n_estimators(mut self, n_estimators: usize) -> Self {
        self.max_iter = n_estimators;
        self
    }


    /// Set the shrinkage of each round.
    pub fn learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }


    /// Set the held-out sample monitored by the early stopping.
    pub fn validation(mut self, validation: &'a Sample) -> Self {
        self.validation = Some(validation);
        self
    }


    /// Stop after this many rounds without improvement
    /// of the validation loss.
    pub fn early_stopping_rounds(mut self, rounds: usize) -> Self {
        self.early_stopping_rounds = rounds;
        self
    }


    /// Training loss after each round.
    pub fn train_losses(&self) -> &[f64] {
        &self.train_losses[..]
    }


    /// Validation loss after each round.
    /// Empty without a validation sample.
    pub fn valid_losses(&self) -> &[f64] {
        &self.valid_losses[..]
    }


    /// The round the returned model was truncated to.
    pub fn best_round(&self) -> usize {
        self.best_round
    }


    /// The round the boosting stopped at.
    pub fn terminated(&self) -> usize {
        self.terminated
    }
}


impl<H, L> Booster<H> for GBM<'_, H, L>
    where H: Regressor + Sync,
          L: LossFunction,
{
    type Output = WeightedSum<H>;


    fn name(&self) -> &str {
        "Gradient Boosting Machine"
    }


    fn info(&self) -> Option<Vec<(&str, String)>> {
        let (n_sample, n_feature) = self.sample.shape();
        let n_valid = self.validation.map_or(0, |v| v.shape().0);
        let info = Vec::from([
            ("# of examples", format!("{n_sample}")),
            ("# of validation examples", format!("{n_valid}")),
            ("# of features", format!("{n_feature}")),
            ("Learning rate", format!("{}", self.learning_rate)),
            ("Loss", self.loss.name().to_string()),
            ("Max iteration", format!("{}", self.max_iter)),
            ("Early stopping", format!("{}", self.early_stopping_rounds)),
        ]);
        Some(info)
    }


    fn preprocess(&mut self) {
        let base_score = crate::common::stats::mean(self.sample.target());

        self.model = WeightedSum::constant(base_score);
        self.predictions = vec![base_score; self.sample.shape().0];
        self.valid_predictions = self.validation
            .map_or_else(Vec::new, |v| vec![base_score; v.shape().0]);

        self.train_losses = Vec::with_capacity(self.max_iter);
        self.valid_losses = Vec::with_capacity(self.max_iter);
        self.best_round = 0;
        self.best_loss = f64::INFINITY;
        self.stale_rounds = 0;
        self.terminated = self.max_iter;
    }


    fn boost<W>(
        &mut self,
        weak_learner: &W,
        iteration: usize,
    ) -> ControlFlow<usize>
        where W: WeakLearner<Hypothesis = H>,
    {
        if self.max_iter < iteration {
            return ControlFlow::Break(self.max_iter);
        }

        // Get a new hypothesis
        let h = weak_learner.produce(self.sample, &self.predictions[..]);

        let eta = self.learning_rate;
        let predictions = h.predict_all(self.sample);
        self.predictions.par_iter_mut()
            .zip(predictions)
            .for_each(|(p, q)| { *p += eta * q; });
        let train_loss = self.loss.eval(&self.predictions[..], self.sample.target());
        self.train_losses.push(train_loss);

        if let Some(validation) = self.validation {
            let predictions = h.predict_all(validation);
            self.valid_predictions.par_iter_mut()
                .zip(predictions)
                .for_each(|(p, q)| { *p += eta * q; });
        }
        self.model.push(eta, h);

        let validation = match self.validation {
            Some(validation) => validation,
            None => {
                self.best_round = iteration;
                return ControlFlow::Continue(());
            },
        };

        let valid_loss = self.loss.eval(
            &self.valid_predictions[..], validation.target()
        );
        self.valid_losses.push(valid_loss);
        if valid_loss < self.best_loss {
            self.best_loss = valid_loss;
            self.best_round = iteration;
            self.stale_rounds = 0;
        } else {
            self.stale_rounds += 1;
        }

        if self.early_stopping_rounds > 0
            && self.stale_rounds >= self.early_stopping_rounds
        {
            self.terminated = iteration;
            return ControlFlow::Break(iteration);
        }

        ControlFlow::Continue(())
    }


    fn postprocess(&mut self) -> Self::Output {
        let mut model = mem::replace(
            &mut self.model, WeightedSum::constant(0.0)
        );
        model.truncate(self.best_round);
        model
    }
}


/// Split `sample` into a training part and a validation part
/// holding `fraction` of the rows, chosen by a seeded shuffle.
/// Returns `None` for the validation part
/// if either part would be empty.
pub fn holdout(sample: &Sample, fraction: f64, seed: u64)
    -> (Sample, Option<Sample>)
{
    let n_sample = sample.shape().0;
    let n_valid = (n_sample as f64 * fraction).round() as usize;
    if n_valid == 0 || n_valid >= n_sample {
        return (sample.clone(), None);
    }

    let ix = shuffled_indices(n_sample, seed);
    let (train, valid) = sample.split(&ix[..], 0, n_valid);
    (train, Some(valid))
}
