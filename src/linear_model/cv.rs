//! Linear learners whose penalty is chosen by K-fold cross validation.
use rayon::prelude::*;

use super::{
    coordinate_descent::{
        CoordinateDescent,
        DEFAULT_MAX_ITER,
        DEFAULT_TOLERANCE,
    },
    design::Design,
    linear_regressor::LinearRegressor,
    ridge::NormalEquations,
    robust_scaler::RobustScaler,
};
use crate::{
    common::loss_functions::mse,
    config::{DEFAULT_LINEAR_SEED, DEFAULT_N_FOLDS, LinearConfig},
    evaluation::{
        cross_validation::{check_n_folds, kfold_indices},
        Scoring,
    },
    Learner,
    PipelineError,
    Result,
    Sample,
};


/// Ridge regression with the penalty chosen by K-fold CV.
/// The candidates are ranked by the mean held-out R² by default.
///
/// ```no_run
/// use houseboosts::prelude::*;
///
/// # fn run(sample: &Sample) -> houseboosts::Result<()> {
/// let ridge = RidgeCV::new()
///     .alphas(vec![14.5, 15.0, 15.5])
///     .n_folds(5)
///     .seed(42);
/// let f = ridge.fit(sample)?;
/// println!("alpha = {}", f.alpha());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RidgeCV {
    alphas: Vec<f64>,
    n_folds: usize,
    seed: u64,
    scoring: Scoring,
}


/// Lasso regression with the penalty chosen by K-fold CV.
/// The candidates are ranked by the mean held-out MSE.
#[derive(Debug, Clone)]
pub struct LassoCV {
    alphas: Vec<f64>,
    n_folds: usize,
    seed: u64,
    max_iter: usize,
    tol: f64,
}


/// Elastic-net regression with the penalty and
/// the L1 ratio chosen by K-fold CV.
/// The candidates are ranked by the mean held-out MSE.
#[derive(Debug, Clone)]
pub struct ElasticNetCV {
    alphas: Vec<f64>,
    l1_ratios: Vec<f64>,
    n_folds: usize,
    seed: u64,
    max_iter: usize,
    tol: f64,
}


impl RidgeCV {
    /// Construct a new instance of `RidgeCV` with the default grid.
    pub fn new() -> Self {
        Self {
            alphas: LinearConfig::default().ridge_alphas,
            n_folds: DEFAULT_N_FOLDS,
            seed: DEFAULT_LINEAR_SEED,
            scoring: Scoring::R2,
        }
    }


    /// Set the candidate penalties.
    pub fn alphas(mut self, alphas: Vec<f64>) -> Self {
        self.alphas = alphas;
        self
    }


    /// Set the number of folds of the internal CV.
    pub fn n_folds(mut self, n_folds: usize) -> Self {
        self.n_folds = n_folds;
        self
    }


    /// Set the seed of the internal fold partition.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }


    /// Set the criterion that ranks the penalties.
    pub fn scoring(mut self, scoring: Scoring) -> Self {
        self.scoring = scoring;
        self
    }
}


impl Default for RidgeCV {
    fn default() -> Self {
        Self::new()
    }
}


impl LassoCV {
    /// Construct a new instance of `LassoCV` with the default grid.
    pub fn new() -> Self {
        Self {
            alphas: LinearConfig::default().lasso_alphas,
            n_folds: DEFAULT_N_FOLDS,
            seed: DEFAULT_LINEAR_SEED,
            max_iter: DEFAULT_MAX_ITER,
            tol: DEFAULT_TOLERANCE,
        }
    }


    /// Set the candidate penalties.
    pub fn alphas(mut self, alphas: Vec<f64>) -> Self {
        self.alphas = alphas;
        self
    }


    /// Set the number of folds of the internal CV.
    pub fn n_folds(mut self, n_folds: usize) -> Self {
        self.n_folds = n_folds;
        self
    }


    /// Set the seed of the internal fold partition.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }


    /// Set the maximum number of coordinate-descent sweeps.
    pub fn max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }


    /// Set the tolerance on the duality gap.
    pub fn tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }
}


impl Default for LassoCV {
    fn default() -> Self {
        Self::new()
    }
}


impl ElasticNetCV {
    /// Construct a new instance of `ElasticNetCV` with the default grid.
    pub fn new() -> Self {
        let config = LinearConfig::default();
        Self {
            alphas: config.elastic_net_alphas,
            l1_ratios: config.elastic_net_l1_ratios,
            n_folds: DEFAULT_N_FOLDS,
            seed: DEFAULT_LINEAR_SEED,
            max_iter: DEFAULT_MAX_ITER,
            tol: DEFAULT_TOLERANCE,
        }
    }


    /// Set the candidate penalties.
    pub fn alphas(mut self, alphas: Vec<f64>) -> Self {
        self.alphas = alphas;
        self
    }


    /// Set the candidate mixing ratios.
    /// Each must lie in `(0, 1]`.
    pub fn l1_ratios(mut self, l1_ratios: Vec<f64>) -> Self {
        self.l1_ratios = l1_ratios;
        self
    }


    /// Set the number of folds of the internal CV.
    pub fn n_folds(mut self, n_folds: usize) -> Self {
        self.n_folds = n_folds;
        self
    }


    /// Set the seed of the internal fold partition.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }


    /// Set the maximum number of coordinate-descent sweeps.
    pub fn max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }


    /// Set the tolerance on the duality gap.
    pub fn tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }
}


impl Default for ElasticNetCV {
    fn default() -> Self {
        Self::new()
    }
}


impl Learner for RidgeCV {
    type Model = LinearRegressor;


    fn name(&self) -> &str {
        "Ridge"
    }


    fn info(&self) -> Option<Vec<(&str, String)>> {
        let info = Vec::from([
            ("# of alphas", format!("{}", self.alphas.len())),
            ("# of folds", format!("{}", self.n_folds)),
            ("Scoring", format!("{}", self.scoring)),
        ]);
        Some(info)
    }


    fn fit(&self, sample: &Sample) -> Result<Self::Model> {
        check_alphas(&self.alphas[..])?;
        let (scaler, design) = prepare(sample, self.n_folds)?;
        let target = sample.target();

        let folds = kfold_indices(design.n_rows, self.n_folds, self.seed);
        let losses = folds.par_iter()
            .map(|(train, test)| {
                let data = design.take(train).center(&take(target, train));
                let eq = NormalEquations::new(&data);
                let x_test = design.take(test);
                let y_test = take(target, test);
                self.alphas.iter()
                    .map(|&alpha| {
                        let w = eq.solve(alpha)?;
                        let predictions = x_test.predict(&w[..], data.intercept(&w[..]));
                        Ok(self.scoring.loss(&y_test[..], &predictions[..]))
                    })
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;
        let alpha = self.alphas[best_candidate(&losses[..])];

        let data = design.center(target);
        let coef = NormalEquations::new(&data).solve(alpha)?;
        let intercept = data.intercept(&coef[..]);
        Ok(LinearRegressor { scaler, coef, intercept, alpha, l1_ratio: None })
    }
}


impl Learner for LassoCV {
    type Model = LinearRegressor;


    fn name(&self) -> &str {
        "Lasso"
    }


    fn info(&self) -> Option<Vec<(&str, String)>> {
        let info = Vec::from([
            ("# of alphas", format!("{}", self.alphas.len())),
            ("# of folds", format!("{}", self.n_folds)),
            ("Max iterations", format!("{}", self.max_iter)),
        ]);
        Some(info)
    }


    fn fit(&self, sample: &Sample) -> Result<Self::Model> {
        let path = PenaltyPath {
            alphas: &self.alphas[..],
            l1_ratios: &[1.0],
            n_folds: self.n_folds,
            seed: self.seed,
            max_iter: self.max_iter,
            tol: self.tol,
        };
        path.fit(sample)
    }
}


impl Learner for ElasticNetCV {
    type Model = LinearRegressor;


    fn name(&self) -> &str {
        "ElasticNet"
    }


    fn info(&self) -> Option<Vec<(&str, String)>> {
        let info = Vec::from([
            ("# of alphas", format!("{}", self.alphas.len())),
            ("# of l1 ratios", format!("{}", self.l1_ratios.len())),
            ("# of folds", format!("{}", self.n_folds)),
            ("Max iterations", format!("{}", self.max_iter)),
        ]);
        Some(info)
    }


    fn fit(&self, sample: &Sample) -> Result<Self::Model> {
        let path = PenaltyPath {
            alphas: &self.alphas[..],
            l1_ratios: &self.l1_ratios[..],
            n_folds: self.n_folds,
            seed: self.seed,
            max_iter: self.max_iter,
            tol: self.tol,
        };
        path.fit(sample)
    }
}


/// The grid shared by the lasso and the elastic net.
struct PenaltyPath<'a> {
    alphas: &'a [f64],
    l1_ratios: &'a [f64],
    n_folds: usize,
    seed: u64,
    max_iter: usize,
    tol: f64,
}


impl PenaltyPath<'_> {
    fn fit(&self, sample: &Sample) -> Result<LinearRegressor> {
        check_alphas(self.alphas)?;
        self.check_descent_parameters()?;
        let (scaler, design) = prepare(sample, self.n_folds)?;
        let target = sample.target();

        // Candidates in the order the path visits them.
        let mut alphas = self.alphas.to_vec();
        alphas.sort_by(|a, b| b.total_cmp(a));
        let candidates = self.l1_ratios.iter()
            .flat_map(|&ratio| alphas.iter().map(move |&alpha| (ratio, alpha)))
            .collect::<Vec<_>>();

        let folds = kfold_indices(design.n_rows, self.n_folds, self.seed);
        let losses = folds.par_iter()
            .map(|(train, test)| {
                let data = design.take(train).center(&take(target, train));
                let x_test = design.take(test);
                let y_test = take(target, test);
                let mut losses = Vec::with_capacity(candidates.len());
                for &l1_ratio in self.l1_ratios {
                    let mut w = vec![0.0; design.n_features()];
                    for &alpha in &alphas {
                        self.descent(alpha, l1_ratio).solve(&data, &mut w[..]);
                        let predictions = x_test.predict(&w[..], data.intercept(&w[..]));
                        losses.push(mse(&y_test[..], &predictions[..]));
                    }
                }
                losses
            })
            .collect::<Vec<_>>();
        let (l1_ratio, alpha) = candidates[best_candidate(&losses[..])];

        // Refit along the same path so the final weights are warm-started.
        let data = design.center(target);
        let mut coef = vec![0.0; design.n_features()];
        for &a in alphas.iter().filter(|&&a| a >= alpha) {
            self.descent(a, l1_ratio).solve(&data, &mut coef[..]);
        }
        let intercept = data.intercept(&coef[..]);
        Ok(LinearRegressor {
            scaler,
            coef,
            intercept,
            alpha,
            l1_ratio: Some(l1_ratio),
        })
    }


    fn descent(&self, alpha: f64, l1_ratio: f64) -> CoordinateDescent {
        CoordinateDescent {
            alpha,
            l1_ratio,
            max_iter: self.max_iter,
            tol: self.tol,
        }
    }


    fn check_descent_parameters(&self) -> Result<()> {
        if self.l1_ratios.is_empty() {
            return Err(PipelineError::InvalidParameter {
                name: "l1_ratios",
                value: "[]".to_string(),
                reason: "at least one candidate is required",
            });
        }
        if let Some(r) = self.l1_ratios.iter().find(|r| !(**r > 0.0 && **r <= 1.0)) {
            return Err(PipelineError::InvalidParameter {
                name: "l1_ratio",
                value: r.to_string(),
                reason: "must lie in (0, 1]",
            });
        }
        if self.max_iter == 0 {
            return Err(PipelineError::InvalidParameter {
                name: "max_iter",
                value: "0".to_string(),
                reason: "must be positive",
            });
        }
        if !(self.tol > 0.0) {
            return Err(PipelineError::InvalidParameter {
                name: "tol",
                value: self.tol.to_string(),
                reason: "must be positive",
            });
        }
        Ok(())
    }
}


/// Scale the sample and build the design.
fn prepare(sample: &Sample, n_folds: usize) -> Result<(RobustScaler, Design)> {
    sample.check_trainable()?;
    let n_sample = sample.shape().0;
    check_n_folds(n_sample, n_folds)?;
    let scaler = RobustScaler::fit(sample);
    let design = Design::new(scaler.transform(sample), n_sample);
    Ok((scaler, design))
}


fn check_alphas(alphas: &[f64]) -> Result<()> {
    if alphas.is_empty() {
        return Err(PipelineError::InvalidParameter {
            name: "alphas",
            value: "[]".to_string(),
            reason: "at least one candidate is required",
        });
    }
    if let Some(a) = alphas.iter().find(|a| !(**a > 0.0 && a.is_finite())) {
        return Err(PipelineError::InvalidParameter {
            name: "alpha",
            value: a.to_string(),
            reason: "must be positive and finite",
        });
    }
    Ok(())
}


fn take(values: &[f64], rows: &[usize]) -> Vec<f64> {
    rows.iter().map(|&i| values[i]).collect()
}


/// Index of the candidate with the smallest mean loss over the folds.
/// With [`Scoring::R2`] this is the largest mean R².
/// `losses[fold][candidate]`. The earliest candidate wins a tie.
fn best_candidate(losses: &[Vec<f64>]) -> usize {
    let n_candidates = losses.first().map_or(0, Vec::len);
    let n_folds = losses.len() as f64;
    (0..n_candidates)
        .map(|k| {
            let mean = losses.iter().map(|fold| fold[k]).sum::<f64>() / n_folds;
            (k, mean)
        })
        .fold((0, f64::INFINITY), |best, (k, mean)| {
            if mean < best.1 { (k, mean) } else { best }
        })
        .0
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_best_candidate_prefers_earliest_tie() {
        let losses = vec![
            vec![3.0, 1.0, 1.0],
            vec![3.0, 2.0, 2.0],
        ];
        let result = best_candidate(&losses[..]);
        assert_eq!(1, result, "expected 1, got {result}.");
    }


    /// Two folds of very different spread, two candidates.
    /// The first candidate has the smaller pooled error,
    /// the second one explains more of each fold's variance.
    #[test]
    fn test_r2_and_mse_rank_candidates_differently() {
        let folds = [
            (vec![0.0, 10.0], [vec![-2.0, 6.0], vec![-3.0, 6.0]]),
            (vec![0.0, 1.0], [vec![-0.2, 0.4], vec![-0.3, 0.9]]),
        ];
        let losses_by = |scoring: Scoring| {
            folds.iter()
                .map(|(actual, candidates)| {
                    candidates.iter()
                        .map(|predicted| scoring.loss(&actual[..], &predicted[..]))
                        .collect::<Vec<_>>()
                })
                .collect::<Vec<_>>()
        };

        let result = best_candidate(&losses_by(Scoring::MeanSquaredError)[..]);
        assert_eq!(0, result, "expected 0, got {result}.");
        let result = best_candidate(&losses_by(Scoring::R2)[..]);
        assert_eq!(1, result, "expected 1, got {result}.");
    }


    #[test]
    fn test_rejects_non_positive_alpha() {
        assert!(check_alphas(&[1.0, 0.0]).is_err());
        assert!(check_alphas(&[]).is_err());
        assert!(check_alphas(&[1e-4]).is_ok());
    }
}
