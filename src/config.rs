//! Run configuration.
//! Every field has a default,
//! so a JSON file only needs to list the values it overrides.
//!
//! ```no_run
//! use houseboosts::PipelineConfig;
//!
//! let config = PipelineConfig::from_json_file("config.json")
//!     .unwrap()
//!     .verbose(false);
//! ```
use serde::{Serialize, Deserialize};

use crate::Result;

use std::fs;
use std::path::Path;


/// Default name of the target column.
pub const DEFAULT_TARGET: &str = "SalePrice";
/// Default name of the identity column.
pub const DEFAULT_ID: &str = "Id";
/// Columns whose absolute skewness exceeds this value get `log1p`.
pub const DEFAULT_SKEW_THRESHOLD: f64 = 0.5;
/// Number of folds for every cross-validation.
pub const DEFAULT_N_FOLDS: usize = 5;
/// Seed of the fold partition shared by the linear models.
pub const DEFAULT_LINEAR_SEED: u64 = 42;
/// Seed of the fold partition used by the boosted trees.
pub const DEFAULT_TREE_SEED: u64 = 2;


/// Top-level configuration of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Name of the target column in the training file.
    pub target: String,
    /// Name of the identity column.
    pub id: String,
    /// Skewness threshold of the distribution normalizer.
    pub skew_threshold: f64,
    /// Number of folds used for scoring and model selection.
    pub n_folds: usize,
    /// Seed of the linear models' fold partition.
    pub linear_seed: u64,
    /// Seed of the boosted trees' fold partition.
    pub tree_seed: u64,
    /// Linear models.
    pub linear: LinearConfig,
    /// Gradient-boosted trees.
    pub boosting: BoostingConfig,
    /// Print the progress.
    pub verbose: bool,
    /// Fit the ensemble members on the rayon thread pool.
    pub parallel: bool,
}


/// Hyperparameter grids of the three linear models.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinearConfig {
    /// Ridge penalties.
    pub ridge_alphas: Vec<f64>,
    /// Lasso penalties.
    pub lasso_alphas: Vec<f64>,
    /// Sweep cap of the lasso.
    pub lasso_max_iter: usize,
    /// Elastic-net penalties.
    pub elastic_net_alphas: Vec<f64>,
    /// Elastic-net L1 ratios.
    pub elastic_net_l1_ratios: Vec<f64>,
    /// Sweep cap of the elastic net.
    pub elastic_net_max_iter: usize,
    /// Tolerance of the coordinate descent (duality gap, relative to `‖y‖²`).
    pub tolerance: f64,
}


/// Grid and tree parameters of the gradient-boosted trees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoostingConfig {
    /// Candidate numbers of rounds.
    pub n_estimators: Vec<usize>,
    /// Candidate shrinkage factors.
    pub learning_rate: Vec<f64>,
    /// Candidate patience values. `0` disables early stopping.
    pub early_stopping_rounds: Vec<usize>,
    /// Depth bound of each tree.
    pub max_depth: usize,
    /// L2 penalty on the leaf values.
    pub lambda_l2: f64,
    /// Minimum hessian sum of a child.
    pub min_child_weight: f64,
    /// Histogram bins per feature.
    pub n_bins: usize,
    /// Fraction of the training rows held out to drive early stopping.
    pub validation_fraction: f64,
}


impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            target: DEFAULT_TARGET.to_string(),
            id: DEFAULT_ID.to_string(),
            skew_threshold: DEFAULT_SKEW_THRESHOLD,
            n_folds: DEFAULT_N_FOLDS,
            linear_seed: DEFAULT_LINEAR_SEED,
            tree_seed: DEFAULT_TREE_SEED,
            linear: LinearConfig::default(),
            boosting: BoostingConfig::default(),
            verbose: true,
            parallel: false,
        }
    }
}


impl Default for LinearConfig {
    fn default() -> Self {
        let ridge_alphas = (0..11)
            .map(|k| (145 + k) as f64 / 10.0)
            .collect();
        let lasso_alphas = vec![
            5e-5, 1e-4, 2e-4, 3e-4, 4e-4, 5e-4, 6e-4, 7e-4, 8e-4,
        ];
        let elastic_net_alphas = vec![
            1e-4, 2e-4, 3e-4, 4e-4, 5e-4, 6e-4, 7e-4,
        ];
        let elastic_net_l1_ratios = vec![0.8, 0.85, 0.9, 0.95, 0.99, 1.0];
        Self {
            ridge_alphas,
            lasso_alphas,
            lasso_max_iter: 10_000_000,
            elastic_net_alphas,
            elastic_net_l1_ratios,
            elastic_net_max_iter: 10_000_000,
            tolerance: 1e-4,
        }
    }
}


impl Default for BoostingConfig {
    fn default() -> Self {
        Self {
            n_estimators: vec![1000],
            learning_rate: vec![0.1],
            early_stopping_rounds: vec![1],
            max_depth: 6,
            lambda_l2: 1.0,
            min_child_weight: 1.0,
            n_bins: 255,
            validation_fraction: 0.1,
        }
    }
}


impl PipelineConfig {
    /// Read a configuration from a JSON file.
    /// Missing fields take their default values.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let config = serde_json::from_str(&text)?;
        Ok(config)
    }


    /// Set the verbosity.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }


    /// Fit the ensemble members in parallel.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }


    /// Replace the boosting configuration.
    pub fn boosting(mut self, boosting: BoostingConfig) -> Self {
        self.boosting = boosting;
        self
    }


    /// Replace the linear configuration.
    pub fn linear(mut self, linear: LinearConfig) -> Self {
        self.linear = linear;
        self
    }
}
