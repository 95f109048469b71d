use rayon::prelude::*;

use super::bin::Bins;
use super::regression_tree_algorithm::RegressionTree;
use crate::{
    common::loss_functions::LossType,
    PipelineError,
    Result,
    Sample,
};


/// The number of bins set as default.
pub const DEFAULT_NBIN: usize = 255;
/// The maxmial depth set as default.
pub const DEFAULT_MAX_DEPTH: usize = 6;
/// Default L2-regularization parameter
pub const DEFAULT_LAMBDA_L2: f64 = 1.0;
/// Default minimum hessian sum of a child.
pub const DEFAULT_MIN_CHILD_WEIGHT: f64 = 1.0;


/// A struct that builds `RegressionTree`.
/// `RegressionTreeBuilder` keeps parameters for constructing `RegressionTree`.
///
/// # Example
///
/// ```no_run
/// use houseboosts::prelude::*;
///
/// # fn run(sample: &Sample) -> houseboosts::Result<()> {
/// let weak_learner = RegressionTreeBuilder::new(sample)
///     .max_depth(3)
///     .loss(LossType::L2)
///     .lambda_l2(1.0)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct RegressionTreeBuilder<'a> {
    sample: &'a Sample,
    /// Number of bins per feature.
    n_bins: usize,


    max_depth: usize,


    /// L2 regularization for the leaf values.
    lambda_l2: f64,


    min_child_weight: f64,

    /// Loss function
    loss: LossType,
}


impl<'a> RegressionTreeBuilder<'a> {
    /// Construct a new instance of `RegressionTreeBuilder`.
    /// By default,
    /// `RegressionTreeBuilder` sets the parameters as follows;
    /// ```text
    /// n_bins: DEFAULT_NBIN == 255,
    /// max_depth: DEFAULT_MAX_DEPTH == 6,
    /// lambda_l2: DEFAULT_LAMBDA_L2 == 1.0,
    /// min_child_weight: DEFAULT_MIN_CHILD_WEIGHT == 1.0,
    /// loss: LossType::L2,
    /// ```
    pub fn new(sample: &'a Sample) -> Self {
        Self {
            sample,
            n_bins: DEFAULT_NBIN,
            max_depth: DEFAULT_MAX_DEPTH,
            lambda_l2: DEFAULT_LAMBDA_L2,
            min_child_weight: DEFAULT_MIN_CHILD_WEIGHT,
            loss: LossType::L2,
        }
    }


    /// Specify the loss type. Default is `LossType::L2`.
    pub fn loss(mut self, loss: LossType) -> Self {
        self.loss = loss;
        self
    }


    /// Set the L2-regularization parameter.
    pub fn lambda_l2(mut self, lambda_l2: f64) -> Self {
        self.lambda_l2 = lambda_l2;
        self
    }


    /// Specify the maximal number of split levels.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }


    /// Set the smallest hessian sum a child may have.
    pub fn min_child_weight(mut self, weight: f64) -> Self {
        self.min_child_weight = weight;
        self
    }


    /// Set the maximal number of bins per feature.
    /// A feature with fewer distinct values gets fewer bins.
    pub fn n_bins(mut self, n_bins: usize) -> Self {
        self.n_bins = n_bins;
        self
    }


    /// Build a `RegressionTree`.
    /// This method consumes `self`.
    pub fn build(self) -> Result<RegressionTree> {
        if self.max_depth == 0 {
            return Err(PipelineError::InvalidParameter {
                name: "max_depth",
                value: "0".to_string(),
                reason: "must be positive",
            });
        }
        if self.n_bins == 0 {
            return Err(PipelineError::InvalidParameter {
                name: "n_bins",
                value: "0".to_string(),
                reason: "must be positive",
            });
        }
        if !(self.lambda_l2 >= 0.0) {
            return Err(PipelineError::InvalidParameter {
                name: "lambda_l2",
                value: self.lambda_l2.to_string(),
                reason: "must be non-negative",
            });
        }
        if !(self.min_child_weight >= 0.0) {
            return Err(PipelineError::InvalidParameter {
                name: "min_child_weight",
                value: self.min_child_weight.to_string(),
                reason: "must be non-negative",
            });
        }

        let n_bins = self.n_bins;
        let bins = self.sample.features()
            .par_iter()
            .map(|feature| {
                let n_bin = feature.distinct_value_count().min(n_bins);
                Bins::cut(feature.values(), n_bin)
            })
            .collect::<Vec<_>>();
        let feature_names = self.sample.feature_names()
            .into_iter()
            .map(String::from)
            .collect();

        let tree = RegressionTree::from_components(
            feature_names,
            bins,
            self.max_depth,
            self.lambda_l2,
            self.min_child_weight,
            self.loss,
        );
        Ok(tree)
    }
}
