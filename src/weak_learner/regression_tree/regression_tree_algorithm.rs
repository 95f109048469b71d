use rayon::prelude::*;

use super::{
    bin::{Bin, Bins, GradientHessian},
    node::Node,
    regression_tree_regressor::RegressionTreeRegressor,
    split_rule::{LeftRight, Splitter},
};
use crate::{
    common::loss_functions::{LossFunction, LossType},
    Sample,
    WeakLearner,
};

use std::fmt;


/// Histogram-based second-order regression tree.
///
/// Each call of [`WeakLearner::produce`] fits a tree to the gradients
/// and hessians of the loss at the current predictions.
/// A leaf predicts `-G / (H + λ)`, where `G` and `H` are
/// the sums of the gradients and the hessians on the leaf.
/// A split is kept only if it strictly decreases
/// the regularized objective.
pub struct RegressionTree {
    feature_names: Vec<String>,
    bins: Vec<Bins>,
    // The maximal number of split levels
    max_depth: usize,

    // Regularization parameter
    lambda_l2: f64,

    // Smallest hessian sum allowed in a child
    min_child_weight: f64,

    // LossType function
    loss_type: LossType,
}


/// The best split found on a feature.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    index: usize,
    gain: f64,
    threshold: f64,
}


impl RegressionTree {
    #[inline]
    pub(super) fn from_components(
        feature_names: Vec<String>,
        bins: Vec<Bins>,
        max_depth: usize,
        lambda_l2: f64,
        min_child_weight: f64,
        loss_type: LossType,
    ) -> Self
    {
        Self {
            feature_names,
            bins,
            max_depth,
            lambda_l2,
            min_child_weight,
            loss_type,
        }
    }


    /// Returns the loss this tree fits.
    pub fn loss_type(&self) -> LossType {
        self.loss_type
    }


    fn gradient_and_hessian(&self, sample: &Sample, predictions: &[f64])
        -> Vec<GradientHessian>
    {
        let target = sample.target();
        let grad = self.loss_type.gradient(predictions, target);
        let hess = self.loss_type.hessian(predictions, target);
        grad.into_iter()
            .zip(hess)
            .map(|(g, h)| GradientHessian::new(g, h))
            .collect()
    }


    fn grow(
        &self,
        sample: &Sample,
        gh: &[GradientHessian],
        indices: Vec<usize>,
        depth: usize,
    ) -> Node
    {
        let total = sum_of(&indices[..], gh);
        let prediction = -total.grad / (total.hess + self.lambda_l2);

        if depth == 0 || indices.len() < 2 {
            return Node::leaf(prediction);
        }

        let candidate = match self.best_split(sample, gh, &indices[..], total) {
            Some(candidate) => candidate,
            None => { return Node::leaf(prediction); },
        };

        let name = &self.feature_names[candidate.index];
        let rule = Splitter::new(candidate.index, name, candidate.threshold);

        let (lindices, rindices): (Vec<usize>, Vec<usize>) = indices.into_iter()
            .partition(|&i| rule.split(sample, i) == LeftRight::Left);

        if lindices.is_empty() || rindices.is_empty() {
            return Node::leaf(prediction);
        }

        let (left, right) = rayon::join(
            || self.grow(sample, gh, lindices, depth - 1),
            || self.grow(sample, gh, rindices, depth - 1),
        );
        Node::branch(rule, left, right)
    }


    /// Returns the split with the largest positive gain, if any.
    /// On a tie, the feature that comes first wins.
    fn best_split(
        &self,
        sample: &Sample,
        gh: &[GradientHessian],
        indices: &[usize],
        total: GradientHessian,
    ) -> Option<Candidate>
    {
        sample.features()
            .par_iter()
            .zip(&self.bins[..])
            .enumerate()
            .filter_map(|(index, (feature, bins))| {
                let pack = bins.pack(indices, feature.values(), gh);
                self.best_split_at(&pack[..], total)
                    .map(|(gain, threshold)| Candidate { index, gain, threshold })
            })
            .filter(|candidate| candidate.gain > 0.0)
            .reduce_with(|a, b| {
                if b.gain > a.gain || (b.gain == a.gain && b.index < a.index) {
                    b
                } else {
                    a
                }
            })
    }


    /// Scan the bin boundaries of one feature.
    fn best_split_at(
        &self,
        pack: &[(Bin, GradientHessian)],
        total: GradientHessian,
    ) -> Option<(f64, f64)>
    {
        let lambda = self.lambda_l2;
        let parent = total.grad.powi(2) / (total.hess + lambda);

        let mut left = GradientHessian::default();
        let mut best: Option<(f64, f64)> = None;

        // The last bin cannot be a left child boundary.
        let n_boundaries = pack.len().saturating_sub(1);
        for (bin, gh) in &pack[..n_boundaries] {
            left += *gh;
            let right = GradientHessian::new(
                total.grad - left.grad,
                total.hess - left.hess,
            );
            if left.hess < self.min_child_weight
                || right.hess < self.min_child_weight
            {
                continue;
            }

            let gain = 0.5 * (
                left.grad.powi(2) / (left.hess + lambda)
                + right.grad.powi(2) / (right.hess + lambda)
                - parent
            );
            if best.map_or(true, |(g, _)| gain > g) {
                best = Some((gain, bin.0.end));
            }
        }
        best
    }
}


fn sum_of(indices: &[usize], gh: &[GradientHessian]) -> GradientHessian {
    let mut total = GradientHessian::default();
    indices.iter().for_each(|&i| { total += gh[i]; });
    total
}


impl WeakLearner for RegressionTree {
    type Hypothesis = RegressionTreeRegressor;


    fn name(&self) -> &str {
        "Regression Tree"
    }


    fn info(&self) -> Option<Vec<(&str, String)>> {
        let n_bins = self.bins.iter()
            .map(Bins::len)
            .max()
            .unwrap_or(0);
        let info = Vec::from([
            ("Max depth", format!("{}", self.max_depth)),
            ("Lambda (L2)", format!("{}", self.lambda_l2)),
            ("Min child weight", format!("{}", self.min_child_weight)),
            ("Max # of bins", format!("{n_bins}")),
            ("Loss", self.loss_type.name().to_string()),
        ]);
        Some(info)
    }


    fn produce(&self, sample: &Sample, predictions: &[f64])
        -> Self::Hypothesis
    {
        let gh = self.gradient_and_hessian(sample, predictions);
        let n_sample = sample.shape().0;
        let indices = (0..n_sample).collect::<Vec<usize>>();

        let root = self.grow(sample, &gh[..], indices, self.max_depth);
        RegressionTreeRegressor::from(root)
    }
}


impl fmt::Display for RegressionTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "\
            ----------\n\
            # Regression Tree Weak Learner\n\n\
            - Max depth: {}\n\
            - Loss function: {}\n\
            - Bins:\
            ",
            self.max_depth,
            self.loss_type.name(),
        )?;

        let width = self.feature_names.iter()
            .map(|name| name.len())
            .max()
            .unwrap_or(0);
        for (name, bins) in self.feature_names.iter().zip(&self.bins) {
            let n_bins = bins.len();
            writeln!(
                f,
                "\t* [{name: <width$} | {n_bins: >3} bins]  {bins}"
            )?;
        }

        write!(f, "----------")
    }
}
