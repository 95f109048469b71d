//! Trained models assembled by the boosting algorithms.

/// Defines the additive model of the gradient-boosted trees.
pub mod weighted_sum;


pub use weighted_sum::WeightedSum;
