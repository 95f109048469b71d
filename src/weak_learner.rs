//! The files in `weak_learner/` directory defines
//! `WeakLearner` trait and the regression tree.

/// Provides WeakLearner trait.
pub mod core;

/// Defines Regression Tree.
pub mod regression_tree;


pub use self::core::WeakLearner;

pub use self::regression_tree::{
    RegressionTree,
    RegressionTreeBuilder,
    RegressionTreeRegressor,
};
