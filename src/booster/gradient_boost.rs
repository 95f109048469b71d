//! Gradient-boosted regression trees.
pub mod gbm;
mod grid_search;


pub use gbm::{GBM, holdout};
pub use grid_search::{BoostedTrees, BoostingCandidate, GradientBoostingCV};
