//! K-fold partitions and cross-validated scoring.
/// K-fold partitions.
pub mod cross_validation;
mod scoring;


pub use cross_validation::{
    CrossValidation,
    kfold_indices,
};
pub use scoring::{CvScore, Scoring, cross_val_rmse};
pub use crate::common::loss_functions::{r2_score, rmse};
