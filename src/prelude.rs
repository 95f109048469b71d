//! Exports the everyday types and traits.
//!
pub use crate::{
    PipelineConfig,
    PipelineError,
    Result,
};


pub use crate::sample::{
    Column,
    Feature,
    Sample,
    Table,
};


pub use crate::regressor::Regressor;
pub use crate::learner::Learner;


pub use crate::booster::{
    // Booster trait
    Booster,

    // Gradient boosting
    GBM,
    GradientBoostingCV,
};


pub use crate::weak_learner::{
    // Weak learner trait
    WeakLearner,

    // Regression tree
    RegressionTree,
    RegressionTreeBuilder,
    RegressionTreeRegressor,
};


pub use crate::linear_model::{
    ElasticNetCV,
    LassoCV,
    RidgeCV,
};


pub use crate::common::LossType;
pub use crate::hypothesis::WeightedSum;
pub use crate::evaluation::{cross_val_rmse, r2_score, rmse, CvScore, Scoring};
pub use crate::ensemble::{Blend, EnsembleTrainer};
