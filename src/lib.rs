#![warn(missing_docs)]

//!
//! A crate that predicts house prices from tabular records.
//!
//! A run goes through the following stages.
//!
//! - Preprocessing
//!     Missing values are filled column by column
//!     ([`Imputer`](preprocessing::Imputer)),
//!     a few aggregate features are appended
//!     ([`FeatureSynthesizer`](preprocessing::FeatureSynthesizer)),
//!     heavily skewed numeric columns are `log1p`-transformed
//!     ([`SkewCorrector`](preprocessing::SkewCorrector)),
//!     and the categorical columns are one-hot encoded
//!     ([`OneHotEncoder`](preprocessing::OneHotEncoder)).
//!
//!
//! - Ensemble
//!     Four regressors are fitted on the encoded training rows.
//!     Three linear models ([`RidgeCV`], [`LassoCV`], [`ElasticNetCV`])
//!     pick their penalty by K-fold CV on robust-scaled inputs.
//!     A gradient boosting machine ([`GBM`]) with
//!     [`RegressionTree`] weak learners is tuned by [`GradientBoostingCV`].
//!     The blended prediction is the plain mean of the four.
//!
//!
//! [`Pipeline`] wires everything together:
//!
//! ```no_run
//! use houseboosts::{HousingData, Pipeline, PipelineConfig};
//!
//! let config = PipelineConfig::default();
//! let data = HousingData::load("train.csv", "test.csv", &config).unwrap();
//! let report = Pipeline::new(config).run(data).unwrap();
//! println!("{report}");
//! ```

pub mod common;
pub mod config;
pub mod error;
pub mod logging;
pub mod sample;
pub mod dataset;
pub mod preprocessing;

pub mod regressor;
pub mod learner;
pub mod hypothesis;
pub mod weak_learner;
pub mod booster;
pub mod linear_model;

pub mod evaluation;
pub mod ensemble;
pub mod pipeline;
pub mod submission;

pub mod prelude;


pub use error::{PipelineError, Result};
pub use config::{BoostingConfig, LinearConfig, PipelineConfig};
pub use logging::Logger;

pub use sample::{Column, Feature, Sample, Table, TableReader};
pub use dataset::HousingData;

pub use common::{LossFunction, LossType};

pub use regressor::Regressor;
pub use learner::{AnyLearner, Learner};
pub use hypothesis::WeightedSum;

pub use weak_learner::{
    WeakLearner,
    RegressionTree,
    RegressionTreeBuilder,
    RegressionTreeRegressor,
};

pub use booster::{
    Booster,
    BoostedTrees,
    GBM,
    GradientBoostingCV,
};

pub use linear_model::{
    ElasticNetCV,
    LassoCV,
    LinearRegressor,
    RidgeCV,
    RobustScaler,
};

pub use evaluation::{cross_val_rmse, r2_score, rmse, CrossValidation, CvScore, Scoring};
pub use ensemble::{Blend, EnsembleTrainer};
pub use pipeline::{Pipeline, PipelineReport};
pub use submission::Submission;
