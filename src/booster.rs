//! Provides the boosting protocol and the gradient-boosted trees.

mod core;

mod gradient_boost;


/// Booster trait
pub use self::core::Booster;

pub use self::gradient_boost::{
    BoostedTrees,
    BoostingCandidate,
    GBM,
    GradientBoostingCV,
    holdout,
};
