//! Record-table transforms that run before the models:
//! imputation, feature synthesis, skew correction, and encoding.

/// The static imputation table.
pub mod policy;
/// The imputation engine.
pub mod imputer;
/// Derived features.
pub mod synthesizer;
/// The distribution normalizer.
pub mod skew;
/// One-hot encoding.
pub mod encoder;


pub use policy::{policy_for, Bespoke, ImputeStrategy, Policy};
pub use imputer::{Fill, ImputationReport, Imputer};
pub use synthesizer::{DerivedFeature, Derivation, FeatureSynthesizer, DERIVED_FEATURES};
pub use skew::{expm1, log1p_target, SkewCorrector, SkewReport};
pub use encoder::{split_train_test, OneHotEncoder};
