//! Defines some common functions used in this library.

/// Defines loss function trait and its instances.
pub mod loss_functions;

/// Descriptive statistics over `f64` slices.
pub mod stats;


pub use loss_functions::{LossFunction, LossType};
