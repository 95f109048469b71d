//! Penalized linear regression on robust-scaled features.
mod coordinate_descent;
mod cv;
pub(crate) mod design;
mod linear_regressor;
mod ridge;
mod robust_scaler;


pub use coordinate_descent::{DEFAULT_MAX_ITER, DEFAULT_TOLERANCE};
pub use cv::{ElasticNetCV, LassoCV, RidgeCV};
pub use linear_regressor::LinearRegressor;
pub use robust_scaler::RobustScaler;
