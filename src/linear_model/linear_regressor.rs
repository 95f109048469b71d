use serde::{Serialize, Deserialize};

use super::robust_scaler::RobustScaler;
use crate::{Regressor, Sample};

use std::fmt;


/// A fitted linear model on robust-scaled features.
/// `predict` applies the scaler, then `coef · x + intercept`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearRegressor {
    pub(super) scaler: RobustScaler,
    pub(super) coef: Vec<f64>,
    pub(super) intercept: f64,
    pub(super) alpha: f64,
    pub(super) l1_ratio: Option<f64>,
}


impl LinearRegressor {
    /// Coefficients on the scaled features.
    pub fn coef(&self) -> &[f64] {
        &self.coef[..]
    }


    /// Intercept on the original target scale.
    pub fn intercept(&self) -> f64 {
        self.intercept
    }


    /// The penalty chosen by cross validation.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }


    /// The mixing ratio chosen by cross validation.
    /// `None` for ridge.
    pub fn l1_ratio(&self) -> Option<f64> {
        self.l1_ratio
    }


    /// The number of non-zero coefficients.
    pub fn n_nonzero(&self) -> usize {
        self.coef.iter().filter(|c| **c != 0.0).count()
    }


    /// The scaler fitted on the training sample.
    pub fn scaler(&self) -> &RobustScaler {
        &self.scaler
    }
}


impl Regressor for LinearRegressor {
    fn predict(&self, sample: &Sample, row: usize) -> f64 {
        sample.features()
            .iter()
            .zip(self.scaler.center())
            .zip(self.scaler.scale())
            .zip(&self.coef[..])
            .map(|(((feature, c), s), w)| w * (feature[row] - c) / s)
            .sum::<f64>()
            + self.intercept
    }


    fn predict_all(&self, sample: &Sample) -> Vec<f64> {
        let n_sample = sample.shape().0;
        let mut out = vec![self.intercept; n_sample];
        sample.features()
            .iter()
            .zip(self.scaler.center())
            .zip(self.scaler.scale())
            .zip(&self.coef[..])
            .filter(|(_, w)| **w != 0.0)
            .for_each(|(((feature, c), s), w)| {
                out.iter_mut()
                    .zip(feature.iter())
                    .for_each(|(o, x)| { *o += w * (x - c) / s; });
            });
        out
    }


    fn summary(&self) -> Option<String> {
        Some(self.to_string())
    }
}


impl fmt::Display for LinearRegressor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.l1_ratio {
            Some(ratio) => write!(
                f,
                "alpha = {}, l1_ratio = {ratio}, {} of {} coefficients non-zero",
                self.alpha, self.n_nonzero(), self.coef.len(),
            ),
            None => write!(
                f,
                "alpha = {}, {} coefficients",
                self.alpha, self.coef.len(),
            ),
        }
    }
}
