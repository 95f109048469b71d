use rayon::prelude::*;
use serde::{Serialize, Deserialize};

use crate::{
    common::stats,
    Sample,
};


const LOWER_QUANTILE: f64 = 0.25;
const UPPER_QUANTILE: f64 = 0.75;


/// Scales each feature by `(x - median) / IQR`.
/// A feature whose interquartile range is (nearly) zero keeps scale `1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RobustScaler {
    center: Vec<f64>,
    scale: Vec<f64>,
}


impl RobustScaler {
    /// Learn the median and the interquartile range of each feature.
    pub fn fit(sample: &Sample) -> Self {
        let (center, scale) = sample.features()
            .par_iter()
            .map(|feature| {
                if feature.is_empty() { return (0.0, 1.0); }
                let values = stats::sorted(feature.values());
                let median = stats::quantile_sorted(&values[..], 0.5);
                let lower = stats::quantile_sorted(&values[..], LOWER_QUANTILE);
                let upper = stats::quantile_sorted(&values[..], UPPER_QUANTILE);
                let iqr = upper - lower;
                let iqr = if iqr < 10.0 * f64::EPSILON { 1.0 } else { iqr };
                (median, iqr)
            })
            .unzip();
        Self { center, scale }
    }


    /// Returns the per-feature centers (medians).
    pub fn center(&self) -> &[f64] {
        &self.center[..]
    }


    /// Returns the per-feature scales (interquartile ranges).
    pub fn scale(&self) -> &[f64] {
        &self.scale[..]
    }


    /// Returns the scaled features of `sample`, column by column.
    pub fn transform(&self, sample: &Sample) -> Vec<Vec<f64>> {
        sample.features()
            .par_iter()
            .zip(&self.center[..])
            .zip(&self.scale[..])
            .map(|((feature, c), s)| {
                feature.iter().map(|x| (x - c) / s).collect()
            })
            .collect()
    }
}
