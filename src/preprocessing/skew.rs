//! The distribution normalizer.
use rayon::prelude::*;

use crate::{
    common::stats,
    config::DEFAULT_SKEW_THRESHOLD,
    PipelineError,
    Result,
    Table,
};


/// Outcome of [`SkewCorrector::fit_transform`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkewReport {
    /// Skewness of every numeric column before the transform,
    /// sorted in descending order.
    pub skewness: Vec<(String, f64)>,
    /// Columns transformed by `log1p`, in column order.
    pub transformed: Vec<String>,
}


/// Applies `log1p` to every numeric column whose absolute skewness
/// exceeds the threshold.
///
/// The transform is not idempotent:
/// a second call transforms every column that is still skewed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkewCorrector {
    threshold: f64,
}


impl Default for SkewCorrector {
    fn default() -> Self {
        Self::new(DEFAULT_SKEW_THRESHOLD)
    }
}


impl SkewCorrector {
    /// Construct a new instance of `SkewCorrector`.
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }


    /// Returns the threshold.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }


    /// Transform the skewed columns of `table` in place.
    ///
    /// Every value of a column to be transformed must be greater than
    /// `-1`; otherwise this method returns `PipelineError::Domain`
    /// and `table` is left unchanged.
    pub fn fit_transform(&self, table: &mut Table) -> Result<SkewReport> {
        let numeric = table.columns()
            .iter()
            .filter(|column| column.is_numeric())
            .collect::<Vec<_>>();

        let skewness = numeric.par_iter()
            .map(|column| {
                let values = column.dense_values()?;
                let skew = stats::skewness(&values[..]);
                Ok((column.name().to_string(), skew))
            })
            .collect::<Result<Vec<_>>>()?;

        let transformed = skewness.iter()
            .filter(|(_, skew)| skew.abs() > self.threshold)
            .map(|(name, _)| name.clone())
            .collect::<Vec<_>>();

        // Validate every column before mutating any of them.
        for name in transformed.iter() {
            let values = table.column(name)?.as_numeric()?;
            if let Some(value) = values.iter().flatten().find(|v| **v <= -1.0) {
                return Err(PipelineError::Domain {
                    column: name.clone(),
                    value: *value,
                });
            }
        }

        for name in transformed.iter() {
            table.column_mut(name)?
                .as_numeric_mut()?
                .par_iter_mut()
                .flatten()
                .for_each(|v| { *v = v.ln_1p(); });
        }

        let mut skewness = skewness;
        skewness.sort_by(|a, b| b.1.total_cmp(&a.1));
        Ok(SkewReport { skewness, transformed })
    }
}


/// `ln(1 + y)` of each target value.
pub fn log1p_target(target: &[f64]) -> Result<Vec<f64>> {
    if let Some(&value) = target.iter().find(|y| **y <= -1.0) {
        return Err(PipelineError::Domain {
            column: "target".to_string(),
            value,
        });
    }
    Ok(target.iter().map(|y| y.ln_1p()).collect())
}


/// `exp(y) - 1` of each value; the inverse of [`log1p_target`].
pub fn expm1(values: &[f64]) -> Vec<f64> {
    values.iter().map(|y| y.exp_m1()).collect()
}
