use rayon::prelude::*;
use serde::{Serialize, Deserialize};

use crate::{Regressor, Sample};


/// An additive model `base_score + Σ_t w_t h_t(x)`.
/// The gradient-boosted trees return this struct.
/// You can read/write this struct by `Serde` trait.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WeightedSum<H> {
    /// Constant prediction before the first round.
    pub base_score: f64,
    /// Weights on each hypothesis in `self.hypotheses`.
    pub weights: Vec<f64>,
    /// Set of hypotheses.
    pub hypotheses: Vec<H>,
}


impl<H> WeightedSum<H> {
    /// A model that always predicts `base_score`.
    #[inline]
    pub fn constant(base_score: f64) -> Self {
        Self { base_score, weights: Vec::new(), hypotheses: Vec::new() }
    }


    /// Append a pair `(weight, H)` to the current model.
    #[inline]
    pub fn push(&mut self, weight: f64, hypothesis: H) {
        self.weights.push(weight);
        self.hypotheses.push(hypothesis);
    }


    /// Keep only the first `n_rounds` hypotheses.
    #[inline]
    pub fn truncate(&mut self, n_rounds: usize) {
        self.weights.truncate(n_rounds);
        self.hypotheses.truncate(n_rounds);
    }


    /// Returns the number of hypotheses.
    #[inline]
    pub fn len(&self) -> usize {
        self.hypotheses.len()
    }


    /// Returns `true` if no round has been added.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.hypotheses.is_empty()
    }
}


impl<H> Regressor for WeightedSum<H>
    where H: Regressor + Sync,
{
    fn predict(&self, sample: &Sample, row: usize) -> f64 {
        self.weights.iter()
            .zip(&self.hypotheses[..])
            .map(|(w, h)| *w * h.predict(sample, row))
            .sum::<f64>()
            + self.base_score
    }


    fn predict_all(&self, sample: &Sample) -> Vec<f64> {
        let n_sample = sample.shape().0;
        (0..n_sample).into_par_iter()
            .map(|row| self.predict(sample, row))
            .collect()
    }


    fn summary(&self) -> Option<String> {
        Some(format!("base score = {:.4}, {} rounds", self.base_score, self.len()))
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::Feature;

    struct Identity;

    impl Regressor for Identity {
        fn predict(&self, sample: &Sample, row: usize) -> f64 {
            sample["x"][row]
        }
    }


    #[test]
    fn test_base_score_plus_weighted_terms() {
        let sample = Sample::unlabeled(vec![Feature::new("x", vec![1.0, 2.0])])
            .unwrap();
        let mut f = WeightedSum::constant(10.0);
        f.push(0.5, Identity);
        f.push(0.25, Identity);

        let result = f.predict_all(&sample);
        let expect = vec![10.75, 11.5];
        assert_eq!(expect, result, "expected {expect:?}, got {result:?}.");

        f.truncate(1);
        let result = f.predict(&sample, 1);
        assert_eq!(11.0, result, "expected 11, got {result}.");
    }
}
