//! The trained-model interface.
use crate::Sample;


/// A trait that defines the behavor of a trained regressor.
/// You only need to implement `predict` method.
pub trait Regressor {
    /// Predicts the target value of the `row`-th example of `sample`.
    fn predict(&self, sample: &Sample, row: usize) -> f64;


    /// Predicts the target values of `sample`.
    fn predict_all(&self, sample: &Sample) -> Vec<f64>
    {
        let n_sample = sample.shape().0;
        (0..n_sample).map(|row| self.predict(sample, row))
            .collect::<Vec<_>>()
    }


    /// A one-line description of the fitted parameters.
    fn summary(&self) -> Option<String> {
        None
    }
}


impl<R> Regressor for Box<R>
    where R: Regressor + ?Sized,
{
    #[inline]
    fn predict(&self, sample: &Sample, row: usize) -> f64 {
        (**self).predict(sample, row)
    }


    #[inline]
    fn predict_all(&self, sample: &Sample) -> Vec<f64> {
        (**self).predict_all(sample)
    }


    #[inline]
    fn summary(&self) -> Option<String> {
        (**self).summary()
    }
}
