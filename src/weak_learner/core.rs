use crate::Sample;


/// An interface that returns a function that fits
/// the residual signal of the current predictions.
/// A weak learner only needs the labeled sample and
/// the predictions of the model built so far.
pub trait WeakLearner {
    /// The hypothesis returned by [`WeakLearner::produce`].
    type Hypothesis;


    /// Returns the name of the weak learner.
    fn name(&self) -> &str;


    /// Returns the information of the weak learner as `String`.
    fn info(&self) -> Option<Vec<(&str, String)>> {
        None
    }


    /// Returns a hypothesis fitted to `sample`
    /// given the current `predictions`.
    fn produce(&self, sample: &Sample, predictions: &[f64])
        -> Self::Hypothesis;
}
