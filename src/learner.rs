//! The untrained-model interface.
//!
//! A [`Learner`] is a configuration that turns a labeled [`Sample`]
//! into a [`Regressor`].
//! The ensemble and the evaluator only see [`AnyLearner`],
//! so they do not depend on the concrete model types.
use crate::{Regressor, Result, Sample};


/// A trained model behind a pointer.
pub type BoxedRegressor = Box<dyn Regressor + Send + Sync>;


/// A trait that defines the behavor of an untrained model.
pub trait Learner {
    /// The trained model returned by [`Learner::fit`].
    type Model: Regressor;


    /// Returns the name of the model.
    fn name(&self) -> &str;


    /// Returns the information of the model as `String`.
    fn info(&self) -> Option<Vec<(&str, String)>> {
        None
    }


    /// Fit a model on a labeled sample.
    /// The hyperparameters are chosen on `sample` only.
    fn fit(&self, sample: &Sample) -> Result<Self::Model>;
}


/// Object-safe version of [`Learner`].
/// Every `Learner` whose model is `Send + Sync` implements it.
pub trait AnyLearner: Send + Sync {
    /// Returns the name of the model.
    fn name(&self) -> &str;


    /// Returns the information of the model as `String`.
    fn info(&self) -> Option<Vec<(&str, String)>>;


    /// Fit a model and erase its type.
    fn fit_boxed(&self, sample: &Sample) -> Result<BoxedRegressor>;
}


impl<L> AnyLearner for L
    where L: Learner + Send + Sync,
          L::Model: Send + Sync + 'static,
{
    fn name(&self) -> &str {
        Learner::name(self)
    }


    fn info(&self) -> Option<Vec<(&str, String)>> {
        Learner::info(self)
    }


    fn fit_boxed(&self, sample: &Sample) -> Result<BoxedRegressor> {
        let model = self.fit(sample)?;
        Ok(Box::new(model))
    }
}
