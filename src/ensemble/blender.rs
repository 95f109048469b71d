use rayon::prelude::*;

use crate::{
    learner::BoxedRegressor,
    Regressor,
    Sample,
};


/// The fitted ensemble.
/// Its prediction is the unweighted mean of the members' predictions.
pub struct Blend {
    members: Vec<(String, BoxedRegressor)>,
}


impl Blend {
    /// Construct a blend from named fitted models.
    pub fn new(members: Vec<(String, BoxedRegressor)>) -> Self {
        Self { members }
    }


    /// Returns the names of the members, in fitting order.
    pub fn names(&self) -> Vec<&str> {
        self.members.iter()
            .map(|(name, _)| name.as_str())
            .collect()
    }


    /// Returns the member named `name`, if any.
    pub fn member(&self, name: &str) -> Option<&BoxedRegressor> {
        self.members.iter()
            .find(|(n, _)| n == name)
            .map(|(_, f)| f)
    }


    /// Returns the number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }


    /// Returns `true` if there is no member.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }


    /// Predictions of each member on `sample`.
    pub fn member_predictions(&self, sample: &Sample) -> Vec<(String, Vec<f64>)> {
        self.members.par_iter()
            .map(|(name, f)| (name.clone(), f.predict_all(sample)))
            .collect()
    }
}


impl Regressor for Blend {
    fn predict(&self, sample: &Sample, row: usize) -> f64 {
        if self.members.is_empty() { return 0.0; }
        self.members.iter()
            .map(|(_, f)| f.predict(sample, row))
            .sum::<f64>()
            / self.members.len() as f64
    }


    fn predict_all(&self, sample: &Sample) -> Vec<f64> {
        let n_sample = sample.shape().0;
        let n_members = self.members.len();
        if n_members == 0 { return vec![0.0; n_sample]; }

        let mut blended = vec![0.0; n_sample];
        for (_, predictions) in self.member_predictions(sample) {
            blended.iter_mut()
                .zip(predictions)
                .for_each(|(b, p)| { *b += p; });
        }
        blended.iter_mut()
            .for_each(|b| { *b /= n_members as f64; });
        blended
    }
}
