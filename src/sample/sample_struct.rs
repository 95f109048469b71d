use super::feature::Feature;
use crate::{PipelineError, Result};

use std::collections::HashMap;
use std::ops::Index;


/// The numeric feature matrix (column major) and its target.
/// A test partition has an empty target.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub(super) name_to_index: HashMap<String, usize>,
    pub(super) features: Vec<Feature>,
    pub(super) target: Vec<f64>,
    pub(super) n_sample: usize,
    pub(super) n_feature: usize,
}


impl Sample {
    /// Construct a labeled sample.
    /// Every feature and the target must have the same length.
    pub fn new(features: Vec<Feature>, target: Vec<f64>) -> Result<Self> {
        let n_sample = target.len();
        Self::from_parts(features, target, n_sample)
    }


    /// Construct a sample without target values.
    pub fn unlabeled(features: Vec<Feature>) -> Result<Self> {
        let n_sample = features.first().map_or(0, Feature::len);
        Self::from_parts(features, Vec::new(), n_sample)
    }


    fn from_parts(features: Vec<Feature>, target: Vec<f64>, n_sample: usize)
        -> Result<Self>
    {
        if let Some(feat) = features.iter().find(|f| f.len() != n_sample) {
            return Err(PipelineError::Shape {
                expected: format!("{n_sample} rows"),
                actual: format!("{} rows in `{}`", feat.len(), feat.name()),
            });
        }
        let n_feature = features.len();
        let name_to_index = features.iter()
            .enumerate()
            .map(|(i, f)| (f.name().to_string(), i))
            .collect::<HashMap<_, _>>();
        Ok(Self { name_to_index, features, target, n_sample, n_feature })
    }


    /// Returns the pair of the number of examples and
    /// the number of features
    pub fn shape(&self) -> (usize, usize) {
        (self.n_sample, self.n_feature)
    }


    /// Returns a slice of the features.
    pub fn features(&self) -> &[Feature] {
        &self.features[..]
    }


    /// Returns the feature named `name`, if any.
    pub fn feature(&self, name: &str) -> Option<&Feature> {
        self.name_to_index.get(name).map(|&k| &self.features[k])
    }


    /// Returns the feature names in order.
    pub fn feature_names(&self) -> Vec<&str> {
        self.features.iter().map(Feature::name).collect()
    }


    /// Returns the slice of target values.
    pub fn target(&self) -> &[f64] {
        &self.target[..]
    }


    /// Returns `true` if `self` has a target value for each example.
    pub fn is_labeled(&self) -> bool {
        self.target.len() == self.n_sample
    }


    /// Returns an error unless `self` is labeled and non-empty.
    pub(crate) fn check_trainable(&self) -> Result<()> {
        if self.n_sample == 0 {
            return Err(PipelineError::EmptySample("no training examples"));
        }
        if !self.is_labeled() {
            return Err(PipelineError::Shape {
                expected: format!("{} target values", self.n_sample),
                actual: format!("{}", self.target.len()),
            });
        }
        Ok(())
    }


    /// Returns the `idx`-th row of the feature matrix.
    pub fn row(&self, idx: usize) -> Vec<f64> {
        self.features.iter()
            .map(|feat| feat[idx])
            .collect::<Vec<f64>>()
    }


    /// Returns the `idx`-th instance `(x, y)`.
    /// This method panics if `self` is unlabeled.
    pub fn at(&self, idx: usize) -> (Vec<f64>, f64) {
        let x = self.row(idx);
        let y = self.target[idx];

        (x, y)
    }


    /// Returns the examples at `rows`, in that order.
    pub fn subset(&self, rows: &[usize]) -> Sample {
        let features = self.features.iter()
            .map(|feat| feat.take(rows))
            .collect::<Vec<_>>();
        let target = if self.is_labeled() {
            rows.iter().map(|&i| self.target[i]).collect()
        } else {
            Vec::new()
        };
        Self {
            name_to_index: self.name_to_index.clone(),
            features,
            target,
            n_sample: rows.len(),
            n_feature: self.n_feature,
        }
    }


    /// Split `self` into two samples.
    /// The examples `ix[start..end]` form the second sample,
    /// and the rest of `ix` form the first one.
    pub fn split<T>(&self, ix: T, start: usize, end: usize)
        -> (Sample, Sample)
        where T: AsRef<[usize]>
    {
        let ix = ix.as_ref();
        let train = ix[..start].iter()
            .chain(&ix[end..])
            .copied()
            .collect::<Vec<_>>();
        let test = &ix[start..end];

        (self.subset(&train[..]), self.subset(test))
    }
}


impl<S> Index<S> for Sample
    where S: AsRef<str>
{
    type Output = Feature;

    fn index(&self, name: S) -> &Self::Output {
        let name: &str = name.as_ref();
        let k = *self.name_to_index.get(name)
            .unwrap_or_else(|| panic!("The feature `{name}` does not exist"));
        &self.features[k]
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Sample {
        let features = vec![
            Feature::new("x", vec![0.0, 1.0, 2.0, 3.0]),
            Feature::new("z", vec![4.0, 5.0, 6.0, 7.0]),
        ];
        Sample::new(features, vec![10.0, 11.0, 12.0, 13.0]).unwrap()
    }


    #[test]
    fn test_new_rejects_ragged_features() {
        let features = vec![Feature::new("x", vec![0.0, 1.0])];
        assert!(Sample::new(features, vec![1.0]).is_err());
    }


    #[test]
    fn test_split() {
        let (train, test) = sample().split([3, 1, 0, 2], 1, 3);

        let result = train.target().to_vec();
        let expect = vec![13.0, 12.0];
        assert_eq!(expect, result, "expected {expect:?}, got {result:?}.");

        let result = test["z"].values().to_vec();
        let expect = vec![5.0, 4.0];
        assert_eq!(expect, result, "expected {expect:?}, got {result:?}.");
    }


    #[test]
    fn test_at() {
        let result = sample().at(2);
        let expect = (vec![2.0, 6.0], 12.0);
        assert_eq!(expect, result, "expected {expect:?}, got {result:?}.");
    }
}
