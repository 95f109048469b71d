use std::ops::Index;
use std::slice::Iter;


/// A named dense column of the feature matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    /// Feature name
    pub(super) name: String,
    /// Feature values.
    pub(super) sample: Vec<f64>,
}


impl Feature {
    /// Construct a feature from its name and values.
    pub fn new<T: ToString>(name: T, sample: Vec<f64>) -> Self {
        Self { name: name.to_string(), sample }
    }


    /// Returns the name of the feature.
    pub fn name(&self) -> &str {
        &self.name
    }


    /// Returns the feature values.
    pub fn values(&self) -> &[f64] {
        &self.sample[..]
    }


    /// Returns an iterator over feature values.
    pub fn iter(&self) -> Iter<'_, f64> {
        self.sample.iter()
    }


    /// Consume `self` and return the values.
    pub fn into_values(self) -> Vec<f64> {
        self.sample
    }


    /// Returns the number of items in `self.sample`.
    pub fn len(&self) -> usize {
        self.sample.len()
    }


    /// Returns `true` if `self.len()` is equals to `0`.
    pub fn is_empty(&self) -> bool {
        self.sample.is_empty()
    }


    /// Returns the number of distinct values.
    pub fn distinct_value_count(&self) -> usize {
        let mut values = self.sample.clone();
        values.sort_by(|a, b| a.total_cmp(b));
        values.dedup();
        values.len()
    }


    /// Returns the values at `rows`, in that order.
    pub(crate) fn take(&self, rows: &[usize]) -> Self {
        let sample = rows.iter().map(|&i| self.sample[i]).collect();
        Self { name: self.name.clone(), sample }
    }
}


impl Index<usize> for Feature {
    type Output = f64;
    fn index(&self, idx: usize) -> &Self::Output {
        &self.sample[idx]
    }
}
