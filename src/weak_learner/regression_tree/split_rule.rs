//! This file defines the split rule for the regression tree.
use serde::{Serialize, Deserialize};

use crate::Sample;


/// The output of the function `split` of `Splitter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeftRight {
    /// Go to the left child.
    Left,
    /// Go to the right child.
    Right,
}


/// Sends an example to the left child
/// if its `feature` value is less than `threshold`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(super) struct Splitter {
    /// Position of the feature in the sample.
    pub(super) index: usize,
    pub(super) feature: String,
    pub(super) threshold: f64,
}


impl Splitter {
    #[inline]
    pub(super) fn new(index: usize, name: &str, threshold: f64) -> Self {
        Self {
            index,
            feature: name.to_string(),
            threshold,
        }
    }


    /// Defines the splitting.
    #[inline]
    pub(super) fn split(&self, sample: &Sample, row: usize) -> LeftRight {
        self.split_value(sample.features()[self.index][row])
    }


    #[inline]
    pub(super) fn split_value(&self, value: f64) -> LeftRight {
        if value < self.threshold {
            LeftRight::Left
        } else {
            LeftRight::Right
        }
    }
}
