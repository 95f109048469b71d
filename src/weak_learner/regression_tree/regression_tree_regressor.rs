use serde::{Serialize, Deserialize};

use super::node::Node;
use crate::{Regressor, Sample};


/// Regression Tree regressor.
/// This struct is just a wrapper of `Node`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTreeRegressor {
    root: Node,
}


impl From<Node> for RegressionTreeRegressor {
    #[inline]
    fn from(root: Node) -> Self {
        Self { root }
    }
}


impl Regressor for RegressionTreeRegressor {
    #[inline]
    fn predict(&self, sample: &Sample, row: usize) -> f64 {
        self.root.predict(sample, row)
    }
}


impl RegressionTreeRegressor {
    /// Returns the number of leaves.
    pub fn n_leaves(&self) -> usize {
        self.root.leaves()
    }


    /// Returns the number of split levels.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }
}
