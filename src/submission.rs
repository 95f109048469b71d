//! Test-set predictions in the original price scale.
use polars::prelude::*;

use crate::{
    config::{DEFAULT_ID, DEFAULT_TARGET},
    PipelineError,
    Result,
};

use std::fs::File;
use std::path::Path;


/// One predicted price per test row, aligned with the test identities.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    id_column: String,
    target_column: String,
    /// Identity of each test row.
    pub ids: Vec<i64>,
    /// Predicted price of each test row.
    pub predictions: Vec<f64>,
}


impl Submission {
    /// Pair `ids` with `predictions`.
    /// Both must have the same length.
    pub fn new(ids: Vec<i64>, predictions: Vec<f64>) -> Result<Self> {
        if ids.len() != predictions.len() {
            return Err(PipelineError::Shape {
                expected: format!("{} predictions", ids.len()),
                actual: format!("{}", predictions.len()),
            });
        }
        Ok(Self {
            id_column: DEFAULT_ID.to_string(),
            target_column: DEFAULT_TARGET.to_string(),
            ids,
            predictions,
        })
    }


    /// Set the header of the two output columns.
    pub fn column_names<S, T>(mut self, id: S, target: T) -> Self
        where S: ToString,
              T: ToString,
    {
        self.id_column = id.to_string();
        self.target_column = target.to_string();
        self
    }


    /// Returns the number of predictions.
    pub fn len(&self) -> usize {
        self.ids.len()
    }


    /// Returns `true` if there is no prediction.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }


    /// Returns the submission as a two-column `DataFrame`.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let df = DataFrame::new(vec![
            Series::new(&self.id_column, &self.ids[..]),
            Series::new(&self.target_column, &self.predictions[..]),
        ])?;
        Ok(df)
    }


    /// Write `Id,SalePrice` rows to `path`.
    pub fn to_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut df = self.to_dataframe()?;
        let mut file = File::create(path)?;
        CsvWriter::new(&mut file).finish(&mut df)?;
        Ok(())
    }
}
