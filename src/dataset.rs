//! Loads the training and test records into one combined table.
use crate::{
    preprocessing::skew::log1p_target,
    Column,
    PipelineConfig,
    PipelineError,
    Result,
    Table,
};

use std::path::Path;


/// The combined records of a run.
///
/// `features` holds the training rows first (`n_train` of them)
/// followed by the test rows.
/// Neither the target nor the identity column is part of it.
#[derive(Debug, Clone)]
pub struct HousingData {
    /// Combined feature table.
    pub features: Table,
    /// Target of the training rows, in `log1p` space.
    pub target: Vec<f64>,
    /// Number of training rows in `features`.
    pub n_train: usize,
    /// Identity of each training row.
    pub train_ids: Vec<i64>,
    /// Identity of each test row.
    pub test_ids: Vec<i64>,
    /// Number of training rows dropped for a missing target.
    pub dropped_rows: usize,
}


impl HousingData {
    /// Read the training and test CSV files.
    pub fn load<P, Q>(train: P, test: Q, config: &PipelineConfig)
        -> Result<Self>
        where P: AsRef<Path>,
              Q: AsRef<Path>,
    {
        let train = Table::from_csv(train)?;
        let test = Table::from_csv(test)?;
        Self::from_tables(train, test, config)
    }


    /// Build the combined records from already-parsed tables.
    pub fn from_tables(
        mut train: Table,
        mut test: Table,
        config: &PipelineConfig,
    ) -> Result<Self>
    {
        let target = train.column(&config.target)?
            .as_numeric()?
            .to_vec();

        // Rows without a target cannot be learned from.
        let labeled = target.iter()
            .enumerate()
            .filter_map(|(i, y)| y.map(|_| i))
            .collect::<Vec<_>>();
        let dropped_rows = train.n_rows() - labeled.len();
        if dropped_rows > 0 {
            train = train.take(&labeled[..]);
        }
        if train.n_rows() == 0 {
            return Err(PipelineError::EmptySample("no labeled training rows"));
        }

        let target = train.remove_column(&config.target)?
            .dense_values()?;
        let target = log1p_target(&target[..])?;

        let train_ids = take_ids(&mut train, &config.id, 1)?;
        let test_ids = take_ids(&mut test, &config.id, train_ids.len() + 1)?;

        // The test file may carry a target column, e.g. a labeled hold-out.
        if test.contains(&config.target) {
            test.remove_column(&config.target)?;
        }

        let n_train = train.n_rows();
        let features = train.vstack(&test)?;

        Ok(Self {
            features,
            target,
            n_train,
            train_ids,
            test_ids,
            dropped_rows,
        })
    }


    /// Returns the number of test rows.
    pub fn n_test(&self) -> usize {
        self.features.n_rows() - self.n_train
    }
}


/// Remove the identity column from `table`.
/// Rows are numbered from `first` when the column does not exist.
fn take_ids(table: &mut Table, id: &str, first: usize) -> Result<Vec<i64>> {
    if !table.contains(id) {
        let n_rows = table.n_rows();
        return Ok((first..first + n_rows).map(|i| i as i64).collect());
    }

    let column = table.remove_column(id)?;
    match column {
        Column::Numeric { .. } => {
            let ids = column.dense_values()?
                .into_iter()
                .map(|v| v as i64)
                .collect();
            Ok(ids)
        },
        Column::Categorical { name, .. } => Err(PipelineError::ColumnType {
            name,
            expected: "numeric",
            found: "categorical",
        }),
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drops_rows_without_target() {
        let train = Table::new(vec![
            Column::dense("Id", [1.0, 2.0, 3.0]),
            Column::dense("GarageArea", [0.0, 1.0, 5.0]),
            Column::numeric("SalePrice", [Some(10.0), None, Some(20.0)]),
        ]).unwrap();
        let test = Table::new(vec![
            Column::dense("Id", [4.0]),
            Column::dense("GarageArea", [2.0]),
        ]).unwrap();

        let data = HousingData::from_tables(
            train, test, &PipelineConfig::default()
        ).unwrap();

        assert_eq!(1, data.dropped_rows);
        assert_eq!(2, data.n_train);
        assert_eq!(vec![1, 3], data.train_ids);
        assert_eq!(vec![4], data.test_ids);
        assert_eq!(vec!["GarageArea"], data.features.column_names());

        let result = data.target[1];
        let expect = 21f64.ln();
        assert!(
            (result - expect).abs() < 1e-12,
            "expected {expect}, got {result}."
        );
    }
}
