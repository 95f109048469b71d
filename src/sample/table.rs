use polars::prelude::*;
use rayon::prelude::*;

use super::column::Column;
use super::reader::TableReader;
use crate::{PipelineError, Result};

use std::collections::HashMap;
use std::ops::Index;
use std::path::Path;


/// A record table:
/// an ordered collection of named, typed columns of equal length.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub(super) name_to_index: HashMap<String, usize>,
    pub(super) columns: Vec<Column>,
    pub(super) n_rows: usize,
}


impl Table {
    /// Construct a table from the given columns.
    /// Every column must have the same length
    /// and the column names must be unique.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let n_rows = columns.first().map_or(0, Column::len);
        let mut table = Self {
            name_to_index: HashMap::with_capacity(columns.len()),
            columns: Vec::with_capacity(columns.len()),
            n_rows,
        };
        for column in columns {
            table.push_column(column)?;
        }
        Ok(table)
    }


    /// Convert a `polars::DataFrame` into a `Table`.
    pub fn from_dataframe(data: &DataFrame) -> Result<Self> {
        let columns = data.get_columns()
            .par_iter()
            .map(Column::from_series)
            .collect::<Result<Vec<_>>>()?;
        Self::new(columns)
    }


    /// Read a CSV file with a header row.
    /// `"NA"` and empty fields are missing.
    pub fn from_csv<P: AsRef<Path>>(file: P) -> Result<Self> {
        TableReader::new()
            .file(file)
            .read()
    }


    /// Returns the pair of the number of rows and columns.
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows, self.columns.len())
    }


    /// Returns the number of rows.
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }


    /// Returns the columns.
    pub fn columns(&self) -> &[Column] {
        &self.columns[..]
    }


    /// Returns the column names in order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }


    /// Returns `true` if the column `name` exists.
    pub fn contains(&self, name: &str) -> bool {
        self.name_to_index.contains_key(name)
    }


    /// Returns the column named `name`, if any.
    pub fn get(&self, name: &str) -> Option<&Column> {
        self.name_to_index.get(name).map(|&k| &self.columns[k])
    }


    /// Returns the column named `name`.
    pub fn column(&self, name: &str) -> Result<&Column> {
        self.get(name)
            .ok_or_else(|| PipelineError::MissingColumn(name.to_string()))
    }


    /// Returns a mutable reference to the column named `name`.
    pub fn column_mut(&mut self, name: &str) -> Result<&mut Column> {
        let k = *self.name_to_index.get(name)
            .ok_or_else(|| PipelineError::MissingColumn(name.to_string()))?;
        Ok(&mut self.columns[k])
    }


    /// Replace the column that has the same name as `column`.
    pub fn replace_column(&mut self, column: Column) -> Result<Column> {
        self.check_length(&column)?;
        let slot = self.column_mut(column.name())?;
        Ok(std::mem::replace(slot, column))
    }


    /// Append a column at the end.
    pub fn push_column(&mut self, column: Column) -> Result<()> {
        if self.columns.is_empty() {
            self.n_rows = column.len();
        }
        self.check_length(&column)?;
        let name = column.name().to_string();
        if self.contains(&name) {
            return Err(PipelineError::InvalidParameter {
                name: "column",
                value: name,
                reason: "a column with the same name already exists",
            });
        }
        self.name_to_index.insert(name, self.columns.len());
        self.columns.push(column);
        Ok(())
    }


    /// Remove the column named `name` and return it.
    pub fn remove_column(&mut self, name: &str) -> Result<Column> {
        let k = self.name_to_index.remove(name)
            .ok_or_else(|| PipelineError::MissingColumn(name.to_string()))?;
        let column = self.columns.remove(k);
        self.reindex();
        Ok(column)
    }


    /// Stack `other` below `self`.
    ///
    /// The result has the columns of `self` followed by
    /// the columns only `other` has.
    /// A column absent on one side is missing on that side.
    pub fn vstack(&self, other: &Table) -> Result<Table> {
        let mut columns = self.columns.clone();
        for column in columns.iter_mut() {
            match other.get(column.name()) {
                Some(rhs) => column.extend(rhs)?,
                None => {
                    let padding = column.missing_like(other.n_rows);
                    column.extend(&padding)?;
                },
            }
        }

        for rhs in other.columns.iter() {
            if self.contains(rhs.name()) { continue; }
            let mut column = rhs.missing_like(self.n_rows);
            column.extend(rhs)?;
            columns.push(column);
        }

        let mut table = Self::new(columns)?;
        table.n_rows = self.n_rows + other.n_rows;
        Ok(table)
    }


    /// Returns the pairs `(column, # of missing cells)`
    /// of every column with a missing cell,
    /// sorted by the count in descending order.
    /// Ties keep the column order.
    pub fn missing_counts(&self) -> Vec<(String, usize)> {
        let mut counts = self.columns.iter()
            .filter_map(|column| {
                let count = column.missing_count();
                (count > 0).then(|| (column.name().to_string(), count))
            })
            .collect::<Vec<_>>();
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
    }


    /// Returns the rows in `rows`, in that order.
    pub fn take(&self, rows: &[usize]) -> Table {
        let columns = self.columns.iter()
            .map(|column| column.take(rows))
            .collect::<Vec<_>>();
        Self {
            name_to_index: self.name_to_index.clone(),
            columns,
            n_rows: rows.len(),
        }
    }


    /// Names of the numeric columns.
    pub fn numeric_names(&self) -> Vec<String> {
        self.columns.iter()
            .filter(|column| column.is_numeric())
            .map(|column| column.name().to_string())
            .collect()
    }


    /// Names of the categorical columns.
    pub fn categorical_names(&self) -> Vec<String> {
        self.columns.iter()
            .filter(|column| !column.is_numeric())
            .map(|column| column.name().to_string())
            .collect()
    }


    fn check_length(&self, column: &Column) -> Result<()> {
        if column.len() != self.n_rows {
            return Err(PipelineError::Shape {
                expected: format!("{} rows", self.n_rows),
                actual: format!("{} rows in `{}`", column.len(), column.name()),
            });
        }
        Ok(())
    }


    fn reindex(&mut self) {
        self.name_to_index = self.columns.iter()
            .enumerate()
            .map(|(i, column)| (column.name().to_string(), i))
            .collect();
    }
}


impl<S> Index<S> for Table
    where S: AsRef<str>
{
    type Output = Column;

    fn index(&self, name: S) -> &Self::Output {
        let name: &str = name.as_ref();
        self.get(name)
            .unwrap_or_else(|| panic!("The column `{name}` does not exist"))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn train() -> Table {
        Table::new(vec![
            Column::dense("Id", [1.0, 2.0]),
            Column::categorical("Alley", [None::<&str>, Some("Grvl")]),
            Column::numeric("LotFrontage", [None, Some(60.0)]),
        ]).unwrap()
    }


    #[test]
    fn test_push_column_checks_length() {
        let mut table = train();
        let result = table.push_column(Column::dense("x", [1.0]));
        assert!(result.is_err());
    }


    #[test]
    fn test_remove_column_reindexes() {
        let mut table = train();
        table.remove_column("Id").unwrap();
        assert_eq!(table.column_names(), vec!["Alley", "LotFrontage"]);
        assert!(table.column("LotFrontage").unwrap().is_numeric());
    }


    #[test]
    fn test_vstack_aligns_by_name() {
        let test = Table::new(vec![
            Column::numeric("LotFrontage", [Some(80.0)]),
            Column::dense("Id", [3.0]),
            Column::dense("Extra", [7.0]),
        ]).unwrap();
        let combined = train().vstack(&test).unwrap();

        let result = combined.shape();
        let expect = (3, 4);
        assert_eq!(expect, result, "expected {expect:?}, got {result:?}.");

        let result = combined["Id"].dense_values().unwrap();
        let expect = vec![1.0, 2.0, 3.0];
        assert_eq!(expect, result, "expected {expect:?}, got {result:?}.");

        let result = combined["Extra"].missing_count();
        assert_eq!(2, result, "expected 2, got {result}.");
        let result = combined["Alley"].missing_count();
        assert_eq!(2, result, "expected 2, got {result}.");
    }


    #[test]
    fn test_missing_counts_sorted_descending() {
        let table = Table::new(vec![
            Column::numeric("a", [None, Some(1.0), Some(1.0)]),
            Column::numeric("b", [None, None, Some(1.0)]),
            Column::dense("c", [1.0, 1.0, 1.0]),
            Column::numeric("d", [None, Some(2.0), Some(1.0)]),
        ]).unwrap();
        let result = table.missing_counts();
        let expect = vec![
            ("b".to_string(), 2),
            ("a".to_string(), 1),
            ("d".to_string(), 1),
        ];
        assert_eq!(expect, result, "expected {expect:?}, got {result:?}.");
    }
}
