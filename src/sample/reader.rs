use polars::prelude::*;

use super::table::Table;
use crate::{PipelineError, Result};

use std::path::Path;


/// Default marker of a missing cell in the housing CSV files.
pub const DEFAULT_NULL_VALUE: &str = "NA";


/// A struct that returns [`Table`].
/// Using this struct, one can read a CSV file with a header row.
/// # Example
/// ```no_run
/// use houseboosts::TableReader;
///
/// let table = TableReader::new()
///     .file("/path/to/train.csv")
///     .null_values(["NA"])
///     .read()
///     .unwrap();
/// ```
pub struct TableReader<P> {
    file: Option<P>,
    null_values: Vec<String>,
    infer_schema_length: Option<usize>,
}


impl<P> Default for TableReader<P> {
    fn default() -> Self {
        Self::new()
    }
}


impl<P> TableReader<P> {
    /// Construct a new instance of [`TableReader`].
    /// By default, `"NA"` is the only missing marker
    /// and the schema is inferred from every row.
    pub fn new() -> Self {
        Self {
            file: None,
            null_values: vec![DEFAULT_NULL_VALUE.to_string()],
            infer_schema_length: None,
        }
    }


    /// Set the strings read as missing cells.
    /// Empty fields are always missing.
    pub fn null_values<I, S>(mut self, values: I) -> Self
        where I: IntoIterator<Item = S>,
              S: ToString,
    {
        self.null_values = values.into_iter()
            .map(|s| s.to_string())
            .collect();
        self
    }


    /// Infer the column types from the first `n` rows.
    pub fn infer_schema_length(mut self, n: usize) -> Self {
        self.infer_schema_length = Some(n);
        self
    }
}


impl<P> TableReader<P>
    where P: AsRef<Path>
{
    /// Set the file name.
    pub fn file(mut self, file: P) -> Self {
        self.file = Some(file);
        self
    }


    /// Reads the file based on the arguments.
    /// This method consumes `self.`
    pub fn read(self) -> Result<Table> {
        let file = self.file
            .ok_or(PipelineError::InvalidParameter {
                name: "file",
                value: "None".to_string(),
                reason: "the file name for csv is not set",
            })?;

        let null_values = (!self.null_values.is_empty())
            .then(|| NullValues::AllColumns(self.null_values));

        let data = CsvReader::from_path(file.as_ref())?
            .has_header(true)
            .with_null_values(null_values)
            .infer_schema(self.infer_schema_length)
            .finish()?;

        Table::from_dataframe(&data)
    }
}
