use polars::prelude::*;

use crate::{PipelineError, Result};

use std::collections::BTreeSet;


/// A named column of a record table.
/// `None` marks a missing cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    /// A column of numbers.
    Numeric {
        /// Column name
        name: String,
        /// Column values
        values: Vec<Option<f64>>,
    },
    /// A column of category labels.
    Categorical {
        /// Column name
        name: String,
        /// Column values
        values: Vec<Option<String>>,
    },
}


impl Column {
    /// Construct a numeric column.
    pub fn numeric<T, V>(name: T, values: V) -> Self
        where T: ToString,
              V: IntoIterator<Item = Option<f64>>,
    {
        Self::Numeric {
            name: name.to_string(),
            values: values.into_iter().collect(),
        }
    }


    /// Construct a numeric column without missing cells.
    pub fn dense<T, V>(name: T, values: V) -> Self
        where T: ToString,
              V: IntoIterator<Item = f64>,
    {
        Self::numeric(name, values.into_iter().map(Some))
    }


    /// Construct a categorical column.
    pub fn categorical<T, V, S>(name: T, values: V) -> Self
        where T: ToString,
              S: ToString,
              V: IntoIterator<Item = Option<S>>,
    {
        let values = values.into_iter()
            .map(|v| v.map(|s| s.to_string()))
            .collect();
        Self::Categorical { name: name.to_string(), values }
    }


    /// Convert a `polars::Series` into a `Column`.
    /// Numeric and boolean dtypes become `Column::Numeric`,
    /// everything else becomes `Column::Categorical`.
    /// Nulls and empty strings are missing.
    pub fn from_series(series: &Series) -> Result<Self> {
        let name = series.name().to_string();
        let dtype = series.dtype();

        if dtype.is_numeric() || matches!(dtype, DataType::Boolean) {
            let values = series.cast(&DataType::Float64)?
                .f64()?
                .into_iter()
                .collect::<Vec<_>>();
            return Ok(Self::Numeric { name, values });
        }

        let values = series.cast(&DataType::Utf8)?
            .utf8()?
            .into_iter()
            .map(|v| v.filter(|s| !s.is_empty()).map(str::to_string))
            .collect::<Vec<_>>();
        Ok(Self::Categorical { name, values })
    }


    /// Returns the column name.
    pub fn name(&self) -> &str {
        match self {
            Self::Numeric { name, .. } => name,
            Self::Categorical { name, .. } => name,
        }
    }


    /// Returns the number of cells.
    pub fn len(&self) -> usize {
        match self {
            Self::Numeric { values, .. } => values.len(),
            Self::Categorical { values, .. } => values.len(),
        }
    }


    /// Returns `true` if the column has no cells.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }


    /// Returns `true` for numeric columns.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Numeric { .. })
    }


    /// Returns a human readable type name.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Numeric { .. } => "numeric",
            Self::Categorical { .. } => "categorical",
        }
    }


    /// Returns `true` if the `row`-th cell is missing.
    pub fn is_missing(&self, row: usize) -> bool {
        match self {
            Self::Numeric { values, .. } => values[row].is_none(),
            Self::Categorical { values, .. } => values[row].is_none(),
        }
    }


    /// Returns the number of missing cells.
    pub fn missing_count(&self) -> usize {
        (0..self.len()).filter(|&i| self.is_missing(i)).count()
    }


    /// Returns `true` if every cell is missing.
    pub fn all_missing(&self) -> bool {
        self.missing_count() == self.len()
    }


    /// A column of `n` missing cells with the same name and type as `self`.
    pub(crate) fn missing_like(&self, n: usize) -> Self {
        match self {
            Self::Numeric { name, .. } => Self::numeric(name, vec![None; n]),
            Self::Categorical { name, .. } => Self::Categorical {
                name: name.clone(),
                values: vec![None; n],
            },
        }
    }


    /// Returns the numeric cells.
    pub fn as_numeric(&self) -> Result<&[Option<f64>]> {
        match self {
            Self::Numeric { values, .. } => Ok(&values[..]),
            Self::Categorical { name, .. } => Err(self.type_error(name, "numeric")),
        }
    }


    /// Returns the numeric cells as a mutable reference.
    pub fn as_numeric_mut(&mut self) -> Result<&mut Vec<Option<f64>>> {
        match self {
            Self::Numeric { values, .. } => Ok(values),
            Self::Categorical { name, .. } => Err(
                PipelineError::ColumnType {
                    name: name.clone(),
                    expected: "numeric",
                    found: "categorical",
                }
            ),
        }
    }


    /// Returns the categorical cells.
    pub fn as_categorical(&self) -> Result<&[Option<String>]> {
        match self {
            Self::Categorical { values, .. } => Ok(&values[..]),
            Self::Numeric { name, .. } => Err(self.type_error(name, "categorical")),
        }
    }


    /// Returns the categorical cells as a mutable reference.
    pub fn as_categorical_mut(&mut self) -> Result<&mut Vec<Option<String>>> {
        match self {
            Self::Categorical { values, .. } => Ok(values),
            Self::Numeric { name, .. } => Err(
                PipelineError::ColumnType {
                    name: name.clone(),
                    expected: "categorical",
                    found: "numeric",
                }
            ),
        }
    }


    /// Returns the numeric cells, failing on a missing one.
    pub fn dense_values(&self) -> Result<Vec<f64>> {
        let values = self.as_numeric()?;
        values.iter()
            .copied()
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| PipelineError::Unfilled {
                column: self.name().to_string(),
                count: self.missing_count(),
            })
    }


    /// Returns the string representation of each cell,
    /// used to key the grouped aggregates.
    pub(crate) fn keys(&self) -> Vec<Option<String>> {
        match self {
            Self::Categorical { values, .. } => values.clone(),
            Self::Numeric { values, .. } => {
                values.iter()
                    .map(|v| v.map(format_number))
                    .collect()
            },
        }
    }


    /// Returns the sorted set of observed categories.
    pub fn vocabulary(&self) -> Result<Vec<String>> {
        let values = self.as_categorical()?;
        let vocabulary = values.iter()
            .flatten()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        Ok(vocabulary)
    }


    /// Consume `self` and return the categorical version of it.
    /// Numbers are rendered as integers when they are integral.
    pub fn into_categorical(self) -> Self {
        match self {
            Self::Categorical { .. } => self,
            Self::Numeric { name, values } => {
                let values = values.into_iter()
                    .map(|v| v.map(format_number))
                    .collect();
                Self::Categorical { name, values }
            },
        }
    }


    /// Append the cells of `other` to `self`.
    /// A column whose cells are all missing adopts the type of the other.
    pub(crate) fn extend(&mut self, other: &Column) -> Result<()> {
        if self.is_numeric() != other.is_numeric() {
            if other.all_missing() {
                let padding = self.missing_like(other.len());
                return self.extend(&padding);
            }
            if self.all_missing() {
                let n = self.len();
                let mut column = other.missing_like(n);
                column.extend(other)?;
                *self = column;
                return Ok(());
            }
            return Err(PipelineError::ColumnType {
                name: self.name().to_string(),
                expected: self.kind(),
                found: other.kind(),
            });
        }

        match (self, other) {
            (Self::Numeric { values, .. }, Self::Numeric { values: rhs, .. }) => {
                values.extend_from_slice(rhs);
            },
            (Self::Categorical { values, .. }, Self::Categorical { values: rhs, .. }) => {
                values.extend_from_slice(rhs);
            },
            _ => unreachable!(),
        }
        Ok(())
    }


    /// Returns the cells in `rows`, in that order.
    pub(crate) fn take(&self, rows: &[usize]) -> Self {
        match self {
            Self::Numeric { name, values } => Self::Numeric {
                name: name.clone(),
                values: rows.iter().map(|&i| values[i]).collect(),
            },
            Self::Categorical { name, values } => Self::Categorical {
                name: name.clone(),
                values: rows.iter().map(|&i| values[i].clone()).collect(),
            },
        }
    }


    fn type_error(&self, name: &str, expected: &'static str) -> PipelineError {
        PipelineError::ColumnType {
            name: name.to_string(),
            expected,
            found: self.kind(),
        }
    }
}


/// Render a number as a category label.
/// Integral values have no fractional part: `60.0` becomes `"60"`.
pub(crate) fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_count() {
        let column = Column::numeric("GarageArea", [Some(0.0), None, Some(5.0)]);
        let result = column.missing_count();
        let expect = 1;
        assert_eq!(expect, result, "expected {expect}, got {result}.");
    }


    #[test]
    fn test_into_categorical_formats_integers() {
        let column = Column::numeric("MSSubClass", [Some(60.0), Some(20.5), None])
            .into_categorical();
        let result = column.as_categorical().unwrap().to_vec();
        let expect = vec![Some("60".to_string()), Some("20.5".to_string()), None];
        assert_eq!(expect, result, "expected {expect:?}, got {result:?}.");
    }


    #[test]
    fn test_extend_adopts_type_of_non_missing_side() {
        let mut column = Column::numeric("PoolQC", [None, None]);
        let other = Column::categorical("PoolQC", [Some("Gd"), None]);
        column.extend(&other).unwrap();

        assert!(!column.is_numeric());
        let result = column.len();
        let expect = 4;
        assert_eq!(expect, result, "expected {expect}, got {result}.");
    }


    #[test]
    fn test_extend_rejects_conflicting_types() {
        let mut column = Column::dense("LotArea", [1.0, 2.0]);
        let other = Column::categorical("LotArea", [Some("big")]);
        assert!(column.extend(&other).is_err());
    }
}
