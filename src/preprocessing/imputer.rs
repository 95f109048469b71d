//! The imputation engine.
//! Fills every missing cell of a record table
//! according to [`policy_for`](super::policy::policy_for).
use crate::{
    common::stats,
    logging::Logger,
    Column,
    PipelineError,
    Result,
    Table,
};
use super::policy::*;

use std::collections::BTreeMap;
use std::fmt;


/// The value written into a missing cell.
#[derive(Debug, Clone, PartialEq)]
enum Cell {
    Number(f64),
    Label(String),
}


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Aggregate {
    Mode,
    Median,
}


/// The number of cells filled in a column, and the rule that filled them.
#[derive(Debug, Clone, PartialEq)]
pub struct Fill {
    /// Column name
    pub column: String,
    /// The class of the column.
    pub policy: Policy,
    /// The strategy applied to an unlisted column.
    pub fallback: Option<ImputeStrategy>,
    /// Number of cells filled.
    pub cells: usize,
}


/// Outcome of [`Imputer::impute`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImputationReport {
    /// Missing cells per column before the imputation.
    pub missing_before: Vec<(String, usize)>,
    /// Fills in the order they happened.
    pub fills: Vec<Fill>,
}


impl ImputationReport {
    /// Total number of cells filled in `column`.
    pub fn filled(&self, column: &str) -> usize {
        self.fills.iter()
            .filter(|fill| fill.column == column)
            .map(|fill| fill.cells)
            .sum()
    }
}


/// Fills the missing cells of a [`Table`].
///
/// # Example
/// ```no_run
/// use houseboosts::{Logger, Table};
/// use houseboosts::preprocessing::Imputer;
///
/// let mut table = Table::from_csv("train.csv").unwrap();
/// let logger = Logger::new(true);
/// let _report = Imputer::new(&logger)
///     .impute(&mut table)
///     .unwrap();
/// assert!(table.missing_counts().is_empty());
/// ```
pub struct Imputer<'a> {
    logger: &'a Logger,
}


impl<'a> Imputer<'a> {
    /// Construct a new instance of `Imputer`.
    pub fn new(logger: &'a Logger) -> Self {
        Self { logger }
    }


    /// Fill every missing cell of `table` in place.
    ///
    /// The generic strategies run first, over the columns that
    /// have a missing cell. The column-specific rules run next,
    /// in the order of [`Bespoke::ORDER`].
    /// Returns `PipelineError::Unfilled` if a missing cell survives.
    pub fn impute(&self, table: &mut Table) -> Result<ImputationReport> {
        let missing_before = table.missing_counts();
        self.logger.section("MISSING VALUES");
        self.logger.missing_table(&missing_before[..]);

        let mut report = ImputationReport {
            missing_before: missing_before.clone(),
            fills: Vec::new(),
        };

        for (name, _) in missing_before.iter() {
            let policy = policy_for(name);
            let strategy = match policy {
                Policy::Generic(strategy) => strategy,
                Policy::Bespoke(_) => continue,
                Policy::Unlisted => {
                    let strategy = fallback_strategy(table.column(name)?);
                    self.logger.warn(format!(
                        "`{name}` has no imputation policy, \
                         filling by {strategy}"
                    ));
                    strategy
                },
            };
            let column = table.column_mut(name)?;
            let cells = fill_generic(column, strategy)?;
            let fallback = (policy == Policy::Unlisted).then_some(strategy);
            report.fills.push(Fill {
                column: name.clone(), policy, fallback, cells,
            });
        }

        for rule in Bespoke::ORDER {
            if !table.contains(rule.column()) { continue; }
            let cells = self.apply(rule, table)?;
            report.fills.push(Fill {
                column: rule.column().to_string(),
                policy: Policy::Bespoke(rule),
                fallback: None,
                cells,
            });
        }

        let remaining = table.missing_counts();
        self.logger.message("After the imputation:");
        self.logger.missing_table(&remaining[..]);
        self.logger.footer();
        if let Some((column, count)) = remaining.into_iter().next() {
            return Err(PipelineError::Unfilled { column, count });
        }
        Ok(report)
    }


    /// Apply a column-specific rule.
    /// `table` must contain `rule.column()`.
    fn apply(&self, rule: Bespoke, table: &mut Table) -> Result<usize> {
        let name = rule.column();
        match rule {
            Bespoke::DwellingClass => {
                let mut column = table.column(name)?
                    .clone()
                    .into_categorical();
                let cells = fill_rows(
                    &mut column,
                    None,
                    &Cell::Label(UNKNOWN_LABEL.to_string()),
                )?;
                table.replace_column(column)?;
                Ok(cells)
            },
            Bespoke::ZoningByDwellingClass => {
                let by = rule.group_by().unwrap_or("MSSubClass");
                self.fill_grouped(table, name, by, Aggregate::Mode)
            },
            Bespoke::FrontageByNeighborhood => {
                let by = rule.group_by().unwrap_or("Neighborhood");
                self.fill_grouped(table, name, by, Aggregate::Median)
            },
            Bespoke::TruncateLotArea => {
                truncate(table.column_mut(name)?.as_numeric_mut()?);
                Ok(0)
            },
            Bespoke::PavedAlley => {
                let column = table.column_mut(name)?;
                if column.is_numeric() {
                    *column = column.clone().into_categorical();
                }
                fill_rows(column, None, &Cell::Label(ALLEY_LABEL.to_string()))
            },
            Bespoke::TruncateMasonryArea => {
                let column = table.column_mut(name)?;
                let cells = fill_rows(column, None, &Cell::Number(0.0))?;
                truncate(column.as_numeric_mut()?);
                Ok(cells)
            },
        }
    }


    /// Fill the missing cells of `name` by an aggregate
    /// over the rows that share the value of `by`.
    /// Rows whose `by` value is missing are left untouched.
    /// Falls back on the whole column when `by` is absent.
    fn fill_grouped(
        &self,
        table: &mut Table,
        name: &str,
        by: &str,
        agg: Aggregate,
    ) -> Result<usize>
    {
        if table.column(name)?.missing_count() == 0 {
            return Ok(0);
        }

        let keys = match table.get(by) {
            Some(column) => column.keys(),
            None => {
                self.logger.warn(format!(
                    "`{by}` does not exist, filling `{name}` \
                     over all rows"
                ));
                vec![None; table.n_rows()]
            },
        };

        // Rows without a key belong to no group and stay missing.
        let grouped = table.get(by).is_some();
        let mut groups: BTreeMap<Option<String>, Vec<usize>> = BTreeMap::new();
        keys.into_iter()
            .enumerate()
            .filter(|(_, key)| !grouped || key.is_some())
            .for_each(|(row, key)| groups.entry(key).or_default().push(row));

        let keyless = table.n_rows()
            - groups.values().map(|rows| rows.len()).sum::<usize>();
        if keyless > 0 {
            self.logger.warn(format!(
                "{keyless} rows have no `{by}`, \
                 leaving their `{name}` unfilled"
            ));
        }

        // Compute every fill value before mutating the column.
        let column = table.column(name)?;
        let mut fills = Vec::new();
        for (key, rows) in groups {
            if rows.iter().all(|&i| !column.is_missing(i)) { continue; }
            let cell = aggregate(column, &rows[..], agg)?
                .ok_or_else(|| PipelineError::EmptyGroup {
                    column: name.to_string(),
                    by: by.to_string(),
                    group: key.clone().unwrap_or_else(|| "<missing>".into()),
                })?;
            fills.push((rows, cell));
        }

        let column = table.column_mut(name)?;
        let mut cells = 0;
        for (rows, cell) in fills {
            cells += fill_rows(column, Some(&rows[..]), &cell)?;
        }
        Ok(cells)
    }
}


/// The generic strategy of a column that is in no list.
fn fallback_strategy(column: &Column) -> ImputeStrategy {
    if column.is_numeric() {
        ImputeStrategy::Zero
    } else {
        ImputeStrategy::Mode
    }
}


fn fill_generic(column: &mut Column, strategy: ImputeStrategy)
    -> Result<usize>
{
    let cell = match strategy {
        ImputeStrategy::Zero => {
            if column.is_numeric() {
                Cell::Number(0.0)
            } else {
                Cell::Label("0".to_string())
            }
        },
        ImputeStrategy::NoneLabel => {
            if column.is_numeric() {
                *column = column.clone().into_categorical();
            }
            Cell::Label(NONE_LABEL.to_string())
        },
        ImputeStrategy::Mode => {
            let rows = (0..column.len()).collect::<Vec<_>>();
            aggregate(column, &rows[..], Aggregate::Mode)?
                .ok_or_else(|| PipelineError::Unfilled {
                    column: column.name().to_string(),
                    count: column.missing_count(),
                })?
        },
    };
    fill_rows(column, None, &cell)
}


/// Aggregate the observed cells of `column` at `rows`.
/// Returns `None` if every cell is missing.
fn aggregate(column: &Column, rows: &[usize], agg: Aggregate)
    -> Result<Option<Cell>>
{
    let cell = match (column, agg) {
        (Column::Numeric { values, .. }, _) => {
            let observed = rows.iter()
                .filter_map(|&i| values[i])
                .collect::<Vec<_>>();
            let value = match agg {
                Aggregate::Mode => stats::mode_f64(&observed[..]),
                Aggregate::Median => stats::median(&observed[..]),
            };
            value.map(Cell::Number)
        },
        (Column::Categorical { values, .. }, Aggregate::Mode) => {
            let observed = rows.iter()
                .filter_map(|&i| values[i].as_deref());
            stats::mode(observed).map(|s| Cell::Label(s.to_string()))
        },
        (Column::Categorical { name, .. }, Aggregate::Median) => {
            return Err(PipelineError::ColumnType {
                name: name.clone(),
                expected: "numeric",
                found: "categorical",
            });
        },
    };
    Ok(cell)
}


/// Write `cell` into the missing cells at `rows`
/// (every row if `None`) and return the number of cells written.
fn fill_rows(column: &mut Column, rows: Option<&[usize]>, cell: &Cell)
    -> Result<usize>
{
    let all_rows;
    let rows = match rows {
        Some(rows) => rows,
        None => {
            all_rows = (0..column.len()).collect::<Vec<_>>();
            &all_rows[..]
        },
    };

    let mut cells = 0;
    match cell {
        Cell::Number(x) => {
            let values = column.as_numeric_mut()?;
            for &i in rows {
                if values[i].is_none() {
                    values[i] = Some(*x);
                    cells += 1;
                }
            }
        },
        Cell::Label(label) => {
            let values = column.as_categorical_mut()?;
            for &i in rows {
                if values[i].is_none() {
                    values[i] = Some(label.clone());
                    cells += 1;
                }
            }
        },
    }
    Ok(cells)
}


fn truncate(values: &mut [Option<f64>]) {
    values.iter_mut()
        .flatten()
        .for_each(|v| { *v = v.trunc(); });
}


impl fmt::Display for ImputeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Zero => write!(f, "zero"),
            Self::NoneLabel => write!(f, "\"{NONE_LABEL}\""),
            Self::Mode => write!(f, "mode"),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_without_a_key_stay_missing() {
        let mut table = Table::new(vec![
            Column::categorical(
                "Neighborhood", [Some("A"), Some("A"), None, None],
            ),
            Column::numeric(
                "LotFrontage", [Some(60.0), None, Some(500.0), None],
            ),
        ]).unwrap();
        let logger = Logger::silent();
        let cells = Imputer::new(&logger)
            .fill_grouped(
                &mut table, "LotFrontage", "Neighborhood", Aggregate::Median,
            )
            .unwrap();

        assert_eq!(1, cells, "expected 1, got {cells}.");
        let result = table.column("LotFrontage").unwrap()
            .as_numeric()
            .unwrap()
            .to_vec();
        let expect = vec![Some(60.0), Some(60.0), Some(500.0), None];
        assert_eq!(expect, result, "expected {expect:?}, got {result:?}.");
    }


    #[test]
    fn test_absent_key_groups_all_rows() {
        let mut table = Table::new(vec![
            Column::numeric("LotFrontage", [Some(60.0), None, Some(80.0)]),
        ]).unwrap();
        let logger = Logger::silent();
        let cells = Imputer::new(&logger)
            .fill_grouped(
                &mut table, "LotFrontage", "Neighborhood", Aggregate::Median,
            )
            .unwrap();

        assert_eq!(1, cells, "expected 1, got {cells}.");
        let result = table.column("LotFrontage").unwrap()
            .as_numeric()
            .unwrap()[1];
        assert_eq!(Some(70.0), result, "expected Some(70), got {result:?}.");
    }
}
