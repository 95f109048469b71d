//! Error types of this crate.
//! Every fallible operation returns [`Result<T>`],
//! and nothing is recovered locally.
use polars::prelude::PolarsError;
use thiserror::Error;


/// Result type alias for the operations in this crate.
pub type Result<T> = std::result::Result<T, PipelineError>;


/// Errors that terminate a run.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Reading/writing a file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parsing a CSV file or converting a `DataFrame` failed.
    #[error("DataFrame error: {0}")]
    Polars(#[from] PolarsError),

    /// A configuration file is malformed.
    #[error("Config error: {0}")]
    Json(#[from] serde_json::Error),

    /// A column required by some step does not exist.
    #[error("Column `{0}` does not exist")]
    MissingColumn(String),

    /// A column has an unexpected type.
    #[error("Column `{name}` is {found}, expected {expected}")]
    ColumnType {
        /// Column name
        name: String,
        /// The type the step requires.
        expected: &'static str,
        /// The type of the column.
        found: &'static str,
    },

    /// Two objects that must agree in shape do not.
    #[error("Invalid shape: expected {expected}, got {actual}")]
    Shape {
        /// The required shape.
        expected: String,
        /// The shape found.
        actual: String,
    },

    /// A grouped aggregate is undefined because the group
    /// has no observed value to aggregate.
    #[error(
        "Cannot fill `{column}`: group `{group}` of `{by}` \
         has no observed values"
    )]
    EmptyGroup {
        /// The column being filled.
        column: String,
        /// The column that defines the groups.
        by: String,
        /// The key of the empty group.
        group: String,
    },

    /// `log1p` is applied to a value outside of its domain.
    #[error("log1p is undefined for `{column}`: found value {value} <= -1")]
    Domain {
        /// Column name
        column: String,
        /// The offending value.
        value: f64,
    },

    /// A missing marker survived the imputation.
    #[error("Column `{column}` still has {count} missing values")]
    Unfilled {
        /// Column name
        column: String,
        /// Number of missing cells left.
        count: usize,
    },

    /// A hyperparameter or option is out of range.
    #[error("Invalid parameter: {name} = {value}, {reason}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// The rejected value.
        value: String,
        /// Why the value is rejected.
        reason: &'static str,
    },

    /// The normal equation has no solution.
    #[error("Linear system is singular (alpha = {alpha})")]
    Singular {
        /// The penalty of the system.
        alpha: f64,
    },

    /// An operation requires at least one example.
    #[error("Sample is empty: {0}")]
    EmptySample(&'static str),
}
