//! Struct `Table` represents the raw records,
//! struct `Sample` the numeric matrix the models are trained on.

// Provides the column of a record table.
pub(crate) mod column;
// Provides the record table.
pub(crate) mod table;
// Provides a struct that reads a CSV file.
pub(crate) mod reader;

// Provides feature struct.
pub(crate) mod feature;
// Provides sample struct.
pub(crate) mod sample_struct;


pub use column::Column;
pub use table::Table;
pub use reader::TableReader;
pub use feature::Feature;
pub use sample_struct::Sample;
