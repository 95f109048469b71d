//! One-hot encoding of the categorical columns
//! and the train/test split of the encoded matrix.
use crate::{
    Feature,
    PipelineError,
    Result,
    Sample,
    Table,
};


/// Expands every categorical column into one indicator per category.
///
/// The vocabulary is learned once, on the combined train + test table,
/// so both partitions get the same columns in the same order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OneHotEncoder {
    numeric: Vec<String>,
    vocabulary: Vec<(String, Vec<String>)>,
}


impl OneHotEncoder {
    /// Learn the numeric column names and,
    /// for each categorical column, its sorted set of categories.
    pub fn fit(table: &Table) -> Result<Self> {
        let numeric = table.numeric_names();
        let vocabulary = table.columns()
            .iter()
            .filter(|column| !column.is_numeric())
            .map(|column| {
                let categories = column.vocabulary()?;
                Ok((column.name().to_string(), categories))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { numeric, vocabulary })
    }


    /// Names of the output columns:
    /// the numeric columns in their original order,
    /// then `{column}_{category}` for each categorical column.
    pub fn feature_names(&self) -> Vec<String> {
        let indicators = self.vocabulary.iter()
            .flat_map(|(column, categories)| {
                categories.iter()
                    .map(move |category| format!("{column}_{category}"))
            });
        self.numeric.iter()
            .cloned()
            .chain(indicators)
            .collect()
    }


    /// Returns the number of output columns.
    pub fn n_features(&self) -> usize {
        self.numeric.len()
            + self.vocabulary.iter().map(|(_, c)| c.len()).sum::<usize>()
    }


    /// Encode `table`.
    /// A category outside of the vocabulary encodes to all zeros.
    pub fn transform(&self, table: &Table) -> Result<Vec<Feature>> {
        let mut features = Vec::with_capacity(self.n_features());
        for name in self.numeric.iter() {
            let values = table.column(name)?.dense_values()?;
            features.push(Feature::new(name, values));
        }

        for (name, categories) in self.vocabulary.iter() {
            let column = table.column(name)?;
            let values = column.as_categorical()?;
            let count = column.missing_count();
            if count > 0 {
                return Err(PipelineError::Unfilled {
                    column: name.clone(),
                    count,
                });
            }
            for category in categories {
                let indicator = values.iter()
                    .map(|v| {
                        if v.as_deref() == Some(category.as_str()) { 1.0 } else { 0.0 }
                    })
                    .collect::<Vec<_>>();
                features.push(Feature::new(format!("{name}_{category}"), indicator));
            }
        }
        Ok(features)
    }


    /// Learn the vocabulary of `table` and encode it.
    pub fn fit_transform(table: &Table) -> Result<(Self, Vec<Feature>)> {
        let encoder = Self::fit(table)?;
        let features = encoder.transform(table)?;
        Ok((encoder, features))
    }
}


/// Split the encoded combined matrix into
/// the train partition (first `n_train` rows, labeled by `target`)
/// and the test partition (the remaining rows).
/// Both partitions keep the original row order.
pub fn split_train_test(features: Vec<Feature>, n_train: usize, target: Vec<f64>)
    -> Result<(Sample, Sample)>
{
    if n_train != target.len() {
        return Err(PipelineError::Shape {
            expected: format!("{n_train} target values"),
            actual: format!("{}", target.len()),
        });
    }
    let n_rows = features.first().map_or(n_train, Feature::len);
    if n_rows < n_train {
        return Err(PipelineError::Shape {
            expected: format!("at least {n_train} rows"),
            actual: format!("{n_rows} rows"),
        });
    }

    let (train, test): (Vec<_>, Vec<_>) = features.into_iter()
        .map(|feature| {
            let name = feature.name().to_string();
            let mut values = feature.into_values();
            let rest = values.split_off(n_train);
            (Feature::new(&name, values), Feature::new(&name, rest))
        })
        .unzip();

    let train = Sample::new(train, target)?;
    let test = Sample::unlabeled(test)?;
    Ok((train, test))
}
