//! Derived features.
//! Sums of related area/count columns and presence indicators.
use crate::{
    logging::Logger,
    Column,
    PipelineError,
    Result,
    Table,
};


/// How a derived column is computed from its inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Derivation {
    /// `Σ weight * column`.
    WeightedSum(&'static [(&'static str, f64)]),
    /// `1` if the column is positive, `0` otherwise.
    Indicator(&'static str),
}


/// A derived column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedFeature {
    /// Name of the appended column.
    pub name: &'static str,
    /// Formula of the column.
    pub derivation: Derivation,
}


/// Derived columns in the order they are appended.
pub const DERIVED_FEATURES: &[DerivedFeature] = &[
    DerivedFeature {
        name: "YrBltAndRemod",
        derivation: Derivation::WeightedSum(&[
            ("YearBuilt", 1.0), ("YearRemodAdd", 1.0),
        ]),
    },
    DerivedFeature {
        name: "TotalSF",
        derivation: Derivation::WeightedSum(&[
            ("TotalBsmtSF", 1.0), ("1stFlrSF", 1.0), ("2ndFlrSF", 1.0),
        ]),
    },
    DerivedFeature {
        name: "Total_sqr_footage",
        derivation: Derivation::WeightedSum(&[
            ("BsmtFinSF1", 1.0), ("BsmtFinSF2", 1.0),
            ("1stFlrSF", 1.0), ("2ndFlrSF", 1.0),
        ]),
    },
    DerivedFeature {
        name: "Total_Bathrooms",
        derivation: Derivation::WeightedSum(&[
            ("FullBath", 1.0), ("HalfBath", 0.5),
            ("BsmtFullBath", 1.0), ("BsmtHalfBath", 0.5),
        ]),
    },
    DerivedFeature {
        name: "Total_porch_sf",
        derivation: Derivation::WeightedSum(&[
            ("OpenPorchSF", 1.0), ("3SsnPorch", 1.0), ("EnclosedPorch", 1.0),
            ("ScreenPorch", 1.0), ("WoodDeckSF", 1.0),
        ]),
    },
    DerivedFeature {
        name: "haspool",
        derivation: Derivation::Indicator("PoolArea"),
    },
    DerivedFeature {
        name: "has2ndfloor",
        derivation: Derivation::Indicator("2ndFlrSF"),
    },
    DerivedFeature {
        name: "hasgarage",
        derivation: Derivation::Indicator("GarageArea"),
    },
    DerivedFeature {
        name: "hasbsmt",
        derivation: Derivation::Indicator("TotalBsmtSF"),
    },
    DerivedFeature {
        name: "hasfireplace",
        derivation: Derivation::Indicator("Fireplaces"),
    },
];


impl Derivation {
    /// Names of the input columns.
    pub fn inputs(&self) -> Vec<&'static str> {
        match self {
            Self::WeightedSum(terms) => terms.iter().map(|(c, _)| *c).collect(),
            Self::Indicator(column) => vec![*column],
        }
    }
}


impl DerivedFeature {
    /// Compute the column.
    /// Every input must exist, be numeric, and have no missing cell.
    pub fn compute(&self, table: &Table) -> Result<Column> {
        let n_rows = table.n_rows();
        let values = match self.derivation {
            Derivation::WeightedSum(terms) => {
                let mut values = vec![0f64; n_rows];
                for (name, weight) in terms {
                    let column = table.column(name)?.dense_values()?;
                    values.iter_mut()
                        .zip(column)
                        .for_each(|(v, x)| { *v += weight * x; });
                }
                values
            },
            Derivation::Indicator(name) => {
                table.column(name)?
                    .dense_values()?
                    .into_iter()
                    .map(|x| if x > 0.0 { 1.0 } else { 0.0 })
                    .collect()
            },
        };
        Ok(Column::dense(self.name, values))
    }
}


/// Appends the [`DERIVED_FEATURES`] to a record table.
pub struct FeatureSynthesizer<'a> {
    logger: &'a Logger,
}


impl<'a> FeatureSynthesizer<'a> {
    /// Construct a new instance of `FeatureSynthesizer`.
    pub fn new(logger: &'a Logger) -> Self {
        Self { logger }
    }


    /// Append every derived column whose inputs are present
    /// and numeric. No existing column is modified.
    /// Returns the names of the appended columns.
    pub fn synthesize(&self, table: &mut Table) -> Result<Vec<String>> {
        let mut appended = Vec::with_capacity(DERIVED_FEATURES.len());
        for feature in DERIVED_FEATURES {
            let unusable = feature.derivation.inputs()
                .into_iter()
                .filter(|name| {
                    table.get(name).map_or(true, |c| !c.is_numeric())
                })
                .collect::<Vec<_>>();
            if !unusable.is_empty() {
                self.logger.warn(format!(
                    "skipping `{}`: no numeric column {}",
                    feature.name,
                    unusable.join(", "),
                ));
                continue;
            }
            if table.contains(feature.name) {
                return Err(PipelineError::InvalidParameter {
                    name: "derived feature",
                    value: feature.name.to_string(),
                    reason: "the table already has a column of this name",
                });
            }

            let column = feature.compute(table)?;
            table.push_column(column)?;
            appended.push(feature.name.to_string());
        }

        self.logger.stat("Derived features", appended.len());
        self.logger.stat("Features", table.shape().1);
        Ok(appended)
    }
}
