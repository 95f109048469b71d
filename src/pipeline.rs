//! The end-to-end run: from the combined records to the submission.
use crate::{
    common::loss_functions::rmse,
    dataset::HousingData,
    ensemble::EnsembleTrainer,
    evaluation::CvScore,
    logging::Logger,
    preprocessing::{
        expm1,
        split_train_test,
        FeatureSynthesizer,
        ImputationReport,
        Imputer,
        OneHotEncoder,
        SkewCorrector,
    },
    PipelineConfig,
    Regressor,
    Result,
    Submission,
};

use std::fmt;


/// Outcome of [`Pipeline::run`].
#[derive(Debug, Clone)]
pub struct PipelineReport {
    /// CV score of each member, in scoring order.
    pub scores: Vec<(String, CvScore)>,
    /// RMSE of the blended prediction on the training rows (log space).
    pub train_rmse: f64,
    /// Blended predictions on the test rows, in the price scale.
    pub submission: Submission,
    /// Numeric columns that received `log1p`.
    pub transformed_columns: Vec<String>,
    /// Number of columns of the encoded matrix.
    pub n_features: usize,
    /// Derived columns appended before encoding.
    pub derived_features: Vec<String>,
    /// What the imputation filled.
    pub imputation: ImputationReport,
}


impl fmt::Display for PipelineReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (name, score) in self.scores.iter() {
            writeln!(f, "{name:<12} score: {score}")?;
        }
        writeln!(f, "{:<12} {}", "Features", self.n_features)?;
        writeln!(f, "{:<12} {}", "Skewed", self.transformed_columns.len())?;
        write!(f, "{:<12} {:.6}", "Train RMSE", self.train_rmse)
    }
}


/// Runs every stage on a [`HousingData`].
///
/// ```no_run
/// use houseboosts::{HousingData, Pipeline, PipelineConfig};
///
/// # fn main() -> houseboosts::Result<()> {
/// let config = PipelineConfig::default();
/// let data = HousingData::load("train.csv", "test.csv", &config)?;
/// let report = Pipeline::new(config).run(data)?;
/// report.submission.to_csv("submission.csv")?;
/// # Ok(())
/// # }
/// ```
pub struct Pipeline {
    config: PipelineConfig,
    logger: Logger,
}


impl Pipeline {
    /// Construct a new instance of `Pipeline`.
    pub fn new(config: PipelineConfig) -> Self {
        let logger = Logger::new(config.verbose);
        Self { config, logger }
    }


    /// Returns the configuration of this run.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }


    /// Impute, derive, normalize, encode, fit the ensemble,
    /// score its members, and predict the test rows.
    pub fn run(&self, data: HousingData) -> Result<PipelineReport> {
        let HousingData {
            features: mut table,
            target,
            n_train,
            test_ids,
            dropped_rows,
            ..
        } = data;

        self.logger.section("DATA");
        self.logger.stat("Train rows", n_train);
        self.logger.stat("Test rows", table.n_rows() - n_train);
        self.logger.stat("Columns", table.shape().1);
        if dropped_rows > 0 {
            self.logger.warn(format!(
                "dropped {dropped_rows} training rows without a target"
            ));
        }
        self.logger.footer();

        let imputation = Imputer::new(&self.logger).impute(&mut table)?;

        self.logger.section("FEATURES");
        let derived_features = FeatureSynthesizer::new(&self.logger)
            .synthesize(&mut table)?;

        let skew = SkewCorrector::new(self.config.skew_threshold)
            .fit_transform(&mut table)?;
        self.logger.stat("Numeric", table.numeric_names().len());
        self.logger.stat("Categorical", table.categorical_names().len());
        self.logger.stat("Skewed", skew.transformed.len());
        if !skew.transformed.is_empty() {
            self.logger.sub_stat("log1p", skew.transformed.join(", "));
        }

        let (encoder, features) = OneHotEncoder::fit_transform(&table)?;
        let n_features = encoder.n_features();
        let (train, test) = split_train_test(features, n_train, target)?;
        let (n_rows, n_cols) = train.shape();
        self.logger.stat("Train matrix", format!("{n_rows} x {n_cols}"));
        let (n_rows, n_cols) = test.shape();
        self.logger.stat("Test matrix", format!("{n_rows} x {n_cols}"));
        self.logger.footer();

        let trainer = EnsembleTrainer::from_config(&self.config);
        let blend = trainer.fit(&train)?;
        let scores = trainer.evaluate(&train)?;

        let fitted = blend.predict_all(&train);
        let train_rmse = rmse(train.target(), &fitted[..]);
        self.logger.section("BLEND");
        self.logger.stat("Train RMSE", format!("{train_rmse:.6}"));
        self.logger.footer();

        let predictions = expm1(&blend.predict_all(&test)[..]);
        let submission = Submission::new(test_ids, predictions)?
            .column_names(&self.config.id, &self.config.target);

        Ok(PipelineReport {
            scores,
            train_rmse,
            submission,
            transformed_columns: skew.transformed,
            n_features,
            derived_features,
            imputation,
        })
    }
}
