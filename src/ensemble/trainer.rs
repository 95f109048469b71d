use rayon::prelude::*;

use super::blender::Blend;
use crate::{
    config::PipelineConfig,
    evaluation::{cross_val_rmse, CvScore},
    learner::BoxedRegressor,
    logging::Logger,
    AnyLearner,
    ElasticNetCV,
    GradientBoostingCV,
    LassoCV,
    Regressor,
    Result,
    RidgeCV,
    Sample,
};


/// A learner of the ensemble and the seed of the folds it is scored on.
struct Member {
    learner: Box<dyn AnyLearner>,
    cv_seed: u64,
}


/// Fits every member on the same sample and
/// scores each of them by K-fold CV.
///
/// ```no_run
/// use houseboosts::prelude::*;
///
/// # fn run(train: &Sample, test: &Sample) -> houseboosts::Result<()> {
/// let config = PipelineConfig::default();
/// let trainer = EnsembleTrainer::from_config(&config);
/// let blend = trainer.fit(train)?;
/// let predictions = blend.predict_all(test);
/// # Ok(())
/// # }
/// ```
pub struct EnsembleTrainer {
    members: Vec<Member>,
    // Positions of `members` in the order they are scored.
    score_order: Vec<usize>,
    n_folds: usize,
    parallel: bool,
    logger: Logger,
}


impl EnsembleTrainer {
    /// An empty ensemble scored with `n_folds` folds.
    pub fn new(n_folds: usize) -> Self {
        Self {
            members: Vec::new(),
            score_order: Vec::new(),
            n_folds,
            parallel: false,
            logger: Logger::silent(),
        }
    }


    /// The four-model ensemble:
    /// elastic net, lasso, ridge, and gradient-boosted trees,
    /// fitted in this order.
    /// The linear models are scored on the folds of `linear_seed`,
    /// the trees on the folds of `tree_seed`.
    pub fn from_config(config: &PipelineConfig) -> Self {
        let linear = &config.linear;
        let n_folds = config.n_folds;

        let elastic_net = ElasticNetCV::new()
            .alphas(linear.elastic_net_alphas.clone())
            .l1_ratios(linear.elastic_net_l1_ratios.clone())
            .max_iter(linear.elastic_net_max_iter)
            .tol(linear.tolerance)
            .n_folds(n_folds)
            .seed(config.linear_seed);
        let lasso = LassoCV::new()
            .alphas(linear.lasso_alphas.clone())
            .max_iter(linear.lasso_max_iter)
            .tol(linear.tolerance)
            .n_folds(n_folds)
            .seed(config.linear_seed);
        let ridge = RidgeCV::new()
            .alphas(linear.ridge_alphas.clone())
            .n_folds(n_folds)
            .seed(config.linear_seed);
        let gbm = GradientBoostingCV::from_config(&config.boosting)
            .n_folds(n_folds)
            .seed(config.tree_seed);

        let mut trainer = Self::new(n_folds)
            .member(elastic_net, config.linear_seed)
            .member(lasso, config.linear_seed)
            .member(ridge, config.linear_seed)
            .member(gbm, config.tree_seed)
            .parallel(config.parallel)
            .verbose(config.verbose);
        // Ridge, Lasso, ElasticNet, GBM
        trainer.score_order = vec![2, 1, 0, 3];
        trainer
    }


    /// Append a member scored on the folds of `cv_seed`.
    pub fn member<L>(mut self, learner: L, cv_seed: u64) -> Self
        where L: AnyLearner + 'static
    {
        self.score_order.push(self.members.len());
        self.members.push(Member { learner: Box::new(learner), cv_seed });
        self
    }


    /// Fit the members on the rayon thread pool.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }


    /// Print the per-fold progress of the evaluation.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.logger = Logger::new(verbose);
        self
    }


    /// Returns the member names in fitting order.
    pub fn names(&self) -> Vec<&str> {
        self.members.iter()
            .map(|m| m.learner.name())
            .collect()
    }


    /// Fit each member once on `sample`.
    pub fn fit(&self, sample: &Sample) -> Result<Blend> {
        sample.check_trainable()?;
        self.logger.section("Fitting the ensemble");

        let fitted = if self.parallel {
            self.members.par_iter()
                .map(|m| m.learner.fit_boxed(sample))
                .collect::<Result<Vec<_>>>()?
        } else {
            self.members.iter()
                .map(|m| m.learner.fit_boxed(sample))
                .collect::<Result<Vec<_>>>()?
        };

        let members = self.members.iter()
            .zip(fitted)
            .map(|(m, f)| {
                self.log_fitted(m, &f);
                (m.learner.name().to_string(), f)
            })
            .collect();
        self.logger.footer();
        Ok(Blend::new(members))
    }


    fn log_fitted(&self, member: &Member, f: &BoxedRegressor) {
        let summary = f.summary().unwrap_or_default();
        self.logger.stat(member.learner.name(), summary);
        self.logger.info_lines(member.learner.info());
    }


    /// Score each member by K-fold CV RMSE.
    /// Each fold refits the member from scratch.
    pub fn evaluate(&self, sample: &Sample) -> Result<Vec<(String, CvScore)>> {
        self.logger.section("Cross-validated RMSE");
        let scores = self.score_order.iter()
            .map(|&k| {
                let m = &self.members[k];
                let score = cross_val_rmse(
                    m.learner.as_ref(), sample, self.n_folds, m.cv_seed, &self.logger,
                )?;
                Ok((m.learner.name().to_string(), score))
            })
            .collect::<Result<Vec<_>>>()?;
        self.logger.footer();
        Ok(scores)
    }
}
