use rand::prelude::*;
use rand_distr::Normal;
use houseboosts::prelude::*;
use houseboosts::booster::holdout;


/// `y = 3 sin(x0) + x1^2 + noise`, with one irrelevant feature.
fn nonlinear_sample(n_sample: usize, noise: f64, seed: u64) -> Sample {
    let mut rng = StdRng::seed_from_u64(seed);
    let normal = Normal::new(0.0, 1.0).unwrap();

    let x0 = (0..n_sample).map(|_| rng.gen_range(-3.0..3.0)).collect::<Vec<f64>>();
    let x1 = (0..n_sample).map(|_| rng.gen_range(-2.0..2.0)).collect::<Vec<f64>>();
    let x2 = (0..n_sample).map(|_| normal.sample(&mut rng)).collect::<Vec<f64>>();
    let target = (0..n_sample)
        .map(|i| {
            3.0 * x0[i].sin() + x1[i].powi(2) + noise * normal.sample(&mut rng)
        })
        .collect::<Vec<_>>();

    let features = vec![
        Feature::new("x0", x0),
        Feature::new("x1", x1),
        Feature::new("x2", x2),
    ];
    Sample::new(features, target).unwrap()
}


/// Tests for `RegressionTree`.
#[cfg(test)]
pub mod regression_tree {
    use super::*;

    #[test]
    fn step_function() {
        let x = (0..10).map(|i| i as f64).collect::<Vec<_>>();
        let y = x.iter().map(|&v| if v < 5.0 { 0.0 } else { 10.0 }).collect();
        let sample = Sample::new(vec![Feature::new("x", x)], y).unwrap();

        let tree = RegressionTreeBuilder::new(&sample)
            .max_depth(1)
            .lambda_l2(0.0)
            .build()
            .unwrap();
        let f = tree.produce(&sample, &[0.0; 10]);

        assert_eq!(2, f.n_leaves());
        assert_eq!(1, f.depth());
        let predictions = f.predict_all(&sample);
        for (p, t) in predictions.iter().zip(sample.target()) {
            assert!((p - t).abs() < 1e-12, "expected {t}, got {p}.");
        }
    }


    #[test]
    fn depth_is_bounded() {
        let sample = nonlinear_sample(200, 0.1, 11);
        let tree = RegressionTreeBuilder::new(&sample)
            .max_depth(3)
            .build()
            .unwrap();
        let f = tree.produce(&sample, &vec![0.0; 200][..]);
        assert!(f.depth() <= 3, "expected <= 3, got {}.", f.depth());
        assert!(f.n_leaves() <= 8, "expected <= 8, got {}.", f.n_leaves());
    }


    #[test]
    fn invalid_parameters() {
        let sample = nonlinear_sample(10, 0.1, 12);
        let result = RegressionTreeBuilder::new(&sample).max_depth(0).build();
        assert!(matches!(result, Err(PipelineError::InvalidParameter { .. })));
        let result = RegressionTreeBuilder::new(&sample).lambda_l2(-1.0).build();
        assert!(matches!(result, Err(PipelineError::InvalidParameter { .. })));
    }
}


/// Tests for `GBM`.
#[cfg(test)]
pub mod gbm {
    use super::*;

    #[test]
    fn training_loss_decreases() {
        let sample = nonlinear_sample(200, 0.3, 21);
        let tree = RegressionTreeBuilder::new(&sample)
            .max_depth(3)
            .build()
            .unwrap();
        let mut booster = GBM::init(&sample)
            .loss(LossType::L2)
            .n_estimators(30)
            .learning_rate(0.3);
        let f = booster.run(&tree);

        let losses = booster.train_losses();
        assert_eq!(30, losses.len());
        assert_eq!(30, f.len());
        for pair in losses.windows(2) {
            let (prev, next) = (pair[0], pair[1]);
            assert!(next <= prev + 1e-12, "expected <= {prev}, got {next}.");
        }

        let predictions = f.predict_all(&sample);
        let base = rmse(sample.target(), &vec![f.base_score; 200][..]);
        let loss = rmse(sample.target(), &predictions[..]);
        assert!(loss < 0.5 * base, "expected < {}, got {loss}.", 0.5 * base);
    }


    #[test]
    fn early_stopping_truncates() {
        let sample = nonlinear_sample(150, 1.0, 22);
        let (train, valid) = holdout(&sample, 0.2, 2);
        let valid = valid.unwrap();
        assert_eq!(30, valid.shape().0);
        assert_eq!(120, train.shape().0);

        let tree = RegressionTreeBuilder::new(&train)
            .max_depth(4)
            .lambda_l2(0.0)
            .build()
            .unwrap();
        let mut booster = GBM::init(&train)
            .n_estimators(500)
            .learning_rate(0.5)
            .validation(&valid)
            .early_stopping_rounds(1);
        let f = booster.run(&tree);

        let terminated = booster.terminated();
        let best_round = booster.best_round();
        assert!(terminated < 500, "expected < 500, got {terminated}.");
        assert_eq!(best_round, f.len());
        assert_eq!(terminated, booster.valid_losses().len());

        let best = booster.valid_losses()
            .iter()
            .copied()
            .fold(f64::INFINITY, f64::min);
        let result = booster.valid_losses()[best_round - 1];
        assert_eq!(best, result, "expected {best}, got {result}.");
    }


    #[test]
    fn grid_search_picks_a_candidate() {
        let sample = nonlinear_sample(100, 0.3, 23);
        let learner = GradientBoostingCV::new()
            .n_estimators(vec![10, 20])
            .learning_rates(vec![0.1, 0.3])
            .early_stopping_rounds(vec![0])
            .max_depth(3)
            .validation_fraction(0.0)
            .n_folds(3)
            .seed(2);
        assert_eq!(4, learner.candidates().len());

        let f = learner.fit(&sample).unwrap();
        assert!(f.len() == 10 || f.len() == 20, "got {} rounds.", f.len());
        let predictions = f.predict_all(&sample);
        assert_eq!(100, predictions.len());
        assert!(f.summary().is_some());
    }


    #[test]
    fn grid_search_scoring() {
        let sample = nonlinear_sample(90, 0.3, 25);
        let learner = GradientBoostingCV::new()
            .n_estimators(vec![5, 15])
            .learning_rates(vec![0.3])
            .early_stopping_rounds(vec![0])
            .max_depth(3)
            .validation_fraction(0.0)
            .n_folds(3);

        let info = learner.info().unwrap();
        let scoring = info.iter()
            .find(|(key, _)| *key == "Scoring")
            .map(|(_, value)| value.as_str());
        assert_eq!(Some("R2"), scoring, "expected R2, got {scoring:?}.");

        for scoring in [Scoring::R2, Scoring::MeanSquaredError] {
            let f = learner.clone().scoring(scoring).fit(&sample).unwrap();
            assert!(f.len() == 5 || f.len() == 15, "got {} rounds.", f.len());
        }
    }


    #[test]
    fn rejects_empty_grid() {
        let sample = nonlinear_sample(20, 0.3, 24);
        let result = GradientBoostingCV::new()
            .learning_rates(vec![])
            .fit(&sample);
        assert!(matches!(result, Err(PipelineError::InvalidParameter { .. })));
    }
}
