use rand::prelude::*;
use rand_distr::Normal;
use houseboosts::prelude::*;
use houseboosts::RobustScaler;


/// `y = 1 + 3 x0 - 2 x1 + noise`, with three irrelevant features.
fn linear_sample(n_sample: usize, noise: f64, seed: u64) -> Sample {
    let mut rng = StdRng::seed_from_u64(seed);
    let normal = Normal::new(0.0, 1.0).unwrap();

    let columns = (0..5).map(|_| {
            (0..n_sample).map(|_| normal.sample(&mut rng))
                .collect::<Vec<f64>>()
        })
        .collect::<Vec<_>>();
    let target = (0..n_sample).map(|i| {
            let eps = noise * normal.sample(&mut rng);
            1.0 + 3.0 * columns[0][i] - 2.0 * columns[1][i] + eps
        })
        .collect::<Vec<_>>();

    let features = columns.into_iter()
        .enumerate()
        .map(|(j, values)| Feature::new(format!("x{j}"), values))
        .collect();
    Sample::new(features, target).unwrap()
}


/// Tests for `RidgeCV`, `LassoCV`, and `ElasticNetCV`.
#[cfg(test)]
pub mod linear_model {
    use super::*;

    #[test]
    fn ridge_recovers_coefficients() {
        let sample = linear_sample(100, 0.0, 1);
        let f = RidgeCV::new()
            .alphas(vec![1e-10])
            .fit(&sample)
            .unwrap();

        let scale = f.scaler().scale();
        let expect = [3.0, -2.0, 0.0, 0.0, 0.0];
        for (j, e) in expect.iter().enumerate() {
            let result = f.coef()[j] / scale[j];
            assert!((e - result).abs() < 1e-6, "expected {e}, got {result}.");
        }

        let predictions = f.predict_all(&sample);
        let loss = rmse(sample.target(), &predictions[..]);
        assert!(loss < 1e-6, "expected ~0, got {loss}.");
        assert_eq!(None, f.l1_ratio());
    }


    #[test]
    fn ridge_picks_a_listed_alpha() {
        let sample = linear_sample(80, 0.5, 2);
        let alphas = vec![14.5, 15.0, 15.5];
        let f = RidgeCV::new()
            .alphas(alphas.clone())
            .n_folds(5)
            .seed(42)
            .fit(&sample)
            .unwrap();
        assert!(alphas.contains(&f.alpha()));
    }


    #[test]
    fn ridge_ranks_penalties_by_r2() {
        let sample = linear_sample(90, 0.5, 6);
        let alphas = vec![1e-3, 1.0, 1e6];
        let default = RidgeCV::new()
            .alphas(alphas.clone())
            .fit(&sample)
            .unwrap();
        let by_r2 = RidgeCV::new()
            .alphas(alphas.clone())
            .scoring(Scoring::R2)
            .fit(&sample)
            .unwrap();
        let expect = by_r2.alpha();
        let result = default.alpha();
        assert_eq!(expect, result, "expected {expect}, got {result}.");
        assert_eq!(by_r2.coef(), default.coef());
        assert_ne!(1e6, result, "expected a weak penalty, got {result}.");

        let by_mse = RidgeCV::new()
            .alphas(alphas)
            .scoring(Scoring::MeanSquaredError)
            .fit(&sample)
            .unwrap();
        assert_ne!(1e6, by_mse.alpha());
    }


    #[test]
    fn lasso_zeroes_irrelevant_features() {
        let sample = linear_sample(200, 0.01, 3);
        let f = LassoCV::new()
            .alphas(vec![0.05, 0.1])
            .max_iter(10_000)
            .fit(&sample)
            .unwrap();

        assert_eq!(2, f.n_nonzero(), "expected 2, got {}.", f.n_nonzero());
        for j in 2..5 {
            let result = f.coef()[j];
            assert_eq!(0.0, result, "expected 0, got {result}.");
        }
        assert_eq!(Some(1.0), f.l1_ratio());

        let predictions = f.predict_all(&sample);
        let loss = rmse(sample.target(), &predictions[..]);
        assert!(loss < 0.5, "expected < 0.5, got {loss}.");
    }


    #[test]
    fn elastic_net_picks_from_the_grid() {
        let sample = linear_sample(120, 0.1, 4);
        let alphas = vec![1e-4, 5e-4];
        let ratios = vec![0.8, 0.9, 1.0];
        let f = ElasticNetCV::new()
            .alphas(alphas.clone())
            .l1_ratios(ratios.clone())
            .max_iter(10_000)
            .fit(&sample)
            .unwrap();

        assert!(alphas.contains(&f.alpha()));
        assert!(ratios.contains(&f.l1_ratio().unwrap()));

        let predictions = f.predict_all(&sample);
        let loss = rmse(sample.target(), &predictions[..]);
        assert!(loss < 0.2, "expected < 0.2, got {loss}.");

        let one_by_one = (0..sample.shape().0)
            .map(|i| f.predict(&sample, i))
            .collect::<Vec<_>>();
        for (p, q) in predictions.iter().zip(one_by_one) {
            assert!((p - q).abs() < 1e-9, "expected {p}, got {q}.");
        }
    }


    #[test]
    fn invalid_grids_are_rejected() {
        let sample = linear_sample(20, 0.1, 5);
        assert!(matches!(
            RidgeCV::new().alphas(vec![]).fit(&sample),
            Err(PipelineError::InvalidParameter { .. })
        ));
        assert!(matches!(
            LassoCV::new().alphas(vec![-1.0]).fit(&sample),
            Err(PipelineError::InvalidParameter { .. })
        ));
        assert!(matches!(
            ElasticNetCV::new().l1_ratios(vec![0.0]).fit(&sample),
            Err(PipelineError::InvalidParameter { .. })
        ));
        assert!(matches!(
            RidgeCV::new().n_folds(50).fit(&sample),
            Err(PipelineError::InvalidParameter { .. })
        ));
    }


    #[test]
    fn robust_scaler_keeps_unit_scale_on_constant() {
        let sample = Sample::new(
            vec![
                Feature::new("constant", vec![4.0; 5]),
                Feature::new("spread", vec![1.0, 2.0, 3.0, 4.0, 5.0]),
            ],
            vec![0.0; 5],
        ).unwrap();
        let scaler = RobustScaler::fit(&sample);

        assert_eq!(vec![4.0, 3.0], scaler.center().to_vec());
        assert_eq!(vec![1.0, 2.0], scaler.scale().to_vec());
    }
}
