use houseboosts::prelude::*;
use houseboosts::{CrossValidation, Logger};
use houseboosts::evaluation::kfold_indices;


fn line_sample(n_sample: usize) -> Sample {
    let x = (0..n_sample).map(|i| i as f64).collect::<Vec<_>>();
    let y = x.iter()
        .map(|v| 2.0 * v + 1.0 + (v * 0.7).sin())
        .collect::<Vec<_>>();
    Sample::new(vec![Feature::new("x", x)], y).unwrap()
}


/// Tests for `CrossValidation` and `cross_val_rmse`.
#[cfg(test)]
pub mod cross_validation {
    use super::*;

    #[test]
    fn every_row_is_tested_once() {
        let n_sample = 23;
        let folds = kfold_indices(n_sample, 5, 42);
        assert_eq!(5, folds.len());

        let mut seen = vec![0_usize; n_sample];
        for (train, test) in folds.iter() {
            assert_eq!(n_sample, train.len() + test.len());
            test.iter().for_each(|&i| seen[i] += 1);
            assert!(test.iter().all(|i| !train.contains(i)));
        }
        assert!(seen.iter().all(|&c| c == 1), "got {seen:?}.");

        let sizes = folds.iter().map(|(_, t)| t.len()).collect::<Vec<_>>();
        let min = *sizes.iter().min().unwrap();
        let max = *sizes.iter().max().unwrap();
        assert!(max - min <= 1, "got {sizes:?}.");
    }


    #[test]
    fn iterator_matches_indices() {
        let sample = line_sample(12);
        let folds = kfold_indices(12, 4, 7);
        let cv = CrossValidation::new(&sample)
            .n_folds(4)
            .seed(7)
            .shuffle();

        let mut n_folds = 0;
        for ((train, test), (train_ix, test_ix)) in cv.zip(folds) {
            let expect = test_ix.iter()
                .map(|&i| sample.target()[i])
                .collect::<Vec<_>>();
            assert_eq!(expect, test.target().to_vec());
            assert_eq!(train_ix.len(), train.shape().0);
            n_folds += 1;
        }
        assert_eq!(4, n_folds);
    }


    #[test]
    fn same_seed_same_score() {
        let sample = line_sample(40);
        let ridge = RidgeCV::new().alphas(vec![0.1, 1.0]).n_folds(3);
        let logger = Logger::silent();

        let a = cross_val_rmse(&ridge, &sample, 5, 42, &logger).unwrap();
        let b = cross_val_rmse(&ridge, &sample, 5, 42, &logger).unwrap();
        assert_eq!(a, b);
        assert_eq!(5, a.folds.len());

        let mean = a.folds.iter().sum::<f64>() / 5.0;
        assert!((mean - a.mean).abs() < 1e-12, "expected {mean}, got {}.", a.mean);
        let var = a.folds.iter().map(|f| (f - mean).powi(2)).sum::<f64>() / 5.0;
        let std = var.sqrt();
        assert!((std - a.std).abs() < 1e-12, "expected {std}, got {}.", a.std);
        assert!(a.mean < 1.5, "expected < 1.5, got {}.", a.mean);
    }


    #[test]
    fn too_many_folds() {
        let sample = line_sample(3);
        let ridge = RidgeCV::new().alphas(vec![1.0]).n_folds(2);
        let logger = Logger::silent();
        let result = cross_val_rmse(&ridge, &sample, 5, 42, &logger);
        assert!(matches!(result, Err(PipelineError::InvalidParameter { .. })));
    }


    #[test]
    fn score_display() {
        let score = CvScore::from_folds(vec![0.1, 0.3]);
        assert_eq!("0.2000 (0.1000)", score.to_string());
    }
}
