/// This trait defines the loss functions
/// minimized by the gradient-boosted trees.
pub trait LossFunction {
    /// The name of the loss function.
    fn name(&self) -> &str;
    /// Loss value for a single point.
    fn eval_at_point(&self, prediction: f64, true_value: f64) -> f64;


    /// Mean loss over the given points.
    fn eval(&self, predictions: &[f64], target: &[f64]) -> f64 {
        let n_items = predictions.len();

        assert_eq!(n_items, target.len());
        if n_items == 0 { return 0.0; }

        predictions.iter()
            .zip(target)
            .map(|(&p, &y)| self.eval_at_point(p, y))
            .sum::<f64>()
            / n_items as f64
    }

    /// Gradient vector at the current point.
    fn gradient(&self, predictions: &[f64], target: &[f64]) -> Vec<f64>;


    /// Hessian at the current point.
    /// Here, this method assumes that the Hessian is diagonal,
    /// so that it returns a diagonal vector.
    fn hessian(&self, predictions: &[f64], target: &[f64]) -> Vec<f64>;
}


/// Some well-known loss functions.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum LossType {
    /// `L2`-loss.
    /// This loss function is also known as
    /// **Mean Squared Error (MSE)**.
    #[default]
    L2,


    /// Huber loss with parameter `delta`.
    /// Huber loss maps the given scalar `z` to
    /// `0.5 * z.powi(2)` if `z.abs() < delta`,
    /// `delta * (z.abs() - 0.5 * delta)`, otherwise.
    Huber(f64),
}


impl LossFunction for LossType {
    fn name(&self) -> &str {
        match self {
            Self::L2 => "L2 loss",
            Self::Huber(_) => "Huber loss",
        }
    }


    fn eval_at_point(&self, prediction: f64, true_value: f64) -> f64 {
        match self {
            Self::L2 => (prediction - true_value).powi(2),
            Self::Huber(delta) => {
                let diff = (prediction - true_value).abs();
                if diff < *delta {
                    0.5 * diff.powi(2)
                } else {
                    delta * (diff - 0.5 * delta)
                }
            },
        }
    }


    fn gradient(&self, predictions: &[f64], target: &[f64]) -> Vec<f64>
    {
        assert_eq!(predictions.len(), target.len());

        let residuals = predictions.iter()
            .zip(target)
            .map(|(p, y)| p - y);

        match self {
            Self::L2 => residuals.collect(),
            Self::Huber(delta) => {
                residuals.map(|r| r.clamp(-delta, *delta))
                    .collect()
            },
        }
    }


    fn hessian(&self, predictions: &[f64], target: &[f64]) -> Vec<f64>
    {
        let n_sample = predictions.len();
        assert_eq!(n_sample, target.len());

        match self {
            Self::L2 => vec![1f64; n_sample],
            Self::Huber(delta) => {
                target.iter()
                    .zip(predictions)
                    .map(|(y, p)| {
                        let diff = (y - p).abs();
                        if diff < *delta { 1f64 } else { 0f64 }
                    })
                    .collect()
            },
        }
    }
}


/// Root mean squared error between `actual` and `predicted`.
pub fn rmse(actual: &[f64], predicted: &[f64]) -> f64 {
    mse(actual, predicted).sqrt()
}


/// Mean squared error between `actual` and `predicted`.
pub fn mse(actual: &[f64], predicted: &[f64]) -> f64 {
    LossType::L2.eval(predicted, actual)
}


/// Coefficient of determination `1 - SS_res / SS_tot`.
/// A constant `actual` scores `1` on an exact fit and `0` otherwise.
pub fn r2_score(actual: &[f64], predicted: &[f64]) -> f64 {
    assert_eq!(actual.len(), predicted.len());
    if actual.is_empty() { return 0.0; }

    let mean = actual.iter().sum::<f64>() / actual.len() as f64;
    let ss_tot = actual.iter()
        .map(|y| (y - mean).powi(2))
        .sum::<f64>();
    let ss_res = actual.iter()
        .zip(predicted)
        .map(|(y, p)| (y - p).powi(2))
        .sum::<f64>();

    if ss_tot == 0.0 {
        return if ss_res == 0.0 { 1.0 } else { 0.0 };
    }
    1.0 - ss_res / ss_tot
}
