//! Closed-form ridge solutions via the Cholesky factorization.
use rayon::prelude::*;

use super::design::{Centered, dot};
use crate::{PipelineError, Result};


/// The normal equations `XᵀX` and `Xᵀy` of a centered design.
/// Build them once, then solve for as many penalties as needed.
#[derive(Debug, Clone)]
pub(crate) struct NormalEquations {
    gram: Vec<Vec<f64>>,
    xty: Vec<f64>,
}


impl NormalEquations {
    pub(crate) fn new(data: &Centered) -> Self {
        let columns = &data.x.columns;
        let p = columns.len();
        let gram = (0..p).into_par_iter()
            .map(|i| {
                (0..p).map(|j| dot(&columns[i][..], &columns[j][..]))
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();
        let xty = columns.iter()
            .map(|column| dot(&column[..], &data.y[..]))
            .collect();
        Self { gram, xty }
    }


    /// Solve `(XᵀX + αI) w = Xᵀy`.
    pub(crate) fn solve(&self, alpha: f64) -> Result<Vec<f64>> {
        let p = self.xty.len();
        let mut a = self.gram.clone();
        (0..p).for_each(|i| { a[i][i] += alpha; });

        let l = cholesky(a).ok_or(PipelineError::Singular { alpha })?;

        // Forward substitution: L z = b
        let mut z = vec![0.0; p];
        for i in 0..p {
            let s = (0..i).map(|k| l[i][k] * z[k]).sum::<f64>();
            z[i] = (self.xty[i] - s) / l[i][i];
        }

        // Backward substitution: Lᵀ w = z
        let mut w = vec![0.0; p];
        for i in (0..p).rev() {
            let s = (i + 1..p).map(|k| l[k][i] * w[k]).sum::<f64>();
            w[i] = (z[i] - s) / l[i][i];
        }
        Ok(w)
    }
}


/// Lower-triangular factor of a symmetric positive definite matrix.
/// Returns `None` if `a` is not positive definite.
fn cholesky(a: Vec<Vec<f64>>) -> Option<Vec<Vec<f64>>> {
    let n = a.len();
    let mut l = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in 0..=i {
            let s = (0..j).map(|k| l[i][k] * l[j][k]).sum::<f64>();
            if i == j {
                let d = a[i][i] - s;
                if d <= 0.0 || !d.is_finite() { return None; }
                l[i][j] = d.sqrt();
            } else {
                l[i][j] = (a[i][j] - s) / l[j][j];
            }
        }
    }
    Some(l)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::linear_model::design::Design;

    #[test]
    fn test_solve_recovers_exact_weights() {
        // y = 2 x0 - x1 + 3
        let x0 = vec![0.0, 1.0, 2.0, 3.0, 4.0];
        let x1 = vec![1.0, 0.0, 2.0, 1.0, 5.0];
        let y = x0.iter().zip(&x1)
            .map(|(a, b)| 2.0 * a - b + 3.0)
            .collect::<Vec<_>>();
        let data = Design::new(vec![x0, x1], 5).center(&y[..]);
        let w = NormalEquations::new(&data).solve(0.0).unwrap();

        assert!((w[0] - 2.0).abs() < 1e-9, "expected 2, got {}.", w[0]);
        assert!((w[1] + 1.0).abs() < 1e-9, "expected -1, got {}.", w[1]);
        let b = data.intercept(&w[..]);
        assert!((b - 3.0).abs() < 1e-9, "expected 3, got {b}.");
    }


    #[test]
    fn test_penalty_shrinks_weights() {
        let x0 = vec![0.0, 1.0, 2.0, 3.0];
        let y = vec![0.0, 2.0, 4.0, 6.0];
        let data = Design::new(vec![x0], 4).center(&y[..]);
        let eq = NormalEquations::new(&data);
        let w0 = eq.solve(0.0).unwrap()[0];
        let w1 = eq.solve(5.0).unwrap()[0];
        // Σ x² = 5 after centering, so w = 10 / (5 + α)
        assert!((w0 - 2.0).abs() < 1e-9);
        assert!((w1 - 1.0).abs() < 1e-9, "expected 1, got {w1}.");
    }


    #[test]
    fn test_singular_without_penalty() {
        let x0 = vec![1.0, 1.0, 1.0];
        let data = Design::new(vec![x0], 3).center(&[1.0, 2.0, 3.0]);
        let result = NormalEquations::new(&data).solve(0.0);
        assert!(matches!(result, Err(PipelineError::Singular { .. })));
    }
}
