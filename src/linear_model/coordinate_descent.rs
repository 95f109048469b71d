//! Cyclic coordinate descent for the elastic-net objective
//!
//! ```text
//! (1 / 2n) ‖y - Xw‖² + α ρ ‖w‖₁ + (α (1 - ρ) / 2) ‖w‖²
//! ```
//!
//! on a centered design. `ρ = 1` is the lasso.
use super::design::{Centered, dot};


/// Default iteration cap.
pub const DEFAULT_MAX_ITER: usize = 1_000;
/// Default tolerance on the duality gap, relative to `‖y‖²`.
pub const DEFAULT_TOLERANCE: f64 = 1e-4;


#[derive(Debug, Clone, Copy)]
pub(crate) struct CoordinateDescent {
    pub(crate) alpha: f64,
    pub(crate) l1_ratio: f64,
    pub(crate) max_iter: usize,
    pub(crate) tol: f64,
}


impl CoordinateDescent {
    /// Run the descent starting from `w`, which is updated in place.
    /// Returns the number of sweeps performed.
    pub(crate) fn solve(&self, data: &Centered, w: &mut [f64]) -> usize {
        let x = &data.x.columns;
        let y = &data.y[..];
        let n = data.x.n_rows as f64;
        let l1 = n * self.alpha * self.l1_ratio;
        let l2 = n * self.alpha * (1.0 - self.l1_ratio);

        let norms = x.iter()
            .map(|column| dot(&column[..], &column[..]))
            .collect::<Vec<_>>();

        let mut residual = y.to_vec();
        x.iter().zip(w.iter())
            .filter(|&(_, &wj)| wj != 0.0)
            .for_each(|(column, &wj)| {
                residual.iter_mut()
                    .zip(column)
                    .for_each(|(r, xij)| { *r -= wj * xij; });
            });

        let tol = self.tol * dot(y, y);

        for sweep in 1..=self.max_iter {
            let mut w_max = 0.0_f64;
            let mut d_w_max = 0.0_f64;
            for j in 0..w.len() {
                if norms[j] == 0.0 { continue; }
                let w_old = w[j];
                let rho = dot(&x[j][..], &residual[..]) + w_old * norms[j];
                let w_new = soft_threshold(rho, l1) / (norms[j] + l2);
                if w_new != w_old {
                    let delta = w_new - w_old;
                    residual.iter_mut()
                        .zip(&x[j])
                        .for_each(|(r, xij)| { *r -= delta * xij; });
                }
                w[j] = w_new;
                d_w_max = d_w_max.max((w_new - w_old).abs());
                w_max = w_max.max(w_new.abs());
            }

            let converged = w_max == 0.0
                || d_w_max / w_max < self.tol
                || sweep == self.max_iter;
            if converged
                && duality_gap(data, w, &residual[..], l1, l2) < tol
            {
                return sweep;
            }
        }
        self.max_iter
    }
}


#[inline]
pub(crate) fn soft_threshold(value: f64, threshold: f64) -> f64 {
    if value > threshold {
        value - threshold
    } else if value < -threshold {
        value + threshold
    } else {
        0.0
    }
}


/// Gap between the primal objective and its dual bound,
/// both scaled by `n`.
fn duality_gap(
    data: &Centered,
    w: &[f64],
    residual: &[f64],
    l1: f64,
    l2: f64,
) -> f64
{
    let xt_a = data.x.columns.iter()
        .zip(w)
        .map(|(column, wj)| dot(&column[..], residual) - l2 * wj)
        .collect::<Vec<_>>();
    let dual_norm = xt_a.iter()
        .fold(0.0_f64, |acc, v| acc.max(v.abs()));
    let r_norm2 = dot(residual, residual);
    let w_norm2 = dot(w, w);

    let (c, mut gap) = if dual_norm > l1 {
        let c = l1 / dual_norm;
        (c, 0.5 * (r_norm2 + r_norm2 * c * c))
    } else {
        (1.0, r_norm2)
    };
    let l1_norm = w.iter().map(|v| v.abs()).sum::<f64>();
    gap += l1 * l1_norm
        - c * dot(residual, &data.y[..])
        + 0.5 * l2 * (1.0 + c * c) * w_norm2;
    gap
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::linear_model::design::Design;

    fn data() -> Centered {
        let x0 = vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        let x1 = vec![1.0, -1.0, 1.0, -1.0, 1.0, -1.0];
        let y = x0.iter().map(|v| 3.0 * v + 1.0).collect::<Vec<_>>();
        Design::new(vec![x0, x1], 6).center(&y[..])
    }


    #[test]
    fn test_soft_threshold() {
        assert_eq!(2.0, soft_threshold(3.0, 1.0));
        assert_eq!(-2.0, soft_threshold(-3.0, 1.0));
        assert_eq!(0.0, soft_threshold(0.5, 1.0));
    }


    #[test]
    fn test_tiny_penalty_recovers_least_squares() {
        let data = data();
        let cd = CoordinateDescent {
            alpha: 1e-8, l1_ratio: 1.0, max_iter: 10_000, tol: 1e-10,
        };
        let mut w = vec![0.0; 2];
        cd.solve(&data, &mut w[..]);
        assert!((w[0] - 3.0).abs() < 1e-4, "expected 3, got {}.", w[0]);
        assert!(w[1].abs() < 1e-4, "expected 0, got {}.", w[1]);
    }


    #[test]
    fn test_large_penalty_zeroes_weights() {
        let data = data();
        let cd = CoordinateDescent {
            alpha: 1e6, l1_ratio: 0.5, max_iter: 100, tol: 1e-4,
        };
        let mut w = vec![1.0; 2];
        cd.solve(&data, &mut w[..]);
        assert!(w.iter().all(|v| v.abs() < 1e-3), "got {w:?}.");
    }


    #[test]
    fn test_lasso_drops_irrelevant_feature() {
        let data = data();
        let cd = CoordinateDescent {
            alpha: 0.1, l1_ratio: 1.0, max_iter: 1_000, tol: 1e-6,
        };
        let mut w = vec![0.0; 2];
        cd.solve(&data, &mut w[..]);
        assert_eq!(0.0, w[1], "expected 0, got {}.", w[1]);
        assert!(w[0] > 2.5 && w[0] < 3.0, "got {}.", w[0]);
    }
}
