//! Column-major design matrices used by the linear solvers.
use rayon::prelude::*;

use crate::common::stats;


/// A dense column-major matrix.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Design {
    pub(crate) columns: Vec<Vec<f64>>,
    pub(crate) n_rows: usize,
}


/// A design and a target, both centered on their means.
#[derive(Debug, Clone)]
pub(crate) struct Centered {
    pub(crate) x: Design,
    pub(crate) y: Vec<f64>,
    pub(crate) x_mean: Vec<f64>,
    pub(crate) y_mean: f64,
}


impl Design {
    pub(crate) fn new(columns: Vec<Vec<f64>>, n_rows: usize) -> Self {
        Self { columns, n_rows }
    }


    pub(crate) fn n_features(&self) -> usize {
        self.columns.len()
    }


    /// The rows at `rows`, in that order.
    pub(crate) fn take(&self, rows: &[usize]) -> Self {
        let columns = self.columns.par_iter()
            .map(|column| rows.iter().map(|&i| column[i]).collect())
            .collect();
        Self { columns, n_rows: rows.len() }
    }


    /// Center each column and the target.
    pub(crate) fn center(&self, y: &[f64]) -> Centered {
        let x_mean = self.columns.par_iter()
            .map(|column| stats::mean(&column[..]))
            .collect::<Vec<_>>();
        let columns = self.columns.par_iter()
            .zip(&x_mean[..])
            .map(|(column, mu)| column.iter().map(|x| x - mu).collect())
            .collect();
        let y_mean = stats::mean(y);
        let y = y.iter().map(|v| v - y_mean).collect();
        Centered {
            x: Design::new(columns, self.n_rows),
            y,
            x_mean,
            y_mean,
        }
    }


    /// `X w + intercept` for each row.
    pub(crate) fn predict(&self, w: &[f64], intercept: f64) -> Vec<f64> {
        let mut out = vec![intercept; self.n_rows];
        self.columns.iter()
            .zip(w)
            .filter(|&(_, &wj)| wj != 0.0)
            .for_each(|(column, wj)| {
                out.iter_mut()
                    .zip(column)
                    .for_each(|(o, x)| { *o += wj * x; });
            });
        out
    }
}


impl Centered {
    /// The intercept that matches the weights `w`
    /// fitted on the centered data.
    pub(crate) fn intercept(&self, w: &[f64]) -> f64 {
        self.y_mean - dot(&self.x_mean[..], w)
    }
}


#[inline]
pub(crate) fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}
