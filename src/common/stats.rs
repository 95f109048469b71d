//! Descriptive statistics used by the imputation, the skew correction,
//! and the scaling of the linear models.
use std::cmp::Ordering;


/// Returns the arithmetic mean of `values`.
/// Returns `0.0` for an empty slice.
#[inline]
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() { return 0.0; }
    values.iter().sum::<f64>() / values.len() as f64
}


/// Returns the population variance of `values`.
#[inline]
pub fn variance(values: &[f64]) -> f64 {
    if values.is_empty() { return 0.0; }
    let mu = mean(values);
    values.iter()
        .map(|v| (v - mu).powi(2))
        .sum::<f64>()
        / values.len() as f64
}


/// Returns the population standard deviation of `values`.
#[inline]
pub fn std_dev(values: &[f64]) -> f64 {
    variance(values).sqrt()
}


/// Returns a sorted copy of `values`.
pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut values = values.to_vec();
    values.sort_by(|a, b| a.total_cmp(b));
    values
}


/// Returns the `q`-quantile of `values`
/// with the linear interpolation between the closest ranks.
/// Returns `None` for an empty slice.
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() { return None; }
    let values = sorted(values);
    Some(quantile_sorted(&values[..], q))
}


/// Same as [`quantile`], but `values` must be sorted in ascending order
/// and non-empty.
pub(crate) fn quantile_sorted(values: &[f64], q: f64) -> f64 {
    let n = values.len();
    let pos = q.clamp(0.0, 1.0) * (n - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    values[lo] + (values[hi] - values[lo]) * frac
}


/// Returns the median of `values`.
#[inline]
pub fn median(values: &[f64]) -> Option<f64> {
    quantile(values, 0.5)
}


/// Returns the most frequent item.
/// Ties resolve to the smallest item.
pub fn mode<T, I>(values: I) -> Option<T>
    where T: Ord,
          I: IntoIterator<Item = T>,
{
    let mut values = values.into_iter().collect::<Vec<_>>();
    values.sort();
    most_frequent_run(values, |a, b| a == b)
}


/// [`mode`] for floating point numbers.
pub fn mode_f64(values: &[f64]) -> Option<f64> {
    let values = sorted(values);
    most_frequent_run(values, |a, b| a.total_cmp(b) == Ordering::Equal)
}


/// Scans the sorted vector and returns the first item
/// of the longest run of equal items.
fn most_frequent_run<T, F>(sorted: Vec<T>, eq: F) -> Option<T>
    where F: Fn(&T, &T) -> bool,
{
    let mut best: Option<(usize, usize)> = None;
    let mut start = 0;
    for i in 1..=sorted.len() {
        if i < sorted.len() && eq(&sorted[start], &sorted[i]) { continue; }
        let count = i - start;
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((start, count));
        }
        start = i;
    }
    let (pos, _) = best?;
    sorted.into_iter().nth(pos)
}


/// Returns the biased sample skewness `m3 / m2^{3/2}` of `values`,
/// where `m_k` is the `k`-th central moment.
/// A constant (or empty) column has skewness `0`.
pub fn skewness(values: &[f64]) -> f64 {
    let n = values.len();
    if n == 0 { return 0.0; }
    let mu = mean(values);

    let (m2, m3) = values.iter()
        .fold((0.0, 0.0), |(m2, m3), v| {
            let d = v - mu;
            (m2 + d * d, m3 + d * d * d)
        });
    let m2 = m2 / n as f64;
    let m3 = m3 / n as f64;

    // Round-off may leave a tiny positive `m2` on a constant column.
    if m2 <= (f64::EPSILON * mu).powi(2) {
        return 0.0;
    }
    m3 / m2.powf(1.5)
}
