use std::fmt;
use std::ops::Range;
use std::cmp::Ordering;


const EPS: f64 = 0.001;


/// A struct that stores the first/second order derivative information.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct GradientHessian {
    pub(crate) grad: f64,
    pub(crate) hess: f64,
}


impl GradientHessian {
    #[inline]
    pub(crate) fn new(grad: f64, hess: f64) -> Self {
        Self { grad, hess }
    }


    #[inline]
    fn is_zero(&self) -> bool {
        self.grad == 0.0 && self.hess == 0.0
    }
}


impl std::ops::AddAssign for GradientHessian {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.grad += other.grad;
        self.hess += other.hess;
    }
}


/// Binning: A feature processing.
#[derive(Debug, Clone, PartialEq)]
pub struct Bin(pub Range<f64>);

impl Bin {
    /// Create a new instance of `Bin`.
    #[inline(always)]
    pub fn new(range: Range<f64>) -> Self {
        Self(range)
    }


    /// Check whether the given `item` is conteined by `self.`
    #[inline(always)]
    pub fn contains(&self, item: &f64) -> bool {
        self.0.contains(item)
    }
}


/// A wrapper of `Vec<Bin>`.
/// The bins are sorted, adjacent, and
/// cover the whole real line.
#[derive(Debug, Clone, PartialEq)]
pub struct Bins(Vec<Bin>);

impl Bins {
    /// Returns the number of bins.
    pub fn len(&self) -> usize {
        self.0.len()
    }


    /// Returns whether the bins are empty or not.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }


    /// Cut the range of `values` into `n_bin` bins of the same width.
    /// The left-most bin starts at `f64::MIN` and
    /// the right-most bin ends at `f64::MAX`.
    pub fn cut(values: &[f64], n_bin: usize) -> Self {
        let n_bin = n_bin.max(1);
        let mut min = f64::MAX;
        let mut max = f64::MIN;
        values.iter()
            .copied()
            .for_each(|val| {
                min = min.min(val);
                max = max.max(val);
            });

        // An empty or constant feature gets a single bin.
        if values.is_empty() || min == max {
            min -= EPS;
            max += EPS;
        }

        let width = (max - min) / n_bin as f64;
        let mut bins = (0..n_bin)
            .map(|k| {
                let left = min + k as f64 * width;
                let right = min + (k + 1) as f64 * width;
                Bin::new(left..right)
            })
            .collect::<Vec<_>>();

        if let Some(first) = bins.first_mut() { first.0.start = f64::MIN; }
        if let Some(last) = bins.last_mut() { last.0.end = f64::MAX; }

        Self(bins)
    }


    /// Returns the position of the bin containing `value`.
    #[inline]
    fn position(&self, value: f64) -> usize {
        self.0.binary_search_by(|bin| {
                if bin.contains(&value) {
                    Ordering::Equal
                } else if bin.0.start > value {
                    Ordering::Greater
                } else {
                    Ordering::Less
                }
            })
            .unwrap_or_else(|p| p.min(self.0.len() - 1))
    }


    /// Accumulate the gradient statistics of `indices` per bin.
    /// The bins without statistics are merged away, and
    /// the boundary between two kept bins moves to the middle of the gap.
    pub(crate) fn pack(
        &self,
        indices: &[usize],
        values: &[f64],
        gh: &[GradientHessian],
    ) -> Vec<(Bin, GradientHessian)>
    {
        let mut packed = vec![GradientHessian::default(); self.len()];

        for &i in indices {
            let pos = self.position(values[i]);
            packed[pos] += gh[i];
        }
        self.remove_zero_weight_pack(packed)
    }


    /// This method removes bins with zero statistics.
    /// # Example
    /// ```text
    /// Bins       | [-Inf, 2.5), [2.5, 7.0), [7.0, 8.1), [8.1, +Inf)
    /// Grad       |     0.5,        0.0,        0.0,        0.2
    /// ```
    /// becomes
    /// ```text
    /// Bins       | [-Inf, 5.3), [5.3, +Inf)
    /// Grad       |     0.5,        0.2
    /// ```
    fn remove_zero_weight_pack(
        &self,
        pack: Vec<GradientHessian>,
    ) -> Vec<(Bin, GradientHessian)>
    {
        let mut kept = self.0.iter()
            .zip(pack)
            .filter(|(_, gh)| !gh.is_zero())
            .map(|(bin, gh)| (bin.clone(), gh))
            .collect::<Vec<_>>();

        let n_kept = kept.len();
        if n_kept == 0 { return kept; }

        kept[0].0 .0.start = f64::MIN;
        kept[n_kept - 1].0 .0.end = f64::MAX;
        for k in 1..n_kept {
            let mid = (kept[k - 1].0 .0.end + kept[k].0 .0.start) / 2.0;
            kept[k - 1].0 .0.end = mid;
            kept[k].0 .0.start = mid;
        }
        kept
    }
}


const PRINT_BIN_SIZE: usize = 3;

impl fmt::Display for Bins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bins = &self.0;
        let n_bins = bins.len();
        if n_bins > PRINT_BIN_SIZE {
            let head = bins[..2].iter()
                .map(|bin| format!("{bin}"))
                .collect::<Vec<_>>()
                .join(", ");
            let tail = &bins[n_bins - 1];
            write!(f, "{head},      ...     , {tail}")
        } else {
            let line = bins.iter()
                .map(|bin| format!("{}", bin))
                .collect::<Vec<_>>()
                .join(", ");
            write!(f, "{line}")
        }
    }
}


impl fmt::Display for Bin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let start = if self.0.start == f64::MIN {
            String::from("-Inf")
        } else {
            format!("{:+.2}", self.0.start)
        };
        let end = if self.0.end == f64::MAX {
            String::from("+Inf")
        } else {
            format!("{:+.2}", self.0.end)
        };

        write!(f, "[{start}, {end})")
    }
}
