//! Summary statistics over cohort outcome vectors
//!
//! Provides the mean / sample-SD / Student-t confidence-interval surface the
//! aggregation contract requires, plus an independent-samples difference
//! statistic (Welch) for comparative reporting. Quantiles use Acklam's
//! rational approximation of the inverse normal CDF and a Cornish–Fisher
//! expansion for the t distribution; both are accurate to well inside the
//! Monte Carlo noise of a simulated cohort.

use serde::Serialize;

/// Inverse standard-normal CDF (Acklam's rational approximation).
fn normal_quantile(p: f64) -> f64 {
    if p <= 0.0 {
        return f64::NEG_INFINITY;
    }
    if p >= 1.0 {
        return f64::INFINITY;
    }

    const A: [f64; 6] = [
        -3.969683028665376e+01,
        2.209460984245205e+02,
        -2.759285104469687e+02,
        1.383577518672690e+02,
        -3.066479806614716e+01,
        2.506628277459239e+00,
    ];
    const B: [f64; 5] = [
        -5.447609879822406e+01,
        1.615858368580409e+02,
        -1.556989798598866e+02,
        6.680131188771972e+01,
        -1.328068155288572e+01,
    ];
    const C: [f64; 6] = [
        -7.784894002430293e-03,
        -3.223964580411365e-01,
        -2.400758277161838e+00,
        -2.549732539343734e+00,
        4.374664141464968e+00,
        2.938163982698783e+00,
    ];
    const D: [f64; 4] = [
        7.784695709041462e-03,
        3.224671290700398e-01,
        2.445134137142996e+00,
        3.754408661907416e+00,
    ];

    let p_low = 0.02425;
    let p_high = 1.0 - p_low;

    if p < p_low {
        let q = (-2.0 * p.ln()).sqrt();
        (((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    } else if p <= p_high {
        let q = p - 0.5;
        let r = q * q;
        (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
            / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0)
    } else {
        let q = (-2.0 * (1.0 - p).ln()).sqrt();
        -(((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    }
}

/// Student-t quantile via the Cornish–Fisher expansion around the normal
/// quantile (Abramowitz & Stegun 26.7.5). Error is below 1e-3 for the
/// degrees of freedom that occur in practice here (ν ≥ 4).
fn t_quantile(p: f64, dof: f64) -> f64 {
    let z = normal_quantile(p);
    if !dof.is_finite() || dof <= 0.0 {
        return z;
    }

    let z3 = z * z * z;
    let z5 = z3 * z * z;
    let z7 = z5 * z * z;
    let z9 = z7 * z * z;

    let g1 = (z3 + z) / 4.0;
    let g2 = (5.0 * z5 + 16.0 * z3 + 3.0 * z) / 96.0;
    let g3 = (3.0 * z7 + 19.0 * z5 + 17.0 * z3 - 15.0 * z) / 384.0;
    let g4 = (79.0 * z9 + 776.0 * z7 + 1482.0 * z5 - 1920.0 * z3 - 945.0 * z) / 92160.0;

    z + g1 / dof + g2 / (dof * dof) + g3 / (dof * dof * dof) + g4 / (dof * dof * dof * dof)
}

/// Mean, sample standard deviation, and t-based confidence interval of one
/// outcome vector.
///
/// # Example
/// ```
/// use therapy_simulator_core_rs::SummaryStat;
///
/// let stat = SummaryStat::new("survival time", &[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
/// assert_eq!(stat.mean(), 3.0);
/// let (low, high) = stat.t_ci(0.05);
/// assert!(low < 3.0 && 3.0 < high);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStat {
    name: String,
    n: usize,
    mean: f64,
    /// Sample standard deviation (n − 1 denominator)
    st_dev: f64,
}

impl SummaryStat {
    /// Compute the statistic; `None` for an empty sample (callers surface
    /// that as an explicit error, never as NaN).
    pub fn new(name: impl Into<String>, values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let n = values.len();
        let mean = values.iter().sum::<f64>() / n as f64;
        let variance = if n > 1 {
            values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / (n - 1) as f64
        } else {
            0.0
        };

        Some(Self {
            name: name.into(),
            n,
            mean,
            st_dev: variance.sqrt(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn st_dev(&self) -> f64 {
        self.st_dev
    }

    /// Two-sided (1 − α) confidence interval for the mean.
    ///
    /// A single observation carries no spread information; the interval
    /// collapses to the point estimate rather than producing NaN.
    pub fn t_ci(&self, alpha: f64) -> (f64, f64) {
        if self.n < 2 {
            return (self.mean, self.mean);
        }
        let dof = (self.n - 1) as f64;
        let half_width =
            t_quantile(1.0 - alpha / 2.0, dof) * self.st_dev / (self.n as f64).sqrt();
        (self.mean - half_width, self.mean + half_width)
    }
}

/// Difference of means between two independent samples, with a Welch
/// confidence interval.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DifferenceStat {
    name: String,
    mean_diff: f64,
    std_err: f64,
    /// Welch–Satterthwaite degrees of freedom
    dof: f64,
}

impl DifferenceStat {
    /// `x` minus `y_ref`; `None` unless both samples have at least two
    /// observations.
    pub fn new(name: impl Into<String>, x: &SummaryStat, y_ref: &SummaryStat) -> Option<Self> {
        if x.n() < 2 || y_ref.n() < 2 {
            return None;
        }

        let vx = x.st_dev() * x.st_dev() / x.n() as f64;
        let vy = y_ref.st_dev() * y_ref.st_dev() / y_ref.n() as f64;
        let pooled = vx + vy;

        let dof = if pooled > 0.0 {
            pooled * pooled
                / (vx * vx / (x.n() as f64 - 1.0) + vy * vy / (y_ref.n() as f64 - 1.0))
        } else {
            f64::INFINITY
        };

        Some(Self {
            name: name.into(),
            mean_diff: x.mean() - y_ref.mean(),
            std_err: pooled.sqrt(),
            dof,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mean(&self) -> f64 {
        self.mean_diff
    }

    /// Two-sided (1 − α) confidence interval for the mean difference.
    pub fn t_ci(&self, alpha: f64) -> (f64, f64) {
        if self.std_err == 0.0 {
            return (self.mean_diff, self.mean_diff);
        }
        let half_width = t_quantile(1.0 - alpha / 2.0, self.dof) * self.std_err;
        (self.mean_diff - half_width, self.mean_diff + half_width)
    }
}
