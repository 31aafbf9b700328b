//! Test statistics for the z- and t-test pages.
//!
//! Every test follows the same three steps:
//!
//! 1. standard error of the estimate ([`standard_error_of_mean`] or
//!    [`standard_error_of_difference`]),
//! 2. [`test_statistic`] = (estimate − null value) / standard error,
//! 3. p-values from the null distribution via [`p_values`].
//!
//! The null distribution is the standard normal for the z-test, t(n − 1) for
//! the one-sample t-test and t(n₁ + n₂ − 2) for the independent-samples
//! t-test.
//!
//! Sample sizes are counts (`u64`). Degenerate sizes are not rejected: the
//! resulting NaN or ∞ flows through to the result like any other sentinel.

use serde::Serialize;

use crate::distributions::{p_values, Normal, PValues, StudentT};

/// Outcome of a hypothesis test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TestResult {
    /// z, t or χ² statistic.
    pub statistic: f64,
    /// Degrees of freedom of the null distribution; `None` for z-tests.
    pub df: Option<f64>,
    /// Upper-tail p-value (1 for a statistic below zero).
    pub p_one_tailed: f64,
    /// Two-sided p-value.
    pub p_two_tailed: f64,
}

impl TestResult {
    fn new(statistic: f64, df: Option<f64>, p: PValues) -> Self {
        Self {
            statistic,
            df,
            p_one_tailed: p.one_tailed,
            p_two_tailed: p.two_tailed,
        }
    }
}

/// √(((n₁−1)σ² + (n₂−1)σ²) / (n₁+n₂−2)).
///
/// Both groups share the one σ, so for n₁ + n₂ > 2 this equals σ; the
/// weighted form is kept so the formula reads the same as the textbook
/// pooled estimate. n₁ + n₂ ≤ 2 yields NaN (0/0) or a meaningless value.
pub fn pooled_standard_deviation(sigma: f64, n1: u64, n2: u64) -> f64 {
    let (n1, n2) = (n1 as f64, n2 as f64);
    let variance = sigma * sigma;
    (((n1 - 1.0) * variance + (n2 - 1.0) * variance) / (n1 + n2 - 2.0)).sqrt()
}

/// SEM = σ/√n.
pub fn standard_error_of_mean(sigma: f64, n: u64) -> f64 {
    sigma / (n as f64).sqrt()
}

/// SE of a mean difference: pooled SD · √(1/n₁ + 1/n₂).
pub fn standard_error_of_difference(pooled_sd: f64, n1: u64, n2: u64) -> f64 {
    pooled_sd * (1.0 / n1 as f64 + 1.0 / n2 as f64).sqrt()
}

/// (estimate − null value) / standard error.
pub fn test_statistic(estimate: f64, null_value: f64, standard_error: f64) -> f64 {
    (estimate - null_value) / standard_error
}

/// Cohen's d = |μ − μ₀| / σ.
pub fn cohens_d(mu: f64, mu0: f64, sigma: f64) -> f64 {
    (mu - mu0).abs() / sigma
}

/// One-sample z-test of H₀: μ = μ₀ with known σ.
///
/// # Examples
/// ```
/// use statlens::hypothesis::one_sample_z_test;
/// let r = one_sample_z_test(5.0, 0.0, 1.0, 1);
/// assert_eq!(r.statistic, 5.0);
/// assert!((r.p_one_tailed - 2.87e-7).abs() < 1e-9);
/// assert_eq!(r.df, None);
/// ```
pub fn one_sample_z_test(mu: f64, mu0: f64, sigma: f64, n: u64) -> TestResult {
    let z = test_statistic(mu, mu0, standard_error_of_mean(sigma, n));
    TestResult::new(z, None, p_values(z, &Normal::standard()))
}

/// One-sample t-test of H₀: μ = μ₀, df = n − 1.
///
/// n ≤ 1 leaves no degrees of freedom and yields NaN p-values.
pub fn one_sample_t_test(mu: f64, mu0: f64, sigma: f64, n: u64) -> TestResult {
    let t = test_statistic(mu, mu0, standard_error_of_mean(sigma, n));
    let df = n as f64 - 1.0;
    TestResult::new(t, Some(df), t_p_values(t, df))
}

/// Independent-samples t-test of H₀: μ₁ = μ₂ with a shared σ,
/// df = n₁ + n₂ − 2.
pub fn independent_samples_t_test(mu1: f64, mu2: f64, sigma: f64, n1: u64, n2: u64) -> TestResult {
    let pooled = pooled_standard_deviation(sigma, n1, n2);
    let se = standard_error_of_difference(pooled, n1, n2);
    let t = test_statistic(mu1 - mu2, 0.0, se);
    let df = n1 as f64 + n2 as f64 - 2.0;
    TestResult::new(t, Some(df), t_p_values(t, df))
}

fn t_p_values(statistic: f64, df: f64) -> PValues {
    match StudentT::new(df) {
        Ok(null) => p_values(statistic, &null),
        Err(_) => PValues {
            one_tailed: f64::NAN,
            two_tailed: f64::NAN,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pooled_sd_equals_shared_sigma() {
        assert!((pooled_standard_deviation(2.5, 10, 30) - 2.5).abs() < 1e-15);
        assert!((pooled_standard_deviation(1.0, 2, 1) - 1.0).abs() < 1e-15);
        assert!(pooled_standard_deviation(1.0, 1, 1).is_nan());
    }

    #[test]
    fn test_standard_errors() {
        assert_eq!(standard_error_of_mean(10.0, 25), 2.0);
        let se = standard_error_of_difference(3.0, 4, 4);
        assert!((se - 3.0 * 0.5_f64.sqrt()).abs() < 1e-15);
    }

    #[test]
    fn test_cohens_d_is_absolute() {
        assert_eq!(cohens_d(3.0, 5.0, 4.0), 0.5);
        assert_eq!(cohens_d(5.0, 3.0, 4.0), 0.5);
    }

    #[test]
    fn test_z_test_scenario() {
        let r = one_sample_z_test(5.0, 0.0, 1.0, 1);
        assert_eq!(r.statistic, 5.0);
        assert!((r.p_one_tailed - 2.866515718791939e-7).abs() < 1e-15);
        assert!((r.p_two_tailed - 5.733031437583878e-7).abs() < 1e-15);
    }

    #[test]
    fn test_z_test_negative_statistic() {
        let r = one_sample_z_test(-1.0, 0.0, 2.0, 16);
        assert_eq!(r.statistic, -2.0);
        assert_eq!(r.p_one_tailed, 1.0);
        assert!((r.p_two_tailed - 0.04550026389635842).abs() < 1e-12);
    }

    #[test]
    fn test_one_sample_t_test() {
        // t = (1 − 0) / (2/√9) = 1.5 with 8 df
        let r = one_sample_t_test(1.0, 0.0, 2.0, 9);
        assert!((r.statistic - 1.5).abs() < 1e-15);
        assert_eq!(r.df, Some(8.0));
        assert!((r.p_two_tailed - 0.1720032919519113).abs() < 1e-10);
        assert_eq!(r.p_two_tailed, 2.0 * r.p_one_tailed);
    }

    #[test]
    fn test_one_sample_t_test_single_observation() {
        let r = one_sample_t_test(1.0, 0.0, 2.0, 1);
        assert_eq!(r.df, Some(0.0));
        assert!(r.p_one_tailed.is_nan() && r.p_two_tailed.is_nan());
    }

    #[test]
    fn test_independent_samples_t_test() {
        // pooled SD 2, SE = 2·√(1/8 + 1/8) = 1, t = 1.5, df = 14
        let r = independent_samples_t_test(3.5, 2.0, 2.0, 8, 8);
        assert!((r.statistic - 1.5).abs() < 1e-14);
        assert_eq!(r.df, Some(14.0));
        assert!((r.p_two_tailed - 0.1558253180971768).abs() < 1e-10);
        assert!((r.p_one_tailed - r.p_two_tailed / 2.0).abs() < 1e-16);
    }

    #[test]
    fn test_independent_samples_negative_difference() {
        let r = independent_samples_t_test(2.0, 3.5, 2.0, 8, 8);
        assert_eq!(r.p_one_tailed, 1.0);
        assert!((r.p_two_tailed - 0.1558253180971768).abs() < 1e-10);
    }

    #[test]
    fn test_equal_means_have_p_one() {
        let r = independent_samples_t_test(1.0, 1.0, 3.0, 5, 7);
        assert_eq!(r.statistic, 0.0);
        assert!((r.p_two_tailed - 1.0).abs() < 1e-15);
    }
}
