//! Probability distributions.
//!
//! The four continuous families the explorer pages draw, each available as
//! plain functions of `(x, params…)` and as a validated parameter type.
//!
//! # Supported Distributions
//!
//! | Distribution | Parameters | Density | CDF |
//! |---|---|---|---|
//! | [`Normal`] | μ, σ ≥ 0 | [`normal_density`] | [`normal_cdf`] |
//! | [`StudentT`] | df > 0 | [`student_t_density`] | [`student_t_cdf`] |
//! | [`ChiSquared`] | df > 0 | [`chi_squared_density`] | [`chi_squared_cdf`] |
//! | [`FisherF`] | df₁, df₂ > 0 | [`f_density`] | [`f_cdf`] |
//!
//! # Domain policy
//! The free functions do not validate. Degrees of freedom must be positive
//! (non-integer values are fine); for df ≤ 0 or NaN inputs they return NaN.
//! The σ = 0 normal is a point mass, not an error. The typed constructors
//! reject parameters outside the domain.

use std::f64::consts::{LN_2, PI};

use serde::Serialize;

use crate::special;

/// Error type for invalid distribution parameters.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DistributionError {
    /// Parameters violate distribution constraints.
    #[error("invalid distribution parameters: {0}")]
    InvalidParameters(String),
}

/// A continuous distribution with a density and a CDF.
pub trait ContinuousDistribution {
    /// Probability density at `x`.
    fn pdf(&self, x: f64) -> f64;

    /// P(X ≤ x).
    fn cdf(&self, x: f64) -> f64;

    /// Survival function P(X > x) = 1 − CDF(x).
    ///
    /// Implementations override this when the upper tail can be computed
    /// without cancellation.
    fn sf(&self, x: f64) -> f64 {
        1.0 - self.cdf(x)
    }
}

// ============================================================================
// Normal
// ============================================================================

/// Normal density `(1/(σ√(2π))) exp(−(x−μ)²/(2σ²))`.
///
/// σ = 0 is the point mass at μ: `+∞` at `x == mu`, `0` everywhere else.
///
/// # Examples
/// ```
/// use statlens::distributions::normal_density;
/// assert!((normal_density(0.0, 0.0, 1.0) - 0.398942).abs() < 1e-6);
/// assert_eq!(normal_density(3.0, 3.0, 0.0), f64::INFINITY);
/// assert_eq!(normal_density(2.0, 3.0, 0.0), 0.0);
/// ```
pub fn normal_density(x: f64, mu: f64, sigma: f64) -> f64 {
    if sigma == 0.0 {
        return if x == mu { f64::INFINITY } else { 0.0 };
    }
    special::standard_normal_pdf((x - mu) / sigma) / sigma
}

/// Normal CDF Φ((x−μ)/σ). For σ = 0 this is the unit step at μ.
pub fn normal_cdf(x: f64, mu: f64, sigma: f64) -> f64 {
    if sigma == 0.0 {
        if x.is_nan() || mu.is_nan() {
            return f64::NAN;
        }
        return if x < mu { 0.0 } else { 1.0 };
    }
    special::standard_normal_cdf((x - mu) / sigma)
}

/// Normal (Gaussian) distribution N(μ, σ²), including the degenerate σ = 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normal {
    mu: f64,
    sigma: f64,
}

impl Normal {
    /// Creates N(μ, σ).
    ///
    /// # Errors
    /// Returns `Err` if `sigma < 0` or either parameter is not finite.
    pub fn new(mu: f64, sigma: f64) -> Result<Self, DistributionError> {
        if !mu.is_finite() || !sigma.is_finite() || sigma < 0.0 {
            return Err(DistributionError::InvalidParameters(format!(
                "Normal requires finite μ and σ ≥ 0, got μ={mu}, σ={sigma}"
            )));
        }
        Ok(Self { mu, sigma })
    }

    /// The standard normal N(0, 1).
    pub const fn standard() -> Self {
        Self { mu: 0.0, sigma: 1.0 }
    }

    /// For parameters already known to be in the domain.
    pub(crate) fn new_unchecked(mu: f64, sigma: f64) -> Self {
        Self { mu, sigma }
    }

    pub fn mu(&self) -> f64 {
        self.mu
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    pub fn variance(&self) -> f64 {
        self.sigma * self.sigma
    }

    pub fn pdf(&self, x: f64) -> f64 {
        normal_density(x, self.mu, self.sigma)
    }

    pub fn cdf(&self, x: f64) -> f64 {
        normal_cdf(x, self.mu, self.sigma)
    }

    /// Inverse CDF μ + σ·Φ⁻¹(p).
    ///
    /// Returns `None` if `p` is outside `(0, 1)`.
    pub fn quantile(&self, p: f64) -> Option<f64> {
        if !(p > 0.0 && p < 1.0) {
            return None;
        }
        Some(self.mu + self.sigma * special::inverse_normal_cdf(p))
    }
}

impl ContinuousDistribution for Normal {
    fn pdf(&self, x: f64) -> f64 {
        Normal::pdf(self, x)
    }

    fn cdf(&self, x: f64) -> f64 {
        Normal::cdf(self, x)
    }

    fn sf(&self, x: f64) -> f64 {
        if self.sigma == 0.0 {
            return 1.0 - self.cdf(x);
        }
        special::standard_normal_sf((x - self.mu) / self.sigma)
    }
}

// ============================================================================
// Student's t
// ============================================================================

/// Student-t density
///
/// ```text
/// f(t; df) = Γ((df+1)/2) / (√(df·π)·Γ(df/2)) · (1 + t²/df)^(−(df+1)/2)
/// ```
///
/// evaluated in log space so large df does not overflow Γ.
///
/// # Examples
/// ```
/// use statlens::distributions::student_t_density;
/// // df = 1 is the Cauchy distribution: 1/π at the origin
/// assert!((student_t_density(0.0, 1.0) - 1.0 / std::f64::consts::PI).abs() < 1e-12);
/// ```
pub fn student_t_density(t: f64, df: f64) -> f64 {
    if t.is_nan() || df.is_nan() || df <= 0.0 {
        return f64::NAN;
    }
    let half_df = df / 2.0;
    let ln_norm = special::ln_gamma(half_df + 0.5) - 0.5 * (df * PI).ln() - special::ln_gamma(half_df);
    (ln_norm - (half_df + 0.5) * (t * t / df).ln_1p()).exp()
}

/// Student-t CDF P(T ≤ t).
///
/// With `x = df/(df + t²)`, the tail beyond |t| is `I_x(df/2, ½)/2`.
pub fn student_t_cdf(t: f64, df: f64) -> f64 {
    if t.is_nan() || df.is_nan() || df <= 0.0 {
        return f64::NAN;
    }
    if t == 0.0 {
        return 0.5;
    }
    let tail = student_t_tail(t.abs(), df);
    if t > 0.0 {
        1.0 - tail
    } else {
        tail
    }
}

/// P(T > t) for t ≥ 0.
fn student_t_tail(t: f64, df: f64) -> f64 {
    if t == f64::INFINITY {
        return 0.0;
    }
    let x = df / (df + t * t);
    special::regularized_incomplete_beta(x, df / 2.0, 0.5) / 2.0
}

/// Student-t quantile: `t` with `P(T ≤ t) = p`.
///
/// Safeguarded Newton iteration: the root is bracketed first and any
/// Newton step that leaves the bracket is replaced by bisection, which keeps
/// heavy-tailed cases (df ≤ 2) convergent.
///
/// # Returns
/// `f64::NAN` if `p ∉ (0, 1)` or `df ≤ 0`.
pub fn student_t_quantile(p: f64, df: f64) -> f64 {
    if p.is_nan() || df.is_nan() || df <= 0.0 || p <= 0.0 || p >= 1.0 {
        return f64::NAN;
    }
    if p == 0.5 {
        return 0.0;
    }
    if p < 0.5 {
        return -student_t_quantile(1.0 - p, df);
    }

    let mut lo = 0.0_f64;
    let mut hi = 1.0_f64;
    while student_t_cdf(hi, df) < p {
        lo = hi;
        hi *= 2.0;
        if hi > 1e300 {
            return f64::INFINITY;
        }
    }

    let mut t = special::inverse_normal_cdf(p).clamp(lo, hi);
    for _ in 0..200 {
        let diff = student_t_cdf(t, df) - p;
        if diff < 0.0 {
            lo = t;
        } else {
            hi = t;
        }
        let mut next = t - diff / student_t_density(t, df);
        if !(next > lo && next < hi) {
            next = 0.5 * (lo + hi);
        }
        if (next - t).abs() <= 1e-14 * next.abs().max(1.0) {
            return next;
        }
        t = next;
    }
    t
}

/// Student's t-distribution with `df` degrees of freedom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StudentT {
    df: f64,
}

impl StudentT {
    /// # Errors
    /// Returns `Err` if `df ≤ 0` or not finite.
    pub fn new(df: f64) -> Result<Self, DistributionError> {
        validate_df("StudentT", "df", df)?;
        Ok(Self { df })
    }

    pub fn df(&self) -> f64 {
        self.df
    }

    pub fn pdf(&self, t: f64) -> f64 {
        student_t_density(t, self.df)
    }

    pub fn cdf(&self, t: f64) -> f64 {
        student_t_cdf(t, self.df)
    }

    /// Returns `None` if `p` is outside `(0, 1)`.
    pub fn quantile(&self, p: f64) -> Option<f64> {
        if !(p > 0.0 && p < 1.0) {
            return None;
        }
        Some(student_t_quantile(p, self.df))
    }
}

impl ContinuousDistribution for StudentT {
    fn pdf(&self, x: f64) -> f64 {
        StudentT::pdf(self, x)
    }

    fn cdf(&self, x: f64) -> f64 {
        StudentT::cdf(self, x)
    }

    fn sf(&self, x: f64) -> f64 {
        // symmetric about zero
        student_t_cdf(-x, self.df)
    }
}

// ============================================================================
// Chi-squared
// ============================================================================

/// Chi-squared density with `k` degrees of freedom:
/// `x^(k/2−1) e^(−x/2) / (2^(k/2) Γ(k/2))` for x > 0.
///
/// At x = 0 the density is `+∞` for k < 2, `½` for k = 2 and `0` for k > 2;
/// it is `0` for x < 0.
///
/// # Examples
/// ```
/// use statlens::distributions::chi_squared_density;
/// // k = 2 is the exponential with rate ½
/// assert!((chi_squared_density(2.0, 2.0) - 0.5 * (-1.0_f64).exp()).abs() < 1e-12);
/// ```
pub fn chi_squared_density(x: f64, k: f64) -> f64 {
    if x.is_nan() || k.is_nan() || k <= 0.0 {
        return f64::NAN;
    }
    if x < 0.0 || x == f64::INFINITY {
        return 0.0;
    }
    let half_k = k / 2.0;
    if x == 0.0 {
        return match half_k.partial_cmp(&1.0) {
            Some(std::cmp::Ordering::Less) => f64::INFINITY,
            Some(std::cmp::Ordering::Equal) => 0.5,
            _ => 0.0,
        };
    }
    ((half_k - 1.0) * x.ln() - x / 2.0 - half_k * LN_2 - special::ln_gamma(half_k)).exp()
}

/// Chi-squared CDF `P(k/2, x/2)` (regularized lower incomplete gamma).
///
/// # Examples
/// ```
/// use statlens::distributions::chi_squared_cdf;
/// assert_eq!(chi_squared_cdf(0.0, 5.0), 0.0);
/// assert!((chi_squared_cdf(3.841458820694124, 1.0) - 0.95).abs() < 1e-12);
/// ```
pub fn chi_squared_cdf(x: f64, k: f64) -> f64 {
    if x.is_nan() || k.is_nan() || k <= 0.0 {
        return f64::NAN;
    }
    if x <= 0.0 {
        return 0.0;
    }
    special::regularized_lower_gamma(k / 2.0, x / 2.0)
}

/// Chi-squared distribution with `df` degrees of freedom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChiSquared {
    df: f64,
}

impl ChiSquared {
    /// # Errors
    /// Returns `Err` if `df ≤ 0` or not finite.
    pub fn new(df: f64) -> Result<Self, DistributionError> {
        validate_df("ChiSquared", "df", df)?;
        Ok(Self { df })
    }

    pub fn df(&self) -> f64 {
        self.df
    }

    /// Mean = k.
    pub fn mean(&self) -> f64 {
        self.df
    }

    /// Variance = 2k.
    pub fn variance(&self) -> f64 {
        2.0 * self.df
    }

    pub fn pdf(&self, x: f64) -> f64 {
        chi_squared_density(x, self.df)
    }

    pub fn cdf(&self, x: f64) -> f64 {
        chi_squared_cdf(x, self.df)
    }
}

impl ContinuousDistribution for ChiSquared {
    fn pdf(&self, x: f64) -> f64 {
        ChiSquared::pdf(self, x)
    }

    fn cdf(&self, x: f64) -> f64 {
        ChiSquared::cdf(self, x)
    }

    fn sf(&self, x: f64) -> f64 {
        if x.is_nan() {
            return f64::NAN;
        }
        if x <= 0.0 {
            return 1.0;
        }
        special::regularized_upper_gamma(self.df / 2.0, x / 2.0)
    }
}

// ============================================================================
// F
// ============================================================================

/// F density with `(d1, d2)` degrees of freedom, 0 for x < 0.
///
/// At x = 0 the density is `+∞` if d1 < 2, `1` if d1 = 2 and `0` if d1 > 2.
///
/// ```text
/// f(x) = √((d1·x)^d1 · d2^d2 / (d1·x + d2)^(d1+d2)) / (x · B(d1/2, d2/2))
/// ```
///
/// # Examples
/// ```
/// use statlens::distributions::f_density;
/// // F(2, d2) at 0⁺ has density 1
/// assert!((f_density(1e-12, 2.0, 10.0) - 1.0).abs() < 1e-9);
/// assert_eq!(f_density(0.0, 2.0, 10.0), 1.0);
/// assert_eq!(f_density(0.0, 1.0, 10.0), f64::INFINITY);
/// assert_eq!(f_density(0.0, 5.0, 10.0), 0.0);
/// ```
pub fn f_density(x: f64, d1: f64, d2: f64) -> f64 {
    if x.is_nan() || d1.is_nan() || d2.is_nan() || d1 <= 0.0 || d2 <= 0.0 {
        return f64::NAN;
    }
    if x < 0.0 || x == f64::INFINITY {
        return 0.0;
    }
    if x == 0.0 {
        return match d1.partial_cmp(&2.0) {
            Some(std::cmp::Ordering::Less) => f64::INFINITY,
            Some(std::cmp::Ordering::Equal) => 1.0,
            _ => 0.0,
        };
    }
    let ln_num = d1 * (d1 * x).ln() + d2 * d2.ln() - (d1 + d2) * (d1 * x + d2).ln();
    (0.5 * ln_num - x.ln() - special::ln_beta(d1 / 2.0, d2 / 2.0)).exp()
}

/// F CDF `I_y(d1/2, d2/2)` with `y = d1·x/(d1·x + d2)`.
///
/// # Examples
/// ```
/// use statlens::distributions::f_cdf;
/// assert_eq!(f_cdf(0.0, 5.0, 10.0), 0.0);
/// // F(1, 1) is symmetric in ln x, so the median is 1
/// assert!((f_cdf(1.0, 1.0, 1.0) - 0.5).abs() < 1e-12);
/// ```
pub fn f_cdf(x: f64, d1: f64, d2: f64) -> f64 {
    if x.is_nan() || d1.is_nan() || d2.is_nan() || d1 <= 0.0 || d2 <= 0.0 {
        return f64::NAN;
    }
    if x <= 0.0 {
        return 0.0;
    }
    let y = d1 * x / (d1 * x + d2);
    special::regularized_incomplete_beta(y, d1 / 2.0, d2 / 2.0)
}

/// F quantile: `x` with `P(X ≤ x) = p`, by bisection on a doubling bracket.
///
/// # Returns
/// `f64::NAN` if `p ∉ (0, 1)` or either df ≤ 0.
///
/// # Examples
/// ```
/// use statlens::distributions::f_quantile;
/// // 5% critical value of F(5, 10)
/// assert!((f_quantile(0.95, 5.0, 10.0) - 3.325834530413011).abs() < 1e-9);
/// ```
pub fn f_quantile(p: f64, d1: f64, d2: f64) -> f64 {
    if p.is_nan() || d1.is_nan() || d2.is_nan() || d1 <= 0.0 || d2 <= 0.0 || p <= 0.0 || p >= 1.0
    {
        return f64::NAN;
    }

    let mut hi = 2.0_f64;
    while f_cdf(hi, d1, d2) < p {
        hi *= 2.0;
        if hi > 1e300 {
            return f64::INFINITY;
        }
    }
    let mut lo = 0.0_f64;

    for _ in 0..300 {
        let mid = 0.5 * (lo + hi);
        if hi - lo <= 1e-14 * mid.max(f64::MIN_POSITIVE) {
            break;
        }
        if f_cdf(mid, d1, d2) < p {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    0.5 * (lo + hi)
}

/// Fisher–Snedecor F-distribution with `(df1, df2)` degrees of freedom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FisherF {
    df1: f64,
    df2: f64,
}

impl FisherF {
    /// # Errors
    /// Returns `Err` if either df is `≤ 0` or not finite.
    pub fn new(df1: f64, df2: f64) -> Result<Self, DistributionError> {
        validate_df("FisherF", "df1", df1)?;
        validate_df("FisherF", "df2", df2)?;
        Ok(Self { df1, df2 })
    }

    pub fn df1(&self) -> f64 {
        self.df1
    }

    pub fn df2(&self) -> f64 {
        self.df2
    }

    pub fn pdf(&self, x: f64) -> f64 {
        f_density(x, self.df1, self.df2)
    }

    pub fn cdf(&self, x: f64) -> f64 {
        f_cdf(x, self.df1, self.df2)
    }

    /// Returns `None` if `p` is outside `(0, 1)`.
    pub fn quantile(&self, p: f64) -> Option<f64> {
        if !(p > 0.0 && p < 1.0) {
            return None;
        }
        Some(f_quantile(p, self.df1, self.df2))
    }
}

impl ContinuousDistribution for FisherF {
    fn pdf(&self, x: f64) -> f64 {
        FisherF::pdf(self, x)
    }

    fn cdf(&self, x: f64) -> f64 {
        FisherF::cdf(self, x)
    }

    fn sf(&self, x: f64) -> f64 {
        if x.is_nan() {
            return f64::NAN;
        }
        if x <= 0.0 {
            return 1.0;
        }
        // P(X > x) = I_{d2/(d2 + d1·x)}(d2/2, d1/2)
        let y = self.df2 / (self.df2 + self.df1 * x);
        special::regularized_incomplete_beta(y, self.df2 / 2.0, self.df1 / 2.0)
    }
}

fn validate_df(family: &str, name: &str, df: f64) -> Result<(), DistributionError> {
    if !df.is_finite() || df <= 0.0 {
        return Err(DistributionError::InvalidParameters(format!(
            "{family} requires finite {name} > 0, got {name}={df}"
        )));
    }
    Ok(())
}

// ============================================================================
// p-values
// ============================================================================

/// One- and two-tailed p-values of a test statistic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PValues {
    /// Upper-tail alternative (H₁: effect > 0).
    pub one_tailed: f64,
    /// Two-sided alternative.
    pub two_tailed: f64,
}

/// p-values of `statistic` under a null distribution symmetric about 0.
///
/// - one-tailed: `1 − CDF(|stat|)` for `stat ≥ 0`; a statistic on the wrong
///   side of zero carries no evidence for the upper-tail alternative and
///   gets `1`.
/// - two-tailed: `2·(1 − CDF(|stat|))`. Not clamped; for a symmetric null
///   `CDF(|stat|) ≥ ½`, so it stays within `[0, 1]`.
///
/// A NaN statistic yields NaN for both.
///
/// # Examples
/// ```
/// use statlens::distributions::{p_values, Normal};
/// let p = p_values(1.959963984540054, &Normal::standard());
/// assert!((p.two_tailed - 0.05).abs() < 1e-12);
/// assert_eq!(p_values(-1.0, &Normal::standard()).one_tailed, 1.0);
/// ```
pub fn p_values<D>(statistic: f64, null: &D) -> PValues
where
    D: ContinuousDistribution + ?Sized,
{
    if statistic.is_nan() {
        return PValues {
            one_tailed: f64::NAN,
            two_tailed: f64::NAN,
        };
    }
    let tail = null.sf(statistic.abs());
    PValues {
        one_tailed: if statistic < 0.0 { 1.0 } else { tail },
        two_tailed: 2.0 * tail,
    }
}

/// Upper-tail p-value `1 − CDF(statistic)`, for one-sided χ² and F tests.
pub fn upper_tail_p_value<D>(statistic: f64, null: &D) -> f64
where
    D: ContinuousDistribution + ?Sized,
{
    null.sf(statistic)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        #[test]
        fn normal_density_non_negative(x in -50.0_f64..50.0, mu in -10.0_f64..10.0, sigma in 0.0_f64..10.0) {
            prop_assert!(normal_density(x, mu, sigma) >= 0.0);
        }

        #[test]
        fn normal_density_idempotent(x in -50.0_f64..50.0, mu in -10.0_f64..10.0, sigma in 0.01_f64..10.0) {
            prop_assert_eq!(normal_density(x, mu, sigma), normal_density(x, mu, sigma));
        }

        #[test]
        fn t_cdf_in_01(t in -50.0_f64..50.0, df in 0.1_f64..200.0) {
            let c = student_t_cdf(t, df);
            prop_assert!((0.0..=1.0).contains(&c), "t_cdf({t}, {df}) = {c}");
        }

        #[test]
        fn t_quantile_roundtrip(p in 0.001_f64..0.999, df in 0.5_f64..100.0) {
            let t = student_t_quantile(p, df);
            let back = student_t_cdf(t, df);
            prop_assert!((back - p).abs() < 1e-9, "p={p} df={df} t={t} back={back}");
        }

        #[test]
        fn chi2_cdf_monotonic(x1 in 0.0_f64..100.0, x2 in 0.0_f64..100.0, k in 0.5_f64..50.0) {
            let (lo, hi) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
            prop_assert!(chi_squared_cdf(lo, k) <= chi_squared_cdf(hi, k) + 1e-14);
        }

        #[test]
        fn f_cdf_in_01(x in 0.0_f64..100.0, d1 in 0.5_f64..60.0, d2 in 0.5_f64..60.0) {
            let c = f_cdf(x, d1, d2);
            prop_assert!((0.0..=1.0).contains(&c));
        }

        #[test]
        fn two_tailed_is_twice_one_tailed_for_positive(z in 0.0_f64..10.0, df in 1.0_f64..60.0) {
            let t = StudentT::new(df).unwrap();
            let p = p_values(z, &t);
            prop_assert_eq!(p.two_tailed, 2.0 * p.one_tailed);
            prop_assert!(p.two_tailed <= 1.0 + 1e-15);
        }
    }
}
