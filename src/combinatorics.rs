//! Binomial coefficients and the binomial distribution.
//!
//! # Numerical note
//! `n! / (k!(n−k)!)` overflows `f64` once `n!` passes ~1.8 × 10³⁰⁸
//! (n = 171) even when the coefficient itself is small. [`combinations`]
//! instead multiplies the ratios `(n−i)/(i+1)` one at a time, so every
//! partial product stays at or below the magnitude of the result.

use crate::distributions::{DistributionError, Normal};

/// Binomial coefficient C(n, k) as an `f64`.
///
/// # Returns
/// - `0.0` if `k < 0` or `k > n` (not an error).
/// - `1.0` if `k == 0` or `k == n`.
///
/// Exact for every result below 2⁵³; for larger results the relative error
/// stays within a few ulps per factor. Results overflow to `+∞` only when
/// the coefficient itself exceeds `f64::MAX` (around n ≈ 1030 at k = n/2).
///
/// # Examples
/// ```
/// use statlens::combinatorics::combinations;
/// assert_eq!(combinations(5, 2), 10.0);
/// assert_eq!(combinations(5, 7), 0.0);
/// assert_eq!(combinations(5, -1), 0.0);
/// ```
pub fn combinations(n: u64, k: i64) -> f64 {
    let Ok(k) = u64::try_from(k) else {
        return 0.0;
    };
    if k > n {
        return 0.0;
    }
    if k == 0 || k == n {
        return 1.0;
    }
    let k = k.min(n - k);
    let n = n as f64;
    (0..k).fold(1.0, |c, i| {
        let i = i as f64;
        c * (n - i) / (i + 1.0)
    })
}

/// Binomial distribution B(n, p): number of successes in `n` independent
/// trials with success probability `p`.
///
/// The probability mass splits into the two factors the binomial pages
/// chart separately:
///
/// ```text
/// P(X = k) = C(n, k) · p^k (1 − p)^(n−k)
///            └coefficient┘ └─probability term─┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Binomial {
    n: u64,
    p: f64,
}

impl Binomial {
    /// Creates B(n, p).
    ///
    /// # Errors
    /// Returns `Err` if `p` is not in `[0, 1]`.
    pub fn new(n: u64, p: f64) -> Result<Self, DistributionError> {
        if !(0.0..=1.0).contains(&p) {
            return Err(DistributionError::InvalidParameters(format!(
                "Binomial requires 0 ≤ p ≤ 1, got p={p}"
            )));
        }
        Ok(Self { n, p })
    }

    /// For a probability already range-checked by the caller.
    pub(crate) fn new_unchecked(n: u64, p: f64) -> Self {
        Self { n, p }
    }

    pub fn n(&self) -> u64 {
        self.n
    }

    pub fn p(&self) -> f64 {
        self.p
    }

    /// C(n, k).
    pub fn coefficient(&self, k: i64) -> f64 {
        combinations(self.n, k)
    }

    /// p^k (1 − p)^(n−k) for `0 ≤ k ≤ n`, 0 otherwise.
    ///
    /// `0⁰` is taken as 1, so B(n, 0) puts all its mass on k = 0.
    pub fn probability_term(&self, k: i64) -> f64 {
        let Ok(successes) = u64::try_from(k) else {
            return 0.0;
        };
        if successes > self.n {
            return 0.0;
        }
        let failures = self.n - successes;
        power(self.p, successes) * power(1.0 - self.p, failures)
    }

    /// P(X = k).
    ///
    /// # Examples
    /// ```
    /// use statlens::combinatorics::Binomial;
    /// let b = Binomial::new(4, 0.5).unwrap();
    /// assert_eq!(b.pmf(2), 0.375);
    /// ```
    pub fn pmf(&self, k: i64) -> f64 {
        self.coefficient(k) * self.probability_term(k)
    }

    /// The full mass function over `k = 0..=n`.
    pub fn pmf_table(&self) -> Vec<f64> {
        (0..=self.n).map(|k| self.pmf(k as i64)).collect()
    }

    /// Mean = n·p.
    pub fn mean(&self) -> f64 {
        self.n as f64 * self.p
    }

    /// Variance = n·p·(1 − p).
    pub fn variance(&self) -> f64 {
        self.n as f64 * self.p * (1.0 - self.p)
    }

    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    /// Normal approximation N(n·p, √(n·p·(1 − p))).
    ///
    /// For p ∈ {0, 1} the standard deviation is 0 and the approximation is
    /// the degenerate point mass at the mean.
    pub fn normal_approximation(&self) -> Normal {
        Normal::new_unchecked(self.mean(), self.std_dev())
    }
}

/// `base^exp` with `0⁰ = 1` and exact integer exponents beyond `i32`.
fn power(base: f64, exp: u64) -> f64 {
    match i32::try_from(exp) {
        Ok(e) => base.powi(e),
        Err(_) => base.powf(exp as f64),
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        #[test]
        fn combinations_symmetric(n in 0_u64..300, k_frac in 0.0_f64..=1.0) {
            let k = (n as f64 * k_frac).round() as i64;
            let lhs = combinations(n, k);
            let rhs = combinations(n, n as i64 - k);
            prop_assert_eq!(lhs, rhs);
        }

        #[test]
        fn combinations_boundaries(n in 0_u64..1000) {
            prop_assert_eq!(combinations(n, 0), 1.0);
            prop_assert_eq!(combinations(n, n as i64), 1.0);
            prop_assert_eq!(combinations(n, n as i64 + 1), 0.0);
        }

        #[test]
        fn pascal_rule(n in 1_u64..60, k_frac in 0.0_f64..=1.0) {
            let k = (n as f64 * k_frac).round() as i64;
            let lhs = combinations(n, k);
            let rhs = combinations(n - 1, k - 1) + combinations(n - 1, k);
            prop_assert!(((lhs - rhs) / lhs).abs() < 1e-12, "C({n},{k}): {lhs} vs {rhs}");
        }

        #[test]
        fn pmf_non_negative(n in 0_u64..100, p in 0.0_f64..=1.0, k in -5_i64..110) {
            let b = Binomial::new(n, p).unwrap();
            prop_assert!(b.pmf(k) >= 0.0);
        }
    }
}
