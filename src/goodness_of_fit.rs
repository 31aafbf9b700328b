//! Chi-squared goodness of fit against a uniform expectation.
//!
//! The chi-squared page does not ingest data. It synthesises an observed
//! table whose departure from uniformity is controlled by a single `skew`
//! knob, then measures that departure.

use serde::Serialize;

use crate::distributions::{upper_tail_p_value, ChiSquared};
use crate::hypothesis::TestResult;
use crate::stats;

/// Expected and observed counts per category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequencyTable {
    pub expected: Vec<f64>,
    pub observed: Vec<f64>,
}

impl FrequencyTable {
    /// Number of categories.
    pub fn len(&self) -> usize {
        self.expected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expected.is_empty()
    }

    /// Σ observed.
    pub fn total_observed(&self) -> f64 {
        stats::kahan_sum(&self.observed)
    }

    /// Σ (oᵢ − eᵢ)² / eᵢ for this table.
    pub fn chi_squared(&self) -> f64 {
        chi_squared_statistic(&self.expected, &self.observed)
    }
}

/// Builds a uniform expectation and a linearly skewed observation.
///
/// - `expected[i] = total / k`
/// - `observed[i] = expected[i] + skew·(i − (k − 1)/2)`, clamped at 0 and
///   then rescaled so that `Σ observed == total`.
///
/// The shift is antisymmetric about the centre category, so without
/// clamping it leaves the sum unchanged; the rescale only matters once a
/// strong skew pushes the low end below zero. If every category clamps to
/// zero the observed column is all zeros.
///
/// # Examples
/// ```
/// use statlens::goodness_of_fit::generate_frequencies;
/// let table = generate_frequencies(4, 100.0, 0.0);
/// assert_eq!(table.expected, vec![25.0; 4]);
/// assert_eq!(table.observed, table.expected);
/// ```
pub fn generate_frequencies(num_categories: usize, total: f64, skew: f64) -> FrequencyTable {
    if num_categories == 0 {
        return FrequencyTable {
            expected: Vec::new(),
            observed: Vec::new(),
        };
    }
    let k = num_categories as f64;
    let per_category = total / k;
    let center = (k - 1.0) / 2.0;

    let expected = vec![per_category; num_categories];
    let mut observed: Vec<f64> = (0..num_categories)
        .map(|i| (per_category + skew * (i as f64 - center)).max(0.0))
        .collect();

    let clamped_total = stats::kahan_sum(&observed);
    if clamped_total > 0.0 && clamped_total != total {
        let scale = total / clamped_total;
        observed.iter_mut().for_each(|o| *o *= scale);
    }

    FrequencyTable { expected, observed }
}

/// Pearson's χ² = Σ (oᵢ − eᵢ)² / eᵢ.
///
/// Every `expected[i]` must be positive; a zero expectation makes the term
/// ∞ (or NaN when the observation is also zero).
///
/// # Examples
/// ```
/// use statlens::goodness_of_fit::chi_squared_statistic;
/// let chi2 = chi_squared_statistic(&[25.0, 25.0], &[20.0, 30.0]);
/// assert_eq!(chi2, 2.0);
/// ```
pub fn chi_squared_statistic(expected: &[f64], observed: &[f64]) -> f64 {
    debug_assert_eq!(expected.len(), observed.len(), "frequency columns differ in length");
    stats::compensated_sum(expected.iter().zip(observed).map(|(&e, &o)| {
        let d = o - e;
        d * d / e
    }))
}

/// Cramér's-V-style effect size √(χ² / (total · (min(k, 2) − 1))).
///
/// For a single categorical variable `min(k, 2) − 1` is 1 whenever k ≥ 2,
/// so this is √(χ²/total). With one category the denominator is zero and
/// the result is NaN (0/0) or ∞.
pub fn effect_size(chi_squared: f64, total: f64, num_categories: usize) -> f64 {
    let shape = num_categories.min(2) as f64 - 1.0;
    (chi_squared / (total * shape)).sqrt()
}

/// χ² goodness-of-fit test of `table` with df = k − 1.
///
/// The test is one-sided (large χ² is evidence against H₀), so both p-value
/// fields carry the same upper-tail value. Fewer than two categories leave
/// no degrees of freedom and give NaN p-values.
pub fn chi_squared_test(table: &FrequencyTable) -> TestResult {
    let statistic = table.chi_squared();
    let df = table.len() as f64 - 1.0;
    let p = match ChiSquared::new(df) {
        Ok(null) => upper_tail_p_value(statistic, &null),
        Err(_) => f64::NAN,
    };
    TestResult {
        statistic,
        df: Some(df),
        p_one_tailed: p,
        p_two_tailed: p,
    }
}
