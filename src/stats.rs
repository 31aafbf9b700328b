//! Compensated summation and the descriptive statistics built on it.
//!
//! Every average in the crate (vector centring, group means in the variance
//! decomposition) goes through [`compensated_sum`] so that long sweeps and
//! large offsets do not accumulate rounding error.
//!
//! Reference: Neumaier (1974), "Rundungsfehleranalyse einiger Verfahren
//! zur Summation endlicher Summen", *ZAMM* 54(1), pp. 39–51.

/// Neumaier-compensated sum of an iterator of values.
///
/// Improved Kahan summation: the branch keeps the low-order bits of
/// whichever operand is smaller, so it also handles addends larger than
/// the running total.
///
/// # Complexity
/// Time: O(n), Space: O(1)
pub fn compensated_sum<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let mut sum = 0.0_f64;
    let mut c = 0.0_f64;
    for x in values {
        let t = sum + x;
        if sum.abs() >= x.abs() {
            c += (sum - t) + x;
        } else {
            c += (x - t) + sum;
        }
        sum = t;
    }
    sum + c
}

/// Compensated sum of a slice.
///
/// # Examples
/// ```
/// use statlens::stats::kahan_sum;
/// assert_eq!(kahan_sum(&[1e16, 1.0, -1e16]), 1.0);
/// ```
pub fn kahan_sum(data: &[f64]) -> f64 {
    compensated_sum(data.iter().copied())
}

/// Arithmetic mean using compensated summation.
///
/// # Returns
/// - `None` if `data` is empty or contains any NaN/Inf.
///
/// # Examples
/// ```
/// use statlens::stats::mean;
/// assert_eq!(mean(&[1.0, 2.0, 3.0, 4.0, 5.0]), Some(3.0));
/// assert_eq!(mean(&[]), None);
/// ```
pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() || !data.iter().all(|x| x.is_finite()) {
        return None;
    }
    Some(kahan_sum(data) / data.len() as f64)
}

/// Σ (xᵢ − center)², compensated.
pub fn sum_of_squared_deviations(data: &[f64], center: f64) -> f64 {
    compensated_sum(data.iter().map(|&x| {
        let d = x - center;
        d * d
    }))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        #[test]
        fn mean_within_bounds(data in proptest::collection::vec(-1e6_f64..1e6, 1..=100)) {
            let m = mean(&data).unwrap();
            let lo = data.iter().copied().fold(f64::INFINITY, f64::min);
            let hi = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            prop_assert!(m >= lo - 1e-9 && m <= hi + 1e-9, "mean {m} outside [{lo}, {hi}]");
        }

        #[test]
        fn deviations_about_mean_are_minimal(
            data in proptest::collection::vec(-1e3_f64..1e3, 2..=50),
            shift in -10.0_f64..10.0,
        ) {
            let m = mean(&data).unwrap();
            let at_mean = sum_of_squared_deviations(&data, m);
            let elsewhere = sum_of_squared_deviations(&data, m + shift);
            prop_assert!(at_mean <= elsewhere + 1e-6);
        }
    }
}
