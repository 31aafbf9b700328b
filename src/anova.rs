//! Variance decomposition: regression and one-way ANOVA.
//!
//! Both analyses split total variation into an explained part and a
//! residual part and compare their mean squares with an F test:
//!
//! ```text
//! SS_total = SS_model + SS_residual
//! MS       = SS / df
//! F        = MS_model / MS_residual   ~ F(df_model, df_residual) under H₀
//! ```

use serde::Serialize;

use crate::distributions::{upper_tail_p_value, FisherF};
use crate::stats;

// ============================================================================
// Regression
// ============================================================================

/// Sums of squares of a fitted model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SumsOfSquares {
    /// Σ (yᵢ − ȳ)².
    pub total: f64,
    /// Σ (yᵢ − ŷᵢ)².
    pub residual: f64,
    /// SS_total − SS_residual.
    pub model: f64,
}

impl SumsOfSquares {
    /// Coefficient of determination R² = SS_model / SS_total.
    ///
    /// NaN when `y` is constant (SS_total = 0).
    pub fn r_squared(&self) -> f64 {
        if self.total == 0.0 {
            return f64::NAN;
        }
        self.model / self.total
    }
}

/// Mean squares and F test of a variance decomposition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FTest {
    pub df_model: f64,
    pub df_residual: f64,
    pub ms_model: f64,
    pub ms_residual: f64,
    /// MS_model / MS_residual.
    pub f: f64,
    /// Upper-tail p-value under F(df_model, df_residual); NaN when either
    /// df is not positive.
    pub p_value: f64,
}

impl FTest {
    fn from_sums(ss_model: f64, ss_residual: f64, df_model: f64, df_residual: f64) -> Self {
        let ms_model = ss_model / df_model;
        let ms_residual = ss_residual / df_residual;
        let f = ms_model / ms_residual;
        let p_value = match FisherF::new(df_model, df_residual) {
            Ok(null) => upper_tail_p_value(f, &null),
            Err(_) => f64::NAN,
        };
        Self {
            df_model,
            df_residual,
            ms_model,
            ms_residual,
            f,
            p_value,
        }
    }
}

/// Least-squares line `y = intercept + slope·x`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Line {
    pub intercept: f64,
    pub slope: f64,
}

impl Line {
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Ordinary least-squares line through `(x, y)`.
///
/// # Returns
/// `None` if the slices are empty, differ in length or `x` is constant.
///
/// # Examples
/// ```
/// use statlens::anova::fit_line;
/// let line = fit_line(&[0.0, 1.0, 2.0], &[1.0, 3.0, 5.0]).unwrap();
/// assert!((line.slope - 2.0).abs() < 1e-15);
/// assert!((line.intercept - 1.0).abs() < 1e-15);
/// ```
pub fn fit_line(x: &[f64], y: &[f64]) -> Option<Line> {
    if x.len() != y.len() {
        return None;
    }
    let x_mean = stats::mean(x)?;
    let y_mean = stats::mean(y)?;
    let sxx = stats::sum_of_squared_deviations(x, x_mean);
    if sxx == 0.0 {
        return None;
    }
    let sxy = stats::compensated_sum(x.iter().zip(y).map(|(xi, yi)| (xi - x_mean) * (yi - y_mean)));
    let slope = sxy / sxx;
    Some(Line {
        intercept: y_mean - slope * x_mean,
        slope,
    })
}

/// Splits the variation of `y` around its mean given fitted values ŷ.
///
/// # Returns
/// `None` if `y` is empty, non-finite or a different length from `fitted`.
pub fn regression_sums_of_squares(y: &[f64], fitted: &[f64]) -> Option<SumsOfSquares> {
    if y.len() != fitted.len() {
        return None;
    }
    let y_mean = stats::mean(y)?;
    let total = stats::sum_of_squared_deviations(y, y_mean);
    let residual = stats::compensated_sum(y.iter().zip(fitted).map(|(yi, fi)| {
        let r = yi - fi;
        r * r
    }));
    Some(SumsOfSquares {
        total,
        residual,
        model: total - residual,
    })
}

/// Overall F test of a regression with `n_parameters` coefficients
/// (intercept included) fitted to `n_observations` points.
///
/// `df_model = n_parameters − 1`, `df_residual = n_observations − n_parameters`.
pub fn regression_f_test(ss: &SumsOfSquares, n_observations: usize, n_parameters: usize) -> FTest {
    let df_model = n_parameters as f64 - 1.0;
    let df_residual = n_observations as f64 - n_parameters as f64;
    FTest::from_sums(ss.model, ss.residual, df_model, df_residual)
}

// ============================================================================
// One-way ANOVA
// ============================================================================

/// One-way analysis of variance across independent groups.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OneWayAnova {
    /// Σ nᵢ (ȳᵢ − ȳ)².
    pub ss_between: f64,
    /// Σᵢ Σⱼ (yᵢⱼ − ȳᵢ)².
    pub ss_within: f64,
    /// SS_between + SS_within.
    pub ss_total: f64,
    /// F test with df = (groups − 1, N − groups).
    pub test: FTest,
}

/// One-way ANOVA of `groups`.
///
/// # Returns
/// `None` if there are fewer than two groups, any group is empty or holds
/// a non-finite value, or there are no within-group degrees of freedom
/// (N ≤ number of groups).
///
/// # Examples
/// ```
/// use statlens::anova::one_way_anova;
/// let a = [1.0, 2.0, 3.0];
/// let b = [4.0, 5.0, 6.0];
/// let c = [7.0, 8.0, 9.0];
/// let result = one_way_anova(&[&a[..], &b[..], &c[..]]).unwrap();
/// assert!((result.test.f - 27.0).abs() < 1e-12);
/// ```
pub fn one_way_anova(groups: &[&[f64]]) -> Option<OneWayAnova> {
    let g = groups.len();
    if g < 2 {
        return None;
    }
    let group_means = groups
        .iter()
        .map(|group| stats::mean(group))
        .collect::<Option<Vec<f64>>>()?;

    let n_total: usize = groups.iter().map(|group| group.len()).sum();
    if n_total <= g {
        return None;
    }
    let grand_mean = stats::compensated_sum(groups.iter().flat_map(|group| group.iter().copied())) / n_total as f64;

    let ss_between = stats::compensated_sum(groups.iter().zip(&group_means).map(|(group, &m)| {
        let d = m - grand_mean;
        group.len() as f64 * d * d
    }));
    let ss_within = stats::compensated_sum(
        groups
            .iter()
            .zip(&group_means)
            .map(|(group, &m)| stats::sum_of_squared_deviations(group, m)),
    );

    let df_between = g as f64 - 1.0;
    let df_within = (n_total - g) as f64;
    Some(OneWayAnova {
        ss_between,
        ss_within,
        ss_total: ss_between + ss_within,
        test: FTest::from_sums(ss_between, ss_within, df_between, df_within),
    })
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn anova_total_matches_pooled_deviation(
            groups in proptest::collection::vec(proptest::collection::vec(-100.0_f64..100.0, 2..10), 2..5),
        ) {
            let refs: Vec<&[f64]> = groups.iter().map(Vec::as_slice).collect();
            let r = one_way_anova(&refs).unwrap();
            let all: Vec<f64> = groups.iter().flatten().copied().collect();
            let grand = stats::mean(&all).unwrap();
            let direct = stats::sum_of_squared_deviations(&all, grand);
            prop_assert!((r.ss_total - direct).abs() < 1e-8 * direct.max(1.0));
        }

        #[test]
        fn regression_model_ss_non_negative(
            points in proptest::collection::vec((-100.0_f64..100.0, -100.0_f64..100.0), 3..30),
        ) {
            let (x, y): (Vec<f64>, Vec<f64>) = points.into_iter().unzip();
            let Some(line) = fit_line(&x, &y) else {
                return Ok(());
            };
            let fitted: Vec<f64> = x.iter().map(|&xi| line.predict(xi)).collect();
            let ss = regression_sums_of_squares(&y, &fitted).unwrap();
            prop_assert!(ss.model >= -1e-8 * ss.total.max(1.0));
            prop_assert!(ss.residual <= ss.total * (1.0 + 1e-10) + 1e-10);
        }
    }
}
