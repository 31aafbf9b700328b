//! One-sample and independent-samples t-test pages.

use serde::{Deserialize, Serialize};

use super::{test_grid, ExplorerError, PageParams, ParamRange};
use crate::distributions::{normal_density, student_t_density};
use crate::format::{format_fixed, Readout};
use crate::hypothesis::{
    cohens_d, independent_samples_t_test, one_sample_t_test, pooled_standard_deviation,
    standard_error_of_difference, standard_error_of_mean, TestResult,
};
use crate::series::{step_grid, Series};

pub const MEAN_RANGE: ParamRange = ParamRange::new(-10.0, 10.0);
pub const SIGMA_RANGE: ParamRange = ParamRange::new(0.1, 10.0);
/// At least two observations per sample, so every t has df ≥ 1.
pub const SAMPLE_SIZE_RANGE: ParamRange = ParamRange::new(2.0, 100.0);

/// The two-sample population curves use a coarser grid than the null curve.
pub const POPULATION_GRID_MIN: f64 = -20.0;
pub const POPULATION_GRID_MAX: f64 = 19.5;
pub const POPULATION_GRID_STEP: f64 = 0.5;

fn statistic_readout(t: f64) -> Readout {
    Readout::text("t-value", format!("t-value: {}", format_fixed(t, 4)))
}

// ============================================================================
// One sample
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OneSampleParams {
    pub mu: f64,
    pub mu0: f64,
    pub sigma: f64,
    pub n: u64,
}

impl Default for OneSampleParams {
    fn default() -> Self {
        Self {
            mu: 0.5,
            mu0: 0.0,
            sigma: 1.0,
            n: 10,
        }
    }
}

impl PageParams for OneSampleParams {
    fn validate(&self) -> Result<(), ExplorerError> {
        MEAN_RANGE.check("mu", self.mu)?;
        MEAN_RANGE.check("mu0", self.mu0)?;
        SIGMA_RANGE.check("sigma", self.sigma)?;
        SAMPLE_SIZE_RANGE.check("n", self.n as f64)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OneSampleView {
    pub cohens_d: f64,
    pub standard_error: f64,
    pub test: TestResult,
    pub population: Series,
    pub population_y_max: Option<f64>,
    pub sampling: Series,
    pub sampling_y_max: Option<f64>,
    /// t(n − 1) density.
    pub null_distribution: Series,
    pub statistic_marker: Series,
    pub readouts: Vec<Readout>,
}

pub fn compute_one_sample(params: &OneSampleParams) -> OneSampleView {
    #[cfg(feature = "tracing")]
    let _span = tracing::debug_span!(
        "one_sample_t_explorer",
        mu = params.mu,
        mu0 = params.mu0,
        sigma = params.sigma,
        n = params.n
    )
    .entered();

    let grid = test_grid();
    let sem = standard_error_of_mean(params.sigma, params.n);
    let test = one_sample_t_test(params.mu, params.mu0, params.sigma, params.n);
    let df = test.df.unwrap_or(f64::NAN);
    let d = cohens_d(params.mu, params.mu0, params.sigma);

    let population = Series::sample(&grid, |x| normal_density(x, params.mu, params.sigma));
    let sampling = Series::sample(&grid, |x| normal_density(x, params.mu - params.mu0, sem));

    OneSampleView {
        cohens_d: d,
        standard_error: sem,
        population_y_max: Series::y_axis_max([&population]),
        sampling_y_max: Series::y_axis_max([&sampling]),
        population,
        sampling,
        null_distribution: Series::sample(&grid, |t| student_t_density(t, df)),
        statistic_marker: Series::point(test.statistic, student_t_density(test.statistic, df)),
        readouts: vec![
            Readout::new("cohen-d-value", d, 2),
            Readout::new("mu-value", params.mu, 2),
            Readout::new("mu0-value", params.mu0, 2),
            Readout::new("sigma-value", params.sigma, 2),
            Readout::text("N-value", params.n.to_string()),
            statistic_readout(test.statistic),
            Readout::new("p-value-one-sided", test.p_one_tailed, 4),
            Readout::new("p-value-two-sided", test.p_two_tailed, 4),
        ],
        test,
    }
}

// ============================================================================
// Independent samples
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndependentParams {
    pub mu1: f64,
    pub mu2: f64,
    /// Shared population standard deviation.
    pub sigma: f64,
    pub n1: u64,
    pub n2: u64,
}

impl Default for IndependentParams {
    fn default() -> Self {
        Self {
            mu1: 1.0,
            mu2: 0.0,
            sigma: 1.0,
            n1: 10,
            n2: 10,
        }
    }
}

impl PageParams for IndependentParams {
    fn validate(&self) -> Result<(), ExplorerError> {
        MEAN_RANGE.check("mu1", self.mu1)?;
        MEAN_RANGE.check("mu2", self.mu2)?;
        SIGMA_RANGE.check("sigma", self.sigma)?;
        SAMPLE_SIZE_RANGE.check("n1", self.n1 as f64)?;
        SAMPLE_SIZE_RANGE.check("n2", self.n2 as f64)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndependentView {
    pub pooled_sd: f64,
    pub standard_error: f64,
    /// |μ₁ − μ₂| / pooled SD.
    pub cohens_d: f64,
    pub test: TestResult,
    /// N(μ₁, σ) and N(μ₂, σ).
    pub populations: [Series; 2],
    /// N(μ₁ − μ₂, SE).
    pub sampling: Series,
    /// t(n₁ + n₂ − 2) density.
    pub null_distribution: Series,
    pub statistic_marker: Series,
    /// Shared by the null curve and the marker.
    pub t_y_max: Option<f64>,
    pub readouts: Vec<Readout>,
}

pub fn compute_independent(params: &IndependentParams) -> IndependentView {
    #[cfg(feature = "tracing")]
    let _span = tracing::debug_span!(
        "independent_t_explorer",
        mu1 = params.mu1,
        mu2 = params.mu2,
        sigma = params.sigma,
        n1 = params.n1,
        n2 = params.n2
    )
    .entered();

    let pooled = pooled_standard_deviation(params.sigma, params.n1, params.n2);
    let se = standard_error_of_difference(pooled, params.n1, params.n2);
    let test = independent_samples_t_test(params.mu1, params.mu2, params.sigma, params.n1, params.n2);
    let df = test.df.unwrap_or(f64::NAN);
    let d = cohens_d(params.mu1, params.mu2, pooled);
    let difference = params.mu1 - params.mu2;

    let population_grid = step_grid(POPULATION_GRID_MIN, POPULATION_GRID_MAX, POPULATION_GRID_STEP);
    let null_distribution = Series::sample(&test_grid(), |t| student_t_density(t, df));
    let statistic_marker = Series::point(test.statistic, student_t_density(test.statistic, df));

    IndependentView {
        pooled_sd: pooled,
        standard_error: se,
        cohens_d: d,
        populations: [
            Series::sample(&population_grid, |x| normal_density(x, params.mu1, params.sigma)),
            Series::sample(&population_grid, |x| normal_density(x, params.mu2, params.sigma)),
        ],
        sampling: Series::sample(&population_grid, |x| normal_density(x, difference, se)),
        t_y_max: Series::y_axis_max([&null_distribution, &statistic_marker]),
        null_distribution,
        statistic_marker,
        readouts: vec![
            Readout::new("mu1-value", params.mu1, 2),
            Readout::new("mu2-value", params.mu2, 2),
            Readout::new("sigma-value", params.sigma, 2),
            Readout::text("N1-value", params.n1.to_string()),
            Readout::text("N2-value", params.n2.to_string()),
            Readout::new("cohen-d-value", d, 2),
            Readout::text("df-value", format_fixed(df, 0)),
            Readout::new("one-tailed-p-value", test.p_one_tailed, 4),
            Readout::new("two-tailed-p-value", test.p_two_tailed, 4),
            statistic_readout(test.statistic),
        ],
        test,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_sample_known_values() {
        let view = compute_one_sample(&OneSampleParams {
            mu: 1.0,
            mu0: 0.0,
            sigma: 2.0,
            n: 9,
        });
        assert_eq!(view.test.df, Some(8.0));
        assert!((view.test.statistic - 1.5).abs() < 1e-15);
        assert!((view.test.p_two_tailed - 0.1720032919519113).abs() < 1e-10);
        assert_eq!(view.cohens_d, 0.5);
        let t = view.readouts.iter().find(|r| r.id == "t-value").unwrap();
        assert_eq!(t.text, "t-value: 1.5000");
    }

    #[test]
    fn test_one_sample_null_is_t() {
        let view = compute_one_sample(&OneSampleParams { n: 3, ..OneSampleParams::default() });
        // t(2) at 0: Γ(1.5) / (√(2π) Γ(1)) = 1/(2√2)
        let peak = view.null_distribution.max_y().unwrap();
        assert!((peak - 1.0 / (2.0 * 2.0_f64.sqrt())).abs() < 1e-9);
    }

    #[test]
    fn test_one_sample_rejects_single_observation() {
        let params = OneSampleParams { n: 1, ..OneSampleParams::default() };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_independent_defaults() {
        let view = compute_independent(&IndependentParams::default());
        assert!((view.pooled_sd - 1.0).abs() < 1e-15);
        assert!((view.standard_error - 0.2_f64.sqrt()).abs() < 1e-15);
        assert_eq!(view.test.df, Some(18.0));
        assert_eq!(view.populations[0].len(), 80);
        assert_eq!(view.populations[0].points[79].0, 19.5);
        assert_eq!(view.null_distribution.len(), 801);
        let df = view.readouts.iter().find(|r| r.id == "df-value").unwrap();
        assert_eq!(df.text, "18");
    }

    #[test]
    fn test_independent_negative_difference() {
        let view = compute_independent(&IndependentParams {
            mu1: -1.0,
            mu2: 1.0,
            ..IndependentParams::default()
        });
        assert!(view.test.statistic < 0.0);
        assert_eq!(view.test.p_one_tailed, 1.0);
        assert_eq!(view.cohens_d, 2.0);
    }

    #[test]
    fn test_t_axis_covers_marker() {
        let view = compute_independent(&IndependentParams::default());
        let top = view.t_y_max.unwrap();
        let (_, marker_y) = view.statistic_marker.points[0];
        assert!(top >= 1.1 * marker_y);
        assert!(top >= 1.1 * view.null_distribution.max_y().unwrap());
    }
}
