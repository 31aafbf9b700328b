//! Binomial pages: the pmf split into its two factors, and the normal
//! approximation drawn against the exact pmf.

use serde::{Deserialize, Serialize};

use super::{ExplorerError, PageParams, ParamRange};
use crate::combinatorics::Binomial;
use crate::format::Readout;
use crate::series::{step_grid, Axis, Series};

pub const TRIALS_RANGE: ParamRange = ParamRange::new(1.0, 100.0);
pub const APPROXIMATION_TRIALS_RANGE: ParamRange = ParamRange::new(1.0, 200.0);
pub const PROBABILITY_RANGE: ParamRange = ParamRange::new(0.0, 1.0);

/// Spacing of the normal-approximation curve.
pub const NORMAL_STEP: f64 = 0.1;
/// The approximation is drawn over μ ± this many σ.
pub const NORMAL_HALF_WIDTH_SIGMAS: f64 = 5.0;

// ============================================================================
// Components
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ComponentsParams {
    /// Number of trials.
    pub n: u64,
    /// Success probability.
    pub p: f64,
}

impl Default for ComponentsParams {
    fn default() -> Self {
        Self { n: 10, p: 0.5 }
    }
}

impl PageParams for ComponentsParams {
    fn validate(&self) -> Result<(), ExplorerError> {
        TRIALS_RANGE.check("n", self.n as f64)?;
        PROBABILITY_RANGE.check("p", self.p)
    }
}

/// C(n, k), p^k (1 − p)^(n−k) and their product for k = 0..=n.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentsView {
    pub coefficients: Series,
    pub probability_terms: Series,
    pub pmf: Series,
    pub readouts: Vec<Readout>,
}

pub fn compute_components(params: &ComponentsParams) -> ComponentsView {
    #[cfg(feature = "tracing")]
    let _span = tracing::debug_span!("binomial_components", n = params.n, p = params.p).entered();

    let binomial = Binomial::new_unchecked(params.n, params.p);
    let ks: Vec<i64> = (0..=params.n).map(|k| k as i64).collect();
    let over_k = |f: &dyn Fn(i64) -> f64| Series {
        points: ks.iter().map(|&k| (k as f64, f(k))).collect(),
    };

    ComponentsView {
        coefficients: over_k(&|k| binomial.coefficient(k)),
        probability_terms: over_k(&|k| binomial.probability_term(k)),
        pmf: over_k(&|k| binomial.pmf(k)),
        readouts: vec![
            Readout::new("p-value", params.p, 2),
            Readout::text("n-value", params.n.to_string()),
        ],
    }
}

// ============================================================================
// Normal approximation
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NormalApproximationParams {
    /// Number of trials N.
    pub n: u64,
    /// Success probability θ.
    pub theta: f64,
}

impl Default for NormalApproximationParams {
    fn default() -> Self {
        Self { n: 20, theta: 0.5 }
    }
}

impl PageParams for NormalApproximationParams {
    fn validate(&self) -> Result<(), ExplorerError> {
        APPROXIMATION_TRIALS_RANGE.check("n", self.n as f64)?;
        PROBABILITY_RANGE.check("theta", self.theta)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalApproximationView {
    /// N·θ.
    pub mu: f64,
    /// √(N·θ·(1 − θ)).
    pub sigma: f64,
    /// Exact pmf at k = 0..=N.
    pub binomial: Series,
    /// Normal density on μ ± 5σ.
    pub normal: Series,
    /// Shared x axis, widened outward to whole numbers.
    pub x_axis: Axis,
    pub readouts: Vec<Readout>,
}

pub fn compute_normal_approximation(params: &NormalApproximationParams) -> NormalApproximationView {
    #[cfg(feature = "tracing")]
    let _span =
        tracing::debug_span!("binomial_normal", n = params.n, theta = params.theta).entered();

    let binomial = Binomial::new_unchecked(params.n, params.theta);
    let normal = binomial.normal_approximation();
    let (mu, sigma) = (normal.mu(), normal.sigma());

    let x_min = mu - NORMAL_HALF_WIDTH_SIGMAS * sigma;
    let x_max = mu + NORMAL_HALF_WIDTH_SIGMAS * sigma;
    let pmf = binomial.pmf_table();

    NormalApproximationView {
        mu,
        sigma,
        binomial: Series {
            points: pmf.into_iter().enumerate().map(|(k, p)| (k as f64, p)).collect(),
        },
        normal: Series::sample(&step_grid(x_min, x_max, NORMAL_STEP), |x| normal.pdf(x)),
        x_axis: Axis::new(x_min.floor(), x_max.ceil()),
        readouts: vec![
            Readout::new("mu-value", mu, 2),
            Readout::new("sigma-value", sigma, 2),
        ],
    }
}
