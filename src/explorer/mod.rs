//! Page adapters: validated parameters in, chart-ready data out.
//!
//! Each explorer page is one submodule with the same three parts:
//!
//! - a `…Params` struct holding the page's slider state, deserializable from
//!   JSON with every field defaulting to the page's initial value,
//! - a `…View` struct with the series and readouts the page draws,
//! - a `compute` function from the first to the second.
//!
//! `compute` never fails. Range checking against the slider bounds happens
//! in [`PageParams::validate`], which [`render_json`] runs before computing.
//!
//! # Examples
//! ```
//! use statlens::explorer::{render_json, Page};
//!
//! let page: Page = "one-sample-z-test".parse().unwrap();
//! let json = render_json(page, r#"{"mu": 5.0, "mu0": 0.0, "sigma": 1.0, "n": 1}"#).unwrap();
//! assert!(json.contains("\"statistic\":5.0"));
//! ```

pub mod binomial;
pub mod chi_squared;
pub mod correlation;
pub mod f_distribution;
pub mod t_distribution;
pub mod t_test;

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::series::step_grid;

/// Curves on the hypothesis-test pages are sampled on
/// `TEST_GRID_MIN..=TEST_GRID_MAX` in steps of `TEST_GRID_STEP`.
pub const TEST_GRID_MIN: f64 = -40.0;
pub const TEST_GRID_MAX: f64 = 40.0;
pub const TEST_GRID_STEP: f64 = 0.1;

pub(crate) fn test_grid() -> Vec<f64> {
    step_grid(TEST_GRID_MIN, TEST_GRID_MAX, TEST_GRID_STEP)
}

/// Errors raised while turning page parameters into a view.
#[derive(Debug, thiserror::Error)]
pub enum ExplorerError {
    /// A parameter lies outside its slider range.
    #[error("parameter `{name}` = {value} {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: String,
    },

    #[error("unknown page `{0}`")]
    UnknownPage(String),

    #[error("malformed page parameters: {0}")]
    Json(#[from] serde_json::Error),
}

/// Inclusive bounds of one slider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamRange {
    pub min: f64,
    pub max: f64,
}

impl ParamRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Checks `value` against the range.
    ///
    /// # Errors
    /// [`ExplorerError::InvalidParameter`] if `value` is NaN or out of range.
    pub fn check(&self, name: &'static str, value: f64) -> Result<(), ExplorerError> {
        if self.contains(value) {
            return Ok(());
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(name, value, min = self.min, max = self.max, "parameter out of range");
        Err(ExplorerError::InvalidParameter {
            name,
            value,
            reason: format!("is outside [{}, {}]", self.min, self.max),
        })
    }
}

/// Slider state of one page.
pub trait PageParams: DeserializeOwned + Default {
    /// Checks every field against its slider range.
    fn validate(&self) -> Result<(), ExplorerError>;
}

/// The explorer pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    BinomialComponents,
    BinomialNormal,
    ChiSquared,
    FDistribution,
    TDistribution,
    OneSampleZTest,
    OneSampleTTest,
    IndependentSamplesTTest,
    Correlation,
}

impl Page {
    pub const ALL: [Page; 9] = [
        Page::BinomialComponents,
        Page::BinomialNormal,
        Page::ChiSquared,
        Page::FDistribution,
        Page::TDistribution,
        Page::OneSampleZTest,
        Page::OneSampleTTest,
        Page::IndependentSamplesTTest,
        Page::Correlation,
    ];

    /// URL-style identifier, e.g. `"chi-squared-explorer"`.
    pub fn slug(self) -> &'static str {
        match self {
            Page::BinomialComponents => "binomial-components-explorer",
            Page::BinomialNormal => "binomial-normal-explorer",
            Page::ChiSquared => "chi-squared-explorer",
            Page::FDistribution => "f-distribution-explorer",
            Page::TDistribution => "t-distribution-explorer",
            Page::OneSampleZTest => "one-sample-z-test",
            Page::OneSampleTTest => "one-sample-t-test",
            Page::IndependentSamplesTTest => "independent-samples-t-test",
            Page::Correlation => "correlation",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Page {
    type Err = ExplorerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Page::ALL
            .into_iter()
            .find(|page| page.slug() == s)
            .ok_or_else(|| ExplorerError::UnknownPage(s.to_string()))
    }
}

/// Reads `page`'s parameters from JSON, validates them and returns the
/// computed view as JSON.
///
/// Missing fields take the page's defaults; an empty string means "all
/// defaults". Non-finite numbers in the view serialize as `null`.
///
/// # Errors
/// - [`ExplorerError::Json`] for malformed JSON or unknown fields.
/// - [`ExplorerError::InvalidParameter`] for out-of-range values.
pub fn render_json(page: Page, params_json: &str) -> Result<String, ExplorerError> {
    #[cfg(feature = "tracing")]
    let _span = tracing::info_span!("render_json", page = page.slug()).entered();

    match page {
        Page::BinomialComponents => render(params_json, binomial::compute_components),
        Page::BinomialNormal => render(params_json, binomial::compute_normal_approximation),
        Page::ChiSquared => render(params_json, chi_squared::compute),
        Page::FDistribution => render(params_json, f_distribution::compute),
        Page::TDistribution => render(params_json, t_distribution::compute),
        Page::OneSampleZTest => render(params_json, z_test::compute),
        Page::OneSampleTTest => render(params_json, t_test::compute_one_sample),
        Page::IndependentSamplesTTest => render(params_json, t_test::compute_independent),
        Page::Correlation => render(params_json, correlation::compute),
    }
}

fn render<P, V>(params_json: &str, compute: fn(&P) -> V) -> Result<String, ExplorerError>
where
    P: PageParams,
    V: Serialize,
{
    let params: P = if params_json.trim().is_empty() {
        P::default()
    } else {
        serde_json::from_str(params_json)?
    };
    params.validate()?;
    Ok(serde_json::to_string(&compute(&params))?)
}
