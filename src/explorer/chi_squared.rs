//! Chi-squared goodness-of-fit page.

use serde::{Deserialize, Serialize};

use super::{ExplorerError, PageParams, ParamRange};
use crate::distributions::chi_squared_density;
use crate::format::Readout;
use crate::goodness_of_fit::{chi_squared_test, effect_size, generate_frequencies, FrequencyTable};
use crate::series::{step_grid, Series};

pub const CATEGORIES_RANGE: ParamRange = ParamRange::new(2.0, 10.0);
pub const TOTAL_RANGE: ParamRange = ParamRange::new(10.0, 1000.0);
pub const SKEW_RANGE: ParamRange = ParamRange::new(-10.0, 10.0);

/// The null density is drawn over `[0, DENSITY_X_MAX]` regardless of df.
pub const DENSITY_X_MAX: f64 = 200.0;
pub const DENSITY_STEP: f64 = 0.1;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Params {
    pub categories: usize,
    pub total_observations: u64,
    pub skew: f64,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            categories: 4,
            total_observations: 100,
            skew: 0.0,
        }
    }
}

impl PageParams for Params {
    fn validate(&self) -> Result<(), ExplorerError> {
        CATEGORIES_RANGE.check("categories", self.categories as f64)?;
        TOTAL_RANGE.check("total_observations", self.total_observations as f64)?;
        SKEW_RANGE.check("skew", self.skew)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct View {
    /// `"Category 1"`, `"Category 2"`, …
    pub labels: Vec<String>,
    pub frequencies: FrequencyTable,
    pub chi_squared: f64,
    pub df: f64,
    /// Upper-tail p-value.
    pub p_value: f64,
    pub effect_size: f64,
    /// χ²(df) density over `[0, 200]`.
    pub null_density: Series,
    /// The statistic placed on the null density.
    pub statistic_marker: Series,
    pub readouts: Vec<Readout>,
}

pub fn compute(params: &Params) -> View {
    #[cfg(feature = "tracing")]
    let _span = tracing::debug_span!(
        "chi_squared_explorer",
        categories = params.categories,
        total = params.total_observations,
        skew = params.skew
    )
    .entered();

    let total = params.total_observations as f64;
    let frequencies = generate_frequencies(params.categories, total, params.skew);
    let test = chi_squared_test(&frequencies);
    let df = test.df.unwrap_or(f64::NAN);
    let effect = effect_size(test.statistic, total, params.categories);

    View {
        labels: (1..=params.categories).map(|i| format!("Category {i}")).collect(),
        null_density: Series::sample(&step_grid(0.0, DENSITY_X_MAX, DENSITY_STEP), |x| {
            chi_squared_density(x, df)
        }),
        statistic_marker: Series::point(test.statistic, chi_squared_density(test.statistic, df)),
        readouts: vec![
            Readout::new("effect-size-value", effect, 4),
            Readout::new("chi-squared-value", test.statistic, 4),
            Readout::new("p-value", test.p_one_tailed, 4),
            Readout::text("categories-value", params.categories.to_string()),
            Readout::text("total-observations-value", params.total_observations.to_string()),
        ],
        frequencies,
        chi_squared: test.statistic,
        df,
        p_value: test.p_one_tailed,
        effect_size: effect,
    }
}
