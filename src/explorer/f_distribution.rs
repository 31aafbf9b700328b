//! F-distribution explorer: density shape and the 5% critical value.

use serde::{Deserialize, Serialize};

use super::{ExplorerError, PageParams, ParamRange};
use crate::distributions::{f_density, f_quantile};
use crate::format::Readout;
use crate::series::{linspace, Series};

pub const DF_RANGE: ParamRange = ParamRange::new(1.0, 100.0);

/// Significance level of the displayed critical value.
pub const ALPHA: f64 = 0.05;
pub const X_MAX: f64 = 5.0;
pub const POINTS: usize = 200;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Params {
    pub df1: u32,
    pub df2: u32,
}

impl Default for Params {
    fn default() -> Self {
        Self { df1: 5, df2: 10 }
    }
}

impl PageParams for Params {
    fn validate(&self) -> Result<(), ExplorerError> {
        DF_RANGE.check("df1", f64::from(self.df1))?;
        DF_RANGE.check("df2", f64::from(self.df2))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct View {
    /// F(df1, df2) density at 200 points over `[0, 5]`.
    pub density: Series,
    /// F⁻¹(1 − α).
    pub critical_value: f64,
    pub readouts: Vec<Readout>,
}

pub fn compute(params: &Params) -> View {
    #[cfg(feature = "tracing")]
    let _span = tracing::debug_span!("f_explorer", df1 = params.df1, df2 = params.df2).entered();

    let (df1, df2) = (f64::from(params.df1), f64::from(params.df2));
    let critical_value = f_quantile(1.0 - ALPHA, df1, df2);

    View {
        density: Series::sample(&linspace(0.0, X_MAX, POINTS), |x| f_density(x, df1, df2)),
        critical_value,
        readouts: vec![
            Readout::new("critical-value", critical_value, 3),
            Readout::text("df1-value", params.df1.to_string()),
            Readout::text("df2-value", params.df2.to_string()),
        ],
    }
}
