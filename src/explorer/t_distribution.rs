//! t-distribution explorer: Student's t against the standard normal.

use serde::{Deserialize, Serialize};

use super::{ExplorerError, PageParams, ParamRange};
use crate::distributions::{student_t_density, Normal};
use crate::format::Readout;
use crate::series::{linspace, Series};

pub const DF_RANGE: ParamRange = ParamRange::new(1.0, 30.0);

pub const X_EXTENT: f64 = 7.0;
pub const POINTS: usize = 280;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Params {
    pub df: u32,
}

impl Default for Params {
    fn default() -> Self {
        Self { df: 1 }
    }
}

impl PageParams for Params {
    fn validate(&self) -> Result<(), ExplorerError> {
        DF_RANGE.check("df", f64::from(self.df))
    }
}

/// Both densities on the same 280-point grid over `[−7, 7]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct View {
    pub standard_normal: Series,
    pub student_t: Series,
    pub readouts: Vec<Readout>,
}

pub fn compute(params: &Params) -> View {
    #[cfg(feature = "tracing")]
    let _span = tracing::debug_span!("t_explorer", df = params.df).entered();

    let grid = linspace(-X_EXTENT, X_EXTENT, POINTS);
    let df = f64::from(params.df);
    let normal = Normal::standard();

    View {
        standard_normal: Series::sample(&grid, |x| normal.pdf(x)),
        student_t: Series::sample(&grid, |x| student_t_density(x, df)),
        readouts: vec![Readout::text("df-value", params.df.to_string())],
    }
}
