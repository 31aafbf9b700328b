//! Display formatting for computed values.
//!
//! Sentinel results (NaN for an undefined ratio, ∞ for a point-mass density)
//! are legitimate outputs of the computation layer, so they are rendered as
//! text rather than treated as errors.

use serde::Serialize;

/// Formats `value` with `decimals` digits after the point.
///
/// NaN renders as `"NaN"` and infinities as `"∞"` / `"-∞"`.
///
/// # Examples
/// ```
/// use statlens::format::format_fixed;
/// assert_eq!(format_fixed(0.398942, 4), "0.3989");
/// assert_eq!(format_fixed(f64::NAN, 2), "NaN");
/// assert_eq!(format_fixed(f64::NEG_INFINITY, 2), "-∞");
/// ```
pub fn format_fixed(value: f64, decimals: usize) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "∞".to_string()
    } else if value == f64::NEG_INFINITY {
        "-∞".to_string()
    } else {
        format!("{value:.decimals$}")
    }
}

/// Formats a vector as `(x, y, …)` with each component via [`format_fixed`].
pub fn format_vector(values: &[f64], decimals: usize) -> String {
    let parts: Vec<String> = values.iter().map(|&v| format_fixed(v, decimals)).collect();
    format!("({})", parts.join(", "))
}

/// One labelled text readout shown next to a chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Readout {
    /// Stable identifier of the display slot, e.g. `"p-value-one-sided"`.
    pub id: &'static str,
    pub text: String,
}

impl Readout {
    pub fn new(id: &'static str, value: f64, decimals: usize) -> Self {
        Self {
            id,
            text: format_fixed(value, decimals),
        }
    }

    pub fn text(id: &'static str, text: impl Into<String>) -> Self {
        Self { id, text: text.into() }
    }
}
