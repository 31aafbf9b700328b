//! Correlation geometry page: two 2-D vectors seen four ways.

use serde::{Deserialize, Serialize};

use super::{ExplorerError, PageParams, ParamRange};
use crate::format::{format_fixed, format_vector, Readout};
use crate::vector::{center_vector, cosine_similarity, dot_product, ols_coefficient, pearson_correlation};

pub const COMPONENT_RANGE: ParamRange = ParamRange::new(-10.0, 10.0);

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Params {
    pub a: [f64; 2],
    pub b: [f64; 2],
}

impl Default for Params {
    fn default() -> Self {
        Self {
            a: [1.0, 2.0],
            b: [2.0, 4.0],
        }
    }
}

impl PageParams for Params {
    fn validate(&self) -> Result<(), ExplorerError> {
        let names = [("a[0]", self.a[0]), ("a[1]", self.a[1]), ("b[0]", self.b[0]), ("b[1]", self.b[1])];
        names
            .into_iter()
            .try_for_each(|(name, value)| COMPONENT_RANGE.check(name, value))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct View {
    pub dot_product: f64,
    pub cosine_similarity: f64,
    pub pearson_correlation: f64,
    /// Slope of the zero-intercept least-squares line of b on a.
    pub ols_coefficient: f64,
    /// Each vector centred on its own mean, as drawn in the Pearson panel.
    pub centered_a: Vec<f64>,
    pub centered_b: Vec<f64>,
    pub readouts: Vec<Readout>,
}

pub fn compute(params: &Params) -> View {
    #[cfg(feature = "tracing")]
    let _span = tracing::debug_span!("correlation_explorer").entered();

    let (a, b) = (&params.a[..], &params.b[..]);
    let dot = dot_product(a, b);
    let cosine = cosine_similarity(a, b);
    let pearson = pearson_correlation(a, b);
    let ols = ols_coefficient(a, b);

    View {
        dot_product: dot,
        cosine_similarity: cosine,
        pearson_correlation: pearson,
        ols_coefficient: ols,
        centered_a: center_vector(a),
        centered_b: center_vector(b),
        readouts: vec![
            Readout::text("dotProductValue", format_fixed(dot, 2)),
            Readout::text("cosineSimilarityValue", format_fixed(cosine, 2)),
            Readout::text("pearsonCorrelationValue", format_fixed(pearson, 2)),
            Readout::text("olsCoefficientValue", format_fixed(ols, 2)),
            Readout::text("vectorAOutput", format_vector(a, 1)),
            Readout::text("vectorBOutput", format_vector(b, 1)),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn readout<'a>(view: &'a View, id: &str) -> &'a str {
        &view.readouts.iter().find(|r| r.id == id).unwrap().text
    }

    #[test]
    fn test_parallel_vectors() {
        let view = compute(&Params::default());
        assert_eq!(view.dot_product, 10.0);
        assert!((view.cosine_similarity - 1.0).abs() < 1e-15);
        assert!((view.pearson_correlation - 1.0).abs() < 1e-15);
        assert_eq!(view.ols_coefficient, 2.0);
        assert_eq!(view.centered_a, vec![-0.5, 0.5]);
        assert_eq!(readout(&view, "vectorBOutput"), "(2.0, 4.0)");
    }

    #[test]
    fn test_zero_vector_renders_nan() {
        let view = compute(&Params {
            a: [0.0, 0.0],
            b: [1.0, 1.0],
        });
        assert!(view.cosine_similarity.is_nan());
        assert!(view.ols_coefficient.is_nan());
        assert_eq!(readout(&view, "cosineSimilarityValue"), "NaN");
        assert_eq!(readout(&view, "pearsonCorrelationValue"), "NaN");
        assert_eq!(readout(&view, "olsCoefficientValue"), "NaN");
    }

    #[test]
    fn test_validate_names_component() {
        let err = Params {
            a: [1.0, 2.0],
            b: [0.0, 11.0],
        }
        .validate()
        .unwrap_err();
        assert!(matches!(err, ExplorerError::InvalidParameter { name: "b[1]", .. }));
    }

    #[test]
    fn test_nan_serializes_as_null() {
        let view = compute(&Params {
            a: [0.0, 0.0],
            b: [1.0, 1.0],
        });
        let json: serde_json::Value = serde_json::to_value(&view).unwrap();
        assert!(json["cosine_similarity"].is_null());
        assert_eq!(json["dot_product"], 0.0);
    }
}
