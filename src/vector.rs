//! Vector geometry behind correlation and regression.
//!
//! The correlation page shows four views of the same pair of vectors: raw
//! dot product, angle (cosine similarity), angle after centring (Pearson
//! correlation) and projection (zero-intercept OLS slope). All four are
//! built from [`dot_product`] so the geometric relationships hold exactly.
//!
//! Binary operations expect equal-length slices; a mismatch is a caller
//! error caught by `debug_assert!` in debug builds.

use crate::stats;

/// Σ aᵢ·bᵢ (compensated).
///
/// # Examples
/// ```
/// use statlens::vector::dot_product;
/// assert_eq!(dot_product(&[1.0, 2.0], &[3.0, 4.0]), 11.0);
/// ```
pub fn dot_product(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len(), "dot product of unequal-length vectors");
    stats::compensated_sum(a.iter().zip(b).map(|(x, y)| x * y))
}

/// Euclidean norm ‖v‖ = √(Σ vᵢ²).
pub fn magnitude(v: &[f64]) -> f64 {
    dot_product(v, v).sqrt()
}

/// v / ‖v‖.
///
/// The zero vector has no direction; it maps to the zero vector of the same
/// length instead of a vector of NaNs.
pub fn normalize(v: &[f64]) -> Vec<f64> {
    let norm = magnitude(v);
    if norm == 0.0 {
        return vec![0.0; v.len()];
    }
    v.iter().map(|x| x / norm).collect()
}

/// v − mean(v), elementwise. The empty vector stays empty.
pub fn center_vector(v: &[f64]) -> Vec<f64> {
    if v.is_empty() {
        return Vec::new();
    }
    let mean = stats::kahan_sum(v) / v.len() as f64;
    v.iter().map(|x| x - mean).collect()
}

/// cos θ = a·b / (‖a‖·‖b‖).
///
/// # Returns
/// `f64::NAN` if either vector has zero magnitude: the angle to a zero
/// vector is undefined.
///
/// # Examples
/// ```
/// use statlens::vector::cosine_similarity;
/// assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 1.0]) - 0.5_f64.sqrt()).abs() < 1e-15);
/// assert!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]).is_nan());
/// ```
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let denom = magnitude(a) * magnitude(b);
    if denom == 0.0 {
        return f64::NAN;
    }
    dot_product(a, b) / denom
}

/// Pearson correlation: the cosine similarity of the two vectors after each
/// is centred on its own mean.
///
/// # Returns
/// `f64::NAN` when either vector is constant (its centred form is zero).
///
/// # Examples
/// ```
/// use statlens::vector::pearson_correlation;
/// assert!((pearson_correlation(&[1.0, 2.0], &[2.0, 4.0]) - 1.0).abs() < 1e-15);
/// ```
pub fn pearson_correlation(a: &[f64], b: &[f64]) -> f64 {
    cosine_similarity(&center_vector(a), &center_vector(b))
}

/// Least-squares slope of the zero-intercept regression of `b` on `a`:
/// `a·b / a·a`, the length of b's projection onto a in units of a.
///
/// # Returns
/// `f64::NAN` if `a` is the zero vector.
pub fn ols_coefficient(a: &[f64], b: &[f64]) -> f64 {
    let aa = dot_product(a, a);
    if aa == 0.0 {
        return f64::NAN;
    }
    dot_product(a, b) / aa
}
