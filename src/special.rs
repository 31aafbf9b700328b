//! Special mathematical functions.
//!
//! Gamma, beta and error functions plus the standard normal φ, Φ and Φ⁻¹.
//! Everything the distribution module needs reduces to one of two
//! primitives: the regularized incomplete gamma function (normal, χ²) or the
//! regularized incomplete beta function (Student-t, F).

use std::f64::consts::{PI, SQRT_2};

/// 1/√(2π) ≈ 0.3989422804014327
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// Minimum iteration budget of the series and continued-fraction evaluators.
const MAX_ITER: usize = 300;

/// Upper bound on the iteration budget, for shapes near `f64::MAX`.
const MAX_ITER_CEILING: f64 = 1e7;

/// Relative convergence threshold for the series and continued fractions.
const EPS: f64 = 1e-15;

/// Floor that keeps Lentz's algorithm away from division by zero.
const TINY: f64 = 1e-300;

// ============================================================================
// Standard normal
// ============================================================================

/// Standard normal PDF φ(x) = (1/√(2π)) exp(−x²/2).
///
/// # Examples
/// ```
/// use statlens::special::standard_normal_pdf;
/// assert!((standard_normal_pdf(0.0) - 0.3989422804014327).abs() < 1e-15);
/// ```
pub fn standard_normal_pdf(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    FRAC_1_SQRT_2PI * (-0.5 * x * x).exp()
}

/// Standard normal CDF Φ(x) = P(Z ≤ x) for Z ~ N(0, 1).
///
/// # Algorithm
/// `Φ(x) = ½·erfc(−x/√2)`, with the tail that would lose precision taken
/// from the complementary side. erfc is evaluated through the regularized
/// upper incomplete gamma function, so the upper tail keeps full relative
/// precision far beyond z = 5 (`1 − Φ(5) ≈ 2.87 × 10⁻⁷`).
///
/// # Examples
/// ```
/// use statlens::special::standard_normal_cdf;
/// assert!((standard_normal_cdf(0.0) - 0.5).abs() < 1e-15);
/// assert!((standard_normal_cdf(1.96) - 0.9750021048517795).abs() < 1e-12);
/// ```
pub fn standard_normal_cdf(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    if x >= 0.0 {
        1.0 - 0.5 * erfc(x / SQRT_2)
    } else {
        0.5 * erfc(-x / SQRT_2)
    }
}

/// Upper tail of the standard normal, `1 − Φ(x)`, without cancellation.
///
/// # Examples
/// ```
/// use statlens::special::standard_normal_sf;
/// let p = standard_normal_sf(5.0);
/// assert!((p - 2.866515718791939e-7).abs() < 1e-15);
/// ```
pub fn standard_normal_sf(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    0.5 * erfc(x / SQRT_2)
}

/// Inverse of the standard normal CDF (quantile function).
///
/// Given `p ∈ (0, 1)`, returns `z` with `Φ(z) = p`.
///
/// # Algorithm
/// Abramowitz & Stegun 26.2.23 rational approximation as a starting point
/// (|error| < 4.5 × 10⁻⁴), polished with Newton steps against
/// [`standard_normal_cdf`].
///
/// # Returns
/// - `f64::NAN` if `p` is NaN or outside `[0, 1]`.
/// - `f64::NEG_INFINITY` / `f64::INFINITY` for `p == 0` / `p == 1`.
///
/// # Examples
/// ```
/// use statlens::special::inverse_normal_cdf;
/// assert!(inverse_normal_cdf(0.5).abs() < 1e-12);
/// assert!((inverse_normal_cdf(0.975) - 1.959963984540054).abs() < 1e-9);
/// ```
pub fn inverse_normal_cdf(p: f64) -> f64 {
    if p.is_nan() || !(0.0..=1.0).contains(&p) {
        return f64::NAN;
    }
    if p == 0.0 {
        return f64::NEG_INFINITY;
    }
    if p == 1.0 {
        return f64::INFINITY;
    }

    let (q, sign) = if p > 0.5 { (1.0 - p, 1.0) } else { (p, -1.0) };
    let t = (-2.0 * q.ln()).sqrt();

    const C: [f64; 3] = [2.515517, 0.802853, 0.010328];
    const D: [f64; 3] = [1.432788, 0.189269, 0.001308];
    let num = C[0] + t * (C[1] + t * C[2]);
    let den = 1.0 + t * (D[0] + t * (D[1] + t * D[2]));
    let mut z = sign * (t - num / den);

    for _ in 0..4 {
        let density = standard_normal_pdf(z);
        if density < TINY {
            break;
        }
        let step = (standard_normal_cdf(z) - p) / density;
        z -= step;
        if step.abs() < 1e-13 * z.abs().max(1.0) {
            break;
        }
    }
    z
}

// ============================================================================
// Gamma and Beta
// ============================================================================

/// Natural log of the gamma function, ln Γ(x), for x > 0.
///
/// Lanczos approximation (g = 7, nine coefficients), with the reflection
/// formula below ½.
///
/// Reference: Lanczos (1964), "A Precision Approximation of the Gamma
/// Function", *SIAM Journal on Numerical Analysis* 1(1).
///
/// # Examples
/// ```
/// use statlens::special::ln_gamma;
/// assert!((ln_gamma(5.0) - 24.0_f64.ln()).abs() < 1e-10);
/// ```
pub fn ln_gamma(x: f64) -> f64 {
    #[allow(clippy::excessive_precision)]
    const LANCZOS: [f64; 9] = [
        0.99999999999980993,
        676.5203681218851,
        -1259.1392167224028,
        771.32342877765313,
        -176.61502916214059,
        12.507343278686905,
        -0.13857109526572012,
        9.9843695780195716e-6,
        1.5056327351493116e-7,
    ];
    const G: f64 = 7.0;

    if x < 0.5 {
        // Γ(x)·Γ(1−x) = π / sin(πx)
        return (PI / (PI * x).sin()).ln() - ln_gamma(1.0 - x);
    }

    let x = x - 1.0;
    let series = LANCZOS[1..]
        .iter()
        .enumerate()
        .fold(LANCZOS[0], |acc, (i, &c)| acc + c / (x + i as f64 + 1.0));
    let t = x + G + 0.5;
    0.5 * (2.0 * PI).ln() + (x + 0.5) * t.ln() - t + series.ln()
}

/// Gamma function Γ(x) for x > 0. Generalizes `(x − 1)!` to real x.
///
/// # Examples
/// ```
/// use statlens::special::gamma;
/// assert!((gamma(5.0) - 24.0).abs() < 1e-8);
/// assert!((gamma(0.5) - std::f64::consts::PI.sqrt()).abs() < 1e-10);
/// ```
pub fn gamma(x: f64) -> f64 {
    ln_gamma(x).exp()
}

/// ln B(a, b) = ln Γ(a) + ln Γ(b) − ln Γ(a + b).
pub fn ln_beta(a: f64, b: f64) -> f64 {
    ln_gamma(a) + ln_gamma(b) - ln_gamma(a + b)
}

/// Regularized incomplete beta function I_x(a, b) = B(x; a, b) / B(a, b).
///
/// Continued fraction evaluated with the modified Lentz method; the
/// symmetry `I_x(a, b) = 1 − I_{1−x}(b, a)` picks whichever side converges
/// quickly.
///
/// Reference: Press et al. (2007), *Numerical Recipes*, 3rd ed., §6.4.
///
/// # Examples
/// ```
/// use statlens::special::regularized_incomplete_beta;
/// assert_eq!(regularized_incomplete_beta(0.0, 2.0, 3.0), 0.0);
/// assert_eq!(regularized_incomplete_beta(1.0, 2.0, 3.0), 1.0);
/// assert!((regularized_incomplete_beta(0.5, 1.0, 1.0) - 0.5).abs() < 1e-12);
/// ```
pub fn regularized_incomplete_beta(x: f64, a: f64, b: f64) -> f64 {
    if x.is_nan() || a.is_nan() || b.is_nan() {
        return f64::NAN;
    }
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }
    if x > (a + 1.0) / (a + b + 2.0) {
        return 1.0 - regularized_incomplete_beta(1.0 - x, b, a);
    }

    let ln_front = a * x.ln() + b * (1.0 - x).ln() - ln_beta(a, b);
    ln_front.exp() / a * beta_continued_fraction(x, a, b)
}

fn beta_continued_fraction(x: f64, a: f64, b: f64) -> f64 {
    let clamp = |v: f64| if v.abs() < TINY { TINY } else { v };

    let mut c = 1.0;
    let mut d = 1.0 / clamp(1.0 - (a + b) * x / (a + 1.0));
    let mut h = d;

    for m in 1..=iteration_cap(a.max(b)) {
        let m = m as f64;
        let two_m = 2.0 * m;

        let even = m * (b - m) * x / ((a + two_m - 1.0) * (a + two_m));
        d = 1.0 / clamp(1.0 + even * d);
        c = clamp(1.0 + even / c);
        h *= d * c;

        let odd = -(a + m) * (a + b + m) * x / ((a + two_m) * (a + two_m + 1.0));
        d = 1.0 / clamp(1.0 + odd * d);
        c = clamp(1.0 + odd / c);
        let delta = d * c;
        h *= delta;

        if (delta - 1.0).abs() < EPS {
            break;
        }
    }
    h
}

/// Iteration budget for a shape parameter `shape`.
///
/// Near the mode both the gamma series and the continued fractions need on
/// the order of √shape terms, so a fixed cap truncates large-df tails.
fn iteration_cap(shape: f64) -> usize {
    (20.0 * shape.sqrt()).min(MAX_ITER_CEILING).max(MAX_ITER as f64) as usize
}

// ============================================================================
// Incomplete Gamma
// ============================================================================

/// Regularized lower incomplete gamma P(a, x) = γ(a, x) / Γ(a).
///
/// Power series for `x < a + 1`, continued fraction for the complement
/// otherwise.
///
/// # Examples
/// ```
/// use statlens::special::regularized_lower_gamma;
/// // P(1, x) = 1 − e^(−x)
/// let p = regularized_lower_gamma(1.0, 2.0);
/// assert!((p - (1.0 - (-2.0_f64).exp())).abs() < 1e-12);
/// ```
pub fn regularized_lower_gamma(a: f64, x: f64) -> f64 {
    if a.is_nan() || x.is_nan() {
        return f64::NAN;
    }
    if x <= 0.0 {
        return 0.0;
    }
    if x == f64::INFINITY {
        return 1.0;
    }
    if x < a + 1.0 {
        lower_gamma_series(a, x)
    } else {
        1.0 - upper_gamma_continued_fraction(a, x)
    }
}

/// Regularized upper incomplete gamma Q(a, x) = 1 − P(a, x).
///
/// Evaluated directly (not as `1 − P`) on the continued-fraction side, so
/// small upper tails keep their relative precision.
pub fn regularized_upper_gamma(a: f64, x: f64) -> f64 {
    if a.is_nan() || x.is_nan() {
        return f64::NAN;
    }
    if x <= 0.0 {
        return 1.0;
    }
    if x == f64::INFINITY {
        return 0.0;
    }
    if x < a + 1.0 {
        1.0 - lower_gamma_series(a, x)
    } else {
        upper_gamma_continued_fraction(a, x)
    }
}

/// `e^(−x) x^a / Γ(a)`, the prefactor shared by both evaluators.
fn gamma_prefactor(a: f64, x: f64) -> f64 {
    (a * x.ln() - x - ln_gamma(a)).exp()
}

fn lower_gamma_series(a: f64, x: f64) -> f64 {
    let mut denom = a;
    let mut term = 1.0 / a;
    let mut sum = term;
    for _ in 0..iteration_cap(a) {
        denom += 1.0;
        term *= x / denom;
        sum += term;
        if term.abs() < sum.abs() * EPS {
            break;
        }
    }
    sum * gamma_prefactor(a, x)
}

fn upper_gamma_continued_fraction(a: f64, x: f64) -> f64 {
    let mut b = x + 1.0 - a;
    let mut c = 1.0 / TINY;
    let mut d = 1.0 / b;
    let mut h = d;
    for i in 1..=iteration_cap(a) {
        let i = i as f64;
        let an = -i * (i - a);
        b += 2.0;
        d = an * d + b;
        if d.abs() < TINY {
            d = TINY;
        }
        c = b + an / c;
        if c.abs() < TINY {
            c = TINY;
        }
        d = 1.0 / d;
        let delta = d * c;
        h *= delta;
        if (delta - 1.0).abs() < EPS {
            break;
        }
    }
    h * gamma_prefactor(a, x)
}

// ============================================================================
// Error Function
// ============================================================================

/// Error function erf(x) = (2/√π) ∫₀ˣ e^(−t²) dt.
///
/// Uses the identity `erf(x) = sign(x)·P(½, x²)`.
///
/// # Examples
/// ```
/// use statlens::special::erf;
/// assert!(erf(0.0).abs() < 1e-15);
/// assert!((erf(1.0) - 0.8427007929497149).abs() < 1e-12);
/// ```
pub fn erf(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    let magnitude = regularized_lower_gamma(0.5, x * x);
    if x < 0.0 {
        -magnitude
    } else {
        magnitude
    }
}

/// Complementary error function erfc(x) = 1 − erf(x).
///
/// For x ≥ 0 this is `Q(½, x²)`, computed without subtracting from 1.
///
/// # Examples
/// ```
/// use statlens::special::erfc;
/// assert!((erfc(0.0) - 1.0).abs() < 1e-15);
/// assert!((erfc(3.0) - 2.209049699858544e-5).abs() < 1e-15);
/// ```
pub fn erfc(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    let upper = regularized_upper_gamma(0.5, x * x);
    if x >= 0.0 {
        upper
    } else {
        2.0 - upper
    }
}
