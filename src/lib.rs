//! # statlens
//!
//! Closed-form statistics behind a set of interactive explorer pages.
//!
//! The crate has two layers. The computation layer is a set of pure,
//! total functions: degenerate inputs produce sentinel values (NaN, ∞, 0)
//! instead of errors. On top of it, the explorer layer turns one page's
//! slider state into the series and readouts that page draws.
//!
//! ## Modules
//!
//! - [`special`] — Gamma, Beta, incomplete Gamma/Beta, erf and the standard normal
//! - [`stats`] — Compensated summation and means
//! - [`combinatorics`] — Binomial coefficients and the binomial distribution
//! - [`distributions`] — Normal, Student-t, χ² and F densities, CDFs, quantiles and p-values
//! - [`vector`] — Dot product, cosine similarity, Pearson correlation, OLS slope
//! - [`hypothesis`] — Standard errors, effect sizes and z/t tests
//! - [`goodness_of_fit`] — Synthetic frequency tables and the χ² test
//! - [`anova`] — Regression and one-way variance decomposition
//! - [`series`] — Evaluation grids and sampled curves
//! - [`format`] — Display formatting that renders NaN and ∞
//! - [`explorer`] — Per-page adapters and the JSON entry point
//!
//! ## Design Philosophy
//!
//! - **Sentinels, not panics**: zero denominators give NaN, a σ = 0 normal
//!   is a point mass, out-of-range binomial coefficients are 0
//! - **Numerical stability**: log-space densities, incremental binomial
//!   coefficients, Kahan-compensated sums
//! - **Property-based testing**: mathematical identities verified via proptest
//!
//! ## Features
//!
//! - `tracing` — spans around each explorer computation and debug events
//!   for rejected parameters

pub mod anova;
pub mod combinatorics;
pub mod distributions;
pub mod explorer;
pub mod format;
pub mod goodness_of_fit;
pub mod hypothesis;
pub mod series;
pub mod special;
pub mod stats;
pub mod vector;
