//! Evaluation grids and sampled curves for the chart sink.

use serde::Serialize;

/// Head room above the tallest point when a page sizes its y axis.
pub const Y_AXIS_HEADROOM: f64 = 1.1;

/// `min, min + step, min + 2·step, …` up to and including `max`.
///
/// Points are computed as `min + i·step` rather than by repeated addition,
/// so a long grid does not drift and `max` itself is included when it lies
/// on the grid (within a 1e-9 step tolerance).
///
/// # Returns
/// An empty grid if `step ≤ 0`, `max < min` or any input is not finite.
///
/// # Examples
/// ```
/// use statlens::series::step_grid;
/// let grid = step_grid(-40.0, 40.0, 0.1);
/// assert_eq!(grid.len(), 801);
/// assert_eq!(grid[0], -40.0);
/// assert!((grid[800] - 40.0).abs() < 1e-12);
/// ```
pub fn step_grid(min: f64, max: f64, step: f64) -> Vec<f64> {
    if !(min.is_finite() && max.is_finite() && step.is_finite()) || step <= 0.0 || max < min {
        return Vec::new();
    }
    let intervals = ((max - min) / step + 1e-9).floor() as usize;
    (0..=intervals).map(|i| min + i as f64 * step).collect()
}

/// `n` evenly spaced points from `min` to `max` inclusive.
///
/// `n == 0` gives an empty grid and `n == 1` gives `[min]`.
pub fn linspace(min: f64, max: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![min],
        _ => {
            let step = (max - min) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { max } else { min + i as f64 * step })
                .collect()
        }
    }
}

/// Visible extent of one chart axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Axis {
    pub min: f64,
    pub max: f64,
}

impl Axis {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

/// Ordered (x, y) pairs; serializes as `[[x, y], …]`.
///
/// Non-finite y values (the σ = 0 normal peak, say) are kept as they are;
/// JSON output renders them as `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Series {
    pub points: Vec<(f64, f64)>,
}

impl Series {
    /// Evaluates `f` at every grid point.
    pub fn sample<F>(grid: &[f64], f: F) -> Self
    where
        F: Fn(f64) -> f64,
    {
        Self {
            points: grid.iter().map(|&x| (x, f(x))).collect(),
        }
    }

    /// A series holding one marker point.
    pub fn point(x: f64, y: f64) -> Self {
        Self { points: vec![(x, y)] }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Largest y, ignoring NaN. `None` for an empty or all-NaN series.
    pub fn max_y(&self) -> Option<f64> {
        self.points.iter().map(|&(_, y)| y).filter(|y| !y.is_nan()).reduce(f64::max)
    }

    /// Top of the y axis: the tallest of `series` times [`Y_AXIS_HEADROOM`].
    pub fn y_axis_max<'a, I>(series: I) -> Option<f64>
    where
        I: IntoIterator<Item = &'a Series>,
    {
        series
            .into_iter()
            .filter_map(Series::max_y)
            .reduce(f64::max)
            .map(|peak| peak * Y_AXIS_HEADROOM)
    }
}
