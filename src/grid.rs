//! Evenly spaced evaluation grids.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A fixed set of evenly spaced points on which densities are compared.
///
/// Points run from `low` to `high` with both endpoints included. A grid with
/// a single point contains only `low`.
///
/// # Examples
///
/// ```
/// use kde_divergence::EvaluationGrid;
///
/// let grid = EvaluationGrid::new(1.0, 50.0, 50).unwrap();
/// let points: Vec<f64> = grid.points().collect();
/// assert_eq!(points.len(), 50);
/// assert_eq!(points[0], 1.0);
/// assert_eq!(points[49], 50.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawGrid"))]
pub struct EvaluationGrid {
    low: f64,
    high: f64,
    n_points: usize,
}

impl EvaluationGrid {
    /// Default lower bound.
    pub const DEFAULT_LOW: f64 = 3.0;
    /// Default upper bound.
    pub const DEFAULT_HIGH: f64 = 45.0;
    /// Default number of points.
    pub const DEFAULT_POINTS: usize = 50;

    /// Creates a grid of `n_points` points spanning `[low, high]`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidGridBounds` if either bound is non-finite or
    /// `low >= high`.
    /// Returns `Error::EmptyGrid` if `n_points` is zero.
    pub fn new(low: f64, high: f64, n_points: usize) -> Result<Self> {
        if !low.is_finite() || !high.is_finite() || low >= high {
            return Err(Error::InvalidGridBounds { low, high });
        }
        if n_points == 0 {
            return Err(Error::EmptyGrid);
        }

        Ok(Self {
            low,
            high,
            n_points,
        })
    }

    /// Returns the lower bound.
    #[must_use]
    pub fn low(&self) -> f64 {
        self.low
    }

    /// Returns the upper bound.
    #[must_use]
    pub fn high(&self) -> f64 {
        self.high
    }

    /// Returns the number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.n_points
    }

    /// Always `false`; a grid holds at least one point.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Spacing between consecutive points, or `0.0` for a single-point grid.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn step(&self) -> f64 {
        if self.n_points < 2 {
            return 0.0;
        }
        (self.high - self.low) / (self.n_points - 1) as f64
    }

    /// Iterates over the grid points in ascending order.
    #[allow(clippy::cast_precision_loss)]
    pub fn points(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        let step = self.step();
        let last = self.n_points - 1;
        (0..self.n_points).map(move |i| {
            // Pin the last point so `high` is hit exactly.
            if i == last && last > 0 {
                self.high
            } else {
                self.low + i as f64 * step
            }
        })
    }
}

impl Default for EvaluationGrid {
    fn default() -> Self {
        Self {
            low: Self::DEFAULT_LOW,
            high: Self::DEFAULT_HIGH,
            n_points: Self::DEFAULT_POINTS,
        }
    }
}

/// Unvalidated wire form, checked through [`EvaluationGrid::new`] on load.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawGrid {
    low: f64,
    high: f64,
    n_points: usize,
}

#[cfg(feature = "serde")]
impl TryFrom<RawGrid> for EvaluationGrid {
    type Error = Error;

    fn try_from(raw: RawGrid) -> Result<Self> {
        Self::new(raw.low, raw.high, raw.n_points)
    }
}
