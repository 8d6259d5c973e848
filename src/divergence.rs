//! Drift scoring between two samples.
//!
//! [`DivergenceEstimator`] fits a [`GaussianKde`] to each sample, evaluates
//! both on a shared [`EvaluationGrid`] and returns the Kullback-Leibler
//! divergence of the current density relative to the reference density.
//!
//! # Degenerate results
//!
//! When the two densities do not overlap on the grid (some grid point has
//! zero reference density but positive current density), or both densities
//! vanish on the grid, the divergence is infinite or NaN. [`compute`]
//! reports such results as `0.0`. This means a score of `0.0` can stand for
//! either "no drift" or "the comparison broke down". Use [`evaluate`] when
//! the two cases must be told apart.
//!
//! [`compute`]: DivergenceEstimator::compute
//! [`evaluate`]: DivergenceEstimator::evaluate

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::entropy::{log_scale, relative_entropy};
use crate::error::Result;
use crate::grid::EvaluationGrid;
use crate::kde::{BandwidthRule, GaussianKde};
use crate::types::SampleRole;

/// Scores how far a current sample has drifted from a reference sample.
///
/// The estimator holds only configuration and can be shared across threads.
///
/// # Examples
///
/// ```
/// use kde_divergence::prelude::*;
///
/// let previous = [12.0, 14.0, 15.0, 15.5, 17.0, 18.0, 21.0];
/// let current = [14.0, 16.0, 18.0, 19.5, 20.0, 22.0, 25.0];
///
/// let estimator = DivergenceEstimator::new();
/// let drift = estimator.compute(&current, &previous).unwrap();
/// assert!(drift > 0.0);
///
/// let wide = DivergenceEstimator::builder()
///     .grid_bounds(1.0, 50.0)
///     .bandwidth_rule(BandwidthRule::Silverman)
///     .build()
///     .unwrap();
/// assert!(wide.compute(&current, &previous).unwrap() >= 0.0);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DivergenceEstimator {
    grid: EvaluationGrid,
    bandwidth_rule: BandwidthRule,
    log_base: Option<f64>,
}

impl DivergenceEstimator {
    /// Creates an estimator on the default `[3, 45]` grid with 50 points,
    /// Scott's rule and natural logarithms.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an estimator on the given grid with default options.
    #[must_use]
    pub fn with_grid(grid: EvaluationGrid) -> Self {
        Self {
            grid,
            ..Self::default()
        }
    }

    /// Returns a builder for custom configuration.
    #[must_use]
    pub fn builder() -> DivergenceEstimatorBuilder {
        DivergenceEstimatorBuilder::new()
    }

    /// Returns the evaluation grid.
    #[must_use]
    pub fn grid(&self) -> &EvaluationGrid {
        &self.grid
    }

    /// Returns the bandwidth rule applied to both samples.
    #[must_use]
    pub fn bandwidth_rule(&self) -> BandwidthRule {
        self.bandwidth_rule
    }

    /// Returns the logarithm base, or `None` for natural log.
    #[must_use]
    pub fn log_base(&self) -> Option<f64> {
        self.log_base
    }

    /// Computes `KL(current || reference)` over the grid.
    ///
    /// Infinite and NaN divergences are returned as `0.0`; use
    /// [`evaluate`](Self::evaluate) to see whether that happened. Round-off
    /// negatives are clamped to `0.0`, so the result is always finite and
    /// non-negative.
    ///
    /// # Errors
    ///
    /// Returns `Error::Sample` wrapping `EmptySample`, `NonFiniteObservation`,
    /// `InsufficientObservations` or `ZeroVariance` when either sample cannot
    /// be fitted. The wrapper's role says which one.
    pub fn compute(&self, current: &[f64], reference: &[f64]) -> Result<f64> {
        self.evaluate(current, reference).map(|report| report.score)
    }

    /// Computes the divergence and returns it with everything used to derive it.
    ///
    /// # Errors
    ///
    /// Same as [`compute`](Self::compute).
    pub fn evaluate(&self, current: &[f64], reference: &[f64]) -> Result<DivergenceReport> {
        let current_kde = GaussianKde::with_rule(current, self.bandwidth_rule)
            .map_err(|e| e.in_sample(SampleRole::Current))?;
        let reference_kde = GaussianKde::with_rule(reference, self.bandwidth_rule)
            .map_err(|e| e.in_sample(SampleRole::Reference))?;

        let p = current_kde.evaluate(&self.grid);
        let q = reference_kde.evaluate(&self.grid);
        let raw = relative_entropy(&p, &q, self.log_base)?;

        let degenerate = !raw.is_finite();
        let score = if degenerate {
            trace_warn!(raw, "divergence is not finite, reporting 0.0");
            0.0
        } else {
            raw.max(0.0)
        };
        trace_debug!(
            score,
            n_current = current.len(),
            n_reference = reference.len(),
            "computed divergence"
        );

        Ok(DivergenceReport {
            score,
            raw,
            degenerate,
            grid: self.grid,
            current_bandwidth: current_kde.bandwidth(),
            reference_bandwidth: reference_kde.bandwidth(),
            current_density: p,
            reference_density: q,
        })
    }
}

/// Full outcome of a divergence computation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DivergenceReport {
    /// The score [`DivergenceEstimator::compute`] returns.
    pub score: f64,
    /// The divergence before degenerate values were masked. May be infinite or NaN.
    #[cfg_attr(feature = "serde", serde(with = "non_finite"))]
    pub raw: f64,
    /// Whether `raw` was infinite or NaN and `score` was forced to `0.0`.
    pub degenerate: bool,
    /// The grid both densities were evaluated on.
    pub grid: EvaluationGrid,
    /// Kernel bandwidth fitted to the current sample.
    pub current_bandwidth: f64,
    /// Kernel bandwidth fitted to the reference sample.
    pub reference_bandwidth: f64,
    /// Current density heights at each grid point.
    pub current_density: Vec<f64>,
    /// Reference density heights at each grid point.
    pub reference_density: Vec<f64>,
}

/// Serde adapter for an `f64` that may be NaN or infinite.
///
/// Finite values stay numbers; the rest are written as the strings `"NaN"`,
/// `"inf"` and `"-inf"` so formats without non-finite numbers can load them.
#[cfg(feature = "serde")]
mod non_finite {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Wire {
        Number(f64),
        Text(String),
    }

    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub(super) fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_nan() {
            serializer.serialize_str("NaN")
        } else if value.is_infinite() {
            serializer.serialize_str(if *value > 0.0 { "inf" } else { "-inf" })
        } else {
            serializer.serialize_f64(*value)
        }
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match Wire::deserialize(deserializer)? {
            Wire::Number(value) => Ok(value),
            Wire::Text(text) => match text.as_str() {
                "NaN" => Ok(f64::NAN),
                "inf" => Ok(f64::INFINITY),
                "-inf" => Ok(f64::NEG_INFINITY),
                other => Err(D::Error::custom(format!("unknown non-finite value {other:?}"))),
            },
        }
    }
}

/// A builder for [`DivergenceEstimator`].
///
/// Grid settings are validated together in [`build`](Self::build), so the
/// setters can be called in any order.
///
/// # Defaults
///
/// - Grid: `[3, 45]` with 50 points
/// - Bandwidth: [`BandwidthRule::Scott`]
/// - Logarithm: natural
#[derive(Clone, Debug)]
pub struct DivergenceEstimatorBuilder {
    low: f64,
    high: f64,
    n_points: usize,
    bandwidth_rule: BandwidthRule,
    log_base: Option<f64>,
}

impl DivergenceEstimatorBuilder {
    fn new() -> Self {
        Self {
            low: EvaluationGrid::DEFAULT_LOW,
            high: EvaluationGrid::DEFAULT_HIGH,
            n_points: EvaluationGrid::DEFAULT_POINTS,
            bandwidth_rule: BandwidthRule::default(),
            log_base: None,
        }
    }

    /// Uses an already validated grid.
    #[must_use]
    pub fn grid(mut self, grid: EvaluationGrid) -> Self {
        self.low = grid.low();
        self.high = grid.high();
        self.n_points = grid.len();
        self
    }

    /// Sets the grid bounds, keeping the point count.
    #[must_use]
    pub fn grid_bounds(mut self, low: f64, high: f64) -> Self {
        self.low = low;
        self.high = high;
        self
    }

    /// Sets the number of grid points, keeping the bounds.
    #[must_use]
    pub fn grid_points(mut self, n_points: usize) -> Self {
        self.n_points = n_points;
        self
    }

    /// Sets the bandwidth rule applied to both samples.
    #[must_use]
    pub fn bandwidth_rule(mut self, rule: BandwidthRule) -> Self {
        self.bandwidth_rule = rule;
        self
    }

    /// Reports the divergence in the given logarithm base (2.0 for bits).
    #[must_use]
    pub fn log_base(mut self, base: f64) -> Self {
        self.log_base = Some(base);
        self
    }

    /// Builds the estimator.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidGridBounds` or `Error::EmptyGrid` for a bad grid.
    /// Returns `Error::InvalidBandwidth` for a bad bandwidth factor.
    /// Returns `Error::InvalidLogBase` for a bad logarithm base.
    pub fn build(self) -> Result<DivergenceEstimator> {
        let grid = EvaluationGrid::new(self.low, self.high, self.n_points)?;
        let bandwidth_rule = self.bandwidth_rule.validate()?;
        log_scale(self.log_base)?;

        Ok(DivergenceEstimator {
            grid,
            bandwidth_rule,
            log_base: self.log_base,
        })
    }
}

/// Scores drift of `current` against `reference` on a `[grid_low, grid_high]`
/// grid of `grid_points` points, with Scott's rule bandwidths.
///
/// Shorthand for building a [`DivergenceEstimator`] and calling
/// [`compute`](DivergenceEstimator::compute). Infinite and NaN divergences
/// are returned as `0.0`.
///
/// # Errors
///
/// Returns `Error::InvalidGridBounds` or `Error::EmptyGrid` for a bad grid,
/// and `Error::Sample` when either sample cannot be fitted.
///
/// # Examples
///
/// ```
/// use kde_divergence::compute_divergence;
///
/// let previous = [10.0, 11.0, 12.0, 12.5, 13.0, 15.0];
/// let current = [20.0, 21.5, 22.0, 23.0, 24.0, 26.0];
///
/// let narrow = compute_divergence(&current, &previous, 3.0, 45.0, 50).unwrap();
/// let wide = compute_divergence(&current, &previous, 1.0, 50.0, 50).unwrap();
/// assert!(narrow > 0.0 && wide > 0.0);
/// ```
pub fn compute_divergence(
    current: &[f64],
    reference: &[f64],
    grid_low: f64,
    grid_high: f64,
    grid_points: usize,
) -> Result<f64> {
    let grid = EvaluationGrid::new(grid_low, grid_high, grid_points)?;
    DivergenceEstimator::with_grid(grid).compute(current, reference)
}

impl From<EvaluationGrid> for DivergenceEstimator {
    fn from(grid: EvaluationGrid) -> Self {
        Self::with_grid(grid)
    }
}
