//! Gaussian kernel density estimation for one-dimensional samples.

use super::bandwidth::{BandwidthRule, mean_and_std_dev};
use crate::error::{Error, Result};
use crate::grid::EvaluationGrid;

/// A Gaussian kernel density estimator fitted to a single sample.
///
/// The density is the average of Gaussian kernels of equal width centered
/// on each observation. Values returned by [`pdf`](Self::pdf) are density
/// heights, not probabilities.
///
/// # Examples
///
/// ```
/// use kde_divergence::{EvaluationGrid, GaussianKde};
///
/// let kde = GaussianKde::new(&[10.0, 12.0, 12.5, 14.0, 20.0]).unwrap();
/// assert!(kde.pdf(12.0) > kde.pdf(40.0));
///
/// let heights = kde.evaluate(&EvaluationGrid::default());
/// assert_eq!(heights.len(), 50);
/// ```
#[derive(Clone, Debug)]
pub struct GaussianKde {
    /// The observations the kernels are centered on.
    samples: Vec<f64>,
    /// The bandwidth (standard deviation) of every kernel.
    bandwidth: f64,
}

impl GaussianKde {
    /// Fits a KDE with Scott's rule bandwidth.
    ///
    /// # Errors
    ///
    /// See [`GaussianKde::with_rule`].
    pub fn new(samples: &[f64]) -> Result<Self> {
        Self::with_rule(samples, BandwidthRule::Scott)
    }

    /// Fits a KDE with the bandwidth chosen by `rule`.
    ///
    /// # Errors
    ///
    /// Returns `Error::EmptySample` if `samples` is empty.
    /// Returns `Error::NonFiniteObservation` if any observation is NaN or infinite.
    /// Returns `Error::InsufficientObservations` if there is only one observation.
    /// Returns `Error::ZeroVariance` if all observations are identical.
    /// Returns `Error::InvalidBandwidth` if `rule` carries a bad factor.
    /// Returns `Error::DegenerateBandwidth` if the estimated bandwidth is
    /// infinite, zero or subnormal, as happens when the spread of the
    /// observations is too large or too small to represent.
    pub fn with_rule(samples: &[f64], rule: BandwidthRule) -> Result<Self> {
        check_observations(samples)?;
        if samples.len() < 2 {
            return Err(Error::InsufficientObservations { got: samples.len() });
        }
        if spread(samples) <= 0.0 {
            return Err(Error::ZeroVariance);
        }
        let rule = rule.validate()?;

        let (_, std_dev) = mean_and_std_dev(samples);
        let bandwidth = rule.factor(samples.len()) * std_dev;
        if !bandwidth.is_normal() {
            return Err(Error::DegenerateBandwidth(bandwidth));
        }
        trace_debug!(n = samples.len(), bandwidth, ?rule, "fitted gaussian kde");

        Ok(Self {
            samples: samples.to_vec(),
            bandwidth,
        })
    }

    /// Fits a KDE with an explicit bandwidth.
    ///
    /// A single observation or a zero-variance sample is accepted here since
    /// no spread estimate is needed.
    ///
    /// # Errors
    ///
    /// Returns `Error::EmptySample` if `samples` is empty.
    /// Returns `Error::NonFiniteObservation` if any observation is NaN or infinite.
    /// Returns `Error::InvalidBandwidth` if `bandwidth` is not positive and finite.
    pub fn with_bandwidth(samples: &[f64], bandwidth: f64) -> Result<Self> {
        check_observations(samples)?;
        if !(bandwidth.is_finite() && bandwidth > 0.0) {
            return Err(Error::InvalidBandwidth(bandwidth));
        }

        Ok(Self {
            samples: samples.to_vec(),
            bandwidth,
        })
    }

    /// Returns the kernel bandwidth.
    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Returns the number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always `false`; construction rejects empty samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Returns the density height at `x`.
    ///
    /// f(x) = (1/n) * `sum_i` K((x - `x_i`) / h) / h
    ///
    /// where K is the standard normal density and h is the bandwidth.
    /// Far from every observation the result underflows to exactly `0.0`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn pdf(&self, x: f64) -> f64 {
        let n = self.samples.len() as f64;
        let inv_bandwidth = 1.0 / self.bandwidth;
        let normalization = inv_bandwidth / (2.0 * core::f64::consts::PI).sqrt();

        let density: f64 = self
            .samples
            .iter()
            .map(|&xi| {
                let z = (x - xi) * inv_bandwidth;
                normalization * (-0.5 * z * z).exp()
            })
            .sum();

        density / n
    }

    /// Evaluates the density at every point of `grid`.
    #[must_use]
    pub fn evaluate(&self, grid: &EvaluationGrid) -> Vec<f64> {
        grid.points().map(|x| self.pdf(x)).collect()
    }

    /// Draws `n` values from the estimated density.
    ///
    /// Each draw picks an observation uniformly and adds Gaussian noise with
    /// the bandwidth as standard deviation (Box-Muller transform).
    pub fn resample(&self, rng: &mut fastrand::Rng, n: usize) -> Vec<f64> {
        (0..n)
            .map(|_| {
                let center = self.samples[rng.usize(0..self.samples.len())];
                // 1 - U lies in (0, 1], keeping the log finite.
                let u1 = 1.0 - rng.f64();
                let u2 = rng.f64();
                let z = (-2.0 * u1.ln()).sqrt() * (2.0 * core::f64::consts::PI * u2).cos();
                center + z * self.bandwidth
            })
            .collect()
    }
}

fn check_observations(samples: &[f64]) -> Result<()> {
    if samples.is_empty() {
        return Err(Error::EmptySample);
    }
    if let Some((index, &value)) = samples.iter().enumerate().find(|(_, x)| !x.is_finite()) {
        return Err(Error::NonFiniteObservation { index, value });
    }
    Ok(())
}

fn spread(samples: &[f64]) -> f64 {
    let (min, max) = samples
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| {
            (lo.min(x), hi.max(x))
        });
    max - min
}
