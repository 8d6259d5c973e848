//! Automatic bandwidth selection for Gaussian KDE.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Rule used to derive a kernel bandwidth from a sample.
///
/// Every rule produces a dimensionless factor that is multiplied by the
/// sample standard deviation (`n - 1` denominator) to give the bandwidth.
/// Comparisons should use the same rule on both sides so that differing
/// amounts of smoothing do not bias the score.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BandwidthRule {
    /// Scott's rule: `n^(-1/5)`.
    #[default]
    Scott,
    /// Silverman's rule: `(3n / 4)^(-1/5)`.
    Silverman,
    /// A fixed factor applied to the standard deviation regardless of `n`.
    Factor(f64),
}

impl BandwidthRule {
    /// Checks that a [`BandwidthRule::Factor`] holds a usable value.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidBandwidth` if the factor is not positive and finite.
    pub fn validate(self) -> Result<Self> {
        if let Self::Factor(f) = self
            && !(f.is_finite() && f > 0.0)
        {
            return Err(Error::InvalidBandwidth(f));
        }
        Ok(self)
    }

    /// Returns the smoothing factor for a sample of `n` observations.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn factor(self, n: usize) -> f64 {
        let n = n as f64;
        match self {
            Self::Scott => n.powf(-0.2),
            Self::Silverman => (n * 0.75).powf(-0.2),
            Self::Factor(f) => f,
        }
    }
}

/// Sample mean and standard deviation with `n - 1` in the denominator.
///
/// Callers must pass at least two observations.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn mean_and_std_dev(samples: &[f64]) -> (f64, f64) {
    let n = samples.len() as f64;
    let mean = samples.iter().sum::<f64>() / n;
    let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);
    (mean, variance.sqrt())
}
