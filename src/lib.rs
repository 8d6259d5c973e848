#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![deny(unreachable_pub)]
#![deny(clippy::correctness)]
#![deny(clippy::suspicious)]
#![deny(clippy::style)]
#![deny(clippy::complexity)]
#![deny(clippy::perf)]
#![deny(clippy::pedantic)]
#![deny(clippy::std_instead_of_core)]

//! Drift scoring between two empirical samples. Each sample is smoothed
//! into a continuous density with a Gaussian kernel density estimate, both
//! densities are evaluated on a shared grid, and the Kullback-Leibler
//! divergence of the current density from the reference density is
//! returned as a single non-negative number.
//!
//! # Getting Started
//!
//! ```
//! use kde_divergence::compute_divergence;
//!
//! let previous = [11.0, 12.5, 13.0, 14.0, 14.5, 16.0, 18.0];
//! let current = [15.0, 16.5, 17.0, 18.0, 19.5, 21.0, 24.0];
//!
//! let drift = compute_divergence(&current, &previous, 3.0, 45.0, 50).unwrap();
//! assert!(drift > 0.0);
//! ```
//!
//! # Core Concepts
//!
//! | Type | Role |
//! |------|------|
//! | [`DivergenceEstimator`] | Fit, evaluate and compare two samples. |
//! | [`EvaluationGrid`] | The evenly spaced points both densities are sampled on. |
//! | [`GaussianKde`] | A fitted density estimate for one sample. |
//! | [`BandwidthRule`] | How the kernel width is derived from a sample. |
//! | [`DivergenceReport`] | The score together with densities, bandwidths and the raw value. |
//!
//! # Degenerate scores
//!
//! If the densities fail to overlap on the grid the divergence is infinite
//! or undefined and is reported as `0.0`. Callers that need to tell that
//! apart from genuinely identical distributions should use
//! [`DivergenceEstimator::evaluate`] and inspect
//! [`DivergenceReport::degenerate`].
//!
//! # Invalid samples
//!
//! Empty samples, samples with NaN or infinite values, single observations
//! and samples whose values are all identical are rejected with an
//! [`Error`] before any density is fitted.
//!
//! # Feature Flags
//!
//! | Flag | What it enables | Default |
//! |------|----------------|---------|
//! | `serde` | `Serialize`/`Deserialize` on grids, bandwidth rules and reports | off |
//! | `tracing` | [`tracing`](https://docs.rs/tracing) events for fits and masked scores | off |

/// Emit a `tracing::debug!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_debug {
    ($($arg:tt)*) => {};
}

/// Emit a `tracing::warn!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_warn {
    ($($arg:tt)*) => { tracing::warn!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_warn {
    ($($arg:tt)*) => {};
}

mod divergence;
mod entropy;
mod error;
mod grid;
mod kde;
mod types;

pub use divergence::{
    DivergenceEstimator, DivergenceEstimatorBuilder, DivergenceReport, compute_divergence,
};
pub use entropy::{relative_entropy, shannon_entropy};
pub use error::{Error, Result};
pub use grid::EvaluationGrid;
pub use kde::{BandwidthRule, GaussianKde};
pub use types::SampleRole;

/// Convenient wildcard import for the most common types.
///
/// ```
/// use kde_divergence::prelude::*;
/// ```
pub mod prelude {
    pub use crate::divergence::{
        DivergenceEstimator, DivergenceEstimatorBuilder, DivergenceReport, compute_divergence,
    };
    pub use crate::entropy::{relative_entropy, shannon_entropy};
    pub use crate::error::{Error, Result};
    pub use crate::grid::EvaluationGrid;
    pub use crate::kde::{BandwidthRule, GaussianKde};
    pub use crate::types::SampleRole;
}
