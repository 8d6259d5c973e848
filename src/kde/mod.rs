//! Kernel density estimation for one-dimensional samples.
//!
//! - `univariate` - Gaussian KDE fitted to a single sample
//! - `bandwidth` - Automatic bandwidth rules shared by both sides of a comparison

mod bandwidth;
mod univariate;

pub use bandwidth::BandwidthRule;
pub use univariate::GaussianKde;
