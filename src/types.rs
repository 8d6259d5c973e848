//! Core types shared across the crate.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which side of a comparison a sample was passed as.
///
/// The divergence is asymmetric: the current sample is `P` and the
/// reference sample is `Q` in `KL(P || Q)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SampleRole {
    /// The first argument, usually the most recent batch.
    Current,
    /// The second argument, usually the previous or baseline batch.
    Reference,
}

impl core::fmt::Display for SampleRole {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Current => write!(f, "current"),
            Self::Reference => write!(f, "reference"),
        }
    }
}
