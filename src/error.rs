use crate::types::SampleRole;

/// Errors returned while validating inputs or configuring an estimator.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// Returned when a sample contains no observations.
    #[error("sample must contain at least one observation")]
    EmptySample,

    /// Returned when a sample is too small for bandwidth estimation.
    #[error("sample needs at least 2 observations for bandwidth estimation, got {got}")]
    InsufficientObservations {
        /// The number of observations supplied.
        got: usize,
    },

    /// Returned when every observation in a sample is identical.
    #[error("sample has zero variance, bandwidth estimation is singular")]
    ZeroVariance,

    /// Returned when a sample contains NaN or an infinity.
    #[error("non-finite observation {value} at index {index}")]
    NonFiniteObservation {
        /// Position of the offending observation.
        index: usize,
        /// The offending value.
        value: f64,
    },

    /// A sample-level error tagged with the side of the comparison it came from.
    #[error("{role} sample rejected: {source}")]
    Sample {
        /// Which input the error refers to.
        role: SampleRole,
        /// The underlying sample error.
        #[source]
        source: Box<Error>,
    },

    /// Returned when the grid bounds are not finite or `low >= high`.
    #[error("invalid grid bounds: low ({low}) must be finite and less than high ({high})")]
    InvalidGridBounds {
        /// The lower bound value.
        low: f64,
        /// The upper bound value.
        high: f64,
    },

    /// Returned when a grid is requested with zero points.
    #[error("evaluation grid must have at least one point")]
    EmptyGrid,

    /// Returned when a bandwidth or bandwidth factor is not positive and finite.
    #[error("invalid bandwidth: {0} must be positive and finite")]
    InvalidBandwidth(f64),

    /// Returned when a rule-of-thumb bandwidth overflows or underflows.
    #[error("estimated bandwidth {0} is not a normal positive number")]
    DegenerateBandwidth(f64),

    /// Returned when a logarithm base is unusable.
    #[error("invalid logarithm base: {0} must be positive, finite and not 1")]
    InvalidLogBase(f64),

    /// Returned when two density vectors differ in length.
    #[error("length mismatch: left has {left} values but right has {right}")]
    LengthMismatch {
        /// Length of the first vector.
        left: usize,
        /// Length of the second vector.
        right: usize,
    },

    /// Returned when an entropy is requested over an empty vector.
    #[error("distribution must contain at least one value")]
    EmptyDistribution,
}

impl Error {
    /// Tags a sample error with the side of the comparison it came from.
    pub(crate) fn in_sample(self, role: SampleRole) -> Self {
        Self::Sample {
            role,
            source: Box::new(self),
        }
    }

    /// Returns the side of the comparison this error refers to, if any.
    #[must_use]
    pub fn sample_role(&self) -> Option<SampleRole> {
        match self {
            Self::Sample { role, .. } => Some(*role),
            _ => None,
        }
    }

    /// Strips any [`Error::Sample`] wrapping and returns the underlying error.
    ///
    /// # Examples
    ///
    /// ```
    /// use kde_divergence::{Error, compute_divergence};
    ///
    /// let err = compute_divergence(&[], &[1.0, 2.0], 3.0, 45.0, 50).unwrap_err();
    /// assert_eq!(err.root_cause(), &Error::EmptySample);
    /// ```
    #[must_use]
    pub fn root_cause(&self) -> &Error {
        match self {
            Self::Sample { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;
