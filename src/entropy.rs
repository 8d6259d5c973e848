//! Discrete entropy and relative entropy over density vectors.
//!
//! Both functions rescale their inputs to sum to 1 before summing, so they
//! accept raw density heights as well as probabilities. The result is in
//! nats unless a logarithm base is given.
//!
//! Elementwise terms of the relative entropy follow the usual conventions:
//!
//! | `p_i` | `q_i` | term |
//! |-------|-------|------|
//! | `> 0` | `> 0` | `p_i * ln(p_i / q_i)` |
//! | `0` | `>= 0` | `0` |
//! | otherwise | | `+inf` |
//!
//! A vector summing to zero normalizes to NaN, which propagates to the result.

use crate::error::{Error, Result};

/// Computes `KL(P || Q)` between two equal-length vectors.
///
/// # Errors
///
/// Returns `Error::EmptyDistribution` if the vectors are empty.
/// Returns `Error::LengthMismatch` if the vectors differ in length.
/// Returns `Error::InvalidLogBase` if `base` is not positive, finite and unequal to 1.
///
/// # Examples
///
/// ```
/// use kde_divergence::relative_entropy;
///
/// let d = relative_entropy(&[0.5, 0.5], &[0.9, 0.1], None).unwrap();
/// assert!((d - 0.5 * (0.5_f64 / 0.9).ln() - 0.5 * (0.5_f64 / 0.1).ln()).abs() < 1e-12);
///
/// // Disjoint support is unbounded.
/// assert!(relative_entropy(&[1.0, 0.0], &[0.0, 1.0], None).unwrap().is_infinite());
/// ```
pub fn relative_entropy(p: &[f64], q: &[f64], base: Option<f64>) -> Result<f64> {
    if p.len() != q.len() {
        return Err(Error::LengthMismatch {
            left: p.len(),
            right: q.len(),
        });
    }
    if p.is_empty() {
        return Err(Error::EmptyDistribution);
    }
    let scale = log_scale(base)?;

    let p_sum: f64 = p.iter().sum();
    let q_sum: f64 = q.iter().sum();

    let nats: f64 = p
        .iter()
        .zip(q)
        .map(|(&pi, &qi)| relative_entropy_term(pi / p_sum, qi / q_sum))
        .sum();

    Ok(nats / scale)
}

/// Computes the Shannon entropy `-sum p_i ln(p_i)` of a single vector.
///
/// # Errors
///
/// Returns `Error::EmptyDistribution` if `p` is empty.
/// Returns `Error::InvalidLogBase` if `base` is not positive, finite and unequal to 1.
pub fn shannon_entropy(p: &[f64], base: Option<f64>) -> Result<f64> {
    if p.is_empty() {
        return Err(Error::EmptyDistribution);
    }
    let scale = log_scale(base)?;

    let sum: f64 = p.iter().sum();
    let nats: f64 = p
        .iter()
        .map(|&pi| {
            let x = pi / sum;
            if x.is_nan() {
                f64::NAN
            } else if x > 0.0 {
                -x * x.ln()
            } else if x == 0.0 {
                0.0
            } else {
                f64::NEG_INFINITY
            }
        })
        .sum();

    Ok(nats / scale)
}

/// Validates `base` and returns `ln(base)`, or `1.0` for natural log.
pub(crate) fn log_scale(base: Option<f64>) -> Result<f64> {
    match base {
        None => Ok(1.0),
        Some(b) if b.is_finite() && b > 0.0 && (b - 1.0).abs() > f64::EPSILON => Ok(b.ln()),
        Some(b) => Err(Error::InvalidLogBase(b)),
    }
}

fn relative_entropy_term(p: f64, q: f64) -> f64 {
    if p.is_nan() || q.is_nan() {
        f64::NAN
    } else if p > 0.0 && q > 0.0 {
        p * (p / q).ln()
    } else if p == 0.0 && q >= 0.0 {
        0.0
    } else {
        f64::INFINITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_vectors() {
        let p = [0.1, 0.2, 0.3, 0.4];
        let d = relative_entropy(&p, &p, None).unwrap();
        assert!(d.abs() < 1e-15);
    }

    #[test]
    fn test_normalizes_inputs() {
        let raw = relative_entropy(&[2.0, 6.0], &[5.0, 5.0], None).unwrap();
        let normalized = relative_entropy(&[0.25, 0.75], &[0.5, 0.5], None).unwrap();
        assert!((raw - normalized).abs() < 1e-15);
    }

    #[test]
    fn test_known_value() {
        // KL([0.25, 0.75] || [0.5, 0.5]) = 0.25 ln 0.5 + 0.75 ln 1.5
        let d = relative_entropy(&[0.25, 0.75], &[0.5, 0.5], None).unwrap();
        let expected = 0.25 * 0.5_f64.ln() + 0.75 * 1.5_f64.ln();
        assert!((d - expected).abs() < 1e-15);
    }

    #[test]
    fn test_asymmetric() {
        let p = [0.1, 0.9];
        let q = [0.6, 0.4];
        let pq = relative_entropy(&p, &q, None).unwrap();
        let qp = relative_entropy(&q, &p, None).unwrap();
        assert!((pq - qp).abs() > 1e-3);
    }

    #[test]
    fn test_zero_in_p_contributes_nothing() {
        let d = relative_entropy(&[0.0, 1.0], &[0.5, 0.5], None).unwrap();
        assert!((d - 2.0_f64.ln()).abs() < 1e-15);
    }

    #[test]
    fn test_zero_in_q_is_infinite() {
        let d = relative_entropy(&[0.5, 0.5], &[1.0, 0.0], None).unwrap();
        assert!(d.is_infinite() && d > 0.0);
    }

    #[test]
    fn test_all_zero_is_nan() {
        let d = relative_entropy(&[0.0, 0.0], &[0.5, 0.5], None).unwrap();
        assert!(d.is_nan());
    }

    #[test]
    fn test_base_two() {
        let nats = relative_entropy(&[0.25, 0.75], &[0.5, 0.5], None).unwrap();
        let bits = relative_entropy(&[0.25, 0.75], &[0.5, 0.5], Some(2.0))
            .unwrap();
        assert!((bits - nats / 2.0_f64.ln()).abs() < 1e-15);
    }

    #[test]
    fn test_invalid_base() {
        for base in [1.0, 0.0, -2.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                relative_entropy(&[1.0], &[1.0], Some(base)),
                Err(Error::InvalidLogBase(_))
            ));
        }
    }

    #[test]
    fn test_length_mismatch() {
        let result = relative_entropy(&[0.5, 0.5], &[1.0], None);
        assert!(matches!(
            result,
            Err(Error::LengthMismatch { left: 2, right: 1 })
        ));
    }

    #[test]
    fn test_empty() {
        assert!(matches!(
            relative_entropy(&[], &[], None),
            Err(Error::EmptyDistribution)
        ));
        assert!(matches!(
            shannon_entropy(&[], None),
            Err(Error::EmptyDistribution)
        ));
    }

    #[test]
    fn test_shannon_uniform() {
        let h = shannon_entropy(&[1.0, 1.0, 1.0, 1.0], Some(2.0)).unwrap();
        assert!((h - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_shannon_point_mass() {
        let h = shannon_entropy(&[0.0, 3.0, 0.0], None).unwrap();
        assert!(h.abs() < f64::EPSILON);
    }
}
