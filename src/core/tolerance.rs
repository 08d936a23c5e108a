//! Fixed numerical tolerances.
//!
//! Eigenvalue thresholds are relative to the spectral scale of the matrix
//! being decomposed, `max(1, max |λ|)`, so they behave the same for density
//! matrices (trace 1) and for unnormalized Choi matrices (trace d).

/// Eigenvalues with `|λ| <= ZERO_EIGENVALUE * scale` are treated as exactly zero.
pub const ZERO_EIGENVALUE: f64 = 1e-12;

/// Negative eigenvalues down to `-NEGATIVE_EIGENVALUE * scale` are round-off
/// and clipped to zero; anything lower is a `DomainError`.
pub const NEGATIVE_EIGENVALUE: f64 = 1e-8;

/// Scalar results may leave their admissible range by this much before
/// being reported as a `DomainError`; within it they are clamped.
pub const RANGE: f64 = 1e-8;

/// Default tolerance for Hermiticity, trace and positivity checks on inputs.
pub const DEFAULT_STATE: f64 = 1e-8;

/// Spectral scale used to make the eigenvalue thresholds relative.
#[inline]
pub fn spectral_scale(eigenvalues: &[f64]) -> f64 {
    eigenvalues.iter().fold(1.0_f64, |acc, l| acc.max(l.abs()))
}

/// Clamp `value` into `[lo, hi]` if it lies within [`RANGE`] of the interval.
pub fn clamp_to_range(
    quantity: &'static str,
    value: f64,
    lo: f64,
    hi: f64,
) -> crate::core::error::Result<f64> {
    if !value.is_finite() || value < lo - RANGE || value > hi + RANGE {
        return Err(crate::core::error::QMetricError::domain(quantity, value));
    }
    Ok(value.clamp(lo, hi))
}
