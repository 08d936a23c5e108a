//! Purity and impurity of a single state.
use crate::core::error::{QMetricError, Result};
use crate::core::tolerance::clamp_to_range;
use crate::core::types::DensityMatrix;

/// `Tr ρ²`, or with `dim_renorm` the rescaled `(d/(d−1))(Tr ρ² − 1/d)` that
/// maps the maximally mixed state to 0 and pure states to 1 for every `d`.
///
/// Renormalization is undefined for `d = 1` and reported as `DomainError`.
pub fn purity(rho: &DensityMatrix, dim_renorm: bool) -> Result<f64> {
    let d = rho.dim() as f64;
    // Tr ρ² = Σ |ρ_ij|² for Hermitian ρ.
    let tr_sq: f64 = rho.matrix().iter().map(|z| z.norm_sqr()).sum();
    let p = clamp_to_range("purity", tr_sq, 1.0 / d, 1.0)?;
    if !dim_renorm {
        return Ok(p);
    }
    if rho.dim() < 2 {
        return Err(QMetricError::domain("purity renormalization", d));
    }
    clamp_to_range("purity", (d / (d - 1.0)) * (p - 1.0 / d), 0.0, 1.0)
}

/// `1 − purity(ρ, dim_renorm)` under the same renormalization.
pub fn impurity(rho: &DensityMatrix, dim_renorm: bool) -> Result<f64> {
    Ok(1.0 - purity(rho, dim_renorm)?)
}
