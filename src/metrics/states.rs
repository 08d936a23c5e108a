//! Distances and similarities between pairs of quantum states.
//!
//! Every routine checks that both states share a dimension before doing any
//! numeric work, and reports results outside their admissible range (beyond
//! [`tolerance::RANGE`](crate::core::tolerance::RANGE)) as `DomainError`.
use crate::core::error::{QMetricError, Result};
use crate::core::linalg::{self, HermitianSpectrum};
use crate::core::optimization::golden_section_search;
use crate::core::tolerance::clamp_to_range;
use crate::core::types::{DensityMatrix, ProbabilityVector};
use serde::{Deserialize, Serialize};
use tracing::debug;

fn same_dim(context: &'static str, rho: &DensityMatrix, sigma: &DensityMatrix) -> Result<()> {
    if rho.dim() != sigma.dim() {
        return Err(QMetricError::mismatch(
            context,
            rho.matrix().shape(),
            sigma.matrix().shape(),
        ));
    }
    Ok(())
}

/// Fidelity `F(ρ, σ) = (Tr √(√ρ σ √ρ))²`.
///
/// Lies in `[0, 1]`, equals 1 iff `ρ = σ`, and reduces to `|⟨ψ|φ⟩|²` for pure
/// states. Both square roots go through the clipped eigendecomposition, so
/// round-off never produces a complex or NaN result.
pub fn fidelity(rho: &DensityMatrix, sigma: &DensityMatrix) -> Result<f64> {
    same_dim("fidelity", rho, sigma)?;
    let sqrt_rho = linalg::psd_sqrt(rho.matrix(), "fidelity")?;
    let inner = &sqrt_rho * sigma.matrix() * &sqrt_rho;
    let root = linalg::trace_sqrt(&inner, "fidelity")?;
    clamp_to_range("fidelity", root * root, 0.0, 1.0)
}

/// `1 − F(ρ, σ)`.
pub fn infidelity(rho: &DensityMatrix, sigma: &DensityMatrix) -> Result<f64> {
    Ok(1.0 - fidelity(rho, sigma)?)
}

/// Trace distance `½ Σ |λ_i(ρ − σ)|`, in `[0, 1]`.
pub fn trace_distance(rho: &DensityMatrix, sigma: &DensityMatrix) -> Result<f64> {
    same_dim("trace_distance", rho, sigma)?;
    let diff = rho.matrix() - sigma.matrix();
    clamp_to_range("trace_distance", 0.5 * linalg::trace_norm(&diff)?, 0.0, 1.0)
}

/// Optimal single-shot probability of telling `ρ` from `σ` with equal priors,
/// `½(1 + T(ρ, σ))`.
pub fn discrimination_probability(rho: &DensityMatrix, sigma: &DensityMatrix) -> Result<f64> {
    Ok(0.5 * (1.0 + trace_distance(rho, sigma)?))
}

/// Bures distance `√(2(1 − √F))`.
pub fn bures_distance(rho: &DensityMatrix, sigma: &DensityMatrix) -> Result<f64> {
    let root = fidelity(rho, sigma)?.sqrt();
    Ok((2.0 * (1.0 - root)).max(0.0).sqrt())
}

/// Bures angle `arccos √F`.
pub fn bures_angle(rho: &DensityMatrix, sigma: &DensityMatrix) -> Result<f64> {
    let root = fidelity(rho, sigma)?.sqrt();
    Ok(root.min(1.0).acos())
}

/// Hilbert–Schmidt inner product `Tr[ρ†σ]`.
///
/// Real and non-negative for Hermitian PSD inputs; the vanishing imaginary
/// part is dropped.
pub fn hilbert_schmidt_ip(rho: &DensityMatrix, sigma: &DensityMatrix) -> Result<f64> {
    same_dim("hilbert_schmidt_ip", rho, sigma)?;
    let ip: f64 = rho
        .matrix()
        .iter()
        .zip(sigma.matrix().iter())
        .map(|(a, b)| (a.conj() * b).re)
        .sum();
    clamp_to_range("hilbert_schmidt_ip", ip, 0.0, f64::INFINITY)
}

/// Search budget for the Chernoff exponent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChernoffConfig {
    /// Absolute width of the final bracket on `s`.
    pub tolerance: f64,
    pub max_iterations: usize,
}

impl Default for ChernoffConfig {
    fn default() -> Self {
        Self { tolerance: 1e-10, max_iterations: 200 }
    }
}

/// Result of [`quantum_chernoff_bound`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ChernoffBound {
    /// `min_s Tr[ρ^s σ^{1−s}]`.
    pub qcb_exp: f64,
    /// The minimizing `s ∈ [0, 1]`.
    pub s_opt: f64,
}

/// Quantum Chernoff bound with the default search budget.
pub fn quantum_chernoff_bound(rho: &DensityMatrix, sigma: &DensityMatrix) -> Result<ChernoffBound> {
    quantum_chernoff_bound_with(rho, sigma, &ChernoffConfig::default())
}

/// `min_{s∈[0,1]} Tr[ρ^s σ^{1−s}]` and its argmin.
///
/// The objective is convex in `s`, so a golden-section search over the closed
/// interval finds it; both spectra are decomposed once and reused for every
/// `s`. Zero eigenvalues stay zero under every power (`ρ^0` is the support
/// projector). When `ρ = σ` the objective is flat at 1 and `s_opt` is
/// arbitrary. For commuting states this is the classical Chernoff bound of
/// the two spectra.
pub fn quantum_chernoff_bound_with(
    rho: &DensityMatrix,
    sigma: &DensityMatrix,
    config: &ChernoffConfig,
) -> Result<ChernoffBound> {
    same_dim("quantum_chernoff_bound", rho, sigma)?;
    let clean = |m: &DensityMatrix| -> Result<HermitianSpectrum> {
        let eig = linalg::eigh(m.matrix())?;
        let values = eig.clipped_values("quantum_chernoff_bound")?;
        Ok(HermitianSpectrum { values, vectors: eig.vectors })
    };
    let (rs, ss) = (clean(rho)?, clean(sigma)?);
    let pow = |l: f64, p: f64| if l > 0.0 { l.powf(p) } else { 0.0 };
    let objective = |s: f64| {
        let a = rs.map(|l| pow(l, s));
        let b = ss.map(|l| pow(l, 1.0 - s));
        (a * b).trace().re
    };

    let min = golden_section_search(objective, 0.0, 1.0, config.tolerance, config.max_iterations)
        .ok_or_else(|| QMetricError::domain("quantum_chernoff_bound", f64::NAN))?;
    debug!(
        qcb_exp = min.fx,
        s_opt = min.x,
        iterations = min.iterations,
        "quantum Chernoff bound search finished"
    );
    Ok(ChernoffBound {
        qcb_exp: clamp_to_range("quantum_chernoff_bound", min.fx, 0.0, 1.0)?,
        s_opt: min.x,
    })
}

/// Total variation distance `½ Σ |P_i − Q_i|`, in `[0, 1]`.
pub fn total_variation_distance(p: &ProbabilityVector, q: &ProbabilityVector) -> Result<f64> {
    if p.len() != q.len() {
        return Err(QMetricError::mismatch(
            "total_variation_distance",
            (p.len(), 1),
            (q.len(), 1),
        ));
    }
    let tvd = 0.5
        * p.as_slice()
            .iter()
            .zip(q.as_slice())
            .map(|(a, b)| (a - b).abs())
            .sum::<f64>();
    clamp_to_range("total_variation_distance", tvd, 0.0, 1.0)
}
