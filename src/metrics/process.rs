//! Fidelities between channels in the Pauli-Liouville representation.
//!
//! None of these are metrics: the triangle inequality does not hold in
//! general.
use crate::core::error::{QMetricError, Result};
use crate::core::tolerance::clamp_to_range;
use crate::core::types::PauliLiouville;

fn overlap(r_p: &PauliLiouville, r_u: &PauliLiouville, context: &'static str) -> Result<f64> {
    if r_p.matrix().shape() != r_u.matrix().shape() {
        return Err(QMetricError::mismatch(
            context,
            r_p.matrix().shape(),
            r_u.matrix().shape(),
        ));
    }
    // Tr[R_Pᵀ R_U] is the entrywise dot product.
    Ok(r_p.matrix().dot(r_u.matrix()))
}

/// Entanglement (process) fidelity `Tr[R_Pᵀ R_U]/d²`.
pub fn entanglement_fidelity(r_p: &PauliLiouville, r_u: &PauliLiouville) -> Result<f64> {
    let d = r_p.dim() as f64;
    let fe = overlap(r_p, r_u, "entanglement_fidelity")? / (d * d);
    clamp_to_range("entanglement_fidelity", fe, 0.0, 1.0)
}

/// Average gate fidelity `(Tr[R_Pᵀ R_U]/d + 1)/(d + 1)`.
///
/// `R_P` is the noisy process, `R_U` the ideal one; `d` is inferred from the
/// matrix side `d²`.
pub fn process_fidelity(r_p: &PauliLiouville, r_u: &PauliLiouville) -> Result<f64> {
    let d = r_p.dim() as f64;
    let f = (overlap(r_p, r_u, "process_fidelity")? / d + 1.0) / (d + 1.0);
    clamp_to_range("process_fidelity", f, 0.0, 1.0)
}

/// `1 − process_fidelity`.
pub fn process_infidelity(r_p: &PauliLiouville, r_u: &PauliLiouville) -> Result<f64> {
    Ok(1.0 - process_fidelity(r_p, r_u)?)
}
