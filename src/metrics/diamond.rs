//! Diamond-norm distance between channels given as Choi matrices.
use crate::core::error::{QMetricError, Result};
use crate::core::types::ChoiMatrix;
use crate::sdp::{DiamondNormProgram, InteriorPointSolver, SdpSolver};
use serde::Serialize;

/// Certified bracket `lower ≤ ‖Φ‖◇ ≤ upper`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct WatrousBounds {
    pub lower: f64,
    pub upper: f64,
}

impl WatrousBounds {
    pub fn gap(&self) -> f64 {
        self.upper - self.lower
    }

    /// Point estimate reported as the diamond-norm distance.
    pub fn midpoint(&self) -> f64 {
        0.5 * (self.lower + self.upper)
    }
}

/// `watrous_bounds` with the default [`InteriorPointSolver`].
pub fn watrous_bounds(delta: &ChoiMatrix) -> Result<WatrousBounds> {
    watrous_bounds_with(delta, &InteriorPointSolver::default())
}

/// Primal and dual values of Watrous's SDP for the map whose Choi matrix is
/// `delta`.
///
/// Pass the Choi difference `C0 − C1` to bracket the diamond-norm distance of
/// the two channels; by linearity, half the difference brackets half of it.
pub fn watrous_bounds_with(delta: &ChoiMatrix, solver: &dyn SdpSolver) -> Result<WatrousBounds> {
    let sol = solver.solve(&DiamondNormProgram::new(delta))?;
    // Converged brackets may cross by round-off.
    Ok(WatrousBounds {
        lower: sol.lower.min(sol.upper).max(0.0),
        upper: sol.upper.max(sol.lower).max(0.0),
    })
}

/// `diamond_norm_distance` with the default [`InteriorPointSolver`].
pub fn diamond_norm_distance(c0: &ChoiMatrix, c1: &ChoiMatrix) -> Result<f64> {
    diamond_norm_distance_with(c0, c1, &InteriorPointSolver::default())
}

/// `‖Φ₀ − Φ₁‖◇` from the two Choi matrices.
///
/// Lies in `[0, 2]` for trace-preserving completely positive maps: 0 for
/// identical channels, 2 for perfectly distinguishable ones. A solver that
/// cannot close its gap surfaces `NotConverged`; no estimate is returned in
/// that case.
pub fn diamond_norm_distance_with(
    c0: &ChoiMatrix,
    c1: &ChoiMatrix,
    solver: &dyn SdpSolver,
) -> Result<f64> {
    if c0.matrix().shape() != c1.matrix().shape() {
        return Err(QMetricError::mismatch(
            "diamond_norm_distance",
            c0.matrix().shape(),
            c1.matrix().shape(),
        ));
    }
    Ok(watrous_bounds_with(&c0.difference(c1)?, solver)?.midpoint())
}
