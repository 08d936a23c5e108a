//! Semidefinite programming backend for completely bounded norms.
//!
//! The diamond norm of a Hermiticity-preserving map Φ with Choi matrix `J`
//! (output ⊗ input) is the optimum of Watrous's program
//!
//! ```text
//! primal:  max  ‖(I ⊗ √ρ) J (I ⊗ √ρ)‖₁          over input states ρ
//! dual:    min  ½(‖Tr_out Y₀‖∞ + ‖Tr_out Y₁‖∞)   s.t. [[Y₀, −J], [−J, Y₁]] ⪰ 0
//! ```
//!
//! Solvers consume a [`DiamondNormProgram`] and return a certified bracket
//! `lower ≤ ‖Φ‖◇ ≤ upper`, or `NotConverged` when the gap stays open.
use crate::core::error::Result;
use crate::core::linalg::CMatrix;
use crate::core::types::ChoiMatrix;
use serde::{Deserialize, Serialize};

mod interior_point;

pub use interior_point::InteriorPointSolver;

/// The data of one diamond-norm SDP instance.
#[derive(Clone, Debug)]
pub struct DiamondNormProgram {
    j: CMatrix,
    d: usize,
}

impl DiamondNormProgram {
    pub fn new(choi: &ChoiMatrix) -> Self {
        Self { j: choi.matrix().clone(), d: choi.dim() }
    }

    /// Hermitian Choi matrix of the map whose norm is sought.
    pub fn choi(&self) -> &CMatrix {
        &self.j
    }

    /// Input (and output) dimension `d`.
    pub fn dim(&self) -> usize {
        self.d
    }
}

/// A solved program: primal and dual objective values at termination.
#[derive(Clone, Debug)]
pub struct SdpSolution {
    /// Primal value achieved by `input_state`.
    pub lower: f64,
    /// Best dual-feasible value found.
    pub upper: f64,
    pub iterations: usize,
    /// Input state attaining `lower`.
    pub input_state: CMatrix,
}

impl SdpSolution {
    pub fn gap(&self) -> f64 {
        self.upper - self.lower
    }
}

/// Anything that can solve a [`DiamondNormProgram`].
pub trait SdpSolver: Send + Sync {
    /// Solve to the solver's own precision, or fail with `NotConverged`
    /// (budget exhausted) or `SolverError` (numerical breakdown).
    fn solve(&self, program: &DiamondNormProgram) -> Result<SdpSolution>;
}

/// Budget and barrier parameters for [`InteriorPointSolver`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverConfig {
    /// Total Newton steps across all barrier weights.
    pub max_iterations: usize,
    /// Converged once `upper − lower <= gap_tolerance · max(1, upper)`.
    pub gap_tolerance: f64,
    /// Factor applied to the barrier weight after each centering; must exceed 1.
    pub barrier_growth: f64,
    /// Centering stops once half the squared Newton decrement drops below this.
    pub centering_tolerance: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: 500,
            gap_tolerance: 1e-7,
            barrier_growth: 10.0,
            centering_tolerance: 1e-9,
        }
    }
}
