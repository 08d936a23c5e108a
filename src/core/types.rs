//! Validated inputs: density matrices, probability vectors, Pauli-Liouville
//! and Choi representations.
//!
//! Construction is the only place inputs are checked; the metric routines
//! afterwards only compare dimensions.
use crate::core::error::{QMetricError, Result};
use crate::core::linalg::{self, c, CMatrix};
use crate::core::tolerance::DEFAULT_STATE;
use nalgebra::{DMatrix, DVector};
use num_complex::Complex64 as C64;

/// A quantum state: Hermitian, positive semidefinite, unit trace.
#[derive(Clone, Debug)]
pub struct DensityMatrix {
    m: CMatrix,
}

impl DensityMatrix {
    /// Validate with the default tolerance.
    pub fn try_new(m: CMatrix) -> Result<Self> {
        Self::try_new_with(m, DEFAULT_STATE)
    }

    /// Validate Hermiticity, trace and positivity up to `tol`.
    ///
    /// Borderline inputs within `tol` are accepted as given; round-off is
    /// handled later by the eigenvalue clipping in [`linalg`].
    pub fn try_new_with(m: CMatrix, tol: f64) -> Result<Self> {
        let (r, cols) = (m.nrows(), m.ncols());
        if r != cols {
            return Err(QMetricError::invalid_state(format!(
                "density matrix must be square, got {r}x{cols}"
            )));
        }
        if r == 0 {
            return Err(QMetricError::invalid_state("density matrix is empty"));
        }
        let defect = linalg::hermiticity_defect(&m);
        if defect > tol {
            return Err(QMetricError::invalid_state(format!(
                "density matrix not Hermitian (max |ρ_ij − ρ_ji*| = {defect:e})"
            )));
        }
        let tr = m.trace();
        if (tr.re - 1.0).abs() > tol || tr.im.abs() > tol {
            return Err(QMetricError::invalid_state(format!(
                "density matrix trace is {tr}, expected 1"
            )));
        }
        let min_eig = linalg::eigh(&m)?
            .values
            .iter()
            .copied()
            .fold(f64::INFINITY, f64::min);
        if min_eig < -tol {
            return Err(QMetricError::invalid_state(format!(
                "density matrix not positive semidefinite (λ_min = {min_eig:e})"
            )));
        }
        Ok(Self { m })
    }

    /// Pure state `|ψ⟩⟨ψ|`; `psi` is normalized first.
    pub fn from_ket(psi: &DVector<C64>) -> Result<Self> {
        let norm = psi.norm();
        if norm < DEFAULT_STATE {
            return Err(QMetricError::invalid_state("ket norm ~ 0"));
        }
        let v = psi / c(norm, 0.0);
        Self::try_new(&v * v.adjoint())
    }

    /// `I/d`.
    pub fn maximally_mixed(d: usize) -> Result<Self> {
        if d == 0 {
            return Err(QMetricError::invalid_state("dimension must be positive"));
        }
        Ok(Self { m: CMatrix::identity(d, d) * c(1.0 / d as f64, 0.0) })
    }

    /// Diagonal state with populations `p` (a classical distribution).
    pub fn from_diagonal(p: &[f64]) -> Result<Self> {
        let mut m = CMatrix::zeros(p.len(), p.len());
        for (i, &pi) in p.iter().enumerate() {
            m[(i, i)] = c(pi, 0.0);
        }
        Self::try_new(m)
    }

    pub fn dim(&self) -> usize {
        self.m.nrows()
    }

    pub fn matrix(&self) -> &CMatrix {
        &self.m
    }
}

/// A channel in the Pauli basis: real `d² × d²`.
#[derive(Clone, Debug)]
pub struct PauliLiouville {
    r: DMatrix<f64>,
    d: usize,
}

impl PauliLiouville {
    pub fn try_new(r: DMatrix<f64>) -> Result<Self> {
        if r.nrows() != r.ncols() {
            return Err(QMetricError::invalid_state(format!(
                "Pauli-Liouville matrix must be square, got {}x{}",
                r.nrows(),
                r.ncols()
            )));
        }
        let d = match linalg::exact_sqrt(r.nrows()) {
            Some(d) if d > 0 => d,
            _ => {
                return Err(QMetricError::invalid_state(format!(
                    "Pauli-Liouville side {} is not d² for a positive integer d",
                    r.nrows()
                )))
            }
        };
        if r.iter().any(|x| !x.is_finite()) {
            return Err(QMetricError::invalid_state("Pauli-Liouville matrix has non-finite entries"));
        }
        Ok(Self { r, d })
    }

    /// Hilbert-space dimension `d` of the channel.
    pub fn dim(&self) -> usize {
        self.d
    }

    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.r
    }
}

/// Choi matrix `J = Σ_ij Φ(|i⟩⟨j|) ⊗ |i⟩⟨j|` (output ⊗ input, trace `d` for a
/// trace-preserving map).
///
/// Only Hermiticity is checked, so Choi differences and slightly unphysical
/// estimates are accepted.
#[derive(Clone, Debug)]
pub struct ChoiMatrix {
    j: CMatrix,
    d: usize,
}

impl ChoiMatrix {
    pub fn try_new(j: CMatrix) -> Result<Self> {
        Self::try_new_with(j, DEFAULT_STATE)
    }

    pub fn try_new_with(j: CMatrix, tol: f64) -> Result<Self> {
        if j.nrows() != j.ncols() {
            return Err(QMetricError::invalid_state(format!(
                "Choi matrix must be square, got {}x{}",
                j.nrows(),
                j.ncols()
            )));
        }
        let d = match linalg::exact_sqrt(j.nrows()) {
            Some(d) if d > 0 => d,
            _ => {
                return Err(QMetricError::invalid_state(format!(
                    "Choi side {} is not d² for a positive integer d",
                    j.nrows()
                )))
            }
        };
        let scale = j.iter().fold(1.0_f64, |acc, z| acc.max(z.norm()));
        let defect = linalg::hermiticity_defect(&j);
        if !defect.is_finite() || defect > tol * scale {
            return Err(QMetricError::invalid_state(format!(
                "Choi matrix not Hermitian (max |J_ij − J_ji*| = {defect:e})"
            )));
        }
        Ok(Self { j: linalg::hermitian_part(&j), d })
    }

    pub fn dim(&self) -> usize {
        self.d
    }

    pub fn matrix(&self) -> &CMatrix {
        &self.j
    }

    /// `self − other`, the Choi matrix of the difference of the two maps.
    pub fn difference(&self, other: &ChoiMatrix) -> Result<ChoiMatrix> {
        if self.j.shape() != other.j.shape() {
            return Err(QMetricError::mismatch("Choi difference", self.j.shape(), other.j.shape()));
        }
        Ok(ChoiMatrix { j: &self.j - &other.j, d: self.d })
    }

    /// `factor · self`.
    pub fn scaled(&self, factor: f64) -> ChoiMatrix {
        ChoiMatrix { j: &self.j * c(factor, 0.0), d: self.d }
    }
}

/// Classical outcome distribution.
#[derive(Clone, Debug)]
pub struct ProbabilityVector {
    p: Vec<f64>,
}

impl ProbabilityVector {
    pub fn try_new(p: Vec<f64>) -> Result<Self> {
        Self::try_new_with(p, DEFAULT_STATE)
    }

    pub fn try_new_with(p: Vec<f64>, tol: f64) -> Result<Self> {
        if p.is_empty() {
            return Err(QMetricError::invalid_state("probability vector is empty"));
        }
        if let Some(bad) = p.iter().find(|x| !x.is_finite() || **x < -tol) {
            return Err(QMetricError::invalid_state(format!("invalid probability {bad}")));
        }
        let total: f64 = p.iter().sum();
        if (total - 1.0).abs() > tol {
            return Err(QMetricError::invalid_state(format!(
                "probabilities sum to {total}, expected 1"
            )));
        }
        Ok(Self { p })
    }

    pub fn len(&self) -> usize {
        self.p.len()
    }

    pub fn is_empty(&self) -> bool {
        self.p.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.p
    }
}
