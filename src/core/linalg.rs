//! Hermitian eigen-calculus on dense complex matrices.
//!
//! Matrix functions (square roots, fractional powers, absolute values) are all
//! evaluated through one eigendecomposition path, `V f(Λ) V†`, with explicit
//! clipping of round-off negative eigenvalues.
use crate::core::error::{QMetricError, Result};
use crate::core::tolerance::{spectral_scale, NEGATIVE_EIGENVALUE, ZERO_EIGENVALUE};
use nalgebra::DMatrix;
use num_complex::Complex64 as C64;
use tracing::warn;

pub type CMatrix = DMatrix<C64>;

#[inline]
pub fn c(r: f64, i: f64) -> C64 {
    C64::new(r, i)
}

/// Eigenvalues (ascending order not guaranteed) and eigenvectors as columns.
#[derive(Clone, Debug)]
pub struct HermitianSpectrum {
    pub values: Vec<f64>,
    pub vectors: CMatrix,
}

impl HermitianSpectrum {
    /// `max(1, max |λ|)`.
    pub fn scale(&self) -> f64 {
        spectral_scale(&self.values)
    }

    /// Rebuild `V diag(f(λ)) V†`.
    pub fn map<F>(&self, f: F) -> CMatrix
    where
        F: Fn(f64) -> f64,
    {
        let mut scaled = self.vectors.clone();
        for (j, &l) in self.values.iter().enumerate() {
            let fl = c(f(l), 0.0);
            for z in scaled.column_mut(j).iter_mut() {
                *z *= fl;
            }
        }
        scaled * self.vectors.adjoint()
    }

    /// Eigenvalues with round-off negatives clipped and near-zeros flushed.
    ///
    /// Fails with `DomainError` when an eigenvalue is negative beyond
    /// [`NEGATIVE_EIGENVALUE`] relative to the spectral scale.
    pub fn clipped_values(&self, quantity: &'static str) -> Result<Vec<f64>> {
        let scale = self.scale();
        let mut out = Vec::with_capacity(self.values.len());
        for &l in &self.values {
            if l < -NEGATIVE_EIGENVALUE * scale {
                return Err(QMetricError::domain(quantity, l));
            }
            if l <= ZERO_EIGENVALUE * scale {
                if l < -ZERO_EIGENVALUE * scale {
                    warn!(quantity, eigenvalue = l, "clipping negative eigenvalue to zero");
                }
                out.push(0.0);
            } else {
                out.push(l);
            }
        }
        Ok(out)
    }
}

/// Hermitian part `(M + M†)/2`.
pub fn hermitian_part(m: &CMatrix) -> CMatrix {
    (m + m.adjoint()) * c(0.5, 0.0)
}

/// Largest entrywise deviation `|m_ij − conj(m_ji)|`.
pub fn hermiticity_defect(m: &CMatrix) -> f64 {
    let n = m.nrows();
    let mut worst = 0.0_f64;
    for i in 0..n {
        for j in i..n {
            worst = worst.max((m[(i, j)] - m[(j, i)].conj()).norm());
        }
    }
    worst
}

/// Eigendecomposition of the Hermitian part of `m`.
pub fn eigh(m: &CMatrix) -> Result<HermitianSpectrum> {
    if m.nrows() != m.ncols() {
        return Err(QMetricError::invalid_state(format!(
            "matrix is not square: {}x{}",
            m.nrows(),
            m.ncols()
        )));
    }
    let eig = hermitian_part(m)
        .try_symmetric_eigen(f64::EPSILON, 0)
        .ok_or_else(|| QMetricError::solver("Hermitian eigendecomposition did not converge"))?;
    let values: Vec<f64> = eig.eigenvalues.iter().copied().collect();
    if values.iter().any(|l| !l.is_finite()) {
        return Err(QMetricError::solver("non-finite eigenvalue"));
    }
    Ok(HermitianSpectrum { values, vectors: eig.eigenvectors })
}

/// `M^p` for a positive semidefinite `M` and `p >= 0`.
///
/// Zero eigenvalues map to zero for every `p`, so `M^0` is the projector onto
/// the support of `M`.
pub fn psd_power(m: &CMatrix, p: f64, quantity: &'static str) -> Result<CMatrix> {
    let eig = eigh(m)?;
    let clipped = eig.clipped_values(quantity)?;
    let clean = HermitianSpectrum { values: clipped, vectors: eig.vectors };
    Ok(clean.map(|l| if l > 0.0 { l.powf(p) } else { 0.0 }))
}

/// Principal square root of a positive semidefinite matrix.
pub fn psd_sqrt(m: &CMatrix, quantity: &'static str) -> Result<CMatrix> {
    psd_power(m, 0.5, quantity)
}

/// `Σ √λ_i` over the clipped spectrum of a positive semidefinite matrix.
pub fn trace_sqrt(m: &CMatrix, quantity: &'static str) -> Result<f64> {
    let eig = eigh(m)?;
    Ok(eig.clipped_values(quantity)?.iter().map(|l| l.sqrt()).sum())
}

/// Trace norm `Σ |λ_i|` of a Hermitian matrix.
pub fn trace_norm(m: &CMatrix) -> Result<f64> {
    Ok(eigh(m)?.values.iter().map(|l| l.abs()).sum())
}

/// `(|M|, ‖M‖₁)` for a Hermitian matrix.
pub fn hermitian_abs(m: &CMatrix) -> Result<(CMatrix, f64)> {
    let eig = eigh(m)?;
    let norm = eig.values.iter().map(|l| l.abs()).sum();
    Ok((eig.map(f64::abs), norm))
}

pub fn max_eigenvalue(m: &CMatrix) -> Result<f64> {
    Ok(eigh(m)?.values.iter().copied().fold(f64::NEG_INFINITY, f64::max))
}

/// Real part of the trace.
pub fn trace_re(m: &CMatrix) -> f64 {
    m.diagonal().iter().map(|z| z.re).sum()
}

/// Kronecker product A ⊗ B
pub fn kron(a: &CMatrix, b: &CMatrix) -> CMatrix {
    let (ar, ac) = (a.nrows(), a.ncols());
    let (br, bc) = (b.nrows(), b.ncols());
    let mut out = CMatrix::from_element(ar * br, ac * bc, c(0.0, 0.0));
    for i in 0..ar {
        for j in 0..ac {
            let aij = a[(i, j)];
            for k in 0..br {
                for l in 0..bc {
                    out[(i * br + k, j * bc + l)] = aij * b[(k, l)];
                }
            }
        }
    }
    out
}

/// `I_{d_first} ⊗ b`.
pub fn lift_second(b: &CMatrix, d_first: usize) -> CMatrix {
    kron(&CMatrix::identity(d_first, d_first), b)
}

/// Trace out the first tensor factor of an operator on `C^{d_first} ⊗ C^{d_second}`.
pub fn partial_trace_first(m: &CMatrix, d_first: usize, d_second: usize) -> CMatrix {
    let mut out = CMatrix::from_element(d_second, d_second, c(0.0, 0.0));
    for i in 0..d_second {
        for j in 0..d_second {
            let mut acc = c(0.0, 0.0);
            for k in 0..d_first {
                acc += m[(k * d_second + i, k * d_second + j)];
            }
            out[(i, j)] = acc;
        }
    }
    out
}

/// `Some(d)` if `n == d * d`.
pub fn exact_sqrt(n: usize) -> Option<usize> {
    let d = (n as f64).sqrt().round() as usize;
    (d * d == n).then_some(d)
}
