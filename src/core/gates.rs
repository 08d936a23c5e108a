//! Standard single-qubit gates and the unitary-channel representations used
//! by the worked examples.
use crate::core::error::{QMetricError, Result};
use crate::core::linalg::{c, kron, CMatrix};
use crate::core::types::{ChoiMatrix, PauliLiouville};
use nalgebra::DMatrix;

pub fn i2() -> CMatrix {
    CMatrix::identity(2, 2)
}
pub fn x() -> CMatrix {
    CMatrix::from_row_slice(2, 2, &[c(0.0, 0.0), c(1.0, 0.0), c(1.0, 0.0), c(0.0, 0.0)])
}
pub fn y() -> CMatrix {
    CMatrix::from_row_slice(2, 2, &[c(0.0, 0.0), c(0.0, -1.0), c(0.0, 1.0), c(0.0, 0.0)])
}
pub fn z() -> CMatrix {
    CMatrix::from_row_slice(2, 2, &[c(1.0, 0.0), c(0.0, 0.0), c(0.0, 0.0), c(-1.0, 0.0)])
}
pub fn h() -> CMatrix {
    let s = 1.0_f64 / 2.0_f64.sqrt();
    CMatrix::from_row_slice(2, 2, &[c(s, 0.0), c(s, 0.0), c(s, 0.0), c(-s, 0.0)])
}
pub fn rx(theta: f64) -> CMatrix {
    let (c0, s0) = ((theta / 2.0).cos(), (theta / 2.0).sin());
    CMatrix::from_row_slice(2, 2, &[c(c0, 0.0), c(0.0, -s0), c(0.0, -s0), c(c0, 0.0)])
}
pub fn ry(theta: f64) -> CMatrix {
    let (c0, s0) = ((theta / 2.0).cos(), (theta / 2.0).sin());
    CMatrix::from_row_slice(2, 2, &[c(c0, 0.0), c(-s0, 0.0), c(s0, 0.0), c(c0, 0.0)])
}
pub fn rz(theta: f64) -> CMatrix {
    let e_m = num_complex::Complex64::from_polar(1.0, -theta / 2.0);
    let e_p = num_complex::Complex64::from_polar(1.0, theta / 2.0);
    CMatrix::from_row_slice(2, 2, &[e_m, c(0.0, 0.0), c(0.0, 0.0), e_p])
}

/// The `4^n` Pauli strings on `n` qubits, ordered I, X, Y, Z per qubit with
/// the first qubit most significant.
pub fn pauli_basis(n_qubits: usize) -> Vec<CMatrix> {
    let single = [i2(), x(), y(), z()];
    let mut basis = vec![CMatrix::identity(1, 1)];
    for _ in 0..n_qubits {
        basis = basis
            .iter()
            .flat_map(|p| single.iter().map(move |s| kron(p, s)))
            .collect();
    }
    basis
}

fn check_unitary(u: &CMatrix) -> Result<usize> {
    if u.nrows() != u.ncols() || u.nrows() == 0 {
        return Err(QMetricError::invalid_state(format!(
            "unitary must be square, got {}x{}",
            u.nrows(),
            u.ncols()
        )));
    }
    let d = u.nrows();
    let max_diff = (u.adjoint() * u - CMatrix::identity(d, d))
        .iter()
        .map(|z| z.norm())
        .fold(0.0_f64, f64::max);
    if max_diff > 1e-8 {
        return Err(QMetricError::invalid_state(format!(
            "matrix not unitary (‖UᴴU−I‖∞={max_diff:e})"
        )));
    }
    Ok(d)
}

/// Choi matrix `|U⟩⟩⟨⟨U|` of the channel `ρ ↦ UρU†`.
pub fn unitary_choi(u: &CMatrix) -> Result<ChoiMatrix> {
    let d = check_unitary(u)?;
    let mut v = CMatrix::zeros(d * d, 1);
    for out in 0..d {
        for inp in 0..d {
            v[(out * d + inp, 0)] = u[(out, inp)];
        }
    }
    ChoiMatrix::try_new(&v * v.adjoint())
}

/// Pauli-Liouville matrix `R_ij = Tr[P_i U P_j U†]/d` of `ρ ↦ UρU†` for an
/// `n`-qubit unitary.
pub fn unitary_pauli_liouville(u: &CMatrix) -> Result<PauliLiouville> {
    let d = check_unitary(u)?;
    if !d.is_power_of_two() {
        return Err(QMetricError::invalid_state(format!(
            "Pauli basis needs a qubit dimension, got d = {d}"
        )));
    }
    let basis = pauli_basis(d.trailing_zeros() as usize);
    let conjugated: Vec<CMatrix> = basis.iter().map(|p| u * p * u.adjoint()).collect();
    let n = basis.len();
    let mut r = DMatrix::<f64>::zeros(n, n);
    for i in 0..n {
        for j in 0..n {
            r[(i, j)] = (&basis[i] * &conjugated[j]).trace().re / d as f64;
        }
    }
    PauliLiouville::try_new(r)
}
